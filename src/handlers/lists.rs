//! List handlers: index, create, show, rename, destroy, complete-all
//!
//! Validation failures re-render the originating form with the error
//! message left in the session flash and the submitted text preserved.
//! Successes set a success flash and redirect. Missing list ids are a
//! uniform 404 regardless of operation.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use serde::Deserialize;
use tracing::info;

use super::{is_xhr, AppState};
use crate::errors::AppError;
use crate::model::{next_id, TodoList};
use crate::session::{Flash, SessionId};
use crate::validation;
use crate::views;

/// Form body for list create and rename.
#[derive(Debug, Deserialize)]
pub struct ListForm {
    #[serde(default)]
    pub list_name: String,
}

enum RenameOutcome {
    NotFound,
    Invalid(TodoList),
    Renamed,
}

/// GET / - everything lives under /lists
pub async fn root() -> Redirect {
    Redirect::to("/lists")
}

/// GET /lists - view all lists
pub async fn index(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Html<String> {
    let (lists, flash) = state
        .store
        .with(session_id, |data| (data.lists.clone(), data.flash.take()));

    Html(views::lists_page(&lists, flash.as_ref()))
}

/// GET /lists/new - render the new-list form
pub async fn new_form(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Html<String> {
    let flash = state.store.take_flash(session_id);
    Html(views::new_list_page(flash.as_ref(), ""))
}

/// POST /lists - create a new list
#[tracing::instrument(skip(state, form), fields(session_id = %session_id))]
pub async fn create(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Form(form): Form<ListForm>,
) -> Response {
    let name = form.list_name.trim().to_string();

    let created = state.store.with(session_id, |data| {
        match validation::validate_list_name(&name, &data.lists) {
            Err(err) => {
                data.flash = Some(Flash::Error(format!("List name {err}.")));
                false
            }
            Ok(()) => {
                let id = next_id(data.lists.iter().map(|l| l.id));
                data.lists.push(TodoList::new(id, name.clone()));
                data.flash = Some(Flash::Success("The list has been created.".to_string()));
                true
            }
        }
    });

    if created {
        info!("list created");
        Redirect::to("/lists").into_response()
    } else {
        let flash = state.store.take_flash(session_id);
        Html(views::new_list_page(flash.as_ref(), &form.list_name)).into_response()
    }
}

/// GET /lists/{id} - view one list
pub async fn show(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<u64>,
) -> Result<Html<String>, AppError> {
    let list = state
        .store
        .with(session_id, |data| {
            data.lists.iter().find(|l| l.id == id).cloned()
        })
        .ok_or(AppError::ListNotFound(id))?;

    let flash = state.store.take_flash(session_id);
    Ok(Html(views::list_page(&list, flash.as_ref(), "")))
}

/// GET /lists/{id}/edit - render the rename form
pub async fn edit_form(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<u64>,
) -> Result<Html<String>, AppError> {
    let list = state
        .store
        .with(session_id, |data| {
            data.lists.iter().find(|l| l.id == id).cloned()
        })
        .ok_or(AppError::ListNotFound(id))?;

    let flash = state.store.take_flash(session_id);
    let name = list.name.clone();
    Ok(Html(views::edit_list_page(&list, flash.as_ref(), &name)))
}

/// POST /lists/{id} - rename a list
///
/// The duplicate check runs against every list, so renaming a list to any
/// existing name (its own included) is rejected.
#[tracing::instrument(skip(state, form), fields(session_id = %session_id))]
pub async fn rename(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<u64>,
    Form(form): Form<ListForm>,
) -> Result<Response, AppError> {
    let name = form.list_name.trim().to_string();

    let outcome = state.store.with(session_id, |data| {
        let Some(pos) = data.lists.iter().position(|l| l.id == id) else {
            return RenameOutcome::NotFound;
        };

        match validation::validate_list_name(&name, &data.lists) {
            Err(err) => {
                data.flash = Some(Flash::Error(format!("List name {err}.")));
                RenameOutcome::Invalid(data.lists[pos].clone())
            }
            Ok(()) => {
                data.lists[pos].name = name.clone();
                data.flash = Some(Flash::Success("The list has been updated.".to_string()));
                RenameOutcome::Renamed
            }
        }
    });

    match outcome {
        RenameOutcome::NotFound => Err(AppError::ListNotFound(id)),
        RenameOutcome::Invalid(list) => {
            let flash = state.store.take_flash(session_id);
            Ok(Html(views::edit_list_page(&list, flash.as_ref(), &form.list_name))
                .into_response())
        }
        RenameOutcome::Renamed => {
            info!("list renamed");
            Ok(Redirect::to(&format!("/lists/{id}")).into_response())
        }
    }
}

/// POST /lists/{id}/destroy - delete a list and everything in it
///
/// Script-driven clients get a bare 200 with the index path as the body;
/// browsers get a flash and a redirect.
#[tracing::instrument(skip(state, headers), fields(session_id = %session_id))]
pub async fn destroy(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let xhr = is_xhr(&headers);

    let removed = state.store.with(session_id, |data| {
        let before = data.lists.len();
        data.lists.retain(|l| l.id != id);
        let removed = data.lists.len() < before;
        if removed && !xhr {
            data.flash = Some(Flash::Success("The list has been deleted.".to_string()));
        }
        removed
    });

    if !removed {
        return Err(AppError::ListNotFound(id));
    }

    info!("list deleted");
    if xhr {
        Ok((StatusCode::OK, "/lists").into_response())
    } else {
        Ok(Redirect::to("/lists").into_response())
    }
}

/// POST /lists/{id}/complete_all - mark every todo in the list complete
#[tracing::instrument(skip(state), fields(session_id = %session_id))]
pub async fn complete_all(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<u64>,
) -> Result<Redirect, AppError> {
    let completed = state.store.with(session_id, |data| {
        let Some(list) = data.lists.iter_mut().find(|l| l.id == id) else {
            return false;
        };

        for todo in &mut list.todos {
            todo.completed = true;
        }
        data.flash = Some(Flash::Success("All todos have been completed.".to_string()));
        true
    });

    if !completed {
        return Err(AppError::ListNotFound(id));
    }

    Ok(Redirect::to(&format!("/lists/{id}")))
}
