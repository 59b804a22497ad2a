//! Todo handlers: add, toggle completion, destroy
//!
//! All three address todos inside a parent list; a missing list or todo
//! id is a uniform 404.

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
use crate::model::{next_id, Todo, TodoList};
use crate::session::{Flash, SessionId};
use crate::validation;
use crate::views;

/// Form body for adding a todo.
#[derive(Debug, Deserialize)]
pub struct TodoForm {
    #[serde(default)]
    pub todo: String,
}

/// Form body for setting a todo's completion state.
#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    #[serde(default)]
    pub completed: String,
}

/// Checkbox decoding contract: exactly `"true"` means complete, any other
/// value (including an absent field) means incomplete.
fn parse_checkbox(value: &str) -> bool {
    value == "true"
}

enum AddOutcome {
    NoList,
    Invalid(TodoList),
    Added,
}

enum TouchOutcome {
    NoList,
    NoTodo,
    Done,
}

/// POST /lists/{list_id}/todos - add a todo to a list
#[tracing::instrument(skip(state, form), fields(session_id = %session_id))]
pub async fn create(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Path(list_id): Path<u64>,
    Form(form): Form<TodoForm>,
) -> Result<Response, AppError> {
    let name = form.todo.trim().to_string();

    let outcome = state.store.with(session_id, |data| {
        let Some(list) = data.lists.iter_mut().find(|l| l.id == list_id) else {
            return AddOutcome::NoList;
        };

        match validation::validate_todo_name(&name) {
            Err(err) => {
                let list = list.clone();
                data.flash = Some(Flash::Error(format!("Todo {err}.")));
                AddOutcome::Invalid(list)
            }
            Ok(()) => {
                let id = next_id(list.todos.iter().map(|t| t.id));
                list.todos.push(Todo::new(id, name.clone()));
                data.flash = Some(Flash::Success("The todo was added.".to_string()));
                AddOutcome::Added
            }
        }
    });

    match outcome {
        AddOutcome::NoList => Err(AppError::ListNotFound(list_id)),
        AddOutcome::Invalid(list) => {
            let flash = state.store.take_flash(session_id);
            Ok(Html(views::list_page(&list, flash.as_ref(), &form.todo)).into_response())
        }
        AddOutcome::Added => {
            info!("todo added");
            Ok(Redirect::to(&format!("/lists/{list_id}")).into_response())
        }
    }
}

/// POST /lists/{list_id}/todos/{id} - set a todo's completion state
///
/// Setting the same value twice is a no-op the second time; the handler
/// writes whatever the form says, it does not flip.
#[tracing::instrument(skip(state, form), fields(session_id = %session_id))]
pub async fn toggle(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Path((list_id, todo_id)): Path<(u64, u64)>,
    Form(form): Form<ToggleForm>,
) -> Result<Redirect, AppError> {
    let completed = parse_checkbox(form.completed.trim());

    let outcome = state.store.with(session_id, |data| {
        let Some(list) = data.lists.iter_mut().find(|l| l.id == list_id) else {
            return TouchOutcome::NoList;
        };
        let Some(todo) = list.find_todo_mut(todo_id) else {
            return TouchOutcome::NoTodo;
        };

        todo.completed = completed;
        data.flash = Some(Flash::Success("The todo has been updated.".to_string()));
        TouchOutcome::Done
    });

    match outcome {
        TouchOutcome::NoList => Err(AppError::ListNotFound(list_id)),
        TouchOutcome::NoTodo => Err(AppError::TodoNotFound(todo_id)),
        TouchOutcome::Done => Ok(Redirect::to(&format!("/lists/{list_id}"))),
    }
}

/// POST /lists/{list_id}/todos/{id}/destroy - delete a todo
///
/// Script-driven clients get a bare 204; browsers get a flash and a
/// redirect back to the list.
#[tracing::instrument(skip(state, headers), fields(session_id = %session_id))]
pub async fn destroy(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Path((list_id, todo_id)): Path<(u64, u64)>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let xhr = is_xhr(&headers);

    let outcome = state.store.with(session_id, |data| {
        let Some(list) = data.lists.iter_mut().find(|l| l.id == list_id) else {
            return TouchOutcome::NoList;
        };

        let before = list.todos.len();
        list.todos.retain(|t| t.id != todo_id);
        if list.todos.len() == before {
            return TouchOutcome::NoTodo;
        }

        if !xhr {
            data.flash = Some(Flash::Success("The todo has been deleted.".to_string()));
        }
        TouchOutcome::Done
    });

    match outcome {
        TouchOutcome::NoList => Err(AppError::ListNotFound(list_id)),
        TouchOutcome::NoTodo => Err(AppError::TodoNotFound(todo_id)),
        TouchOutcome::Done => {
            info!("todo deleted");
            if xhr {
                Ok(StatusCode::NO_CONTENT.into_response())
            } else {
                Ok(Redirect::to(&format!("/lists/{list_id}")).into_response())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_checkbox_contract() {
        assert!(parse_checkbox("true"));
        assert!(!parse_checkbox("false"));
        assert!(!parse_checkbox(""));
        assert!(!parse_checkbox("TRUE"));
        assert!(!parse_checkbox("1"));
    }
}
