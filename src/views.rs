//! Server-rendered HTML views
//!
//! Plain form-driven pages, no client-side framework. Every page goes
//! through [`layout`], which renders the flash banner the handlers leave
//! in the session. Completed lists and todos get a `complete` class and
//! sort below incomplete ones via [`sorted_for_display`].

use hypertext::{html_elements, maud, GlobalAttributes, Raw, Renderable};

use crate::model::{sorted_for_display, Todo, TodoList};
use crate::session::Flash;

const STYLES: &str = "\
body { font-family: sans-serif; max-width: 40rem; margin: 2rem auto; padding: 0 1rem; }\n\
ul.lists, ul.todos { list-style: none; padding: 0; }\n\
ul.lists li, ul.todos li { display: flex; align-items: center; gap: 0.5rem; padding: 0.4rem 0; }\n\
li.complete a, li.complete span.name { text-decoration: line-through; color: #888; }\n\
span.count { margin-left: auto; color: #666; }\n\
form.inline { display: inline; margin: 0; }\n\
div.flash { padding: 0.6rem 1rem; border-radius: 4px; margin-bottom: 1rem; }\n\
div.flash.success { background: #e2f2e2; color: #205020; }\n\
div.flash.error { background: #f2e2e2; color: #602020; }\n\
nav { margin-bottom: 1rem; }\n\
nav a { margin-right: 1rem; }\n";

fn layout(title: &str, flash: Option<&Flash>, content: &str) -> String {
    let flash_html = match flash {
        Some(flash) => maud! {
            div class=(format!("flash {}", flash.kind())) {
                p { (flash.message()) }
            }
        }
        .render()
        .into_inner(),
        None => String::new(),
    };

    maud! {
        !DOCTYPE
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (Raw(STYLES)) }
            }
            body {
                (Raw(&flash_html))
                main {
                    (Raw(content))
                }
            }
        }
    }
    .render()
    .into_inner()
}

fn render_list_item(index: usize, list: &TodoList) -> String {
    let class = if list.is_complete() { "complete" } else { "" };
    let url = format!("/lists/{}", list.id);
    let count = format!("{} / {}", list.todos_remaining(), list.todos_count());

    maud! {
        li class=(class) data-index=(index.to_string()) {
            a href=(url) { (list.name) }
            span .count { (count) }
        }
    }
    .render()
    .into_inner()
}

/// GET /lists - all lists, incomplete first.
pub fn lists_page(lists: &[TodoList], flash: Option<&Flash>) -> String {
    let items: String = sorted_for_display(lists, TodoList::is_complete)
        .into_iter()
        .map(|(index, list)| render_list_item(index, list))
        .collect();

    let content = maud! {
        h1 { "Todo Lists" }
        nav {
            a href="/lists/new" { "New List" }
        }
        @if items.is_empty() {
            p .empty { "No lists yet. Create one!" }
        } @else {
            ul .lists {
                (Raw(&items))
            }
        }
    }
    .render()
    .into_inner();

    layout("Todo Lists", flash, &content)
}

/// GET /lists/new - the new-list form. `name` carries the submitted value
/// back into the form after a validation failure.
pub fn new_list_page(flash: Option<&Flash>, name: &str) -> String {
    let content = maud! {
        h1 { "New Todo List" }
        form method="post" action="/lists" {
            label for="list_name" { "Enter the name for your new list:" }
            input type="text" id="list_name" name="list_name" value=(name) autofocus;
            button type="submit" { "Save" }
            a href="/lists" { "Cancel" }
        }
    }
    .render()
    .into_inner();

    layout("New Todo List", flash, &content)
}

/// GET /lists/{id}/edit - rename form plus the delete-list button.
pub fn edit_list_page(list: &TodoList, flash: Option<&Flash>, name: &str) -> String {
    let rename_url = format!("/lists/{}", list.id);
    let destroy_url = format!("/lists/{}/destroy", list.id);

    let content = maud! {
        h1 { "Editing \"" (list.name) "\"" }
        form method="post" action=(rename_url) {
            label for="list_name" { "Enter the new name for the list:" }
            input type="text" id="list_name" name="list_name" value=(name) autofocus;
            button type="submit" { "Save" }
            a href=(format!("/lists/{}", list.id)) { "Cancel" }
        }
        form .inline method="post" action=(destroy_url) {
            button type="submit" { "Delete List" }
        }
    }
    .render()
    .into_inner();

    layout("Edit List", flash, &content)
}

fn render_todo_item(list_id: u64, index: usize, todo: &Todo) -> String {
    let class = if todo.completed { "complete" } else { "" };
    let toggle_url = format!("/lists/{}/todos/{}", list_id, todo.id);
    let destroy_url = format!("/lists/{}/todos/{}/destroy", list_id, todo.id);
    // The toggle form submits the value the todo should become.
    let next_value = if todo.completed { "false" } else { "true" };
    let toggle_label = if todo.completed { "Undo" } else { "Complete" };

    maud! {
        li class=(class) data-index=(index.to_string()) {
            form .inline method="post" action=(toggle_url) {
                input type="hidden" name="completed" value=(next_value);
                button type="submit" { (toggle_label) }
            }
            span .name { (todo.name) }
            form .inline method="post" action=(destroy_url) {
                button type="submit" { "Delete" }
            }
        }
    }
    .render()
    .into_inner()
}

/// GET /lists/{id} - one list with its todos and the add-todo form.
/// `todo_input` carries the rejected text back after a validation failure.
pub fn list_page(list: &TodoList, flash: Option<&Flash>, todo_input: &str) -> String {
    let items: String = sorted_for_display(&list.todos, |t| t.completed)
        .into_iter()
        .map(|(index, todo)| render_todo_item(list.id, index, todo))
        .collect();

    let edit_url = format!("/lists/{}/edit", list.id);
    let complete_all_url = format!("/lists/{}/complete_all", list.id);
    let add_url = format!("/lists/{}/todos", list.id);
    let count = format!(
        "{} of {} remaining",
        list.todos_remaining(),
        list.todos_count()
    );

    let content = maud! {
        h1 { (list.name) }
        nav {
            a href="/lists" { "All Lists" }
            a href=(edit_url) { "Edit List" }
        }
        p .count { (count) }
        @if !list.todos.is_empty() {
            form .inline method="post" action=(complete_all_url) {
                button type="submit" { "Complete All" }
            }
            ul .todos {
                (Raw(&items))
            }
        } @else {
            p .empty { "Nothing to do yet." }
        }
        form method="post" action=(add_url) {
            input type="text" name="todo" value=(todo_input) placeholder="Something to do" autofocus;
            button type="submit" { "Add" }
        }
    }
    .render()
    .into_inner();

    layout(&list.name, flash, &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groceries() -> TodoList {
        let mut list = TodoList::new(1, "Groceries");
        list.todos.push(Todo::new(1, "Milk"));
        list.todos.push(Todo {
            id: 2,
            name: "Eggs".to_string(),
            completed: true,
        });
        list
    }

    #[test]
    fn test_lists_page_shows_names_and_counts() {
        let lists = vec![groceries()];
        let html = lists_page(&lists, None);

        assert!(html.contains("Groceries"));
        assert!(html.contains("/lists/1"));
        assert!(html.contains("1 / 2"));
    }

    #[test]
    fn test_names_are_escaped() {
        let lists = vec![TodoList::new(1, "<script>alert(1)</script>")];
        let html = lists_page(&lists, None);

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_complete_list_gets_complete_class() {
        let mut list = TodoList::new(1, "Done");
        list.todos.push(Todo {
            id: 1,
            name: "only".to_string(),
            completed: true,
        });
        let html = lists_page(&[list], None);
        assert!(html.contains("class=\"complete\""));
    }

    #[test]
    fn test_flash_banner_rendered() {
        let flash = Flash::Success("The list has been created.".to_string());
        let html = lists_page(&[], Some(&flash));

        assert!(html.contains("The list has been created."));
        assert!(html.contains("flash success"));
    }

    #[test]
    fn test_list_page_toggle_submits_opposite_value() {
        let html = list_page(&groceries(), None, "");

        // Open "Milk" offers completion, finished "Eggs" offers undo.
        assert!(html.contains("value=\"true\""));
        assert!(html.contains("value=\"false\""));
        assert!(html.contains("Undo"));
    }

    #[test]
    fn test_form_redisplay_preserves_input() {
        let html = new_list_page(None, "half-typed name");
        assert!(html.contains("value=\"half-typed name\""));

        let html = list_page(&groceries(), None, "half-typed todo");
        assert!(html.contains("value=\"half-typed todo\""));
    }
}
