//! Core records and list helpers
//!
//! `TodoList` and `Todo` are plain owned records; there is no hidden state.
//! Id allocation and the incomplete-first display ordering live here as
//! pure functions so they can be tested without a running server.

use serde::{Deserialize, Serialize};

/// A single to-do item, owned by exactly one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique within the parent list, never reused below the running max.
    pub id: u64,
    pub name: String,
    pub completed: bool,
}

impl Todo {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            completed: false,
        }
    }
}

/// A named, ordered collection of todos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    /// Unique within the session's collection.
    pub id: u64,
    pub name: String,
    pub todos: Vec<Todo>,
}

impl TodoList {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            todos: Vec::new(),
        }
    }

    /// A list is complete when it has at least one todo and none remain open.
    pub fn is_complete(&self) -> bool {
        !self.todos.is_empty() && self.todos_remaining() == 0
    }

    pub fn todos_count(&self) -> usize {
        self.todos.len()
    }

    pub fn todos_remaining(&self) -> usize {
        self.todos.iter().filter(|t| !t.completed).count()
    }

    pub fn find_todo(&self, id: u64) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn find_todo_mut(&mut self, id: u64) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|t| t.id == id)
    }
}

/// Next id for a collection: 1 + the running max, or 1 when empty.
///
/// Deleting the highest-id entry makes its id available again; ids below
/// the running max are never reused. A single writer per session makes
/// this safe without coordination.
pub fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().unwrap_or(0) + 1
}

/// Display ordering: incomplete entries first (original order), then
/// complete entries (original order), each paired with its index in the
/// unsorted collection so forms can still address it stably.
pub fn sorted_for_display<T>(
    items: &[T],
    is_complete: impl Fn(&T) -> bool,
) -> Vec<(usize, &T)> {
    let (complete, incomplete): (Vec<_>, Vec<_>) = items
        .iter()
        .enumerate()
        .partition(|(_, item)| is_complete(item));

    incomplete.into_iter().chain(complete).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: u64, name: &str, completed: bool) -> Todo {
        Todo {
            id,
            name: name.to_string(),
            completed,
        }
    }

    #[test]
    fn test_next_id_empty() {
        assert_eq!(next_id(std::iter::empty()), 1);
    }

    #[test]
    fn test_next_id_is_max_plus_one() {
        assert_eq!(next_id([1, 2, 3].into_iter()), 4);
        // Gaps below the max are not reused
        assert_eq!(next_id([1, 5].into_iter()), 6);
    }

    #[test]
    fn test_sorted_for_display_incomplete_first() {
        let todos = vec![
            todo(1, "walk dog", false),
            todo(2, "pay rent", true),
            todo(3, "buy milk", false),
        ];

        let sorted = sorted_for_display(&todos, |t| t.completed);
        let order: Vec<(usize, u64)> = sorted.iter().map(|(i, t)| (*i, t.id)).collect();

        // Two incomplete in original order, then the complete one,
        // each with its original index.
        assert_eq!(order, vec![(0, 1), (2, 3), (1, 2)]);
    }

    #[test]
    fn test_sorted_for_display_preserves_original_order_within_groups() {
        let todos = vec![
            todo(1, "a", true),
            todo(2, "b", true),
            todo(3, "c", false),
            todo(4, "d", false),
        ];

        let sorted = sorted_for_display(&todos, |t| t.completed);
        let ids: Vec<u64> = sorted.iter().map(|(_, t)| t.id).collect();
        assert_eq!(ids, vec![3, 4, 1, 2]);
    }

    #[test]
    fn test_empty_list_is_not_complete() {
        let list = TodoList::new(1, "empty");
        assert!(!list.is_complete());
    }

    #[test]
    fn test_list_completion_scenario() {
        // Create "Groceries", add "Milk" and "Eggs", complete them one by one.
        let mut list = TodoList::new(1, "Groceries");
        let id = next_id(list.todos.iter().map(|t| t.id));
        list.todos.push(Todo::new(id, "Milk"));
        let id = next_id(list.todos.iter().map(|t| t.id));
        list.todos.push(Todo::new(id, "Eggs"));

        assert_eq!(list.todos_count(), 2);
        assert_eq!(list.todos_remaining(), 2);

        list.find_todo_mut(1).unwrap().completed = true;
        assert!(!list.is_complete(), "Eggs remains open");

        list.find_todo_mut(2).unwrap().completed = true;
        assert!(list.is_complete());
    }
}
