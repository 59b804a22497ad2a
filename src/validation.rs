//! Input validation for list and todo names
//!
//! Names are validated after trimming; length is counted in characters,
//! not bytes. List names must additionally be unique (case-sensitive)
//! within the session's collection.

use std::fmt;

use crate::model::TodoList;

/// Inclusive bounds on list and todo name length, in characters.
pub const MIN_NAME_LEN: usize = 1;
pub const MAX_NAME_LEN: usize = 100;

/// Why a submitted name was rejected.
///
/// `Display` renders the predicate without a subject ("must be ...") so
/// handlers can prefix "List name" or "Todo" to match the form copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// Trimmed length outside `MIN_NAME_LEN..=MAX_NAME_LEN`.
    InvalidLength { len: usize },
    /// Another list in the session already has this exact name.
    Duplicate(String),
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { .. } => write!(
                f,
                "must be between {MIN_NAME_LEN} and {MAX_NAME_LEN} characters"
            ),
            Self::Duplicate(_) => write!(f, "must be unique"),
        }
    }
}

impl std::error::Error for NameError {}

fn validate_length(name: &str) -> Result<(), NameError> {
    let len = name.chars().count();
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        return Err(NameError::InvalidLength { len });
    }
    Ok(())
}

/// Validate a list name against the session's existing lists.
///
/// Rename goes through the same check, so renaming a list to any existing
/// name (including its own current one) is rejected as a duplicate.
pub fn validate_list_name(name: &str, existing: &[TodoList]) -> Result<(), NameError> {
    validate_length(name)?;

    if existing.iter().any(|list| list.name == name) {
        return Err(NameError::Duplicate(name.to_string()));
    }

    Ok(())
}

/// Validate a todo name. Only the length rule applies; duplicate todos
/// within a list are allowed.
pub fn validate_todo_name(name: &str) -> Result<(), NameError> {
    validate_length(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(id: u64, name: &str) -> TodoList {
        TodoList::new(id, name)
    }

    #[test]
    fn test_valid_list_names() {
        assert!(validate_list_name("Groceries", &[]).is_ok());
        assert!(validate_list_name("a", &[]).is_ok()); // 1 char is the minimum
        assert!(validate_list_name(&"x".repeat(100), &[]).is_ok());
    }

    #[test]
    fn test_list_name_length_bounds() {
        assert_eq!(
            validate_list_name("", &[]),
            Err(NameError::InvalidLength { len: 0 })
        );
        assert_eq!(
            validate_list_name(&"x".repeat(101), &[]),
            Err(NameError::InvalidLength { len: 101 })
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 100 multibyte characters is 400 bytes but still a valid name.
        let name = "\u{1F4DD}".repeat(100);
        assert!(validate_list_name(&name, &[]).is_ok());
    }

    #[test]
    fn test_duplicate_list_name_rejected() {
        let existing = vec![list(1, "Groceries")];
        assert_eq!(
            validate_list_name("Groceries", &existing),
            Err(NameError::Duplicate("Groceries".to_string()))
        );
    }

    #[test]
    fn test_duplicate_check_is_case_sensitive() {
        let existing = vec![list(1, "groceries")];
        assert!(validate_list_name("Groceries", &existing).is_ok());
    }

    #[test]
    fn test_todo_name_has_no_uniqueness_rule() {
        assert!(validate_todo_name("Milk").is_ok());
        assert!(validate_todo_name("").is_err());
        assert!(validate_todo_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = validate_list_name("", &[]).unwrap_err();
        assert_eq!(err.to_string(), "must be between 1 and 100 characters");

        let existing = vec![list(1, "Chores")];
        let err = validate_list_name("Chores", &existing).unwrap_err();
        assert_eq!(err.to_string(), "must be unique");
    }
}
