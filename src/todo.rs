// Todo record and its creation defaults

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Priority stored when a todo is added without one
pub const DEFAULT_PRIORITY: &str = "medium";

/// A single task in the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub text: String,
    pub done: bool,
    /// Local time of day the todo was added, `HH:MM`
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub priority: String,
}

/// Map a missing or empty priority to [`DEFAULT_PRIORITY`]
pub fn normalize_priority(priority: Option<&str>) -> String {
    match priority {
        Some(p) if !p.is_empty() => p.to_string(),
        _ => DEFAULT_PRIORITY.to_string(),
    }
}

/// Format a creation stamp the way it is stored (`HH:MM`)
pub fn created_at_stamp(now: DateTime<Local>) -> String {
    now.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_normalize_priority() {
        assert_eq!(normalize_priority(None), "medium");
        assert_eq!(normalize_priority(Some("")), "medium");
        assert_eq!(normalize_priority(Some("high")), "high");
        // Open-ended set, kept verbatim
        assert_eq!(normalize_priority(Some("someday")), "someday");
    }

    #[test]
    fn test_created_at_stamp() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 42).unwrap();
        assert_eq!(created_at_stamp(now), "07:05");
    }

    #[test]
    fn test_todo_serialization() {
        let todo = Todo {
            id: 7,
            text: "buy milk".to_string(),
            done: false,
            created_at: "09:30".to_string(),
            priority: "medium".to_string(),
        };

        let json = serde_json::to_string(&todo).unwrap();
        assert_eq!(
            json,
            r#"{"id":7,"text":"buy milk","done":false,"createdAt":"09:30","priority":"medium"}"#
        );

        let deserialized: Todo = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, todo);
    }
}
