// View filtering over a listed snapshot

use crate::todo::Todo;
use eyre::{Result, eyre};
use serde::Serialize;
use std::str::FromStr;

/// Which todos a view shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TodoFilter {
    #[default]
    All,
    Active, // done == false
    Done,   // done == true
}

impl TodoFilter {
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            TodoFilter::All => true,
            TodoFilter::Active => !todo.done,
            TodoFilter::Done => todo.done,
        }
    }

    /// Keep matching todos, preserving order
    pub fn apply(self, todos: Vec<Todo>) -> Vec<Todo> {
        todos.into_iter().filter(|t| self.matches(t)).collect()
    }
}

impl FromStr for TodoFilter {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(TodoFilter::All),
            "active" => Ok(TodoFilter::Active),
            "done" => Ok(TodoFilter::Done),
            other => Err(eyre!("Unknown filter: {} (expected all, active or done)", other)),
        }
    }
}

impl std::fmt::Display for TodoFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TodoFilter::All => write!(f, "all"),
            TodoFilter::Active => write!(f, "active"),
            TodoFilter::Done => write!(f, "done"),
        }
    }
}

/// Counts shown alongside the list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub active: usize,
    pub done: usize,
}

impl Stats {
    pub fn from_todos(todos: &[Todo]) -> Self {
        let done = todos.iter().filter(|t| t.done).count();
        Self {
            total: todos.len(),
            active: todos.len() - done,
            done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: i64, done: bool) -> Todo {
        Todo {
            id,
            text: format!("todo {}", id),
            done,
            created_at: "12:00".to_string(),
            priority: "medium".to_string(),
        }
    }

    #[test]
    fn test_filter_apply_preserves_order() {
        let todos = vec![todo(4, false), todo(3, true), todo(2, false), todo(1, true)];

        let active: Vec<i64> = TodoFilter::Active.apply(todos.clone()).iter().map(|t| t.id).collect();
        assert_eq!(active, vec![4, 2]);

        let done: Vec<i64> = TodoFilter::Done.apply(todos.clone()).iter().map(|t| t.id).collect();
        assert_eq!(done, vec![3, 1]);

        assert_eq!(TodoFilter::All.apply(todos).len(), 4);
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!("all".parse::<TodoFilter>().unwrap(), TodoFilter::All);
        assert_eq!("Active".parse::<TodoFilter>().unwrap(), TodoFilter::Active);
        assert_eq!("DONE".parse::<TodoFilter>().unwrap(), TodoFilter::Done);
        assert!("pending".parse::<TodoFilter>().is_err());
    }

    #[test]
    fn test_filter_display() {
        assert_eq!(TodoFilter::All.to_string(), "all");
        assert_eq!(TodoFilter::Active.to_string(), "active");
        assert_eq!(TodoFilter::default(), TodoFilter::All);
    }

    #[test]
    fn test_stats_from_todos() {
        let stats = Stats::from_todos(&[todo(3, true), todo(2, false), todo(1, false)]);
        assert_eq!(stats, Stats { total: 3, active: 2, done: 1 });

        assert_eq!(Stats::from_todos(&[]), Stats::default());
    }
}
