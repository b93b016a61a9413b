// TodoStore - Local to-do list persisted in SQLite

pub mod export;
pub mod filter;
pub mod store;
pub mod todo;

// Re-export main types for convenience
pub use filter::{Stats, TodoFilter};
pub use store::Store;
pub use todo::{DEFAULT_PRIORITY, Todo};
