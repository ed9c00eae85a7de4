//! In-memory to-do list built on the tasklist reducer architecture.
//!
//! Users add, complete and delete short text tasks and see live counts of
//! active, completed and total items. Nothing is persisted: the list lives
//! as long as the store that owns it.
//!
//! - [`types`]: tasks, the list state and the action enum
//! - [`reducer`]: the rules for every action
//! - [`cli`]: a terminal front end driving a [`Store`](tasklist_runtime::Store)
//! - [`config`]: environment-based settings for the binary
//!
//! # Quick Start
//!
//! ```
//! use todo::{TaskAction, TaskEnvironment, TaskList, TaskReducer};
//! use tasklist_runtime::Store;
//!
//! # fn main() -> Result<(), tasklist_runtime::StoreError> {
//! let mut store = Store::new(TaskList::new(), TaskReducer::new(), TaskEnvironment::live());
//!
//! store.send(TaskAction::UpdateDraft { text: "  Buy milk ".to_string() })?;
//! store.send(TaskAction::Submit)?;
//!
//! let id = store.state(|s| s.tasks()[0].id);
//! store.send(TaskAction::ToggleTask { id })?;
//!
//! let counts = store.state(TaskList::counts);
//! assert_eq!((counts.active, counts.completed, counts.total), (0, 1, 1));
//! assert_eq!(store.state(|s| s.tasks()[0].text.clone()), "Buy milk");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod reducer;
pub mod types;

// Re-export commonly used types
pub use reducer::{TaskEnvironment, TaskReducer};
pub use types::{Task, TaskAction, TaskCounts, TaskId, TaskList};
