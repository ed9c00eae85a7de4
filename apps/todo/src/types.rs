//! Domain types for the task list.
//!
//! A task list is an ordered sequence of tasks plus the draft text the user
//! is currently typing. Insertion order is display order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tasklist_macros::Action;
use uuid::Uuid;

/// Unique identifier for a task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a `TaskId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for TaskId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single to-do entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,
    /// Trimmed, non-empty text
    pub text: String,
    /// Whether the task is done
    pub completed: bool,
    /// When the task was added
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new, active task
    #[must_use]
    pub const fn new(id: TaskId, text: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            completed: false,
            created_at,
        }
    }

    /// Returns true if the task is not completed
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.completed
    }
}

/// Active, completed and total task counts
///
/// `active + completed == total` always holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TaskCounts {
    /// Tasks not yet completed
    pub active: usize,
    /// Completed tasks
    pub completed: usize,
    /// All tasks
    pub total: usize,
}

/// State of the task list
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    /// Tasks in insertion order
    pub(crate) tasks: Vec<Task>,
    /// Text typed but not yet submitted
    pub(crate) draft: String,
}

impl TaskList {
    /// Creates an empty task list
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tasks: Vec::new(),
            draft: String::new(),
        }
    }

    /// Returns the tasks in display order
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the current draft text
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Returns the number of tasks
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true if there are no tasks
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns a task by ID
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == *id)
    }

    /// Returns the index of a task by ID
    #[must_use]
    pub fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == *id)
    }

    /// Checks if a task exists
    #[must_use]
    pub fn exists(&self, id: &TaskId) -> bool {
        self.position(id).is_some()
    }

    /// Counts active, completed and total tasks in a single pass
    #[must_use]
    pub fn counts(&self) -> TaskCounts {
        let completed = self.tasks.iter().filter(|task| task.completed).count();
        TaskCounts {
            active: self.tasks.len() - completed,
            completed,
            total: self.tasks.len(),
        }
    }

    /// Returns true if at least one task is completed
    #[must_use]
    pub fn has_completed(&self) -> bool {
        self.tasks.iter().any(|task| task.completed)
    }

    /// Ids of all completed tasks, in display order
    #[must_use]
    pub fn completed_ids(&self) -> Vec<TaskId> {
        self.tasks
            .iter()
            .filter(|task| task.completed)
            .map(|task| task.id)
            .collect()
    }
}

/// Actions representing commands and events for the task list
///
/// Commands express what the user asked for and are checked by the reducer;
/// a command that would not change anything is ignored. Events record a
/// change that happened and can be replayed to rebuild a list.
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskAction {
    // ========== Commands ==========
    /// Command: Replace the draft with what the user typed
    #[command]
    UpdateDraft {
        /// Raw input text
        text: String,
    },

    /// Command: Submit the current draft as a new task
    #[command]
    Submit,

    /// Command: Add a task with the given text
    #[command]
    AddTask {
        /// Raw text; trimmed before use
        text: String,
    },

    /// Command: Flip a task between active and completed
    #[command]
    ToggleTask {
        /// Task to toggle
        id: TaskId,
    },

    /// Command: Remove a task
    #[command]
    DeleteTask {
        /// Task to remove
        id: TaskId,
    },

    /// Command: Remove every completed task
    #[command]
    ClearCompleted,

    // ========== Events ==========
    /// Event: Task was added
    #[event]
    TaskAdded {
        /// Task identifier
        id: TaskId,
        /// Trimmed text
        text: String,
        /// When the task was added
        created_at: DateTime<Utc>,
    },

    /// Event: Task completion flag changed
    #[event]
    TaskToggled {
        /// Task identifier
        id: TaskId,
        /// The new value of the flag
        completed: bool,
    },

    /// Event: Task was removed
    #[event]
    TaskDeleted {
        /// Task identifier
        id: TaskId,
    },

    /// Event: Completed tasks were removed
    #[event]
    CompletedCleared {
        /// Ids that were removed, in display order
        ids: Vec<TaskId>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(n: u128, text: &str, completed: bool) -> Task {
        let mut task = Task::new(
            TaskId::from_uuid(Uuid::from_u128(n)),
            text.to_string(),
            Utc::now(),
        );
        task.completed = completed;
        task
    }

    #[test]
    fn task_new_is_active() {
        let task = task(1, "Buy milk", false);
        assert!(task.is_active());
        assert_eq!(task.text, "Buy milk");
    }

    #[test]
    fn empty_list_counts() {
        let list = TaskList::new();
        assert!(list.is_empty());
        assert_eq!(list.counts(), TaskCounts::default());
        assert!(!list.has_completed());
    }

    #[test]
    fn counts_split_active_and_completed() {
        let list = TaskList {
            tasks: vec![task(1, "a", true), task(2, "b", false), task(3, "c", true)],
            draft: String::new(),
        };

        assert_eq!(
            list.counts(),
            TaskCounts {
                active: 1,
                completed: 2,
                total: 3,
            }
        );
        assert!(list.has_completed());
        assert_eq!(
            list.completed_ids(),
            vec![
                TaskId::from_uuid(Uuid::from_u128(1)),
                TaskId::from_uuid(Uuid::from_u128(3)),
            ]
        );
    }

    #[test]
    fn lookup_by_id() {
        let list = TaskList {
            tasks: vec![task(1, "a", false), task(2, "b", false)],
            draft: String::new(),
        };
        let id = TaskId::from_uuid(Uuid::from_u128(2));
        let missing = TaskId::from_uuid(Uuid::from_u128(9));

        assert_eq!(list.position(&id), Some(1));
        assert_eq!(list.get(&id).map(|t| t.text.as_str()), Some("b"));
        assert!(list.exists(&id));
        assert!(!list.exists(&missing));
        assert_eq!(list.get(&missing), None);
    }

    #[test]
    fn task_id_serializes_as_plain_uuid() {
        let id = TaskId::from_uuid(Uuid::from_u128(1));
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000001\"");
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000001");
    }

    #[test]
    fn task_action_classification() {
        let add = TaskAction::AddTask {
            text: "Test".to_string(),
        };
        assert!(add.is_command());
        assert!(!add.is_event());

        let cleared = TaskAction::CompletedCleared { ids: Vec::new() };
        assert!(cleared.is_event());
        assert_eq!(cleared.event_type(), Some("CompletedCleared.v1"));
        assert_eq!(TaskAction::Submit.name(), "Submit");
    }
}
