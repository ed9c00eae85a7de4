//! Reducer logic for the task list.
//!
//! Commands are checked against the current list. A command that would not
//! change anything (blank text, unknown id, nothing completed) is ignored
//! without an error. Otherwise the reducer builds the matching event and
//! applies it.

use crate::types::{Task, TaskAction, TaskId, TaskList};
use std::collections::HashSet;
use std::sync::Arc;
use tasklist_core::{
    SmallVec,
    effect::Effect,
    environment::{Clock, IdGenerator, SystemClock, UuidGenerator},
    reducer::Reducer,
    smallvec,
};

/// Environment dependencies for the task list reducer
#[derive(Clone)]
pub struct TaskEnvironment {
    /// Clock for creation timestamps
    pub clock: Arc<dyn Clock>,
    /// Source of fresh task ids
    pub ids: Arc<dyn IdGenerator>,
}

impl TaskEnvironment {
    /// Creates a new `TaskEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// System clock and random v4 ids
    #[must_use]
    pub fn live() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidGenerator))
    }
}

impl std::fmt::Debug for TaskEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskEnvironment").finish_non_exhaustive()
    }
}

/// Reducer for the task list
#[derive(Clone, Copy, Debug, Default)]
pub struct TaskReducer;

impl TaskReducer {
    /// Creates a new `TaskReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Applies an event to state
    fn apply_event(state: &mut TaskList, action: &TaskAction) {
        match action {
            TaskAction::TaskAdded {
                id,
                text,
                created_at,
            } => {
                if state.exists(id) {
                    tracing::warn!(%id, "Ignoring TaskAdded for an id already in the list");
                    return;
                }
                if text.trim().is_empty() || text.trim() != text.as_str() {
                    tracing::warn!(%id, text = %text, "Ignoring TaskAdded with blank or untrimmed text");
                    return;
                }
                state.tasks.push(Task::new(*id, text.clone(), *created_at));
            }
            TaskAction::TaskToggled { id, completed } => {
                if let Some(task) = state.tasks.iter_mut().find(|task| task.id == *id) {
                    task.completed = *completed;
                }
            }
            TaskAction::TaskDeleted { id } => {
                state.tasks.retain(|task| task.id != *id);
            }
            TaskAction::CompletedCleared { ids } => {
                let ids: HashSet<&TaskId> = ids.iter().collect();
                state.tasks.retain(|task| !ids.contains(&task.id));
            }
            // Commands are not applied to state
            TaskAction::UpdateDraft { .. }
            | TaskAction::Submit
            | TaskAction::AddTask { .. }
            | TaskAction::ToggleTask { .. }
            | TaskAction::DeleteTask { .. }
            | TaskAction::ClearCompleted => {}
        }
    }

    /// Builds and applies `event`
    fn commit(state: &mut TaskList, event: &TaskAction) {
        tracing::debug!(event = event.name(), "Applying event");
        Self::apply_event(state, event);
    }

    fn ignored(command: &str, reason: &str) -> SmallVec<[Effect<TaskAction>; 4]> {
        tracing::debug!(command, reason, "Command ignored");
        SmallVec::new()
    }
}

impl Reducer for TaskReducer {
    type State = TaskList;
    type Action = TaskAction;
    type Environment = TaskEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            TaskAction::UpdateDraft { text } => {
                state.draft = text;
                SmallVec::new()
            }

            TaskAction::Submit => {
                smallvec![Effect::dispatch(TaskAction::AddTask {
                    text: state.draft.clone(),
                })]
            }

            TaskAction::AddTask { text } => {
                let text = text.trim();
                if text.is_empty() {
                    return Self::ignored("AddTask", "blank text");
                }

                let event = TaskAction::TaskAdded {
                    id: TaskId::from_uuid(env.ids.next_id()),
                    text: text.to_string(),
                    created_at: env.clock.now(),
                };
                Self::commit(state, &event);
                state.draft.clear();
                SmallVec::new()
            }

            TaskAction::ToggleTask { id } => {
                let Some(task) = state.get(&id) else {
                    return Self::ignored("ToggleTask", "unknown id");
                };

                let event = TaskAction::TaskToggled {
                    id,
                    completed: !task.completed,
                };
                Self::commit(state, &event);
                SmallVec::new()
            }

            TaskAction::DeleteTask { id } => {
                if !state.exists(&id) {
                    return Self::ignored("DeleteTask", "unknown id");
                }

                Self::commit(state, &TaskAction::TaskDeleted { id });
                SmallVec::new()
            }

            TaskAction::ClearCompleted => {
                let ids = state.completed_ids();
                if ids.is_empty() {
                    return Self::ignored("ClearCompleted", "nothing completed");
                }

                Self::commit(state, &TaskAction::CompletedCleared { ids });
                SmallVec::new()
            }

            // ========== Events ==========
            TaskAction::TaskAdded { .. }
            | TaskAction::TaskToggled { .. }
            | TaskAction::TaskDeleted { .. }
            | TaskAction::CompletedCleared { .. } => {
                // Replayed from a recorded stream
                Self::apply_event(state, &action);
                SmallVec::new()
            }
        }
    }
}
