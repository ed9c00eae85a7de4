//! Line-oriented terminal front end.
//!
//! Each input line is parsed into a [`Command`], run against the store by a
//! [`Session`], and answered with a [`Reply`] for the binary to print.
//! Tasks are addressed by their 1-based position in the rendered list.

use crate::reducer::{TaskEnvironment, TaskReducer};
use crate::types::{TaskAction, TaskList};
use tasklist_runtime::{Store, StoreConfig, StoreError};
use thiserror::Error;

/// Store specialized for the task list
pub type TaskStore = Store<TaskList, TaskAction, TaskEnvironment, TaskReducer>;

/// Message shown for an empty list
pub const EMPTY_MESSAGE: &str = "No todos yet. Add one above!";

/// Usage text for `help`
pub const HELP: &str = "\
Commands:
  add <text>     add a task
  toggle <n>     mark task n completed / active
  delete <n>     delete task n
  clear          delete all completed tasks
  list           show the list
  json           print the list as JSON
  help           show this help
  quit           leave (also: exit, end of input)";

/// A parsed input line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Type `text` into the draft and submit it
    Add(String),
    /// Toggle the task at a 1-based position
    Toggle(usize),
    /// Delete the task at a 1-based position
    Delete(usize),
    /// Clear completed tasks
    Clear,
    /// Render the list
    List,
    /// Print the list as JSON
    Json,
    /// Show usage
    Help,
    /// End the session
    Quit,
}

/// Input that could not be parsed
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing but whitespace
    #[error("Empty input")]
    Empty,
    /// First word is not a command
    #[error("Unknown command: {0} (try `help`)")]
    UnknownCommand(String),
    /// `toggle` / `delete` without a usable position
    #[error("`{command}` needs a task number, got {given:?}")]
    BadPosition {
        /// Command word
        command: &'static str,
        /// What followed it
        given: String,
    },
}

impl std::str::FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ParseError::Empty);
        }

        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        match word.to_ascii_lowercase().as_str() {
            "add" => Ok(Self::Add(rest.to_string())),
            "toggle" => parse_position("toggle", rest).map(Self::Toggle),
            "delete" | "rm" => parse_position("delete", rest).map(Self::Delete),
            "clear" => Ok(Self::Clear),
            "list" | "ls" => Ok(Self::List),
            "json" => Ok(Self::Json),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(ParseError::UnknownCommand(word.to_string())),
        }
    }
}

fn parse_position(command: &'static str, given: &str) -> Result<usize, ParseError> {
    given
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| ParseError::BadPosition {
            command,
            given: given.to_string(),
        })
}

/// Errors surfaced while running a command
#[derive(Debug, Error)]
pub enum SessionError {
    /// The store refused to finish processing
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The list could not be serialized
    #[error("Failed to serialize task list: {0}")]
    Json(#[from] serde_json::Error),
}

/// What the front end should do after a command
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Print this text and keep going
    Print(String),
    /// End the session
    Quit,
}

/// Renders the stats line, the tasks and the clear hint
#[must_use]
pub fn render(list: &TaskList) -> String {
    let counts = list.counts();
    let mut out = format!(
        "{} active · {} completed · {} total\n",
        counts.active, counts.completed, counts.total
    );

    if list.is_empty() {
        out.push_str(EMPTY_MESSAGE);
        out.push('\n');
        return out;
    }

    for (index, task) in list.tasks().iter().enumerate() {
        let mark = if task.completed { 'x' } else { ' ' };
        out.push_str(&format!("{:>3}. [{mark}] {}\n", index + 1, task.text));
    }

    if counts.completed > 0 {
        out.push_str(&format!("Clear Completed ({}) with `clear`\n", counts.completed));
    }

    out
}

/// One interactive session: a store plus command handling
pub struct Session {
    store: TaskStore,
}

impl Session {
    /// Starts a session with an empty list
    #[must_use]
    pub fn new(env: TaskEnvironment, config: StoreConfig) -> Self {
        Self {
            store: Store::with_config(TaskList::new(), TaskReducer::new(), env, config),
        }
    }

    /// Read access to the current list
    pub fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&TaskList) -> T,
    {
        self.store.state(f)
    }

    /// Runs one command
    ///
    /// Positions outside the list are ignored, like any other no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the store stops early or JSON output fails.
    pub fn execute(&mut self, command: Command) -> Result<Reply, SessionError> {
        match command {
            Command::Add(text) => {
                self.store.send(TaskAction::UpdateDraft { text })?;
                self.store.send(TaskAction::Submit)?;
            }
            Command::Toggle(position) => {
                if let Some(id) = self.id_at(position) {
                    self.store.send(TaskAction::ToggleTask { id })?;
                }
            }
            Command::Delete(position) => {
                if let Some(id) = self.id_at(position) {
                    self.store.send(TaskAction::DeleteTask { id })?;
                }
            }
            Command::Clear => {
                self.store.send(TaskAction::ClearCompleted)?;
            }
            Command::List => {}
            Command::Json => {
                let json = self.store.state(|s| serde_json::to_string_pretty(s.tasks()))?;
                return Ok(Reply::Print(json));
            }
            Command::Help => return Ok(Reply::Print(HELP.to_string())),
            Command::Quit => return Ok(Reply::Quit),
        }

        Ok(Reply::Print(self.store.state(render)))
    }

    fn id_at(&self, position: usize) -> Option<crate::types::TaskId> {
        let found = self.store.state(|s| {
            position
                .checked_sub(1)
                .and_then(|index| s.tasks().get(index))
                .map(|task| task.id)
        });
        if found.is_none() {
            tracing::debug!(position, "No task at position");
        }
        found
    }
}
