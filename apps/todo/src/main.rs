//! Terminal front end for the to-do list.
//!
//! Reads one command per line from stdin and prints the re-rendered list
//! after every change. Logs go to stderr.

use anyhow::Context;
use std::io::{self, BufRead, Write};
use todo::TaskEnvironment;
use todo::cli::{self, Command, Reply, Session};
use todo::config::Config;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.log_filter))
                .context("Invalid log filter")?,
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    tracing::info!(
        max_dispatch_depth = config.store.max_dispatch_depth,
        "Starting todo session"
    );

    let mut session = Session::new(TaskEnvironment::live(), config.store);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    writeln!(stdout, "=== Todo App ===  (type `help` for commands)")?;
    write!(stdout, "{}", session.state(cli::render))?;

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read input")?;

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(cli::ParseError::Empty) => continue,
            Err(error) => {
                writeln!(stdout, "{error}")?;
                continue;
            }
        };

        match session.execute(command) {
            Ok(Reply::Print(text)) => {
                write!(stdout, "{text}")?;
                if !text.ends_with('\n') {
                    writeln!(stdout)?;
                }
            }
            Ok(Reply::Quit) => break,
            Err(error) => {
                tracing::error!(%error, "Command failed");
                writeln!(stdout, "Error: {error}")?;
            }
        }
        stdout.flush()?;
    }

    let counts = session.state(todo::TaskList::counts);
    tracing::info!(
        active = counts.active,
        completed = counts.completed,
        total = counts.total,
        "Session ended"
    );
    Ok(())
}
