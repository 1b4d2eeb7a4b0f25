//! Line-oriented terminal front end
//!
//! Reads commands from stdin, forwards them to the session controller and
//! prints whatever changed in each published snapshot. No session logic
//! lives here.

mod render;

pub use render::{patient_summary, ConsoleView};

use crate::runtime::{ControllerError, SessionHandle, SessionSnapshot};
use crate::state_machine::SessionStatus;
use tokio::io::{AsyncBufReadExt, BufReader};

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Reset,
    Summary,
    Help,
    Quit,
    Say(String),
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if !trimmed.starts_with('/') {
            return Command::Say(line.to_string());
        }
        match trimmed {
            "/start" => Command::Start,
            "/reset" | "/new" => Command::Reset,
            "/summary" => Command::Summary,
            "/help" => Command::Help,
            "/quit" | "/exit" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

/// Local feedback for input the controller would silently drop
fn send_hint(snapshot: &SessionSnapshot, text: &str) -> Option<&'static str> {
    if text.trim().is_empty() {
        return None;
    }
    if snapshot.pending {
        return Some("Still waiting for the assistant...");
    }
    match snapshot.status {
        SessionStatus::Idle => Some("Type /start to begin."),
        SessionStatus::Complete => Some("This conversation is complete. Type /reset to start over."),
        SessionStatus::Active => None,
    }
}

/// Drive the session from stdin until EOF or `/quit`
pub async fn run(handle: SessionHandle) -> Result<(), ControllerError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut updates = handle.subscribe();
    let mut view = ConsoleView::new();

    println!("{}", render::WELCOME);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read input");
                        break;
                    }
                };
                match Command::parse(&line) {
                    Command::Start => handle.start().await?,
                    Command::Reset => handle.reset().await?,
                    Command::Summary => print!("{}", patient_summary(&handle.snapshot().patient_state)),
                    Command::Help => println!("{}", render::HELP),
                    Command::Quit => break,
                    Command::Unknown(name) => println!("Unknown command {name}. Type /help for commands."),
                    Command::Say(text) => {
                        if let Some(hint) = send_hint(&handle.snapshot(), &text) {
                            println!("{hint}");
                        }
                        handle.send(text).await?;
                    }
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    return Err(ControllerError::Closed);
                }
                let snapshot = updates.borrow_and_update().clone();
                print!("{}", view.update(&snapshot));
            }
        }
    }

    Ok(())
}
