use crate::domain::Crossing;
use crate::domain::events::Event;
use std::io;
use std::str::FromStr;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::Sender;
use tokio::sync::mpsc::error::SendError;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::LinesStream;
use tracing::{info, instrument, warn};

const HELP: [(&str, &str); 7] = [
    ("start", "start tracking the trackee"),
    ("stop", "stop tracking"),
    ("status", "show the trackee position"),
    ("test-exit", "fire a test exit alert (debug, no geofence check)"),
    ("test-entry", "fire a test entry alert (debug, no geofence check)"),
    ("help", "show this list"),
    ("quit", "stop tracking and exit"),
];

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ConsoleCommand {
    Start,
    Stop,
    Status,
    TestExit,
    TestEntry,
    Help,
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "start" => Ok(ConsoleCommand::Start),
            "stop" => Ok(ConsoleCommand::Stop),
            "status" => Ok(ConsoleCommand::Status),
            "test-exit" => Ok(ConsoleCommand::TestExit),
            "test-entry" => Ok(ConsoleCommand::TestEntry),
            "help" | "?" => Ok(ConsoleCommand::Help),
            "quit" | "exit" => Ok(ConsoleCommand::Quit),
            _ => Err(ConsoleError::UnknownCommand(s.trim().to_string())),
        }
    }
}

impl ConsoleCommand {
    fn event(self) -> Option<Event> {
        match self {
            ConsoleCommand::Start => Some(Event::StartTracking),
            ConsoleCommand::Stop => Some(Event::StopTracking),
            ConsoleCommand::Status => Some(Event::Status),
            ConsoleCommand::TestExit => Some(Event::TestAlert(Crossing::Exit)),
            ConsoleCommand::TestEntry => Some(Event::TestAlert(Crossing::Entry)),
            ConsoleCommand::Help => None,
            ConsoleCommand::Quit => Some(Event::Shutdown),
        }
    }
}

/// Turns console lines into tracker events until `quit` or end of input.
#[instrument(skip_all)]
pub async fn listen<R>(reader: R, tx: Sender<Event>) -> Result<(), ConsoleError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = LinesStream::new(reader.lines());
    print_help();

    while let Some(line) = lines.next().await {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<ConsoleCommand>() {
            Ok(ConsoleCommand::Help) => print_help(),
            Ok(command) => {
                if let Some(event) = command.event() {
                    tx.send(event).await?;
                }
                if command == ConsoleCommand::Quit {
                    return Ok(());
                }
            }
            Err(e) => warn!("⚠️ {}, type 'help' for the list of commands", e),
        }
    }

    info!("⌨️ End of input, shutting down");
    tx.send(Event::Shutdown).await?;
    Ok(())
}

fn print_help() {
    info!("⌨️ Commands:");
    for (command, description) in HELP {
        info!("⌨️   {:<10} {}", command, description);
    }
}

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("cannot read from the console: {0}")]
    Io(#[from] io::Error),
    #[error("tracker stopped accepting events")]
    Send(#[from] SendError<Event>),
}
