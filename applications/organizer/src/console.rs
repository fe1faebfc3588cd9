//! Interactive console for one open event.

use std::fmt::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use vibe_core::{LifecycleState, RequestId};
use vibe_session::{EventSession, EventView, SessionError};

/// One line of organizer input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Accept the Nth queued request (1-based)
    Accept(usize),
    /// Reject the Nth queued request (1-based)
    Reject(usize),
    /// Play the Nth playlist entry (1-based)
    Play(usize),
    /// Re-render the buckets
    Show,
    /// Close the session and leave
    Quit,
}

/// Parse one input line. Unknown input yields None.
pub fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let verb = words.next()?;
    let index = words.next().and_then(|w| w.parse::<usize>().ok());
    if words.next().is_some() {
        return None;
    }

    match (verb, index) {
        ("accept" | "a", Some(n)) if n > 0 => Some(Command::Accept(n)),
        ("reject" | "r", Some(n)) if n > 0 => Some(Command::Reject(n)),
        ("play" | "p", Some(n)) if n > 0 => Some(Command::Play(n)),
        ("show" | "s", None) => Some(Command::Show),
        ("quit" | "q", None) => Some(Command::Quit),
        _ => None,
    }
}

/// The id of the Nth queued request (1-based), if it exists.
pub fn queue_id_at(view: &EventView, n: usize) -> Option<RequestId> {
    view.queue().nth(n - 1).map(|r| r.id.clone())
}

/// The id of the Nth playlist entry (1-based), if it exists.
pub fn playlist_id_at(view: &EventView, n: usize) -> Option<RequestId> {
    view.playlist().nth(n - 1).map(|r| r.id.clone())
}

/// Render the three buckets and the running total.
pub fn render(view: &EventView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} (total: {:.2}) ==", view.title, view.total_amount);

    let _ = writeln!(out, "Queue:");
    if view.queue_len() == 0 {
        let _ = writeln!(out, "  (empty)");
    }
    for (n, request) in view.queue().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} - {} ({} likes)",
            n + 1,
            request.title,
            request.artist,
            request.likes
        );
    }

    let _ = writeln!(out, "Playlist:");
    if view.playlist_len() == 0 {
        let _ = writeln!(out, "  (empty)");
    }
    for (n, request) in view.playlist().enumerate() {
        let marker = if request.state == LifecycleState::Playing {
            " [playing]"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "  {}. {} - {}{marker}",
            n + 1,
            request.title,
            request.artist
        );
    }

    let _ = writeln!(out, "History:");
    if view.history_len() == 0 {
        let _ = writeln!(out, "  (empty)");
    }
    for request in view.history() {
        let outcome = match request.state {
            LifecycleState::Finished => "finished",
            _ => "rejected",
        };
        let _ = writeln!(out, "  {} - {} ({outcome})", request.title, request.artist);
    }

    out
}

/// Drive the session from stdin until the organizer quits.
///
/// Hub pushes are folded into the queue before every render, so new
/// requests show up between commands without any extra input.
pub async fn run(mut session: EventSession) -> anyhow::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    session.drain_incoming();
    println!("{}", render(session.view()));
    println!("Commands: accept N, reject N, play N, show, quit");

    while let Some(line) = lines.next_line().await? {
        let Some(command) = parse_command(&line) else {
            println!("Unrecognized command: {line}");
            continue;
        };

        let outcome = match command {
            Command::Accept(n) => match queue_id_at(session.view(), n) {
                Some(id) => session.accept(&id).await,
                None => {
                    println!("No queued request #{n}");
                    continue;
                }
            },
            Command::Reject(n) => match queue_id_at(session.view(), n) {
                Some(id) => session.reject(&id).await,
                None => {
                    println!("No queued request #{n}");
                    continue;
                }
            },
            Command::Play(n) => match playlist_id_at(session.view(), n) {
                Some(id) => {
                    println!("Playing #{n}...");
                    session.play_through(&id).await
                }
                None => {
                    println!("No playlist entry #{n}");
                    continue;
                }
            },
            Command::Show => Ok(()),
            Command::Quit => break,
        };

        if let Err(error) = outcome {
            match &error {
                SessionError::Stale(message) => println!("Skipped: {message}"),
                other => {
                    warn!(error = %other, "Command failed");
                    println!("Failed: {other}");
                }
            }
        }

        session.drain_incoming();
        println!("{}", render(session.view()));
    }

    session.close().await;
    Ok(())
}
