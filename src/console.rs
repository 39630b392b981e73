//! Line-oriented console that drives the report view and re-renders the
//! report whenever its state changes.

use crate::models::StatusFilter;
use crate::render;
use crate::report::{ReportCommand, ReportSnapshot};
use tokio::io::AsyncBufReadExt;
use tokio::sync::{mpsc, watch};

const HELP: &str = "\
Commands:
  search [term]             filter by name substring (no term clears it)
  status all|pending|done   filter by report status
  toggle <id>               flip a record between PENDING and DONE
  refresh                   re-fetch with the current filters
  help                      show this help
  quit                      exit";

/// What one line of user input asks the console to do.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleAction {
    /// Forward a command to the report view.
    Dispatch(ReportCommand),
    Help,
    Quit,
    /// Blank input; nothing to do.
    Nothing,
    /// Unusable input, with the message to show.
    Unknown(String),
}

/// Parses one line of user input.
///
/// `search` with no argument clears the term; `status` accepts its value in
/// any case.
pub fn parse_line(line: &str) -> ConsoleAction {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ConsoleAction::Nothing;
    }
    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    };

    match command.to_ascii_lowercase().as_str() {
        "search" => ConsoleAction::Dispatch(ReportCommand::SetSearchTerm(rest.to_string())),
        "status" | "filter" => match rest.parse::<StatusFilter>() {
            Ok(filter) => ConsoleAction::Dispatch(ReportCommand::SetStatusFilter(filter)),
            Err(message) => ConsoleAction::Unknown(message),
        },
        "toggle" => {
            if rest.is_empty() {
                ConsoleAction::Unknown("toggle needs a record id".to_string())
            } else {
                ConsoleAction::Dispatch(ReportCommand::ToggleStatus(rest.to_string()))
            }
        }
        "refresh" => ConsoleAction::Dispatch(ReportCommand::Refresh),
        "help" => ConsoleAction::Help,
        "quit" | "exit" => ConsoleAction::Quit,
        other => ConsoleAction::Unknown(format!("unknown command: {}", other)),
    }
}

/// Runs the console until EOF or `quit`.
///
/// Dropping the command sender on return is what stops the view task.
pub async fn run(
    commands: mpsc::Sender<ReportCommand>,
    mut snapshots: watch::Receiver<ReportSnapshot>,
) -> anyhow::Result<()> {
    println!("{}", render::render_report(&snapshots.borrow_and_update()));
    println!("Type 'help' for commands.");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    // View task is gone; nothing left to drive.
                    break;
                }
                println!("{}", render::render_report(&snapshots.borrow_and_update()));
            }
            line = lines.next_line() => {
                let line = match line? {
                    Some(line) => line,
                    None => break, // stdin closed
                };
                match parse_line(&line) {
                    ConsoleAction::Dispatch(cmd) => {
                        if commands.send(cmd).await.is_err() {
                            break;
                        }
                    }
                    ConsoleAction::Help => println!("{}", HELP),
                    ConsoleAction::Quit => break,
                    ConsoleAction::Nothing => {}
                    ConsoleAction::Unknown(message) => {
                        println!("{}", message);
                        println!("Type 'help' for commands.");
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_keeps_the_whole_argument() {
        assert_eq!(
            parse_line("search ravi kumar"),
            ConsoleAction::Dispatch(ReportCommand::SetSearchTerm("ravi kumar".to_string()))
        );
    }

    #[test]
    fn bare_search_clears_the_term() {
        assert_eq!(
            parse_line("search"),
            ConsoleAction::Dispatch(ReportCommand::SetSearchTerm(String::new()))
        );
    }

    #[test]
    fn status_parses_any_case() {
        assert_eq!(
            parse_line("status pending"),
            ConsoleAction::Dispatch(ReportCommand::SetStatusFilter(StatusFilter::Pending))
        );
        assert_eq!(
            parse_line("STATUS All"),
            ConsoleAction::Dispatch(ReportCommand::SetStatusFilter(StatusFilter::All))
        );
        assert!(matches!(
            parse_line("status open"),
            ConsoleAction::Unknown(_)
        ));
    }

    #[test]
    fn toggle_requires_an_id() {
        assert_eq!(
            parse_line("toggle 7"),
            ConsoleAction::Dispatch(ReportCommand::ToggleStatus("7".to_string()))
        );
        assert!(matches!(parse_line("toggle"), ConsoleAction::Unknown(_)));
    }

    #[test]
    fn blank_lines_do_nothing() {
        assert_eq!(parse_line("   "), ConsoleAction::Nothing);
    }

    #[test]
    fn quit_and_exit_both_stop() {
        assert_eq!(parse_line("quit"), ConsoleAction::Quit);
        assert_eq!(parse_line("exit"), ConsoleAction::Quit);
    }
}
