//! Command-line support for the `user-form` binary.
//!
//! This module provides argument parsing, command execution, and output
//! rendering. The binary delegates to these functions so they can be
//! exercised in tests without spawning a subprocess.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use crate::config::FormSettings;
use crate::error::ErrorTree;
use crate::input::FormDocument;
use crate::state::{FormEvent, FormState, Submission};
use crate::validator::validate_document;

mod error;

pub use error::CliError;

/// Exit status when the form is accepted.
pub const EXIT_ACCEPTED: u8 = 0;
/// Exit status when the form fails validation.
pub const EXIT_REJECTED: u8 = 1;
/// Exit status when the command itself fails.
pub const EXIT_FAILURE: u8 = 2;

/// `user-form` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "user-form",
    about = "Validate create-user form documents and echo the normalised result",
    version
)]
pub struct CliArgs {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Commands understood by `user-form`.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Validate a form document and echo the normalised result.
    Validate {
        /// Path to a form JSON document. Reads standard input when omitted.
        #[arg(long, value_name = "path")]
        input: Option<PathBuf>,
        /// Print single-line JSON.
        #[arg(long)]
        compact: bool,
    },
    /// Apply a log of form events to an empty form, then submit it.
    Replay {
        /// Path to a JSON array of form events.
        #[arg(long, value_name = "path")]
        events: PathBuf,
        /// Print single-line JSON.
        #[arg(long)]
        compact: bool,
    },
}

impl Command {
    const fn compact(&self) -> bool {
        match self {
            Self::Validate { compact, .. } | Self::Replay { compact, .. } => *compact,
        }
    }
}

/// Result of running a command: the submit outcome and its rendered JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    submission: Submission,
    document: String,
}

impl CommandOutput {
    /// Whether the form was accepted.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        self.submission.is_accepted()
    }

    /// Submit outcome.
    #[must_use]
    pub const fn submission(&self) -> &Submission {
        &self.submission
    }

    /// JSON document to print on standard output.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }
}

#[derive(Serialize)]
struct RejectedDocument<'a> {
    errors: &'a ErrorTree,
}

/// Run `command` with `settings`, reading standard input from `stdin` when
/// the command reads a form from it.
///
/// # Errors
///
/// Returns [`CliError`] when input cannot be read or is not a JSON object, an
/// event cannot be applied, or the output cannot be rendered. A form that
/// fails validation, including values of the wrong JSON type, is a successful
/// command with a rejected submission.
///
/// # Example
///
/// ```
/// use user_form::FormSettings;
/// use user_form::cli::{Command, execute};
///
/// let settings = FormSettings {
///     compact: false,
///     log_json: false,
///     password_min_length: None,
///     techs_min_entries: None,
/// };
/// let command = Command::Validate { input: None, compact: true };
/// let mut stdin = r#"{"name": "ada", "email": "a@b", "password": "123456",
///     "techs": [{"title": "Rust", "yearsOfExperience": "2"}]}"#.as_bytes();
///
/// let output = execute(&command, &settings, &mut stdin).expect("command runs");
/// assert!(output.is_accepted());
/// assert!(output.document().contains(r#""name":"Ada""#));
/// ```
pub fn execute(
    command: &Command,
    settings: &FormSettings,
    stdin: &mut impl Read,
) -> Result<CommandOutput, CliError> {
    let submission = match command {
        Command::Validate { input, .. } => {
            let text = read_source(input.as_deref(), stdin)?;
            let document = FormDocument::from_json(&text)?;
            Submission::from(validate_document(&document, &settings.rules()))
        }
        Command::Replay { events, .. } => {
            let text = read_file(events)?;
            replay(&text, settings)?
        }
    };
    debug!(accepted = submission.is_accepted(), "command finished");

    let compact = command.compact() || settings.compact;
    let document = render(&submission, compact)?;
    Ok(CommandOutput {
        submission,
        document,
    })
}

/// Run `command`, writing the result document to `stdout` and any command
/// failure to `stderr`, and return the process exit status.
///
/// A failure is written once, as a single line.
pub fn run(
    command: &Command,
    settings: &FormSettings,
    stdin: &mut impl Read,
    mut stdout: impl Write,
    mut stderr: impl Write,
) -> u8 {
    match execute(command, settings, stdin) {
        Ok(output) => {
            if let Err(err) = writeln!(stdout, "{}", output.document()) {
                drop(err);
            }
            if output.is_accepted() {
                EXIT_ACCEPTED
            } else {
                EXIT_REJECTED
            }
        }
        Err(err) => {
            if let Err(write_err) = writeln!(stderr, "{err}") {
                drop(write_err);
            }
            EXIT_FAILURE
        }
    }
}

/// Apply a JSON event log to an empty form and submit it.
///
/// # Errors
///
/// Returns [`CliError::InvalidEvents`] when the log is not a JSON array of
/// events, or [`CliError::EventRejected`] when an event names a missing
/// tech entry.
pub fn replay(events_json: &str, settings: &FormSettings) -> Result<Submission, CliError> {
    let events: Vec<FormEvent> =
        serde_json::from_str(events_json).map_err(|e| CliError::InvalidEvents {
            message: e.to_string(),
        })?;

    let mut state = FormState::new().with_rules(settings.rules());
    for (position, event) in events.into_iter().enumerate() {
        state
            .apply(event)
            .map_err(|source| CliError::EventRejected { position, source })?;
    }
    Ok(state.submit().clone())
}

/// Render a submit outcome as JSON.
///
/// Accepted forms render as the normalised form itself; rejected forms render
/// as `{"errors": <error tree>}`.
///
/// # Errors
///
/// Returns [`CliError::Render`] if serialisation fails.
pub fn render(submission: &Submission, compact: bool) -> Result<String, CliError> {
    let rendered = match submission {
        Submission::Accepted(form) => to_json(form, compact),
        Submission::Rejected(errors) => to_json(&RejectedDocument { errors }, compact),
    };
    rendered.map_err(|e| CliError::Render {
        message: e.to_string(),
    })
}

fn to_json<T: Serialize>(value: &T, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

fn read_source(path: Option<&Path>, stdin: &mut impl Read) -> Result<String, CliError> {
    match path {
        Some(file) => read_file(file),
        None => {
            let mut text = String::new();
            stdin
                .read_to_string(&mut text)
                .map_err(|e| CliError::ReadStdin {
                    message: e.to_string(),
                })?;
            Ok(text)
        }
    }
}

fn read_file(path: &Path) -> Result<String, CliError> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| CliError::NotAFile {
        path: path.to_path_buf(),
    })?;
    let read_error = |e: std::io::Error| CliError::ReadFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    dir.read_to_string(Path::new(file_name)).map_err(read_error)
}
