//! Error types for the `user-form` command line.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::SettingsError;
use crate::error::{InputError, StateError};

/// Errors surfaced by command execution.
///
/// Validation failures are not errors here: a rejected form is a normal
/// command outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// An input path had no file name component.
    #[error("input path '{path}' does not name a file")]
    NotAFile {
        /// Path supplied on the command line.
        path: PathBuf,
    },
    /// An input file could not be read.
    #[error("failed to read '{path}': {message}")]
    ReadFile {
        /// Path supplied on the command line.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },
    /// Standard input could not be read.
    #[error("failed to read standard input: {message}")]
    ReadStdin {
        /// Description of the I/O error.
        message: String,
    },
    /// The form document could not be decoded.
    #[error("form input error: {source}")]
    Input {
        /// Underlying decode error.
        #[from]
        #[source]
        source: InputError,
    },
    /// The event log could not be decoded.
    #[error("invalid event JSON: {message}")]
    InvalidEvents {
        /// Description of the parse error.
        message: String,
    },
    /// An event in the log could not be applied.
    #[error("event {position} rejected: {source}")]
    EventRejected {
        /// Zero-based position of the event in the log.
        position: usize,
        /// Underlying state error.
        #[source]
        source: StateError,
    },
    /// Settings could not be loaded.
    #[error("settings error: {source}")]
    Settings {
        /// Underlying settings error.
        #[from]
        #[source]
        source: SettingsError,
    },
    /// The result document could not be rendered.
    #[error("failed to render output: {message}")]
    Render {
        /// Description of the serialisation error.
        message: String,
    },
}
