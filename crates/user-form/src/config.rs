//! Command-line settings loaded via OrthoConfig.
//!
//! Settings come from `USER_FORM_*` environment variables and configuration
//! files. Command-line flags are owned by [`crate::cli`], so settings are
//! loaded with the program name only.

use std::ffi::OsString;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::rules::{DEFAULT_PASSWORD_MIN_LENGTH, DEFAULT_TECHS_MIN_ENTRIES, ValidationRules};

const PROGRAM_NAME: &str = "user-form";

/// Errors raised while loading settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// A setting was present but could not be read.
    #[error("failed to load settings: {message}")]
    Load {
        /// Description of the failure.
        message: String,
    },
}

/// Settings shared by every `user-form` command.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_FORM")]
pub struct FormSettings {
    /// Print single-line JSON instead of indented JSON.
    #[ortho_config(default = false)]
    pub compact: bool,
    /// Emit log lines as JSON.
    #[ortho_config(default = false)]
    pub log_json: bool,
    /// Optional override for the minimum password length.
    pub password_min_length: Option<usize>,
    /// Optional override for the minimum number of tech entries.
    pub techs_min_entries: Option<usize>,
}

impl FormSettings {
    /// Load settings from the environment and configuration files.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] when a present value cannot be parsed.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::load_from_iter([OsString::from(PROGRAM_NAME)]).map_err(|err| {
            SettingsError::Load {
                message: err.to_string(),
            }
        })
    }

    /// Validation rules with any configured overrides applied.
    ///
    /// Overrides below the default limits are ignored.
    #[must_use]
    pub fn rules(&self) -> ValidationRules {
        if let Some(requested) = self
            .password_min_length
            .filter(|min| *min < DEFAULT_PASSWORD_MIN_LENGTH)
        {
            warn!(requested, "password_min_length below the default is ignored");
        }
        if let Some(requested) = self
            .techs_min_entries
            .filter(|min| *min < DEFAULT_TECHS_MIN_ENTRIES)
        {
            warn!(requested, "techs_min_entries below the default is ignored");
        }
        let defaults = ValidationRules::default();
        let with_password = self
            .password_min_length
            .map_or(defaults, |min| defaults.with_password_min_length(min));
        self.techs_min_entries
            .map_or(with_password, |min| with_password.with_techs_min_entries(min))
    }
}
