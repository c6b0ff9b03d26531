//! Form state container.
//!
//! [`FormState`] holds the current raw values of the form, mutated by discrete
//! [`FormEvent`]s, and the outcome of the most recent submit. Tech entries are
//! appended at the end and removed at any index, with later entries shifting
//! down by one.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ErrorTree, FieldError, StateError};
use crate::form::UserForm;
use crate::input::{FormInput, RawNumber, RawTechEntry};
use crate::path::FieldPath;
use crate::rules::ValidationRules;
use crate::validator::validate_with;

/// A single user-driven change to the form.
///
/// Serialised with a `type` tag, for example
/// `{"type": "setTechTitle", "index": 0, "value": "Rust"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FormEvent {
    /// Replace the name input.
    SetName {
        /// New raw value.
        value: String,
    },
    /// Replace the email input.
    SetEmail {
        /// New raw value.
        value: String,
    },
    /// Replace the password input.
    SetPassword {
        /// New raw value.
        value: String,
    },
    /// Replace the title of an existing tech entry.
    SetTechTitle {
        /// Entry position.
        index: usize,
        /// New raw value.
        value: String,
    },
    /// Replace the years of experience of an existing tech entry.
    SetTechYears {
        /// Entry position.
        index: usize,
        /// New raw value.
        value: RawNumber,
    },
    /// Append the default tech entry.
    AppendTech,
    /// Remove the tech entry at `index`.
    RemoveTech {
        /// Entry position.
        index: usize,
    },
}

/// Outcome of a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// The form validated; holds the normalised output.
    Accepted(UserForm),
    /// The form failed validation; holds every field error.
    Rejected(ErrorTree),
}

impl Submission {
    /// Whether the submit produced a validated form.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// The validated form, if accepted.
    #[must_use]
    pub const fn form(&self) -> Option<&UserForm> {
        match self {
            Self::Accepted(form) => Some(form),
            Self::Rejected(_) => None,
        }
    }

    /// The collected errors, if rejected.
    #[must_use]
    pub const fn errors(&self) -> Option<&ErrorTree> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(errors) => Some(errors),
        }
    }
}

impl From<Result<UserForm, ErrorTree>> for Submission {
    fn from(value: Result<UserForm, ErrorTree>) -> Self {
        match value {
            Ok(form) => Self::Accepted(form),
            Err(errors) => Self::Rejected(errors),
        }
    }
}

/// Current raw form values plus the last submit outcome.
///
/// # Examples
///
/// ```
/// use user_form::{FieldPath, FormState};
///
/// let mut state = FormState::new();
/// state.set_name("ada lovelace");
/// state.set_email("ada@example.com");
/// state.set_password("analytical");
/// state.append_tech();
///
/// let submission = state.submit();
/// assert!(!submission.is_accepted());
/// assert_eq!(
///     state.error_at(&"techs[0].title".parse::<FieldPath>().expect("path")).map(|e| e.message()),
///     Some("title is required"),
/// );
///
/// state.set_tech_title(0, "Rust").expect("entry exists");
/// assert!(state.submit().is_accepted());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    input: FormInput,
    rules: ValidationRules,
    last_submission: Option<Submission>,
}

impl FormState {
    /// Empty form validated with the default rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing raw values.
    #[must_use]
    pub fn from_input(input: FormInput) -> Self {
        Self {
            input,
            ..Self::default()
        }
    }

    /// Replace the rules used on submit.
    #[must_use]
    pub const fn with_rules(mut self, rules: ValidationRules) -> Self {
        self.rules = rules;
        self
    }

    /// Current raw values.
    #[must_use]
    pub const fn input(&self) -> &FormInput {
        &self.input
    }

    /// Rules applied on submit.
    #[must_use]
    pub const fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Current raw tech entries.
    #[must_use]
    pub fn techs(&self) -> &[RawTechEntry] {
        &self.input.techs
    }

    /// Number of tech entries.
    #[must_use]
    pub fn tech_count(&self) -> usize {
        self.input.techs.len()
    }

    /// Apply one event.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::IndexOutOfRange`] when the event names a tech
    /// entry that does not exist. The state is left unchanged in that case.
    pub fn apply(&mut self, event: FormEvent) -> Result<(), StateError> {
        match event {
            FormEvent::SetName { value } => self.set_name(value),
            FormEvent::SetEmail { value } => self.set_email(value),
            FormEvent::SetPassword { value } => self.set_password(value),
            FormEvent::SetTechTitle { index, value } => self.set_tech_title(index, value)?,
            FormEvent::SetTechYears { index, value } => self.set_tech_years(index, value)?,
            FormEvent::AppendTech => self.append_tech(),
            FormEvent::RemoveTech { index } => {
                self.remove_tech(index)?;
            }
        }
        Ok(())
    }

    /// Replace the name input.
    pub fn set_name(&mut self, value: impl Into<String>) {
        self.input.name = value.into();
    }

    /// Replace the email input.
    pub fn set_email(&mut self, value: impl Into<String>) {
        self.input.email = value.into();
    }

    /// Replace the password input.
    pub fn set_password(&mut self, value: impl Into<String>) {
        self.input.password = value.into();
    }

    /// Replace the title of the entry at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::IndexOutOfRange`] when no entry exists at `index`.
    pub fn set_tech_title(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), StateError> {
        self.tech_mut(index)?.title = value.into();
        Ok(())
    }

    /// Replace the years of experience of the entry at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::IndexOutOfRange`] when no entry exists at `index`.
    pub fn set_tech_years(
        &mut self,
        index: usize,
        value: impl Into<RawNumber>,
    ) -> Result<(), StateError> {
        self.tech_mut(index)?.years_of_experience = value.into();
        Ok(())
    }

    /// Append the default tech entry at the end.
    pub fn append_tech(&mut self) {
        self.append_tech_entry(RawTechEntry::default());
    }

    /// Append `entry` at the end.
    pub fn append_tech_entry(&mut self, entry: RawTechEntry) {
        self.input.techs.push(entry);
        debug!(techs = self.input.techs.len(), "tech entry appended");
    }

    /// Remove and return the entry at `index`; later entries shift down.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::IndexOutOfRange`] when no entry exists at `index`.
    pub fn remove_tech(&mut self, index: usize) -> Result<RawTechEntry, StateError> {
        let len = self.input.techs.len();
        if index >= len {
            warn!(index, len, "tech entry removal out of range");
            return Err(StateError::IndexOutOfRange { index, len });
        }
        let removed = self.input.techs.remove(index);
        debug!(index, techs = self.input.techs.len(), "tech entry removed");
        Ok(removed)
    }

    /// Copy of the current raw values.
    #[must_use]
    pub fn snapshot(&self) -> FormInput {
        self.input.clone()
    }

    /// Validate the current values, replacing the previous outcome.
    pub fn submit(&mut self) -> &Submission {
        let outcome = Submission::from(validate_with(&self.input, &self.rules));
        debug!(accepted = outcome.is_accepted(), "form submitted");
        self.last_submission.insert(outcome)
    }

    /// Outcome of the most recent submit, if any.
    #[must_use]
    pub const fn last_submission(&self) -> Option<&Submission> {
        self.last_submission.as_ref()
    }

    /// Error shown next to the input at `path` after the last submit.
    #[must_use]
    pub fn error_at(&self, path: &FieldPath) -> Option<&FieldError> {
        self.last_submission
            .as_ref()
            .and_then(Submission::errors)
            .and_then(|errors| errors.get(path))
    }

    fn tech_mut(&mut self, index: usize) -> Result<&mut RawTechEntry, StateError> {
        let len = self.input.techs.len();
        self.input.techs.get_mut(index).ok_or_else(|| {
            warn!(index, len, "tech entry update out of range");
            StateError::IndexOutOfRange { index, len }
        })
    }
}
