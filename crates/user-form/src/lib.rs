//! Create-user form validation, normalisation, and dynamic field state.
//!
//! This crate turns the raw values of a create-user form into either a
//! validated, normalised [`UserForm`] or an [`ErrorTree`] of field-level
//! messages. It also provides the [`FormState`] container that collects raw
//! values between submits and manages the repeatable tech entries.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Decoding raw form documents from JSON ([`FormDocument`])
//! - Exhaustive per-field validation with collected errors ([`validate`])
//! - Name capitalisation and numeric coercion of text inputs
//! - Appending and removing tech entries ([`FormState`])
//! - A `user-form` command line that echoes the validated result ([`cli`])
//!
//! # Example
//!
//! ```
//! use user_form::{FieldPath, FormInput, RawTechEntry, validate};
//!
//! let input = FormInput {
//!     name: "  john paul  ".to_owned(),
//!     email: "john@example.com".to_owned(),
//!     password: "12345".to_owned(),
//!     techs: vec![RawTechEntry::new("", "3")],
//! };
//!
//! let errors = validate(&input).expect_err("password and title are invalid");
//! let paths: Vec<String> = errors.paths().iter().map(ToString::to_string).collect();
//! assert_eq!(paths, ["password", "techs[0].title"]);
//! ```

pub mod cli;
mod coerce;
mod config;
mod error;
mod form;
mod input;
mod name;
mod path;
mod rules;
mod state;
mod validator;

pub use coerce::{check_minimum, coerce_number};
pub use config::{FormSettings, SettingsError};
pub use error::{
    CoercionError, ErrorTree, FieldError, InputError, StateError, ValidationErrorKind,
};
pub use form::{TechEntry, UserForm};
pub use input::{FormDocument, FormInput, RawNumber, RawTechEntry};
pub use name::capitalize_words;
pub use path::{FieldPath, PathParseError, PathSegment};
pub use rules::{
    DEFAULT_PASSWORD_MIN_LENGTH, DEFAULT_TECHS_MIN_ENTRIES, ValidationRules,
    YEARS_OF_EXPERIENCE_MIN,
};
pub use state::{FormEvent, FormState, Submission};
pub use validator::{
    EMAIL_FIELD, NAME_FIELD, PASSWORD_FIELD, TECHS_FIELD, TITLE_FIELD,
    YEARS_OF_EXPERIENCE_FIELD, validate, validate_document, validate_with,
};
