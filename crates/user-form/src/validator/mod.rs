//! Create-user form validation and normalisation.
//!
//! Each field is checked by a small named step that either yields the
//! normalised value or a [`FieldError`]. Every field is checked on every
//! submit; failures are collected into one [`ErrorTree`] instead of stopping
//! at the first.
//!
//! | Field | Rule | Transform |
//! | --- | --- | --- |
//! | `name` | non-empty once trimmed | capitalise each word |
//! | `email` | non-empty | none |
//! | `password` | at least `password_min_length` characters | none |
//! | `techs` | at least `techs_min_entries` entries | none |
//! | `techs[i].title` | non-empty | none |
//! | `techs[i].yearsOfExperience` | numeric and `>= 0` | coerce to number |
//!
//! Email format is not checked.

use tracing::debug;

use crate::coerce::{check_minimum, coerce_number};
use crate::error::{ErrorTree, FieldError, ValidationErrorKind};
use crate::form::{TechEntry, UserForm};
use crate::input::{FormDocument, FormInput, RawNumber, RawTechEntry};
use crate::name::capitalize_words;
use crate::path::FieldPath;
use crate::rules::{ValidationRules, YEARS_OF_EXPERIENCE_MIN};

/// Key of the name field.
pub const NAME_FIELD: &str = "name";
/// Key of the email field.
pub const EMAIL_FIELD: &str = "email";
/// Key of the password field.
pub const PASSWORD_FIELD: &str = "password";
/// Key of the tech entry sequence.
pub const TECHS_FIELD: &str = "techs";
/// Key of a tech entry's title.
pub const TITLE_FIELD: &str = "title";
/// Key of a tech entry's years of experience.
pub const YEARS_OF_EXPERIENCE_FIELD: &str = "yearsOfExperience";

const NAME_REQUIRED: &str = "name is required";
const EMAIL_REQUIRED: &str = "email is required";
const TITLE_REQUIRED: &str = "title is required";
const YEARS_REQUIRED: &str = "years of experience is required";
const YEARS_NOT_A_NUMBER: &str = "years of experience must be a number";

/// Validate a raw form with the default rules.
///
/// On success the returned [`UserForm`] is fully normalised. On failure the
/// [`ErrorTree`] holds one message per failing field or sequence.
///
/// # Errors
///
/// Returns the collected [`ErrorTree`] when any field fails validation.
///
/// # Examples
///
/// ```
/// use user_form::{FieldPath, FormInput, RawTechEntry, validate};
///
/// let input = FormInput {
///     name: "  john paul  ".to_owned(),
///     email: "john@example.com".to_owned(),
///     password: "123456".to_owned(),
///     techs: vec![RawTechEntry::new("Rust", "3")],
/// };
/// let form = validate(&input).expect("input is valid");
/// assert_eq!(form.name(), "John Paul");
/// assert_eq!(form.techs()[0].years_of_experience(), 3.0);
///
/// let empty = FormInput { techs: vec![], ..input };
/// let errors = validate(&empty).expect_err("techs must not be empty");
/// assert!(errors.get(&FieldPath::field("techs")).is_some());
/// ```
pub fn validate(raw: &FormInput) -> Result<UserForm, ErrorTree> {
    validate_with(raw, &ValidationRules::default())
}

/// Validate a raw form with explicit rules.
///
/// # Errors
///
/// Returns the collected [`ErrorTree`] when any field fails validation.
pub fn validate_with(raw: &FormInput, rules: &ValidationRules) -> Result<UserForm, ErrorTree> {
    let mut errors = ErrorTree::new();

    let name = record(&mut errors, &FieldPath::field(NAME_FIELD), validate_name(&raw.name));
    let email = record(
        &mut errors,
        &FieldPath::field(EMAIL_FIELD),
        validate_email(&raw.email),
    );
    let password = record(
        &mut errors,
        &FieldPath::field(PASSWORD_FIELD),
        validate_password(&raw.password, rules.password_min_length()),
    );
    let techs = validate_techs(&raw.techs, rules.techs_min_entries(), &mut errors);

    match (name, email, password, techs) {
        (Some(name_value), Some(email_value), Some(password_value), Some(tech_entries)) => {
            debug!(techs = tech_entries.len(), "form accepted");
            Ok(UserForm::new(
                name_value,
                email_value,
                password_value,
                tech_entries,
            ))
        }
        _ => {
            debug!(error_count = errors.len(), "form rejected");
            Err(errors)
        }
    }
}

/// Validate a decoded JSON document with explicit rules.
///
/// Type errors found while decoding take precedence: a field with the wrong
/// JSON type reports that, and nothing beneath it is checked further.
///
/// # Errors
///
/// Returns the collected [`ErrorTree`] when the document has type errors or
/// any field fails validation.
pub fn validate_document(
    document: &FormDocument,
    rules: &ValidationRules,
) -> Result<UserForm, ErrorTree> {
    let outcome = validate_with(document.input(), rules);
    if document.type_errors().is_empty() {
        return outcome;
    }
    let mut errors = document.type_errors().clone();
    if let Err(found) = outcome {
        errors.absorb(&found);
    }
    debug!(error_count = errors.len(), "form document rejected");
    Err(errors)
}

fn record<T>(
    errors: &mut ErrorTree,
    path: &FieldPath,
    outcome: Result<T, FieldError>,
) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(error) => {
            errors.insert(path, error);
            None
        }
    }
}

fn validate_name(raw: &str) -> Result<String, FieldError> {
    if raw.trim().is_empty() {
        return Err(FieldError::new(ValidationErrorKind::Required, NAME_REQUIRED));
    }
    Ok(capitalize_words(raw))
}

fn validate_email(raw: &str) -> Result<String, FieldError> {
    if raw.is_empty() {
        return Err(FieldError::new(ValidationErrorKind::Required, EMAIL_REQUIRED));
    }
    Ok(raw.to_owned())
}

fn validate_password(raw: &str, min: usize) -> Result<String, FieldError> {
    let actual = raw.chars().count();
    if actual < min {
        return Err(FieldError::new(
            ValidationErrorKind::TooShort { min, actual },
            format!("password must be at least {min} characters"),
        ));
    }
    Ok(raw.to_owned())
}

fn validate_techs(
    raw: &[RawTechEntry],
    min_entries: usize,
    errors: &mut ErrorTree,
) -> Option<Vec<TechEntry>> {
    let techs_path = FieldPath::field(TECHS_FIELD);
    let mut entries = Vec::with_capacity(raw.len());
    let mut all_valid = true;

    for (index, entry) in raw.iter().enumerate() {
        let entry_path = techs_path.clone().index(index);
        match validate_tech_entry(entry, &entry_path, errors) {
            Some(valid) => entries.push(valid),
            None => all_valid = false,
        }
    }

    if raw.len() < min_entries {
        errors.insert(
            &techs_path,
            FieldError::new(
                ValidationErrorKind::MinLength {
                    min: min_entries,
                    actual: raw.len(),
                },
                min_entries_message(min_entries),
            ),
        );
        all_valid = false;
    }

    all_valid.then_some(entries)
}

fn validate_tech_entry(
    raw: &RawTechEntry,
    entry_path: &FieldPath,
    errors: &mut ErrorTree,
) -> Option<TechEntry> {
    let title = record(
        errors,
        &entry_path.clone().child(TITLE_FIELD),
        validate_title(&raw.title),
    );
    let years = record(
        errors,
        &entry_path.clone().child(YEARS_OF_EXPERIENCE_FIELD),
        validate_years(&raw.years_of_experience),
    );
    Some(TechEntry::new(title?, years?))
}

fn validate_title(raw: &str) -> Result<String, FieldError> {
    if raw.is_empty() {
        return Err(FieldError::new(ValidationErrorKind::Required, TITLE_REQUIRED));
    }
    Ok(raw.to_owned())
}

fn validate_years(raw: &RawNumber) -> Result<f64, FieldError> {
    let value = coerce_number(raw)
        .map_err(|err| FieldError::new(ValidationErrorKind::from(err), YEARS_NOT_A_NUMBER))?;
    check_minimum(value, YEARS_OF_EXPERIENCE_MIN)
        .map_err(|err| FieldError::new(ValidationErrorKind::from(err), YEARS_REQUIRED))
}

fn min_entries_message(min: usize) -> String {
    if min == 1 {
        "add at least one technology".to_owned()
    } else {
        format!("add at least {min} technologies")
    }
}
