//! Raw, pre-validation form values.
//!
//! These types hold exactly what the form inputs produced. Nothing here is
//! trusted: [`crate::validate`] turns a [`FormInput`] into a
//! [`crate::UserForm`] or an [`crate::ErrorTree`]. JSON documents are read
//! through [`FormDocument`], which reports wrongly typed values per field
//! instead of failing the whole document.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ErrorTree, FieldError, InputError, ValidationErrorKind};
use crate::path::FieldPath;
use crate::validator::{
    EMAIL_FIELD, NAME_FIELD, PASSWORD_FIELD, TECHS_FIELD, TITLE_FIELD, YEARS_OF_EXPERIENCE_FIELD,
};

/// A raw numeric field value.
///
/// Number inputs deliver their value as text; documents produced elsewhere
/// may carry a JSON number, boolean or `null` instead. All of them are
/// accepted and coerced during validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    /// A value that is already numeric.
    Number(f64),
    /// Text typed into the input.
    Text(String),
    /// A boolean, read as `1` or `0`.
    Bool(bool),
    /// An explicit `null`, read as `0`.
    Null,
}

impl Default for RawNumber {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for RawNumber {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RawNumber {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl fmt::Display for RawNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Null => f.write_str("null"),
        }
    }
}

/// One repeatable tech entry as typed by the user.
///
/// The default entry, appended by the "add technology" action, has an empty
/// title and zero years of experience.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTechEntry {
    /// Technology name.
    pub title: String,
    /// Years of experience, not yet coerced.
    pub years_of_experience: RawNumber,
}

impl RawTechEntry {
    /// Build an entry from its raw parts.
    pub fn new(title: impl Into<String>, years_of_experience: impl Into<RawNumber>) -> Self {
        Self {
            title: title.into(),
            years_of_experience: years_of_experience.into(),
        }
    }
}

impl Default for RawTechEntry {
    fn default() -> Self {
        Self {
            title: String::new(),
            years_of_experience: RawNumber::Number(0.0),
        }
    }
}

/// Snapshot of every raw form value, taken at submit time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    /// Full name as typed.
    pub name: String,
    /// Email address as typed.
    pub email: String,
    /// Password as typed.
    pub password: String,
    /// Tech entries in display order.
    pub techs: Vec<RawTechEntry>,
}

/// A form decoded from a JSON document.
///
/// Missing keys and `null` text decode as empty values so the validator,
/// rather than the decoder, reports them. A value of the wrong JSON type
/// (a number where text belongs, an object in place of the tech list) is
/// recorded as a field error and replaced by an empty value.
///
/// # Examples
///
/// ```
/// use user_form::{FieldPath, FormDocument, RawNumber};
///
/// let document = FormDocument::from_json(
///     r#"{"name": 42, "techs": [{"title": "Rust", "yearsOfExperience": "3"}]}"#,
/// )
/// .expect("valid JSON");
///
/// let input = document.input();
/// assert!(input.name.is_empty());
/// assert!(input.password.is_empty());
/// assert_eq!(input.techs[0].years_of_experience, RawNumber::from("3"));
/// assert_eq!(
///     document.type_errors().message_at(&FieldPath::field("name")),
///     Some("name must be text"),
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormDocument {
    input: FormInput,
    type_errors: ErrorTree,
}

impl FormDocument {
    /// Decode a raw form document from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::ParseError`] when the text is not JSON or the
    /// document is not a JSON object.
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        let value: Value = serde_json::from_str(json).map_err(|e| InputError::ParseError {
            message: e.to_string(),
        })?;
        let Value::Object(fields) = value else {
            return Err(InputError::ParseError {
                message: "expected a JSON object".to_owned(),
            });
        };

        let mut decoder = Decoder::default();
        let input = decoder.form(&fields);
        Ok(Self {
            input,
            type_errors: decoder.errors,
        })
    }

    /// Raw values, with wrongly typed values replaced by empty ones.
    #[must_use]
    pub const fn input(&self) -> &FormInput {
        &self.input
    }

    /// Fields whose JSON value had the wrong type.
    #[must_use]
    pub const fn type_errors(&self) -> &ErrorTree {
        &self.type_errors
    }
}

impl From<FormInput> for FormDocument {
    fn from(input: FormInput) -> Self {
        Self {
            input,
            type_errors: ErrorTree::new(),
        }
    }
}

#[derive(Default)]
struct Decoder {
    errors: ErrorTree,
}

impl Decoder {
    fn form(&mut self, fields: &Map<String, Value>) -> FormInput {
        FormInput {
            name: self.text(fields.get(NAME_FIELD), &FieldPath::field(NAME_FIELD), NAME_FIELD),
            email: self.text(fields.get(EMAIL_FIELD), &FieldPath::field(EMAIL_FIELD), EMAIL_FIELD),
            password: self.text(
                fields.get(PASSWORD_FIELD),
                &FieldPath::field(PASSWORD_FIELD),
                PASSWORD_FIELD,
            ),
            techs: self.techs(fields.get(TECHS_FIELD)),
        }
    }

    fn techs(&mut self, value: Option<&Value>) -> Vec<RawTechEntry> {
        let path = FieldPath::field(TECHS_FIELD);
        match value {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(index, item)| self.tech_entry(item, &path.clone().index(index)))
                .collect(),
            Some(_) => {
                self.wrong_type(&path, "list", "techs must be a list");
                Vec::new()
            }
        }
    }

    fn tech_entry(&mut self, item: &Value, path: &FieldPath) -> RawTechEntry {
        let Value::Object(fields) = item else {
            self.wrong_type(path, "object", "each technology must be an object");
            return RawTechEntry::default();
        };
        RawTechEntry {
            title: self.text(
                fields.get(TITLE_FIELD),
                &path.clone().child(TITLE_FIELD),
                TITLE_FIELD,
            ),
            years_of_experience: self.number(
                fields.get(YEARS_OF_EXPERIENCE_FIELD),
                &path.clone().child(YEARS_OF_EXPERIENCE_FIELD),
            ),
        }
    }

    fn text(&mut self, value: Option<&Value>, path: &FieldPath, label: &str) -> String {
        match value {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(_) => {
                self.wrong_type(path, "text", format!("{label} must be text"));
                String::new()
            }
        }
    }

    fn number(&mut self, value: Option<&Value>, path: &FieldPath) -> RawNumber {
        match value {
            None => RawNumber::Number(0.0),
            Some(Value::Null) => RawNumber::Null,
            Some(Value::Bool(flag)) => RawNumber::Bool(*flag),
            Some(Value::String(text)) => RawNumber::Text(text.clone()),
            Some(Value::Number(number)) => number
                .as_f64()
                .map_or_else(|| RawNumber::Text(number.to_string()), RawNumber::Number),
            Some(Value::Array(_) | Value::Object(_)) => {
                self.wrong_type(path, "number", "years of experience must be a number");
                RawNumber::Number(0.0)
            }
        }
    }

    fn wrong_type(&mut self, path: &FieldPath, expected: &'static str, message: impl Into<String>) {
        debug!(path = %path, expected, "form value has the wrong type");
        self.errors.insert(
            path,
            FieldError::new(ValidationErrorKind::InvalidType { expected }, message),
        );
    }
}

#[cfg(test)]
mod tests {
    //! Covers raw document decoding.

    use rstest::rstest;

    use super::*;

    fn decode(json: &str) -> FormDocument {
        FormDocument::from_json(json).expect("valid JSON")
    }

    fn only_years(json: &str) -> RawNumber {
        let document = decode(json);
        document
            .input()
            .techs
            .first()
            .map(|entry| entry.years_of_experience.clone())
            .expect("one tech entry")
    }

    #[test]
    fn missing_keys_decode_as_empty_values() {
        let document = decode("{}");
        assert_eq!(document.input(), &FormInput::default());
        assert!(document.type_errors().is_empty());
    }

    #[rstest]
    #[case(r#"{"techs": [{"yearsOfExperience": "4"}]}"#, RawNumber::Text("4".to_owned()))]
    #[case(r#"{"techs": [{"yearsOfExperience": 4}]}"#, RawNumber::Number(4.0))]
    #[case(r#"{"techs": [{"yearsOfExperience": 2.5}]}"#, RawNumber::Number(2.5))]
    #[case(r#"{"techs": [{"yearsOfExperience": null}]}"#, RawNumber::Null)]
    #[case(r#"{"techs": [{"yearsOfExperience": true}]}"#, RawNumber::Bool(true))]
    #[case(r#"{"techs": [{"title": "Rust"}]}"#, RawNumber::Number(0.0))]
    fn years_accept_primitive_values(#[case] json: &str, #[case] expected: RawNumber) {
        assert_eq!(only_years(json), expected);
    }

    #[rstest]
    #[case(r#"{"name": 42}"#, "name", "name must be text")]
    #[case(r#"{"email": false}"#, "email", "email must be text")]
    #[case(r#"{"password": ["x"]}"#, "password", "password must be text")]
    #[case(r#"{"techs": {"title": "Rust"}}"#, "techs", "techs must be a list")]
    #[case(r#"{"techs": ["Rust"]}"#, "techs[0]", "each technology must be an object")]
    #[case(r#"{"techs": [{"title": 7}]}"#, "techs[0].title", "title must be text")]
    #[case(
        r#"{"techs": [{"yearsOfExperience": {}}]}"#,
        "techs[0].yearsOfExperience",
        "years of experience must be a number"
    )]
    fn wrongly_typed_values_become_field_errors(
        #[case] json: &str,
        #[case] path: &str,
        #[case] message: &str,
    ) {
        let document = decode(json);
        let field: FieldPath = path.parse().expect("test paths should parse");
        let error = document
            .type_errors()
            .get(&field)
            .expect("a type error should be recorded");

        assert_eq!(error.code(), "invalid_type");
        assert_eq!(error.message(), message);
        assert_eq!(document.type_errors().len(), 1);
    }

    #[test]
    fn null_text_decodes_as_empty() {
        let document = decode(r#"{"name": null, "techs": [{"title": null}]}"#);
        assert!(document.type_errors().is_empty());
        assert!(document.input().name.is_empty());
    }

    #[rstest]
    #[case("not json")]
    #[case("[]")]
    #[case("\"ada\"")]
    fn rejects_documents_that_are_not_objects(#[case] json: &str) {
        let result = FormDocument::from_json(json);
        assert!(matches!(result, Err(InputError::ParseError { .. })));
    }

    #[test]
    fn events_accept_null_and_boolean_years() {
        let values: Vec<RawNumber> =
            serde_json::from_str("[null, true, 3, \"4\"]").expect("valid values");
        assert_eq!(
            values,
            vec![
                RawNumber::Null,
                RawNumber::Bool(true),
                RawNumber::Number(3.0),
                RawNumber::from("4"),
            ]
        );
    }

    #[test]
    fn default_entry_has_blank_title_and_zero_years() {
        let entry = RawTechEntry::default();
        assert!(entry.title.is_empty());
        assert_eq!(entry.years_of_experience, RawNumber::Number(0.0));
    }

    #[test]
    fn serialises_with_camel_case_keys() {
        let input = FormInput {
            techs: vec![RawTechEntry::new("Rust", "3")],
            ..FormInput::default()
        };
        let json = serde_json::to_string(&input).expect("serialise");
        assert!(json.contains("yearsOfExperience"));
    }
}
