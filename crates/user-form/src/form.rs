//! Validated form output.
//!
//! Values of these types only come out of [`crate::validate`], so every
//! transform has already been applied: the name is capitalised and years of
//! experience are numeric.

use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

/// Largest magnitude below which every whole `f64` is an exact integer.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A validated tech entry.
///
/// ## Invariants
/// - `title` is non-empty.
/// - `years_of_experience` is finite and not negative.
///
/// Whole years serialise as JSON integers (`3`, not `3.0`).
#[derive(Debug, Clone, PartialEq)]
pub struct TechEntry {
    title: String,
    years_of_experience: f64,
}

impl TechEntry {
    pub(crate) const fn new(title: String, years_of_experience: f64) -> Self {
        Self {
            title,
            years_of_experience,
        }
    }

    /// Technology name.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Years of experience with the technology.
    #[must_use]
    pub const fn years_of_experience(&self) -> f64 {
        self.years_of_experience
    }
}

impl Serialize for TechEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entry = serializer.serialize_struct("TechEntry", 2)?;
        entry.serialize_field("title", &self.title)?;
        match whole_number(self.years_of_experience) {
            Some(whole) => entry.serialize_field("yearsOfExperience", &whole)?,
            None => entry.serialize_field("yearsOfExperience", &self.years_of_experience)?,
        }
        entry.end()
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "whole values within the exact integer range convert without loss"
)]
fn whole_number(value: f64) -> Option<i64> {
    (value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER).then_some(value as i64)
}

/// A validated, normalised create-user form.
///
/// ## Invariants
/// - `name` is non-empty, trimmed, and capitalised per word.
/// - `email` is non-empty.
/// - `password` meets the configured minimum length.
/// - `techs` holds at least the configured minimum number of entries.
///
/// Serialises to the camelCase JSON document echoed back to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    name: String,
    email: String,
    password: String,
    techs: Vec<TechEntry>,
}

impl UserForm {
    pub(crate) const fn new(
        name: String,
        email: String,
        password: String,
        techs: Vec<TechEntry>,
    ) -> Self {
        Self {
            name,
            email,
            password,
            techs,
        }
    }

    /// Capitalised full name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Email address as entered.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Password as entered.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Tech entries in the order they were entered.
    #[must_use]
    pub fn techs(&self) -> &[TechEntry] {
        &self.techs
    }
}

#[cfg(test)]
mod tests {
    //! Covers the JSON shape of validated tech entries.

    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;

    fn years_json(years: f64) -> Value {
        let entry = TechEntry::new("Rust".to_owned(), years);
        serde_json::to_value(&entry).expect("serialise entry")
    }

    #[rstest]
    #[case(30.0, json!(30))]
    #[case(0.0, json!(0))]
    #[case(1.5, json!(1.5))]
    #[case(1e20, json!(1e20))]
    fn years_serialise_as_integers_when_whole(#[case] years: f64, #[case] expected: Value) {
        assert_eq!(
            years_json(years),
            json!({"title": "Rust", "yearsOfExperience": expected})
        );
    }

    #[test]
    fn whole_years_print_without_fraction() {
        let entry = TechEntry::new("Go".to_owned(), 4.0);
        let text = serde_json::to_string(&entry).expect("serialise entry");
        assert_eq!(text, r#"{"title":"Go","yearsOfExperience":4}"#);
    }
}
