//! Tunable limits applied by the validator.

/// Minimum password length used by [`ValidationRules::default`].
pub const DEFAULT_PASSWORD_MIN_LENGTH: usize = 6;

/// Minimum number of tech entries used by [`ValidationRules::default`].
pub const DEFAULT_TECHS_MIN_ENTRIES: usize = 1;

/// Smallest accepted years of experience.
pub const YEARS_OF_EXPERIENCE_MIN: f64 = 0.0;

/// Limits applied when validating a form.
///
/// Overrides can tighten the defaults but never loosen them: a requested
/// limit below the default is raised to the default, so every accepted form
/// has a password of at least [`DEFAULT_PASSWORD_MIN_LENGTH`] characters and
/// at least [`DEFAULT_TECHS_MIN_ENTRIES`] tech entry.
///
/// # Examples
///
/// ```
/// use user_form::ValidationRules;
///
/// let rules = ValidationRules::default().with_password_min_length(8);
/// assert_eq!(rules.password_min_length(), 8);
/// assert_eq!(rules.techs_min_entries(), 1);
///
/// let loosened = ValidationRules::default().with_techs_min_entries(0);
/// assert_eq!(loosened.techs_min_entries(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    password_min_length: usize,
    techs_min_entries: usize,
}

impl ValidationRules {
    /// Raise the minimum password length. Values below
    /// [`DEFAULT_PASSWORD_MIN_LENGTH`] keep the default.
    #[must_use]
    pub const fn with_password_min_length(mut self, min: usize) -> Self {
        self.password_min_length = at_least(min, DEFAULT_PASSWORD_MIN_LENGTH);
        self
    }

    /// Raise the minimum number of tech entries. Values below
    /// [`DEFAULT_TECHS_MIN_ENTRIES`] keep the default.
    #[must_use]
    pub const fn with_techs_min_entries(mut self, min: usize) -> Self {
        self.techs_min_entries = at_least(min, DEFAULT_TECHS_MIN_ENTRIES);
        self
    }

    /// Minimum password length in characters.
    #[must_use]
    pub const fn password_min_length(&self) -> usize {
        self.password_min_length
    }

    /// Minimum number of tech entries.
    #[must_use]
    pub const fn techs_min_entries(&self) -> usize {
        self.techs_min_entries
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            password_min_length: DEFAULT_PASSWORD_MIN_LENGTH,
            techs_min_entries: DEFAULT_TECHS_MIN_ENTRIES,
        }
    }
}

const fn at_least(requested: usize, floor: usize) -> usize {
    if requested < floor { floor } else { requested }
}

#[cfg(test)]
mod tests {
    //! Covers rule overrides.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, DEFAULT_PASSWORD_MIN_LENGTH)]
    #[case(5, DEFAULT_PASSWORD_MIN_LENGTH)]
    #[case(6, 6)]
    #[case(12, 12)]
    fn password_limit_never_drops_below_default(#[case] requested: usize, #[case] expected: usize) {
        let rules = ValidationRules::default().with_password_min_length(requested);
        assert_eq!(rules.password_min_length(), expected);
    }

    #[rstest]
    #[case(0, DEFAULT_TECHS_MIN_ENTRIES)]
    #[case(1, 1)]
    #[case(4, 4)]
    fn techs_limit_never_drops_below_default(#[case] requested: usize, #[case] expected: usize) {
        let rules = ValidationRules::default().with_techs_min_entries(requested);
        assert_eq!(rules.techs_min_entries(), expected);
    }
}
