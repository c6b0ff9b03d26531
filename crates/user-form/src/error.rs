//! Error types for form validation and form state.
//!
//! Field-level failures are collected into an [`ErrorTree`] that mirrors the
//! shape of the raw input, so each message can be rendered next to the input
//! it describes. None of these errors are fatal: the caller corrects the
//! input and submits again.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use crate::path::{FieldPath, PathSegment};

/// Failures raised while coercing raw text into a number.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoercionError {
    /// The raw value could not be read as a finite number.
    #[error("'{value}' is not a number")]
    NotANumber {
        /// The raw value as supplied.
        value: String,
    },
    /// The coerced value is smaller than the permitted minimum.
    #[error("{actual} is below the minimum of {min}")]
    BelowMinimum {
        /// Smallest accepted value.
        min: f64,
        /// Value produced by coercion.
        actual: f64,
    },
}

/// Category of a single field failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationErrorKind {
    /// A required value was empty.
    #[error("value is required")]
    Required,
    /// Text was shorter than the permitted minimum.
    #[error("expected at least {min} characters, found {actual}")]
    TooShort {
        /// Minimum number of characters.
        min: usize,
        /// Number of characters supplied.
        actual: usize,
    },
    /// A collection held fewer entries than the permitted minimum.
    #[error("expected at least {min} entries, found {actual}")]
    MinLength {
        /// Minimum number of entries.
        min: usize,
        /// Number of entries supplied.
        actual: usize,
    },
    /// A document value had the wrong JSON type for its field.
    #[error("expected {expected}")]
    InvalidType {
        /// Name of the expected value type.
        expected: &'static str,
    },
    /// A numeric field failed coercion or its minimum-value check.
    #[error(transparent)]
    Coercion(#[from] CoercionError),
}

impl ValidationErrorKind {
    /// Stable machine-readable code for the failure category.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::TooShort { .. } => "too_short",
            Self::MinLength { .. } => "min_length",
            Self::InvalidType { .. } => "invalid_type",
            Self::Coercion(_) => "coercion",
        }
    }
}

/// A failure attached to one node of an [`ErrorTree`].
///
/// The message is the human-readable text shown next to the input; the kind
/// carries the structured reason.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    kind: ValidationErrorKind,
    message: String,
}

impl FieldError {
    /// Pair a failure kind with the message displayed to the user.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Structured failure reason.
    #[must_use]
    pub const fn kind(&self) -> &ValidationErrorKind {
        &self.kind
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("code", self.code())?;
        map.serialize_entry("message", &self.message)?;
        map.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct ErrorNode {
    error: Option<FieldError>,
    children: BTreeMap<PathSegment, ErrorNode>,
}

impl ErrorNode {
    fn descend(&self, segments: &[PathSegment]) -> Option<&Self> {
        match segments.split_first() {
            None => Some(self),
            Some((head, tail)) => self.children.get(head)?.descend(tail),
        }
    }

    fn count(&self) -> usize {
        let own = usize::from(self.error.is_some());
        self.children
            .values()
            .fold(own, |total, child| total + child.count())
    }

    fn collect<'a>(
        &'a self,
        prefix: &mut Vec<PathSegment>,
        out: &mut Vec<(FieldPath, &'a FieldError)>,
    ) {
        if let Some(error) = &self.error {
            out.push((FieldPath::from(prefix.clone()), error));
        }
        for (segment, child) in &self.children {
            prefix.push(segment.clone());
            child.collect(prefix, out);
            prefix.pop();
        }
    }
}

impl Serialize for ErrorNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let own_entries = if self.error.is_some() { 2 } else { 0 };
        let mut map = serializer.serialize_map(Some(own_entries + self.children.len()))?;
        if let Some(error) = &self.error {
            map.serialize_entry("code", error.code())?;
            map.serialize_entry("message", error.message())?;
        }
        for (segment, child) in &self.children {
            map.serialize_entry(&segment.to_string(), child)?;
        }
        map.end()
    }
}

/// Field-level failures arranged in the shape of the raw form input.
///
/// Each node holds at most one [`FieldError`]. Sequence failures (such as an
/// empty list of entries) attach to the sequence node itself, while failures
/// inside an entry attach beneath the entry's index.
///
/// Serialises as nested JSON, for example
/// `{"techs": {"0": {"title": {"code": "required", "message": "..."}}}}`.
///
/// # Examples
///
/// ```
/// use user_form::{ErrorTree, FieldError, FieldPath, ValidationErrorKind};
///
/// let mut errors = ErrorTree::new();
/// let path = FieldPath::field("techs").index(0).child("title");
/// errors.insert(&path, FieldError::new(ValidationErrorKind::Required, "title is required"));
///
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors.message_at(&path), Some("title is required"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorTree {
    root: ErrorNode,
}

impl ErrorTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `error` at `path`.
    ///
    /// A node reports a single message; when one is already present the first
    /// recorded error is kept and `false` is returned.
    pub fn insert(&mut self, path: &FieldPath, error: FieldError) -> bool {
        let node = path
            .segments()
            .iter()
            .fold(&mut self.root, |node, segment| {
                node.children.entry(segment.clone()).or_default()
            });
        if node.error.is_some() {
            return false;
        }
        node.error = Some(error);
        true
    }

    /// Error recorded at exactly `path`, ignoring any descendants.
    #[must_use]
    pub fn get(&self, path: &FieldPath) -> Option<&FieldError> {
        self.root.descend(path.segments())?.error.as_ref()
    }

    /// Message recorded at exactly `path`.
    #[must_use]
    pub fn message_at(&self, path: &FieldPath) -> Option<&str> {
        self.get(path).map(FieldError::message)
    }

    /// Whether `path` or any location beneath it holds an error.
    #[must_use]
    pub fn has_errors_under(&self, path: &FieldPath) -> bool {
        self.root
            .descend(path.segments())
            .is_some_and(|node| node.count() > 0)
    }

    /// Whether `path` or any node above it holds an error.
    #[must_use]
    pub fn covers(&self, path: &FieldPath) -> bool {
        let mut node = &self.root;
        if node.error.is_some() {
            return true;
        }
        for segment in path.segments() {
            let Some(child) = node.children.get(segment) else {
                return false;
            };
            node = child;
            if node.error.is_some() {
                return true;
            }
        }
        false
    }

    /// Copy the errors of `other` that are not already covered here.
    ///
    /// An error recorded at a node hides any error from `other` at or beneath
    /// that node.
    pub fn absorb(&mut self, other: &Self) {
        for (path, error) in other.entries() {
            if !self.covers(&path) {
                self.insert(&path, error.clone());
            }
        }
    }

    /// Total number of recorded errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.root.count()
    }

    /// Whether no errors were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every recorded error with its path, depth first in path order.
    #[must_use]
    pub fn entries(&self) -> Vec<(FieldPath, &FieldError)> {
        let mut out = Vec::new();
        self.root.collect(&mut Vec::new(), &mut out);
        out
    }

    /// Paths of every recorded error, depth first in path order.
    #[must_use]
    pub fn paths(&self) -> Vec<FieldPath> {
        self.entries().into_iter().map(|(path, _)| path).collect()
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries();
        if entries.is_empty() {
            return f.write_str("no validation errors");
        }
        for (position, (path, error)) in entries.iter().enumerate() {
            if position > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{path}: {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorTree {}

impl Serialize for ErrorTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}

/// Errors raised when a state event refers to an entry that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// The index does not address an existing tech entry.
    #[error("tech entry index {index} is out of range for {len} entries")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of entries present.
        len: usize,
    },
}

/// Errors raised while decoding a raw form document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The JSON is malformed or has values of the wrong type.
    #[error("invalid form JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    //! Covers error tree addressing, counting, and serialisation.

    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;

    fn required(message: &str) -> FieldError {
        FieldError::new(ValidationErrorKind::Required, message)
    }

    fn title_path(index: usize) -> FieldPath {
        FieldPath::field("techs").index(index).child("title")
    }

    #[fixture]
    fn tree() -> ErrorTree {
        let mut tree = ErrorTree::new();
        tree.insert(&FieldPath::field("name"), required("name is required"));
        tree.insert(&title_path(2), required("title is required"));
        tree
    }

    #[rstest]
    fn addresses_nested_entries(tree: ErrorTree) {
        assert_eq!(tree.message_at(&title_path(2)), Some("title is required"));
        assert_eq!(tree.message_at(&FieldPath::field("name")), Some("name is required"));
        assert!(tree.get(&FieldPath::field("techs")).is_none());
        assert!(tree.get(&title_path(0)).is_none());
    }

    #[rstest]
    fn counts_every_leaf(tree: ErrorTree) {
        assert_eq!(tree.len(), 2);
        assert!(!tree.is_empty());
        assert!(tree.has_errors_under(&FieldPath::field("techs")));
        assert!(!tree.has_errors_under(&FieldPath::field("email")));
    }

    #[rstest]
    fn keeps_first_error_per_node(mut tree: ErrorTree) {
        let replaced = tree.insert(&FieldPath::field("name"), required("second"));
        assert!(!replaced);
        assert_eq!(tree.message_at(&FieldPath::field("name")), Some("name is required"));
    }

    #[rstest]
    fn lists_paths_in_order(tree: ErrorTree) {
        let paths: Vec<String> = tree.paths().iter().map(ToString::to_string).collect();
        assert_eq!(paths, vec!["name", "techs[2].title"]);
    }

    #[rstest]
    fn displays_path_prefixed_messages(tree: ErrorTree) {
        assert_eq!(
            tree.to_string(),
            "name: name is required; techs[2].title: title is required"
        );
    }

    #[test]
    fn serialises_array_node_errors_beside_indices() {
        let mut tree = ErrorTree::new();
        tree.insert(
            &FieldPath::field("techs"),
            FieldError::new(
                ValidationErrorKind::MinLength { min: 2, actual: 1 },
                "add at least 2 technologies",
            ),
        );
        tree.insert(&title_path(0), required("title is required"));

        let value = serde_json::to_value(&tree).expect("serialise tree");
        assert_eq!(
            value,
            json!({
                "techs": {
                    "code": "min_length",
                    "message": "add at least 2 technologies",
                    "0": {"title": {"code": "required", "message": "title is required"}}
                }
            })
        );
    }

    #[test]
    fn empty_tree_serialises_to_empty_object() {
        let value = serde_json::to_value(ErrorTree::new()).expect("serialise tree");
        assert_eq!(value, json!({}));
    }

    #[rstest]
    #[case(ValidationErrorKind::Required, "required")]
    #[case(ValidationErrorKind::TooShort { min: 6, actual: 5 }, "too_short")]
    #[case(ValidationErrorKind::MinLength { min: 1, actual: 0 }, "min_length")]
    #[case(ValidationErrorKind::InvalidType { expected: "text" }, "invalid_type")]
    #[case(
        ValidationErrorKind::Coercion(CoercionError::NotANumber { value: "x".to_owned() }),
        "coercion"
    )]
    fn kinds_expose_stable_codes(#[case] kind: ValidationErrorKind, #[case] code: &str) {
        assert_eq!(kind.code(), code);
    }

    #[test]
    fn coercion_kind_displays_inner_reason() {
        let kind = ValidationErrorKind::from(CoercionError::BelowMinimum {
            min: 0.0,
            actual: -1.0,
        });
        assert_eq!(kind.to_string(), "-1 is below the minimum of 0");
    }

    #[test]
    fn state_error_formats_correctly() {
        let err = StateError::IndexOutOfRange { index: 3, len: 2 };
        assert_eq!(
            err.to_string(),
            "tech entry index 3 is out of range for 2 entries"
        );
    }

    #[rstest]
    fn covers_paths_beneath_an_error(tree: ErrorTree) {
        assert!(tree.covers(&title_path(2)));
        assert!(tree.covers(&FieldPath::field("name").child("first")));
        assert!(!tree.covers(&FieldPath::field("techs").index(2)));
        assert!(!tree.covers(&FieldPath::field("email")));
    }

    #[rstest]
    fn absorb_skips_errors_hidden_by_an_ancestor(mut tree: ErrorTree) {
        let mut other = ErrorTree::new();
        other.insert(&FieldPath::field("name"), required("other name message"));
        other.insert(&FieldPath::field("email"), required("email is required"));
        other.insert(
            &FieldPath::field("techs").index(2).child("title").child("inner"),
            required("hidden"),
        );

        tree.absorb(&other);

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.message_at(&FieldPath::field("name")), Some("name is required"));
        assert_eq!(
            tree.message_at(&FieldPath::field("email")),
            Some("email is required")
        );
    }
}
