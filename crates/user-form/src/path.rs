//! Field addressing for raw inputs and error trees.
//!
//! A [`FieldPath`] locates a value inside a form document. Paths render in the
//! bracketed form `techs[2].title` and parse from either that form or the
//! dotted form `techs.2.title` used by form bindings.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// One step in a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathSegment {
    /// A named field of a record.
    Field(String),
    /// A zero-based position within a sequence.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Errors raised when parsing a textual field path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathParseError {
    /// A dot-separated part had no field name.
    #[error("field path '{path}' contains an empty segment")]
    EmptySegment {
        /// The path being parsed.
        path: String,
    },
    /// An opening bracket was never closed.
    #[error("field path '{path}' has an unclosed '['")]
    UnclosedBracket {
        /// The path being parsed.
        path: String,
    },
    /// A bracketed index was not a non-negative integer.
    #[error("field path '{path}' has an invalid index '{value}'")]
    InvalidIndex {
        /// The path being parsed.
        path: String,
        /// The text found between the brackets.
        value: String,
    },
    /// Text followed a closing bracket without a separator.
    #[error("field path '{path}' has unexpected text '{value}'")]
    UnexpectedText {
        /// The path being parsed.
        path: String,
        /// The trailing text that could not be parsed.
        value: String,
    },
}

/// Location of a value inside a form document.
///
/// # Examples
///
/// ```
/// use user_form::FieldPath;
///
/// let path = FieldPath::field("techs").index(2).child("title");
/// assert_eq!(path.to_string(), "techs[2].title");
///
/// let parsed: FieldPath = "techs.2.title".parse().expect("valid path");
/// assert_eq!(parsed, path);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The empty path addressing the whole document.
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// A single-segment path naming a top-level field.
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self(vec![PathSegment::Field(name.into())])
    }

    /// Extend the path with a named field.
    #[must_use]
    pub fn child(mut self, name: impl Into<String>) -> Self {
        self.0.push(PathSegment::Field(name.into()));
        self
    }

    /// Extend the path with a sequence index.
    #[must_use]
    pub fn index(mut self, index: usize) -> Self {
        self.0.push(PathSegment::Index(index));
        self
    }

    /// Segments from outermost to innermost.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Whether this path addresses the whole document.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<PathSegment>> for FieldPath {
    fn from(value: Vec<PathSegment>) -> Self {
        Self(value)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if position == 0 => f.write_str(name)?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = PathParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.is_empty() {
            return Ok(Self::root());
        }

        let mut segments = Vec::new();
        for part in raw.split('.') {
            parse_part(raw, part, &mut segments)?;
        }
        Ok(Self(segments))
    }
}

fn parse_part(
    path: &str,
    part: &str,
    segments: &mut Vec<PathSegment>,
) -> Result<(), PathParseError> {
    // Dotted bindings address sequence positions as bare numbers.
    if !part.is_empty() && part.bytes().all(|byte| byte.is_ascii_digit()) {
        segments.push(PathSegment::Index(parse_index(path, part)?));
        return Ok(());
    }

    let (name, mut rest) = part
        .find('[')
        .map_or((part, ""), |position| part.split_at(position));
    if name.is_empty() || name.contains(']') {
        return Err(PathParseError::EmptySegment {
            path: path.to_owned(),
        });
    }
    segments.push(PathSegment::Field(name.to_owned()));

    while !rest.is_empty() {
        let Some(open) = rest.strip_prefix('[') else {
            return Err(PathParseError::UnexpectedText {
                path: path.to_owned(),
                value: rest.to_owned(),
            });
        };
        let Some((inner, tail)) = open.split_once(']') else {
            return Err(PathParseError::UnclosedBracket {
                path: path.to_owned(),
            });
        };
        segments.push(PathSegment::Index(parse_index(path, inner)?));
        rest = tail;
    }
    Ok(())
}

fn parse_index(path: &str, value: &str) -> Result<usize, PathParseError> {
    value
        .parse::<usize>()
        .map_err(|_| PathParseError::InvalidIndex {
            path: path.to_owned(),
            value: value.to_owned(),
        })
}
