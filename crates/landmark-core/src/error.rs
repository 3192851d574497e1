//! Structured validation failures.
//!
//! A rejection is a list of [`ValidationError`]s, each pairing a path from
//! the document root with the reason that location did not conform. Errors
//! are plain values passed back up through the composing validators; nothing
//! is thrown and nothing is retried.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// One step on the way from the document root to a failure site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// An object key.
    Key(String),
    /// An array index.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// The keys and indices descending from the document root to the value a
/// validator rejected, e.g. `/features/0/geometry/coordinates/1`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct InstancePath(Vec<PathSegment>);

impl InstancePath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// The segments of this path, outermost first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    fn prepend(&mut self, segment: PathSegment) {
        self.0.insert(0, segment);
    }
}

impl fmt::Display for InstancePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.0 {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for InstancePath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Why a validator rejected a value.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorKind {
    /// A literal tag field held the wrong constant.
    #[error("expected tag \"{expected}\", found \"{found}\"")]
    TagMismatch { expected: String, found: String },

    /// A value of the wrong structural kind, or a tuple of the wrong arity.
    #[error("expected {expected}, found {found}")]
    ShapeMismatch { expected: String, found: String },

    /// A non-empty array constraint received zero elements.
    #[error("expected {expected}, found an empty array")]
    EmptinessViolation { expected: String },

    /// A required key was absent. A key that is present with value `null` is
    /// not missing; the two cases are distinguished by presence, never by
    /// truthiness.
    #[error("missing required field \"{field}\"")]
    MissingField { field: String },

    /// Every alternative of a union rejected the value. The alternatives'
    /// own rejections are kept for diagnostics, with paths rooted at the
    /// same document root as the enclosing error.
    #[error("no alternative of {name} matched ({} rejections)", .alternatives.len())]
    NoMatch {
        name: String,
        alternatives: Vec<ValidationError>,
    },
}

/// A single structured rejection: where in the document, and why.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{kind} at {path}")]
pub struct ValidationError {
    /// Path from the document root to the rejected value.
    pub path: InstancePath,

    /// The reason the value was rejected.
    #[serde(flatten)]
    pub kind: ErrorKind,
}

impl ValidationError {
    /// An error at the value currently being validated.
    pub(crate) fn here(kind: ErrorKind) -> Self {
        Self {
            path: InstancePath::root(),
            kind,
        }
    }

    /// An error at `segment` below the value currently being validated.
    pub(crate) fn at(segment: impl Into<PathSegment>, kind: ErrorKind) -> Self {
        Self {
            path: InstancePath(vec![segment.into()]),
            kind,
        }
    }

    fn prefix(&mut self, segment: &PathSegment) {
        self.path.prepend(segment.clone());
        if let ErrorKind::NoMatch { alternatives, .. } = &mut self.kind {
            for alternative in alternatives {
                alternative.prefix(segment);
            }
        }
    }
}

/// The outcome of a validation: the precisely-typed value, or the list of
/// rejections explaining why the document does not conform.
pub type Validated<T> = Result<T, Vec<ValidationError>>;

/// Prefix every error (including aggregated union alternatives) with
/// `segment`, as a failure bubbles out of a nested value.
pub(crate) fn nested(
    segment: impl Into<PathSegment>,
    mut errors: Vec<ValidationError>,
) -> Vec<ValidationError> {
    let segment = segment.into();
    for error in &mut errors {
        error.prefix(&segment);
    }
    errors
}

/// Flatten a rejection list down to its leaf errors, descending through
/// union aggregates. Useful for compact reports.
pub fn leaves(errors: &[ValidationError]) -> Vec<&ValidationError> {
    let mut out = Vec::new();
    for error in errors {
        collect_leaves(error, &mut out);
    }
    out
}

fn collect_leaves<'a>(error: &'a ValidationError, out: &mut Vec<&'a ValidationError>) {
    match &error.kind {
        ErrorKind::NoMatch { alternatives, .. } if !alternatives.is_empty() => {
            for alternative in alternatives {
                collect_leaves(alternative, out);
            }
        }
        _ => out.push(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_display() {
        let path: InstancePath = ["features", "0", "properties"]
            .iter()
            .map(|s| match s.parse::<usize>() {
                Ok(i) => PathSegment::Index(i),
                Err(_) => PathSegment::Key(s.to_string()),
            })
            .collect();
        assert_eq!(path.to_string(), "/features/0/properties");
        assert_eq!(InstancePath::root().to_string(), "/");
    }

    #[test]
    fn test_nested_prefixes_every_error() {
        let errors = vec![
            ValidationError::here(ErrorKind::EmptinessViolation {
                expected: "a non-empty array".to_string(),
            }),
            ValidationError::at(
                "type",
                ErrorKind::TagMismatch {
                    expected: "Point".to_string(),
                    found: "Dot".to_string(),
                },
            ),
        ];
        let errors = nested("geometry", errors);
        assert_eq!(errors[0].path.to_string(), "/geometry");
        assert_eq!(errors[1].path.to_string(), "/geometry/type");
    }

    #[test]
    fn test_nested_reaches_union_alternatives() {
        let inner = ValidationError::at(
            "type",
            ErrorKind::TagMismatch {
                expected: "Point".to_string(),
                found: "Feature".to_string(),
            },
        );
        let union = ValidationError::here(ErrorKind::NoMatch {
            name: "a geometry".to_string(),
            alternatives: vec![inner],
        });
        let errors = nested("geometry", vec![union]);
        let flat = leaves(&errors);
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].path.to_string(), "/geometry/type");
    }

    #[test]
    fn test_error_display_mirrors_report_format() {
        let error = ValidationError::at(
            "properties",
            ErrorKind::MissingField {
                field: "properties".to_string(),
            },
        );
        assert_eq!(
            error.to_string(),
            "missing required field \"properties\" at /properties"
        );
    }

    #[test]
    fn test_errors_serialize_for_machine_reports() {
        let error = ValidationError::at(
            "coordinates",
            ErrorKind::ShapeMismatch {
                expected: "an array".to_string(),
                found: "a string".to_string(),
            },
        );
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["path"], serde_json::json!(["coordinates"]));
        assert_eq!(json["kind"], "shape_mismatch");
        assert_eq!(json["expected"], "an array");
    }
}
