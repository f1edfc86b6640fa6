use std::fmt;

use model::line::DrawnLine;
use thiserror::Error;
use utility::id::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCollection {
    Points,
    Lines,
}

impl fmt::Display for InputCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputCollection::Points => f.write_str("points"),
            InputCollection::Lines => f.write_str("lines"),
        }
    }
}

#[derive(Debug, Error)]
pub enum NumberingError {
    /// A feature of an uploaded collection has the wrong geometry type or
    /// unusable coordinates.
    #[error("invalid input geometry in {collection} feature {feature}: {reason}")]
    InvalidInputGeometry {
        collection: InputCollection,
        feature: usize,
        reason: String,
    },

    #[error("invalid geometry of line {line}: {reason}")]
    InvalidGeometry { line: Id<DrawnLine>, reason: String },

    #[error("line {line} was selected, but only {available} lines were drawn")]
    UnknownLine { line: Id<DrawnLine>, available: usize },

    #[error("order numbers start at 1, not 0")]
    ZeroInitialCounter,

    /// Numbering the points of `line` would run past the largest order
    /// number.
    #[error("order numbers overflow on line {line} after {counter}")]
    CounterOverflow { line: Id<DrawnLine>, counter: u64 },

    #[error("invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl NumberingError {
    pub(crate) fn invalid_point(feature: usize, reason: impl Into<String>) -> Self {
        Self::InvalidInputGeometry {
            collection: InputCollection::Points,
            feature,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_line_feature(
        feature: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidInputGeometry {
            collection: InputCollection::Lines,
            feature,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_line(line: Id<DrawnLine>, reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            line,
            reason: reason.into(),
        }
    }

    /// The line a failure is attributed to, if any.
    pub fn line(&self) -> Option<Id<DrawnLine>> {
        match self {
            Self::InvalidGeometry { line, .. }
            | Self::UnknownLine { line, .. }
            | Self::CounterOverflow { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, NumberingError>;
