use std::fmt;

use itertools::Itertools;
use model::line::DrawnLine;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::Id;

use crate::error::{NumberingError, Result};

/// The lines to number, in processing order.
///
/// Ids are the 1-based drawing order. A sequence may run backwards, skip
/// lines or name a line more than once; repeated lines are processed again
/// each time.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct SelectionSequence(Vec<Id<DrawnLine>>);

impl SelectionSequence {
    pub fn new(lines: Vec<Id<DrawnLine>>) -> Self {
        Self(lines)
    }

    /// Every line from `start` to `stop`, both inclusive. Counts down when
    /// `start > stop`, so `span(3, 1)` is `[3, 2, 1]`.
    pub fn span(start: usize, stop: usize) -> Self {
        if start <= stop {
            Self((start..=stop).map(Id::new).collect())
        } else {
            Self((stop..=start).rev().map(Id::new).collect())
        }
    }

    /// A span with the first and last drawn line as defaults for missing
    /// bounds. Empty when nothing was drawn and no bound is given.
    ///
    /// Both bounds must name one of the `count` drawn lines.
    pub fn between(
        start: Option<usize>,
        stop: Option<usize>,
        count: usize,
    ) -> Result<Self> {
        if let Some(line) = [start, stop]
            .into_iter()
            .flatten()
            .find(|line| !(1..=count).contains(line))
        {
            return Err(NumberingError::UnknownLine {
                line: Id::new(line),
                available: count,
            });
        }
        if count == 0 {
            return Ok(Self::default());
        }
        Ok(Self::span(start.unwrap_or(1), stop.unwrap_or(count)))
    }

    pub fn iter(&self) -> impl Iterator<Item = Id<DrawnLine>> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<usize> for SelectionSequence {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().map(Id::new).collect())
    }
}

impl fmt::Display for SelectionSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(selection: &SelectionSequence) -> Vec<usize> {
        selection.iter().map(Id::get).collect()
    }

    #[test]
    fn span_forward() {
        assert_eq!(raw(&SelectionSequence::span(1, 3)), [1, 2, 3]);
    }

    #[test]
    fn span_backward() {
        assert_eq!(raw(&SelectionSequence::span(3, 1)), [3, 2, 1]);
    }

    #[test]
    fn span_single_line() {
        assert_eq!(raw(&SelectionSequence::span(2, 2)), [2]);
    }

    fn between(
        start: Option<usize>,
        stop: Option<usize>,
        count: usize,
    ) -> Vec<usize> {
        raw(&SelectionSequence::between(start, stop, count).unwrap())
    }

    #[test]
    fn between_defaults_to_all_lines() {
        assert_eq!(between(None, None, 4), [1, 2, 3, 4]);
        assert_eq!(between(Some(3), None, 4), [3, 4]);
        assert_eq!(between(None, Some(2), 4), [1, 2]);
        assert_eq!(between(Some(4), Some(2), 4), [4, 3, 2]);
    }

    #[test]
    fn nothing_drawn_selects_nothing() {
        assert!(between(None, None, 0).is_empty());
    }

    #[test]
    fn bounds_outside_the_drawn_lines_are_rejected() {
        for (start, stop, line) in [
            (Some(1), Some(usize::MAX), usize::MAX),
            (None, Some(1_000_000_000), 1_000_000_000),
            (Some(0), None, 0),
            (Some(5), Some(1), 5),
        ] {
            let error = SelectionSequence::between(start, stop, 4).unwrap_err();
            assert!(matches!(
                error,
                NumberingError::UnknownLine { available: 4, .. }
            ));
            assert_eq!(error.line(), Some(Id::new(line)));
        }
    }

    #[test]
    fn bounds_without_drawn_lines_are_rejected() {
        let error = SelectionSequence::between(Some(1), None, 0).unwrap_err();
        assert_eq!(error.line(), Some(Id::new(1)));
    }

    #[test]
    fn explicit_sequences_keep_duplicates() {
        let selection = SelectionSequence::from_iter([2, 1, 2]);
        assert_eq!(raw(&selection), [2, 1, 2]);
        assert_eq!(selection.to_string(), "[2, 1, 2]");
    }

    #[test]
    fn deserializes_from_plain_array() {
        let selection: SelectionSequence = serde_json::from_str("[3, 1]").unwrap();
        assert_eq!(raw(&selection), [3, 1]);
    }
}
