use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::Id;

use crate::{
    color::DisplayColor, line::DrawnLine, point::SurveyPoint, Coordinate,
    ExampleData,
};

/// One assignment of a point to a line, carrying its order number.
///
/// A point near several processed lines appears once per line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NumberedPoint {
    pub order: u64,
    pub longitude: f64,
    pub latitude: f64,
    pub point: Id<SurveyPoint>,
    pub line: Id<DrawnLine>,
    /// Arc length from the line start to the point's projection.
    pub along_meters: f64,
    /// Perpendicular distance to the line.
    pub distance_meters: f64,
}

/// Display metadata of a line that contributed at least one point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineRendering {
    pub line: Id<DrawnLine>,
    pub color: DisplayColor,
    pub vertices: Vec<Coordinate>,
    pub length_meters: f64,
    pub matched: usize,
    pub first_order: u64,
    pub last_order: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum NumberingStatus {
    Numbered,
    /// Every processed line yielded zero points within the threshold.
    NoPointsMatched,
    /// The selection sequence did not contain any line.
    EmptySelection,
}

impl NumberingStatus {
    pub fn message(&self) -> &'static str {
        match self {
            NumberingStatus::Numbered => "Points were numbered.",
            NumberingStatus::NoPointsMatched => {
                "No points within threshold for selected lines."
            }
            NumberingStatus::EmptySelection => "No lines were selected.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NumberingResult {
    pub status: NumberingStatus,
    pub points: Vec<NumberedPoint>,
    pub lines: Vec<LineRendering>,
}

impl NumberingResult {
    pub fn empty(status: NumberingStatus) -> Self {
        Self {
            status,
            points: vec![],
            lines: vec![],
        }
    }

    pub fn matched(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl ExampleData for NumberingResult {
    fn example_data() -> Self {
        let line = DrawnLine::example_data();
        Self {
            status: NumberingStatus::Numbered,
            points: vec![NumberedPoint {
                order: 1,
                longitude: 10.1335,
                latitude: 54.3152,
                point: Id::new(0),
                line: Id::new(1),
                along_meters: 38.2,
                distance_meters: 0.4,
            }],
            lines: vec![LineRendering {
                line: Id::new(1),
                color: DisplayColor::Red,
                length_meters: line.length_meters(),
                vertices: line.vertices,
                matched: 1,
                first_order: 1,
                last_order: 1,
            }],
        }
    }
}
