use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::{
    geo::haversine_distance,
    id::{HasId, Id},
};

use crate::{Coordinate, ExampleData, WithId};

/// A reference polyline drawn by the user. Its id is the 1-based drawing
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DrawnLine {
    pub vertices: Vec<Coordinate>,
}

impl DrawnLine {
    pub fn new(vertices: Vec<Coordinate>) -> Self {
        Self { vertices }
    }

    /// Geodesic length in meters.
    pub fn length_meters(&self) -> f64 {
        self.vertices
            .windows(2)
            .map(|pair| {
                haversine_distance(
                    pair[0].latitude,
                    pair[0].longitude,
                    pair[1].latitude,
                    pair[1].longitude,
                ) * 1000.0
            })
            .sum()
    }
}

impl HasId for DrawnLine {
    type IdType = usize;
}

impl ExampleData for DrawnLine {
    fn example_data() -> Self {
        Self::new(vec![
            Coordinate::new(10.1330, 54.3150),
            Coordinate::new(10.1340, 54.3155),
        ])
    }
}

/// Tags lines with their 1-based drawing order.
pub fn number_lines<I>(lines: I) -> Vec<WithId<DrawnLine>>
where
    I: IntoIterator<Item = DrawnLine>,
{
    lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| WithId::new(Id::new(index + 1), line))
        .collect()
}
