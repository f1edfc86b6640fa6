use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::{Coordinate, ExampleData, WithId};

/// An uploaded point. Its id is the 0-based position in the uploaded
/// collection and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SurveyPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl SurveyPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.longitude, self.latitude)
    }
}

impl HasId for SurveyPoint {
    type IdType = usize;
}

impl ExampleData for SurveyPoint {
    fn example_data() -> Self {
        Self::new(10.1335, 54.3152)
    }
}

/// Tags points with their ingestion index.
pub fn index_points<I>(points: I) -> Vec<WithId<SurveyPoint>>
where
    I: IntoIterator<Item = SurveyPoint>,
{
    points
        .into_iter()
        .enumerate()
        .map(|(index, point)| WithId::new(Id::new(index), point))
        .collect()
}
