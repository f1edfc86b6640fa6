//! Reading uploaded point and line collections, writing numbered points.

use model::{
    geojson::{self, Feature, FeatureCollection, Geometry},
    line::{number_lines, DrawnLine},
    numbering::NumberingResult,
    point::{index_points, SurveyPoint},
    Coordinate, WithId,
};
use serde_json::{json, Map, Value};

use crate::error::{NumberingError, Result};

/// Media type of exported collections.
pub const GEOJSON_MEDIA_TYPE: &str = "application/geo+json";

pub const EXPORT_FILE_NAME: &str = "numbered_points.geojson";

/// Every feature must be a `Point`; feature order becomes the ingestion
/// index.
pub fn read_points(collection: &FeatureCollection) -> Result<Vec<WithId<SurveyPoint>>> {
    let points = collection
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| match &feature.geometry {
            Some(Geometry::Point { coordinates }) => geojson::coordinate(coordinates)
                .map(|c| SurveyPoint::new(c.longitude, c.latitude))
                .ok_or_else(|| {
                    NumberingError::invalid_point(index, "a position needs two numbers")
                }),
            Some(other) => Err(NumberingError::invalid_point(
                index,
                format!("expected a Point geometry, found {}", other.type_name()),
            )),
            None => Err(NumberingError::invalid_point(index, "feature has no geometry")),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(index_points(points))
}

/// Every feature must be a `LineString`; feature order becomes the 1-based
/// line id. Vertex counts are validated when a line is numbered.
pub fn read_lines(collection: &FeatureCollection) -> Result<Vec<WithId<DrawnLine>>> {
    let lines = collection
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| match &feature.geometry {
            Some(Geometry::LineString { coordinates }) => coordinates
                .iter()
                .map(|position| geojson::coordinate(position))
                .collect::<Option<Vec<Coordinate>>>()
                .map(DrawnLine::new)
                .ok_or_else(|| {
                    NumberingError::invalid_line_feature(
                        index,
                        "a position needs two numbers",
                    )
                }),
            Some(other) => Err(NumberingError::invalid_line_feature(
                index,
                format!("expected a LineString geometry, found {}", other.type_name()),
            )),
            None => Err(NumberingError::invalid_line_feature(
                index,
                "feature has no geometry",
            )),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(number_lines(lines))
}

pub fn parse_points(text: &str) -> Result<Vec<WithId<SurveyPoint>>> {
    read_points(&serde_json::from_str(text)?)
}

pub fn parse_lines(text: &str) -> Result<Vec<WithId<DrawnLine>>> {
    read_lines(&serde_json::from_str(text)?)
}

/// One `Point` feature per numbered point, in output order, with the
/// properties `order`, `lon` and `lat`.
pub fn export(result: &NumberingResult) -> FeatureCollection {
    FeatureCollection::new(
        result
            .points
            .iter()
            .map(|point| {
                let mut properties = Map::new();
                properties.insert("order".to_owned(), json!(point.order));
                properties.insert("lon".to_owned(), json!(point.longitude));
                properties.insert("lat".to_owned(), json!(point.latitude));
                Feature::new(
                    Geometry::point(Coordinate::new(point.longitude, point.latitude)),
                    properties,
                )
            })
            .collect(),
    )
}

pub fn export_string(result: &NumberingResult) -> Result<String> {
    Ok(serde_json::to_string(&export(result))?)
}

/// The processed lines as `LineString` features with their display color,
/// for drawing the numbering on a map.
pub fn rendering(result: &NumberingResult) -> FeatureCollection {
    FeatureCollection::new(
        result
            .lines
            .iter()
            .map(|line| {
                let mut properties = Map::new();
                properties.insert("line".to_owned(), json!(line.line));
                properties.insert("color".to_owned(), Value::from(line.color.name()));
                properties.insert("firstOrder".to_owned(), json!(line.first_order));
                properties.insert("lastOrder".to_owned(), json!(line.last_order));
                Feature::new(Geometry::line_string(&line.vertices), properties)
            })
            .collect(),
    )
}
