//! The subset of GeoJSON (RFC 7946) read and written by the numbering tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Coordinate, ExampleData};

/// `[longitude, latitude]` with an optional altitude, which is ignored.
pub type Position = Vec<f64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        coordinates: Position,
    },
    MultiPoint {
        coordinates: Vec<Position>,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    GeometryCollection {
        geometries: Vec<Geometry>,
    },
}

impl Geometry {
    pub fn point(coordinate: Coordinate) -> Self {
        Geometry::Point {
            coordinates: vec![coordinate.longitude, coordinate.latitude],
        }
    }

    pub fn line_string(coordinates: &[Coordinate]) -> Self {
        Geometry::LineString {
            coordinates: coordinates
                .iter()
                .map(|c| vec![c.longitude, c.latitude])
                .collect(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point { .. } => "Point",
            Geometry::MultiPoint { .. } => "MultiPoint",
            Geometry::LineString { .. } => "LineString",
            Geometry::MultiLineString { .. } => "MultiLineString",
            Geometry::Polygon { .. } => "Polygon",
            Geometry::MultiPolygon { .. } => "MultiPolygon",
            Geometry::GeometryCollection { .. } => "GeometryCollection",
        }
    }
}

/// Reads the horizontal part of a position.
pub fn coordinate(position: &[f64]) -> Option<Coordinate> {
    match position {
        [longitude, latitude, ..] => Some(Coordinate::new(*longitude, *latitude)),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FeatureType {
    Feature,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: FeatureType,
    pub id: Option<Value>,
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

impl Feature {
    pub fn new(geometry: Geometry, properties: Map<String, Value>) -> Self {
        Self {
            kind: FeatureType::Feature,
            id: None,
            geometry: Some(geometry),
            properties: Some(properties),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FeatureCollectionType {
    FeatureCollection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: FeatureCollectionType,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: FeatureCollectionType::FeatureCollection,
            features,
        }
    }
}

impl ExampleData for FeatureCollection {
    fn example_data() -> Self {
        Self::new(vec![Feature::new(
            Geometry::point(Coordinate::new(10.1335, 54.3152)),
            Map::new(),
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_drawing_tool_export() {
        let collection: FeatureCollection = serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[10.0, 54.0], [10.1, 54.1, 3.5]]
                }
            }]
        }))
        .unwrap();
        let Some(Geometry::LineString { coordinates }) =
            &collection.features[0].geometry
        else {
            panic!("expected a line string");
        };
        assert_eq!(coordinate(&coordinates[1]), Some(Coordinate::new(10.1, 54.1)));
    }

    #[test]
    fn null_properties_are_accepted() {
        let feature: Feature = serde_json::from_value(json!({
            "type": "Feature",
            "properties": null,
            "geometry": { "type": "Point", "coordinates": [1.0, 2.0] }
        }))
        .unwrap();
        assert_eq!(feature.properties, None);
        assert_eq!(feature.geometry.unwrap().type_name(), "Point");
    }

    #[test]
    fn point_serializes_as_geojson() {
        let feature =
            Feature::new(Geometry::point(Coordinate::new(1.0, 2.0)), Map::new());
        assert_eq!(
            serde_json::to_value(&feature).unwrap(),
            json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [1.0, 2.0] },
                "properties": {}
            })
        );
    }

    #[test]
    fn short_position_has_no_coordinate() {
        assert_eq!(coordinate(&[1.0]), None);
    }
}
