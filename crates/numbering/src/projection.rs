use model::{line::DrawnLine, point::SurveyPoint, WithId};
use utility::{geo::MercatorFrame, id::Id};

use crate::error::{NumberingError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Planar {
    pub x: f64,
    pub y: f64,
}

impl Planar {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance(self, other: Planar) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Where a point lies relative to a line, in planar meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePosition {
    /// Arc length from the first vertex to the nearest point on the line.
    pub along: f64,
    /// Distance to the nearest point on the line.
    pub distance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub id: Id<SurveyPoint>,
    pub position: Planar,
    pub point: SurveyPoint,
}

/// Planar coordinates of a whole point set, computed once per numbering run.
#[derive(Debug, Clone)]
pub struct ProjectedPoints {
    frame: MercatorFrame,
    points: Vec<ProjectedPoint>,
}

impl ProjectedPoints {
    /// Projects into a frame with true scale at the mean latitude of the
    /// points.
    pub fn new(points: &[WithId<SurveyPoint>]) -> Result<Self> {
        let frame = MercatorFrame::centered_on(
            points
                .iter()
                .map(|point| point.content.latitude)
                .filter(|latitude| latitude.is_finite()),
        );
        Self::with_frame(points, frame)
    }

    pub fn with_frame(
        points: &[WithId<SurveyPoint>],
        frame: MercatorFrame,
    ) -> Result<Self> {
        let points = points
            .iter()
            .map(|point| {
                if !point.content.coordinate().is_finite() {
                    return Err(NumberingError::invalid_point(
                        point.id.get(),
                        "coordinates must be finite numbers",
                    ));
                }
                let (x, y) =
                    frame.project(point.content.longitude, point.content.latitude);
                Ok(ProjectedPoint {
                    id: point.id,
                    position: Planar::new(x, y),
                    point: point.content,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { frame, points })
    }

    pub fn frame(&self) -> MercatorFrame {
        self.frame
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProjectedPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A drawn line in planar coordinates, with the arc length at every vertex.
#[derive(Debug, Clone)]
pub struct ProjectedLine {
    id: Id<DrawnLine>,
    vertices: Vec<Planar>,
    arc_lengths: Vec<f64>,
}

impl ProjectedLine {
    pub fn new(line: &WithId<DrawnLine>, frame: &MercatorFrame) -> Result<Self> {
        if let Some(index) = line
            .content
            .vertices
            .iter()
            .position(|vertex| !vertex.is_finite())
        {
            return Err(NumberingError::invalid_line(
                line.id,
                format!("vertex {} has non-finite coordinates", index),
            ));
        }
        let vertices = line
            .content
            .vertices
            .iter()
            .map(|vertex| {
                let (x, y) = frame.project(vertex.longitude, vertex.latitude);
                Planar::new(x, y)
            })
            .collect();
        Self::from_planar(line.id, vertices)
    }

    pub fn from_planar(id: Id<DrawnLine>, vertices: Vec<Planar>) -> Result<Self> {
        if vertices.len() < 2 {
            return Err(NumberingError::invalid_line(
                id,
                format!("a line needs at least 2 vertices, got {}", vertices.len()),
            ));
        }
        let mut arc_lengths = Vec::with_capacity(vertices.len());
        let mut total = 0.0;
        arc_lengths.push(total);
        for pair in vertices.windows(2) {
            total += pair[0].distance(pair[1]);
            arc_lengths.push(total);
        }
        Ok(Self {
            id,
            vertices,
            arc_lengths,
        })
    }

    pub fn id(&self) -> Id<DrawnLine> {
        self.id
    }

    pub fn length(&self) -> f64 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Nearest point on the segment chain. Of several equally near
    /// segments the earliest one wins.
    pub fn locate(&self, point: Planar) -> LinePosition {
        let mut best = LinePosition {
            along: 0.0,
            distance: f64::INFINITY,
        };
        for (index, pair) in self.vertices.windows(2).enumerate() {
            let (start, end) = (pair[0], pair[1]);
            let (dx, dy) = (end.x - start.x, end.y - start.y);
            let length_squared = dx * dx + dy * dy;
            let t = if length_squared == 0.0 {
                0.0
            } else {
                let dot = (point.x - start.x) * dx + (point.y - start.y) * dy;
                (dot / length_squared).clamp(0.0, 1.0)
            };
            let foot = Planar::new(start.x + t * dx, start.y + t * dy);
            let distance = point.distance(foot);
            if distance < best.distance {
                best = LinePosition {
                    along: self.arc_lengths[index] + t * length_squared.sqrt(),
                    distance,
                };
            }
        }
        best
    }
}
