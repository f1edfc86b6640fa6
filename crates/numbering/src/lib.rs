//! Continuous numbering of points along user-drawn reference lines.
//!
//! Points are projected onto each selected line in a metric plane, kept when
//! they lie within a distance threshold, ordered by their position along the
//! line and numbered with one counter that runs across all selected lines.

pub use engine::{number_points, NumberingConfig};
pub use error::{InputCollection, NumberingError, Result};
pub use projection::{LinePosition, Planar, ProjectedLine, ProjectedPoints};
pub use selection::SelectionSequence;

pub mod engine;
pub mod error;
pub mod geojson;
pub mod projection;
pub mod selection;
