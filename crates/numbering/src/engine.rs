use std::collections::HashSet;

use indexmap::IndexMap;
use itertools::Itertools;
use model::{
    color::DisplayColor,
    line::DrawnLine,
    numbering::{LineRendering, NumberedPoint, NumberingResult, NumberingStatus},
    point::SurveyPoint,
    WithId,
};
use utility::id::Id;

use crate::{
    error::{NumberingError, Result},
    projection::{LinePosition, ProjectedLine, ProjectedPoint, ProjectedPoints},
    selection::SelectionSequence,
};

pub const DEFAULT_THRESHOLD_METERS: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct NumberingConfig {
    /// Maximum perpendicular distance, inclusive. Zero matches only points
    /// exactly on a line; a negative or NaN threshold matches nothing.
    pub threshold_meters: f64,
    pub selection: SelectionSequence,
    /// Order number of the first matched point, at least 1.
    pub initial_counter: u64,
    /// Number a point only on the first line it matches. Off by default: a
    /// point close to several lines gets one number per line.
    pub deduplicate: bool,
}

impl NumberingConfig {
    pub fn new(threshold_meters: f64, selection: SelectionSequence) -> Self {
        Self {
            threshold_meters,
            selection,
            initial_counter: 1,
            deduplicate: false,
        }
    }

    pub fn with_initial_counter(mut self, initial_counter: u64) -> Self {
        self.initial_counter = initial_counter;
        self
    }

    pub fn with_deduplicate(mut self, deduplicate: bool) -> Self {
        self.deduplicate = deduplicate;
        self
    }
}

/// Running state of one numbering run, threaded through the selection.
struct Accumulator {
    counter: u64,
    points: Vec<NumberedPoint>,
    lines: Vec<LineRendering>,
    numbered: HashSet<Id<SurveyPoint>>,
}

/// Numbers `points` along the selected `lines`.
///
/// Lines are processed in selection order. Each one keeps the points within
/// the threshold, sorts them by along-line position (ties by ingestion
/// index) and numbers them continuing from the previous line. Lines without
/// a match consume no numbers. Any geometry error aborts the whole run.
pub fn number_points(
    points: &[WithId<SurveyPoint>],
    lines: &[WithId<DrawnLine>],
    config: &NumberingConfig,
) -> Result<NumberingResult> {
    if config.initial_counter == 0 {
        return Err(NumberingError::ZeroInitialCounter);
    }
    if config.selection.is_empty() {
        log::info!("no lines selected, nothing to number");
        return Ok(NumberingResult::empty(NumberingStatus::EmptySelection));
    }

    let drawn = lines
        .iter()
        .map(|line| (line.id, line))
        .collect::<IndexMap<_, _>>();
    let projected = ProjectedPoints::new(points)?;

    let initial = Accumulator {
        counter: config.initial_counter,
        points: vec![],
        lines: vec![],
        numbered: HashSet::new(),
    };
    let result = config
        .selection
        .iter()
        .zip(DisplayColor::PALETTE.iter().copied().cycle())
        .try_fold(initial, |acc, (line_id, color)| {
            let line = drawn.get(&line_id).ok_or_else(|| {
                NumberingError::UnknownLine {
                    line: line_id,
                    available: drawn.len(),
                }
            })?;
            number_line(acc, &projected, line, color, config)
        })?;

    log::info!(
        "numbered {} points on {} of {} selected lines {}",
        result.points.len(),
        result.lines.len(),
        config.selection.len(),
        config.selection,
    );

    if result.points.is_empty() {
        return Ok(NumberingResult::empty(NumberingStatus::NoPointsMatched));
    }
    Ok(NumberingResult {
        status: NumberingStatus::Numbered,
        points: result.points,
        lines: result.lines,
    })
}

fn number_line(
    mut acc: Accumulator,
    projected: &ProjectedPoints,
    line: &WithId<DrawnLine>,
    color: DisplayColor,
    config: &NumberingConfig,
) -> Result<Accumulator> {
    let planar = ProjectedLine::new(line, &projected.frame())?;
    let selected = matching_points(projected, &planar, config.threshold_meters)
        .filter(|(point, _)| {
            !config.deduplicate || !acc.numbered.contains(&point.id)
        })
        .collect::<Vec<_>>();

    if selected.is_empty() {
        log::debug!(
            "line {}: no points within {} m",
            line.id,
            config.threshold_meters
        );
        return Ok(acc);
    }

    let first_order = acc.counter;
    let next_counter = first_order
        .checked_add(selected.len() as u64)
        .ok_or(NumberingError::CounterOverflow {
            line: line.id,
            counter: first_order,
        })?;
    for (offset, (point, position)) in selected.iter().enumerate() {
        acc.numbered.insert(point.id);
        acc.points.push(NumberedPoint {
            order: first_order + offset as u64,
            longitude: point.point.longitude,
            latitude: point.point.latitude,
            point: point.id,
            line: line.id,
            along_meters: position.along,
            distance_meters: position.distance,
        });
    }
    acc.counter = next_counter;
    let last_order = next_counter - 1;

    log::debug!(
        "line {} ({}): {} points, orders {}..={}",
        line.id,
        color,
        selected.len(),
        first_order,
        last_order,
    );

    acc.lines.push(LineRendering {
        line: line.id,
        color,
        vertices: line.content.vertices.clone(),
        length_meters: line.content.length_meters(),
        matched: selected.len(),
        first_order,
        last_order,
    });
    Ok(acc)
}

/// Points within `threshold` of `line`, ascending by along-line position.
/// Equal positions keep ingestion order.
fn matching_points<'a>(
    projected: &'a ProjectedPoints,
    line: &'a ProjectedLine,
    threshold: f64,
) -> impl Iterator<Item = (&'a ProjectedPoint, LinePosition)> + 'a {
    projected
        .iter()
        .map(move |point| (point, line.locate(point.position)))
        .filter(move |(_, position)| position.distance <= threshold)
        .sorted_by(|(a, a_position), (b, b_position)| {
            a_position
                .along
                .total_cmp(&b_position.along)
                .then_with(|| a.id.cmp(&b.id))
        })
}
