use std::path::PathBuf;

use clap::Parser;
use numbering::{
    engine::DEFAULT_THRESHOLD_METERS, NumberingConfig, Result, SelectionSequence,
};

/// Numbers survey points along drawn lines and writes them as GeoJSON.
#[derive(Debug, Parser)]
#[command(name = "along-number", version)]
pub struct Command {
    /// GeoJSON FeatureCollection of Point features.
    #[arg(long)]
    pub points: PathBuf,

    /// GeoJSON FeatureCollection of LineString features, numbered from 1 in
    /// file order.
    #[arg(long)]
    pub lines: PathBuf,

    /// Maximum distance in meters between a point and a line.
    #[arg(long, default_value_t = DEFAULT_THRESHOLD_METERS)]
    pub threshold: f64,

    /// First line of the range. Defaults to the first line.
    #[arg(long, conflicts_with = "selection")]
    pub start: Option<usize>,

    /// Last line of the range. Defaults to the last line.
    #[arg(long, conflicts_with = "selection")]
    pub stop: Option<usize>,

    /// Explicit line order, e.g. `3,1,2`.
    #[arg(long, value_delimiter = ',')]
    pub selection: Option<Vec<usize>>,

    /// Output file. Writes to stdout when omitted.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Also write the contributing lines with their display colors.
    #[arg(long)]
    pub rendering: Option<PathBuf>,

    /// Order number of the first matched point.
    #[arg(
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub initial_counter: u64,

    /// Number each point only on the first line it matches.
    #[arg(long)]
    pub deduplicate: bool,
}

impl Command {
    /// Fails when `--start` or `--stop` names a line that was not drawn.
    pub fn numbering_config(&self, line_count: usize) -> Result<NumberingConfig> {
        let selection = match &self.selection {
            Some(lines) => lines.iter().copied().collect(),
            None => {
                SelectionSequence::between(self.start, self.stop, line_count)?
            }
        };
        Ok(NumberingConfig::new(self.threshold, selection)
            .with_initial_counter(self.initial_counter)
            .with_deduplicate(self.deduplicate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Command {
        let base = [
            "along-number",
            "--points",
            "p.geojson",
            "--lines",
            "l.geojson",
        ];
        Command::try_parse_from(base.iter().chain(args)).unwrap()
    }

    #[test]
    fn defaults_cover_every_line() {
        let command = parse(&[]);
        let config = command.numbering_config(3).unwrap();
        assert_eq!(config.threshold_meters, 1.0);
        assert_eq!(config.selection.to_string(), "[1, 2, 3]");
        assert_eq!(config.initial_counter, 1);
        assert!(!config.deduplicate);
        assert!(command.output.is_none());
        assert!(command.rendering.is_none());
    }

    #[test]
    fn range_counts_down() {
        let config = parse(&["--start", "3", "--stop", "1"])
            .numbering_config(4)
            .unwrap();
        assert_eq!(config.selection.to_string(), "[3, 2, 1]");
    }

    #[test]
    fn open_range_runs_to_the_last_line() {
        let config = parse(&["--start", "2"]).numbering_config(4).unwrap();
        assert_eq!(config.selection.to_string(), "[2, 3, 4]");
    }

    #[test]
    fn explicit_selection_keeps_order_and_repeats() {
        let config = parse(&["--selection", "3,1,3", "--threshold", "2.5"])
            .numbering_config(3)
            .unwrap();
        assert_eq!(config.selection.to_string(), "[3, 1, 3]");
        assert_eq!(config.threshold_meters, 2.5);
    }

    #[test]
    fn selection_conflicts_with_range() {
        let result = Command::try_parse_from([
            "along-number",
            "--points",
            "p.geojson",
            "--lines",
            "l.geojson",
            "--start",
            "1",
            "--selection",
            "2,1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn stop_beyond_the_drawn_lines_is_rejected() {
        let command = parse(&["--stop", "18446744073709551615"]);
        let error = command.numbering_config(2).unwrap_err();
        assert_eq!(error.line().map(|line| line.get()), Some(usize::MAX));

        let command = parse(&["--start", "3"]);
        assert!(command.numbering_config(2).is_err());
    }

    #[test]
    fn zero_initial_counter_is_rejected() {
        let result = Command::try_parse_from([
            "along-number",
            "--points",
            "p.geojson",
            "--lines",
            "l.geojson",
            "--initial-counter",
            "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn numbering_options() {
        let config = parse(&["--initial-counter", "100", "--deduplicate"])
            .numbering_config(1)
            .unwrap();
        assert_eq!(config.initial_counter, 100);
        assert!(config.deduplicate);
    }
}
