use std::{fs, path::Path};

use anyhow::Context;
use clap::Parser;
use numbering::{geojson, number_points};

mod cli;

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();
    let command = cli::Command::parse();

    let points = geojson::parse_points(&read(&command.points)?)
        .with_context(|| format!("invalid points in {}", command.points.display()))?;
    let lines = geojson::parse_lines(&read(&command.lines)?)
        .with_context(|| format!("invalid lines in {}", command.lines.display()))?;
    log::info!("read {} points and {} lines", points.len(), lines.len());

    let config = command.numbering_config(lines.len())?;
    let result = number_points(&points, &lines, &config)?;
    if result.is_empty() {
        log::info!("{} Nothing to export.", result.status.message());
        return Ok(());
    }
    for point in &result.points {
        log::info!(
            "#{} point {} on line {} ({:.2} m along, {:.2} m off)",
            point.order,
            point.point,
            point.line,
            point.along_meters,
            point.distance_meters
        );
    }

    if let Some(path) = &command.rendering {
        let rendering = serde_json::to_string(&geojson::rendering(&result))?;
        fs::write(path, rendering)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    let exported = geojson::export_string(&result)?;
    match &command.output {
        Some(path) => {
            fs::write(path, exported)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!(
                "wrote {} numbered points to {}",
                result.matched(),
                path.display()
            );
        }
        None => println!("{}", exported),
    }
    Ok(())
}
