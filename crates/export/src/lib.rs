//! Export helpers for CSV and JSON orbit-path artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use neo_orbits::{CartesianPosition, OrbitPath};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] io::Error),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output encodings understood by [`write_path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

/// One CSV row per sample, matching the header `index,jd,x_au,y_au,z_au,r_au`.
#[derive(Debug, Clone, Serialize)]
pub struct PathRecord {
    pub index: usize,
    pub jd: f64,
    pub x_au: f64,
    pub y_au: f64,
    pub z_au: f64,
    pub r_au: f64,
}

impl PathRecord {
    fn new(index: usize, jd: f64, position: &CartesianPosition) -> Self {
        Self {
            index,
            jd,
            x_au: position.x,
            y_au: position.y,
            z_au: position.z,
            r_au: position.norm(),
        }
    }
}

/// Rows for a sampled path in chronological order.
pub fn path_records(path: &OrbitPath) -> Vec<PathRecord> {
    path.iter_with_epochs()
        .enumerate()
        .map(|(index, (jd, position))| PathRecord::new(index, jd, position))
        .collect()
}

/// Write a sampled path as CSV (header included, even for empty paths).
pub fn write_csv<W: Write>(writer: W, path: &OrbitPath) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if path.is_empty() {
        csv_writer.write_record(["index", "jd", "x_au", "y_au", "z_au", "r_au"])?;
    }
    for record in path_records(path) {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct PathDocument<'a> {
    object: Option<&'a str>,
    frame: &'static str,
    units: &'static str,
    start_jd: f64,
    step_days: f64,
    samples: Vec<PathRecord>,
}

/// Write a sampled path as a pretty-printed JSON document.
pub fn write_json<W: Write>(
    writer: W,
    object: Option<&str>,
    path: &OrbitPath,
) -> Result<(), ExportError> {
    let document = PathDocument {
        object,
        frame: "heliocentric-ecliptic",
        units: "AU",
        start_jd: path.start_jd(),
        step_days: path.step_days(),
        samples: path_records(path),
    };
    serde_json::to_writer_pretty(writer, &document)?;
    Ok(())
}

/// Write a sampled path to `output` (`-` for stdout) in the chosen format.
pub fn write_path(
    output: &Path,
    format: Format,
    object: Option<&str>,
    path: &OrbitPath,
) -> Result<(), ExportError> {
    let mut writer = writer_for_path(output)?;
    match format {
        Format::Csv => write_csv(&mut writer, path)?,
        Format::Json => {
            write_json(&mut writer, object, path)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}
