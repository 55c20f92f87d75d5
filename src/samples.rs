//! Sample files: one `R, G, B` row per sample, floats in \[0, 1\].

use std::{fs, io::{BufWriter, Write}, fs::File, path::Path};
use rgb::RGB;

use crate::error::{LoadError, WriteError};

/// Parse the rows of a sample file without checking their range.
///
/// Columns are separated by commas and/or whitespace.  Blank lines
/// and lines starting with `#` are skipped.
pub fn parse_rows(path: &Path, text: &str) -> Result<Vec<[f64; 3]>, LoadError> {
    let mut rows = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue }
        let malformed = |reason: String| LoadError::MalformedRow {
            path: path.to_path_buf(), line: i + 1, reason };
        let cols: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|c| !c.is_empty())
            .collect();
        if cols.len() != 3 {
            return Err(malformed(format!("expected 3 columns, found {}",
                                         cols.len())))
        }
        let mut row = [0.; 3];
        for (x, c) in row.iter_mut().zip(&cols) {
            *x = c.parse::<f64>()
                .map_err(|_| malformed(format!("not a number “{c}”")))?;
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Check the color map invariants: at least 2 samples, all components
/// in \[0, 1\].
pub fn check_samples(path: &Path, rows: &[[f64; 3]])
                     -> Result<Vec<RGB<f64>>, LoadError> {
    if rows.len() < 2 {
        return Err(LoadError::TooFewSamples { path: path.to_path_buf(),
                                              len: rows.len() })
    }
    rows.iter().enumerate().map(|(i, &[r, g, b])| {
        // NaN fails `contains`.
        match [r, g, b].into_iter().find(|v| !(0.0..=1.0).contains(v)) {
            Some(value) => Err(LoadError::OutOfRange {
                path: path.to_path_buf(), sample: i + 1, value }),
            None => Ok(RGB { r, g, b }),
        }})
        .collect()
}

/// Read and validate a sample file.
pub fn read_samples(path: &Path) -> Result<Vec<RGB<f64>>, LoadError> {
    tracing::debug!("loading samples {}", path.display());
    let text = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    check_samples(path, &parse_rows(path, &text)?)
}

/// Write samples as `%8.6f, %8.6f, %8.6f` rows.
pub fn write_samples(path: &Path, samples: &[RGB<f64>])
                     -> Result<(), WriteError> {
    tracing::debug!("saving samples {}", path.display());
    let io = |e| WriteError::io(path, e);
    let mut fh = BufWriter::new(File::create(path).map_err(io)?);
    for c in samples {
        writeln!(fh, "{:8.6}, {:8.6}, {:8.6}", c.r, c.g, c.b).map_err(io)?;
    }
    fh.flush().map_err(io)
}
