//! Matrix output emission
//!
//! GitHub Actions step outputs are `key=value` lines appended to the file
//! named by `GITHUB_OUTPUT`. An empty matrix still writes the line, with an
//! empty value, so the downstream step can tell "ran, nothing selected"
//! from "never ran".

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::{Matrix, PluginRecord};

/// Render the `matrix` output value: `{"include":[...]}`, or the empty
/// string when no plugins were selected.
pub fn render_matrix(records: &[PluginRecord]) -> Result<String> {
    if records.is_empty() {
        return Ok(String::new());
    }
    let matrix = Matrix {
        include: records.to_vec(),
    };
    Ok(serde_json::to_string(&matrix).map_err(std::io::Error::other)?)
}

/// Append `matrix=<json>\n` to the output file at `path`.
pub fn write_matrix(path: &Path, records: &[PluginRecord]) -> Result<()> {
    let value = render_matrix(records)?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "matrix={value}")?;
    Ok(())
}
