//! Plugin manifest parsing
//!
//! Reads a plugin's `pyproject.toml` and extracts the plugin-to-plugin
//! dependencies it declares. Only the `project.dependencies` list is
//! looked at; entries named `indico-plugin-<name>` are kept and reduced to
//! the bare plugin name with hyphens normalized to underscores.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::discovery::MANIFEST_FILE;
use crate::error::{Error, Result};

/// Requirement-string prefix marking a dependency on another plugin
const PLUGIN_DEP_PREFIX: &str = "indico-plugin-";

/// Captures the plugin name up to any version specifier
static PLUGIN_DEP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^indico-plugin-([^>=<]+)").expect("Invalid regex"));

#[derive(Debug, Deserialize)]
struct Manifest {
    project: Project,
}

#[derive(Debug, Deserialize)]
struct Project {
    dependencies: Vec<String>,
}

/// Extract the declared plugin dependencies from `plugin_dir`'s manifest.
///
/// Missing manifest, missing `project.dependencies`, and a plugin-prefixed
/// requirement that the name pattern cannot parse are all fatal.
pub fn plugin_dependencies(plugin_dir: &Path) -> Result<Vec<String>> {
    let path = plugin_dir.join(MANIFEST_FILE);
    let raw = std::fs::read_to_string(&path).map_err(|source| Error::ManifestRead {
        path: path.clone(),
        source,
    })?;
    let manifest: Manifest = toml::from_str(&raw).map_err(|err| Error::ManifestMalformed {
        path: path.clone(),
        reason: err.message().to_string(),
    })?;

    manifest
        .project
        .dependencies
        .iter()
        .filter(|req| req.starts_with(PLUGIN_DEP_PREFIX))
        .map(|req| {
            let captures =
                PLUGIN_DEP_RE
                    .captures(req)
                    .ok_or_else(|| Error::ManifestMalformed {
                        path: path.clone(),
                        reason: format!(
                            "dependency '{req}' does not follow the plugin naming convention"
                        ),
                    })?;
            Ok(captures[1].replace('-', "_"))
        })
        .collect()
}
