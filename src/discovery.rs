//! Plugin discovery
//!
//! Centralizes the filesystem conventions that identify a plugin checkout:
//! a `pyproject.toml` manifest marks a plugin directory, an `indico_*`
//! package dir (or a single-file `indico_*.py` module) marks the installable
//! unit, and webpack/translations markers drive the per-plugin build flags.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::manifest;
use crate::models::PluginRecord;

/// Package manifest expected at every plugin root
pub const MANIFEST_FILE: &str = "pyproject.toml";

/// Reserved metadata-only plugin directory; never installed, all derived
/// fields forced to false/empty
pub const META_PLUGIN: &str = "_meta";

/// Naming prefix of installable plugin packages
const PKG_PREFIX: &str = "indico_";

const WEBPACK_CONFIG: &str = "webpack.config.js";
const BUNDLE_MANIFEST: &str = "webpack-bundles.json";
const TRANSLATIONS_DIR: &str = "translations";

/// Locate the plugin's importable package directory inside `plugin_dir`.
///
/// Returns `None` for single-file plugins (a top-level `indico_*.py` module
/// instead of a package dir). Zero or multiple matches are fatal.
pub fn locate_package_dir(plugin_dir: &Path) -> Result<Option<PathBuf>> {
    let mut candidates = Vec::new();
    for entry in std::fs::read_dir(plugin_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir()
            && entry_name(&path).starts_with(PKG_PREFIX)
            && path.join("__init__.py").is_file()
        {
            candidates.push(path);
        }
    }
    candidates.sort();

    match candidates.len() {
        1 => Ok(candidates.pop()),
        0 => {
            if has_single_file_module(plugin_dir)? {
                Ok(None)
            } else {
                Err(Error::NoInstallableUnit {
                    dir: plugin_dir.to_path_buf(),
                })
            }
        }
        _ => Err(Error::AmbiguousPackage {
            dir: plugin_dir.to_path_buf(),
            candidates,
        }),
    }
}

fn has_single_file_module(plugin_dir: &Path) -> Result<bool> {
    for entry in std::fs::read_dir(plugin_dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry_name(&path);
        if path.is_file() && name.starts_with(PKG_PREFIX) && name.ends_with(".py") {
            return Ok(true);
        }
    }
    Ok(false)
}

/// A plugin ships front-end assets if a webpack config or a precompiled
/// bundle manifest sits directly in its directory.
pub fn has_assets(plugin_dir: &Path) -> bool {
    plugin_dir.join(WEBPACK_CONFIG).is_file() || plugin_dir.join(BUNDLE_MANIFEST).is_file()
}

/// Single-file plugins have no package dir and therefore no translations.
pub fn has_i18n(package_dir: Option<&Path>) -> bool {
    package_dir
        .map(|dir| dir.join(TRANSLATIONS_DIR).exists())
        .unwrap_or(false)
}

/// Compose one matrix record for the plugin at `plugin_dir`.
pub fn build_record(plugin_dir: &Path, single: bool) -> Result<PluginRecord> {
    if !single && entry_name(plugin_dir) == META_PLUGIN {
        return Ok(PluginRecord {
            plugin: META_PLUGIN.to_string(),
            path: META_PLUGIN.to_string(),
            install: false,
            assets: false,
            i18n: false,
            deps: Vec::new(),
            single: false,
        });
    }

    let package_dir = locate_package_dir(plugin_dir)?;
    let name = if single {
        // Single-plugin repos take their name from the package dir; a
        // single-file plugin leaves nothing to derive it from.
        let package_dir = package_dir.as_ref().ok_or_else(|| Error::NoInstallableUnit {
            dir: plugin_dir.to_path_buf(),
        })?;
        entry_name(package_dir)
            .strip_prefix(PKG_PREFIX)
            .unwrap_or_default()
            .to_string()
    } else {
        entry_name(plugin_dir).to_string()
    };
    debug!("Building record for plugin '{name}'");

    Ok(PluginRecord {
        path: if single { String::new() } else { name.clone() },
        plugin: name,
        install: true,
        assets: has_assets(plugin_dir),
        i18n: has_i18n(package_dir.as_deref()),
        deps: manifest::plugin_dependencies(plugin_dir)?,
        single,
    })
}

/// Immediate subdirectories of `root` that carry a plugin manifest.
pub fn list_candidate_plugin_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() && path.join(MANIFEST_FILE).is_file() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Discover every plugin in the checkout at `root`.
///
/// A manifest at the root itself means a single-plugin repository (exactly
/// one record); otherwise every manifest-bearing subdirectory yields one
/// record, sorted by plugin name.
pub fn discover_plugins(root: &Path) -> Result<Vec<PluginRecord>> {
    if root.join(MANIFEST_FILE).is_file() {
        debug!("Single-plugin repository layout detected");
        return Ok(vec![build_record(root, true)?]);
    }

    let candidates = list_candidate_plugin_dirs(root)?;
    debug!("Found {} candidate plugin dirs", candidates.len());

    let mut records = candidates
        .iter()
        .map(|dir| build_record(dir, false))
        .collect::<Result<Vec<_>>>()?;
    records.sort_by(|a, b| a.plugin.cmp(&b.plugin));
    Ok(records)
}

fn entry_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or("")
}
