use serde::{Deserialize, Serialize};

/// One entry of the build matrix, describing a single discovered plugin.
///
/// Field order matters: it is the order the keys appear in the emitted JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRecord {
    /// Short plugin name (directory name, or the package dir name with its
    /// `indico_` prefix stripped in single-plugin mode)
    pub plugin: String,
    /// Path of the plugin dir relative to the repo root; empty string in
    /// single-plugin mode
    pub path: String,
    /// Whether the CI job should install this plugin (false only for `_meta`)
    pub install: bool,
    /// Whether the plugin ships front-end assets (webpack config or bundle
    /// manifest present)
    pub assets: bool,
    /// Whether the plugin package contains a `translations/` directory
    pub i18n: bool,
    /// Names of other plugins declared as dependencies, normalized with
    /// underscores
    pub deps: Vec<String>,
    /// True when the record was produced from a single-plugin repository
    pub single: bool,
}

/// The matrix object handed to GitHub Actions: `{"include": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matrix {
    pub include: Vec<PluginRecord>,
}
