//! Changed-file lookup via the GitHub API
//!
//! The lookup sits behind the narrow [`ChangedFilesApi`] trait so the matrix
//! builder can be exercised in tests without a network or a `gh` credential.
//! The real implementation shells out to the `gh` CLI, which handles auth
//! and pagination for us.

use std::collections::BTreeSet;
use std::process::Command;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Lists the files changed by a pull request.
pub trait ChangedFilesApi {
    fn changed_files(&self, repository: &str, pr_number: &str) -> Result<Vec<String>>;
}

/// Production implementation backed by `gh api`.
#[derive(Default)]
pub struct GhCli;

impl ChangedFilesApi for GhCli {
    fn changed_files(&self, repository: &str, pr_number: &str) -> Result<Vec<String>> {
        which::which("gh")
            .map_err(|_| Error::RemoteCall("gh CLI not found on PATH".to_string()))?;

        let endpoint = format!("repos/{repository}/pulls/{pr_number}/files");
        debug!("Fetching changed files from {endpoint}");

        let output = Command::new("gh")
            .args(["api", &endpoint, "--paginate"])
            .output()
            .map_err(|err| Error::RemoteCall(format!("failed to run gh: {err}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::RemoteCall(format!(
                "gh api {endpoint} failed: {}",
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_changed_files(&stdout)
    }
}

#[derive(Debug, Deserialize)]
struct ChangedFile {
    filename: String,
}

/// Parse the `gh api --paginate` response.
///
/// `--paginate` emits one JSON array per page back to back, so the payload
/// is stream-deserialized and flattened rather than parsed as one document.
fn parse_changed_files(payload: &str) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for page in serde_json::Deserializer::from_str(payload).into_iter::<Vec<ChangedFile>>() {
        let page = page.map_err(|err| {
            Error::RemoteCall(format!("could not parse changed-files response: {err}"))
        })?;
        files.extend(page.into_iter().map(|file| file.filename));
    }
    Ok(files)
}

/// Reduce changed-file paths to the set of touched top-level directories.
/// Files at the repository root have no directory and are skipped.
pub fn changed_top_level_dirs(files: &[String]) -> BTreeSet<String> {
    files
        .iter()
        .filter_map(|path| {
            path.contains('/')
                .then(|| path.split('/').next().unwrap_or_default().to_string())
        })
        .collect()
}
