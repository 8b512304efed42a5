//! Error types shared across the crate
//!
//! Every fatal condition surfaces as one of these variants and is turned
//! into a single `::error::` workflow annotation (plus exit code 1) at the
//! top level in `main`. Nothing below `main` terminates the process.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("found multiple potential plugin package dirs in {}: {}", dir.display(), format_paths(candidates))]
    AmbiguousPackage {
        dir: PathBuf,
        candidates: Vec<PathBuf>,
    },

    #[error("found no plugin package dirs and no single-file plugin in {}", dir.display())]
    NoInstallableUnit { dir: PathBuf },

    #[error("could not read manifest {}: {source}", path.display())]
    ManifestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed manifest {}: {reason}", path.display())]
    ManifestMalformed { path: PathBuf, reason: String },

    #[error("could not get changed files: {0}")]
    RemoteCall(String),

    #[error("missing required environment variable or flag: {0}")]
    MissingEnv(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
