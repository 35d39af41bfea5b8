//! Error types for bundling runs

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a bundling run.
///
/// Per-file read failures and tree-listing failures are not represented here:
/// those are written inline into the bundle and the run continues.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("{} is not a directory or does not exist.", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot create output file '{}': {source}", .path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error writing output: {0}")]
    Write(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, BundleError>;
