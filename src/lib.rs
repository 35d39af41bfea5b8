//! dirbundle - concatenate a directory's non-ignored files into one text bundle

pub mod bundle;
pub mod error;
pub mod gitignore;
pub mod listing;
pub mod output;
pub mod walk;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use bundle::{
    BundleConfig, BundleSummary, DEFAULT_OUTPUT, bundle_to_file, bundle_to_writer, validate_root,
};
pub use error::BundleError;
pub use gitignore::{GitignoreFilter, IgnoreRules, simple_exclude_names};
pub use listing::{CommandOutput, CommandRunner, ListingOutcome, SystemRunner};
pub use output::{BundleWriter, print_json};
pub use walk::{BundleWalker, WalkStats, WalkerConfig};
