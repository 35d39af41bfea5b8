//! Depth-first directory walking
//!
//! `BundleWalker` visits the root top-down: the files of a directory are
//! written first, then each surviving subdirectory is descended in turn.
//! Excluded directories are pruned before recursion, so nothing below them is
//! ever enumerated.

mod config;
mod entries;
mod walker;

pub use config::WalkerConfig;
pub use walker::{BundleWalker, WalkStats};
