//! Bundling run: validate, load patterns, walk and write, append the listing

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{BundleError, Result};
use crate::gitignore::{DEFAULT_IGNORE_FILE, GitignoreFilter};
use crate::listing::{CommandRunner, ListingOutcome, append_listing};
use crate::output::BundleWriter;
use crate::walk::{BundleWalker, WalkStats, WalkerConfig};

/// Default artifact name, created in the current working directory.
pub const DEFAULT_OUTPUT: &str = "combined_output.txt";

/// Configuration for a bundling run.
#[derive(Debug, Clone)]
pub struct BundleConfig {
    /// Artifact path. Relative paths resolve against the working directory.
    pub output: PathBuf,
    /// Ignore file name, resolved relative to the root.
    pub ignore_file: String,
    /// Derive simple-name exclusions for the listing command. When off, the
    /// listing uses its fallback exclusions.
    pub derive_simple_excludes: bool,
    /// Append the external directory listing.
    pub tree_listing: bool,
    pub walker: WalkerConfig,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
            derive_simple_excludes: true,
            tree_listing: true,
            walker: WalkerConfig::default(),
        }
    }
}

/// What a run produced.
#[derive(Debug, Clone, Serialize)]
pub struct BundleSummary {
    pub root: PathBuf,
    pub output: Option<PathBuf>,
    #[serde(flatten)]
    pub stats: WalkStats,
    pub simple_excludes: Vec<String>,
    pub tree_listing: ListingOutcome,
    #[serde(serialize_with = "serialize_elapsed")]
    pub elapsed: Duration,
}

/// Check the root before anything is created.
pub fn validate_root(root: &Path) -> Result<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(BundleError::NotADirectory(root.to_path_buf()))
    }
}

/// Bundle `root` into `config.output`, overwriting it.
///
/// The root is validated before the artifact is created, so an invalid root
/// leaves no file behind.
pub fn bundle_to_file<R: CommandRunner + ?Sized>(
    root: &Path,
    config: &BundleConfig,
    runner: &R,
) -> Result<BundleSummary> {
    validate_root(root)?;

    let file = File::create(&config.output).map_err(|source| BundleError::CreateOutput {
        path: config.output.clone(),
        source,
    })?;
    let skip = config.output.canonicalize().ok();

    let mut summary = write_bundle(root, config, runner, BufWriter::new(file), skip)?;
    summary.output = Some(config.output.clone());
    Ok(summary)
}

/// Bundle `root` into an arbitrary writer. `config.output` is not touched.
pub fn bundle_to_writer<W: Write, R: CommandRunner + ?Sized>(
    root: &Path,
    config: &BundleConfig,
    runner: &R,
    out: W,
) -> Result<BundleSummary> {
    validate_root(root)?;
    write_bundle(root, config, runner, out, None)
}

fn write_bundle<W: Write, R: CommandRunner + ?Sized>(
    root: &Path,
    config: &BundleConfig,
    runner: &R,
    out: W,
    skip: Option<PathBuf>,
) -> Result<BundleSummary> {
    let started = Instant::now();

    let (filter, rules) = GitignoreFilter::new(root, &config.ignore_file);
    debug!(
        patterns = rules.patterns().len(),
        rules = filter.num_rules(),
        "compiled ignore rules"
    );

    let simple_excludes = if config.derive_simple_excludes {
        rules.simple_excludes()
    } else {
        Vec::new()
    };

    let mut walker = BundleWalker::new(config.walker.clone(), &filter);
    if let Some(path) = skip {
        walker = walker.with_skip_path(path);
    }

    let mut writer = BundleWriter::new(out);
    let stats = walker.walk(root, &mut writer)?;

    let tree_listing = if config.tree_listing {
        append_listing(&mut writer, runner, root, &simple_excludes)?
    } else {
        ListingOutcome::Disabled
    };
    writer.flush()?;

    let elapsed = started.elapsed();
    info!(
        files = stats.files_written,
        excluded = stats.files_excluded,
        pruned = stats.dirs_pruned,
        read_errors = stats.read_errors,
        elapsed = %human_elapsed(elapsed),
        "bundle complete"
    );

    Ok(BundleSummary {
        root: root.to_path_buf(),
        output: None,
        stats,
        simple_excludes,
        tree_listing,
        elapsed,
    })
}

/// Elapsed time at millisecond precision, e.g. "1s 250ms".
fn human_elapsed(d: Duration) -> humantime::FormattedDuration {
    let millis = u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
    humantime::format_duration(Duration::from_millis(millis))
}

fn serialize_elapsed<S: serde::Serializer>(
    d: &Duration,
    s: S,
) -> std::result::Result<S::Ok, S::Error> {
    s.collect_str(&human_elapsed(*d))
}
