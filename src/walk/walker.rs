//! BundleWalker - writes every non-excluded file under a root

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::gitignore::GitignoreFilter;
use crate::output::BundleWriter;

use super::config::WalkerConfig;
use super::entries::{EntryKind, child_relative, classify, read_entries};

/// Counters collected during a walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WalkStats {
    /// Sections written, including those carrying a read error.
    pub files_written: usize,
    /// Files skipped because the matcher excluded them.
    pub files_excluded: usize,
    /// Directories pruned before descent.
    pub dirs_pruned: usize,
    /// Files whose content could not be read.
    pub read_errors: usize,
    /// Directories that could not be enumerated.
    pub unreadable_dirs: usize,
}

/// Depth-first walker that streams surviving files into a [`BundleWriter`].
pub struct BundleWalker<'a> {
    config: WalkerConfig,
    filter: &'a GitignoreFilter,
    skip_path: Option<PathBuf>,
}

impl<'a> BundleWalker<'a> {
    pub fn new(config: WalkerConfig, filter: &'a GitignoreFilter) -> Self {
        Self {
            config,
            filter,
            skip_path: None,
        }
    }

    /// Never bundle this file, even if it lies under the root.
    ///
    /// Used for the output artifact itself. The path should be canonical.
    pub fn with_skip_path(mut self, path: PathBuf) -> Self {
        self.skip_path = Some(path);
        self
    }

    /// Walk `root` and write each surviving file to `out`.
    ///
    /// Only write errors on `out` are returned; unreadable files and
    /// directories are recorded in the stats and the walk continues.
    pub fn walk<W: Write>(
        &self,
        root: &Path,
        out: &mut BundleWriter<W>,
    ) -> std::io::Result<WalkStats> {
        let mut stats = WalkStats::default();
        self.walk_dir(root, "", out, &mut stats)?;
        Ok(stats)
    }

    fn walk_dir<W: Write>(
        &self,
        dir: &Path,
        relative: &str,
        out: &mut BundleWriter<W>,
        stats: &mut WalkStats,
    ) -> std::io::Result<()> {
        let entries = match read_entries(dir, self.config.sort_entries) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "cannot read directory, skipping");
                stats.unreadable_dirs += 1;
                return Ok(());
            }
        };

        let mut subdirs = Vec::new();
        let mut files = Vec::new();

        for entry in entries {
            let name = entry.file_name().to_string_lossy().into_owned();
            let child = child_relative(relative, &name);

            match classify(&entry) {
                EntryKind::Dir => {
                    if self.filter.is_excluded(&child, true) {
                        debug!(path = %child, "pruned directory");
                        stats.dirs_pruned += 1;
                    } else {
                        subdirs.push((entry.path(), child));
                    }
                }
                EntryKind::File => {
                    if self.filter.is_excluded(&child, false) {
                        trace!(path = %child, "excluded file");
                        stats.files_excluded += 1;
                    } else {
                        files.push((entry.path(), child));
                    }
                }
                EntryKind::DirLink => debug!(path = %child, "not following directory symlink"),
                EntryKind::Special => debug!(path = %child, "skipping special file"),
            }
        }

        for (path, child) in files {
            if self.is_skip_path(&path) {
                debug!(path = %child, "skipping output artifact");
                continue;
            }
            self.write_file(&path, &child, out, stats)?;
        }

        for (path, child) in subdirs {
            self.walk_dir(&path, &child, out, stats)?;
        }

        Ok(())
    }

    fn write_file<W: Write>(
        &self,
        path: &Path,
        relative: &str,
        out: &mut BundleWriter<W>,
        stats: &mut WalkStats,
    ) -> std::io::Result<()> {
        match fs::read(path) {
            Ok(bytes) => {
                let text = String::from_utf8_lossy(&bytes);
                out.write_section(relative, Ok(&*text))?;
            }
            Err(e) => {
                warn!(path = %relative, error = %e, "cannot read file");
                stats.read_errors += 1;
                out.write_section(relative, Err(&e))?;
            }
        }
        stats.files_written += 1;
        Ok(())
    }

    fn is_skip_path(&self, path: &Path) -> bool {
        let Some(skip) = &self.skip_path else {
            return false;
        };
        if path.file_name() != skip.file_name() {
            return false;
        }
        path.canonicalize().is_ok_and(|p| &p == skip)
    }
}
