//! Ignore-pattern loading and matching
//!
//! Patterns come from the root's ignore file (`.gitignore` by default) plus a
//! mandatory `.git/` rule. They are compiled once into a [`GitignoreFilter`] and
//! queried with root-relative, forward-slash paths for the rest of the run.

use std::fs;
use std::io;
use std::path::Path;

use ignore::Match;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use tracing::{debug, warn};

/// Default name of the ignore file, resolved relative to the root.
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

/// Rule appended to every rule set so version-control metadata is never bundled.
pub const VCS_RULE: &str = ".git/";

/// Root handed to the matcher. Queries are already root-relative, and a `.`
/// root keeps the matcher from stripping any prefix off them.
const MATCH_ROOT: &str = ".";

/// Ordered raw patterns, exactly as read from the ignore file plus [`VCS_RULE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreRules {
    patterns: Vec<String>,
}

impl IgnoreRules {
    /// Build a rule set from raw lines, appending the mandatory VCS rule.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut patterns: Vec<String> = lines.into_iter().map(Into::into).collect();
        patterns.push(VCS_RULE.to_string());
        Self { patterns }
    }

    /// Load `<root>/<ignore_file>`.
    ///
    /// A missing file yields just the VCS rule. Undecodable bytes are replaced,
    /// and an unreadable file is treated like a missing one.
    pub fn load(root: &Path, ignore_file: &str) -> Self {
        let path = root.join(ignore_file);
        match fs::read(&path) {
            Ok(bytes) => {
                let text = String::from_utf8_lossy(&bytes);
                debug!(path = %path.display(), "loaded ignore file");
                Self::from_lines(text.lines())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::from_lines(Vec::<String>::new()),
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "cannot read ignore file, using defaults"
                );
                Self::from_lines(Vec::<String>::new())
            }
        }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Names usable by tools that only understand plain name exclusion.
    pub fn simple_excludes(&self) -> Vec<String> {
        simple_exclude_names(&self.patterns)
    }

    /// Compile the rules with gitignore precedence.
    ///
    /// Lines that fail to parse as globs are skipped with a warning.
    pub fn compile(&self) -> GitignoreFilter {
        let mut builder = GitignoreBuilder::new(MATCH_ROOT);
        for pattern in &self.patterns {
            if let Err(e) = builder.add_line(None, pattern) {
                warn!(pattern = %pattern, error = %e, "skipping invalid ignore pattern");
            }
        }

        let matcher = builder.build().unwrap_or_else(|e| {
            warn!(error = %e, "cannot compile ignore rules, falling back to {VCS_RULE}");
            vcs_only_matcher()
        });

        GitignoreFilter { matcher }
    }
}

fn vcs_only_matcher() -> Gitignore {
    let mut builder = GitignoreBuilder::new(MATCH_ROOT);
    if builder.add_line(None, VCS_RULE).is_err() {
        return Gitignore::empty();
    }
    builder.build().unwrap_or_else(|_| Gitignore::empty())
}

/// Derive the simple-name exclusion list from raw patterns.
///
/// Empty lines and comments are skipped. A pattern is kept verbatim when it has
/// no `/`, `*` or `!`; otherwise it is kept only if it ends with `/`, with that
/// trailing slash removed. Everything else is dropped, so the result is looser
/// than the compiled matcher.
pub fn simple_exclude_names(patterns: &[String]) -> Vec<String> {
    let mut names = Vec::new();

    for pattern in patterns {
        if pattern.is_empty() || pattern.starts_with('#') {
            continue;
        }
        if !pattern.contains(['/', '*', '!']) {
            names.push(pattern.clone());
        } else if let Some(stripped) = pattern.strip_suffix('/') {
            names.push(stripped.to_string());
        }
    }

    names
}

/// Compiled matcher answering exclusion for root-relative paths.
pub struct GitignoreFilter {
    matcher: Gitignore,
}

impl GitignoreFilter {
    /// Load and compile the ignore rules for `root` in one step.
    pub fn new(root: &Path, ignore_file: &str) -> (Self, IgnoreRules) {
        let rules = IgnoreRules::load(root, ignore_file);
        (rules.compile(), rules)
    }

    /// Check whether a root-relative path (forward slashes) is excluded.
    ///
    /// Only the path itself is tested, not its parents: callers prune excluded
    /// directories before descending.
    pub fn is_excluded(&self, relative: &str, is_dir: bool) -> bool {
        matches!(self.matcher.matched(Path::new(relative), is_dir), Match::Ignore(_))
    }

    pub fn num_rules(&self) -> usize {
        self.matcher.num_ignores() as usize + self.matcher.num_whitelists() as usize
    }
}
