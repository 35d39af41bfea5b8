//! Directory listing appended to the end of the bundle
//!
//! The listing comes from the external `tree` program. It only understands
//! plain name exclusion (`-I a|b|c`), so it receives the simple-name list
//! derived from the ignore rules rather than the full matcher.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::Path;
use std::process::Command;

use serde::Serialize;
use tracing::{debug, warn};

use crate::output::BundleWriter;

/// Program invoked to render the listing.
pub const TREE_PROGRAM: &str = "tree";

/// Exclusions used when no simple names are available or the first attempt fails.
pub const FALLBACK_EXCLUDES: &[&str] = &["node_modules", ".git", "venv"];

pub const NOT_FOUND_NOTICE: &str = "[tree command not found]\n";
pub const FALLBACK_FAILED_NOTICE: &str = "[Could not run tree command with fallback patterns]\n";

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
}

/// Runs external programs. Substituted with a fake in tests.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[OsString]) -> io::Result<CommandOutput>;
}

/// Runs programs with [`std::process::Command`], blocking until they exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[OsString]) -> io::Result<CommandOutput> {
        let output = Command::new(program).args(args).output()?;
        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}

/// How the listing step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingOutcome {
    /// Listing step turned off by configuration.
    Disabled,
    /// The command ran with the primary exclusions.
    Listed,
    /// The primary attempt failed and the fallback exclusions succeeded.
    ListedWithFallback,
    /// The program is not installed.
    NotFound,
    /// Every attempt failed.
    Failed,
}

/// Build the argument list: `<root> --prune -I <a|b|c>`.
pub fn tree_args(root: &Path, excludes: &[&str]) -> Vec<OsString> {
    vec![
        root.as_os_str().to_owned(),
        OsString::from("--prune"),
        OsString::from("-I"),
        OsString::from(excludes.join("|")),
    ]
}

/// Run the listing for `root` and append whatever it prints to `out`.
///
/// Failures never abort the run: they are written inline as bracketed notices.
/// When `excludes` is empty the fallback exclusions are used directly. When the
/// primary attempt fails for any reason other than a missing program, one retry
/// is made with the fallback exclusions.
pub fn append_listing<W, R>(
    out: &mut BundleWriter<W>,
    runner: &R,
    root: &Path,
    excludes: &[String],
) -> io::Result<ListingOutcome>
where
    W: Write,
    R: CommandRunner + ?Sized,
{
    if excludes.is_empty() {
        return match run_tree(runner, root, FALLBACK_EXCLUDES) {
            Ok(stdout) => {
                out.write_raw(&stdout)?;
                Ok(ListingOutcome::Listed)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                out.write_raw(NOT_FOUND_NOTICE)?;
                Ok(ListingOutcome::NotFound)
            }
            Err(e) => {
                out.write_raw(&error_notice(&e))?;
                Ok(ListingOutcome::Failed)
            }
        };
    }

    let names: Vec<&str> = excludes.iter().map(String::as_str).collect();
    match run_tree(runner, root, &names) {
        Ok(stdout) => {
            out.write_raw(&stdout)?;
            Ok(ListingOutcome::Listed)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            out.write_raw(NOT_FOUND_NOTICE)?;
            Ok(ListingOutcome::NotFound)
        }
        Err(e) => {
            out.write_raw(&error_notice(&e))?;
            debug!("retrying {TREE_PROGRAM} with fallback exclusions");
            match run_tree(runner, root, FALLBACK_EXCLUDES) {
                Ok(stdout) => {
                    out.write_raw(&stdout)?;
                    Ok(ListingOutcome::ListedWithFallback)
                }
                Err(e) => {
                    warn!(error = %e, "{TREE_PROGRAM} fallback failed");
                    out.write_raw(FALLBACK_FAILED_NOTICE)?;
                    Ok(ListingOutcome::Failed)
                }
            }
        }
    }
}

fn run_tree<R: CommandRunner + ?Sized>(
    runner: &R,
    root: &Path,
    excludes: &[&str],
) -> io::Result<String> {
    let args = tree_args(root, excludes);
    debug!(program = TREE_PROGRAM, ?args, "running listing command");

    let output = runner.run(TREE_PROGRAM, &args).inspect_err(|e| {
        warn!(program = TREE_PROGRAM, error = %e, "cannot run listing command");
    })?;
    if !output.success {
        warn!(program = TREE_PROGRAM, code = ?output.code, "listing command exited with failure");
    }
    Ok(output.stdout)
}

fn error_notice(err: &io::Error) -> String {
    format!("[Error running tree command: {}]\n", err)
}
