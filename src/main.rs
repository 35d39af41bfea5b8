//! CLI entry point for dirbundle

use std::path::PathBuf;
use std::process;

use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use dirbundle::gitignore::DEFAULT_IGNORE_FILE;
use dirbundle::{
    BundleConfig, BundleError, DEFAULT_OUTPUT, SystemRunner, WalkerConfig, bundle_to_file,
    print_json,
};

#[derive(Parser, Debug)]
#[command(name = "dirbundle")]
#[command(about = "Concatenate a directory's non-ignored files into one text bundle")]
#[command(version)]
struct Args {
    /// Directory to bundle
    directory: PathBuf,

    /// Output file, created in the current directory unless a path is given
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Ignore file name, looked up in DIRECTORY
    #[arg(long = "ignore-file", value_name = "NAME", default_value = DEFAULT_IGNORE_FILE)]
    ignore_file: String,

    /// Do not derive tree exclusions from the ignore file (use the built-in list)
    #[arg(long = "no-simple-excludes")]
    no_simple_excludes: bool,

    /// Do not append the `tree` listing
    #[arg(long = "no-tree")]
    no_tree: bool,

    /// Keep file-system enumeration order instead of sorting entries by name
    #[arg(long = "unsorted")]
    unsorted: bool,

    /// Print a JSON summary of the run to stdout
    #[arg(long = "json")]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dirbundle={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::try_parse().unwrap_or_else(|e| {
        if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
            e.exit();
        }
        let _ = e.print();
        process::exit(1);
    });

    init_logging(args.verbose);

    let config = BundleConfig {
        output: args.output.clone(),
        ignore_file: args.ignore_file.clone(),
        derive_simple_excludes: !args.no_simple_excludes,
        tree_listing: !args.no_tree,
        walker: WalkerConfig {
            sort_entries: !args.unsorted,
        },
    };

    let summary = match bundle_to_file(&args.directory, &config, &SystemRunner) {
        Ok(summary) => summary,
        Err(e @ BundleError::NotADirectory(_)) => {
            eprintln!("dirbundle: error: {}", e);
            eprintln!("Usage: dirbundle <DIRECTORY>");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("dirbundle: {}", e);
            process::exit(1);
        }
    };

    if args.json {
        if let Err(e) = print_json(&summary) {
            eprintln!("dirbundle: error writing summary: {}", e);
            process::exit(1);
        }
    }
}
