//! Edge case and error handling tests for dirbundle


use assert_cmd::Command;
use harness::{OUTPUT_NAME, TestDir, headers, read_output, root_arg, run_dirbundle};
use predicates::prelude::*;

fn dirbundle(cwd: &TestDir) -> Command {
    let mut cmd = Command::cargo_bin("dirbundle").expect("binary should build");
    cmd.current_dir(cwd.path()).env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Argument Validation
// ============================================================================

#[test]
fn test_missing_argument_exits_one() {
    let cwd = TestDir::new();

    dirbundle(&cwd)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));

    assert!(!cwd.path().join(OUTPUT_NAME).exists());
}

#[test]
fn test_nonexistent_root_exits_one_without_artifact() {
    let cwd = TestDir::new();
    let missing = cwd.path().join("does-not-exist");

    dirbundle(&cwd)
        .arg(&missing)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not a directory or does not exist"));

    assert!(!cwd.path().join(OUTPUT_NAME).exists());
}

#[test]
fn test_file_root_exits_one_without_artifact() {
    let cwd = TestDir::new();
    let file = cwd.add_file("plain.txt", "not a directory");

    dirbundle(&cwd).arg(&file).assert().code(1);

    assert!(!cwd.path().join(OUTPUT_NAME).exists());
}

#[test]
fn test_help_succeeds() {
    let cwd = TestDir::new();
    dirbundle(&cwd)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-tree"));
}

#[test]
fn test_unwritable_output_location_fails() {
    let project = TestDir::new();
    project.add_file("a.txt", "a");
    let cwd = TestDir::new();

    dirbundle(&cwd)
        .arg(project.path())
        .args(["--no-tree", "-o", "missing-dir/out.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot create output file"));
}

// ============================================================================
// Per-file Failures
// ============================================================================

#[test]
#[cfg(unix)]
fn test_vanished_file_reported_inline() {
    // A dangling symlink behaves like a file deleted between listing and reading.
    let project = TestDir::new();
    project.add_file("a.txt", "first");
    project.add_symlink("gone.txt", "b.txt");
    project.add_file("c.txt", "last");
    let cwd = TestDir::new();

    let run = run_dirbundle(cwd.path(), &[root_arg(&project).as_str(), "--no-tree"]);
    assert!(run.success(), "a bad file must not abort the run");

    let output = read_output(cwd.path());
    assert_eq!(headers(&output), ["a.txt", "b.txt", "c.txt"]);
    assert!(output.contains("<FILENAME: b.txt>\n\n[Error reading file: "));
    assert!(output.contains("last"));
}

#[test]
fn test_invalid_utf8_content_replaced() {
    let project = TestDir::new();
    project.add_bytes("data.bin", b"\x00\x01valid\xc3\x28tail");
    let cwd = TestDir::new();

    let run = run_dirbundle(cwd.path(), &[root_arg(&project).as_str(), "--no-tree"]);
    assert!(run.success());

    let output = read_output(cwd.path());
    assert!(output.contains("valid\u{FFFD}(tail"));
}

#[test]
fn test_invalid_utf8_in_gitignore_tolerated() {
    let project = TestDir::new();
    project.add_bytes(".gitignore", b"\xff\xfe\nsecret.txt\n");
    project.add_file("secret.txt", "hidden");
    project.add_file("public.txt", "shown");
    let cwd = TestDir::new();

    let run = run_dirbundle(cwd.path(), &[root_arg(&project).as_str(), "--no-tree"]);
    assert!(run.success());

    let output = read_output(cwd.path());
    assert_eq!(headers(&output), [".gitignore", "public.txt"]);
}

// ============================================================================
// Symlinks and Odd Trees
// ============================================================================

#[test]
#[cfg(unix)]
fn test_symlink_to_parent_no_infinite_loop() {
    let project = TestDir::new();
    project.add_file("subdir/file.rs", "fn file() {}");
    project.add_symlink("..", "subdir/parent");
    let cwd = TestDir::new();

    let run = run_dirbundle(cwd.path(), &[root_arg(&project).as_str(), "--no-tree"]);
    assert!(run.success(), "should not hang on parent symlink");
    assert_eq!(headers(&read_output(cwd.path())), ["subdir/file.rs"]);
}

#[test]
#[cfg(unix)]
fn test_symlink_to_file_is_read() {
    let project = TestDir::new();
    project.add_file("target.rs", "fn target() {}");
    project.add_symlink("target.rs", "alias.rs");
    let cwd = TestDir::new();

    let run = run_dirbundle(cwd.path(), &[root_arg(&project).as_str(), "--no-tree"]);
    assert!(run.success());

    let output = read_output(cwd.path());
    assert_eq!(headers(&output), ["alias.rs", "target.rs"]);
    assert_eq!(output.matches("fn target() {}").count(), 2);
}

#[test]
fn test_empty_directory_produces_empty_bundle() {
    let project = TestDir::new();
    project.add_dir("empty/nested");
    let cwd = TestDir::new();

    let run = run_dirbundle(cwd.path(), &[root_arg(&project).as_str(), "--no-tree"]);
    assert!(run.success());
    assert_eq!(read_output(cwd.path()), "");
}

#[test]
fn test_unicode_and_spaces_in_names() {
    let project = TestDir::new();
    project.add_file("dir with space/naïve file.txt", "ok");
    let cwd = TestDir::new();

    let run = run_dirbundle(cwd.path(), &[root_arg(&project).as_str(), "--no-tree"]);
    assert!(run.success());
    assert_eq!(
        headers(&read_output(cwd.path())),
        ["dir with space/naïve file.txt"]
    );
}

#[test]
fn test_custom_ignore_file() {
    let project = TestDir::new();
    project.add_file(".gitignore", "a.txt\n");
    project.add_file(".bundleignore", "b.txt\n");
    project.add_file("a.txt", "a");
    project.add_file("b.txt", "b");
    let cwd = TestDir::new();

    let run = run_dirbundle(
        cwd.path(),
        &[
            root_arg(&project).as_str(),
            "--no-tree",
            "--ignore-file",
            ".bundleignore",
        ],
    );
    assert!(run.success());
    assert_eq!(
        headers(&read_output(cwd.path())),
        [".bundleignore", ".gitignore", "a.txt"]
    );
}
