//! Performance benchmarks for dirbundle

use std::ffi::OsString;
use std::io;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use dirbundle::test_utils::TestDir;
use dirbundle::{
    BundleConfig, CommandOutput, CommandRunner, IgnoreRules, bundle_to_writer, simple_exclude_names,
};

const GITIGNORE: &str = r#"# build output
target/
dist/
*.log
*.tmp
node_modules
!keep.log
docs/generated/
.env
"#;

const SOURCE: &str = r#"//! Module documentation

pub fn add(a: i32, b: i32) -> i32 {
    a + b
}
"#;

/// Returns an empty listing so the external program is not measured.
struct NullRunner;

impl CommandRunner for NullRunner {
    fn run(&self, _program: &str, _args: &[OsString]) -> io::Result<CommandOutput> {
        Ok(CommandOutput::default())
    }
}

fn create_project(dirs: usize, files_per_dir: usize) -> TestDir {
    let project = TestDir::new();
    project.add_file(".gitignore", GITIGNORE);
    for d in 0..dirs {
        for f in 0..files_per_dir {
            project.add_file(&format!("src/mod{}/file{}.rs", d, f), SOURCE);
            project.add_file(&format!("src/mod{}/file{}.log", d, f), "noise");
        }
        project.add_file(&format!("target/debug/build{}.o", d), "object");
    }
    project
}

fn bench_bundle(c: &mut Criterion) {
    let project = create_project(20, 10);
    let config = BundleConfig::default();

    c.bench_function("bundle_200_files", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(64 * 1024);
            bundle_to_writer(black_box(project.path()), &config, &NullRunner, &mut out).unwrap();
            out
        })
    });
}

fn bench_rules(c: &mut Criterion) {
    let lines: Vec<String> = GITIGNORE.lines().map(str::to_string).collect();

    c.bench_function("compile_rules", |b| {
        b.iter(|| IgnoreRules::from_lines(black_box(lines.clone())).compile())
    });

    c.bench_function("simple_exclude_names", |b| {
        b.iter(|| simple_exclude_names(black_box(&lines)))
    });
}

criterion_group!(benches, bench_bundle, bench_rules);
criterion_main!(benches);
