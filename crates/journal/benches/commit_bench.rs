//! Performance benchmarks for commit, history and diff operations
//!
//! Run with: cargo bench --package commithub-journal

use commithub_core::{hash_bytes, StagingEntry};
use commithub_journal::{diff_lines, Commit, Repository};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tempfile::TempDir;

fn bench_commit_serialization(c: &mut Criterion) {
    let files: Vec<StagingEntry> = (0..50)
        .map(|i| StagingEntry::new(format!("src/file{}.rs", i), hash_bytes(&[i as u8])))
        .collect();
    let commit = Commit::new("bench commit", files, Some(hash_bytes(b"parent")));

    c.bench_function("commit_serialize", |b| {
        b.iter(|| black_box(commit.to_bytes().unwrap()));
    });

    let bytes = commit.to_bytes().unwrap();
    let hash = hash_bytes(&bytes);
    c.bench_function("commit_deserialize", |b| {
        b.iter(|| black_box(Commit::from_bytes(&hash, &bytes).unwrap()));
    });
}

fn bench_commit(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let repo = Repository::init(temp_dir.path()).unwrap();
    let file = temp_dir.path().join("bench.txt");

    let mut counter = 0u64;
    c.bench_function("add_and_commit", |b| {
        b.iter(|| {
            counter += 1;
            std::fs::write(&file, format!("revision {}\n", counter)).unwrap();
            repo.add(&file).unwrap();
            black_box(repo.commit("bench").unwrap());
        });
    });
}

fn bench_log(c: &mut Criterion) {
    let mut group = c.benchmark_group("log");

    for depth in [10, 100, 500] {
        let temp_dir = TempDir::new().unwrap();
        let repo = Repository::init(temp_dir.path()).unwrap();
        for i in 0..depth {
            repo.commit(&format!("commit {}", i)).unwrap();
        }

        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| black_box(repo.log_entries().unwrap().len()));
        });
    }

    group.finish();
}

fn bench_diff_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_lines");

    for lines in [100, 1000] {
        let old: String = (0..lines).map(|i| format!("line {}\n", i)).collect();
        let new: String = (0..lines)
            .map(|i| {
                if i % 10 == 0 {
                    format!("changed {}\n", i)
                } else {
                    format!("line {}\n", i)
                }
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(lines), &lines, |b, _| {
            b.iter(|| black_box(diff_lines(&old, &new)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_commit_serialization,
    bench_commit,
    bench_log,
    bench_diff_lines
);
criterion_main!(benches);
