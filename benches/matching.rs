use codecollector::ignore::pattern::GlobPattern;
use codecollector::ignore::rules::candidate_paths;
use codecollector::{CodeCollector, GlobalRuleSet, IgnoreRuleSet};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PATTERNS: &[&str] = &["*.log", "vendor/", "node_modules", "src/**/gen", "**/*.min.js", "build"];

fn pattern_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pattern");

    for pattern in PATTERNS {
        let compiled = GlobPattern::compile(pattern).unwrap();
        group.bench_with_input(BenchmarkId::new("is_match", pattern), &compiled, |b, compiled| {
            b.iter(|| compiled.is_match(black_box("src/deeply/nested/module/file.min.js")))
        });
    }

    group.finish();
}

fn candidate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("candidates");

    for depth in [1usize, 4, 16] {
        let relative = (0..depth).map(|i| format!("dir{}", i)).collect::<Vec<_>>().join("/");
        group.bench_with_input(BenchmarkId::new("candidate_paths", depth), &relative, |b, relative| {
            b.iter(|| candidate_paths(black_box(relative)))
        });
    }

    group.finish();
}

fn rule_set_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_set");
    let root = Path::new("/nonexistent-bench-root");
    let rules = IgnoreRuleSet::new(GlobalRuleSet::from_patterns(PATTERNS));

    group.bench_function("is_ignored", |b| {
        b.iter(|| rules.is_ignored(black_box(&root.join("src/app/view/index.ts")), root))
    });

    group.finish();
}

fn collection_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection");

    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    for dir in 0..10 {
        fs::create_dir_all(root.join(format!("pkg{}", dir))).unwrap();
        for file in 0..50 {
            fs::write(root.join(format!("pkg{}/file{}.go", dir, file)), vec![b'x'; 4096]).unwrap();
        }
    }
    group.throughput(Throughput::Elements(500));

    for workers in [1usize, 4, 16] {
        let collector = CodeCollector::new(Vec::new(), GlobalRuleSet::from_patterns(PATTERNS), workers);
        group.bench_with_input(BenchmarkId::new("collect", workers), &collector, |b, collector| {
            b.iter(|| collector.collect(black_box(root)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    pattern_benchmark,
    candidate_benchmark,
    rule_set_benchmark,
    collection_benchmark
);
criterion_main!(benches);
