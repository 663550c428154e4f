use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use rolodex::DirectoryService;

/// Deterministic pseudo-name: base-26 digits over 'a'..'z'
fn make_name(id: usize) -> String {
    let mut name = String::new();
    let mut n = id;
    for _ in 0..6 {
        name.push((b'a' + (n % 26) as u8) as char);
        n /= 26;
    }
    name
}

fn build_directory(count: usize) -> DirectoryService {
    let mut dir = DirectoryService::new();
    for i in 0..count {
        dir.insert(&make_name(i), &format!("555-{:04}", i % 10_000))
            .unwrap();
    }
    dir
}

fn bench_lookup(c: &mut Criterion) {
    let counts = [1_000usize, 10_000, 50_000];
    let mut group = c.benchmark_group("lookup");
    for &count in &counts {
        let dir = build_directory(count);
        let probe = make_name(count / 2);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(dir.lookup(black_box(&probe))));
        });
    }
    group.finish();
}

fn bench_prefix_search(c: &mut Criterion) {
    let counts = [1_000usize, 10_000, 50_000];
    let mut group = c.benchmark_group("prefix_search");
    for &count in &counts {
        let dir = build_directory(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(dir.search_by_prefix(black_box("ab"))));
        });
    }
    group.finish();
}

fn bench_list_sorted(c: &mut Criterion) {
    let dir = build_directory(10_000);
    c.bench_function("list_sorted/10000", |b| {
        b.iter(|| black_box(dir.list_sorted()));
    });
}

fn bench_insert_delete_cycle(c: &mut Criterion) {
    c.bench_function("insert_delete/1000", |b| {
        b.iter(|| {
            let mut dir = DirectoryService::new();
            for i in 0..1_000 {
                dir.insert(&make_name(i), "555-0000").unwrap();
            }
            for i in 0..1_000 {
                dir.delete(&make_name(i)).unwrap();
            }
            black_box(dir.len())
        });
    });
}

criterion_group!(
    benches,
    bench_lookup,
    bench_prefix_search,
    bench_list_sorted,
    bench_insert_delete_cycle
);
criterion_main!(benches);
