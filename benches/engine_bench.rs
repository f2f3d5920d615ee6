use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use cssl::SkipList;

fn bulk_insert_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulk_insert");
    for &n in &[1_000u32, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut list = SkipList::new(9, 5);
                for k in 1..n {
                    list.bulk_insert(black_box(k)).unwrap();
                }
                list
            });
        });
    }
    group.finish();
}

fn lookup_benchmark(c: &mut Criterion) {
    let n = 100_000u32;
    let mut list = SkipList::new(9, 5);
    for k in 1..n {
        list.bulk_insert(k).unwrap();
    }

    c.bench_function("lookup_hit", |b| {
        b.iter(|| black_box(list.lookup(black_box(n / 2))));
    });
    c.bench_function("lookup_miss", |b| {
        b.iter(|| black_box(list.lookup(black_box(n + 1))));
    });
}

fn range_benchmark(c: &mut Criterion) {
    let n = 100_000u32;
    let mut list = SkipList::new(9, 5);
    for k in 1..n {
        list.bulk_insert(k).unwrap();
    }

    c.bench_function("range_1000_keys", |b| {
        b.iter(|| black_box(list.range(black_box(1_000), black_box(2_000)).unwrap()));
    });
}

criterion_group!(
    benches,
    bulk_insert_benchmark,
    lookup_benchmark,
    range_benchmark
);
criterion_main!(benches);
