use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use holdall_list::{SegmentPolicy, SinglyList};
use holdall_testkit::Corp;

fn build(n: i64, policy: SegmentPolicy) -> SinglyList<Corp> {
    let mut list = SinglyList::with_policy(policy);
    for key in 0..n {
        list.insert(Corp::new(key, "corp"));
    }
    list
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    for (label, policy) in [
        ("auto", SegmentPolicy::Auto),
        ("single-segment", SegmentPolicy::Fixed(0)),
        ("fixed-256", SegmentPolicy::Fixed(256)),
    ] {
        let list = build(10_000, policy);
        // Front to back is 9999..=0; key 0 sits at the very tail.
        group.bench_with_input(BenchmarkId::new(label, "tail-hit"), &list, |b, list| {
            b.iter(|| list.search(&0).unwrap());
        });
        group.bench_with_input(BenchmarkId::new(label, "miss"), &list, |b, list| {
            b.iter(|| list.search(&-1).is_err());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
