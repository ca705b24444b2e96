use std::time::Duration;

use criterion::{
    black_box, criterion_group, criterion_main, measurement::WallTime, BatchSize, BenchmarkGroup,
    Criterion, SamplingMode,
};
use valuenav::{parse_path, value, GlobPattern, OwnedPath, Value};

fn make_tree(width: usize, depth: usize) -> Value {
    if depth == 0 {
        return value!("leaf");
    }

    let children = (0..width)
        .map(|i| (format!("key{i}"), make_tree(width, depth - 1)))
        .collect::<Vec<_>>();
    let items = (0..width).map(|i| value!(i as i64)).collect::<Vec<_>>();

    children
        .into_iter()
        .chain(std::iter::once(("items".to_owned(), Value::Array(items))))
        .collect()
}

fn navigate_bench(c: &mut Criterion) {
    let mut group: BenchmarkGroup<WallTime> = c.benchmark_group("valuenav::navigate");
    group.sampling_mode(SamplingMode::Auto);

    let root = make_tree(4, 6);
    let path = parse_path("key3.key2.key1.key0.key3.items.2");

    group.bench_function("parse_path escaped", |b| {
        b.iter(|| black_box(parse_path(black_box(r"metadata.annotations.example\.com/hash"))))
    });

    group.bench_function("navigate found", |b| {
        b.iter(|| {
            let navigation = black_box(root.navigate(&path)).unwrap();
            assert!(navigation.found);
        })
    });

    group.bench_function("navigate missing", |b| {
        b.iter(|| {
            let navigation = black_box(root.navigate("key3.key2.nope.key0")).unwrap();
            assert!(!navigation.found);
        })
    });

    group.bench_function("enumerate", |b| {
        b.iter(|| black_box(root.iter_paths().count()))
    });

    group.finish();
}

fn mutate_bench(c: &mut Criterion) {
    let mut group: BenchmarkGroup<WallTime> = c.benchmark_group("valuenav::mutate");
    group.sampling_mode(SamplingMode::Auto);

    let path: OwnedPath = parse_path("key0.key1.items.0");
    let glob = GlobPattern::new("*.items").unwrap();

    group.bench_function("delete_if_exists", move |b| {
        b.iter_batched(
            || make_tree(4, 4),
            |mut root: Value| {
                assert!(black_box(root.delete_if_exists(&path)).unwrap().is_some());
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("delete_matching *.items", move |b| {
        b.iter_batched(
            || make_tree(4, 4),
            |mut root: Value| {
                let deleted = black_box(valuenav::delete_matching(&mut root, &glob)).unwrap();
                assert!(deleted > 0);
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_secs(3))
        .measurement_time(Duration::from_secs(30))
        // degree of noise to ignore in measurements, here 1%
        .noise_threshold(0.01)
        // likelihood of noise registering as difference, here 5%
        .significance_level(0.05)
        // likelihood of capturing the true runtime, here 95%
        .confidence_level(0.95);
    targets = navigate_bench, mutate_bench
);
criterion_main!(benches);
