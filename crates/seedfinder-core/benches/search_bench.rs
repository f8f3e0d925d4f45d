//! Search benchmarks: simulation vs seed cache, single vs threaded

use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use seedfinder_core::app::cache_builder::CacheBuilder;
use seedfinder_core::app::cache_manager::{CacheShape, SeedCache};
use seedfinder_core::app::searchers::{Gen34SeedCriteria, Gen34SeedSearch};
use seedfinder_core::domain::cache_format::{CacheEntry, CacheKind, IvPattern};
use seedfinder_core::domain::frame::Gen34Method;
use seedfinder_core::domain::types::{Ivs, TrainerId};
use seedfinder_core::{FrameRange, IvCriteria, PidCriteria, SearchOptions, SearchRunner};

const SPECIAL: CacheKind = CacheKind::new(IvPattern::SpecialFlawless, false);

fn ci_criterion() -> Criterion {
    Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(10))
}

fn bench_cache_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_scan");
    let builder = CacheBuilder::new(SPECIAL, 8).unwrap();

    group.bench_function("scan_1m_seeds", |b| {
        b.iter(|| builder.scan_range(black_box(1_000_000), 1_999_999))
    });

    group.finish();
}

fn bench_cache_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_lookup");
    let entries: Vec<CacheEntry> = (0..200_000u32)
        .map(|i| CacheEntry {
            iv_seed: i.wrapping_mul(21_473),
            frame: i % 8 + 1,
            iv_word: 0x3FFF_FFFF,
        })
        .collect();

    for shape in [CacheShape::Sorted, CacheShape::Hashed] {
        let cache = SeedCache::from_entries(entries.clone(), shape);
        group.bench_function(format!("{shape:?}"), |b| {
            b.iter(|| {
                let mut found = 0usize;
                for seed in (0..100_000u32).map(|i| i.wrapping_mul(7_919)) {
                    found += cache.lookup(black_box(seed)).len();
                }
                found
            })
        });
    }

    group.finish();
}

fn bench_gen34_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen34_search");
    let search = Gen34SeedSearch::new(Gen34SeedCriteria {
        method: Gen34Method::Method1,
        ivs: IvCriteria::at_least(Ivs::new([31, 31, 31, 31, 31, 31])),
        pid: PidCriteria::any(),
        frames: FrameRange::new(1, 10).unwrap(),
        id: TrainerId::default(),
    });

    for threads in [1, 4] {
        let runner = SearchRunner::new(SearchOptions { threads: Some(threads) });
        group.bench_function(format!("flawless_threads_{threads}"), |b| {
            b.iter(|| runner.run(&search, |r| { black_box(r); }, |_| true).unwrap())
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = ci_criterion();
    targets =
        bench_cache_scan,
        bench_cache_lookup,
        bench_gen34_search,
}

criterion_main!(benches);
