//! PRNG and seed derivation benchmarks
//!
//! Small fixed workloads so the whole group finishes within a minute.

use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use seedfinder_core::domain::frame::{FrameGenerator, Gen5IvGenerator, Gen5IvKind};
use seedfinder_core::domain::rng::{Gen5Rng, LazyMt, Mt, PokeRng};
use seedfinder_core::domain::seed::{GameDate, GameTime, HashedSeed, HashedSeedParameters};
use seedfinder_core::domain::types::{ButtonMask, ConsoleType, GameVersion};

fn ci_criterion() -> Criterion {
    Criterion::default()
        .sample_size(15)
        .measurement_time(Duration::from_secs(8))
}

fn bench_lcg(c: &mut Criterion) {
    let mut group = c.benchmark_group("lcg");

    group.bench_function("poke_rng_1000", |b| {
        b.iter(|| {
            let mut rng = PokeRng::new(black_box(0x1234_5678));
            for _ in 0..1000 {
                black_box(rng.next_u16());
            }
        })
    });

    group.bench_function("gen5_rng_jump_1m", |b| {
        b.iter(|| {
            let mut rng = Gen5Rng::new(black_box(0x9B3E_7C4B_C185_AE31));
            rng.jump(1_000_000);
            rng.state()
        })
    });

    group.finish();
}

fn bench_mt(c: &mut Criterion) {
    let mut group = c.benchmark_group("mt");

    group.bench_function("full_init_first_8", |b| {
        b.iter(|| {
            let mut mt = Mt::new(black_box(0xDEAD_BEEF));
            for _ in 0..8 {
                black_box(mt.next_u32());
            }
        })
    });

    group.bench_function("lazy_init_first_8", |b| {
        b.iter(|| {
            let mut mt = LazyMt::new(black_box(0xDEAD_BEEF));
            for _ in 0..8 {
                black_box(mt.next_u32());
            }
        })
    });

    group.bench_function("iv_frames_1_to_8", |b| {
        b.iter(|| {
            let mut generator = Gen5IvGenerator::new(black_box(0xDEAD_BEEF), Gen5IvKind::Normal);
            for _ in 0..8 {
                generator.advance();
                black_box(generator.current());
            }
        })
    });

    group.finish();
}

fn bench_hashed_seed(c: &mut Criterion) {
    let mut group = c.benchmark_group("hashed_seed");
    let params = HashedSeedParameters {
        version: GameVersion::Black,
        console: ConsoleType::DsLite,
        mac_address: 0x0009_BF6D_93CE,
        timer0: 0x0C79,
        vcount: 0x60,
        vframe: 5,
        date: GameDate::new(2011, 3, 15).unwrap(),
        time: GameTime::new(13, 37, 0).unwrap(),
        buttons: ButtonMask::NONE,
    };

    group.bench_function("fresh", |b| {
        b.iter(|| HashedSeed::new(black_box(params)).raw_seed())
    });

    group.bench_function("incremental_second", |b| {
        let mut seed = HashedSeed::new(params);
        let mut second = 0u8;
        b.iter(|| {
            second = (second + 1) % 60;
            seed.set_second(second);
            seed.raw_seed()
        })
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = ci_criterion();
    targets =
        bench_lcg,
        bench_mt,
        bench_hashed_seed,
}

criterion_main!(benches);
