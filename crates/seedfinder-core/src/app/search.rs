//! Search workflow
//!
//! This module runs a [`FrameSearcher`] over every seed of a
//! [`SeedGenerator`], either on the calling thread or sharded across worker
//! threads.
//!
//! Threaded searches use scoped threads and one channel. Workers send
//! `Match`, `Progress` and `Finished` events; the calling thread blocks on the
//! channel, forwards matches, sums progress, and latches a cancel request
//! into a shared flag that workers poll once per progress interval.

use crate::constants::progress_interval;
use crate::domain::criteria::{CriteriaError, FrameRange};
use crate::domain::frame::FrameGenerator;
use crate::domain::seed_gen::SeedGenerator;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use tracing::{debug, info};

// =============================================================================
// Searcher contracts
// =============================================================================

/// Checks the frames of one seed
pub trait FrameSearcher: Sync {
    type Seed;
    type Result: Send;

    /// Call `on_match` once for every matching frame of `seed`
    fn search_seed(&self, seed: Self::Seed, on_match: &mut dyn FnMut(Self::Result));
}

/// A searcher that also knows its seed space
pub trait Search: FrameSearcher {
    type Seeds: SeedGenerator<Seed = Self::Seed>;

    fn seeds(&self) -> Result<Self::Seeds, CriteriaError>;
}

/// Advance `generator` to `range.min()` and visit every frame through
/// `range.max()`
///
/// Frames at or before the generator's current position are not revisited,
/// so generators that start at an offset clip the window.
pub fn scan_window<G: FrameGenerator>(generator: &mut G, range: FrameRange, mut visit: impl FnMut(&G::Frame)) {
    let start = range.min().max(generator.frame_number() + 1);
    if start > range.max() {
        return;
    }
    generator.skip(start - generator.frame_number());
    visit(generator.current());
    while generator.frame_number() < range.max() {
        generator.advance();
        visit(generator.current());
    }
}

/// Searcher built from a generator factory and a frame predicate
///
/// Results are `(seed, frame)` pairs.
pub struct WindowSearcher<S, F, P> {
    range: FrameRange,
    factory: F,
    predicate: P,
    _seed: PhantomData<fn(S)>,
}

impl<S, F, P> WindowSearcher<S, F, P> {
    pub fn new(range: FrameRange, factory: F, predicate: P) -> Self {
        Self {
            range,
            factory,
            predicate,
            _seed: PhantomData,
        }
    }
}

impl<S, G, F, P> FrameSearcher for WindowSearcher<S, F, P>
where
    S: Clone + Send,
    G: FrameGenerator,
    G::Frame: Clone + Send,
    F: Fn(&S) -> G + Sync,
    P: Fn(&G::Frame) -> bool + Sync,
{
    type Seed = S;
    type Result = (S, G::Frame);

    fn search_seed(&self, seed: S, on_match: &mut dyn FnMut(Self::Result)) {
        let mut generator = (self.factory)(&seed);
        scan_window(&mut generator, self.range, |frame| {
            if (self.predicate)(frame) {
                on_match((seed.clone(), frame.clone()));
            }
        });
    }
}

// =============================================================================
// Runner
// =============================================================================

/// Runner configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Worker threads (`None` = one per available core)
    pub threads: Option<usize>,
}

impl SearchOptions {
    pub fn single_threaded() -> Self {
        Self { threads: Some(1) }
    }

    pub fn thread_count(&self) -> usize {
        self.threads
            .unwrap_or_else(|| thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
            .max(1)
    }
}

/// Outcome counters of one search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchSummary {
    pub seeds_searched: u64,
    pub results: u64,
    pub cancelled: bool,
}

enum Event<R> {
    Match(R),
    Progress(u64),
    Finished { searched: u64 },
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SearchRunner {
    options: SearchOptions,
}

impl SearchRunner {
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }

    /// Search `search`'s seed space with the configured thread count
    pub fn run<S, R, P>(&self, search: &S, on_result: R, on_progress: P) -> Result<SearchSummary, CriteriaError>
    where
        S: Search,
        S::Seed: Send,
        R: FnMut(S::Result),
        P: FnMut(f64) -> bool,
    {
        let seeds = search.seeds()?;
        if self.options.thread_count() == 1 {
            Ok(Self::search(seeds, search, on_result, on_progress))
        } else {
            Ok(self.search_threaded(seeds, search, on_result, on_progress))
        }
    }

    /// Search on the calling thread
    ///
    /// `on_progress` receives the percentage of the whole space covered
    /// since its last call; returning `false` stops the search.
    pub fn search<G, S, R, P>(mut seeds: G, searcher: &S, mut on_result: R, mut on_progress: P) -> SearchSummary
    where
        G: SeedGenerator,
        S: FrameSearcher<Seed = G::Seed> + ?Sized,
        R: FnMut(S::Result),
        P: FnMut(f64) -> bool,
    {
        let total = seeds.num_seeds();
        let interval = progress_interval(total);
        info!(seeds = total, threads = 1, "search started");

        let mut summary = SearchSummary::default();
        let mut pending = 0u64;
        while let Some(seed) = seeds.next_seed() {
            searcher.search_seed(seed, &mut |result| {
                summary.results += 1;
                on_result(result);
            });
            summary.seeds_searched += 1;
            pending += 1;
            if pending == interval {
                pending = 0;
                if !on_progress(percent(interval, total)) {
                    summary.cancelled = true;
                    break;
                }
            }
        }
        if !summary.cancelled && pending > 0 {
            on_progress(percent(pending, total));
        }

        info!(
            searched = summary.seeds_searched,
            results = summary.results,
            cancelled = summary.cancelled,
            "search finished"
        );
        summary
    }

    /// Shard the seed space across worker threads
    ///
    /// Callbacks run on the calling thread. Results from different shards
    /// arrive in no particular order.
    pub fn search_threaded<G, S, R, P>(
        &self,
        seeds: G,
        searcher: &S,
        mut on_result: R,
        mut on_progress: P,
    ) -> SearchSummary
    where
        G: SeedGenerator,
        S: FrameSearcher<Seed = G::Seed> + ?Sized,
        R: FnMut(S::Result),
        P: FnMut(f64) -> bool,
    {
        let total = seeds.num_seeds();
        let interval = progress_interval(total);
        let shards = seeds.split(self.options.thread_count());
        info!(seeds = total, threads = shards.len(), "search started");
        for (i, shard) in shards.iter().enumerate() {
            debug!(shard = i, seeds = shard.num_seeds(), "shard layout");
        }

        let cancel = AtomicBool::new(false);
        let mut summary = SearchSummary::default();

        thread::scope(|scope| {
            let (tx, rx) = mpsc::channel::<Event<S::Result>>();
            let workers = shards.len();

            for mut shard in shards {
                let tx = tx.clone();
                let cancel = &cancel;
                scope.spawn(move || {
                    let mut searched = 0u64;
                    let mut pending = 0u64;
                    while let Some(seed) = shard.next_seed() {
                        searcher.search_seed(seed, &mut |result| {
                            // the receiver outlives every worker
                            let _ = tx.send(Event::Match(result));
                        });
                        searched += 1;
                        pending += 1;
                        if pending == interval {
                            let _ = tx.send(Event::Progress(pending));
                            pending = 0;
                            if cancel.load(Ordering::Relaxed) {
                                break;
                            }
                        }
                    }
                    if pending > 0 {
                        let _ = tx.send(Event::Progress(pending));
                    }
                    let _ = tx.send(Event::Finished { searched });
                });
            }
            drop(tx);

            let mut finished = 0usize;
            while finished < workers {
                let Ok(first) = rx.recv() else {
                    break;
                };
                let mut progressed = 0u64;
                for event in std::iter::once(first).chain(rx.try_iter()) {
                    match event {
                        Event::Match(result) => {
                            summary.results += 1;
                            on_result(result);
                        }
                        Event::Progress(n) => progressed += n,
                        Event::Finished { searched } => {
                            summary.seeds_searched += searched;
                            finished += 1;
                        }
                    }
                }
                if progressed > 0
                    && !cancel.load(Ordering::Relaxed)
                    && !on_progress(percent(progressed, total))
                {
                    cancel.store(true, Ordering::Relaxed);
                }
            }
        });

        summary.cancelled = cancel.load(Ordering::Relaxed);
        info!(
            searched = summary.seeds_searched,
            results = summary.results,
            cancelled = summary.cancelled,
            "search finished"
        );
        summary
    }
}

#[inline]
fn percent(seeds: u64, total: u64) -> f64 {
    if total == 0 {
        return 100.0;
    }
    seeds as f64 * 100.0 / total as f64
}
