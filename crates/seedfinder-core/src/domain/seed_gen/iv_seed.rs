//! Gen 3/4 seeds from an IV box
//!
//! The earlier of the two IV draws carries three stats in its low 15 bits.
//! For every value of those stats inside the box, the draw's state has 2
//! choices for the discarded top bit and 2^16 for the hidden low half. Each
//! such state is stepped back to the frame start; the searcher checks the
//! remaining stats and the PID.

use super::{SeedGenerator, shard_bounds};
use crate::domain::criteria::IvCriteria;
use crate::domain::frame::Gen34Method;
use crate::domain::rng::PokeRngR;
use crate::domain::types::Stat;
use std::sync::Arc;

/// States per IV word value: top bit × low half
const STATES_PER_WORD: u64 = 2 << 16;

#[derive(Clone, Debug)]
pub struct IvSeedGenerator {
    /// Candidate 15-bit IV words, ascending
    words: Arc<[u16]>,
    /// Steps from the frame start to the earlier IV draw
    calls_before: u32,
    next: u64,
    end: u64,
}

impl IvSeedGenerator {
    pub fn new(criteria: &IvCriteria, method: Gen34Method) -> Self {
        let (iv1_call, iv2_call) = method.iv_calls();
        // iv1 = HP | Atk << 5 | Def << 10; iv2 = Spe | SpA << 5 | SpD << 10
        let (stats, calls_before) = if iv1_call < iv2_call {
            ([Stat::Hp, Stat::Atk, Stat::Def], iv1_call)
        } else {
            ([Stat::Spe, Stat::SpA, Stat::SpD], iv2_call)
        };

        let min = criteria.min();
        let max = criteria.max();
        let mut words = Vec::new();
        for c in min.stat(stats[2])..=max.stat(stats[2]) {
            for b in min.stat(stats[1])..=max.stat(stats[1]) {
                for a in min.stat(stats[0])..=max.stat(stats[0]) {
                    words.push(a as u16 | (b as u16) << 5 | (c as u16) << 10);
                }
            }
        }

        let end = words.len() as u64 * STATES_PER_WORD;
        Self {
            words: words.into(),
            calls_before,
            next: 0,
            end,
        }
    }

    #[inline]
    fn seed_at(&self, index: u64) -> u32 {
        let word = self.words[(index / STATES_PER_WORD) as usize] as u32;
        let rest = (index % STATES_PER_WORD) as u32;
        let top = rest >> 16;
        let low = rest & 0xFFFF;
        let state = (top << 31) | (word << 16) | low;

        let mut back = PokeRngR::new(state);
        back.jump(self.calls_before as u64);
        back.state()
    }
}

impl SeedGenerator for IvSeedGenerator {
    type Seed = u32;

    fn num_seeds(&self) -> u64 {
        self.end.saturating_sub(self.next)
    }

    fn next_seed(&mut self) -> Option<u32> {
        if self.next >= self.end {
            return None;
        }
        let seed = self.seed_at(self.next);
        self.next += 1;
        Some(seed)
    }

    fn split(self, n: usize) -> Vec<Self> {
        shard_bounds(self.next, self.end, n)
            .into_iter()
            .map(|(next, end)| Self {
                words: Arc::clone(&self.words),
                calls_before: self.calls_before,
                next,
                end,
            })
            .collect()
    }
}
