//! Frames consumed on the Gen 5 PID stream before control is handed over
//!
//! At boot the game walks a small probability table a few times. The walk
//! length depends on the raw seed only, so it is computed once per seed.

use crate::domain::rng::Gen5Rng;

/// Per-row thresholds; a draw `<=` the threshold ends the row, 100 always does
const PROBABILITY_TABLE: [[u32; 5]; 6] = [
    [50, 100, 100, 100, 100],
    [50, 50, 100, 100, 100],
    [30, 50, 100, 100, 100],
    [25, 30, 50, 100, 100],
    [20, 25, 33, 50, 100],
    [100, 100, 100, 100, 100],
];

/// Count-of-draws walker over a Gen5Rng
struct Walker {
    rng: Gen5Rng,
    consumed: u32,
}

impl Walker {
    fn new(raw_seed: u64) -> Self {
        Self {
            rng: Gen5Rng::new(raw_seed),
            consumed: 0,
        }
    }

    #[inline]
    fn draw(&mut self, n: u32) -> u32 {
        self.consumed += 1;
        self.rng.rand(n)
    }

    fn skip(&mut self, n: u32) {
        self.rng.jump(n as u64);
        self.consumed += n;
    }

    /// Walk the whole table `loops` times
    fn probability_table(&mut self, loops: u32) {
        for _ in 0..loops {
            for row in &PROBABILITY_TABLE {
                for &threshold in row {
                    if threshold == 100 {
                        break;
                    }
                    if self.draw(101) <= threshold {
                        break;
                    }
                }
            }
        }
    }

    /// Draw triples of `rand(15)` until all three differ
    fn distinct_triple(&mut self) {
        loop {
            let a = self.draw(15);
            let b = self.draw(15);
            let c = self.draw(15);
            if a != b && b != c && a != c {
                break;
            }
        }
    }
}

/// Black / White, continuing a save
pub fn bw_continue(raw_seed: u64) -> u32 {
    let mut walker = Walker::new(raw_seed);
    walker.probability_table(5);
    walker.consumed
}

/// Black / White, starting a new game (frames before the trainer ID draw)
pub fn bw_new_game(raw_seed: u64) -> u32 {
    let mut walker = Walker::new(raw_seed);
    walker.probability_table(3);
    walker.skip(3);
    walker.consumed
}

/// Black 2 / White 2, continuing a save
pub fn bw2_continue(raw_seed: u64, memory_link: bool) -> u32 {
    let mut walker = Walker::new(raw_seed);
    walker.probability_table(1);
    walker.skip(if memory_link { 2 } else { 3 });
    walker.probability_table(4);
    walker.distinct_triple();
    walker.consumed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bw2_continue() {
        assert_eq!(bw2_continue(0x490C_C591_E17E_7DB7, false), 55);
        assert_eq!(bw2_continue(0x490C_C591_E17E_7DB7, true), 52);
    }

    #[test]
    fn test_bw_continue() {
        assert_eq!(bw_continue(0x490C_C591_E17E_7DB7), 49);
        assert_eq!(bw_continue(0x1A10_ACAE_7DB5_3656), 44);
    }

    #[test]
    fn test_bw_new_game() {
        assert_eq!(bw_new_game(0x48B9_6278_DC62_33AB), 34);
    }
}
