//! Gen 4 breeding
//!
//! Egg PIDs and egg IVs come from two different engines:
//!
//! - PID: MT19937 seeded with the initial seed, one output per frame.
//!   With the Masuda method a non-shiny PID is rerolled through [`ARng`] up
//!   to four times.
//! - IVs: [`PokeRng`], two IV words followed by the inheritance draws.

use super::{BREEDING_ORDER, FrameGenerator, Inheritance, Parent, apply_inheritance};
use crate::domain::rng::{ARng, Mt, PokeRng, Rng};
use crate::domain::types::{Ivs, Pid, Stat, TrainerId};
use serde::{Deserialize, Serialize};

/// Masuda method rerolls after the first PID
const MASUDA_REROLLS: u32 = 4;

// =============================================================================
// Egg PID
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gen4EggPidFrame {
    pub number: u32,
    pub pid: Pid,
    /// Number of ARng rerolls applied
    pub rerolls: u32,
}

#[derive(Clone, Debug)]
pub struct Gen4EggPidGenerator {
    mt: Mt,
    masuda: bool,
    id: TrainerId,
    frame: Gen4EggPidFrame,
}

impl Gen4EggPidGenerator {
    pub fn new(seed: u32, masuda: bool, id: TrainerId) -> Self {
        Self {
            mt: Mt::new(seed),
            masuda,
            id,
            frame: Gen4EggPidFrame::default(),
        }
    }

    fn derive(&self, number: u32, output: u32) -> Gen4EggPidFrame {
        let mut pid = output;
        let mut rerolls = 0;
        if self.masuda {
            while rerolls < MASUDA_REROLLS && !Pid(pid).is_shiny(self.id) {
                pid = ARng::step(pid);
                rerolls += 1;
            }
        }
        Gen4EggPidFrame {
            number,
            pid: Pid(pid),
            rerolls,
        }
    }
}

impl FrameGenerator for Gen4EggPidGenerator {
    type Frame = Gen4EggPidFrame;

    fn advance(&mut self) {
        let output = self.mt.next_u32();
        self.frame = self.derive(self.frame.number + 1, output);
    }

    fn skip(&mut self, n: u32) {
        if n == 0 {
            return;
        }
        self.mt.advance_by(n as u64 - 1);
        self.frame.number += n - 1;
        self.advance();
    }

    fn current(&self) -> &Gen4EggPidFrame {
        &self.frame
    }

    fn frame_number(&self) -> u32 {
        self.frame.number
    }
}

// =============================================================================
// Egg IVs
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gen4EggMethod {
    /// Diamond / Pearl / Platinum: each pick removes the stat from the pool
    Dppt,
    /// HeartGold / SoulSilver: duplicates are redrawn
    Hgss,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gen4EggIvFrame {
    pub number: u32,
    pub seed: u32,
    /// IVs before inheritance
    pub ivs: Ivs,
    pub inheritance: [Inheritance; 3],
}

impl Gen4EggIvFrame {
    /// Final IVs given both parents
    pub fn resolve(&self, parent_a: Ivs, parent_b: Ivs) -> Ivs {
        apply_inheritance(self.ivs, &self.inheritance, parent_a, parent_b)
    }
}

#[derive(Clone, Debug)]
pub struct Gen4EggIvGenerator {
    method: Gen4EggMethod,
    rng: PokeRng,
    frame: Gen4EggIvFrame,
}

impl Gen4EggIvGenerator {
    pub fn new(seed: u32, method: Gen4EggMethod) -> Self {
        Self {
            method,
            rng: PokeRng::new(seed),
            frame: Gen4EggIvFrame::default(),
        }
    }

    fn pick_stats(&self, rng: &mut PokeRng) -> [Stat; 3] {
        let mut picked = [Stat::Hp; 3];
        match self.method {
            Gen4EggMethod::Dppt => {
                let mut pool = BREEDING_ORDER.to_vec();
                for (k, slot) in picked.iter_mut().enumerate() {
                    let index = rng.next_u16() as usize % (6 - k);
                    *slot = pool.remove(index);
                }
            }
            Gen4EggMethod::Hgss => {
                let mut count = 0;
                while count < 3 {
                    let stat = BREEDING_ORDER[rng.next_u16() as usize % 6];
                    if picked[..count].contains(&stat) {
                        continue;
                    }
                    picked[count] = stat;
                    count += 1;
                }
            }
        }
        picked
    }

    fn derive(&self, number: u32) -> Gen4EggIvFrame {
        let seed = self.rng.state();
        let mut rng = self.rng;

        let iv1 = rng.next_u16();
        let iv2 = rng.next_u16();
        let stats = self.pick_stats(&mut rng);
        let inheritance = stats.map(|stat| Inheritance {
            stat,
            parent: Parent::from_bit(rng.next_u16() as u32),
        });

        Gen4EggIvFrame {
            number,
            seed,
            ivs: Ivs::from_gen34_words(iv1, iv2),
            inheritance,
        }
    }
}

impl FrameGenerator for Gen4EggIvGenerator {
    type Frame = Gen4EggIvFrame;

    fn advance(&mut self) {
        self.frame = self.derive(self.frame.number + 1);
        self.rng.next_u32();
    }

    fn skip(&mut self, n: u32) {
        if n == 0 {
            return;
        }
        self.rng.jump(n as u64 - 1);
        self.frame.number += n - 1;
        self.advance();
    }

    fn current(&self) -> &Gen4EggIvFrame {
        &self.frame
    }

    fn frame_number(&self) -> u32 {
        self.frame.number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_egg_pid_golden() {
        let mut generator = Gen4EggPidGenerator::new(0x1234_5678, false, TrainerId::default());
        generator.advance();
        assert_eq!(generator.current().pid, Pid(0xC697_9343));
        generator.skip(2);
        assert_eq!(generator.current().number, 3);
        assert_eq!(generator.current().pid, Pid(0xA73A_24A4));
    }

    #[test]
    fn test_masuda_rerolls() {
        let id = TrainerId::new(12345, 54321);
        let mut generator = Gen4EggPidGenerator::new(0x1234_5678, true, id);
        generator.advance();
        let frame = generator.current();
        assert_eq!(frame.rerolls, 4);
        assert_eq!(frame.pid, Pid(0xCD88_83EF));

        let mut expected = 0xC697_9343u32;
        for _ in 0..4 {
            expected = ARng::step(expected);
        }
        assert_eq!(frame.pid.raw(), expected);
    }

    #[test]
    fn test_masuda_stops_on_shiny() {
        let mut generator = Gen4EggPidGenerator::new(0x1234_5678, true, TrainerId::default());
        let mut plain = Gen4EggPidGenerator::new(0x1234_5678, false, TrainerId::default());
        for _ in 0..500 {
            generator.advance();
            plain.advance();
            let frame = generator.current();
            if plain.current().pid.is_shiny(TrainerId::default()) {
                assert_eq!(frame.rerolls, 0);
            }
            if frame.rerolls < MASUDA_REROLLS {
                assert!(frame.pid.is_shiny(TrainerId::default()));
            }
        }
    }

    #[test]
    fn test_dppt_egg_ivs_golden() {
        let mut generator = Gen4EggIvGenerator::new(0x1234_5678, Gen4EggMethod::Dppt);
        generator.advance();
        let frame = generator.current();
        assert_eq!(frame.ivs.values(), [17, 27, 2, 7, 1, 10]);
        assert_eq!(
            frame.inheritance,
            [
                Inheritance { stat: Stat::SpA, parent: Parent::B },
                Inheritance { stat: Stat::Spe, parent: Parent::A },
                Inheritance { stat: Stat::Hp, parent: Parent::B },
            ]
        );

        let resolved = frame.resolve(Ivs::new([31; 6]), Ivs::new([0; 6]));
        assert_eq!(resolved.values(), [0, 27, 2, 0, 1, 31]);
    }

    #[test]
    fn test_hgss_egg_ivs_golden() {
        let mut generator = Gen4EggIvGenerator::new(0x1234_5678, Gen4EggMethod::Hgss);
        generator.advance();
        assert_eq!(
            generator.current().inheritance,
            [
                Inheritance { stat: Stat::SpA, parent: Parent::B },
                Inheritance { stat: Stat::Hp, parent: Parent::A },
                Inheritance { stat: Stat::Def, parent: Parent::B },
            ]
        );
    }

    #[test]
    fn test_inherited_stats_distinct() {
        for method in [Gen4EggMethod::Dppt, Gen4EggMethod::Hgss] {
            let mut generator = Gen4EggIvGenerator::new(0xFEED, method);
            for _ in 0..300 {
                generator.advance();
                let stats = generator.current().inheritance.map(|i| i.stat);
                assert!(stats[0] != stats[1] && stats[1] != stats[2] && stats[0] != stats[2]);
            }
        }
    }

    #[test]
    fn test_skip_matches_advance() {
        let mut stepped = Gen4EggIvGenerator::new(99, Gen4EggMethod::Hgss);
        for _ in 0..40 {
            stepped.advance();
        }
        let mut skipped = Gen4EggIvGenerator::new(99, Gen4EggMethod::Hgss);
        skipped.skip(40);
        assert_eq!(stepped.current(), skipped.current());

        let mut stepped = Gen4EggPidGenerator::new(99, false, TrainerId::default());
        for _ in 0..700 {
            stepped.advance();
        }
        let mut skipped = Gen4EggPidGenerator::new(99, false, TrainerId::default());
        skipped.skip(700);
        assert_eq!(stepped.current(), skipped.current());
    }
}
