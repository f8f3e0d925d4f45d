//! Pokemon Dream Radar transfers
//!
//! IVs come from MT19937 seeded with the upper half of the raw seed: two
//! outputs are skipped, then each frame reads six outputs and the next
//! frame starts two outputs later. The PID stream skips `slot * 2 + 11`
//! draws (earlier slots consume theirs first) before the PID and nature.

use super::FrameGenerator;
use crate::domain::rng::{BufferedRng, Gen5Rng, LazyMt};
use crate::domain::types::{Ability, Gender, GenderRatio, Ivs, Nature, Pid, TrainerId};
use serde::{Deserialize, Serialize};

const IV_SKIP: u64 = 2;
const IV_STRIDE: u64 = 2;
const ABILITY_BIT: u32 = 0x0001_0000;
const SHINY_LOCK_BIT: u32 = 0x1000_0000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DreamRadarParameters {
    pub id: TrainerId,
    /// Position of the target among the captured Pokemon (1-based)
    pub slot: u8,
    pub gender_ratio: GenderRatio,
    /// Gender shown in the radar for gendered species
    pub gender: Option<Gender>,
}

impl DreamRadarParameters {
    pub fn new(id: TrainerId, slot: u8) -> Self {
        Self {
            id,
            slot,
            gender_ratio: GenderRatio::Genderless,
            gender: None,
        }
    }

    #[inline]
    fn pid_skip(&self) -> u64 {
        self.slot as u64 * 2 + 11
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DreamRadarFrame {
    pub number: u32,
    pub ivs: Ivs,
    pub pid: Pid,
    pub nature: Nature,
    pub gender: Gender,
    pub ability: Ability,
}

#[derive(Clone, Debug)]
pub struct DreamRadarGenerator {
    params: DreamRadarParameters,
    rng: Gen5Rng,
    buffer: BufferedRng<LazyMt, 6>,
    frame: DreamRadarFrame,
}

impl DreamRadarGenerator {
    pub fn new(raw_seed: u64, params: DreamRadarParameters) -> Self {
        let mut buffer = BufferedRng::new(LazyMt::new((raw_seed >> 32) as u32));
        buffer.advance_by(IV_SKIP);
        Self {
            params,
            rng: Gen5Rng::new(raw_seed),
            buffer,
            frame: DreamRadarFrame::default(),
        }
    }

    fn derive(&self, number: u32) -> DreamRadarFrame {
        let p = &self.params;
        let ivs = Ivs::new(std::array::from_fn(|i| (self.buffer.peek(i) >> 27) as u8));

        let mut rng = self.rng;
        rng.jump(p.pid_skip());
        let mut raw = rng.next_u32() ^ ABILITY_BIT;
        if let Some(gender) = p.gender {
            raw = (raw & !0xFF) | p.gender_ratio.force_low_byte(raw as u8, gender) as u32;
        }
        if Pid(raw).is_shiny(p.id) {
            raw ^= SHINY_LOCK_BIT;
        }
        let pid = Pid(raw);
        let nature = Nature::from_index(rng.rand(25));

        DreamRadarFrame {
            number,
            ivs,
            pid,
            nature,
            gender: pid.gender(p.gender_ratio),
            ability: Ability::Hidden,
        }
    }
}

impl FrameGenerator for DreamRadarGenerator {
    type Frame = DreamRadarFrame;

    fn advance(&mut self) {
        self.frame = self.derive(self.frame.number + 1);
        self.rng.next_u64();
        self.buffer.advance_by(IV_STRIDE);
    }

    fn skip(&mut self, n: u32) {
        if n == 0 {
            return;
        }
        self.rng.jump(n as u64 - 1);
        self.buffer.advance_by((n as u64 - 1) * IV_STRIDE);
        self.frame.number += n - 1;
        self.advance();
    }

    fn current(&self) -> &DreamRadarFrame {
        &self.frame
    }

    fn frame_number(&self) -> u32 {
        self.frame.number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rng::Mt;

    const SEED: u64 = 0x9B3E_7C4B_C185_AE31;

    #[test]
    fn test_iv_windows() {
        let mut mt = Mt::new(0x9B3E_7C4B);
        let outputs: Vec<u8> = (0..30).map(|_| (mt.next_u32() >> 27) as u8).collect();

        let mut generator = DreamRadarGenerator::new(SEED, DreamRadarParameters::new(TrainerId::default(), 1));
        for n in 1..=5usize {
            generator.advance();
            let start = 2 + (n - 1) * 2;
            let expected: [u8; 6] = std::array::from_fn(|i| outputs[start + i]);
            assert_eq!(generator.current().ivs.values(), expected, "frame {n}");
        }
    }

    #[test]
    fn test_pid_after_slot_skip() {
        let params = DreamRadarParameters::new(TrainerId::new(1, 2), 3);
        let mut generator = DreamRadarGenerator::new(SEED, params);
        generator.advance();

        let mut rng = Gen5Rng::new(SEED);
        rng.jump(17);
        let raw = rng.next_u32() ^ ABILITY_BIT;
        let expected = if Pid(raw).is_shiny(params.id) { raw ^ SHINY_LOCK_BIT } else { raw };
        assert_eq!(generator.current().pid, Pid(expected));
        assert_eq!(generator.current().nature, Nature::from_index(rng.rand(25)));
        assert_eq!(generator.current().ability, Ability::Hidden);
    }

    #[test]
    fn test_forced_gender_and_shiny_lock() {
        let mut params = DreamRadarParameters::new(TrainerId::new(777, 888), 2);
        params.gender_ratio = GenderRatio::Even;
        params.gender = Some(Gender::Male);
        let mut generator = DreamRadarGenerator::new(SEED, params);
        for _ in 0..300 {
            generator.advance();
            let frame = generator.current();
            assert_eq!(frame.gender, Gender::Male);
            assert!(!frame.pid.is_shiny(params.id));
        }
    }

    #[test]
    fn test_skip_matches_advance() {
        let params = DreamRadarParameters::new(TrainerId::default(), 4);
        let mut stepped = DreamRadarGenerator::new(SEED, params);
        for _ in 0..15 {
            stepped.advance();
        }
        let mut skipped = DreamRadarGenerator::new(SEED, params);
        skipped.skip(15);
        assert_eq!(stepped.current(), skipped.current());
    }
}
