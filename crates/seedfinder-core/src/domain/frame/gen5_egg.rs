//! Gen 5 breeding
//!
//! An egg frame reads the PID stream in this order:
//!
//! ```text
//! [species coin] nature [everstone coin] [hidden ability roll]
//! inheritance pairs (stat, parent) ... PID attempts
//! ```
//!
//! The IVs themselves come from the IV stream; [`Gen5EggFrame::resolve`]
//! applies the inheritance to an IV frame.

use super::{BREEDING_ORDER, FrameGenerator, Inheritance, Parent, apply_inheritance};
use crate::domain::rng::Gen5Rng;
use crate::domain::types::{Ability, Gender, GenderRatio, GameVersion, Ivs, Nature, Pid, TrainerId};
use serde::{Deserialize, Serialize};

/// A roll below this passes the mother's hidden ability
const HIDDEN_ABILITY_THRESHOLD: u32 = 60;

const MASUDA_EXTRA_ROLLS: u32 = 5;
const SHINY_CHARM_EXTRA_ROLLS: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gen5EggParameters {
    pub id: TrainerId,
    pub version: GameVersion,
    pub gender_ratio: GenderRatio,
    /// Mother is Nidoran-F or Illumise: the species is a coin flip and
    /// decides the gender (0 = mother's species, female)
    pub species_coin: bool,
    /// Nature of the parent holding an Everstone
    pub everstone: Option<Nature>,
    /// Mother has her hidden ability
    pub hidden_ability_mother: bool,
    /// Parents from different-language games
    pub masuda: bool,
    pub shiny_charm: bool,
}

impl Gen5EggParameters {
    pub fn new(id: TrainerId, version: GameVersion) -> Self {
        Self {
            id,
            version,
            gender_ratio: GenderRatio::Even,
            species_coin: false,
            everstone: None,
            hidden_ability_mother: false,
            masuda: false,
            shiny_charm: false,
        }
    }

    fn pid_rolls(&self) -> u32 {
        let mut rolls = 1;
        if self.masuda {
            rolls += MASUDA_EXTRA_ROLLS;
        }
        if self.shiny_charm && self.version.is_sequel() {
            rolls += SHINY_CHARM_EXTRA_ROLLS;
        }
        rolls
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gen5EggFrame {
    pub number: u32,
    pub seed: u64,
    /// Species coin result (0 = mother's species) when it was drawn
    pub species: Option<u32>,
    pub nature: Nature,
    pub everstone_applied: bool,
    pub ability: Ability,
    pub inheritance: [Inheritance; 3],
    pub pid: Pid,
    pub gender: Gender,
    pub shiny: bool,
}

impl Gen5EggFrame {
    /// Final IVs from an IV frame and both parents
    pub fn resolve(&self, ivs: Ivs, parent_a: Ivs, parent_b: Ivs) -> Ivs {
        apply_inheritance(ivs, &self.inheritance, parent_a, parent_b)
    }
}

#[derive(Clone, Debug)]
pub struct Gen5EggGenerator {
    params: Gen5EggParameters,
    rng: Gen5Rng,
    frame: Gen5EggFrame,
}

impl Gen5EggGenerator {
    pub fn new(raw_seed: u64, params: Gen5EggParameters) -> Self {
        Self {
            params,
            rng: Gen5Rng::new(raw_seed),
            frame: Gen5EggFrame::default(),
        }
    }

    fn derive(&self, number: u32) -> Gen5EggFrame {
        let p = &self.params;
        let seed = self.rng.state();
        let mut rng = self.rng;

        let species = p.species_coin.then(|| rng.coin());

        let mut nature = Nature::from_index(rng.rand(25));
        let mut everstone_applied = false;
        if let Some(everstone) = p.everstone {
            if rng.coin() == 1 {
                nature = everstone;
                everstone_applied = true;
            }
        }

        let hidden = p.hidden_ability_mother && rng.rand(100) < HIDDEN_ABILITY_THRESHOLD;

        let mut inheritance = [Inheritance::default(); 3];
        let mut count = 0;
        while count < 3 {
            let stat = BREEDING_ORDER[rng.rand(6) as usize];
            let parent = Parent::from_bit(rng.coin());
            if inheritance[..count].iter().any(|i| i.stat == stat) {
                continue;
            }
            inheritance[count] = Inheritance { stat, parent };
            count += 1;
        }

        let mut pid = Pid(rng.next_u32());
        for _ in 1..p.pid_rolls() {
            if pid.is_shiny(p.id) {
                break;
            }
            pid = Pid(rng.next_u32());
        }

        Gen5EggFrame {
            number,
            seed,
            species,
            nature,
            everstone_applied,
            ability: if hidden { Ability::Hidden } else { pid.ability_gen5() },
            inheritance,
            pid,
            gender: match species {
                Some(0) => Gender::Female,
                Some(_) => Gender::Male,
                None => pid.gender(p.gender_ratio),
            },
            shiny: pid.is_shiny(p.id),
        }
    }
}

impl FrameGenerator for Gen5EggGenerator {
    type Frame = Gen5EggFrame;

    fn advance(&mut self) {
        self.frame = self.derive(self.frame.number + 1);
        self.rng.next_u64();
    }

    fn skip(&mut self, n: u32) {
        if n == 0 {
            return;
        }
        self.rng.jump(n as u64 - 1);
        self.frame.number += n - 1;
        self.advance();
    }

    fn current(&self) -> &Gen5EggFrame {
        &self.frame
    }

    fn frame_number(&self) -> u32 {
        self.frame.number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Stat;

    const SEED: u64 = 0x490C_C591_E17E_7DB7;

    fn params() -> Gen5EggParameters {
        Gen5EggParameters::new(TrainerId::new(1000, 2000), GameVersion::Black2)
    }

    #[test]
    fn test_plain_draw_order() {
        let mut generator = Gen5EggGenerator::new(SEED, params());
        generator.advance();
        let frame = generator.current();

        let mut rng = Gen5Rng::new(SEED);
        let nature = Nature::from_index(rng.rand(25));
        let mut stats = Vec::new();
        while stats.len() < 3 {
            let stat = BREEDING_ORDER[rng.rand(6) as usize];
            rng.coin();
            if !stats.contains(&stat) {
                stats.push(stat);
            }
        }
        let pid = Pid(rng.next_u32());

        assert_eq!(frame.species, None);
        assert_eq!(frame.nature, nature);
        assert_eq!(frame.inheritance.map(|i| i.stat).to_vec(), stats);
        assert_eq!(frame.pid, pid);
    }

    #[test]
    fn test_species_coin_sets_gender() {
        let mut p = params();
        p.species_coin = true;
        p.gender_ratio = GenderRatio::FemaleOnly;
        let mut generator = Gen5EggGenerator::new(SEED, p);
        let mut males = 0;
        for _ in 0..200 {
            generator.advance();
            let frame = generator.current();
            let coin = frame.species.unwrap();
            let expected = if coin == 0 { Gender::Female } else { Gender::Male };
            assert_eq!(frame.gender, expected);
            males += (frame.gender == Gender::Male) as u32;
        }
        assert!((60..140).contains(&males), "males = {males}");

        let mut first = Gen5EggGenerator::new(SEED, p);
        first.advance();
        let mut rng = Gen5Rng::new(SEED);
        assert_eq!(first.current().species, Some(rng.coin()));
    }

    #[test]
    fn test_everstone() {
        let mut p = params();
        p.everstone = Some(Nature::Jolly);
        let mut generator = Gen5EggGenerator::new(SEED, p);
        let mut applied = 0;
        for _ in 0..400 {
            generator.advance();
            let frame = generator.current();
            if frame.everstone_applied {
                applied += 1;
                assert_eq!(frame.nature, Nature::Jolly);
            }
        }
        assert!((150..250).contains(&applied), "applied = {applied}");
    }

    #[test]
    fn test_hidden_ability_rate() {
        let mut p = params();
        p.hidden_ability_mother = true;
        let mut generator = Gen5EggGenerator::new(SEED, p);
        let mut hidden = 0;
        for _ in 0..1000 {
            generator.advance();
            hidden += (generator.current().ability == Ability::Hidden) as u32;
        }
        assert!((520..680).contains(&hidden), "hidden = {hidden}");
    }

    #[test]
    fn test_pid_rolls() {
        let mut p = params();
        p.masuda = true;
        p.shiny_charm = true;
        assert_eq!(p.pid_rolls(), 8);
        p.version = GameVersion::White;
        assert_eq!(p.pid_rolls(), 6);
    }

    #[test]
    fn test_resolve() {
        let mut generator = Gen5EggGenerator::new(SEED, params());
        generator.advance();
        let frame = generator.current();
        let resolved = frame.resolve(Ivs::new([5; 6]), Ivs::new([31; 6]), Ivs::new([30; 6]));
        let inherited: Vec<Stat> = frame.inheritance.iter().map(|i| i.stat).collect();
        for stat in Stat::ALL {
            let value = resolved.stat(stat);
            if inherited.contains(&stat) {
                assert!(value == 31 || value == 30);
            } else {
                assert_eq!(value, 5);
            }
        }
    }

    #[test]
    fn test_skip_matches_advance() {
        let mut p = params();
        p.species_coin = true;
        p.everstone = Some(Nature::Bold);
        let mut stepped = Gen5EggGenerator::new(SEED, p);
        for _ in 0..25 {
            stepped.advance();
        }
        let mut skipped = Gen5EggGenerator::new(SEED, p);
        skipped.skip(25);
        assert_eq!(stepped.current(), skipped.current());
    }
}
