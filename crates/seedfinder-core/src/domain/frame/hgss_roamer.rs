//! HeartGold / SoulSilver roamer locations
//!
//! Each active roamer draws its next route index in turn (Raikou, Entei,
//! then Latias/Latios), redrawing while it equals the route it was on.

use super::FrameGenerator;
use crate::domain::rng::PokeRng;
use serde::{Deserialize, Serialize};

/// Routes Raikou and Entei move between
pub const JOHTO_ROUTES: [u8; 16] = [29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 42, 43, 44, 45, 46];

/// Routes Latias / Latios move between
pub const KANTO_ROUTES: [u8; 25] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 21, 22, 24, 25, 26, 27, 28,
];

/// Current route index of each roamer; `None` means it is not roaming
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HgssRoamers {
    pub raikou: Option<u8>,
    pub entei: Option<u8>,
    pub lati: Option<u8>,
}

/// Route indices after one location update
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HgssRoamerFrame {
    pub number: u32,
    pub seed: u32,
    pub raikou: Option<u8>,
    pub entei: Option<u8>,
    pub lati: Option<u8>,
}

impl HgssRoamerFrame {
    pub fn raikou_route(&self) -> Option<u8> {
        self.raikou.map(|i| JOHTO_ROUTES[i as usize])
    }

    pub fn entei_route(&self) -> Option<u8> {
        self.entei.map(|i| JOHTO_ROUTES[i as usize])
    }

    pub fn lati_route(&self) -> Option<u8> {
        self.lati.map(|i| KANTO_ROUTES[i as usize])
    }
}

fn next_location(rng: &mut PokeRng, routes: usize, previous: u8) -> u8 {
    loop {
        let location = (rng.next_u16() as usize % routes) as u8;
        if location != previous {
            return location;
        }
    }
}

#[derive(Clone, Debug)]
pub struct HgssRoamerGenerator {
    roamers: HgssRoamers,
    rng: PokeRng,
    frame: HgssRoamerFrame,
}

impl HgssRoamerGenerator {
    /// An index at or past the route count never matches, so a roamer that
    /// has no previous location should be passed as `u8::MAX`
    pub fn new(seed: u32, roamers: HgssRoamers) -> Self {
        Self {
            roamers,
            rng: PokeRng::new(seed),
            frame: HgssRoamerFrame::default(),
        }
    }

    fn derive(&self, number: u32) -> HgssRoamerFrame {
        let seed = self.rng.state();
        let mut rng = self.rng;
        let johto = JOHTO_ROUTES.len();
        let kanto = KANTO_ROUTES.len();

        let raikou = self.roamers.raikou.map(|prev| next_location(&mut rng, johto, prev));
        let entei = self.roamers.entei.map(|prev| next_location(&mut rng, johto, prev));
        let lati = self.roamers.lati.map(|prev| next_location(&mut rng, kanto, prev));

        HgssRoamerFrame {
            number,
            seed,
            raikou,
            entei,
            lati,
        }
    }
}

impl FrameGenerator for HgssRoamerGenerator {
    type Frame = HgssRoamerFrame;

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

    fn current(&self) -> &HgssRoamerFrame {
        &self.frame
    }

    fn frame_number(&self) -> u32 {
        self.frame.number
    }
}
