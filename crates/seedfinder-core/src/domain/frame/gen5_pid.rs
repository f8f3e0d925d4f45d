//! Gen 5 PID frames
//!
//! The 64-bit PID stream serves every encounter type, but each type reads it
//! in its own order. The order lives in a [`PidStrategy`] chosen from the
//! [`Gen5Encounter`]; the generator only moves the frame start.
//!
//! Wild and static PIDs flip bit 16 and then force bit 31 so that
//! `bit31 == (low ^ high ^ tid ^ sid) & 1`.

use super::FrameGenerator;
use super::encounter::{EncounterTable, SWARM_THRESHOLD};
use crate::domain::rng::Gen5Rng;
use crate::domain::types::{Ability, Gender, GenderRatio, GameVersion, Nature, Pid, TrainerId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Bit flipped on wild and static PIDs
const ABILITY_BIT: u32 = 0x0001_0000;

/// Bit flipped to make a shiny-locked PID non-shiny
const SHINY_LOCK_BIT: u32 = 0x1000_0000;

const DUST_CLOUD_ITEM_THRESHOLD: u32 = 40;
const BRIDGE_SHADOW_ITEM_THRESHOLD: u32 = 10;

/// PID attempts with the Shiny Charm (Black 2 / White 2 only)
const SHINY_CHARM_ROLLS: u32 = 3;

// =============================================================================
// Inputs
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gen5Encounter {
    Grass,
    Cave,
    Surf,
    Fishing,
    /// Grass encounter on a route with an active swarm
    Swarm,
    ShakingGrass,
    DustCloud,
    BridgeShadow,
    Static,
    Gift,
    Roamer,
    Entralink,
    GiftEgg,
    HiddenHollow,
}

impl Gen5Encounter {
    pub fn strategy(self) -> Arc<dyn PidStrategy> {
        match self {
            Gen5Encounter::Grass
            | Gen5Encounter::Cave
            | Gen5Encounter::Surf
            | Gen5Encounter::Fishing
            | Gen5Encounter::Swarm
            | Gen5Encounter::ShakingGrass
            | Gen5Encounter::DustCloud
            | Gen5Encounter::BridgeShadow => Arc::new(WildStrategy { encounter: self }),
            Gen5Encounter::Static => Arc::new(StaticStrategy),
            Gen5Encounter::Gift | Gen5Encounter::Roamer => Arc::new(PlainStrategy),
            Gen5Encounter::GiftEgg => Arc::new(GiftEggStrategy),
            Gen5Encounter::Entralink => Arc::new(EntralinkStrategy),
            Gen5Encounter::HiddenHollow => Arc::new(HiddenHollowStrategy),
        }
    }

    fn table(self) -> EncounterTable {
        match self {
            Gen5Encounter::Surf => EncounterTable::Water,
            Gen5Encounter::Fishing => EncounterTable::Fishing,
            _ => EncounterTable::Land,
        }
    }

    fn item_threshold(self) -> Option<u32> {
        match self {
            Gen5Encounter::DustCloud => Some(DUST_CLOUD_ITEM_THRESHOLD),
            Gen5Encounter::BridgeShadow => Some(BRIDGE_SHADOW_ITEM_THRESHOLD),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gen5Lead {
    #[default]
    None,
    Synchronize(Nature),
    CompoundEyes,
}

/// Inputs shared by every strategy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PidContext {
    pub id: TrainerId,
    pub version: GameVersion,
    pub lead: Gen5Lead,
    pub shiny_charm: bool,
    /// Gender forced by Entralink / Hidden Hollow encounters
    pub forced_gender: Option<(Gender, GenderRatio)>,
}

impl PidContext {
    pub fn new(id: TrainerId, version: GameVersion) -> Self {
        Self {
            id,
            version,
            lead: Gen5Lead::None,
            shiny_charm: false,
            forced_gender: None,
        }
    }

    fn pid_rolls(&self) -> u32 {
        if self.shiny_charm && self.version.is_sequel() {
            SHINY_CHARM_ROLLS
        } else {
            1
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeldItem {
    #[default]
    None,
    /// 50% item
    Common,
    /// 5% item
    Uncommon,
    /// 1% item
    Rare,
}

impl HeldItem {
    fn from_roll(roll: u32, compound_eyes: bool) -> Self {
        let (common, uncommon, rare) = if compound_eyes { (60, 80, 85) } else { (50, 55, 56) };
        match roll {
            r if r < common => HeldItem::Common,
            r if r < uncommon => HeldItem::Uncommon,
            r if r < rare => HeldItem::Rare,
            _ => HeldItem::None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gen5PidFrame {
    pub number: u32,
    /// Engine state the frame's draws start from
    pub seed: u64,
    pub pid: Pid,
    pub nature: Nature,
    pub ability: Ability,
    pub synchronized: bool,
    pub slot: Option<u8>,
    pub swarm: bool,
    /// Dust cloud / bridge shadow produced an item instead of a Pokemon
    pub found_item: bool,
    pub held_item: HeldItem,
}

// =============================================================================
// Strategies
// =============================================================================

/// Encounter-specific reading of the PID stream
pub trait PidStrategy: Send + Sync + fmt::Debug {
    /// Fill `frame` from draws starting at `rng`
    fn generate(&self, rng: &mut Gen5Rng, ctx: &PidContext, frame: &mut Gen5PidFrame);
}

#[inline]
fn apply_id_bit(raw: u32, id: TrainerId) -> u32 {
    let parity = (raw ^ (raw >> 16) ^ id.tid as u32 ^ id.sid as u32) & 1;
    if parity == 1 {
        raw | 0x8000_0000
    } else {
        raw & 0x7FFF_FFFF
    }
}

/// Draw up to `rolls` PIDs, stopping at the first shiny one
fn roll_pid(rng: &mut Gen5Rng, ctx: &PidContext, draw: impl Fn(&mut Gen5Rng) -> Pid) -> Pid {
    let mut pid = draw(rng);
    for _ in 1..ctx.pid_rolls() {
        if pid.is_shiny(ctx.id) {
            break;
        }
        pid = draw(rng);
    }
    pid
}

fn wild_pid(rng: &mut Gen5Rng, ctx: &PidContext) -> Pid {
    roll_pid(rng, ctx, |rng| Pid(apply_id_bit(rng.next_u32() ^ ABILITY_BIT, ctx.id)))
}

fn force_gender(pid: Pid, ctx: &PidContext) -> Pid {
    match ctx.forced_gender {
        Some((gender, ratio)) => {
            let low = ratio.force_low_byte(pid.raw() as u8, gender);
            Pid((pid.raw() & !0xFF) | low as u32)
        }
        None => pid,
    }
}

fn shiny_locked(pid: Pid, id: TrainerId) -> Pid {
    if pid.is_shiny(id) {
        Pid(pid.raw() ^ SHINY_LOCK_BIT)
    } else {
        pid
    }
}

/// Lead check shared by wild and static encounters
fn synchronize(rng: &mut Gen5Rng, ctx: &PidContext) -> Option<Nature> {
    let coin = rng.coin();
    match ctx.lead {
        Gen5Lead::Synchronize(nature) if coin == 1 => Some(nature),
        _ => None,
    }
}

fn nature_or_sync(rng: &mut Gen5Rng, synced: Option<Nature>) -> Nature {
    synced.unwrap_or_else(|| Nature::from_index(rng.rand(25)))
}

#[derive(Debug)]
struct WildStrategy {
    encounter: Gen5Encounter,
}

impl PidStrategy for WildStrategy {
    fn generate(&self, rng: &mut Gen5Rng, ctx: &PidContext, frame: &mut Gen5PidFrame) {
        let synced = synchronize(rng, ctx);
        frame.synchronized = synced.is_some();

        if let Some(threshold) = self.encounter.item_threshold() {
            if rng.rand(100) < threshold {
                frame.found_item = true;
                return;
            }
        }

        if self.encounter == Gen5Encounter::Swarm {
            frame.swarm = rng.rand(100) < SWARM_THRESHOLD;
        }
        if !frame.swarm {
            frame.slot = Some(self.encounter.table().slot(rng.rand(100)));
        }

        // level
        rng.next_u64();

        frame.pid = wild_pid(rng, ctx);
        frame.nature = nature_or_sync(rng, synced);
        frame.ability = frame.pid.ability_gen5();
        frame.held_item = HeldItem::from_roll(rng.rand(100), ctx.lead == Gen5Lead::CompoundEyes);
    }
}

#[derive(Debug)]
struct StaticStrategy;

impl PidStrategy for StaticStrategy {
    fn generate(&self, rng: &mut Gen5Rng, ctx: &PidContext, frame: &mut Gen5PidFrame) {
        let synced = synchronize(rng, ctx);
        frame.synchronized = synced.is_some();
        frame.pid = wild_pid(rng, ctx);
        frame.nature = nature_or_sync(rng, synced);
        frame.ability = frame.pid.ability_gen5();
    }
}

/// Gifts and roamers: untouched PID, then nature
#[derive(Debug)]
struct PlainStrategy;

impl PidStrategy for PlainStrategy {
    fn generate(&self, rng: &mut Gen5Rng, _ctx: &PidContext, frame: &mut Gen5PidFrame) {
        frame.pid = Pid(rng.next_u32());
        frame.nature = Nature::from_index(rng.rand(25));
        frame.ability = frame.pid.ability_gen5();
    }
}

#[derive(Debug)]
struct GiftEggStrategy;

impl PidStrategy for GiftEggStrategy {
    fn generate(&self, rng: &mut Gen5Rng, ctx: &PidContext, frame: &mut Gen5PidFrame) {
        frame.pid = roll_pid(rng, ctx, |rng| Pid(rng.next_u32()));
        frame.nature = Nature::from_index(rng.rand(25));
        frame.ability = frame.pid.ability_gen5();
    }
}

#[derive(Debug)]
struct EntralinkStrategy;

impl PidStrategy for EntralinkStrategy {
    fn generate(&self, rng: &mut Gen5Rng, ctx: &PidContext, frame: &mut Gen5PidFrame) {
        let pid = force_gender(Pid(rng.next_u32() & !ABILITY_BIT), ctx);
        frame.pid = shiny_locked(pid, ctx.id);
        frame.nature = Nature::from_index(rng.rand(25));
        frame.ability = Ability::Hidden;
    }
}

#[derive(Debug)]
struct HiddenHollowStrategy;

impl PidStrategy for HiddenHollowStrategy {
    fn generate(&self, rng: &mut Gen5Rng, ctx: &PidContext, frame: &mut Gen5PidFrame) {
        let synced = synchronize(rng, ctx);
        frame.synchronized = synced.is_some();
        let pid = force_gender(wild_pid(rng, ctx), ctx);
        frame.pid = shiny_locked(pid, ctx.id);
        frame.nature = nature_or_sync(rng, synced);
        frame.ability = Ability::Hidden;
    }
}

// =============================================================================
// Generator
// =============================================================================

#[derive(Clone, Debug)]
pub struct Gen5PidGenerator {
    strategy: Arc<dyn PidStrategy>,
    ctx: PidContext,
    rng: Gen5Rng,
    frame: Gen5PidFrame,
}

impl Gen5PidGenerator {
    /// Frame 1 starts at `raw_seed`
    pub fn new(raw_seed: u64, encounter: Gen5Encounter, ctx: PidContext) -> Self {
        Self::with_strategy(raw_seed, encounter.strategy(), ctx)
    }

    pub fn with_strategy(raw_seed: u64, strategy: Arc<dyn PidStrategy>, ctx: PidContext) -> Self {
        Self {
            strategy,
            ctx,
            rng: Gen5Rng::new(raw_seed),
            frame: Gen5PidFrame::default(),
        }
    }

    fn derive(&self, number: u32) -> Gen5PidFrame {
        let mut frame = Gen5PidFrame {
            number,
            seed: self.rng.state(),
            ..Gen5PidFrame::default()
        };
        let mut rng = self.rng;
        self.strategy.generate(&mut rng, &self.ctx, &mut frame);
        frame
    }
}

impl FrameGenerator for Gen5PidGenerator {
    type Frame = Gen5PidFrame;

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

    fn current(&self) -> &Gen5PidFrame {
        &self.frame
    }

    fn frame_number(&self) -> u32 {
        self.frame.number
    }
}
