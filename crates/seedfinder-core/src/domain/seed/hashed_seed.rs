//! Gen 5 hashed seeds
//!
//! The boot seed is derived by SHA-1 hashing a 16-word message built from
//! console and clock state, then stepping the first 64 bits of the digest once
//! through [`Gen5Rng`].
//!
//! Message layout (`swap` = byte swap):
//!
//! | word   | contents                                               |
//! |--------|--------------------------------------------------------|
//! | 0..5   | `swap(nazo[i])`                                         |
//! | 5      | `swap(vcount << 16 \| timer0)`                          |
//! | 6      | `mac & 0xFFFF`                                          |
//! | 7      | `swap(0x06000000 ^ vframe) ^ (mac >> 16)`               |
//! | 8      | BCD year, month, day, then day of week                  |
//! | 9      | BCD hour (+40 after noon, except 3DS), minute, second   |
//! | 10, 11 | 0                                                       |
//! | 12     | `swap(0x2FFF ^ held_buttons)`                           |
//! | 13..16 | padding: `0x80000000`, 0, bit length `0x1A0`            |
//!
//! Only words 0..13 are fed to the hasher; it appends the same padding.

use super::date::{GameDate, GameTime, bcd};
use super::nazo::Nazo;
use super::skipped_frames;
use crate::domain::rng::{Gen5Rng, Gen5RngR};
use crate::domain::types::{ButtonMask, ConsoleType, GameVersion};
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::cell::Cell;

/// Graphics status register value at boot
const GX_STAT: u32 = 0x0600_0000;

/// KEYINPUT with no button held
const KEYS_RELEASED: u32 = 0x2FFF;

const PADDING_WORD: u32 = 0x8000_0000;
const MESSAGE_BITS: u32 = 0x1A0;

/// Message bytes before padding
const MESSAGE_LEN: usize = MESSAGE_BITS as usize / 8;

/// Everything the hashed seed is derived from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HashedSeedParameters {
    pub version: GameVersion,
    pub console: ConsoleType,
    pub mac_address: u64,
    pub timer0: u16,
    pub vcount: u8,
    pub vframe: u8,
    pub date: GameDate,
    pub time: GameTime,
    pub buttons: ButtonMask,
}

/// 64-bit Gen 5 seed with the parameters it came from
///
/// Setters rewrite only the message words they affect; the hash is computed
/// on the next [`raw_seed`](Self::raw_seed) call.
#[derive(Clone, Debug)]
pub struct HashedSeed {
    params: HashedSeedParameters,
    message: [u32; 16],
    raw: Cell<Option<u64>>,
    /// Skipped PID frames, indexed by the memory-link flag
    skipped: [Cell<Option<u32>>; 2],
}

impl HashedSeed {
    pub fn new(params: HashedSeedParameters) -> Self {
        Self::with_nazo(params, Nazo::for_console(params.version, params.console))
    }

    /// Use explicit nazo constants instead of the built-in table
    pub fn with_nazo(params: HashedSeedParameters, nazo: Nazo) -> Self {
        let mut message = [0u32; 16];
        for (word, &n) in message.iter_mut().zip(nazo.0.iter()) {
            *word = n.swap_bytes();
        }
        message[13] = PADDING_WORD;
        message[15] = MESSAGE_BITS;

        let mut seed = Self {
            params,
            message,
            raw: Cell::new(None),
            skipped: [Cell::new(None), Cell::new(None)],
        };
        seed.write_timer_word();
        seed.write_mac_words();
        seed.write_date_word();
        seed.write_time_word();
        seed.write_button_word();
        seed
    }

    #[inline]
    pub fn parameters(&self) -> &HashedSeedParameters {
        &self.params
    }

    /// Hash message words as fed to the compression function
    pub fn message(&self) -> &[u32; 16] {
        &self.message
    }

    // -------------------------------------------------------------------------
    // Message words
    // -------------------------------------------------------------------------

    fn write_timer_word(&mut self) {
        let word = ((self.params.vcount as u32) << 16) | self.params.timer0 as u32;
        self.message[5] = word.swap_bytes();
    }

    fn write_mac_words(&mut self) {
        let mac = self.params.mac_address;
        self.message[6] = (mac & 0xFFFF) as u32;
        self.message[7] = (GX_STAT ^ self.params.vframe as u32).swap_bytes() ^ (mac >> 16) as u32;
    }

    fn write_date_word(&mut self) {
        let date = self.params.date;
        self.message[8] = bcd((date.year() % 100) as u8) << 24
            | bcd(date.month()) << 16
            | bcd(date.day()) << 8
            | date.weekday() as u32;
    }

    fn write_time_word(&mut self) {
        let time = self.params.time;
        let hour = if time.hour >= 12 && self.params.console != ConsoleType::ThreeDs {
            time.hour + 40
        } else {
            time.hour
        };
        self.message[9] = bcd(hour) << 24 | bcd(time.minute) << 16 | bcd(time.second) << 8;
    }

    fn write_button_word(&mut self) {
        self.message[12] = (KEYS_RELEASED ^ self.params.buttons.0 as u32).swap_bytes();
    }

    #[inline]
    fn invalidate(&mut self) {
        self.raw.set(None);
        self.skipped[0].set(None);
        self.skipped[1].set(None);
    }

    // -------------------------------------------------------------------------
    // Incremental setters
    // -------------------------------------------------------------------------

    pub fn set_date(&mut self, date: GameDate) {
        self.params.date = date;
        self.write_date_word();
        self.invalidate();
    }

    pub fn set_time(&mut self, time: GameTime) {
        self.params.time = time;
        self.write_time_word();
        self.invalidate();
    }

    pub fn set_hour(&mut self, hour: u8) {
        self.params.time.hour = hour;
        self.write_time_word();
        self.invalidate();
    }

    pub fn set_minute(&mut self, minute: u8) {
        self.params.time.minute = minute;
        self.write_time_word();
        self.invalidate();
    }

    pub fn set_second(&mut self, second: u8) {
        self.params.time.second = second;
        self.write_time_word();
        self.invalidate();
    }

    pub fn set_timer0(&mut self, timer0: u16) {
        self.params.timer0 = timer0;
        self.write_timer_word();
        self.invalidate();
    }

    pub fn set_vcount(&mut self, vcount: u8) {
        self.params.vcount = vcount;
        self.write_timer_word();
        self.invalidate();
    }

    pub fn set_vframe(&mut self, vframe: u8) {
        self.params.vframe = vframe;
        self.write_mac_words();
        self.invalidate();
    }

    pub fn set_buttons(&mut self, buttons: ButtonMask) {
        self.params.buttons = buttons;
        self.write_button_word();
        self.invalidate();
    }

    // -------------------------------------------------------------------------
    // Derived values
    // -------------------------------------------------------------------------

    /// Raw 64-bit seed (hashed on first use after a change)
    pub fn raw_seed(&self) -> u64 {
        if let Some(raw) = self.raw.get() {
            return raw;
        }
        let raw = Gen5Rng::step(self.hash_message());
        self.raw.set(Some(raw));
        raw
    }

    /// First 64 bits of the SHA-1 digest, read little-endian
    fn hash_message(&self) -> u64 {
        let mut bytes = [0u8; MESSAGE_LEN];
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(self.message.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        let digest = Sha1::digest(bytes);
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        u64::from_le_bytes(head)
    }

    /// First 64 bits of the digest, before the final LCG step
    pub fn pre_seed(&self) -> u64 {
        Gen5RngR::step(self.raw_seed())
    }

    /// MT seed used for IV generation
    #[inline]
    pub fn iv_seed(&self) -> u32 {
        (self.raw_seed() >> 32) as u32
    }

    /// Frames the game consumes on the PID stream when continuing a save
    pub fn skipped_pid_frames(&self, memory_link: bool) -> u32 {
        let slot = &self.skipped[memory_link as usize];
        if let Some(skipped) = slot.get() {
            return skipped;
        }
        let raw = self.raw_seed();
        let skipped = if self.params.version.is_sequel() {
            skipped_frames::bw2_continue(raw, memory_link)
        } else {
            skipped_frames::bw_continue(raw)
        };
        slot.set(Some(skipped));
        skipped
    }

    /// First PID frame the player can act on
    #[inline]
    pub fn initial_pid_frame(&self, memory_link: bool) -> u32 {
        self.skipped_pid_frames(memory_link) + 1
    }

    /// Frames consumed before the trainer ID draw of a new Black / White game
    pub fn new_game_skipped_frames(&self) -> Option<u32> {
        if self.params.version.is_sequel() {
            None
        } else {
            Some(skipped_frames::bw_new_game(self.raw_seed()))
        }
    }
}

impl PartialEq for HashedSeed {
    fn eq(&self, other: &Self) -> bool {
        self.raw_seed() == other.raw_seed()
    }
}

impl Eq for HashedSeed {}

impl std::hash::Hash for HashedSeed {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.raw_seed().hash(state);
    }
}
