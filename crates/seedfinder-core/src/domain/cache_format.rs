//! Seed cache file format definitions
//!
//! A cache file lists the Gen 5 IV seeds whose IV frames hit one pattern
//! within a frame window. Only the seeds are stored; the matching frames are
//! re-simulated when the file is loaded.
//!
//! ```text
//! offset  size  field
//! 0       8     magic "SFCACHE\0"
//! 8       4     format version (LE)
//! 12      4     max frame (LE)
//! 16      4     cache kind (LE)
//! 20      ..    seed deltas as varints (7 bits per byte, high bit = more)
//! end-4   4     seed count (LE)
//! ```
//!
//! The first delta is taken from 0 and seeds are strictly increasing.

use crate::constants::{
    CACHE_FORMAT_VERSION, CACHE_HEADER_SIZE, CACHE_MAGIC, CACHE_TRAILER_SIZE, MAX_VARINT_LEN,
};
use crate::domain::criteria::IvCriteria;
use crate::domain::frame::{FrameGenerator, Gen5IvGenerator, Gen5IvKind};
use crate::domain::types::{Ivs, Stat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Cache kinds
// =============================================================================

/// IV spread a cache is built for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IvPattern {
    /// 31 in every stat
    Flawless,
    /// 31 in every stat except SpA
    PhysicalFlawless,
    /// 31 in every stat except Atk
    SpecialFlawless,
    /// 31 in every stat except Spe
    TrickRoomFlawless,
}

impl IvPattern {
    pub const ALL: [IvPattern; 4] = [
        IvPattern::Flawless,
        IvPattern::PhysicalFlawless,
        IvPattern::SpecialFlawless,
        IvPattern::TrickRoomFlawless,
    ];

    /// Stat left unconstrained
    pub const fn free_stat(self) -> Option<Stat> {
        match self {
            IvPattern::Flawless => None,
            IvPattern::PhysicalFlawless => Some(Stat::SpA),
            IvPattern::SpecialFlawless => Some(Stat::Atk),
            IvPattern::TrickRoomFlawless => Some(Stat::Spe),
        }
    }

    pub fn matches(self, ivs: Ivs) -> bool {
        Stat::ALL
            .iter()
            .all(|&stat| Some(stat) == self.free_stat() || ivs.stat(stat) == Ivs::MAX_VALUE)
    }

    /// Most specific pattern whose hits include every IV spread `criteria`
    /// accepts
    pub fn for_criteria(criteria: &IvCriteria) -> Option<IvPattern> {
        let min = criteria.min();
        let maxed = |stat: Stat| min.stat(stat) == Ivs::MAX_VALUE;
        Self::ALL.into_iter().find(|pattern| {
            Stat::ALL
                .iter()
                .all(|&stat| Some(stat) == pattern.free_stat() || maxed(stat))
        })
    }

    const fn code(self) -> u32 {
        match self {
            IvPattern::Flawless => 0,
            IvPattern::PhysicalFlawless => 1,
            IvPattern::SpecialFlawless => 2,
            IvPattern::TrickRoomFlawless => 3,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            IvPattern::Flawless => "flawless",
            IvPattern::PhysicalFlawless => "physical",
            IvPattern::SpecialFlawless => "special",
            IvPattern::TrickRoomFlawless => "trickroom",
        }
    }
}

/// Identity of a cache: IV pattern and stat order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKind {
    pub pattern: IvPattern,
    /// IV frames use the roamer stat order
    pub roamer: bool,
}

impl CacheKind {
    pub const fn new(pattern: IvPattern, roamer: bool) -> Self {
        Self { pattern, roamer }
    }

    /// Header encoding: pattern code in the low byte, roamer flag in bit 8
    pub const fn code(self) -> u32 {
        self.pattern.code() | (self.roamer as u32) << 8
    }

    pub fn from_code(code: u32) -> Result<Self, CacheFormatError> {
        let pattern = IvPattern::ALL
            .into_iter()
            .find(|p| p.code() == code & 0xFF)
            .ok_or(CacheFormatError::UnknownKind(code))?;
        if code >> 9 != 0 {
            return Err(CacheFormatError::UnknownKind(code));
        }
        Ok(Self {
            pattern,
            roamer: code & 0x100 != 0,
        })
    }

    pub const fn iv_kind(self) -> Gen5IvKind {
        if self.roamer { Gen5IvKind::Roamer } else { Gen5IvKind::Normal }
    }

    /// Conventional file name for a cache of this kind
    pub fn file_name(self, max_frame: u32) -> String {
        let order = if self.roamer { "roamer" } else { "normal" };
        format!("{}_{}_{}.sfcache", self.pattern.name(), order, max_frame)
    }
}

/// One IV frame hit, re-simulated at load time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CacheEntry {
    pub iv_seed: u32,
    pub frame: u32,
    /// Packed IVs of the frame (see [`Ivs::word`])
    pub iv_word: u32,
}

/// IV frames `1..=max_frame` of `iv_seed` that hit `kind`'s pattern
pub fn hits(iv_seed: u32, kind: CacheKind, max_frame: u32) -> impl Iterator<Item = CacheEntry> {
    let mut generator = Gen5IvGenerator::new(iv_seed, kind.iv_kind());
    (0..max_frame).filter_map(move |_| {
        generator.advance();
        let frame = generator.current();
        kind.pattern.matches(frame.ivs).then(|| CacheEntry {
            iv_seed,
            frame: frame.number,
            iv_word: frame.ivs.word(),
        })
    })
}

// =============================================================================
// Header
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheHeader {
    pub version: u32,
    pub max_frame: u32,
    pub kind: CacheKind,
}

impl CacheHeader {
    pub fn new(kind: CacheKind, max_frame: u32) -> Self {
        Self {
            version: CACHE_FORMAT_VERSION,
            max_frame,
            kind,
        }
    }

    pub fn to_bytes(&self) -> [u8; CACHE_HEADER_SIZE] {
        let mut buf = [0u8; CACHE_HEADER_SIZE];
        buf[0..8].copy_from_slice(&CACHE_MAGIC);
        buf[8..12].copy_from_slice(&self.version.to_le_bytes());
        buf[12..16].copy_from_slice(&self.max_frame.to_le_bytes());
        buf[16..20].copy_from_slice(&self.kind.code().to_le_bytes());
        buf
    }

    pub fn from_bytes(buf: &[u8]) -> Result<Self, CacheFormatError> {
        if buf.len() < CACHE_HEADER_SIZE {
            return Err(CacheFormatError::Truncated);
        }
        if buf[0..8] != CACHE_MAGIC {
            return Err(CacheFormatError::InvalidMagic);
        }
        let version = read_u32(&buf[8..12]);
        if version != CACHE_FORMAT_VERSION {
            return Err(CacheFormatError::UnsupportedVersion(version));
        }
        Ok(Self {
            version,
            max_frame: read_u32(&buf[12..16]),
            kind: CacheKind::from_code(read_u32(&buf[16..20]))?,
        })
    }
}

#[inline]
fn read_u32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

// =============================================================================
// Errors
// =============================================================================

/// Cache file format errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheFormatError {
    #[error("invalid file format: not a seed cache file")]
    InvalidMagic,

    #[error("unsupported cache format version: {0}")]
    UnsupportedVersion(u32),

    #[error("unknown cache kind: {0:#x}")]
    UnknownKind(u32),

    #[error("cache file is truncated")]
    Truncated,

    #[error("cache declares {declared} seeds but can hold at most {max}")]
    CountMismatch { declared: u32, max: u64 },

    #[error("cache seeds are not strictly increasing")]
    NotIncreasing,

    #[error("cache file has {0} bytes after the last seed")]
    TrailingBytes(usize),

    #[error("cache header does not match the requested kind or frame window")]
    HeaderMismatch,
}

// =============================================================================
// Body
// =============================================================================

fn write_varint(out: &mut Vec<u8>, mut value: u32) {
    while value >= 0x80 {
        out.push((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

fn read_varint(bytes: &[u8], pos: &mut usize) -> Result<u32, CacheFormatError> {
    let mut value = 0u64;
    for i in 0..MAX_VARINT_LEN {
        let &byte = bytes.get(*pos).ok_or(CacheFormatError::Truncated)?;
        *pos += 1;
        value |= ((byte & 0x7F) as u64) << (7 * i);
        if byte & 0x80 == 0 {
            return u32::try_from(value).map_err(|_| CacheFormatError::NotIncreasing);
        }
    }
    // a 32-bit delta never needs a sixth byte
    Err(CacheFormatError::NotIncreasing)
}

/// Serialize a full cache file
///
/// `seeds` must be strictly increasing.
pub fn encode(header: &CacheHeader, seeds: &[u32]) -> Result<Vec<u8>, CacheFormatError> {
    let mut out = Vec::with_capacity(CACHE_HEADER_SIZE + seeds.len() * 3 + CACHE_TRAILER_SIZE);
    out.extend_from_slice(&header.to_bytes());

    let mut previous: Option<u32> = None;
    for &seed in seeds {
        let delta = match previous {
            None => seed,
            Some(p) if seed > p => seed - p,
            Some(_) => return Err(CacheFormatError::NotIncreasing),
        };
        write_varint(&mut out, delta);
        previous = Some(seed);
    }

    let count = u32::try_from(seeds.len()).map_err(|_| CacheFormatError::CountMismatch {
        declared: u32::MAX,
        max: seeds.len() as u64,
    })?;
    out.extend_from_slice(&count.to_le_bytes());
    Ok(out)
}

/// Parse a full cache file
pub fn decode(bytes: &[u8]) -> Result<(CacheHeader, Vec<u32>), CacheFormatError> {
    let header = CacheHeader::from_bytes(bytes)?;
    if bytes.len() < CACHE_HEADER_SIZE + CACHE_TRAILER_SIZE {
        return Err(CacheFormatError::Truncated);
    }
    let body = &bytes[CACHE_HEADER_SIZE..bytes.len() - CACHE_TRAILER_SIZE];
    let count = read_u32(&bytes[bytes.len() - CACHE_TRAILER_SIZE..]);
    if count as u64 > body.len() as u64 {
        return Err(CacheFormatError::CountMismatch {
            declared: count,
            max: body.len() as u64,
        });
    }

    let mut seeds = Vec::with_capacity(count as usize);
    let mut pos = 0usize;
    let mut seed = 0u32;
    for i in 0..count {
        let delta = read_varint(body, &mut pos)?;
        if i > 0 && delta == 0 {
            return Err(CacheFormatError::NotIncreasing);
        }
        seed = seed.checked_add(delta).ok_or(CacheFormatError::NotIncreasing)?;
        seeds.push(seed);
    }
    if pos != body.len() {
        return Err(CacheFormatError::TrailingBytes(body.len() - pos));
    }
    Ok((header, seeds))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind() -> CacheKind {
        CacheKind::new(IvPattern::SpecialFlawless, true)
    }

    #[test]
    fn test_header_bytes() {
        let header = CacheHeader::new(kind(), 8);
        let bytes = header.to_bytes();
        assert_eq!(&bytes[0..8], b"SFCACHE\0");
        assert_eq!(&bytes[8..12], &[1, 0, 0, 0]);
        assert_eq!(&bytes[12..16], &[8, 0, 0, 0]);
        assert_eq!(&bytes[16..20], &[2, 1, 0, 0]);
        assert_eq!(CacheHeader::from_bytes(&bytes), Ok(header));
    }

    #[test]
    fn test_varint_layout() {
        let mut out = Vec::new();
        write_varint(&mut out, 0);
        write_varint(&mut out, 0x7F);
        write_varint(&mut out, 0x80);
        write_varint(&mut out, u32::MAX);
        assert_eq!(out, vec![0x00, 0x7F, 0x80, 0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
    }

    #[test]
    fn test_encode_decode() {
        let seeds = vec![0, 1, 300, 0x0001_0000, 0xFFFF_FFFF];
        let header = CacheHeader::new(kind(), 50);
        let bytes = encode(&header, &seeds).unwrap();
        assert_eq!(decode(&bytes), Ok((header, seeds)));
    }

    #[test]
    fn test_rejects_unsorted_input() {
        let header = CacheHeader::new(kind(), 8);
        assert_eq!(encode(&header, &[5, 5]), Err(CacheFormatError::NotIncreasing));
        assert_eq!(encode(&header, &[5, 4]), Err(CacheFormatError::NotIncreasing));
    }

    #[test]
    fn test_bad_files() {
        let header = CacheHeader::new(kind(), 8);
        let good = encode(&header, &[10, 20, 1000]).unwrap();

        let mut magic = good.clone();
        magic[0] = b'X';
        assert_eq!(decode(&magic), Err(CacheFormatError::InvalidMagic));

        let mut version = good.clone();
        version[8] = 9;
        assert_eq!(decode(&version), Err(CacheFormatError::UnsupportedVersion(9)));

        assert_eq!(decode(&good[..10]), Err(CacheFormatError::Truncated));

        // drop one body byte but keep the trailer
        let mut short = good[..good.len() - 5].to_vec();
        short.extend_from_slice(&3u32.to_le_bytes());
        assert_eq!(decode(&short), Err(CacheFormatError::Truncated));

        let mut long = good[..good.len() - 4].to_vec();
        long.push(0x05);
        long.extend_from_slice(&3u32.to_le_bytes());
        assert_eq!(decode(&long), Err(CacheFormatError::TrailingBytes(1)));

        let mut huge = good[..good.len() - 4].to_vec();
        huge.extend_from_slice(&1000u32.to_le_bytes());
        assert!(matches!(decode(&huge), Err(CacheFormatError::CountMismatch { declared: 1000, .. })));
    }

    #[test]
    fn test_zero_delta_rejected() {
        let mut bytes = CacheHeader::new(kind(), 8).to_bytes().to_vec();
        bytes.extend_from_slice(&[0x03, 0x00]);
        bytes.extend_from_slice(&2u32.to_le_bytes());
        assert_eq!(decode(&bytes), Err(CacheFormatError::NotIncreasing));
    }

    #[test]
    fn test_pattern_matching() {
        let special = Ivs::new([31, 0, 31, 31, 31, 31]);
        assert!(IvPattern::SpecialFlawless.matches(special));
        assert!(!IvPattern::Flawless.matches(special));
        assert!(!IvPattern::PhysicalFlawless.matches(special));
        assert!(IvPattern::Flawless.matches(Ivs::PERFECT));
    }

    #[test]
    fn test_pattern_for_criteria() {
        let flawless = IvCriteria::at_least(Ivs::PERFECT);
        assert_eq!(IvPattern::for_criteria(&flawless), Some(IvPattern::Flawless));

        let trick_room = IvCriteria::new(Ivs::new([31, 31, 31, 31, 31, 0]), Ivs::new([31, 31, 31, 31, 31, 1])).unwrap();
        assert_eq!(IvPattern::for_criteria(&trick_room), Some(IvPattern::TrickRoomFlawless));

        let loose = IvCriteria::at_least(Ivs::new([30, 31, 31, 31, 31, 31]));
        assert_eq!(IvPattern::for_criteria(&loose), None);
    }

    #[test]
    fn test_hits() {
        let kind = CacheKind::new(IvPattern::SpecialFlawless, false);
        let hits: Vec<_> = hits(7_888_472, kind, 8).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].frame, 2);
        let ivs = Ivs::from_word(hits[0].iv_word);
        assert!(IvPattern::SpecialFlawless.matches(ivs));
        assert_ne!(ivs.stat(Stat::Atk), 31);

        assert_eq!(super::hits(7_888_472, kind, 1).count(), 0);
        assert_eq!(super::hits(1_536_853, kind, 6).count(), 0);
        assert_eq!(super::hits(1_536_853, kind, 7).count(), 1);
    }

    #[test]
    fn test_kind_codes() {
        for pattern in IvPattern::ALL {
            for roamer in [false, true] {
                let kind = CacheKind::new(pattern, roamer);
                assert_eq!(CacheKind::from_code(kind.code()), Ok(kind));
            }
        }
        assert!(CacheKind::from_code(7).is_err());
        assert_eq!(kind().file_name(8), "special_roamer_8.sfcache");
    }
}
