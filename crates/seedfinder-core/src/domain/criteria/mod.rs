//! Search criteria
//!
//! Criteria are validated once when they are built from user input and are
//! read-only while a search runs. Validation failures are contract
//! violations and are reported as [`CriteriaError`].

pub mod estimate;
pub mod iv;
pub mod pid;

pub use estimate::{ExpectedResults, ResultEstimate};
pub use iv::IvCriteria;
pub use pid::PidCriteria;

use crate::domain::types::Element;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid criteria or arguments
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaError {
    #[error("stat index {0} is out of range (expected 0..6)")]
    InvalidStatIndex(usize),

    #[error("IV {value} for {stat} is above 31")]
    InvalidIvValue { stat: &'static str, value: u8 },

    #[error("IV range for {stat} is invalid: min {min} > max {max}")]
    InvalidIvRange {
        stat: &'static str,
        min: u8,
        max: u8,
    },

    #[error("no IVs in range give hidden power {element:?} with power >= {min_power}")]
    ImpossibleHiddenPower {
        element: Option<Element>,
        min_power: u8,
    },

    #[error("frame range is invalid: min {min}, max {max}")]
    InvalidFrameRange { min: u32, max: u32 },

    #[error("seed range is invalid: {0}")]
    InvalidSeedRange(String),

    #[error("seed space is empty")]
    EmptySeedSpace,

    #[error("hidden hollow index {0} is out of range (expected 0..20)")]
    InvalidHollowIndex(usize),

    #[error("spin sequence is empty")]
    EmptySpinSequence,
}

/// Inclusive window of frame numbers to scan
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FrameRangeFields")]
pub struct FrameRange {
    min: u32,
    max: u32,
}

#[derive(Deserialize)]
struct FrameRangeFields {
    min: u32,
    max: u32,
}

impl TryFrom<FrameRangeFields> for FrameRange {
    type Error = CriteriaError;

    fn try_from(fields: FrameRangeFields) -> Result<Self, CriteriaError> {
        Self::new(fields.min, fields.max)
    }
}

impl FrameRange {
    /// Frames are numbered from 1
    pub fn new(min: u32, max: u32) -> Result<Self, CriteriaError> {
        if min == 0 || min > max {
            return Err(CriteriaError::InvalidFrameRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// A window covering only `frame`
    pub fn single(frame: u32) -> Result<Self, CriteriaError> {
        Self::new(frame, frame)
    }

    #[inline]
    pub const fn min(&self) -> u32 {
        self.min
    }

    #[inline]
    pub const fn max(&self) -> u32 {
        self.max
    }

    #[inline]
    pub const fn len(&self) -> u64 {
        (self.max - self.min) as u64 + 1
    }

    pub const fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub const fn contains(&self, frame: u32) -> bool {
        frame >= self.min && frame <= self.max
    }

    /// Shift both ends by `offset` frames
    pub fn offset(&self, offset: u32) -> Self {
        Self {
            min: self.min.saturating_add(offset),
            max: self.max.saturating_add(offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_range_deserialize_validates() {
        let range: FrameRange = serde_json::from_str(r#"{"min":3,"max":5}"#).unwrap();
        assert_eq!(range, FrameRange::new(3, 5).unwrap());
        assert!(serde_json::from_str::<FrameRange>(r#"{"min":0,"max":5}"#).is_err());
        assert!(serde_json::from_str::<FrameRange>(r#"{"min":6,"max":5}"#).is_err());
    }

    #[test]
    fn test_frame_range_validation() {
        assert!(FrameRange::new(0, 10).is_err());
        assert!(FrameRange::new(11, 10).is_err());
        let range = FrameRange::new(5, 10).unwrap();
        assert_eq!(range.len(), 6);
        assert!(range.contains(5));
        assert!(range.contains(10));
        assert!(!range.contains(11));
    }

    #[test]
    fn test_error_kinds_are_distinguishable() {
        let err = FrameRange::new(3, 1).unwrap_err();
        assert!(matches!(err, CriteriaError::InvalidFrameRange { min: 3, max: 1 }));
        assert!(err.to_string().contains("frame range"));
    }
}
