//! Gender and species gender ratios

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Genderless,
}

/// Species gender ratio
///
/// Each ratio maps to the threshold byte compared against the low byte of the
/// PID: values below the threshold are female.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenderRatio {
    MaleOnly,
    /// 7 male : 1 female
    Male7Female1,
    /// 3 male : 1 female
    Male3Female1,
    Even,
    /// 1 male : 3 female
    Male1Female3,
    /// 1 male : 7 female
    Male1Female7,
    FemaleOnly,
    Genderless,
}

impl GenderRatio {
    pub const fn threshold(self) -> u8 {
        match self {
            GenderRatio::MaleOnly => 0,
            GenderRatio::Male7Female1 => 31,
            GenderRatio::Male3Female1 => 63,
            GenderRatio::Even => 127,
            GenderRatio::Male1Female3 => 191,
            GenderRatio::Male1Female7 => 225,
            GenderRatio::FemaleOnly => 254,
            GenderRatio::Genderless => 255,
        }
    }

    /// Only one outcome is possible regardless of the PID
    pub const fn is_fixed(self) -> bool {
        matches!(
            self,
            GenderRatio::MaleOnly | GenderRatio::FemaleOnly | GenderRatio::Genderless
        )
    }

    /// Gender for a PID low byte
    #[inline]
    pub const fn gender_of(self, low_byte: u8) -> Gender {
        match self {
            GenderRatio::Genderless => Gender::Genderless,
            GenderRatio::MaleOnly => Gender::Male,
            GenderRatio::FemaleOnly => Gender::Female,
            _ => {
                if low_byte < self.threshold() {
                    Gender::Female
                } else {
                    Gender::Male
                }
            }
        }
    }

    /// Number of low-byte values (out of 256) giving `gender`
    pub const fn outcomes(self, gender: Gender) -> u32 {
        match (self, gender) {
            (GenderRatio::Genderless, Gender::Genderless) => 256,
            (GenderRatio::Genderless, _) | (_, Gender::Genderless) => 0,
            (GenderRatio::MaleOnly, Gender::Male) => 256,
            (GenderRatio::MaleOnly, Gender::Female) => 0,
            (GenderRatio::FemaleOnly, Gender::Female) => 256,
            (GenderRatio::FemaleOnly, Gender::Male) => 0,
            (ratio, Gender::Female) => ratio.threshold() as u32,
            (ratio, Gender::Male) => 256 - ratio.threshold() as u32,
        }
    }

    /// Rewrite a PID low byte so that it lands on `gender`
    ///
    /// Used by mechanics that force a gender: the byte is folded into the
    /// female range `[0, threshold)` or the male range `[threshold, 256)`.
    pub const fn force_low_byte(self, low_byte: u8, gender: Gender) -> u8 {
        let threshold = self.threshold() as u32;
        if self.is_fixed() || threshold == 0 {
            return low_byte;
        }
        match gender {
            Gender::Female => (low_byte as u32 % threshold) as u8,
            Gender::Male => (threshold + low_byte as u32 % (256 - threshold)) as u8,
            Gender::Genderless => low_byte,
        }
    }
}
