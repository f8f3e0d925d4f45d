//! IV criteria

use super::CriteriaError;
use crate::domain::types::ivs::{HIDDEN_POWER_ORDER, hidden_power_from_bits, hidden_type_from_bits};
use crate::domain::types::{Element, Ivs, Stat};
use serde::{Deserialize, Serialize};

/// Per-stat IV box plus an optional hidden power constraint
///
/// Deserialized values go through the same validation as the constructors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IvCriteriaFields")]
pub struct IvCriteria {
    min: Ivs,
    max: Ivs,
    should_check_max: bool,
    hidden_type: Option<Element>,
    min_hidden_power: u8,
}

/// Serialized shape of [`IvCriteria`], checked on conversion
#[derive(Deserialize)]
struct IvCriteriaFields {
    min: Ivs,
    max: Ivs,
    should_check_max: bool,
    hidden_type: Option<Element>,
    min_hidden_power: u8,
}

impl TryFrom<IvCriteriaFields> for IvCriteria {
    type Error = CriteriaError;

    fn try_from(fields: IvCriteriaFields) -> Result<Self, CriteriaError> {
        let mut criteria = Self::new(fields.min, fields.max)?;
        criteria.should_check_max = fields.should_check_max;
        criteria.with_hidden_power(fields.hidden_type, fields.min_hidden_power)
    }
}

impl IvCriteria {
    /// Accept every IV combination
    pub fn any() -> Self {
        Self {
            min: Ivs::new([0; 6]),
            max: Ivs::PERFECT,
            should_check_max: false,
            hidden_type: None,
            min_hidden_power: 30,
        }
    }

    /// Inclusive per-stat box
    pub fn new(min: Ivs, max: Ivs) -> Result<Self, CriteriaError> {
        for stat in Stat::ALL {
            if min.stat(stat) > max.stat(stat) {
                return Err(CriteriaError::InvalidIvRange {
                    stat: stat.name(),
                    min: min.stat(stat),
                    max: max.stat(stat),
                });
            }
        }
        Ok(Self {
            min,
            max,
            should_check_max: max != Ivs::PERFECT,
            hidden_type: None,
            min_hidden_power: 30,
        })
    }

    /// Only lower bounds; the max side is "don't care"
    pub fn at_least(min: Ivs) -> Self {
        Self {
            min,
            ..Self::any()
        }
    }

    /// Add a hidden power constraint
    ///
    /// Fails when no IV combination inside the box satisfies it.
    pub fn with_hidden_power(
        mut self,
        element: Option<Element>,
        min_power: u8,
    ) -> Result<Self, CriteriaError> {
        self.hidden_type = element;
        self.min_hidden_power = min_power.max(30);
        if self.has_hidden_power_constraint() && self.box_combinations() == 0 {
            return Err(CriteriaError::ImpossibleHiddenPower { element, min_power });
        }
        Ok(self)
    }

    pub const fn min(&self) -> Ivs {
        self.min
    }

    /// Upper bound actually applied
    pub const fn max(&self) -> Ivs {
        if self.should_check_max {
            self.max
        } else {
            Ivs::PERFECT
        }
    }

    pub const fn should_check_max(&self) -> bool {
        self.should_check_max
    }

    pub const fn hidden_type(&self) -> Option<Element> {
        self.hidden_type
    }

    pub const fn min_hidden_power(&self) -> u8 {
        self.min_hidden_power
    }

    pub const fn has_hidden_power_constraint(&self) -> bool {
        self.hidden_type.is_some() || self.min_hidden_power > 30
    }

    /// No constraint at all
    pub fn is_unconstrained(&self) -> bool {
        self.min == Ivs::new([0; 6]) && !self.should_check_max && !self.has_hidden_power_constraint()
    }

    #[inline]
    pub fn matches(&self, ivs: Ivs) -> bool {
        if !ivs.better_than_or_equal(self.min) {
            return false;
        }
        if self.should_check_max && !ivs.worse_than_or_equal(self.max) {
            return false;
        }
        if let Some(element) = self.hidden_type {
            if ivs.hidden_power_type() != element {
                return false;
            }
        }
        self.min_hidden_power <= 30 || ivs.hidden_power_power() >= self.min_hidden_power
    }

    /// Number of IV combinations (out of 32^6) accepted by these criteria
    ///
    /// Without a hidden power constraint this is the box volume. With one, the
    /// box is split per stat into the four (bit 0, bit 1) classes and the
    /// 4^6 class combinations are counted, which is all the hidden power
    /// formula looks at.
    pub fn box_combinations(&self) -> u64 {
        let min = self.min;
        let max = self.max();

        if !self.has_hidden_power_constraint() {
            return Stat::ALL
                .iter()
                .map(|&s| max.stat(s).checked_sub(min.stat(s)).map_or(0, |span| span as u64 + 1))
                .product();
        }

        // class_counts[i][c]: values of stat HIDDEN_POWER_ORDER[i] in range with value & 3 == c
        let mut class_counts = [[0u64; 4]; 6];
        for (i, &stat) in HIDDEN_POWER_ORDER.iter().enumerate() {
            for value in min.stat(stat)..=max.stat(stat) {
                class_counts[i][(value & 3) as usize] += 1;
            }
        }

        let mut total = 0u64;
        for cell in 0..4096u32 {
            let mut count = 1u64;
            let mut type_bits = 0u32;
            let mut power_bits = 0u32;
            for (i, counts) in class_counts.iter().enumerate() {
                let class = (cell >> (i * 2)) & 3;
                count *= counts[class as usize];
                if count == 0 {
                    break;
                }
                type_bits |= (class & 1) << i;
                power_bits |= (class >> 1) << i;
            }
            if count == 0 {
                continue;
            }
            if let Some(element) = self.hidden_type {
                if hidden_type_from_bits(type_bits) != element {
                    continue;
                }
            }
            if hidden_power_from_bits(power_bits) < self.min_hidden_power {
                continue;
            }
            total += count;
        }
        total
    }
}

impl Default for IvCriteria {
    fn default() -> Self {
        Self::any()
    }
}
