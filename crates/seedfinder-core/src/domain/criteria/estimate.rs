//! Expected-result estimates
//!
//! A rough count of how many results a search will produce, computed from
//! the declared ranges alone. The count is divided step by step, so the
//! integer rounding of each step carries into the next; the value is only an
//! advisory warning before a large search.

use super::{CriteriaError, IvCriteria, PidCriteria};
use crate::domain::types::{Ability, NATURE_COUNT};

/// Number of distinct IV combinations (32^6)
const IV_SPACE: u128 = 1 << 30;

/// Shiny odds denominator
const SHINY_DENOMINATOR: u128 = 8192;

/// Closed-form estimate of the number of results a search will report
pub trait ExpectedResults {
    fn expected_number_of_results(&self) -> Result<u64, CriteriaError>;
}

/// Running estimate builder
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResultEstimate {
    count: u128,
}

impl ResultEstimate {
    /// Start from every (seed, frame) pair
    pub fn new(num_seeds: u64, num_frames: u64) -> Self {
        Self {
            count: num_seeds as u128 * num_frames as u128,
        }
    }

    /// Apply the IV box (and hidden power) probability
    pub fn ivs(self, criteria: &IvCriteria) -> Result<Self, CriteriaError> {
        let combinations = criteria.box_combinations() as u128;
        if combinations == 0 && criteria.has_hidden_power_constraint() {
            return Err(CriteriaError::ImpossibleHiddenPower {
                element: criteria.hidden_type(),
                min_power: criteria.min_hidden_power(),
            });
        }
        Ok(Self {
            count: self.count * combinations / IV_SPACE,
        })
    }

    /// Apply nature, ability, gender and shininess fractions
    #[must_use]
    pub fn pid(self, criteria: &PidCriteria) -> Self {
        let mut count = self.count;
        count = count * criteria.natures.len() as u128 / NATURE_COUNT as u128;
        if let Some(ability) = criteria.ability {
            if ability != Ability::Hidden {
                count /= 2;
            }
        }
        if let Some(gender) = criteria.gender {
            count = count * criteria.gender_ratio.outcomes(gender) as u128 / 256;
        }
        if criteria.shiny_only {
            count /= SHINY_DENOMINATOR;
        }
        Self { count }
    }

    /// Multiply by `numerator / denominator`
    #[must_use]
    pub fn fraction(self, numerator: u64, denominator: u64) -> Self {
        if denominator == 0 {
            return Self { count: 0 };
        }
        Self {
            count: self.count * numerator as u128 / denominator as u128,
        }
    }

    pub fn value(self) -> u64 {
        u64::try_from(self.count).unwrap_or(u64::MAX)
    }
}
