//! PID-derived criteria

use crate::domain::types::{Ability, Gender, GenderRatio, Nature, NatureSet, Pid, TrainerId};
use serde::{Deserialize, Serialize};

/// Nature / ability / gender / shininess filter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PidCriteria {
    pub natures: NatureSet,
    pub ability: Option<Ability>,
    pub gender: Option<Gender>,
    pub gender_ratio: GenderRatio,
    pub shiny_only: bool,
}

impl PidCriteria {
    pub fn any() -> Self {
        Self {
            natures: NatureSet::all(),
            ability: None,
            gender: None,
            gender_ratio: GenderRatio::Even,
            shiny_only: false,
        }
    }

    #[must_use]
    pub fn with_natures(mut self, natures: NatureSet) -> Self {
        self.natures = natures;
        self
    }

    #[must_use]
    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.ability = Some(ability);
        self
    }

    #[must_use]
    pub fn with_gender(mut self, gender: Gender, ratio: GenderRatio) -> Self {
        self.gender = Some(gender);
        self.gender_ratio = ratio;
        self
    }

    #[must_use]
    pub fn shiny(mut self) -> Self {
        self.shiny_only = true;
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.natures.is_all() && self.ability.is_none() && self.gender.is_none() && !self.shiny_only
    }

    /// Check every field; `nature` and `ability` come from the caller
    /// because several mechanics derive them independently of the PID.
    #[inline]
    pub fn matches(&self, pid: Pid, nature: Nature, ability: Ability, id: TrainerId) -> bool {
        self.matches_with_gender(pid, nature, ability, pid.gender(self.gender_ratio), id)
    }

    /// Like [`PidCriteria::matches`] but with a gender decided elsewhere
    #[inline]
    pub fn matches_with_gender(
        &self,
        pid: Pid,
        nature: Nature,
        ability: Ability,
        gender: Gender,
        id: TrainerId,
    ) -> bool {
        self.natures.contains(nature)
            && self.ability.is_none_or(|a| a == ability)
            && self.gender.is_none_or(|g| g == gender)
            && (!self.shiny_only || pid.is_shiny(id))
    }

    /// Gen 3/4: nature is `pid % 25`, ability is bit 0
    #[inline]
    pub fn matches_gen34(&self, pid: Pid, id: TrainerId) -> bool {
        self.matches(pid, pid.nature(), pid.ability_gen34(), id)
    }
}

impl Default for PidCriteria {
    fn default() -> Self {
        Self::any()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_matches_everything() {
        let criteria = PidCriteria::any();
        assert!(criteria.is_unconstrained());
        assert!(criteria.matches_gen34(Pid(0xDEAD_BEEF), TrainerId::default()));
    }

    #[test]
    fn test_nature_ability_gender() {
        let criteria = PidCriteria::any()
            .with_natures(NatureSet::empty().with(Nature::Modest))
            .with_ability(Ability::Second)
            .with_gender(Gender::Female, GenderRatio::Even);

        // 0x84EA0B71: Modest, ability bit 1, low byte 0x71
        assert!(criteria.matches_gen34(Pid(0x84EA_0B71), TrainerId::default()));
        assert!(!criteria.matches_gen34(Pid(0x84EA_0B70), TrainerId::default()));
    }

    #[test]
    fn test_gender_from_caller() {
        let criteria = PidCriteria::any().with_gender(Gender::Male, GenderRatio::Even);
        // low byte 0x00 reads as female under an even ratio
        let pid = Pid(0x1234_5600);
        let id = TrainerId::default();
        assert!(!criteria.matches(pid, pid.nature(), Ability::First, id));
        assert!(criteria.matches_with_gender(pid, pid.nature(), Ability::First, Gender::Male, id));
    }

    #[test]
    fn test_shiny_only() {
        let id = TrainerId::new(0, 0);
        let criteria = PidCriteria::any().shiny();
        assert!(criteria.matches_gen34(Pid(0x1234_1234), id));
        assert!(!criteria.matches_gen34(Pid(0x1234_5678), id));
    }
}
