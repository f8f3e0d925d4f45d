//! Held-button combinations to try at boot

use crate::domain::types::{Button, ButtonMask};
use serde::{Deserialize, Serialize};

/// Ordered list of button masks a hashed-seed search walks
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonComboSet(Vec<ButtonMask>);

impl ButtonComboSet {
    /// No button held
    pub fn none() -> Self {
        Self(vec![ButtonMask::NONE])
    }

    /// "None" plus every valid combination of at most `max_buttons` buttons
    ///
    /// Combinations are grouped by size, each group in [`Button::ALL`] order.
    pub fn up_to(max_buttons: usize) -> Self {
        let mut masks = vec![ButtonMask::NONE];
        for size in 1..=max_buttons.min(Button::ALL.len()) {
            push_combinations(&mut masks, ButtonMask::NONE, 0, size);
        }
        Self(masks)
    }

    /// Explicit masks; invalid combinations are dropped
    pub fn from_masks(masks: impl IntoIterator<Item = ButtonMask>) -> Self {
        Self(masks.into_iter().filter(|m| m.is_valid()).collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<ButtonMask> {
        self.0.get(index).copied()
    }

    pub fn as_slice(&self) -> &[ButtonMask] {
        &self.0
    }
}

impl Default for ButtonComboSet {
    fn default() -> Self {
        Self::none()
    }
}

fn push_combinations(out: &mut Vec<ButtonMask>, held: ButtonMask, from: usize, remaining: usize) {
    if remaining == 0 {
        if held.is_valid() {
            out.push(held);
        }
        return;
    }
    for i in from..Button::ALL.len() {
        push_combinations(out, held.with(Button::ALL[i]), i + 1, remaining - 1);
    }
}
