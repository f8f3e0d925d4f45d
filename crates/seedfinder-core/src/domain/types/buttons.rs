//! Held-button state

use serde::{Deserialize, Serialize};

/// A single DS button, by KEYINPUT register bit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Button {
    A = 0,
    B = 1,
    Select = 2,
    Start = 3,
    Right = 4,
    Left = 5,
    Up = 6,
    Down = 7,
    R = 8,
    L = 9,
    X = 10,
    Y = 11,
}

impl Button {
    /// Enumeration order used for combination tables
    pub const ALL: [Button; 12] = [
        Button::A,
        Button::B,
        Button::X,
        Button::Y,
        Button::L,
        Button::R,
        Button::Start,
        Button::Select,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
    ];

    #[inline]
    pub const fn bit(self) -> u16 {
        1 << self as u16
    }

    pub const fn name(self) -> &'static str {
        match self {
            Button::A => "A",
            Button::B => "B",
            Button::Select => "Select",
            Button::Start => "Start",
            Button::Right => "Right",
            Button::Left => "Left",
            Button::Up => "Up",
            Button::Down => "Down",
            Button::R => "R",
            Button::L => "L",
            Button::X => "X",
            Button::Y => "Y",
        }
    }
}

/// Set of held buttons (bit set = pressed)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ButtonMask(pub u16);

impl ButtonMask {
    pub const NONE: ButtonMask = ButtonMask(0);

    /// Soft reset combination
    const SOFT_RESET: u16 = Button::L.bit() | Button::R.bit() | Button::Start.bit() | Button::Select.bit();

    #[must_use]
    pub const fn with(self, button: Button) -> Self {
        Self(self.0 | button.bit())
    }

    #[inline]
    pub const fn contains(self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }

    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Reachable on hardware: no opposite D-pad directions, not the soft reset
    pub const fn is_valid(self) -> bool {
        let up_down = Button::Up.bit() | Button::Down.bit();
        let left_right = Button::Left.bit() | Button::Right.bit();
        self.0 & up_down != up_down
            && self.0 & left_right != left_right
            && self.0 & Self::SOFT_RESET != Self::SOFT_RESET
    }

    pub fn iter(self) -> impl Iterator<Item = Button> {
        Button::ALL.into_iter().filter(move |&b| self.contains(b))
    }
}

impl FromIterator<Button> for ButtonMask {
    fn from_iter<I: IntoIterator<Item = Button>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, ButtonMask::with)
    }
}

impl std::fmt::Display for ButtonMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == 0 {
            return f.write_str("none");
        }
        let names: Vec<&str> = self.iter().map(Button::name).collect();
        f.write_str(&names.join("+"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity() {
        assert!(ButtonMask::NONE.is_valid());
        assert!(ButtonMask::NONE.with(Button::Up).with(Button::Left).is_valid());
        assert!(!ButtonMask::NONE.with(Button::Up).with(Button::Down).is_valid());
        assert!(!ButtonMask::NONE.with(Button::Left).with(Button::Right).is_valid());

        let soft_reset: ButtonMask = [Button::L, Button::R, Button::Start, Button::Select]
            .into_iter()
            .collect();
        assert!(!soft_reset.is_valid());
        assert!(ButtonMask::NONE.with(Button::L).with(Button::R).with(Button::Start).is_valid());
    }

    #[test]
    fn test_display() {
        let mask: ButtonMask = [Button::Start, Button::A].into_iter().collect();
        assert_eq!(mask.to_string(), "A+Start");
        assert_eq!(ButtonMask::NONE.to_string(), "none");
    }
}
