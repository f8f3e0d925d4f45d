//! C-Gear spinner
//!
//! While the C-Gear boots, an arrow spins to one of eight positions per
//! frame. The positions come from MT19937 seeded with the C-Gear seed:
//! `position = (output * 8) >> 32`.

use super::FrameGenerator;
use crate::domain::rng::Mt;
use crate::domain::seed::CGearSeed;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpinDirection {
    #[default]
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl SpinDirection {
    pub const ALL: [SpinDirection; 8] = [
        SpinDirection::Up,
        SpinDirection::UpRight,
        SpinDirection::Right,
        SpinDirection::DownRight,
        SpinDirection::Down,
        SpinDirection::DownLeft,
        SpinDirection::Left,
        SpinDirection::UpLeft,
    ];

    #[inline]
    pub fn from_output(output: u32) -> Self {
        Self::ALL[((output as u64 * 8) >> 32) as usize]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpinnerFrame {
    pub number: u32,
    pub direction: SpinDirection,
}

#[derive(Clone, Debug)]
pub struct SpinnerGenerator {
    mt: Mt,
    frame: SpinnerFrame,
}

impl SpinnerGenerator {
    pub fn new(seed: CGearSeed) -> Self {
        Self {
            mt: Mt::new(seed.raw()),
            frame: SpinnerFrame::default(),
        }
    }

    /// The next `len` positions, starting after the current frame
    pub fn sequence(&mut self, len: usize) -> Vec<SpinDirection> {
        (0..len)
            .map(|_| {
                self.advance();
                self.frame.direction
            })
            .collect()
    }
}

impl FrameGenerator for SpinnerGenerator {
    type Frame = SpinnerFrame;

    fn advance(&mut self) {
        self.frame = SpinnerFrame {
            number: self.frame.number + 1,
            direction: SpinDirection::from_output(self.mt.next_u32()),
        };
    }

    fn current(&self) -> &SpinnerFrame {
        &self.frame
    }

    fn frame_number(&self) -> u32 {
        self.frame.number
    }
}
