//! Look-ahead buffer over an engine
//!
//! Several mechanics need to see the next few outputs before deciding what
//! "frame N" is. [`BufferedRng`] keeps the next `N` outputs in a ring so moving
//! the window by one fetches exactly one new value.

use super::Rng;

/// Fixed-size ring buffer of upcoming outputs
#[derive(Clone, Debug)]
pub struct BufferedRng<R: Rng, const N: usize> {
    rng: R,
    buffer: [R::Output; N],
    head: usize,
}

impl<R: Rng, const N: usize> BufferedRng<R, N> {
    /// Fill the buffer with the first `N` outputs of `rng`
    pub fn new(mut rng: R) -> Self {
        assert!(N > 0, "BufferedRng requires a non-empty window");
        let buffer = std::array::from_fn(|_| rng.next_value());
        Self {
            rng,
            buffer,
            head: 0,
        }
    }

    /// Oldest buffered output (the one at the window start)
    #[inline]
    pub fn current(&self) -> R::Output {
        self.buffer[self.head]
    }

    /// Output `offset` positions after the window start (`offset < N`)
    #[inline]
    pub fn peek(&self, offset: usize) -> R::Output {
        debug_assert!(offset < N);
        self.buffer[(self.head + offset) % N]
    }

    /// Slide the window by one output
    #[inline]
    pub fn advance(&mut self) {
        self.buffer[self.head] = self.rng.next_value();
        self.head = (self.head + 1) % N;
    }

    /// Slide the window by `n` outputs
    pub fn advance_by(&mut self, n: u64) {
        if n >= N as u64 {
            self.rng.advance_by(n - N as u64);
            self.buffer = std::array::from_fn(|_| self.rng.next_value());
            self.head = 0;
        } else {
            for _ in 0..n {
                self.advance();
            }
        }
    }

    /// Window size
    pub const fn window(&self) -> usize {
        N
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rng::{Mt, PokeRng};

    #[test]
    fn test_window_matches_stream() {
        let mut reference = PokeRng::new(0xCAFE);
        let stream: Vec<u32> = (0..32).map(|_| reference.next_u32()).collect();

        let mut buffered = BufferedRng::<_, 6>::new(PokeRng::new(0xCAFE));
        for start in 0..20 {
            for offset in 0..6 {
                assert_eq!(buffered.peek(offset), stream[start + offset]);
            }
            assert_eq!(buffered.current(), stream[start]);
            buffered.advance();
        }
    }

    #[test]
    fn test_advance_by_matches_single_steps() {
        for n in [0u64, 1, 5, 6, 7, 100, 700] {
            let mut stepped = BufferedRng::<_, 6>::new(Mt::new(7));
            for _ in 0..n {
                stepped.advance();
            }
            let mut jumped = BufferedRng::<_, 6>::new(Mt::new(7));
            jumped.advance_by(n);

            for offset in 0..6 {
                assert_eq!(stepped.peek(offset), jumped.peek(offset), "n = {}", n);
            }
        }
    }
}
