//! Pseudo-random number generators
//!
//! Exact re-implementations of the generators used by the target games.
//! Every engine is a plain value type: cloning forks an independent stream.
//!
//! ## Engines
//!
//! - [`Lcg32`] / [`Lcg64`]: linear congruential generators parameterized by
//!   (multiplier, increment) at compile time
//! - [`Mt`]: MT19937
//! - [`LazyMt`]: MT19937 that only initializes and twists the words it needs
//! - [`BufferedRng`]: look-ahead ring buffer over any engine

mod buffered;
mod lcg;
mod mt;

pub use buffered::BufferedRng;
pub use lcg::{
    ARng, ARngR, Gen5Rng, Gen5RngR, Lcg32, Lcg64, PokeRng, PokeRngR, XdRng, XdRngR, jump_params32,
    jump_params64,
};
pub use mt::{LazyMt, Mt};

/// Common contract of every engine
pub trait Rng: Clone {
    /// Raw output type
    type Output: Copy;

    /// Advance the state and return the next output
    fn next_value(&mut self) -> Self::Output;

    /// Return the next output without committing the state change
    fn peek(&self) -> Self::Output {
        self.clone().next_value()
    }

    /// Advance the state by `n` outputs
    fn advance_by(&mut self, n: u64) {
        for _ in 0..n {
            self.next_value();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<R: Rng>(rng: &mut R, n: usize) -> Vec<R::Output> {
        (0..n).map(|_| rng.next_value()).collect()
    }

    #[test]
    fn test_clone_forks_independent_stream() {
        let mut a = PokeRng::new(0x1234_5678);
        a.next_value();
        let mut b = a.clone();

        assert_eq!(drain(&mut a, 16), drain(&mut b, 16));
    }

    #[test]
    fn test_peek_does_not_commit() {
        let mut mt = Mt::new(5489);
        let peeked = mt.peek();
        assert_eq!(mt.peek(), peeked);
        assert_eq!(mt.next_value(), peeked);
    }

    #[test]
    fn test_advance_by_default_matches_loop() {
        let mut looped = LazyMt::new(42);
        for _ in 0..700 {
            looped.next_value();
        }
        let mut jumped = LazyMt::new(42);
        jumped.advance_by(700);

        assert_eq!(looped.next_value(), jumped.next_value());
    }
}
