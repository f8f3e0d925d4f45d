//! Linear congruential generators
//!
//! `state' = state * M + C` with wrapping arithmetic. The multiplier and
//! increment are const generic parameters so every variant compiles to its
//! own specialized code.

use super::Rng;

// =============================================================================
// 32-bit LCG
// =============================================================================

/// 32-bit linear congruential generator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Lcg32<const M: u32, const C: u32> {
    state: u32,
}

/// Gen 3/4 main generator
pub type PokeRng = Lcg32<0x41C6_4E6D, 0x0000_6073>;
/// Reverse of [`PokeRng`]
pub type PokeRngR = Lcg32<0xEEB9_EB65, 0x0A35_61A1>;
/// Gen 4 alternate generator (Masuda method rerolls, egg PIDs)
pub type ARng = Lcg32<0x6C07_8965, 0x0000_0001>;
/// Reverse of [`ARng`]
pub type ARngR = Lcg32<0x9638_806D, 0x69C7_7F93>;
/// Colosseum / XD generator
pub type XdRng = Lcg32<0x0003_43FD, 0x0026_9EC3>;
/// Reverse of [`XdRng`]
pub type XdRngR = Lcg32<0xB9B3_3155, 0xA170_F641>;

impl<const M: u32, const C: u32> Lcg32<M, C> {
    /// Create a generator whose current state is `seed`
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Current internal state
    #[inline]
    pub const fn state(&self) -> u32 {
        self.state
    }

    /// State that follows `seed`
    #[inline]
    pub const fn step(seed: u32) -> u32 {
        seed.wrapping_mul(M).wrapping_add(C)
    }

    /// Advance and return the new state
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = Self::step(self.state);
        self.state
    }

    /// Advance and return the high 16 bits of the new state
    #[inline]
    pub fn next_u16(&mut self) -> u16 {
        (self.next_u32() >> 16) as u16
    }

    /// Jump ahead `n` steps in O(log n)
    pub fn jump(&mut self, n: u64) {
        let (mult, add) = jump_params32(M, C, n);
        self.state = self.state.wrapping_mul(mult).wrapping_add(add);
    }
}

impl<const M: u32, const C: u32> From<u32> for Lcg32<M, C> {
    fn from(seed: u32) -> Self {
        Self::new(seed)
    }
}

impl<const M: u32, const C: u32> Rng for Lcg32<M, C> {
    type Output = u32;

    #[inline]
    fn next_value(&mut self) -> u32 {
        self.next_u32()
    }

    #[inline]
    fn peek(&self) -> u32 {
        Self::step(self.state)
    }

    fn advance_by(&mut self, n: u64) {
        self.jump(n);
    }
}

/// Combined (multiplier, increment) of applying `x * m + c` n times
pub fn jump_params32(m: u32, c: u32, mut n: u64) -> (u32, u32) {
    let (mut acc_mult, mut acc_add) = (1u32, 0u32);
    let (mut cur_mult, mut cur_add) = (m, c);

    while n > 0 {
        if n & 1 == 1 {
            acc_mult = acc_mult.wrapping_mul(cur_mult);
            acc_add = acc_add.wrapping_mul(cur_mult).wrapping_add(cur_add);
        }
        cur_add = cur_add.wrapping_mul(cur_mult.wrapping_add(1));
        cur_mult = cur_mult.wrapping_mul(cur_mult);
        n >>= 1;
    }

    (acc_mult, acc_add)
}

// =============================================================================
// 64-bit LCG
// =============================================================================

/// 64-bit linear congruential generator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Lcg64<const M: u64, const C: u64> {
    state: u64,
}

/// Gen 5 main generator
pub type Gen5Rng = Lcg64<0x5D58_8B65_6C07_8965, 0x0000_0000_0026_9EC3>;
/// Reverse of [`Gen5Rng`]
pub type Gen5RngR = Lcg64<0xDEDC_EDAE_9638_806D, 0x9B1A_E6E9_A384_E6F9>;

impl<const M: u64, const C: u64> Lcg64<M, C> {
    /// Create a generator whose current state is `seed`
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Current internal state
    #[inline]
    pub const fn state(&self) -> u64 {
        self.state
    }

    /// State that follows `seed`
    #[inline]
    pub const fn step(seed: u64) -> u64 {
        seed.wrapping_mul(M).wrapping_add(C)
    }

    /// Advance and return the new state
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = Self::step(self.state);
        self.state
    }

    /// Advance and return the high 32 bits of the new state
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Advance and scale the high 32 bits into `0..n`
    ///
    /// This is the games' `((r >> 32) * n) >> 32` idiom.
    #[inline]
    pub fn rand(&mut self, n: u32) -> u32 {
        scale(self.next_u64(), n)
    }

    /// Advance and return the top bit
    #[inline]
    pub fn coin(&mut self) -> u32 {
        (self.next_u64() >> 63) as u32
    }

    /// Jump ahead `n` steps in O(log n)
    pub fn jump(&mut self, n: u64) {
        let (mult, add) = jump_params64(M, C, n);
        self.state = self.state.wrapping_mul(mult).wrapping_add(add);
    }
}

/// Scale the high 32 bits of a 64-bit state into `0..n`
#[inline]
pub(crate) fn scale(state: u64, n: u32) -> u32 {
    (((state >> 32) * n as u64) >> 32) as u32
}

impl<const M: u64, const C: u64> Rng for Lcg64<M, C> {
    type Output = u64;

    #[inline]
    fn next_value(&mut self) -> u64 {
        self.next_u64()
    }

    #[inline]
    fn peek(&self) -> u64 {
        Self::step(self.state)
    }

    fn advance_by(&mut self, n: u64) {
        self.jump(n);
    }
}

/// Combined (multiplier, increment) of applying `x * m + c` n times
pub fn jump_params64(m: u64, c: u64, mut n: u64) -> (u64, u64) {
    let (mut acc_mult, mut acc_add) = (1u64, 0u64);
    let (mut cur_mult, mut cur_add) = (m, c);

    while n > 0 {
        if n & 1 == 1 {
            acc_mult = acc_mult.wrapping_mul(cur_mult);
            acc_add = acc_add.wrapping_mul(cur_mult).wrapping_add(cur_add);
        }
        cur_add = cur_add.wrapping_mul(cur_mult.wrapping_add(1));
        cur_mult = cur_mult.wrapping_mul(cur_mult);
        n >>= 1;
    }

    (acc_mult, acc_add)
}
