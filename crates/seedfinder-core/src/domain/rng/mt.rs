//! MT19937 random number generator
//!
//! [`Mt`] is the textbook implementation. [`LazyMt`] produces the identical
//! sequence but computes initialization words and first-block twists only when
//! an output needs them, which is what IV searches want: most seeds are
//! discarded after a few dozen outputs.

use super::Rng;

/// State array size (32-bit words)
const N: usize = 624;

/// Twist offset
const M: usize = 397;

const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7FFF_FFFF;
const MATRIX_A: u32 = 0x9908_B0DF;

const TEMPERING_MASK_B: u32 = 0x9D2C_5680;
const TEMPERING_MASK_C: u32 = 0xEFC6_0000;

const INIT_MULTIPLIER: u32 = 1_812_433_253;

#[inline]
fn init_word(prev: u32, i: usize) -> u32 {
    INIT_MULTIPLIER
        .wrapping_mul(prev ^ (prev >> 30))
        .wrapping_add(i as u32)
}

#[inline]
fn temper(mut y: u32) -> u32 {
    y ^= y >> 11;
    y ^= (y << 7) & TEMPERING_MASK_B;
    y ^= (y << 15) & TEMPERING_MASK_C;
    y ^= y >> 18;
    y
}

/// Twist one word in place
#[inline]
fn twist_word(state: &mut [u32; N], i: usize) {
    let y = (state[i] & UPPER_MASK) | (state[(i + 1) % N] & LOWER_MASK);
    let mag = if y & 1 != 0 { MATRIX_A } else { 0 };
    state[i] = state[(i + M) % N] ^ (y >> 1) ^ mag;
}

fn twist_all(state: &mut [u32; N]) {
    for i in 0..N {
        twist_word(state, i);
    }
}

// =============================================================================
// Mt
// =============================================================================

/// MT19937 random number generator
#[derive(Clone)]
pub struct Mt {
    state: [u32; N],
    index: usize,
}

impl Mt {
    /// Create a new generator from a 32-bit seed
    pub fn new(seed: u32) -> Self {
        let mut state = [0u32; N];
        state[0] = seed;
        for i in 1..N {
            state[i] = init_word(state[i - 1], i);
        }
        Self { state, index: N }
    }

    /// Generate the next tempered 32-bit output
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        if self.index >= N {
            twist_all(&mut self.state);
            self.index = 0;
        }
        let y = self.state[self.index];
        self.index += 1;
        temper(y)
    }
}

impl Rng for Mt {
    type Output = u32;

    #[inline]
    fn next_value(&mut self) -> u32 {
        self.next_u32()
    }

    fn advance_by(&mut self, n: u64) {
        let mut remaining = n;
        while remaining > 0 {
            if self.index >= N {
                twist_all(&mut self.state);
                self.index = 0;
            }
            let step = remaining.min((N - self.index) as u64);
            self.index += step as usize;
            remaining -= step;
        }
    }
}

impl std::fmt::Debug for Mt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mt").field("index", &self.index).finish()
    }
}

// =============================================================================
// LazyMt
// =============================================================================

/// MT19937 with lazy initialization of the first block
///
/// Output `i` of the first block only needs init words `i`, `i + 1` and
/// `i + 397`, so consuming the first ~50 outputs touches ~450 words instead of
/// initializing and twisting all 624. After the first block it behaves like
/// [`Mt`].
#[derive(Clone)]
pub struct LazyMt {
    state: [u32; N],
    /// Number of leading words holding their init value (or later values)
    initialized: usize,
    /// Next output index in the current block
    index: usize,
    /// Still inside the lazily-twisted first block
    first_block: bool,
}

impl LazyMt {
    /// Create a new generator from a 32-bit seed
    pub fn new(seed: u32) -> Self {
        let mut state = [0u32; N];
        state[0] = seed;
        Self {
            state,
            initialized: 1,
            index: 0,
            first_block: true,
        }
    }

    #[inline]
    fn ensure_initialized(&mut self, upto: usize) {
        let upto = upto.min(N);
        while self.initialized < upto {
            let i = self.initialized;
            self.state[i] = init_word(self.state[i - 1], i);
            self.initialized += 1;
        }
    }

    /// Generate the next tempered 32-bit output
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        if self.index >= N {
            self.ensure_initialized(N);
            twist_all(&mut self.state);
            self.index = 0;
            self.first_block = false;
        }
        if self.first_block {
            let i = self.index;
            self.ensure_initialized(i + M + 1);
            twist_word(&mut self.state, i);
        }
        let y = self.state[self.index];
        self.index += 1;
        temper(y)
    }
}

impl Rng for LazyMt {
    type Output = u32;

    #[inline]
    fn next_value(&mut self) -> u32 {
        self.next_u32()
    }
}

impl std::fmt::Debug for LazyMt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyMt")
            .field("index", &self.index)
            .field("initialized", &self.initialized)
            .finish()
    }
}
