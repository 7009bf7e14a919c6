//! Seeded shuffle permutations
//!
//! A shuffle never reorders the source itself. It produces a permutation of
//! track indices that the session reads through while shuffle is enabled, so
//! turning shuffle off restores the original order for free.
//!
//! The permutation must be reproducible from the seed alone: a given seed
//! always yields the same ordering, on every platform. That rules out
//! `rand::thread_rng` and the `StdRng` algorithm (which may change between
//! releases), so the generator here is a fixed 48-bit linear congruential
//! generator from the drand48 family.
//!
//! The shuffle itself only needs a [`RngCore`]: [`ShufflePermutation::generate`]
//! drives it with [`Lcg48`], and [`ShufflePermutation::shuffled`] accepts any
//! other `rand` generator.

use rand::{RngCore, SeedableRng};

const MULTIPLIER: u64 = 0x5_DEEC_E66D;
const ADDEND: u64 = 0xB;
const MASK: u64 = (1 << 48) - 1;

/// 48-bit linear congruential generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg48 {
    state: u64,
}

impl Lcg48 {
    /// Create a generator from a signed seed
    ///
    /// The seed is scrambled with the multiplier so that small seeds do not
    /// start from a near-zero state.
    pub fn new(seed: i64) -> Self {
        Self {
            state: (seed as u64 ^ MULTIPLIER) & MASK,
        }
    }

    /// Advance the state and return its top `bits` bits (1..=32)
    fn next_bits(&mut self, bits: u32) -> u32 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(ADDEND)
            & MASK;
        (self.state >> (48 - bits)) as u32
    }
}

impl RngCore for Lcg48 {
    fn next_u32(&mut self) -> u32 {
        self.next_bits(32)
    }

    fn next_u64(&mut self) -> u64 {
        let high = u64::from(self.next_bits(32));
        let low = u64::from(self.next_bits(32));
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Lcg48 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(i64::from_le_bytes(seed))
    }

    /// Seeds directly from the value; no PCG expansion, so equal seeds
    /// match [`Lcg48::new`]
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as i64)
    }
}

/// Uniform value in `0..bound` from the top 31 bits of a draw
///
/// Power-of-two bounds take the high bits directly; other bounds reject
/// the top, partial bucket of the 31-bit range to stay unbiased. Bounds
/// are clamped to `1..=i32::MAX`.
pub fn next_below<R: RngCore + ?Sized>(rng: &mut R, bound: u32) -> u32 {
    let bound = bound.clamp(1, i32::MAX as u32);
    let mask = bound - 1;
    let mut bits = rng.next_u32() >> 1;

    if bound & mask == 0 {
        return ((u64::from(bound) * u64::from(bits)) >> 31) as u32;
    }

    loop {
        let value = bits % bound;
        if u64::from(bits - value) + u64::from(mask) <= i32::MAX as u64 {
            return value;
        }
        bits = rng.next_u32() >> 1;
    }
}

/// Seeded bijection over the track indices of a collection
///
/// `order[position]` is the track index played at `position`;
/// `positions[track]` is its inverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShufflePermutation {
    order: Vec<usize>,
    positions: Vec<usize>,
}

impl ShufflePermutation {
    /// Shuffle `0..count` with a Fisher-Yates pass driven by `seed`
    ///
    /// Walks from the back: for `i = count` down to `2`, swaps slot `i - 1`
    /// with a uniformly chosen slot in `0..i`.
    pub fn generate(count: usize, seed: i64) -> Self {
        Self::shuffled(count, &mut Lcg48::new(seed))
    }

    /// Shuffle `0..count` with the same pass, drawing from `rng`
    pub fn shuffled<R: RngCore + ?Sized>(count: usize, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..count).collect();

        for i in (2..=count).rev() {
            let j = next_below(rng, i as u32) as usize;
            order.swap(i - 1, j);
        }

        let mut positions = vec![0; count];
        for (position, &track) in order.iter().enumerate() {
            positions[track] = position;
        }

        Self { order, positions }
    }

    /// Play position of the track with the given logical index
    pub fn map_forward(&self, logical: usize) -> usize {
        self.positions[logical]
    }

    /// Logical index of the track at the given play position
    pub fn map_backward(&self, position: usize) -> usize {
        self.order[position]
    }

    /// Track indices in play order
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
