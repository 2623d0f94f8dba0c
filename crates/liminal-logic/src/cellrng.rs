//! Deterministic per-cell PRNG.
//!
//! Each maze cell derives its layout from a generator seeded purely by its
//! grid coordinate, so a cell regenerated after eviction always comes back
//! identical. Mulberry32 is fast, well-mixed, and non-cryptographic - exactly
//! what room layout needs.

/// Two large odd multipliers fold (ix, iz) into one 32-bit seed.
const SEED_MUL_X: i32 = 928_371;
const SEED_MUL_Z: i32 = 1_237;

/// Derive the layout seed for a grid cell.
pub fn cell_seed(ix: i32, iz: i32) -> u32 {
    ix.wrapping_mul(SEED_MUL_X).wrapping_add(iz.wrapping_mul(SEED_MUL_Z)) as u32
}

/// Mulberry32 PRNG - 32-bit state, multiply-xorshift mixing.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Generator for a specific grid cell.
    pub fn for_cell(ix: i32, iz: i32) -> Self {
        Self::new(cell_seed(ix, iz))
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Next value in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        self.next_u32() as f32 / 4_294_967_296.0
    }

    /// Next value in [min, max).
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}
