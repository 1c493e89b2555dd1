//! Random draws used by exit resolution and the key chase.
//! This module exists so tests can substitute a scripted source and assert
//! distribution and boundary behavior exactly.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

/// A source of uniform draws in `[0, 1)`. One shared instance drives every
/// random decision in a session; no reproducibility is promised beyond the
/// seed the frontend chooses.
pub trait UnitRoll {
    fn unit(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        let idx = (self.unit() * len as f64) as usize;
        idx.min(len - 1)
    }
}

impl UnitRoll for ChaCha8Rng {
    fn unit(&mut self) -> f64 {
        // 53 high bits of a u64, the standard uniform-double construction.
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::rand_core::SeedableRng;
    use test_support::ScriptedRoll;

    #[test]
    fn chacha_unit_stays_in_half_open_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..10_000 {
            let u = rng.unit();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn index_never_reaches_len() {
        let mut roll = ScriptedRoll::new(&[0.999_999_999]);
        assert_eq!(roll.index(3), 2);
    }

    #[test]
    fn scripted_roll_repeats_final_draw() {
        let mut roll = ScriptedRoll::new(&[0.25, 0.75]);
        assert_eq!(roll.unit(), 0.25);
        assert_eq!(roll.unit(), 0.75);
        assert_eq!(roll.unit(), 0.75);
    }
}
