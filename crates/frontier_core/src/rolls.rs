//! Uniform draws built on a single `[0, 1)` value per roll.
//!
//! Every random decision in the engine goes through these helpers, so a
//! scripted source can pin any individual roll in tests.

use rand::Rng;

use crate::SimContext;

/// One uniform draw in `[0, 1)`.
pub fn roll_unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>()
}

/// Integer in `[min, max]` inclusive. Returns `min` for an empty or inverted range.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn roll_int<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> u32 {
    if max <= min {
        return min;
    }
    let span = f64::from(max - min) + 1.0;
    let offset = (roll_unit(rng) * span).floor() as u32;
    min.saturating_add(offset).min(max)
}

/// Real value in `[min, max)`. Returns `min` for an empty or inverted range.
pub fn roll_between<R: Rng + ?Sized>(rng: &mut R, (min, max): (f64, f64)) -> f64 {
    if max <= min {
        return min;
    }
    min + roll_unit(rng) * (max - min)
}

/// Uniform index into a collection of `len` elements. `len` must be non-zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn roll_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> usize {
    debug_assert!(len > 0, "roll_index on an empty collection");
    let index = (roll_unit(rng) * len as f64).floor() as usize;
    index.min(len.saturating_sub(1))
}

/// Independent Bernoulli draw. Never forced.
pub fn bernoulli<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    roll_unit(rng) < probability
}

/// Probability gate that honours `SimContext::force_deterministic`.
pub fn chance<R: Rng + ?Sized>(rng: &mut R, probability: f64, ctx: &SimContext) -> bool {
    ctx.force_deterministic || bernoulli(rng, probability)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{make_rng, ScriptedRng};

    #[test]
    fn roll_int_stays_in_range() {
        let mut rng = make_rng();
        for _ in 0..1_000 {
            let value = roll_int(&mut rng, 3, 9);
            assert!((3..=9).contains(&value));
        }
    }

    #[test]
    fn roll_int_maps_unit_to_buckets() {
        let mut rng = ScriptedRng::new(&[0.0, 0.2, 0.999]);
        assert_eq!(roll_int(&mut rng, 5, 15), 5);
        assert_eq!(roll_int(&mut rng, 5, 15), 7);
        assert_eq!(roll_int(&mut rng, 5, 15), 15);
    }

    #[test]
    fn inverted_ranges_collapse_to_min() {
        let mut rng = make_rng();
        assert_eq!(roll_int(&mut rng, 10, 2), 10);
        assert!((roll_between(&mut rng, (4.0, 4.0)) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn forced_chance_always_fires() {
        let mut rng = ScriptedRng::new(&[0.99]);
        assert!(chance(&mut rng, 0.0, &SimContext::deterministic()));
        assert!(!chance(&mut rng, 0.5, &SimContext::default()));
    }
}
