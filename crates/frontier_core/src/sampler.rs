//! Weighted random selection.

use rand::Rng;

use crate::rolls::roll_unit;
use crate::{EventDef, PoolEntry, TypeWeight};

/// Anything that can take part in a weighted draw.
pub trait Weighted {
    fn weight(&self) -> f64;
}

impl<T: Weighted + ?Sized> Weighted for &T {
    fn weight(&self) -> f64 {
        (**self).weight()
    }
}

impl Weighted for PoolEntry {
    fn weight(&self) -> f64 {
        match self {
            PoolEntry::Resource { weight, .. }
            | PoolEntry::Item { weight, .. }
            | PoolEntry::Lore { weight, .. } => *weight,
        }
    }
}

impl Weighted for EventDef {
    fn weight(&self) -> f64 {
        self.weight
    }
}

impl Weighted for TypeWeight {
    fn weight(&self) -> f64 {
        self.weight
    }
}

/// Draw one candidate with probability proportional to its weight.
///
/// Draws `r` uniformly in `[0, total)` and walks the list subtracting weights;
/// the first candidate that takes the running value to zero or below wins, so a
/// draw landing exactly on a cumulative boundary goes to the earlier candidate.
/// Candidates with weight `<= 0` are never selected. Returns `None` when nothing
/// is selectable.
pub fn sample<'a, T: Weighted, R: Rng + ?Sized>(candidates: &'a [T], rng: &mut R) -> Option<&'a T> {
    let total: f64 = candidates
        .iter()
        .map(Weighted::weight)
        .filter(|weight| *weight > 0.0)
        .sum();
    if total <= 0.0 {
        return None;
    }

    let mut remaining = roll_unit(rng) * total;
    let mut last_selectable = None;
    for candidate in candidates {
        let weight = candidate.weight();
        if weight <= 0.0 {
            continue;
        }
        remaining -= weight;
        last_selectable = Some(candidate);
        if remaining <= 0.0 {
            return Some(candidate);
        }
    }
    // Float drift past the final boundary.
    last_selectable
}
