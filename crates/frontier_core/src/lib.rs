//! `frontier_core`: procedural content and encounter resolution.
//!
//! No IO, no network. All randomness via the passed-in Rng.

pub mod encounters;
mod engine;
pub mod hazards;
pub mod probe;
pub mod rolls;
pub mod rules;
pub mod sampler;
mod types;
pub mod worldgen;

#[cfg(any(test, feature = "test-support"))]
pub mod test_fixtures;

pub use encounters::{roll_distress_signal, roll_event, roll_malfunction, use_item};
pub use engine::step;
pub use hazards::{invoke, HookCall, HookResult};
pub use probe::resolve_probe;
pub use rules::build_candidate_pool;
pub use sampler::{sample, Weighted};
pub use types::*;
pub use worldgen::{generate_planet, generate_sector};

pub(crate) fn emit(counters: &mut Counters, turn: u64, event: Event) -> EventEnvelope {
    let id = EventId(format!("evt_{:06}", counters.next_event_id));
    counters.next_event_id += 1;
    EventEnvelope { id, turn, event }
}

#[cfg(test)]
mod tests;
