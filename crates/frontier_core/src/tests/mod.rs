use super::*;
use crate::test_fixtures::{base_content, base_state, make_rng, rocky_planet, ScriptedRng};

mod determinism;
mod encounters;
mod hazards;

// --- Shared test helpers ------------------------------------------------

/// Content with every random gate closed: no event catalog or sector hazard
/// fires unless a test opens it again.
fn quiet_content() -> GameContent {
    let mut content = base_content();
    for catalog in [&mut content.malfunctions, &mut content.distress_signals] {
        catalog.base_chances.clear();
        catalog.depth_bonus_per_sector = 0.0;
    }
    for sector in &mut content.sectors {
        sector.hazard_chance = 0.0;
    }
    content
}

fn rocky_id() -> PlanetId {
    rocky_planet().id
}

fn volcanic_id() -> PlanetId {
    PlanetId("s1_p01".to_string())
}

/// Put the ship in orbit of `planet` without going through a warp.
fn orbiting(state: &mut GameState, planet: &PlanetId) {
    state.sector.current_planet = Some(planet.clone());
}

/// Pretend the current sector has the given index while keeping the fixture planets.
fn in_sector(state: &mut GameState, index: u8) {
    state.sector.index = index;
    for planet in &mut state.sector.planets {
        planet.sector = index;
    }
}

fn rejection(events: &[EventEnvelope]) -> Option<&str> {
    events.iter().find_map(|envelope| match &envelope.event {
        Event::ActionRejected { reason, .. } => Some(reason.as_str()),
        _ => None,
    })
}

fn snapshot(state: &GameState) -> serde_json::Value {
    serde_json::to_value(state).unwrap()
}
