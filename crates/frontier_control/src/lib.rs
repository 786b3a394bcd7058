use frontier_core::{
    Action, CrewRole, EventEffect, GameContent, GameState, ItemId, Planet, PlanetId,
    ResourceKind, Subsystem, MAX_STRESS,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub trait ActionSource {
    /// Next action to take, or `None` when the source has nothing left to do.
    fn next_action(&mut self, state: &GameState, content: &GameContent) -> Option<Action>;
}

/// Plays an expedition end to end:
/// 1. Use cargo to patch the probe or top up energy when short.
/// 2. Rest when an engineer can repair a damaged subsystem or the crew is frayed.
/// 3. Work the current planet: remote scan, deep scan, probe.
/// 4. Warp to the nearest unvisited planet.
/// 5. Enter the next sector; stop after the last one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutopilotController {
    /// Planets whose remote scan was already attempted (a blocked scan is not retried).
    scan_attempted: BTreeSet<PlanetId>,
    probed: BTreeSet<PlanetId>,
}

impl AutopilotController {
    pub fn new() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// First carried item whose use effects satisfy `wanted`.
fn carried_item(
    state: &GameState,
    content: &GameContent,
    wanted: impl Fn(&EventEffect) -> bool,
) -> Option<ItemId> {
    state
        .cargo
        .iter()
        .find(|id| {
            content
                .item(id)
                .is_some_and(|template| template.use_effects.iter().any(&wanted))
        })
        .cloned()
}

/// Priority 1: spend cargo on probe repairs or energy when running low.
fn supply_priority(state: &GameState, content: &GameContent) -> Option<Action> {
    let c = &content.constants;
    if state.probe_integrity <= c.autopilot_probe_integrity_floor {
        if let Some(item) = carried_item(state, content, |e| {
            matches!(e, EventEffect::RepairProbe { .. })
        }) {
            return Some(Action::UseItem { item });
        }
    }
    if state.resources.energy.current < c.warp_energy_cost + c.deep_scan_energy_cost {
        if let Some(item) = carried_item(state, content, |e| {
            matches!(
                e,
                EventEffect::AdjustResource {
                    resource: ResourceKind::Energy,
                    amount,
                } if *amount > 0
            )
        }) {
            return Some(Action::UseItem { item });
        }
    }
    None
}

/// Priority 2: rest to repair or to bring stress down.
fn rest_priority(state: &GameState, content: &GameContent) -> Option<Action> {
    let c = &content.constants;
    if state.resources.rations.current < c.rest_ration_cost {
        return None;
    }
    let can_repair = state.living_crew().any(|m| m.role == CrewRole::Engineer)
        && state.resources.metals.current >= c.repair_metals_cost
        && Subsystem::ALL.iter().any(|s| state.is_damaged(*s));
    // Keep a reserve so resting for stress never starves the crew.
    let frayed = state.living_crew().any(|m| m.stress >= MAX_STRESS)
        && state.resources.rations.current >= c.rest_ration_cost * 3;
    (can_repair || frayed).then_some(Action::Rest)
}

fn nearest_unvisited<'a>(state: &'a GameState, from: Option<&Planet>) -> Option<&'a Planet> {
    state
        .sector
        .planets
        .iter()
        .filter(|planet| !planet.visited)
        .min_by(|a, b| {
            let distance =
                |p: &Planet| from.map_or(0.0, |origin| origin.position.distance_to(&p.position));
            distance(a)
                .total_cmp(&distance(b))
                .then_with(|| a.id.cmp(&b.id))
        })
}

// ---------------------------------------------------------------------------
// AutopilotController
// ---------------------------------------------------------------------------

impl AutopilotController {
    /// Priority 3: the next step of work at the planet in orbit.
    fn work_current_planet(&mut self, state: &GameState, content: &GameContent) -> Option<Action> {
        let c = &content.constants;
        let planet = state.sector.current()?;
        let energy = state.resources.energy.current;

        if !planet.remote_scanned && !self.scan_attempted.contains(&planet.id) {
            if energy >= c.scan_energy_cost {
                self.scan_attempted.insert(planet.id.clone());
                return Some(Action::RemoteScan {
                    planet: planet.id.clone(),
                });
            }
        } else if planet.remote_scanned
            && !planet.scanned
            && !state.is_damaged(Subsystem::Sensors)
            && energy >= c.deep_scan_energy_cost + c.warp_energy_cost
        {
            return Some(Action::DeepScan {
                planet: planet.id.clone(),
            });
        }

        if !self.probed.contains(&planet.id)
            && state.probe_integrity > c.autopilot_probe_integrity_floor
            && !state.is_damaged(Subsystem::ProbeBay)
        {
            self.probed.insert(planet.id.clone());
            return Some(Action::Probe {
                planet: planet.id.clone(),
            });
        }
        None
    }
}

impl ActionSource for AutopilotController {
    fn next_action(&mut self, state: &GameState, content: &GameContent) -> Option<Action> {
        if let Some(action) = supply_priority(state, content) {
            return Some(action);
        }
        if let Some(action) = rest_priority(state, content) {
            return Some(action);
        }
        if let Some(action) = self.work_current_planet(state, content) {
            return Some(action);
        }

        // Priority 4: warp onward inside the sector.
        let can_warp = !state.is_damaged(Subsystem::Engines)
            && state.resources.energy.current >= content.constants.warp_energy_cost;
        if can_warp {
            if let Some(target) = nearest_unvisited(state, state.sector.current()) {
                return Some(Action::Warp {
                    planet: target.id.clone(),
                });
            }
        }

        // Priority 5: move to the next sector.
        if state.sector.index < content.max_sector() {
            return Some(Action::EnterSector {
                index: state.sector.index + 1,
            });
        }
        None
    }
}
