use rand::Rng;
use tracing::info;

use crate::encounters::{roll_distress_signal, roll_malfunction, use_item};
use crate::hazards::{invoke, HookCall, HookResult};
use crate::probe::resolve_probe;
use crate::worldgen::{clamp_difficulty, generate_sector};
use crate::{
    Action, CrewRole, Event, EventEnvelope, EventTrigger, GameContent, GameState, ItemId,
    PlanetId, Reward, SectorState, SimContext, Subsystem, SubsystemStatus,
};

/// Apply one player action.
///
/// Order of operations for every action:
/// 1. Validate the action (rejected actions change nothing but the turn).
/// 2. Pay its cost, except a remote scan, which pays after its hook.
/// 3. Run the sector hazard hook for the action's trigger. Warp and sector
///    entry apply their move first so the hook sees the new location; scans
///    run the hook first because it may block or alter the result.
/// 4. Apply the rest of the action's effect.
/// 5. Roll the random events scoped to the action.
/// 6. Increment the turn counter.
///
/// Returns all events produced by the action.
pub fn step(
    state: &mut GameState,
    action: &Action,
    content: &GameContent,
    ctx: &SimContext,
    rng: &mut impl Rng,
) -> Vec<EventEnvelope> {
    let mut events = Vec::new();

    let result = match action {
        Action::EnterSector { index } => enter_sector(state, *index, content, ctx, rng, &mut events),
        Action::Warp { planet } => warp(state, planet, content, ctx, rng, &mut events),
        Action::RemoteScan { planet } => remote_scan(state, planet, content, ctx, rng, &mut events),
        Action::DeepScan { planet } => deep_scan(state, planet, content, ctx, rng, &mut events),
        Action::Probe { planet } => probe(state, planet, content, ctx, rng, &mut events),
        Action::Rest => rest(state, content, ctx, rng, &mut events),
        Action::UseItem { item } => use_carried_item(state, item, content, rng, &mut events),
    };

    if let Err(reason) = result {
        let turn = state.meta.turn;
        events.push(crate::emit(
            &mut state.counters,
            turn,
            Event::ActionRejected {
                action: action.clone(),
                reason,
            },
        ));
    }

    state.meta.turn += 1;
    events
}

type StepResult = Result<(), String>;

fn push_event(state: &mut GameState, events: &mut Vec<EventEnvelope>, event: Event) {
    let turn = state.meta.turn;
    events.push(crate::emit(&mut state.counters, turn, event));
}

fn malfunction_check(
    state: &mut GameState,
    trigger: EventTrigger,
    content: &GameContent,
    ctx: &SimContext,
    rng: &mut impl Rng,
    events: &mut Vec<EventEnvelope>,
) {
    if let Some(outcome) = roll_malfunction(state, trigger, content, ctx, rng) {
        push_event(state, events, Event::Malfunction { outcome });
    }
}

fn distress_check(
    state: &mut GameState,
    planet: &PlanetId,
    trigger: EventTrigger,
    content: &GameContent,
    ctx: &SimContext,
    rng: &mut impl Rng,
    events: &mut Vec<EventEnvelope>,
) {
    if let Some(outcome) = roll_distress_signal(state, planet, trigger, content, ctx, rng) {
        push_event(
            state,
            events,
            Event::DistressSignal {
                planet: planet.clone(),
                outcome,
            },
        );
    }
}

fn enter_sector(
    state: &mut GameState,
    index: u8,
    content: &GameContent,
    ctx: &SimContext,
    rng: &mut impl Rng,
    events: &mut Vec<EventEnvelope>,
) -> StepResult {
    let index = clamp_difficulty(index, content);
    if index == state.sector.index && !state.sector.planets.is_empty() {
        return Err(format!("already in sector {index}"));
    }

    let planets = generate_sector(index, content, ctx, rng);
    state.sector = SectorState {
        index,
        planets,
        current_planet: None,
    };
    let name = &content.sector(index).name;
    info!(sector = index, name = %name, "entered sector");
    state.push_log(format!("Entered sector {index}: {name}."));

    invoke(HookCall::SectorEnter, state, content, ctx, rng);

    let planet_count = state.sector.planets.len();
    push_event(state, events, Event::SectorEntered { index, planet_count });
    malfunction_check(state, EventTrigger::SectorTransition, content, ctx, rng, events);
    Ok(())
}

fn warp(
    state: &mut GameState,
    planet: &PlanetId,
    content: &GameContent,
    ctx: &SimContext,
    rng: &mut impl Rng,
    events: &mut Vec<EventEnvelope>,
) -> StepResult {
    if state.sector.planet(planet).is_none() {
        return Err(format!("unknown planet {planet}"));
    }
    if state.sector.current_planet.as_ref() == Some(planet) {
        return Err(format!("already at {planet}"));
    }
    if state.is_damaged(Subsystem::Engines) {
        return Err("engines are damaged".to_string());
    }
    if !state
        .resources
        .energy
        .try_spend(content.constants.warp_energy_cost)
    {
        return Err("not enough energy to warp".to_string());
    }

    state.sector.current_planet = Some(planet.clone());
    if let Some(target) = state.sector.planet_mut(planet) {
        target.visited = true;
    }

    invoke(HookCall::Warp(planet), state, content, ctx, rng);

    push_event(
        state,
        events,
        Event::Warped {
            planet: planet.clone(),
        },
    );
    malfunction_check(state, EventTrigger::Warp, content, ctx, rng, events);
    distress_check(state, planet, EventTrigger::Warp, content, ctx, rng, events);
    Ok(())
}

fn remote_scan(
    state: &mut GameState,
    planet: &PlanetId,
    content: &GameContent,
    ctx: &SimContext,
    rng: &mut impl Rng,
    events: &mut Vec<EventEnvelope>,
) -> StepResult {
    let Some(target) = state.sector.planet(planet) else {
        return Err(format!("unknown planet {planet}"));
    };
    if target.remote_scanned {
        return Err(format!("{planet} already remote-scanned"));
    }
    let visited = target.visited;
    let cost = content.constants.scan_energy_cost;
    if state.resources.energy.current < cost {
        return Err("not enough energy to scan".to_string());
    }

    // A blocked scan costs nothing; the fee is taken once the hook lets it through.
    if let HookResult::Blocked { reason } = invoke(HookCall::Scan(planet), state, content, ctx, rng) {
        state.push_log(format!("Scan of {planet} failed: {reason}."));
        push_event(
            state,
            events,
            Event::ScanBlocked {
                planet: planet.clone(),
                reason,
            },
        );
        return Ok(());
    }
    state.resources.energy.drain(cost);

    if let Some(target) = state.sector.planet_mut(planet) {
        target.remote_scanned = true;
    }
    push_event(
        state,
        events,
        Event::RemoteScanned {
            planet: planet.clone(),
        },
    );
    // Distant planets keep their one distress check for an actual visit.
    if visited {
        distress_check(state, planet, EventTrigger::Scan, content, ctx, rng, events);
    }
    Ok(())
}

fn deep_scan(
    state: &mut GameState,
    planet: &PlanetId,
    content: &GameContent,
    ctx: &SimContext,
    rng: &mut impl Rng,
    events: &mut Vec<EventEnvelope>,
) -> StepResult {
    let Some(target) = state.sector.planet(planet) else {
        return Err(format!("unknown planet {planet}"));
    };
    if state.sector.current_planet.as_ref() != Some(planet) {
        return Err(format!("must be in orbit of {planet} to deep scan"));
    }
    if !target.remote_scanned {
        return Err(format!("{planet} has not been remote-scanned"));
    }
    if target.scanned {
        return Err(format!("{planet} already deep-scanned"));
    }
    if state.is_damaged(Subsystem::Sensors) {
        return Err("sensors are damaged".to_string());
    }
    if !state
        .resources
        .energy
        .try_spend(content.constants.deep_scan_energy_cost)
    {
        return Err("not enough energy to deep scan".to_string());
    }

    invoke(HookCall::DeepScan(planet), state, content, ctx, rng);

    if let Some(target) = state.sector.planet_mut(planet) {
        target.scanned = true;
    }
    push_event(
        state,
        events,
        Event::DeepScanned {
            planet: planet.clone(),
        },
    );
    Ok(())
}

fn probe(
    state: &mut GameState,
    planet: &PlanetId,
    content: &GameContent,
    ctx: &SimContext,
    rng: &mut impl Rng,
    events: &mut Vec<EventEnvelope>,
) -> StepResult {
    let Some(target) = state.sector.planet(planet) else {
        return Err(format!("unknown planet {planet}"));
    };
    if state.sector.current_planet.as_ref() != Some(planet) {
        return Err(format!("must be in orbit of {planet} to probe"));
    }
    if state.probe_integrity == 0 {
        return Err("no probe available".to_string());
    }
    if state.is_damaged(Subsystem::ProbeBay) {
        return Err("probe bay is damaged".to_string());
    }

    let outcome = resolve_probe(target, state.probe_integrity, state, content, rng);

    // Apply the whole outcome at once.
    state.probe_integrity -= outcome.integrity_loss.min(state.probe_integrity);
    match &outcome.reward {
        Some(Reward::Resource { resource, amount }) => {
            state.resources.gauge_mut(*resource).add(*amount);
        }
        Some(Reward::Item { item }) => state.cargo.push(item.clone()),
        Some(Reward::Lore { text }) => state.push_log(text.clone()),
        None => {}
    }
    state.push_log(outcome.message.clone());

    push_event(
        state,
        events,
        Event::ProbeResolved {
            planet: planet.clone(),
            outcome,
        },
    );
    malfunction_check(state, EventTrigger::Routine, content, ctx, rng, events);
    Ok(())
}

fn rest(
    state: &mut GameState,
    content: &GameContent,
    ctx: &SimContext,
    rng: &mut impl Rng,
    events: &mut Vec<EventEnvelope>,
) -> StepResult {
    let cost = content.constants.rest_ration_cost;
    if !state.resources.rations.try_spend(cost) {
        return Err("not enough rations to rest".to_string());
    }
    for member in state.crew.iter_mut().filter(|m| m.is_alive()) {
        member.stress = member.stress.saturating_sub(1);
    }
    state.push_log("The crew takes a watch off.");
    push_event(state, events, Event::Rested { rations_spent: cost });
    field_repair(state, content, events);
    malfunction_check(state, EventTrigger::Routine, content, ctx, rng, events);
    Ok(())
}

/// A living engineer fixes the first damaged subsystem if metals allow.
fn field_repair(state: &mut GameState, content: &GameContent, events: &mut Vec<EventEnvelope>) {
    if !state.living_crew().any(|m| m.role == CrewRole::Engineer) {
        return;
    }
    let Some(subsystem) = Subsystem::ALL
        .iter()
        .copied()
        .find(|subsystem| state.is_damaged(*subsystem))
    else {
        return;
    };
    let cost = content.constants.repair_metals_cost;
    if !state.resources.metals.try_spend(cost) {
        return;
    }
    state.systems.insert(subsystem, SubsystemStatus::Operational);
    info!(%subsystem, cost, "subsystem repaired");
    state.push_log(format!("Engineering restored the {subsystem}."));
    push_event(
        state,
        events,
        Event::SubsystemRepaired {
            subsystem,
            metals_spent: cost,
        },
    );
}

fn use_carried_item(
    state: &mut GameState,
    item: &ItemId,
    content: &GameContent,
    rng: &mut impl Rng,
    events: &mut Vec<EventEnvelope>,
) -> StepResult {
    let message =
        use_item(state, item, content, rng).ok_or_else(|| format!("{item} is not in cargo"))?;
    push_event(
        state,
        events,
        Event::ItemUsed {
            item: item.clone(),
            message,
        },
    );
    Ok(())
}
