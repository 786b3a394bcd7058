//! Random event selection: ship malfunctions and distress signals.
//!
//! Both catalogs run through the same pipeline: a trigger-scoped chance, one
//! Bernoulli gate, eligibility filtering, then a weighted draw. Effects are
//! declarative and interpreted by `apply_effects`.

use rand::Rng;
use tracing::{debug, trace};

use crate::rolls::{roll_index, roll_unit};
use crate::sampler::sample;
use crate::{
    CrewScope, CrewStatus, EventCatalog, EventCondition, EventDef, EventEffect, EventOutcome,
    EventTrigger, GameContent, GameState, ItemId, PlanetId, SimContext, SubsystemStatus,
};

/// Final fire chance for `trigger`, clamped to `[0, 1]`.
///
/// Additive terms (base, depth) are summed first, the damaged-subsystem
/// multiplier is applied to the sum, and the result is clamped last. A trigger
/// with no base chance in the catalog stays at zero at any depth.
pub fn event_chance(
    catalog: &EventCatalog,
    trigger: EventTrigger,
    state: &GameState,
    ctx: &SimContext,
) -> f64 {
    if ctx.force_deterministic {
        return 1.0;
    }
    let Some(&base) = catalog.base_chances.get(&trigger) else {
        return 0.0;
    };
    let depth = f64::from(state.sector.index.saturating_sub(1)) * catalog.depth_bonus_per_sector;
    let mut chance = base + depth;
    if catalog
        .amplified_by
        .is_some_and(|subsystem| state.is_damaged(subsystem))
    {
        chance *= 2.0;
    }
    chance.clamp(0.0, 1.0)
}

pub fn condition_holds(condition: &EventCondition, state: &GameState) -> bool {
    match condition {
        EventCondition::SubsystemOperational { subsystem } => {
            state.subsystem_status(*subsystem) == SubsystemStatus::Operational
        }
        EventCondition::SubsystemDamaged { subsystem } => state.is_damaged(*subsystem),
        EventCondition::ResourceAtLeast { resource, amount } => {
            state.resources.gauge(*resource).current >= *amount
        }
        EventCondition::CrewRole { role } => state.living_crew().any(|m| m.role == *role),
        EventCondition::LivingCrewAtLeast { count } => state.living_crew().count() >= *count,
        EventCondition::CargoContains { item } => state.cargo.contains(item),
        EventCondition::SectorAtLeast { index } => state.sector.index >= *index,
    }
}

pub fn is_eligible(event: &EventDef, state: &GameState) -> bool {
    event
        .conditions
        .iter()
        .all(|condition| condition_holds(condition, state))
}

/// Gate, filter and draw from `catalog`. Does not apply effects.
///
/// Panics on an empty catalog; that is a content authoring error.
pub fn roll_event<'a, R: Rng + ?Sized>(
    catalog: &'a EventCatalog,
    trigger: EventTrigger,
    state: &GameState,
    ctx: &SimContext,
    rng: &mut R,
) -> Option<&'a EventDef> {
    assert!(
        !catalog.events.is_empty(),
        "event roll attempted against an empty catalog"
    );
    let probability = event_chance(catalog, trigger, state, ctx);
    let fired = if ctx.force_deterministic {
        true
    } else {
        let rolled = roll_unit(rng);
        trace!(?trigger, probability, rolled, "event gate");
        rolled < probability
    };
    if !fired {
        return None;
    }
    let eligible: Vec<&EventDef> = catalog
        .events
        .iter()
        .filter(|event| is_eligible(event, state))
        .collect();
    let picked = sample(&eligible, rng).copied();
    debug!(?trigger, eligible = eligible.len(), picked = ?picked.map(|e| &e.id), "event drawn");
    picked
}

/// Roll the ship-malfunction catalog and apply the drawn event.
pub fn roll_malfunction<R: Rng + ?Sized>(
    state: &mut GameState,
    trigger: EventTrigger,
    content: &GameContent,
    ctx: &SimContext,
    rng: &mut R,
) -> Option<EventOutcome> {
    let event = roll_event(&content.malfunctions, trigger, state, ctx, rng)?;
    Some(apply_event(event, state, rng))
}

/// Roll the distress-signal catalog at `planet`, at most once per location.
///
/// The location's checked flag is set before any effect runs, whether or not
/// an event fires. Unknown planets and already-checked planets yield `None`.
pub fn roll_distress_signal<R: Rng + ?Sized>(
    state: &mut GameState,
    planet: &PlanetId,
    trigger: EventTrigger,
    content: &GameContent,
    ctx: &SimContext,
    rng: &mut R,
) -> Option<EventOutcome> {
    let location = state.sector.planet_mut(planet)?;
    if location.distress_checked {
        return None;
    }
    location.distress_checked = true;
    let event = roll_event(&content.distress_signals, trigger, state, ctx, rng)?;
    Some(apply_event(event, state, rng))
}

/// Apply an event's effects once and build its outcome.
pub fn apply_event<R: Rng + ?Sized>(
    event: &EventDef,
    state: &mut GameState,
    rng: &mut R,
) -> EventOutcome {
    let details = apply_effects(&event.effects, state, rng);
    let summary = if details.is_empty() {
        event.summary.clone()
    } else {
        format!("{} ({})", event.summary, details.join("; "))
    };
    state.push_log(format!("{}: {summary}", event.title));
    EventOutcome {
        event_id: event.id.clone(),
        title: event.title.clone(),
        summary,
    }
}

/// Apply each effect in order; returns one short note per effect that changed something.
pub fn apply_effects<R: Rng + ?Sized>(
    effects: &[EventEffect],
    state: &mut GameState,
    rng: &mut R,
) -> Vec<String> {
    effects
        .iter()
        .filter_map(|effect| apply_effect(effect, state, rng))
        .collect()
}

fn apply_effect<R: Rng + ?Sized>(
    effect: &EventEffect,
    state: &mut GameState,
    rng: &mut R,
) -> Option<String> {
    match effect {
        EventEffect::DamageSubsystem { subsystem } => {
            let previous = state.systems.insert(*subsystem, SubsystemStatus::Damaged);
            (previous != Some(SubsystemStatus::Damaged)).then(|| format!("{subsystem} damaged"))
        }
        EventEffect::RepairSubsystem { subsystem } => {
            let previous = state
                .systems
                .insert(*subsystem, SubsystemStatus::Operational);
            (previous == Some(SubsystemStatus::Damaged)).then(|| format!("{subsystem} repaired"))
        }
        EventEffect::AdjustResource { resource, amount } => {
            let gauge = state.resources.gauge_mut(*resource);
            let magnitude = amount.unsigned_abs();
            if *amount >= 0 {
                let gained = gauge.add(magnitude);
                (gained > 0).then(|| format!("+{gained} {resource}"))
            } else {
                let lost = gauge.drain(magnitude);
                (lost > 0).then(|| format!("-{lost} {resource}"))
            }
        }
        EventEffect::CrewStress { amount, scope } => match scope {
            CrewScope::All => {
                let mut touched = 0;
                for member in state.crew.iter_mut().filter(|m| m.is_alive()) {
                    member.add_stress(*amount);
                    touched += 1;
                }
                (touched > 0).then(|| format!("crew stress +{amount}"))
            }
            CrewScope::One => {
                let index = pick_living_crew(state, rng)?;
                let member = &mut state.crew[index];
                member.add_stress(*amount);
                Some(format!("{} stress +{amount}", member.name))
            }
        },
        EventEffect::InjureCrew => {
            let healthy: Vec<usize> = state
                .crew
                .iter()
                .enumerate()
                .filter(|(_, m)| m.status == CrewStatus::Healthy)
                .map(|(index, _)| index)
                .collect();
            if healthy.is_empty() {
                return None;
            }
            let member = &mut state.crew[healthy[roll_index(rng, healthy.len())]];
            member.status = CrewStatus::Injured;
            Some(format!("{} injured", member.name))
        }
        EventEffect::GrantItem { item } => {
            state.cargo.push(item.clone());
            Some(format!("recovered {item}"))
        }
        EventEffect::DamageProbe { amount } => {
            let before = state.probe_integrity;
            state.probe_integrity = before.saturating_sub(*amount);
            let lost = before - state.probe_integrity;
            (lost > 0).then(|| format!("probe integrity -{lost}"))
        }
        EventEffect::RepairProbe { amount } => {
            state.probe_integrity = state.probe_integrity.saturating_add(*amount);
            Some(format!("probe integrity +{amount}"))
        }
    }
}

/// Uniformly pick a living crew member, returning their index in `state.crew`.
pub(crate) fn pick_living_crew<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Option<usize> {
    let living = state.living_crew_indices();
    if living.is_empty() {
        return None;
    }
    Some(living[roll_index(rng, living.len())])
}

/// Use one carried item: remove it from cargo and apply its effects.
///
/// Returns `None` if the item is not carried or has no template.
pub fn use_item<R: Rng + ?Sized>(
    state: &mut GameState,
    item: &ItemId,
    content: &GameContent,
    rng: &mut R,
) -> Option<String> {
    let template = content.item(item)?;
    let slot = state.cargo.iter().position(|carried| carried == item)?;
    state.cargo.remove(slot);
    let notes = apply_effects(&template.use_effects, state, rng);
    let message = if notes.is_empty() {
        format!("Used {}.", template.name)
    } else {
        format!("Used {}: {}.", template.name, notes.join("; "))
    };
    state.push_log(message.clone());
    Some(message)
}
