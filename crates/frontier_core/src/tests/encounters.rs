use super::*;
use crate::encounters::{apply_event, event_chance};

#[test]
fn chance_sums_base_and_depth_then_doubles_when_amplified() {
    let content = base_content();
    let mut state = base_state(&content);
    in_sector(&mut state, 3);
    let ctx = SimContext::default();
    let catalog = &content.malfunctions;

    let plain = event_chance(catalog, EventTrigger::Routine, &state, &ctx);
    assert!((plain - 0.09).abs() < 1e-9);

    state
        .systems
        .insert(Subsystem::Shields, SubsystemStatus::Damaged);
    let amplified = event_chance(catalog, EventTrigger::Routine, &state, &ctx);
    assert!((amplified - 0.18).abs() < 1e-9);
}

#[test]
fn chance_is_clamped_to_one() {
    let mut content = base_content();
    content
        .malfunctions
        .base_chances
        .insert(EventTrigger::Warp, 0.8);
    let mut state = base_state(&content);
    state
        .systems
        .insert(Subsystem::Shields, SubsystemStatus::Damaged);
    let p = event_chance(
        &content.malfunctions,
        EventTrigger::Warp,
        &state,
        &SimContext::default(),
    );
    assert!((p - 1.0).abs() < f64::EPSILON);
}

#[test]
fn trigger_without_base_chance_never_fires() {
    let content = base_content();
    let mut state = base_state(&content);
    let ctx = SimContext::default();
    let catalog = &content.distress_signals;

    for index in [1, 3, 6] {
        in_sector(&mut state, index);
        let p = event_chance(catalog, EventTrigger::SectorTransition, &state, &ctx);
        assert!(p.abs() < f64::EPSILON, "sector {index} gave chance {p}");

        let mut rng = ScriptedRng::new(&[0.0, 0.0]);
        let picked = roll_event(catalog, EventTrigger::SectorTransition, &state, &ctx, &mut rng);
        assert!(picked.is_none(), "unlisted trigger fired in sector {index}");
    }
}

#[test]
fn gate_compares_roll_against_chance() {
    let content = base_content();
    let state = base_state(&content);
    let ctx = SimContext::default();

    let mut miss = ScriptedRng::new(&[0.5]);
    assert!(roll_event(&content.malfunctions, EventTrigger::Routine, &state, &ctx, &mut miss).is_none());

    let mut hit = ScriptedRng::new(&[0.01, 0.0]);
    let picked = roll_event(&content.malfunctions, EventTrigger::Routine, &state, &ctx, &mut hit);
    assert_eq!(picked.map(|e| e.id.as_str()), Some("coolant_leak"));
}

#[test]
fn forced_mode_always_fires_when_something_is_eligible() {
    let content = quiet_content();
    let state = base_state(&content);
    let ctx = SimContext::deterministic();
    let mut rng = make_rng();
    for trigger in [
        EventTrigger::Routine,
        EventTrigger::Warp,
        EventTrigger::SectorTransition,
        EventTrigger::Scan,
    ] {
        assert!(roll_event(&content.malfunctions, trigger, &state, &ctx, &mut rng).is_some());
    }
}

#[test]
fn no_eligible_event_yields_none_even_when_forced() {
    let content = base_content();
    let mut state = base_state(&content);
    for subsystem in [Subsystem::Reactor, Subsystem::Sensors, Subsystem::ProbeBay] {
        state.systems.insert(subsystem, SubsystemStatus::Damaged);
    }
    let picked = roll_event(
        &content.malfunctions,
        EventTrigger::Routine,
        &state,
        &SimContext::deterministic(),
        &mut make_rng(),
    );
    assert!(picked.is_none());
}

#[test]
fn eligibility_follows_event_conditions() {
    let content = base_content();
    let mut state = base_state(&content);
    // pirate_lure needs sector 2+, research_beacon needs a living scientist
    for member in &mut state.crew {
        if member.role == CrewRole::Scientist {
            member.status = CrewStatus::Dead;
        }
    }
    let ctx = SimContext::deterministic();
    let mut rng = make_rng();
    for _ in 0..50 {
        let picked = roll_event(&content.distress_signals, EventTrigger::Warp, &state, &ctx, &mut rng)
            .unwrap();
        assert_eq!(picked.id, "survivor_pod");
    }
}

#[test]
#[should_panic(expected = "empty catalog")]
fn empty_catalog_is_an_authoring_error() {
    let mut content = base_content();
    content.malfunctions.events.clear();
    let state = base_state(&content);
    let _ = roll_event(
        &content.malfunctions,
        EventTrigger::Routine,
        &state,
        &SimContext::default(),
        &mut make_rng(),
    );
}

#[test]
fn malfunction_effects_apply_exactly_once() {
    let mut content = base_content();
    content.malfunctions.events.retain(|e| e.id == "coolant_leak");
    let mut state = base_state(&content);
    let energy_before = state.resources.energy.current;

    let outcome = roll_malfunction(
        &mut state,
        EventTrigger::Warp,
        &content,
        &SimContext::deterministic(),
        &mut make_rng(),
    )
    .unwrap();
    assert_eq!(outcome.event_id, "coolant_leak");
    assert_eq!(state.resources.energy.current, energy_before - 15);
    assert!(outcome.summary.contains("-15 energy"));
    assert_eq!(state.log.len(), 1);
}

#[test]
fn distress_signal_checked_once_per_location() {
    let content = base_content();
    let mut state = base_state(&content);
    let ctx = SimContext::deterministic();
    let mut rng = make_rng();

    let first = roll_distress_signal(&mut state, &rocky_id(), EventTrigger::Warp, &content, &ctx, &mut rng);
    assert!(first.is_some());
    assert!(state.sector.planet(&rocky_id()).unwrap().distress_checked);

    let second = roll_distress_signal(&mut state, &rocky_id(), EventTrigger::Scan, &content, &ctx, &mut rng);
    assert!(second.is_none());
}

#[test]
fn distress_flag_is_set_even_when_nothing_fires() {
    let content = quiet_content();
    let mut state = base_state(&content);
    let outcome = roll_distress_signal(
        &mut state,
        &rocky_id(),
        EventTrigger::Warp,
        &content,
        &SimContext::default(),
        &mut make_rng(),
    );
    assert!(outcome.is_none());
    assert!(state.sector.planet(&rocky_id()).unwrap().distress_checked);
}

#[test]
fn distress_at_unknown_planet_is_ignored() {
    let content = base_content();
    let mut state = base_state(&content);
    let before = snapshot(&state);
    let outcome = roll_distress_signal(
        &mut state,
        &PlanetId("nowhere".to_string()),
        EventTrigger::Warp,
        &content,
        &SimContext::deterministic(),
        &mut make_rng(),
    );
    assert!(outcome.is_none());
    assert_eq!(snapshot(&state), before);
}

#[test]
fn apply_event_logs_title_and_details() {
    let content = base_content();
    let mut state = base_state(&content);
    let pod = content
        .distress_signals
        .events
        .iter()
        .find(|e| e.id == "survivor_pod")
        .unwrap();

    let outcome = apply_event(pod, &mut state, &mut make_rng());
    assert_eq!(outcome.summary, "survivor_pod happened (-5 rations; +10 metals)");
    assert_eq!(
        state.log.last().unwrap().text,
        format!("survivor pod: {}", outcome.summary)
    );
}

#[test]
fn using_a_carried_item_consumes_it() {
    let content = base_content();
    let mut state = base_state(&content);
    state.probe_integrity = 12;
    let patch = ItemId("hull_patch".to_string());
    state.cargo.push(patch.clone());

    let message = use_item(&mut state, &patch, &content, &mut make_rng()).unwrap();
    assert_eq!(state.probe_integrity, 22);
    assert!(state.cargo.is_empty());
    assert!(message.contains("Hull Patch"));

    assert!(use_item(&mut state, &patch, &content, &mut make_rng()).is_none());
}
