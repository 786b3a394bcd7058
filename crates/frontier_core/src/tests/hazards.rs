use super::*;
use crate::hazards::{apply_generation_hook, DERELICT_SALVAGE, ION_SCAN_SURCHARGE};

fn forced() -> SimContext {
    SimContext::deterministic()
}

#[test]
fn calm_sector_hooks_change_nothing() {
    let content = base_content();
    let mut state = base_state(&content);
    let before = snapshot(&state);
    let planet = rocky_id();
    let mut rng = make_rng();

    for call in [
        HookCall::SectorEnter,
        HookCall::Warp(&planet),
        HookCall::Scan(&planet),
        HookCall::DeepScan(&planet),
    ] {
        assert_eq!(
            invoke(call, &mut state, &content, &forced(), &mut rng),
            HookResult::Continue
        );
    }
    assert_eq!(snapshot(&state), before);
}

#[test]
fn every_theme_accepts_all_five_triggers() {
    let content = base_content();
    let ctx = SimContext::default();
    let planet = rocky_id();
    let calls = [
        HookCall::SectorEnter,
        HookCall::Warp(&planet),
        HookCall::Scan(&planet),
        HookCall::DeepScan(&planet),
    ];
    let mut triggers: std::collections::HashSet<HazardTrigger> =
        calls.iter().map(HookCall::trigger).collect();
    triggers.insert(HazardTrigger::PlanetGenerate);
    assert_eq!(triggers.len(), 5);

    for sector in &content.sectors {
        let mut state = base_state(&content);
        in_sector(&mut state, sector.index);
        state.sector.planets[0].visited = true;
        let mut rng = make_rng();

        let mut fresh = rocky_planet();
        apply_generation_hook(&mut fresh, sector, &content, &ctx, &mut rng);
        for call in calls {
            invoke(call, &mut state, &content, &ctx, &mut rng);
        }
        assert!(state.sector.planet(&planet).is_some(), "{:?}", sector.hazard_theme);
    }
}

#[test]
fn signal_fog_corrupts_then_deep_scan_restores() {
    let mut content = quiet_content();
    content.sectors[2].hazard_chance = 1.0;
    let mut state = base_state(&content);
    in_sector(&mut state, 3);
    let ctx = SimContext::default();
    let mut rng = make_rng();

    step(&mut state, &Action::RemoteScan { planet: rocky_id() }, &content, &ctx, &mut rng);
    let scanned = state.sector.planet(&rocky_id()).unwrap();
    assert!(scanned.remote_scanned);
    assert_eq!(scanned.true_atmosphere, Some(Atmosphere::Thin));
    assert_ne!(scanned.atmosphere, Atmosphere::Thin);

    step(&mut state, &Action::Warp { planet: rocky_id() }, &content, &ctx, &mut rng);
    let events = step(&mut state, &Action::DeepScan { planet: rocky_id() }, &content, &ctx, &mut rng);
    assert!(rejection(&events).is_none(), "deep scan rejected: {events:?}");

    let restored = state.sector.planet(&rocky_id()).unwrap();
    assert!(restored.scanned);
    assert_eq!(restored.atmosphere, Atmosphere::Thin);
    assert_eq!(restored.true_atmosphere, None);
}

#[test]
fn signal_fog_never_stacks_a_second_decoy() {
    let content = base_content();
    let mut state = base_state(&content);
    in_sector(&mut state, 3);
    let planet = rocky_id();
    let mut rng = make_rng();

    invoke(HookCall::Scan(&planet), &mut state, &content, &forced(), &mut rng);
    invoke(HookCall::Scan(&planet), &mut state, &content, &forced(), &mut rng);
    assert_eq!(
        state.sector.planet(&planet).unwrap().true_atmosphere,
        Some(Atmosphere::Thin)
    );
}

#[test]
fn ion_storm_blocks_scans_with_damaged_sensors() {
    let content = quiet_content();
    let mut state = base_state(&content);
    in_sector(&mut state, 2);
    state
        .systems
        .insert(Subsystem::Sensors, SubsystemStatus::Damaged);
    let energy_before = state.resources.energy.current;

    let events = step(
        &mut state,
        &Action::RemoteScan { planet: rocky_id() },
        &content,
        &SimContext::default(),
        &mut make_rng(),
    );
    assert!(events
        .iter()
        .any(|envelope| matches!(envelope.event, Event::ScanBlocked { .. })));
    assert!(!state.sector.planet(&rocky_id()).unwrap().remote_scanned);
    assert_eq!(state.resources.energy.current, energy_before);
}

#[test]
fn ion_storm_scan_without_surcharge_energy_is_blocked_for_free() {
    let content = quiet_content();
    let mut state = base_state(&content);
    in_sector(&mut state, 2);
    let short = content.constants.scan_energy_cost + ION_SCAN_SURCHARGE - 1;
    state.resources.energy.current = short;

    let events = step(
        &mut state,
        &Action::RemoteScan { planet: rocky_id() },
        &content,
        &SimContext::default(),
        &mut make_rng(),
    );
    assert!(rejection(&events).is_none());
    assert!(events.iter().any(|envelope| matches!(
        &envelope.event,
        Event::ScanBlocked { reason, .. } if reason.contains("ion static")
    )));
    assert!(!state.sector.planet(&rocky_id()).unwrap().remote_scanned);
    assert_eq!(state.resources.energy.current, short);
}

#[test]
fn ion_storm_charges_scan_surcharge() {
    let content = quiet_content();
    let mut state = base_state(&content);
    in_sector(&mut state, 2);
    let energy_before = state.resources.energy.current;

    step(
        &mut state,
        &Action::RemoteScan { planet: rocky_id() },
        &content,
        &SimContext::default(),
        &mut make_rng(),
    );
    assert!(state.sector.planet(&rocky_id()).unwrap().remote_scanned);
    assert_eq!(
        state.resources.energy.current,
        energy_before - content.constants.scan_energy_cost - ION_SCAN_SURCHARGE
    );
}

#[test]
fn ion_storm_warp_discharge_damages_sensors() {
    let content = base_content();
    let mut state = base_state(&content);
    in_sector(&mut state, 2);
    let planet = rocky_id();

    invoke(HookCall::Warp(&planet), &mut state, &content, &forced(), &mut make_rng());
    assert!(state.is_damaged(Subsystem::Sensors));
}

#[test]
fn derelict_field_injects_a_salvageable_wreck() {
    let content = base_content();
    let mut state = base_state(&content);
    in_sector(&mut state, 5);
    let planets_before = state.sector.planets.len();
    let mut rng = make_rng();

    invoke(HookCall::SectorEnter, &mut state, &content, &forced(), &mut rng);
    assert_eq!(state.sector.planets.len(), planets_before + 1);
    let wreck = state.sector.planets.last().unwrap().clone();
    assert_eq!(wreck.id.0, "s5_derelict_00");
    assert!(wreck.has_tag(PlanetTag::Derelict));
    assert_eq!(state.counters.next_derelict_id, 1);

    let metals_before = state.resources.metals.current;
    invoke(HookCall::DeepScan(&wreck.id), &mut state, &content, &forced(), &mut rng);
    assert_eq!(state.resources.metals.current, metals_before + DERELICT_SALVAGE);

    state.sector.planet_mut(&wreck.id).unwrap().scanned = true;
    invoke(HookCall::DeepScan(&wreck.id), &mut state, &content, &forced(), &mut rng);
    assert_eq!(state.resources.metals.current, metals_before + DERELICT_SALVAGE);
}

#[test]
fn deep_void_entry_stresses_every_living_crew_member() {
    let content = base_content();
    let mut state = base_state(&content);
    in_sector(&mut state, 6);
    state.crew[0].status = CrewStatus::Dead;

    invoke(HookCall::SectorEnter, &mut state, &content, &forced(), &mut make_rng());
    assert_eq!(state.crew[0].stress, 0);
    assert!(state.crew[1..].iter().all(|member| member.stress == 1));
}

#[test]
fn deep_void_warp_on_empty_rations_stresses_someone() {
    let content = base_content();
    let mut state = base_state(&content);
    in_sector(&mut state, 6);
    state.resources.rations.current = 0;
    let planet = rocky_id();

    invoke(HookCall::Warp(&planet), &mut state, &content, &forced(), &mut make_rng());
    let total: u32 = state.crew.iter().map(|m| u32::from(m.stress)).sum();
    assert_eq!(total, 1);
}

#[test]
fn gravity_shear_raises_danger_on_heavy_worlds() {
    let content = base_content();
    let sector = content.sector(4);
    let (_, high) = content.planet_type_def(PlanetType::Rocky).gravity;

    let mut heavy = rocky_planet();
    heavy.gravity = high;
    apply_generation_hook(&mut heavy, sector, &content, &forced(), &mut make_rng());
    assert_eq!(heavy.danger, 1);

    let mut light = rocky_planet();
    light.gravity = 0.7;
    apply_generation_hook(&mut light, sector, &content, &forced(), &mut make_rng());
    assert_eq!(light.danger, 0);
}

#[test]
fn deep_void_generation_plants_alien_signals() {
    let content = base_content();
    let mut planet = rocky_planet();
    apply_generation_hook(
        &mut planet,
        content.sector(6),
        &content,
        &forced(),
        &mut make_rng(),
    );
    assert!(planet.has_tag(PlanetTag::AlienSignals));
}
