//! Sector hazard hooks.
//!
//! Each sector descriptor names a `HazardTheme`; the theme resolves to a
//! strategy object implementing `SectorHazard`. Every hook has a no-op default,
//! so a theme only overrides the triggers it cares about. Themes share no
//! behavior with each other.

use rand::RngCore;
use tracing::debug;

use crate::encounters::pick_living_crew;
use crate::rolls::{chance, roll_index};
use crate::worldgen::generate_planet;
use crate::{
    Atmosphere, GameContent, GameState, HazardTheme, HazardTrigger, Planet, PlanetId, PlanetTag,
    SectorDef, SimContext, Subsystem, SubsystemStatus,
};

/// Extra energy an ion-storm sector charges for a remote scan.
pub const ION_SCAN_SURCHARGE: u32 = 5;
const SHEAR_DANGER: u32 = 1;
/// Metals recovered by the first deep scan of a derelict.
pub const DERELICT_SALVAGE: u32 = 12;
const DERELICT_DANGER: u32 = 2;
const VOID_RATION_DRAIN: u32 = 1;

/// What the caller should do after a hook ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookResult {
    Continue,
    /// The triggering action does not take effect.
    Blocked { reason: String },
}

/// Everything a hook may read besides the mutable world state.
pub struct HookContext<'a> {
    pub content: &'a GameContent,
    pub sector: &'a SectorDef,
    pub sim: &'a SimContext,
}

pub trait SectorHazard: Sync {
    fn on_sector_enter(&self, _hc: &HookContext<'_>, _state: &mut GameState, _rng: &mut dyn RngCore) {}

    fn on_warp(
        &self,
        _hc: &HookContext<'_>,
        _state: &mut GameState,
        _planet: &PlanetId,
        _rng: &mut dyn RngCore,
    ) {
    }

    fn on_scan(
        &self,
        _hc: &HookContext<'_>,
        _state: &mut GameState,
        _planet: &PlanetId,
        _rng: &mut dyn RngCore,
    ) -> HookResult {
        HookResult::Continue
    }

    fn on_deep_scan(
        &self,
        _hc: &HookContext<'_>,
        _state: &mut GameState,
        _planet: &PlanetId,
        _rng: &mut dyn RngCore,
    ) {
    }

    fn on_planet_generate(&self, _hc: &HookContext<'_>, _planet: &mut Planet, _rng: &mut dyn RngCore) {}
}

/// A hook invocation against the live world state.
///
/// Planet generation is not listed: the planet is not part of the sector yet,
/// so that trigger runs through `apply_generation_hook` instead.
#[derive(Debug, Clone, Copy)]
pub enum HookCall<'a> {
    SectorEnter,
    Warp(&'a PlanetId),
    Scan(&'a PlanetId),
    DeepScan(&'a PlanetId),
}

impl HookCall<'_> {
    pub fn trigger(&self) -> HazardTrigger {
        match self {
            HookCall::SectorEnter => HazardTrigger::SectorEnter,
            HookCall::Warp(_) => HazardTrigger::Warp,
            HookCall::Scan(_) => HazardTrigger::Scan,
            HookCall::DeepScan(_) => HazardTrigger::DeepScan,
        }
    }
}

pub fn hazard_for(theme: HazardTheme) -> &'static dyn SectorHazard {
    match theme {
        HazardTheme::Calm => &CalmReach,
        HazardTheme::IonStorm => &IonStorm,
        HazardTheme::SignalFog => &SignalFog,
        HazardTheme::GravityShear => &GravityShear,
        HazardTheme::DerelictField => &DerelictField,
        HazardTheme::DeepVoid => &DeepVoid,
    }
}

/// Run the current sector's hook for `call`. Missing hooks are no-ops.
pub fn invoke(
    call: HookCall<'_>,
    state: &mut GameState,
    content: &GameContent,
    ctx: &SimContext,
    rng: &mut dyn RngCore,
) -> HookResult {
    let sector = content.sector(state.sector.index);
    let hazard = hazard_for(sector.hazard_theme);
    let hc = HookContext {
        content,
        sector,
        sim: ctx,
    };
    debug!(trigger = ?call.trigger(), theme = ?sector.hazard_theme, "hazard hook");
    match call {
        HookCall::SectorEnter => {
            hazard.on_sector_enter(&hc, state, rng);
            HookResult::Continue
        }
        HookCall::Warp(planet) => {
            hazard.on_warp(&hc, state, planet, rng);
            HookResult::Continue
        }
        HookCall::Scan(planet) => hazard.on_scan(&hc, state, planet, rng),
        HookCall::DeepScan(planet) => {
            hazard.on_deep_scan(&hc, state, planet, rng);
            HookResult::Continue
        }
    }
}

/// Run the planet-generate hook of `sector` on a freshly built planet.
pub fn apply_generation_hook(
    planet: &mut Planet,
    sector: &SectorDef,
    content: &GameContent,
    ctx: &SimContext,
    rng: &mut dyn RngCore,
) {
    let hc = HookContext {
        content,
        sector,
        sim: ctx,
    };
    debug!(
        trigger = ?HazardTrigger::PlanetGenerate,
        theme = ?sector.hazard_theme,
        planet = %planet.id,
        "hazard hook"
    );
    hazard_for(sector.hazard_theme).on_planet_generate(&hc, planet, rng);
}

// ---------------------------------------------------------------------------
// Themes
// ---------------------------------------------------------------------------

/// Quiet starting sector.
pub struct CalmReach;

impl SectorHazard for CalmReach {}

/// Warp discharges knock out sensors; scans cost extra energy.
pub struct IonStorm;

impl SectorHazard for IonStorm {
    fn on_warp(
        &self,
        hc: &HookContext<'_>,
        state: &mut GameState,
        _planet: &PlanetId,
        rng: &mut dyn RngCore,
    ) {
        if chance(rng, hc.sector.hazard_chance, hc.sim) {
            state
                .systems
                .insert(Subsystem::Sensors, SubsystemStatus::Damaged);
            state.push_log("Ion discharge arcs through the hull; the sensor array goes dark.");
        }
    }

    /// The scan's own fee is charged after this hook, so the surcharge is
    /// only taken when both fit in the tank.
    fn on_scan(
        &self,
        hc: &HookContext<'_>,
        state: &mut GameState,
        _planet: &PlanetId,
        _rng: &mut dyn RngCore,
    ) -> HookResult {
        if state.is_damaged(Subsystem::Sensors) {
            return HookResult::Blocked {
                reason: "sensor array offline in the ion storm".to_string(),
            };
        }
        let needed = hc.content.constants.scan_energy_cost + ION_SCAN_SURCHARGE;
        if state.resources.energy.current < needed {
            return HookResult::Blocked {
                reason: "not enough energy to punch through the ion static".to_string(),
            };
        }
        state.resources.energy.drain(ION_SCAN_SURCHARGE);
        state.push_log(format!(
            "Boosted the scan through the static (-{ION_SCAN_SURCHARGE} energy)."
        ));
        HookResult::Continue
    }
}

/// Remote scans may report a decoy atmosphere; a deep scan restores the truth.
pub struct SignalFog;

impl SectorHazard for SignalFog {
    fn on_scan(
        &self,
        hc: &HookContext<'_>,
        state: &mut GameState,
        planet: &PlanetId,
        rng: &mut dyn RngCore,
    ) -> HookResult {
        let Some(target) = state.sector.planet_mut(planet) else {
            return HookResult::Continue;
        };
        if target.true_atmosphere.is_some() || !chance(rng, hc.sector.hazard_chance, hc.sim) {
            return HookResult::Continue;
        }
        let truth = target.atmosphere;
        target.true_atmosphere = Some(truth);
        target.atmosphere = decoy_atmosphere(truth, rng);
        state.push_log(format!("Sensor ghosts distort the readings from {planet}."));
        HookResult::Continue
    }

    fn on_deep_scan(
        &self,
        _hc: &HookContext<'_>,
        state: &mut GameState,
        planet: &PlanetId,
        _rng: &mut dyn RngCore,
    ) {
        let Some(target) = state.sector.planet_mut(planet) else {
            return;
        };
        if let Some(truth) = target.true_atmosphere.take() {
            target.atmosphere = truth;
            state.push_log(format!(
                "Deep scan cuts through the fog: {planet} atmosphere is {truth}."
            ));
        }
    }
}

fn decoy_atmosphere(truth: Atmosphere, rng: &mut dyn RngCore) -> Atmosphere {
    let others: Vec<Atmosphere> = Atmosphere::ALL
        .iter()
        .copied()
        .filter(|atmosphere| *atmosphere != truth)
        .collect();
    others[roll_index(rng, others.len())]
}

/// Heavy worlds are more dangerous; warps strain the crew.
pub struct GravityShear;

impl SectorHazard for GravityShear {
    fn on_warp(
        &self,
        hc: &HookContext<'_>,
        state: &mut GameState,
        _planet: &PlanetId,
        rng: &mut dyn RngCore,
    ) {
        if !chance(rng, hc.sector.hazard_chance, hc.sim) {
            return;
        }
        if let Some(index) = pick_living_crew(state, rng) {
            let member = &mut state.crew[index];
            member.add_stress(1);
            let name = member.name.clone();
            state.push_log(format!("Tidal shear rattles the hull; {name} is shaken."));
        }
    }

    fn on_planet_generate(&self, hc: &HookContext<'_>, planet: &mut Planet, _rng: &mut dyn RngCore) {
        let (low, high) = hc.content.planet_type_def(planet.planet_type).gravity;
        if planet.gravity > (low + high) / 2.0 {
            planet.danger += SHEAR_DANGER;
        }
    }
}

/// Wrecks drift into the sector; deep scans recover salvage from them.
pub struct DerelictField;

impl SectorHazard for DerelictField {
    fn on_sector_enter(&self, hc: &HookContext<'_>, state: &mut GameState, mut rng: &mut dyn RngCore) {
        if !chance(rng, hc.sector.hazard_chance, hc.sim) {
            return;
        }
        let id = PlanetId(format!(
            "s{}_derelict_{:02}",
            hc.sector.index, state.counters.next_derelict_id
        ));
        state.counters.next_derelict_id += 1;
        let mut derelict = generate_planet(id.clone(), hc.sector.index, hc.content, hc.sim, &mut rng);
        derelict.tags.insert(PlanetTag::Derelict);
        derelict.danger += DERELICT_DANGER;
        state.sector.planets.push(derelict);
        state.push_log(format!("A derelict hulk drifts into sensor range: {id}."));
    }

    fn on_deep_scan(
        &self,
        _hc: &HookContext<'_>,
        state: &mut GameState,
        planet: &PlanetId,
        _rng: &mut dyn RngCore,
    ) {
        let salvageable = state
            .sector
            .planet(planet)
            .is_some_and(|p| p.has_tag(PlanetTag::Derelict) && !p.scanned);
        if salvageable {
            let gained = state.resources.metals.add(DERELICT_SALVAGE);
            state.push_log(format!("Salvage drones strip the derelict (+{gained} metals)."));
        }
    }
}

/// The final sector: isolation wears the crew down.
pub struct DeepVoid;

impl SectorHazard for DeepVoid {
    fn on_sector_enter(&self, _hc: &HookContext<'_>, state: &mut GameState, _rng: &mut dyn RngCore) {
        for member in state.crew.iter_mut().filter(|m| m.is_alive()) {
            member.add_stress(1);
        }
        state.push_log("Starlight thins to nothing. The crew grows quiet.");
    }

    fn on_warp(
        &self,
        _hc: &HookContext<'_>,
        state: &mut GameState,
        _planet: &PlanetId,
        rng: &mut dyn RngCore,
    ) {
        let drained = state.resources.rations.drain(VOID_RATION_DRAIN);
        if drained < VOID_RATION_DRAIN {
            if let Some(index) = pick_living_crew(state, rng) {
                state.crew[index].add_stress(1);
                let name = state.crew[index].name.clone();
                state.push_log(format!("Empty ration lockers; {name} is on edge."));
            }
        }
    }

    fn on_planet_generate(&self, hc: &HookContext<'_>, planet: &mut Planet, rng: &mut dyn RngCore) {
        if chance(rng, hc.sector.hazard_chance, hc.sim) {
            planet.tags.insert(PlanetTag::AlienSignals);
        }
    }
}
