//! Procedural planet and sector generation.
//!
//! Generation never fails: out-of-range difficulty levels are clamped to the
//! configured sector range, and every metric is drawn inside its type's bounds.

use std::collections::BTreeSet;

use rand::Rng;
use tracing::debug;

use crate::hazards::apply_generation_hook;
use crate::rolls::{bernoulli, roll_between, roll_index, roll_int};
use crate::sampler::sample;
use crate::{
    Atmosphere, GameContent, MapPosition, Planet, PlanetId, PlanetTag, PlanetType, ResourceKind,
    SectorDef, SimContext,
};

/// Lower bound of every planetary resource value.
pub const RESOURCE_MIN: u32 = 0;
/// Upper bound of every planetary resource value.
pub const RESOURCE_MAX: u32 = 100;

/// Clamp a requested difficulty into the configured sector range.
pub fn clamp_difficulty(difficulty: u8, content: &GameContent) -> u8 {
    difficulty.clamp(1, content.max_sector())
}

/// Generate every planet for the sector at `difficulty`.
///
/// Guaranteed types are placed first, then remaining slots are filled by the
/// sector's type selection. Each planet passes through the sector's
/// planet-generate hook before being returned.
pub fn generate_sector(
    difficulty: u8,
    content: &GameContent,
    ctx: &SimContext,
    rng: &mut impl Rng,
) -> Vec<Planet> {
    let difficulty = clamp_difficulty(difficulty, content);
    let sector = content.sector(difficulty);

    let (min_count, max_count) = sector.planet_count;
    let rolled = roll_int(rng, min_count, max_count) as usize;
    let count = rolled.max(sector.guaranteed_types.len());

    let mut types: Vec<PlanetType> = sector.guaranteed_types.clone();
    while types.len() < count {
        types.push(pick_planet_type(sector, rng));
    }

    let planets: Vec<Planet> = types
        .into_iter()
        .enumerate()
        .map(|(slot, planet_type)| {
            let id = PlanetId(format!("s{difficulty}_p{slot:02}"));
            let mut planet = build_planet(id, planet_type, difficulty, sector, content, rng);
            apply_generation_hook(&mut planet, sector, content, ctx, rng);
            planet
        })
        .collect();

    debug!(sector = difficulty, planets = planets.len(), "sector generated");
    planets
}

/// Generate a single planet for the sector at `difficulty`.
pub fn generate_planet(
    id: PlanetId,
    difficulty: u8,
    content: &GameContent,
    ctx: &SimContext,
    rng: &mut impl Rng,
) -> Planet {
    let difficulty = clamp_difficulty(difficulty, content);
    let sector = content.sector(difficulty);
    let planet_type = pick_planet_type(sector, rng);
    let mut planet = build_planet(id, planet_type, difficulty, sector, content, rng);
    apply_generation_hook(&mut planet, sector, content, ctx, rng);
    planet
}

/// Type bias (weighted) wins over the allowed list (uniform), which wins over
/// the global catalog (uniform).
pub fn pick_planet_type<R: Rng + ?Sized>(sector: &SectorDef, rng: &mut R) -> PlanetType {
    if !sector.type_bias.is_empty() {
        if let Some(choice) = sample(&sector.type_bias, rng) {
            return choice.planet_type;
        }
    }
    if sector.allowed_types.is_empty() {
        PlanetType::ALL[roll_index(rng, PlanetType::ALL.len())]
    } else {
        sector.allowed_types[roll_index(rng, sector.allowed_types.len())]
    }
}

fn build_planet<R: Rng + ?Sized>(
    id: PlanetId,
    planet_type: PlanetType,
    difficulty: u8,
    sector: &SectorDef,
    content: &GameContent,
    rng: &mut R,
) -> Planet {
    let c = &content.constants;
    let metrics = content.planet_type_def(planet_type);
    let gravity = roll_between(rng, metrics.gravity);
    let temperature = roll_between(rng, metrics.temperature);

    let metals = roll_resource(ResourceKind::Metals, planet_type, content, rng);
    let energy = roll_resource(ResourceKind::Energy, planet_type, content, rng);

    let mut tags = BTreeSet::new();
    if difficulty >= c.high_risk_difficulty {
        tags.insert(PlanetTag::HighRisk);
    }
    if bernoulli(rng, c.ruins_chance) {
        tags.insert(PlanetTag::AncientRuins);
    }
    if bernoulli(rng, c.signals_chance) {
        tags.insert(PlanetTag::AlienSignals);
    }
    if bernoulli(rng, sector.anomaly_chance) {
        tags.insert(PlanetTag::Anomaly);
    }

    let atmosphere = atmosphere_for(planet_type, content, rng);

    // Danger grows one step per sector past the first, plus a small random spread.
    let danger = u32::from(difficulty.saturating_sub(1)) + roll_int(rng, 0, c.danger_roll_max);

    let position = MapPosition {
        x: roll_between(rng, (0.0, c.map_size)),
        y: roll_between(rng, (0.0, c.map_size)),
    };

    Planet {
        id,
        sector: difficulty,
        planet_type,
        gravity,
        temperature,
        atmosphere,
        true_atmosphere: None,
        tags,
        metals,
        energy,
        danger,
        remote_scanned: false,
        scanned: false,
        visited: false,
        distress_checked: false,
        position,
    }
}

/// Baseline draw plus the rich/poor modifier for the type, clamped to
/// `[RESOURCE_MIN, RESOURCE_MAX]`. Kinds without a profile yield zero.
pub fn roll_resource<R: Rng + ?Sized>(
    kind: ResourceKind,
    planet_type: PlanetType,
    content: &GameContent,
    rng: &mut R,
) -> u32 {
    let Some(profile) = content
        .resource_profiles
        .iter()
        .find(|profile| profile.resource == kind)
    else {
        return RESOURCE_MIN;
    };
    let base = i64::from(roll_int(rng, profile.baseline.0, profile.baseline.1));
    let modifier = if profile.rich.contains(&planet_type) {
        i64::from(profile.rich_modifier)
    } else if profile.poor.contains(&planet_type) {
        i64::from(profile.poor_modifier)
    } else {
        0
    };
    let clamped = (base + modifier).clamp(i64::from(RESOURCE_MIN), i64::from(RESOURCE_MAX));
    u32::try_from(clamped).unwrap_or(RESOURCE_MIN)
}

/// Curated sets decide the atmosphere; unclassified types draw uniformly.
pub fn atmosphere_for<R: Rng + ?Sized>(
    planet_type: PlanetType,
    content: &GameContent,
    rng: &mut R,
) -> Atmosphere {
    content
        .atmosphere_sets
        .iter()
        .find(|set| set.types.contains(&planet_type))
        .map_or_else(
            || Atmosphere::ALL[roll_index(rng, Atmosphere::ALL.len())],
            |set| set.atmosphere,
        )
}
