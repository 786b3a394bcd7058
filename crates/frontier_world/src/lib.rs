//! Content loading and expedition setup shared by the CLI and the tests.

use anyhow::{Context, Result};
use frontier_core::hazards::{invoke, HookCall};
use frontier_core::rules::is_baseline;
use frontier_core::{
    generate_sector, AtmosphereSetDef, Constants, Counters, CrewDef, CrewId, CrewMember,
    CrewStatus, EventCatalog, EventCondition, EventEffect, GameContent, GameState, Gauge,
    ItemTemplate, MetaState, PlanetType, PlanetTypeDef, PoolEntry, ResourceProfileDef, Resources,
    RuleDef, SectorDef, SectorState, SimContext, Subsystem, SubsystemStatus,
};
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::info;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Deserialize)]
struct SectorsFile {
    content_version: String,
    sectors: Vec<SectorDef>,
}

#[derive(Deserialize)]
struct PlanetTypesFile {
    planet_types: Vec<PlanetTypeDef>,
}

#[derive(Deserialize)]
struct ResourceProfilesFile {
    profiles: Vec<ResourceProfileDef>,
}

#[derive(Deserialize)]
struct AtmospheresFile {
    sets: Vec<AtmosphereSetDef>,
}

#[derive(Deserialize)]
struct PoolsFile {
    pools: BTreeMap<String, Vec<PoolEntry>>,
}

#[derive(Deserialize)]
struct RulesFile {
    rules: Vec<RuleDef>,
}

#[derive(Deserialize)]
struct ItemsFile {
    items: Vec<ItemTemplate>,
}

#[derive(Deserialize)]
struct EventsFile {
    malfunctions: EventCatalog,
    distress_signals: EventCatalog,
}

#[derive(Deserialize)]
struct CrewFile {
    crew: Vec<CrewDef>,
}

/// Validates ranges and cross-references in loaded content, panicking on any
/// authoring error.
///
/// Catches mistakes like a rule naming a pool that does not exist, a pool
/// handing out an unknown item, gaps in the sector sequence, or a catalog with
/// nothing to draw.
pub fn validate_content(content: &GameContent) {
    validate_constants(&content.constants);
    validate_planet_tables(content);
    validate_sectors(content);
    let item_ids: HashSet<&str> = content.items.iter().map(|i| i.id.0.as_str()).collect();
    validate_pools_and_rules(content, &item_ids);
    validate_catalog("malfunctions", &content.malfunctions, &item_ids);
    validate_catalog("distress_signals", &content.distress_signals, &item_ids);
    for item in &content.items {
        validate_effects(&format!("item '{}'", item.id), &item.use_effects, &item_ids);
    }
    assert!(!content.crew.is_empty(), "crew roster is empty");
}

fn validate_constants(c: &Constants) {
    assert!(
        c.probe_damage_min <= c.probe_damage_max,
        "probe damage range is inverted: {}..{}",
        c.probe_damage_min,
        c.probe_damage_max,
    );
    for (name, p) in [
        ("ruins_chance", c.ruins_chance),
        ("signals_chance", c.signals_chance),
    ] {
        assert!((0.0..=1.0).contains(&p), "constant '{name}' is not a probability: {p}");
    }
    assert!(c.map_size > 0.0, "map_size must be positive");
}

fn validate_planet_tables(content: &GameContent) {
    for planet_type in PlanetType::ALL {
        let def = content
            .planet_types
            .iter()
            .find(|def| def.planet_type == planet_type);
        let Some(def) = def else {
            panic!("planet type '{planet_type}' has no metric table");
        };
        assert!(
            def.gravity.0 <= def.gravity.1 && def.temperature.0 <= def.temperature.1,
            "planet type '{planet_type}' has an inverted metric range",
        );
    }
    for profile in &content.resource_profiles {
        assert!(
            profile.baseline.0 <= profile.baseline.1,
            "resource profile '{}' has an inverted baseline range",
            profile.resource,
        );
    }
}

fn validate_sectors(content: &GameContent) {
    assert!(!content.sectors.is_empty(), "no sectors configured");
    for (position, sector) in content.sectors.iter().enumerate() {
        assert_eq!(
            usize::from(sector.index),
            position + 1,
            "sector indexes must run 1..n without gaps (found {} at position {position})",
            sector.index,
        );
        assert!(
            sector.planet_count.0 <= sector.planet_count.1,
            "sector {} planet_count range is inverted",
            sector.index,
        );
        for (name, p) in [
            ("hazard_chance", sector.hazard_chance),
            ("anomaly_chance", sector.anomaly_chance),
        ] {
            assert!(
                (0.0..=1.0).contains(&p),
                "sector {} {name} is not a probability: {p}",
                sector.index,
            );
        }
        for bias in &sector.type_bias {
            assert!(
                bias.weight >= 0.0,
                "sector {} has a negative weight for '{}'",
                sector.index,
                bias.planet_type,
            );
        }
    }
}

fn validate_pools_and_rules(content: &GameContent, item_ids: &HashSet<&str>) {
    for (name, entries) in &content.pools {
        for entry in entries {
            let weight = match entry {
                PoolEntry::Resource {
                    resource, min, max, weight,
                } => {
                    assert!(
                        min <= max,
                        "pool '{name}' {resource} entry has an inverted range {min}..{max}",
                    );
                    *weight
                }
                PoolEntry::Item { item, weight } => {
                    assert!(
                        item_ids.contains(item.0.as_str()),
                        "pool '{name}' item '{item}' is not a known item",
                    );
                    *weight
                }
                PoolEntry::Lore { weight, .. } => *weight,
            };
            assert!(weight >= 0.0, "pool '{name}' has a negative weight: {weight}");
        }
    }

    let mut rule_ids = HashSet::new();
    for rule in &content.rules {
        assert!(
            rule_ids.insert(rule.id.as_str()),
            "rule id '{}' is duplicated",
            rule.id,
        );
        assert!(
            content.pools.contains_key(&rule.pool),
            "rule '{}' references unknown pool '{}'",
            rule.id,
            rule.pool,
        );
    }
    assert!(
        content.rules.iter().any(is_baseline),
        "no always-true baseline rule; some planets would have an empty pool",
    );
}

fn validate_catalog(name: &str, catalog: &EventCatalog, item_ids: &HashSet<&str>) {
    assert!(!catalog.events.is_empty(), "event catalog '{name}' is empty");
    for (trigger, p) in &catalog.base_chances {
        assert!(
            (0.0..=1.0).contains(p),
            "event catalog '{name}' chance for {trigger:?} is not a probability: {p}",
        );
    }
    for event in &catalog.events {
        assert!(
            event.weight >= 0.0,
            "event '{}' in '{name}' has a negative weight",
            event.id,
        );
        for condition in &event.conditions {
            if let EventCondition::CargoContains { item } = condition {
                assert!(
                    item_ids.contains(item.0.as_str()),
                    "event '{}' condition item '{item}' is not a known item",
                    event.id,
                );
            }
        }
        validate_effects(&format!("event '{}'", event.id), &event.effects, item_ids);
    }
}

fn validate_effects(owner: &str, effects: &[EventEffect], item_ids: &HashSet<&str>) {
    for effect in effects {
        if let EventEffect::GrantItem { item } = effect {
            assert!(
                item_ids.contains(item.0.as_str()),
                "{owner} grants '{item}' which is not a known item",
            );
        }
    }
}

fn read_json<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<T> {
    let raw = std::fs::read_to_string(dir.join(file)).with_context(|| format!("reading {file}"))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {file}"))
}

pub fn load_content(content_dir: &str) -> Result<GameContent> {
    let dir = Path::new(content_dir);
    let constants: Constants = read_json(dir, "constants.json")?;
    let sectors_file: SectorsFile = read_json(dir, "sectors.json")?;
    let planet_types: PlanetTypesFile = read_json(dir, "planet_types.json")?;
    let profiles: ResourceProfilesFile = read_json(dir, "resource_profiles.json")?;
    let atmospheres: AtmospheresFile = read_json(dir, "atmospheres.json")?;
    let pools: PoolsFile = read_json(dir, "pools.json")?;
    let rules: RulesFile = read_json(dir, "rules.json")?;
    let items: ItemsFile = read_json(dir, "items.json")?;
    let events: EventsFile = read_json(dir, "events.json")?;
    let crew: CrewFile = read_json(dir, "crew.json")?;

    let content = GameContent {
        content_version: sectors_file.content_version,
        constants,
        planet_types: planet_types.planet_types,
        resource_profiles: profiles.profiles,
        atmosphere_sets: atmospheres.sets,
        sectors: sectors_file.sectors,
        pools: pools.pools,
        rules: rules.rules,
        items: items.items,
        malfunctions: events.malfunctions,
        distress_signals: events.distress_signals,
        crew: crew.crew,
    };
    validate_content(&content);
    info!(
        version = %content.content_version,
        sectors = content.sectors.len(),
        rules = content.rules.len(),
        "content loaded"
    );
    Ok(content)
}

/// Fresh expedition: sector 1 generated, full crew, every subsystem online.
pub fn build_initial_state(
    content: &GameContent,
    seed: u64,
    ctx: &SimContext,
    rng: &mut impl Rng,
) -> GameState {
    let c = &content.constants;
    let crew = content
        .crew
        .iter()
        .enumerate()
        .map(|(index, def)| CrewMember {
            id: CrewId(format!("crew_{index:02}")),
            name: def.name.clone(),
            role: def.role,
            stress: 0,
            status: CrewStatus::Healthy,
            tags: def.tags.clone(),
        })
        .collect();

    let mut state = GameState {
        meta: MetaState {
            turn: 0,
            seed,
            schema_version: SCHEMA_VERSION,
            content_version: content.content_version.clone(),
        },
        sector: SectorState {
            index: 1,
            planets: generate_sector(1, content, ctx, rng),
            current_planet: None,
        },
        resources: Resources {
            energy: Gauge::new(c.starting_energy, c.energy_capacity),
            metals: Gauge::new(c.starting_metals, c.metals_capacity),
            rations: Gauge::new(c.starting_rations, c.rations_capacity),
        },
        crew,
        systems: Subsystem::ALL
            .iter()
            .map(|subsystem| (*subsystem, SubsystemStatus::Operational))
            .collect(),
        cargo: vec![],
        probe_integrity: c.starting_probe_integrity,
        log: vec![],
        counters: Counters::default(),
    };
    let sector_name = content.sector(1).name.clone();
    state.push_log(format!("Expedition launched into sector 1: {sector_name}."));
    invoke(HookCall::SectorEnter, &mut state, content, ctx, rng);
    state
}
