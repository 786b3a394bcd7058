//! Shared test fixtures for frontier_core and downstream crates.
//!
//! `base_content()` mirrors the shape of the shipped JSON content with small,
//! readable numbers. `ScriptedRng` replays chosen unit rolls so a test can pin
//! an individual damage roll or pool draw.

use crate::{
    Atmosphere, AtmosphereSetDef, Constants, Counters, CrewDef, CrewId, CrewMember, CrewRole,
    CrewScope, CrewStatus, EventCatalog, EventCondition, EventDef, EventEffect, EventTrigger,
    GameContent, GameState, Gauge, HazardTheme, ItemId, ItemTemplate, MapPosition, MetaState,
    Planet, PlanetId, PlanetType, PlanetTypeDef, PoolEntry, Resources, ResourceKind,
    ResourceProfileDef, RuleCondition, RuleDef, SectorDef, SectorState, Subsystem,
    SubsystemStatus, TypeWeight,
};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::{BTreeMap, BTreeSet};

/// Deterministic RNG seeded with 42.
pub fn make_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

/// Replays the given unit values as `rng.gen::<f64>()` results, then falls
/// back to a seeded ChaCha stream.
pub struct ScriptedRng {
    rolls: Vec<f64>,
    cursor: usize,
    fallback: ChaCha8Rng,
}

impl ScriptedRng {
    pub fn new(rolls: &[f64]) -> Self {
        Self {
            rolls: rolls.to_vec(),
            cursor: 0,
            fallback: make_rng(),
        }
    }

    /// Number of scripted rolls not yet consumed.
    pub fn remaining(&self) -> usize {
        self.rolls.len() - self.cursor
    }
}

/// Inverse of rand's `Standard` f64 sampling: the top 53 bits carry the fraction.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn unit_to_bits(unit: f64) -> u64 {
    let scale = (1u64 << 53) as f64;
    let clamped = unit.clamp(0.0, 1.0 - f64::EPSILON);
    ((clamped * scale) as u64) << 11
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        if let Some(&unit) = self.rolls.get(self.cursor) {
            self.cursor += 1;
            unit_to_bits(unit)
        } else {
            self.fallback.next_u64()
        }
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.fallback.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

fn metrics(planet_type: PlanetType, gravity: (f64, f64), temperature: (f64, f64)) -> PlanetTypeDef {
    PlanetTypeDef {
        planet_type,
        gravity,
        temperature,
    }
}

fn sector(
    index: u8,
    theme: HazardTheme,
    planet_count: (u32, u32),
    hazard_chance: f64,
) -> SectorDef {
    SectorDef {
        index,
        name: format!("Sector {index}"),
        allowed_types: vec![],
        type_bias: vec![],
        guaranteed_types: vec![],
        planet_count,
        hazard_chance,
        anomaly_chance: 0.05,
        hazard_theme: theme,
    }
}

fn rule(id: &str, condition: RuleCondition, pool: &str) -> RuleDef {
    RuleDef {
        id: id.to_string(),
        condition,
        pool: pool.to_string(),
        label: id.trim_start_matches("rule_").replace('_', " "),
    }
}

fn resource(resource: ResourceKind, min: u32, max: u32, weight: f64) -> PoolEntry {
    PoolEntry::Resource {
        resource,
        min,
        max,
        weight,
    }
}

fn item_entry(item: &str, weight: f64) -> PoolEntry {
    PoolEntry::Item {
        item: ItemId(item.to_string()),
        weight,
    }
}

fn lore(text: &str, weight: f64) -> PoolEntry {
    PoolEntry::Lore {
        text: text.to_string(),
        weight,
    }
}

fn event(
    id: &str,
    weight: f64,
    conditions: Vec<EventCondition>,
    effects: Vec<EventEffect>,
) -> EventDef {
    EventDef {
        id: id.to_string(),
        title: id.replace('_', " "),
        weight,
        conditions,
        effects,
        summary: format!("{id} happened"),
    }
}

/// Full-featured content: six sectors (one per hazard theme), a baseline rule
/// plus tag/type/atmosphere rules, both event catalogs.
#[allow(clippy::too_many_lines)]
pub fn base_content() -> GameContent {
    let mut sector_two = sector(2, HazardTheme::IonStorm, (4, 6), 0.3);
    sector_two.allowed_types = vec![
        PlanetType::Rocky,
        PlanetType::Barren,
        PlanetType::Ice,
        PlanetType::Volcanic,
        PlanetType::GasGiant,
    ];
    let mut sector_one = sector(1, HazardTheme::Calm, (4, 6), 0.0);
    sector_one.allowed_types = vec![
        PlanetType::Rocky,
        PlanetType::Barren,
        PlanetType::Desert,
        PlanetType::Ocean,
    ];
    let mut sector_four = sector(4, HazardTheme::GravityShear, (5, 7), 0.3);
    sector_four.type_bias = vec![
        TypeWeight {
            planet_type: PlanetType::GasGiant,
            weight: 3.0,
        },
        TypeWeight {
            planet_type: PlanetType::Metallic,
            weight: 2.0,
        },
        TypeWeight {
            planet_type: PlanetType::Rocky,
            weight: 1.0,
        },
    ];
    let mut sector_five = sector(5, HazardTheme::DerelictField, (5, 8), 0.6);
    sector_five.guaranteed_types = vec![PlanetType::Metallic];

    GameContent {
        content_version: "test".to_string(),
        constants: Constants {
            probe_damage_min: 5,
            probe_damage_max: 15,
            danger_threshold: 3,
            danger_damage_bonus: 5,
            high_hazard_types: vec![
                PlanetType::Volcanic,
                PlanetType::Toxic,
                PlanetType::Irradiated,
            ],
            hazard_type_damage_bonus: 4,
            corrosive_damage_bonus: 6,
            high_risk_difficulty: 4,
            ruins_chance: 0.1,
            signals_chance: 0.1,
            danger_roll_max: 2,
            map_size: 100.0,
            warp_energy_cost: 10,
            scan_energy_cost: 5,
            deep_scan_energy_cost: 8,
            rest_ration_cost: 2,
            repair_metals_cost: 10,
            starting_probe_integrity: 30,
            energy_capacity: 200,
            metals_capacity: 100,
            rations_capacity: 50,
            starting_energy: 150,
            starting_metals: 20,
            starting_rations: 40,
            autopilot_probe_integrity_floor: 10,
        },
        planet_types: vec![
            metrics(PlanetType::Rocky, (0.6, 1.4), (-40.0, 60.0)),
            metrics(PlanetType::Barren, (0.2, 0.9), (-120.0, 80.0)),
            metrics(PlanetType::Desert, (0.7, 1.3), (20.0, 90.0)),
            metrics(PlanetType::Ocean, (0.8, 1.2), (0.0, 40.0)),
            metrics(PlanetType::Ice, (0.3, 1.1), (-200.0, -20.0)),
            metrics(PlanetType::Tundra, (0.6, 1.2), (-60.0, 0.0)),
            metrics(PlanetType::Jungle, (0.9, 1.5), (20.0, 50.0)),
            metrics(PlanetType::Volcanic, (0.8, 1.8), (200.0, 900.0)),
            metrics(PlanetType::Toxic, (0.7, 1.6), (30.0, 300.0)),
            metrics(PlanetType::GasGiant, (2.0, 4.5), (-180.0, -60.0)),
            metrics(PlanetType::Crystalline, (0.5, 1.2), (-80.0, 20.0)),
            metrics(PlanetType::Metallic, (1.2, 2.6), (-20.0, 140.0)),
            metrics(PlanetType::Irradiated, (0.4, 1.3), (60.0, 400.0)),
            metrics(PlanetType::Exotic, (0.1, 3.0), (-250.0, 500.0)),
        ],
        resource_profiles: vec![
            ResourceProfileDef {
                resource: ResourceKind::Metals,
                baseline: (10, 40),
                rich: vec![PlanetType::Metallic, PlanetType::Volcanic, PlanetType::Crystalline],
                rich_modifier: 30,
                poor: vec![PlanetType::Ocean, PlanetType::GasGiant],
                poor_modifier: -10,
            },
            ResourceProfileDef {
                resource: ResourceKind::Energy,
                baseline: (10, 40),
                rich: vec![PlanetType::GasGiant, PlanetType::Irradiated, PlanetType::Exotic],
                rich_modifier: 30,
                poor: vec![PlanetType::Ice, PlanetType::Tundra],
                poor_modifier: -10,
            },
        ],
        atmosphere_sets: vec![
            AtmosphereSetDef {
                atmosphere: Atmosphere::Corrosive,
                types: vec![PlanetType::Volcanic, PlanetType::Toxic],
            },
            AtmosphereSetDef {
                atmosphere: Atmosphere::Thin,
                types: vec![PlanetType::Rocky, PlanetType::Barren, PlanetType::Desert],
            },
            AtmosphereSetDef {
                atmosphere: Atmosphere::Breathable,
                types: vec![PlanetType::Jungle, PlanetType::Ocean],
            },
            AtmosphereSetDef {
                atmosphere: Atmosphere::Dense,
                types: vec![PlanetType::GasGiant],
            },
        ],
        sectors: vec![
            sector_one,
            sector_two,
            sector(3, HazardTheme::SignalFog, (5, 7), 0.5),
            sector_four,
            sector_five,
            sector(6, HazardTheme::DeepVoid, (3, 5), 0.4),
        ],
        pools: BTreeMap::from([
            (
                "baseline".to_string(),
                vec![
                    resource(ResourceKind::Metals, 2, 5, 6.0),
                    resource(ResourceKind::Energy, 2, 6, 4.0),
                    lore("Wind-scoured plains, nothing more.", 1.0),
                ],
            ),
            (
                "ruins".to_string(),
                vec![
                    item_entry("relic_shard", 3.0),
                    lore("Glyphs older than any charted star.", 2.0),
                ],
            ),
            (
                "signals".to_string(),
                vec![
                    item_entry("signal_decoder", 2.0),
                    resource(ResourceKind::Energy, 5, 10, 2.0),
                ],
            ),
            (
                "corrosive".to_string(),
                vec![resource(ResourceKind::Metals, 4, 8, 2.0)],
            ),
            (
                "rich_metals".to_string(),
                vec![resource(ResourceKind::Metals, 6, 12, 4.0)],
            ),
            (
                "derelict".to_string(),
                vec![
                    item_entry("hull_patch", 3.0),
                    resource(ResourceKind::Metals, 8, 15, 3.0),
                ],
            ),
        ]),
        rules: vec![
            rule("rule_baseline", RuleCondition::Always, "baseline"),
            rule(
                "rule_ruins",
                RuleCondition::HasTag {
                    tag: crate::PlanetTag::AncientRuins,
                },
                "ruins",
            ),
            rule(
                "rule_signals",
                RuleCondition::HasTag {
                    tag: crate::PlanetTag::AlienSignals,
                },
                "signals",
            ),
            rule(
                "rule_corrosive",
                RuleCondition::AtmosphereIs {
                    atmosphere: Atmosphere::Corrosive,
                },
                "corrosive",
            ),
            rule(
                "rule_rich_metals",
                RuleCondition::TypeIn {
                    types: vec![PlanetType::Metallic, PlanetType::Crystalline],
                },
                "rich_metals",
            ),
            rule(
                "rule_derelict",
                RuleCondition::HasTag {
                    tag: crate::PlanetTag::Derelict,
                },
                "derelict",
            ),
        ],
        items: vec![
            ItemTemplate {
                id: ItemId("relic_shard".to_string()),
                name: "Relic Shard".to_string(),
                description: "A sliver of something carved.".to_string(),
                use_effects: vec![],
            },
            ItemTemplate {
                id: ItemId("signal_decoder".to_string()),
                name: "Signal Decoder".to_string(),
                description: "Alien circuitry, still warm.".to_string(),
                use_effects: vec![],
            },
            ItemTemplate {
                id: ItemId("hull_patch".to_string()),
                name: "Hull Patch".to_string(),
                description: "Restores probe plating.".to_string(),
                use_effects: vec![EventEffect::RepairProbe { amount: 10 }],
            },
            ItemTemplate {
                id: ItemId("power_cell".to_string()),
                name: "Power Cell".to_string(),
                description: "Charged and sealed.".to_string(),
                use_effects: vec![EventEffect::AdjustResource {
                    resource: ResourceKind::Energy,
                    amount: 20,
                }],
            },
        ],
        malfunctions: EventCatalog {
            base_chances: BTreeMap::from([
                (EventTrigger::Routine, 0.05),
                (EventTrigger::Warp, 0.1),
                (EventTrigger::SectorTransition, 0.2),
            ]),
            depth_bonus_per_sector: 0.02,
            amplified_by: Some(Subsystem::Shields),
            events: vec![
                event(
                    "coolant_leak",
                    3.0,
                    vec![EventCondition::SubsystemOperational {
                        subsystem: Subsystem::Reactor,
                    }],
                    vec![EventEffect::AdjustResource {
                        resource: ResourceKind::Energy,
                        amount: -15,
                    }],
                ),
                event(
                    "sensor_fault",
                    2.0,
                    vec![EventCondition::SubsystemOperational {
                        subsystem: Subsystem::Sensors,
                    }],
                    vec![EventEffect::DamageSubsystem {
                        subsystem: Subsystem::Sensors,
                    }],
                ),
                event(
                    "probe_bay_jam",
                    1.0,
                    vec![EventCondition::SubsystemOperational {
                        subsystem: Subsystem::ProbeBay,
                    }],
                    vec![EventEffect::DamageSubsystem {
                        subsystem: Subsystem::ProbeBay,
                    }],
                ),
            ],
        },
        distress_signals: EventCatalog {
            base_chances: BTreeMap::from([(EventTrigger::Warp, 0.25), (EventTrigger::Scan, 0.1)]),
            depth_bonus_per_sector: 0.03,
            amplified_by: None,
            events: vec![
                event(
                    "survivor_pod",
                    3.0,
                    vec![],
                    vec![
                        EventEffect::AdjustResource {
                            resource: ResourceKind::Rations,
                            amount: -5,
                        },
                        EventEffect::AdjustResource {
                            resource: ResourceKind::Metals,
                            amount: 10,
                        },
                    ],
                ),
                event(
                    "pirate_lure",
                    2.0,
                    vec![EventCondition::SectorAtLeast { index: 2 }],
                    vec![
                        EventEffect::DamageSubsystem {
                            subsystem: Subsystem::Shields,
                        },
                        EventEffect::CrewStress {
                            amount: 1,
                            scope: CrewScope::All,
                        },
                    ],
                ),
                event(
                    "research_beacon",
                    2.0,
                    vec![EventCondition::CrewRole {
                        role: CrewRole::Scientist,
                    }],
                    vec![EventEffect::GrantItem {
                        item: ItemId("signal_decoder".to_string()),
                    }],
                ),
            ],
        },
        crew: vec![
            crew_def("Ada Voss", CrewRole::Captain),
            crew_def("Rin Okafor", CrewRole::Pilot),
            crew_def("Tomas Hale", CrewRole::Engineer),
            crew_def("Mirela Sun", CrewRole::Scientist),
            crew_def("Jun Park", CrewRole::Medic),
        ],
    }
}

fn crew_def(name: &str, role: CrewRole) -> CrewDef {
    CrewDef {
        name: name.to_string(),
        role,
        tags: BTreeSet::new(),
    }
}

/// Sector-1 rocky planet with danger 0 and a thin (non-corrosive) atmosphere.
pub fn rocky_planet() -> Planet {
    Planet {
        id: PlanetId("s1_p00".to_string()),
        sector: 1,
        planet_type: PlanetType::Rocky,
        gravity: 1.0,
        temperature: 15.0,
        atmosphere: Atmosphere::Thin,
        true_atmosphere: None,
        tags: BTreeSet::new(),
        metals: 30,
        energy: 20,
        danger: 0,
        remote_scanned: false,
        scanned: false,
        visited: false,
        distress_checked: false,
        position: MapPosition { x: 10.0, y: 10.0 },
    }
}

/// Sector-1 volcanic planet with a corrosive atmosphere.
pub fn volcanic_planet() -> Planet {
    Planet {
        id: PlanetId("s1_p01".to_string()),
        planet_type: PlanetType::Volcanic,
        gravity: 1.2,
        temperature: 450.0,
        atmosphere: Atmosphere::Corrosive,
        metals: 60,
        danger: 2,
        position: MapPosition { x: 40.0, y: 25.0 },
        ..rocky_planet()
    }
}

/// Standard game state: sector 1 with a rocky and a volcanic planet, full crew,
/// every subsystem operational, nothing in orbit yet.
pub fn base_state(content: &GameContent) -> GameState {
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

    GameState {
        meta: MetaState {
            turn: 0,
            seed: 42,
            schema_version: 1,
            content_version: content.content_version.clone(),
        },
        sector: SectorState {
            index: 1,
            planets: vec![rocky_planet(), volcanic_planet()],
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
    }
}
