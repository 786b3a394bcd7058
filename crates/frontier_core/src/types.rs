//! Type definitions for `frontier_core`.
//!
//! World state, content definitions, outcomes and events shared by every module.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ID newtypes
// ---------------------------------------------------------------------------

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(PlanetId);
string_id!(ItemId);
string_id!(CrewId);
string_id!(EventId);

// ---------------------------------------------------------------------------
// Core enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanetType {
    Rocky,
    Barren,
    Desert,
    Ocean,
    Ice,
    Tundra,
    Jungle,
    Volcanic,
    Toxic,
    GasGiant,
    Crystalline,
    Metallic,
    Irradiated,
    Exotic,
}

impl PlanetType {
    /// Global type catalog, used when a sector does not restrict types.
    pub const ALL: [PlanetType; 14] = [
        PlanetType::Rocky,
        PlanetType::Barren,
        PlanetType::Desert,
        PlanetType::Ocean,
        PlanetType::Ice,
        PlanetType::Tundra,
        PlanetType::Jungle,
        PlanetType::Volcanic,
        PlanetType::Toxic,
        PlanetType::GasGiant,
        PlanetType::Crystalline,
        PlanetType::Metallic,
        PlanetType::Irradiated,
        PlanetType::Exotic,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Atmosphere {
    None,
    Thin,
    Breathable,
    Dense,
    Toxic,
    Corrosive,
}

impl Atmosphere {
    pub const ALL: [Atmosphere; 6] = [
        Atmosphere::None,
        Atmosphere::Thin,
        Atmosphere::Breathable,
        Atmosphere::Dense,
        Atmosphere::Toxic,
        Atmosphere::Corrosive,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanetTag {
    HighRisk,
    AncientRuins,
    AlienSignals,
    Anomaly,
    Derelict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Energy,
    Metals,
    Rations,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subsystem {
    Engines,
    Sensors,
    LifeSupport,
    Shields,
    Reactor,
    ProbeBay,
}

impl Subsystem {
    pub const ALL: [Subsystem; 6] = [
        Subsystem::Engines,
        Subsystem::Sensors,
        Subsystem::LifeSupport,
        Subsystem::Shields,
        Subsystem::Reactor,
        Subsystem::ProbeBay,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubsystemStatus {
    Operational,
    Damaged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrewStatus {
    Healthy,
    Injured,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrewRole {
    Captain,
    Pilot,
    Engineer,
    Scientist,
    Medic,
    Security,
}

/// The five points at which a sector's hazards may act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardTrigger {
    SectorEnter,
    Warp,
    Scan,
    DeepScan,
    PlanetGenerate,
}

/// Game moments that can roll a random event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTrigger {
    Routine,
    Warp,
    SectorTransition,
    Scan,
}

/// Hazard theme bound to a sector descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardTheme {
    Calm,
    IonStorm,
    SignalFog,
    GravityShear,
    DerelictField,
    DeepVoid,
}

macro_rules! display_as_serde_name {
    ($name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(match self {
                    $($name::$variant => $label),+
                })
            }
        }
    };
}

display_as_serde_name!(PlanetType {
    Rocky => "rocky",
    Barren => "barren",
    Desert => "desert",
    Ocean => "ocean",
    Ice => "ice",
    Tundra => "tundra",
    Jungle => "jungle",
    Volcanic => "volcanic",
    Toxic => "toxic",
    GasGiant => "gas giant",
    Crystalline => "crystalline",
    Metallic => "metallic",
    Irradiated => "irradiated",
    Exotic => "exotic",
});

display_as_serde_name!(Atmosphere {
    None => "none",
    Thin => "thin",
    Breathable => "breathable",
    Dense => "dense",
    Toxic => "toxic",
    Corrosive => "corrosive",
});

display_as_serde_name!(ResourceKind {
    Energy => "energy",
    Metals => "metals",
    Rations => "rations",
});

display_as_serde_name!(Subsystem {
    Engines => "engines",
    Sensors => "sensors",
    LifeSupport => "life support",
    Shields => "shields",
    Reactor => "reactor",
    ProbeBay => "probe bay",
});

// ---------------------------------------------------------------------------
// Engine context
// ---------------------------------------------------------------------------

/// Per-run settings threaded into every resolver and selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimContext {
    /// When set, probability gates resolve to their triggering branch.
    pub force_deterministic: bool,
}

impl SimContext {
    pub fn deterministic() -> Self {
        Self {
            force_deterministic: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Planet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPosition {
    pub x: f64,
    pub y: f64,
}

impl MapPosition {
    pub fn distance_to(&self, other: &MapPosition) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planet {
    pub id: PlanetId,
    pub sector: u8,
    pub planet_type: PlanetType,
    pub gravity: f64,
    pub temperature: f64,
    /// Atmosphere as currently reported by the sensors.
    pub atmosphere: Atmosphere,
    /// Real atmosphere while a sensor decoy is masking it. Cleared by a deep scan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub true_atmosphere: Option<Atmosphere>,
    pub tags: BTreeSet<PlanetTag>,
    pub metals: u32,
    pub energy: u32,
    pub danger: u32,
    pub remote_scanned: bool,
    pub scanned: bool,
    pub visited: bool,
    /// Set once a distress roll has been made here; never cleared.
    pub distress_checked: bool,
    pub position: MapPosition,
}

impl Planet {
    pub fn has_tag(&self, tag: PlanetTag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn resource(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Metals => self.metals,
            ResourceKind::Energy => self.energy,
            ResourceKind::Rations => 0,
        }
    }
}

// ---------------------------------------------------------------------------
// State types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub meta: MetaState,
    pub sector: SectorState,
    pub resources: Resources,
    pub crew: Vec<CrewMember>,
    pub systems: BTreeMap<Subsystem, SubsystemStatus>,
    pub cargo: Vec<ItemId>,
    pub probe_integrity: u32,
    pub log: Vec<LogEntry>,
    pub counters: Counters,
}

impl GameState {
    /// Append a narrative message for the current turn.
    pub fn push_log(&mut self, text: impl Into<String>) {
        self.log.push(LogEntry {
            turn: self.meta.turn,
            text: text.into(),
        });
    }

    /// Subsystems missing from the map count as operational.
    pub fn subsystem_status(&self, subsystem: Subsystem) -> SubsystemStatus {
        self.systems
            .get(&subsystem)
            .copied()
            .unwrap_or(SubsystemStatus::Operational)
    }

    pub fn is_damaged(&self, subsystem: Subsystem) -> bool {
        self.subsystem_status(subsystem) == SubsystemStatus::Damaged
    }

    pub fn living_crew(&self) -> impl Iterator<Item = &CrewMember> {
        self.crew.iter().filter(|member| member.is_alive())
    }

    /// Indices into `crew` of members who are still alive, in roster order.
    pub fn living_crew_indices(&self) -> Vec<usize> {
        self.crew
            .iter()
            .enumerate()
            .filter(|(_, member)| member.is_alive())
            .map(|(index, _)| index)
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaState {
    pub turn: u64,
    pub seed: u64,
    pub schema_version: u32,
    pub content_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorState {
    /// 1-based sector index; 0 before the first sector is entered.
    pub index: u8,
    pub planets: Vec<Planet>,
    pub current_planet: Option<PlanetId>,
}

impl SectorState {
    pub fn planet(&self, id: &PlanetId) -> Option<&Planet> {
        self.planets.iter().find(|planet| &planet.id == id)
    }

    pub fn planet_mut(&mut self, id: &PlanetId) -> Option<&mut Planet> {
        self.planets.iter_mut().find(|planet| &planet.id == id)
    }

    pub fn current(&self) -> Option<&Planet> {
        self.current_planet.as_ref().and_then(|id| self.planet(id))
    }
}

/// A capped resource counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gauge {
    pub current: u32,
    pub max: u32,
}

impl Gauge {
    pub fn new(current: u32, max: u32) -> Self {
        Self {
            current: current.min(max),
            max,
        }
    }

    /// Adds up to the cap; returns the amount actually gained.
    pub fn add(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.max);
        self.current - before
    }

    /// Spends `amount` only if fully available.
    pub fn try_spend(&mut self, amount: u32) -> bool {
        if self.current < amount {
            return false;
        }
        self.current -= amount;
        true
    }

    /// Removes up to `amount`; returns the amount actually removed.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.current);
        self.current -= removed;
        removed
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resources {
    pub energy: Gauge,
    pub metals: Gauge,
    pub rations: Gauge,
}

impl Resources {
    pub fn gauge(&self, kind: ResourceKind) -> &Gauge {
        match kind {
            ResourceKind::Energy => &self.energy,
            ResourceKind::Metals => &self.metals,
            ResourceKind::Rations => &self.rations,
        }
    }

    pub fn gauge_mut(&mut self, kind: ResourceKind) -> &mut Gauge {
        match kind {
            ResourceKind::Energy => &mut self.energy,
            ResourceKind::Metals => &mut self.metals,
            ResourceKind::Rations => &mut self.rations,
        }
    }
}

pub const MAX_STRESS: u8 = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: CrewId,
    pub name: String,
    pub role: CrewRole,
    /// 0 (calm) to `MAX_STRESS` (breaking point).
    pub stress: u8,
    pub status: CrewStatus,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl CrewMember {
    pub fn is_alive(&self) -> bool {
        self.status != CrewStatus::Dead
    }

    /// Raises stress, saturating at `MAX_STRESS`. Returns the new level.
    pub fn add_stress(&mut self, amount: u8) -> u8 {
        self.stress = self.stress.saturating_add(amount).min(MAX_STRESS);
        self.stress
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub turn: u64,
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Counters {
    pub next_event_id: u64,
    pub next_derelict_id: u64,
}

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Reward {
    Resource { resource: ResourceKind, amount: u32 },
    Item { item: ItemId },
    Lore { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeOutcome {
    pub success: bool,
    pub integrity_loss: u32,
    pub message: String,
    pub reward: Option<Reward>,
}

/// Result of a fired random event, after its effects were applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventOutcome {
    pub event_id: String,
    pub title: String,
    pub summary: String,
}

// ---------------------------------------------------------------------------
// Action types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    EnterSector { index: u8 },
    Warp { planet: PlanetId },
    RemoteScan { planet: PlanetId },
    DeepScan { planet: PlanetId },
    Probe { planet: PlanetId },
    Rest,
    UseItem { item: ItemId },
}

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub id: EventId,
    pub turn: u64,
    pub event: Event,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    SectorEntered {
        index: u8,
        planet_count: usize,
    },
    Warped {
        planet: PlanetId,
    },
    RemoteScanned {
        planet: PlanetId,
    },
    ScanBlocked {
        planet: PlanetId,
        reason: String,
    },
    DeepScanned {
        planet: PlanetId,
    },
    ProbeResolved {
        planet: PlanetId,
        outcome: ProbeOutcome,
    },
    Rested {
        rations_spent: u32,
    },
    SubsystemRepaired {
        subsystem: Subsystem,
        metals_spent: u32,
    },
    ItemUsed {
        item: ItemId,
        message: String,
    },
    Malfunction {
        outcome: EventOutcome,
    },
    DistressSignal {
        planet: PlanetId,
        outcome: EventOutcome,
    },
    ActionRejected {
        action: Action,
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Content types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameContent {
    pub content_version: String,
    pub constants: Constants,
    pub planet_types: Vec<PlanetTypeDef>,
    pub resource_profiles: Vec<ResourceProfileDef>,
    pub atmosphere_sets: Vec<AtmosphereSetDef>,
    pub sectors: Vec<SectorDef>,
    pub pools: BTreeMap<String, Vec<PoolEntry>>,
    pub rules: Vec<RuleDef>,
    pub items: Vec<ItemTemplate>,
    pub malfunctions: EventCatalog,
    pub distress_signals: EventCatalog,
    pub crew: Vec<CrewDef>,
}

impl GameContent {
    /// Highest configured sector index.
    pub fn max_sector(&self) -> u8 {
        self.sectors.iter().map(|s| s.index).max().unwrap_or(1)
    }

    /// Descriptor for `index`, clamped into the configured range.
    ///
    /// Panics if no sector is configured; that is a content authoring error.
    pub fn sector(&self, index: u8) -> &SectorDef {
        let clamped = index.clamp(1, self.max_sector());
        self.sectors
            .iter()
            .find(|s| s.index == clamped)
            .unwrap_or_else(|| panic!("sector {clamped} not found in content"))
    }

    /// Panics if the type has no metric table; that is a content authoring error.
    pub fn planet_type_def(&self, planet_type: PlanetType) -> &PlanetTypeDef {
        self.planet_types
            .iter()
            .find(|def| def.planet_type == planet_type)
            .unwrap_or_else(|| panic!("planet type '{planet_type}' has no metric table"))
    }

    pub fn item(&self, id: &ItemId) -> Option<&ItemTemplate> {
        self.items.iter().find(|item| &item.id == id)
    }
}

/// Per-type physical metric bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetTypeDef {
    pub planet_type: PlanetType,
    pub gravity: (f64, f64),
    pub temperature: (f64, f64),
}

/// Baseline draw and rich/poor modifiers for one planetary resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceProfileDef {
    pub resource: ResourceKind,
    pub baseline: (u32, u32),
    pub rich: Vec<PlanetType>,
    pub rich_modifier: i32,
    pub poor: Vec<PlanetType>,
    pub poor_modifier: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtmosphereSetDef {
    pub atmosphere: Atmosphere,
    pub types: Vec<PlanetType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeWeight {
    pub planet_type: PlanetType,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorDef {
    pub index: u8,
    pub name: String,
    /// Empty means every type in the global catalog.
    #[serde(default)]
    pub allowed_types: Vec<PlanetType>,
    /// When non-empty, replaces uniform type selection.
    #[serde(default)]
    pub type_bias: Vec<TypeWeight>,
    #[serde(default)]
    pub guaranteed_types: Vec<PlanetType>,
    pub planet_count: (u32, u32),
    pub hazard_chance: f64,
    pub anomaly_chance: f64,
    pub hazard_theme: HazardTheme,
}

/// One weighted candidate in a named pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PoolEntry {
    Resource {
        resource: ResourceKind,
        min: u32,
        max: u32,
        weight: f64,
    },
    Item {
        item: ItemId,
        weight: f64,
    },
    Lore {
        text: String,
        weight: f64,
    },
}

/// Declarative predicate over a planet and the world state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleCondition {
    Always,
    HasTag { tag: PlanetTag },
    TypeIn { types: Vec<PlanetType> },
    AtmosphereIs { atmosphere: Atmosphere },
    DangerAtLeast { level: u32 },
    SectorAtLeast { index: u8 },
    Scanned,
    All { conditions: Vec<RuleCondition> },
    Any { conditions: Vec<RuleCondition> },
    Not { condition: Box<RuleCondition> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleDef {
    pub id: String,
    pub condition: RuleCondition,
    pub pool: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    /// Resource mutations applied when the item is used. Empty for keepsakes.
    #[serde(default)]
    pub use_effects: Vec<EventEffect>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCatalog {
    /// Base fire chance per trigger. Triggers not listed never fire.
    pub base_chances: BTreeMap<EventTrigger, f64>,
    /// Added once for every sector beyond the first.
    pub depth_bonus_per_sector: f64,
    /// A damaged subsystem that doubles the fire chance.
    #[serde(default)]
    pub amplified_by: Option<Subsystem>,
    pub events: Vec<EventDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDef {
    pub id: String,
    pub title: String,
    pub weight: f64,
    #[serde(default)]
    pub conditions: Vec<EventCondition>,
    pub effects: Vec<EventEffect>,
    pub summary: String,
}

/// Eligibility predicate over the world state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventCondition {
    SubsystemOperational { subsystem: Subsystem },
    SubsystemDamaged { subsystem: Subsystem },
    ResourceAtLeast { resource: ResourceKind, amount: u32 },
    CrewRole { role: CrewRole },
    LivingCrewAtLeast { count: usize },
    CargoContains { item: ItemId },
    SectorAtLeast { index: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrewScope {
    One,
    All,
}

/// A single world-state mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventEffect {
    DamageSubsystem { subsystem: Subsystem },
    RepairSubsystem { subsystem: Subsystem },
    AdjustResource { resource: ResourceKind, amount: i32 },
    CrewStress { amount: u8, scope: CrewScope },
    InjureCrew,
    GrantItem { item: ItemId },
    DamageProbe { amount: u32 },
    RepairProbe { amount: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewDef {
    pub name: String,
    pub role: CrewRole,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constants {
    pub probe_damage_min: u32,
    pub probe_damage_max: u32,
    /// Danger above this adds `danger_damage_bonus` to probe damage.
    pub danger_threshold: u32,
    pub danger_damage_bonus: u32,
    pub high_hazard_types: Vec<PlanetType>,
    pub hazard_type_damage_bonus: u32,
    pub corrosive_damage_bonus: u32,
    /// Difficulty at or above which planets carry `HIGH_RISK`.
    pub high_risk_difficulty: u8,
    pub ruins_chance: f64,
    pub signals_chance: f64,
    pub danger_roll_max: u32,
    pub map_size: f64,
    pub warp_energy_cost: u32,
    pub scan_energy_cost: u32,
    pub deep_scan_energy_cost: u32,
    pub rest_ration_cost: u32,
    /// Metals an engineer spends to fix one damaged subsystem while resting.
    pub repair_metals_cost: u32,
    pub starting_probe_integrity: u32,
    pub energy_capacity: u32,
    pub metals_capacity: u32,
    pub rations_capacity: u32,
    pub starting_energy: u32,
    pub starting_metals: u32,
    pub starting_rations: u32,
    /// The autopilot stops probing below this integrity.
    pub autopilot_probe_integrity_floor: u32,
}
