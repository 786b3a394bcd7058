//! Probe resolution: risk, damage and reward for an exploration probe.
//!
//! `resolve_probe` never mutates the planet or the world state. The caller
//! applies integrity loss and the reward from the returned outcome.

use rand::Rng;
use tracing::debug;

use crate::rolls::roll_int;
use crate::rules::build_candidate_pool;
use crate::sampler::sample;
use crate::{Atmosphere, Constants, GameContent, GameState, Planet, PoolEntry, ProbeOutcome, Reward};

/// Damage for one probe descent.
///
/// A base roll in `[probe_damage_min, probe_damage_max]`, plus each modifier
/// that applies (danger over threshold, high-hazard type, corrosive
/// atmosphere). Modifiers are summed; nothing is clamped here.
pub fn probe_damage<R: Rng + ?Sized>(planet: &Planet, constants: &Constants, rng: &mut R) -> u32 {
    let base = roll_int(rng, constants.probe_damage_min, constants.probe_damage_max);
    let mut damage = base;
    if planet.danger > constants.danger_threshold {
        damage += constants.danger_damage_bonus;
    }
    if constants.high_hazard_types.contains(&planet.planet_type) {
        damage += constants.hazard_type_damage_bonus;
    }
    if planet.atmosphere == Atmosphere::Corrosive {
        damage += constants.corrosive_damage_bonus;
    }
    debug!(planet = %planet.id, base, damage, "probe damage rolled");
    damage
}

/// Resolve one probe against `planet` with the probe at `current_integrity`.
///
/// Damage that would take integrity to zero or below destroys the probe: the
/// outcome is a failure, the loss equals the remaining integrity, and no reward
/// is drawn.
pub fn resolve_probe<R: Rng + ?Sized>(
    planet: &Planet,
    current_integrity: u32,
    state: &GameState,
    content: &GameContent,
    rng: &mut R,
) -> ProbeOutcome {
    let damage = probe_damage(planet, &content.constants, rng);

    if damage >= current_integrity {
        return ProbeOutcome {
            success: false,
            integrity_loss: current_integrity,
            message: format!(
                "Probe lost on {}: telemetry cut out during descent.",
                planet.id
            ),
            reward: None,
        };
    }

    let pool = build_candidate_pool(planet, state, content);
    let reward = sample(pool.candidates(), rng).map(|candidate| {
        debug!(planet = %planet.id, rule = candidate.rule_id, "probe reward drawn");
        reward_from_entry(candidate.entry, rng)
    });

    let message = match &reward {
        Some(reward) => format!(
            "Probe returned from {} with {}.",
            planet.id,
            describe_reward(reward, content)
        ),
        None => format!("Probe returned from {} with nothing of note.", planet.id),
    };

    ProbeOutcome {
        success: true,
        integrity_loss: damage,
        message,
        reward,
    }
}

/// Resource entries roll their final amount inside `[min, max]`.
pub fn reward_from_entry<R: Rng + ?Sized>(entry: &PoolEntry, rng: &mut R) -> Reward {
    match entry {
        PoolEntry::Resource {
            resource, min, max, ..
        } => Reward::Resource {
            resource: *resource,
            amount: roll_int(rng, *min, *max),
        },
        PoolEntry::Item { item, .. } => Reward::Item { item: item.clone() },
        PoolEntry::Lore { text, .. } => Reward::Lore { text: text.clone() },
    }
}

pub fn describe_reward(reward: &Reward, content: &GameContent) -> String {
    match reward {
        Reward::Resource { resource, amount } => format!("{amount} {resource}"),
        Reward::Item { item } => content
            .item(item)
            .map_or_else(|| item.to_string(), |template| template.name.clone()),
        Reward::Lore { .. } => "a data fragment".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{base_content, rocky_planet, ScriptedRng};
    use crate::PlanetType;

    #[test]
    fn damage_modifiers_are_additive() {
        let content = base_content();
        let c = &content.constants;
        let mut planet = rocky_planet();
        planet.danger = c.danger_threshold + 1;
        planet.planet_type = c.high_hazard_types[0];
        planet.atmosphere = Atmosphere::Corrosive;

        let mut rng = ScriptedRng::new(&[0.0]);
        let damage = probe_damage(&planet, c, &mut rng);
        assert_eq!(
            damage,
            c.probe_damage_min
                + c.danger_damage_bonus
                + c.hazard_type_damage_bonus
                + c.corrosive_damage_bonus
        );
    }

    #[test]
    fn plain_planet_takes_base_damage_only() {
        let content = base_content();
        let c = &content.constants;
        let planet = rocky_planet();
        assert!(!c.high_hazard_types.contains(&PlanetType::Rocky));
        let mut rng = ScriptedRng::new(&[0.999]);
        assert_eq!(probe_damage(&planet, c, &mut rng), c.probe_damage_max);
    }

    #[test]
    fn resource_reward_rolls_inside_entry_range() {
        let entry = PoolEntry::Resource {
            resource: crate::ResourceKind::Metals,
            min: 2,
            max: 5,
            weight: 1.0,
        };
        let mut rng = crate::test_fixtures::make_rng();
        for _ in 0..200 {
            match reward_from_entry(&entry, &mut rng) {
                Reward::Resource { amount, .. } => assert!((2..=5).contains(&amount)),
                other => panic!("unexpected reward {other:?}"),
            }
        }
    }
}
