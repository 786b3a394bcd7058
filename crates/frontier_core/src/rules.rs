//! Rule registry and loot-pool aggregation.
//!
//! A rule gates a named pool behind a declarative condition. Building the
//! candidate pool for a planet evaluates every rule and appends the full pool
//! of each match. Pools are never deduplicated: matching several rules makes
//! the combined pool larger, and since everything is merged before sampling,
//! rule order does not change any candidate's probability.

use crate::sampler::Weighted;
use crate::{GameContent, GameState, Planet, PoolEntry, RuleCondition, RuleDef};

/// Pure evaluation of a rule condition against a planet and the world state.
pub fn condition_holds(condition: &RuleCondition, planet: &Planet, state: &GameState) -> bool {
    match condition {
        RuleCondition::Always => true,
        RuleCondition::HasTag { tag } => planet.has_tag(*tag),
        RuleCondition::TypeIn { types } => types.contains(&planet.planet_type),
        RuleCondition::AtmosphereIs { atmosphere } => planet.atmosphere == *atmosphere,
        RuleCondition::DangerAtLeast { level } => planet.danger >= *level,
        RuleCondition::SectorAtLeast { index } => state.sector.index >= *index,
        RuleCondition::Scanned => planet.scanned,
        RuleCondition::All { conditions } => conditions
            .iter()
            .all(|inner| condition_holds(inner, planet, state)),
        RuleCondition::Any { conditions } => conditions
            .iter()
            .any(|inner| condition_holds(inner, planet, state)),
        RuleCondition::Not { condition } => !condition_holds(condition, planet, state),
    }
}

/// True for rules whose condition can never be false (the baseline rules).
pub fn is_baseline(rule: &RuleDef) -> bool {
    matches!(rule.condition, RuleCondition::Always)
}

/// Rules whose condition holds, in registry order.
pub fn matching_rules<'a>(
    planet: &'a Planet,
    state: &'a GameState,
    content: &'a GameContent,
) -> impl Iterator<Item = &'a RuleDef> + 'a {
    content
        .rules
        .iter()
        .filter(move |rule| condition_holds(&rule.condition, planet, state))
}

/// A pool entry together with the rule that contributed it.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub entry: &'a PoolEntry,
    pub rule_id: &'a str,
}

impl Weighted for Candidate<'_> {
    fn weight(&self) -> f64 {
        self.entry.weight()
    }
}

/// Ordered, append-only candidate sequence.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool<'a> {
    candidates: Vec<Candidate<'a>>,
}

impl<'a> CandidatePool<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every entry of `entries`, tagged with `rule`. Duplicates are kept.
    pub fn extend_from_rule(&mut self, rule: &'a RuleDef, entries: &'a [PoolEntry]) {
        self.candidates.extend(entries.iter().map(|entry| Candidate {
            entry,
            rule_id: rule.id.as_str(),
        }));
    }

    pub fn candidates(&self) -> &[Candidate<'a>] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.candidates
            .iter()
            .map(Weighted::weight)
            .filter(|weight| *weight > 0.0)
            .sum()
    }
}

/// Merge the pools of every matching rule into one candidate set.
///
/// Panics if a matching rule references an unknown pool.
pub fn build_candidate_pool<'a>(
    planet: &'a Planet,
    state: &'a GameState,
    content: &'a GameContent,
) -> CandidatePool<'a> {
    let mut pool = CandidatePool::new();
    for rule in matching_rules(planet, state, content) {
        let entries = content.pools.get(&rule.pool).unwrap_or_else(|| {
            panic!(
                "rule '{}' references unknown pool '{}'",
                rule.id, rule.pool
            )
        });
        pool.extend_from_rule(rule, entries);
    }
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{base_content, base_state, rocky_planet};
    use crate::{Atmosphere, PlanetTag, PlanetType};

    #[test]
    fn baseline_rule_always_matches() {
        let content = base_content();
        let state = base_state(&content);
        let planet = rocky_planet();
        let pool = build_candidate_pool(&planet, &state, &content);
        assert!(!pool.is_empty());
        assert!(pool.candidates().iter().any(|c| c.rule_id == "rule_baseline"));
    }

    #[test]
    fn matching_rules_append_whole_pools_without_dedup() {
        let content = base_content();
        let state = base_state(&content);
        let mut planet = rocky_planet();
        let baseline_only = build_candidate_pool(&planet, &state, &content).len();

        planet.tags.insert(PlanetTag::AncientRuins);
        let with_ruins = build_candidate_pool(&planet, &state, &content);
        let ruins_len = content.pools["ruins"].len();
        assert_eq!(with_ruins.len(), baseline_only + ruins_len);
    }

    #[test]
    fn same_pool_referenced_twice_is_appended_twice() {
        let mut content = base_content();
        let mut duplicate = content.rules[0].clone();
        duplicate.id = "rule_baseline_again".to_string();
        content.rules.push(duplicate);
        let state = base_state(&content);
        let planet = rocky_planet();
        let pool = build_candidate_pool(&planet, &state, &content);
        assert_eq!(pool.len(), 2 * content.pools["baseline"].len());
    }

    #[test]
    fn rule_order_does_not_change_total_weight() {
        let content = base_content();
        let state = base_state(&content);
        let mut planet = rocky_planet();
        planet.tags.insert(PlanetTag::AncientRuins);
        planet.atmosphere = Atmosphere::Corrosive;

        let forward = build_candidate_pool(&planet, &state, &content).total_weight();
        let mut reversed_content = content.clone();
        reversed_content.rules.reverse();
        let reversed = build_candidate_pool(&planet, &state, &reversed_content).total_weight();
        assert!((forward - reversed).abs() < 1e-9);
    }

    #[test]
    fn composite_conditions_evaluate() {
        let content = base_content();
        let state = base_state(&content);
        let planet = rocky_planet();
        let rocky_and_safe = RuleCondition::All {
            conditions: vec![
                RuleCondition::TypeIn {
                    types: vec![PlanetType::Rocky],
                },
                RuleCondition::Not {
                    condition: Box::new(RuleCondition::DangerAtLeast { level: 1 }),
                },
            ],
        };
        assert!(condition_holds(&rocky_and_safe, &planet, &state));
        let any_gas = RuleCondition::Any {
            conditions: vec![RuleCondition::TypeIn {
                types: vec![PlanetType::GasGiant],
            }],
        };
        assert!(!condition_holds(&any_gas, &planet, &state));
    }

    #[test]
    #[should_panic(expected = "references unknown pool")]
    fn unknown_pool_panics() {
        let mut content = base_content();
        content.rules[0].pool = "nowhere".to_string();
        let state = base_state(&content);
        let planet = rocky_planet();
        let _ = build_candidate_pool(&planet, &state, &content);
    }
}
