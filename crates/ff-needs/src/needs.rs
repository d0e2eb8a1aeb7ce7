//! Need-bias derivation, per-role seeding, and per-tick decay/reinforcement.
//!
//! All three operations are pure functions over a `Needs` map; nothing here
//! owns agent state — the simulation loop calls these once per agent per
//! tick and stores the result back onto its own `AgentStore`.
//!
//! Needs are tracked per [`NeedCategory`] (hunger, caffeine, groceries,
//! health, education, leisure, social) rather than per [`PoiCategory`]: a
//! need is a craving, a POI category is a place that can satisfy one.
//! Scenario bias weights arrive keyed by `PoiCategory` (the category of POI
//! a scenario adds) and are translated to the need they primarily satisfy
//! via [`PoiCategory::primary_need`] before being applied here.

use std::collections::HashMap;

use ff_core::{NeedCategory, PoiCategory, Role};
use ff_scenario::Scenario;

/// A need-category → need-level map. Every value is clamped to `[0, 1]` by
/// every function in this module; callers should never need to clamp again.
pub type Needs = HashMap<NeedCategory, f64>;

const DECAY_PER_SECOND: f64 = 0.02;
const REINFORCE_PER_SECOND: f64 = 0.1;
const BIAS_STEP: f64 = 0.2;
const BIAS_SEED_BONUS: f64 = 0.2;

/// Derive per-need bias weights for a scenario.
///
/// If `scenario.tags.bias` is present (a `PoiCategory → weight` map), each
/// entry is translated to the need it primarily satisfies and used as-is.
/// Otherwise, every distinct category named in `poi_add` starts at weight
/// `0.2` and gains another `0.2` per additional add of the same category,
/// clamped to `1.0`, then translated the same way. Added categories with no
/// tracked need (`transit`, `other`) contribute nothing.
pub fn build_need_biases_for_scenario(scenario: &Scenario) -> HashMap<NeedCategory, f64> {
    let by_poi_category: HashMap<PoiCategory, f64> = match scenario.bias_tags() {
        Some(explicit) => explicit,
        None => {
            let mut derived: HashMap<PoiCategory, f64> = HashMap::new();
            for add in &scenario.poi_add {
                let weight = derived.entry(add.category).or_insert(0.0);
                *weight = (*weight + BIAS_STEP).min(1.0);
            }
            derived
        }
    };

    by_poi_category
        .into_iter()
        .filter_map(|(category, weight)| Some((category.primary_need()?, weight)))
        .collect()
}

/// Per-role floor levels applied before biases: a minimum starting need so
/// a role's defining activity (a student's classes, a resident's
/// groceries, a worker's coffee run) shows up even with a flat bias map.
fn role_floors(role: Role) -> &'static [(NeedCategory, f64)] {
    match role {
        Role::Student => &[(NeedCategory::Education, 0.5), (NeedCategory::Caffeine, 0.4)],
        Role::Resident => &[(NeedCategory::Groceries, 0.4)],
        Role::Worker => &[(NeedCategory::Caffeine, 0.3)],
    }
}

/// Seed an agent's initial needs from a role floor table, then raise biased
/// needs toward `weight + 0.2` (never lowering an existing value).
pub fn seed_needs(base: &Needs, biases: &HashMap<NeedCategory, f64>, role: Role) -> Needs {
    let mut needs = base.clone();

    for &(category, floor) in role_floors(role) {
        let entry = needs.entry(category).or_insert(0.0);
        *entry = entry.max(floor);
    }

    for (&category, &weight) in biases {
        let target = (weight + BIAS_SEED_BONUS).min(1.0);
        let entry = needs.entry(category).or_insert(0.0);
        *entry = entry.max(target);
    }

    needs
}

/// Apply one tick's worth of need decay (`dt` seconds), then reinforce
/// biased needs toward `weight - 0.1*dt` (never lowering a need that's
/// already above that target).
pub fn decay_and_reinforce(needs: &Needs, dt: f64, biases: &HashMap<NeedCategory, f64>) -> Needs {
    let mut out: Needs = needs
        .iter()
        .map(|(&category, &value)| (category, (value - DECAY_PER_SECOND * dt).max(0.0)))
        .collect();

    for (&category, &weight) in biases {
        let target = weight - REINFORCE_PER_SECOND * dt;
        let current = *out.get(&category).unwrap_or(&0.0);
        out.insert(category, current.max(target).min(1.0));
    }

    out
}
