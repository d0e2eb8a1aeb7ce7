//! Scenario documents: `poi_add`, `poi_update`, and anchor resolution.
//!
//! # Anchor resolution
//!
//! An anchor name resolves to a base cell on the grid, then the add's `dy`/
//! `dx` offset is applied and the result clamped into bounds:
//!
//! ```text
//! (iy, ix) = clamp(anchor_cell(name, grid) + (dy, dx))
//! ```
//!
//! Only `center` is distinguished today; `frontage_center` and any unknown
//! anchor name resolve identically to `center` (grid carries no
//! region-of-interest field to refine against).

use std::collections::HashMap;

use ff_core::{Cell, PoiCategory};
use ff_grid::Grid;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ScenarioError, ScenarioResult};

// ── PoiAdd ────────────────────────────────────────────────────────────────────

/// Where a `poi_add` entry should be placed: either an absolute cell or an
/// anchor plus offset. Untagged so a JSON object naming `iy`/`ix` parses as
/// [`Placement::Absolute`] and one naming `anchor` parses as
/// [`Placement::Anchored`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Placement {
    Absolute { iy: i32, ix: i32 },
    Anchored {
        anchor: String,
        #[serde(default)]
        dy: i32,
        #[serde(default)]
        dx: i32,
    },
}

/// One POI to be added to a scenario's asset directory.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoiAdd {
    #[serde(rename = "type")]
    pub category: PoiCategory,
    #[serde(flatten)]
    pub placement: Placement,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tags: HashMap<String, Value>,
}

impl PoiAdd {
    /// Resolve this add's target cell against `grid`, clamped into bounds.
    pub fn target_cell(&self, grid: &Grid) -> Cell {
        let raw = match &self.placement {
            Placement::Absolute { iy, ix } => Cell::new(*iy, *ix),
            Placement::Anchored { anchor, dy, dx } => {
                let base = anchor_cell(anchor, grid);
                Cell::new(base.iy + dy, base.ix + dx)
            }
        };
        grid.clamp_cell(raw)
    }
}

fn anchor_cell(name: &str, grid: &Grid) -> Cell {
    match name {
        "center" | "frontage_center" => grid.center(),
        _ => grid.center(),
    }
}

// ── PoiUpdate ─────────────────────────────────────────────────────────────────

/// A conditional update applied to every existing POI whose attributes match
/// `match_`. `tags` updates merge (shallow); every other key overwrites.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoiUpdate {
    #[serde(rename = "match")]
    pub match_: HashMap<String, Value>,
    pub set: HashMap<String, Value>,
}

impl PoiUpdate {
    fn is_empty(&self) -> bool {
        self.match_.is_empty() || self.set.is_empty()
    }
}

// ── Scenario ──────────────────────────────────────────────────────────────────

/// A scenario document: its identity, the POI edits it applies to a
/// baseline grid, and free-form tags (including an optional `bias` map).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub poi_add: Vec<PoiAdd>,
    #[serde(default)]
    pub poi_update: Vec<PoiUpdate>,
    #[serde(default)]
    pub tags: HashMap<String, Value>,
}

impl Scenario {
    /// Validate structural invariants not already enforced by deserialization
    /// (every `poi_add` either parses as absolute or anchored — see
    /// [`Placement`] — so only `poi_update` non-emptiness and a non-empty
    /// `id` remain to check here).
    pub fn validate(&self) -> ScenarioResult<()> {
        if self.id.trim().is_empty() {
            return Err(ScenarioError::Validation("scenario id must not be empty".into()));
        }
        for (i, update) in self.poi_update.iter().enumerate() {
            if update.is_empty() {
                return Err(ScenarioError::Validation(format!(
                    "poi_update[{i}] must have a non-empty match and set"
                )));
            }
        }
        Ok(())
    }

    /// The scenario's explicit `tags.bias` map, if present and well-formed:
    /// category name → weight. Returns `None` when absent so callers (the
    /// needs model) can fall back to deriving biases from `poi_add`.
    pub fn bias_tags(&self) -> Option<HashMap<PoiCategory, f64>> {
        let raw = self.tags.get("bias")?.as_object()?;
        let mut out = HashMap::with_capacity(raw.len());
        for (k, v) in raw {
            let category: PoiCategory = k.parse().ok()?;
            let weight = v.as_f64()?.clamp(0.0, 1.0);
            out.insert(category, weight);
        }
        Some(out)
    }
}
