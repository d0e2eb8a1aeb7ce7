//! Asset materialization: turn a baseline asset directory plus a `Scenario`
//! into a new, independent asset directory with the scenario's POI edits
//! applied.
//!
//! Grid topology is never touched here — only `pois.json` changes. The four
//! grid arrays and `navgraph.json` are copied byte-for-byte so the scenario
//! run shares the same walkability and cost fields as the baseline.

use std::path::Path;

use ff_core::Cell;
use ff_grid::{load_grid_dir, write_pois, Grid, Poi, SnappedCell};
use ff_scenario::{PoiUpdate, Scenario};
use serde_json::Value;

use crate::error::MaterializerResult;

const GRID_FILES: [&str; 5] = [
    "semantic.npy",
    "walkable.npy",
    "cost.npy",
    "feature_id.npy",
    "navgraph.json",
];

/// Tunable materializer behavior.
#[derive(Copy, Clone, Debug)]
pub struct MaterializerConfig {
    /// Search radius passed to `snap_to_walkable` for non-walkable adds.
    pub snap_radius: i32,
}

impl Default for MaterializerConfig {
    fn default() -> Self {
        Self { snap_radius: 15 }
    }
}

/// Materialize `scenario` against the grid at `baseline_dir`, writing the
/// resulting asset directory to `out_dir`, and return the resulting `Grid`
/// (with its edited POI list already attached).
///
/// Steps (in order, matching the guarantee that adds are applied before
/// updates and input order is preserved within each list):
/// 1. Copy the four grid arrays and `navgraph.json` unchanged.
/// 2. Load the baseline POI list.
/// 3. Resolve and append each `poi_add`, snapping to the nearest walkable
///    cell when the target is blocked.
/// 4. Apply each `poi_update` to every POI matching its `match` map.
/// 5. Write the edited POI list to `out_dir`.
pub fn materialize(
    baseline_dir: &Path,
    scenario: &Scenario,
    out_dir: &Path,
    config: MaterializerConfig,
) -> MaterializerResult<Grid> {
    std::fs::create_dir_all(out_dir)?;
    for name in GRID_FILES {
        std::fs::copy(baseline_dir.join(name), out_dir.join(name))?;
    }

    let baseline = load_grid_dir(baseline_dir)?;
    let mut pois = baseline.pois.clone();

    for add in &scenario.poi_add {
        let target = add.target_cell(&baseline);
        let snapped = if baseline.is_walkable(target) {
            Some(target)
        } else {
            ff_grid::snap_to_walkable(&baseline, target.iy, target.ix, config.snap_radius)
        };

        let mut tags = add.tags.clone();
        tags.insert("origin".to_string(), Value::String("scenario".to_string()));

        pois.push(Poi {
            category: add.category,
            iy: target.iy,
            ix: target.ix,
            snapped: snapped.map(|c: Cell| SnappedCell { iy: c.iy, ix: c.ix }),
            name: add.name.clone(),
            tags,
            lon: None,
            lat: None,
        });
    }

    for update in &scenario.poi_update {
        for poi in pois.iter_mut() {
            if poi_matches(poi, update)? {
                apply_update(poi, update)?;
            }
        }
    }

    write_pois(out_dir, &pois)?;

    let mut grid = baseline;
    grid.pois = pois;
    Ok(grid)
}

fn poi_matches(poi: &Poi, update: &PoiUpdate) -> MaterializerResult<bool> {
    let poi_json = serde_json::to_value(poi)?;
    let Some(obj) = poi_json.as_object() else {
        return Ok(false);
    };
    Ok(update.match_.iter().all(|(key, want)| match key.as_str() {
        "tags" => {
            let have_tags = obj.get("tags").and_then(Value::as_object);
            let want_tags = want.as_object();
            match (have_tags, want_tags) {
                (Some(have), Some(want)) => {
                    want.iter().all(|(k, v)| have.get(k) == Some(v))
                }
                _ => false,
            }
        }
        _ => obj.get(key) == Some(want),
    }))
}

fn apply_update(poi: &mut Poi, update: &PoiUpdate) -> MaterializerResult<()> {
    let mut value = serde_json::to_value(&*poi)?;
    let obj = value.as_object_mut().expect("Poi serializes to a JSON object");

    for (key, new_value) in &update.set {
        if key == "tags" {
            let entry = obj
                .entry("tags".to_string())
                .or_insert_with(|| Value::Object(serde_json::Map::new()));
            if let Some(existing) = entry.as_object_mut() {
                if let Some(incoming) = new_value.as_object() {
                    for (k, v) in incoming {
                        existing.insert(k.clone(), v.clone());
                    }
                }
            }
        } else {
            obj.insert(key.clone(), new_value.clone());
        }
    }

    *poi = serde_json::from_value(value)?;
    Ok(())
}

