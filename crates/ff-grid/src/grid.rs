//! The immutable `Grid` value and its on-disk asset-directory loader.
//!
//! # Data layout
//!
//! `semantic`, `walkable`, `cost`, and `feature_id` are flattened row-major
//! into `Vec`s of length `height * width`, indexed via [`Grid::idx`]. This
//! mirrors the upstream `.npy` layout directly — no transposition, no
//! re-tiling — so loading is a straight byte copy per array.

use std::collections::HashMap;
use std::path::Path;

use ff_core::{Cell, CellClass, GridOrigin, PoiCategory};
use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};
use crate::npy::read_npy;

// ── Poi ───────────────────────────────────────────────────────────────────────

/// A point of interest materialized onto a grid.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Poi {
    #[serde(rename = "type")]
    pub category: PoiCategory,
    pub iy: i32,
    pub ix: i32,
    #[serde(default)]
    pub snapped: Option<SnappedCell>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tags: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub lat: Option<f64>,
}

impl Poi {
    /// The POI's resolved cell: its snapped position if present, else its
    /// raw (possibly non-walkable) position.
    pub fn resolved_cell(&self) -> Cell {
        match self.snapped {
            Some(s) => Cell::new(s.iy, s.ix),
            None => Cell::new(self.iy, self.ix),
        }
    }

    /// `true` if the materializer tagged this POI as scenario-added (as
    /// opposed to present in the baseline asset directory).
    pub fn is_scenario_added(&self) -> bool {
        matches!(self.tags.get("origin"), Some(v) if v == "scenario")
    }
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct SnappedCell {
    pub iy: i32,
    pub ix: i32,
}

// ── Grid ──────────────────────────────────────────────────────────────────────

/// An immutable rasterized city grid plus its POI list.
///
/// Produced only by [`load_grid_dir`] or [`GridBuilder`]; once built it is
/// never mutated in place — the materializer and the doorway-carving step
/// both work on an owned copy.
#[derive(Clone, Debug)]
pub struct Grid {
    pub height: usize,
    pub width: usize,
    pub semantic: Vec<CellClass>,
    pub walkable: Vec<bool>,
    pub cost: Vec<u8>,
    pub feature_id: Vec<i32>,
    pub origin: GridOrigin,
    pub pois: Vec<Poi>,
}

impl Grid {
    #[inline]
    pub fn idx(&self, cell: Cell) -> Option<usize> {
        if cell.iy < 0 || cell.ix < 0 {
            return None;
        }
        let (iy, ix) = (cell.iy as usize, cell.ix as usize);
        if iy >= self.height || ix >= self.width {
            return None;
        }
        Some(iy * self.width + ix)
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        self.idx(cell).is_some()
    }

    #[inline]
    pub fn is_walkable(&self, cell: Cell) -> bool {
        self.idx(cell).map(|i| self.walkable[i]).unwrap_or(false)
    }

    #[inline]
    pub fn cost_at(&self, cell: Cell) -> Option<u8> {
        self.idx(cell).map(|i| self.cost[i])
    }

    #[inline]
    pub fn class_at(&self, cell: Cell) -> Option<CellClass> {
        self.idx(cell).map(|i| self.semantic[i])
    }

    #[inline]
    pub fn center(&self) -> Cell {
        Cell::new((self.height / 2) as i32, (self.width / 2) as i32)
    }

    /// `(iy, ix) = clamp(cell + (dy, dx))` into grid bounds.
    pub fn clamp_cell(&self, cell: Cell) -> Cell {
        Cell::new(
            cell.iy.clamp(0, self.height as i32 - 1),
            cell.ix.clamp(0, self.width as i32 - 1),
        )
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NavGraph {
    origin: (f64, f64),
    cell_m: f32,
}

/// Load and validate a scenario (or baseline) asset directory.
///
/// Reads `semantic.npy`, `walkable.npy`, `cost.npy`, `feature_id.npy`,
/// `navgraph.json`, and `pois.json`. Validates that all four grids agree on
/// shape and that every semantic byte is a recognized [`CellClass`].
pub fn load_grid_dir(dir: &Path) -> GridResult<Grid> {
    let semantic_path = dir.join("semantic.npy");
    let walkable_path = dir.join("walkable.npy");
    let cost_path = dir.join("cost.npy");
    let feature_path = dir.join("feature_id.npy");
    let navgraph_path = dir.join("navgraph.json");
    let pois_path = dir.join("pois.json");

    for (path, name) in [
        (&semantic_path, "semantic.npy"),
        (&walkable_path, "walkable.npy"),
        (&cost_path, "cost.npy"),
        (&feature_path, "feature_id.npy"),
        (&navgraph_path, "navgraph.json"),
        (&pois_path, "pois.json"),
    ] {
        if !path.exists() {
            return Err(GridError::MissingAsset(name.to_string()));
        }
    }

    let semantic_raw = read_npy(&semantic_path, "|u1")?;
    let walkable_raw = read_npy(&walkable_path, "|u1")?;
    let cost_raw = read_npy(&cost_path, "|u1")?;
    let feature_raw = read_npy(&feature_path, "<i4")?;

    let shape = semantic_raw.shape;
    for (raw_shape, what) in [
        (walkable_raw.shape, "walkable"),
        (cost_raw.shape, "cost"),
        (feature_raw.shape, "feature_id"),
    ] {
        if raw_shape != shape {
            return Err(GridError::ShapeMismatch {
                what: what.to_string(),
                got: raw_shape,
                expected: shape,
            });
        }
    }

    let semantic = semantic_raw
        .data
        .iter()
        .map(|&b| CellClass::from_u8(b).ok_or(GridError::ClassOutOfRange(b)))
        .collect::<Result<Vec<_>, _>>()?;
    let walkable = walkable_raw.data.iter().map(|&b| b != 0).collect();
    let cost = cost_raw.data;
    let feature_id = feature_raw
        .data
        .chunks_exact(4)
        .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    let navgraph: NavGraph = serde_json::from_reader(std::fs::File::open(&navgraph_path)?)?;
    let pois: Vec<Poi> = serde_json::from_reader(std::fs::File::open(&pois_path)?)?;

    Ok(Grid {
        height: shape.0,
        width: shape.1,
        semantic,
        walkable,
        cost,
        feature_id,
        origin: GridOrigin {
            x: navgraph.origin.0,
            y: navgraph.origin.1,
            cell_m: navgraph.cell_m,
        },
        pois,
    })
}

/// Write `pois` to `<dir>/pois.json`, used by the asset materializer to
/// persist a scenario's derived POI list.
pub fn write_pois(dir: &Path, pois: &[Poi]) -> GridResult<()> {
    let path = dir.join("pois.json");
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, pois)?;
    Ok(())
}

// ── GridBuilder ───────────────────────────────────────────────────────────────

/// Construct a [`Grid`] in-memory, for tests and for the asset materializer
/// (which clones an existing grid's arrays rather than building from
/// scratch, but shares this type).
pub struct GridBuilder {
    height: usize,
    width: usize,
    semantic: Vec<CellClass>,
    walkable: Vec<bool>,
    cost: Vec<u8>,
    feature_id: Vec<i32>,
    origin: GridOrigin,
}

impl GridBuilder {
    /// A `height x width` grid, fully walkable sidewalk with uniform cost 10.
    pub fn all_walkable(height: usize, width: usize) -> Self {
        let n = height * width;
        Self {
            height,
            width,
            semantic: vec![CellClass::Sidewalk; n],
            walkable: vec![true; n],
            cost: vec![10; n],
            feature_id: vec![-1; n],
            origin: GridOrigin { x: 0.0, y: 0.0, cell_m: 1.0 },
        }
    }

    pub fn set_walkable(&mut self, cell: Cell, walkable: bool) -> &mut Self {
        if let Some(i) = self.idx(cell) {
            self.walkable[i] = walkable;
            if !walkable {
                self.cost[i] = 255;
            }
        }
        self
    }

    pub fn set_cost(&mut self, cell: Cell, cost: u8) -> &mut Self {
        if let Some(i) = self.idx(cell) {
            self.cost[i] = cost;
        }
        self
    }

    pub fn set_class(&mut self, cell: Cell, class: CellClass) -> &mut Self {
        if let Some(i) = self.idx(cell) {
            self.semantic[i] = class;
        }
        self
    }

    fn idx(&self, cell: Cell) -> Option<usize> {
        if cell.iy < 0 || cell.ix < 0 {
            return None;
        }
        let (iy, ix) = (cell.iy as usize, cell.ix as usize);
        (iy < self.height && ix < self.width).then_some(iy * self.width + ix)
    }

    pub fn build(self) -> Grid {
        Grid {
            height: self.height,
            width: self.width,
            semantic: self.semantic,
            walkable: self.walkable,
            cost: self.cost,
            feature_id: self.feature_id,
            origin: self.origin,
            pois: Vec::new(),
        }
    }
}
