//! Grid-cell coordinates and the geographic anchor carried alongside a grid.
//!
//! Cell resolution below the chosen `cell_m` is out of scope for this
//! simulation — `GridOrigin` exists only so a cell index can be converted
//! back to a mercator coordinate for display or export, never as an input to
//! pathfinding or distance comparisons (those operate purely in cell space).

/// A cell coordinate in a grid, row-major (`iy` = row, `ix` = column).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub iy: i32,
    pub ix: i32,
}

impl Cell {
    #[inline]
    pub fn new(iy: i32, ix: i32) -> Self {
        Self { iy, ix }
    }

    /// Chebyshev (8-connected king-move) distance between two cells.
    #[inline]
    pub fn chebyshev(self, other: Cell) -> i32 {
        (self.iy - other.iy).abs().max((self.ix - other.ix).abs())
    }

    /// Octile distance: straight step costs 1, diagonal step costs √2.
    /// Used as the A* heuristic.
    #[inline]
    pub fn octile(self, other: Cell) -> f64 {
        let dy = (self.iy - other.iy).unsigned_abs() as f64;
        let dx = (self.ix - other.ix).unsigned_abs() as f64;
        let (lo, hi) = if dy < dx { (dy, dx) } else { (dx, dy) };
        const SQRT2: f64 = std::f64::consts::SQRT_2;
        hi - lo + SQRT2 * lo
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.iy, self.ix)
    }
}

/// Geographic anchor for a grid: mercator `(x, y)` of cell `(0, 0)` plus the
/// size of one cell in meters.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridOrigin {
    pub x: f64,
    pub y: f64,
    pub cell_m: f32,
}

impl GridOrigin {
    /// Mercator coordinate of a cell's center, given the anchor at `(0, 0)`.
    pub fn cell_to_mercator(self, cell: Cell) -> (f64, f64) {
        let m = self.cell_m as f64;
        (self.x + cell.ix as f64 * m, self.y + cell.iy as f64 * m)
    }
}
