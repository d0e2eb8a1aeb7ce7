//! Unit tests for ff-grid.
//!
//! Pathfinder and npy-reader tests live beside the code they exercise; this
//! module covers `Grid` and the asset-directory loader end to end.

#[cfg(test)]
mod grid_basics {
    use ff_core::{Cell, CellClass};

    use crate::grid::GridBuilder;

    #[test]
    fn walkable_implies_cost_below_blocked() {
        let grid = GridBuilder::all_walkable(4, 4).build();
        for i in 0..grid.walkable.len() {
            if grid.walkable[i] {
                assert!(grid.cost[i] < 255);
            }
        }
    }

    #[test]
    fn out_of_bounds_is_never_walkable() {
        let grid = GridBuilder::all_walkable(3, 3).build();
        assert!(!grid.is_walkable(Cell::new(-1, 0)));
        assert!(!grid.is_walkable(Cell::new(3, 0)));
    }

    #[test]
    fn center_and_clamp() {
        let grid = GridBuilder::all_walkable(5, 7).build();
        assert_eq!(grid.center(), Cell::new(2, 3));
        assert_eq!(grid.clamp_cell(Cell::new(-5, 100)), Cell::new(0, 6));
    }

    #[test]
    fn set_class_round_trips() {
        let mut b = GridBuilder::all_walkable(2, 2);
        b.set_class(Cell::new(0, 0), CellClass::Plaza);
        let grid = b.build();
        assert_eq!(grid.class_at(Cell::new(0, 0)), Some(CellClass::Plaza));
    }
}

#[cfg(test)]
mod loader {
    use std::io::Write;

    use crate::grid::{load_grid_dir, Poi};
    use crate::error::GridError;

    fn write_npy_u8(path: &std::path::Path, shape: (usize, usize), data: &[u8]) {
        let header = format!(
            "{{'descr': '|u1', 'fortran_order': False, 'shape': ({}, {}), }}",
            shape.0, shape.1
        );
        let mut padded = header.into_bytes();
        while (10 + padded.len() + 1) % 64 != 0 {
            padded.push(b' ');
        }
        padded.push(b'\n');
        let mut buf = Vec::new();
        buf.extend_from_slice(b"\x93NUMPY");
        buf.push(1);
        buf.push(0);
        buf.extend_from_slice(&(padded.len() as u16).to_le_bytes());
        buf.extend_from_slice(&padded);
        buf.extend_from_slice(data);
        std::fs::File::create(path).unwrap().write_all(&buf).unwrap();
    }

    fn write_npy_i32(path: &std::path::Path, shape: (usize, usize), data: &[i32]) {
        let header = format!(
            "{{'descr': '<i4', 'fortran_order': False, 'shape': ({}, {}), }}",
            shape.0, shape.1
        );
        let mut padded = header.into_bytes();
        while (10 + padded.len() + 1) % 64 != 0 {
            padded.push(b' ');
        }
        padded.push(b'\n');
        let mut buf = Vec::new();
        buf.extend_from_slice(b"\x93NUMPY");
        buf.push(1);
        buf.push(0);
        buf.extend_from_slice(&(padded.len() as u16).to_le_bytes());
        buf.extend_from_slice(&padded);
        for v in data {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        std::fs::File::create(path).unwrap().write_all(&buf).unwrap();
    }

    fn fixture_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("ff-grid-test-{name}"));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn loads_a_minimal_asset_directory() {
        let dir = fixture_dir("minimal");
        write_npy_u8(&dir.join("semantic.npy"), (2, 2), &[2, 2, 2, 2]);
        write_npy_u8(&dir.join("walkable.npy"), (2, 2), &[1, 1, 1, 1]);
        write_npy_u8(&dir.join("cost.npy"), (2, 2), &[10, 10, 10, 10]);
        write_npy_i32(&dir.join("feature_id.npy"), (2, 2), &[-1, -1, -1, -1]);
        std::fs::write(
            dir.join("navgraph.json"),
            r#"{"origin": [0.0, 0.0], "cell_m": 1.0}"#,
        )
        .unwrap();
        std::fs::write(dir.join("pois.json"), "[]").unwrap();

        let grid = load_grid_dir(&dir).unwrap();
        assert_eq!(grid.height, 2);
        assert_eq!(grid.width, 2);
        assert_eq!(grid.pois.len(), 0);
    }

    #[test]
    fn rejects_shape_mismatch() {
        let dir = fixture_dir("shape-mismatch");
        write_npy_u8(&dir.join("semantic.npy"), (2, 2), &[2, 2, 2, 2]);
        write_npy_u8(&dir.join("walkable.npy"), (1, 2), &[1, 1]);
        write_npy_u8(&dir.join("cost.npy"), (2, 2), &[10, 10, 10, 10]);
        write_npy_i32(&dir.join("feature_id.npy"), (2, 2), &[-1, -1, -1, -1]);
        std::fs::write(
            dir.join("navgraph.json"),
            r#"{"origin": [0.0, 0.0], "cell_m": 1.0}"#,
        )
        .unwrap();
        std::fs::write(dir.join("pois.json"), "[]").unwrap();

        let err = load_grid_dir(&dir).unwrap_err();
        assert!(matches!(err, GridError::ShapeMismatch { .. }));
    }

    #[test]
    fn rejects_unknown_semantic_class() {
        let dir = fixture_dir("bad-class");
        write_npy_u8(&dir.join("semantic.npy"), (1, 1), &[200]);
        write_npy_u8(&dir.join("walkable.npy"), (1, 1), &[1]);
        write_npy_u8(&dir.join("cost.npy"), (1, 1), &[10]);
        write_npy_i32(&dir.join("feature_id.npy"), (1, 1), &[-1]);
        std::fs::write(
            dir.join("navgraph.json"),
            r#"{"origin": [0.0, 0.0], "cell_m": 1.0}"#,
        )
        .unwrap();
        std::fs::write(dir.join("pois.json"), "[]").unwrap();

        let err = load_grid_dir(&dir).unwrap_err();
        assert!(matches!(err, GridError::ClassOutOfRange(200)));
    }

    #[test]
    fn reports_missing_asset() {
        let dir = fixture_dir("missing");
        let err = load_grid_dir(&dir).unwrap_err();
        assert!(matches!(err, GridError::MissingAsset(_)));
    }

    #[test]
    fn poi_json_roundtrip() {
        let json = r#"{"type": "cafe", "iy": 3, "ix": 4, "snapped": {"iy": 3, "ix": 5}}"#;
        let poi: Poi = serde_json::from_str(json).unwrap();
        assert_eq!(poi.resolved_cell(), ff_core::Cell::new(3, 5));
    }
}
