//! Per-cell placement — everything an element needs, derived from one
//! fraction `r`.
//!
//! Each cell draws a single `r ∈ [0, 1)` and every attribute is a fixed
//! transform of it. Attributes are therefore correlated (the same `r`
//! drives asset and rotation), which is fine for a decorative texture and
//! keeps the output reproducible.

/// Jitter added to the cell center on each axis, in logical units.
pub const JITTER: f64 = 15.0;

/// Scale range is `[SCALE_MIN, SCALE_MIN + 0.3)`.
pub const SCALE_MIN: f64 = 0.4;

/// Where and how one grid cell's element is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub asset_index: usize,
    pub color_index: usize,
    pub x: f64,
    pub y: f64,
    /// Whole degrees in [0, 360).
    pub rotation: u32,
    pub scale: f64,
}

/// Grid cell being placed, with the shape of the grid it sits in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    pub size: f64,
}

impl Cell {
    fn center(self) -> (f64, f64) {
        (
            f64::from(self.col) * self.size + self.size / 2.0,
            f64::from(self.row) * self.size + self.size / 2.0,
        )
    }
}

/// Derive a placement from the cell fraction `r`.
///
/// `asset_count` and `color_count` must be non-zero.
#[must_use]
pub fn place(r: f64, cell: Cell, asset_count: usize, color_count: usize) -> Placement {
    let asset_index = ((r * asset_count as f64).floor() as usize).min(asset_count - 1);
    let color_index = ((r * 7919.0) % color_count as f64).floor() as usize;
    let color_index = color_index.min(color_count - 1);

    let offset_x = (r * 1000.0) % (2.0 * JITTER) - JITTER;
    let offset_y = (r * 2000.0) % (2.0 * JITTER) - JITTER;
    let (cx, cy) = cell.center();

    let rotation = ((r * 3000.0) % 360.0).floor() as u32;
    let scale = SCALE_MIN + ((r * 5000.0) % 30.0) / 100.0;

    Placement {
        asset_index,
        color_index,
        x: cx + offset_x,
        y: cy + offset_y,
        rotation,
        scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CELL: f64 = 100.0;

    fn cell(row: u32, col: u32) -> Cell {
        Cell { row, col, size: CELL }
    }

    #[test]
    fn known_fraction_first_cell() {
        // First cell of seed 12345: r = 126503 / 233280.
        let r = 126_503.0 / 233_280.0;
        let p = place(r, cell(0, 0), 5, 6);
        assert_eq!(p.asset_index, 2);
        assert_eq!(p.color_index, 4);
        assert_eq!(p.rotation, 186);
        assert_eq!(p.x.to_string(), "37.2796639231824");
        assert_eq!(p.y.to_string(), "39.559327846364795");
        assert_eq!(p.scale.to_string(), "0.5139831961591199");
    }

    #[test]
    fn known_fraction_second_cell() {
        let r = 233_052.0 / 233_280.0;
        let p = place(r, cell(0, 1), 5, 6);
        assert_eq!(p.asset_index, 4);
        assert_eq!(p.color_index, 3);
        assert_eq!(p.rotation, 117);
        assert_eq!(p.x.to_string(), "144.02263374485597");
        assert_eq!(p.y.to_string(), "53.04526748971193");
    }

    #[test]
    fn zero_fraction_is_cell_center_minus_jitter() {
        let p = place(0.0, cell(2, 3), 5, 6);
        assert_eq!(p.asset_index, 0);
        assert_eq!(p.color_index, 0);
        assert_eq!(p.rotation, 0);
        assert!((p.x - (350.0 - JITTER)).abs() < 1e-12);
        assert!((p.y - (250.0 - JITTER)).abs() < 1e-12);
        assert!((p.scale - SCALE_MIN).abs() < 1e-12);
    }

    #[test]
    fn attributes_stay_in_bounds() {
        for i in 0..233_280u32 {
            if i % 97 != 0 {
                continue;
            }
            let r = f64::from(i) / 233_280.0;
            let c = cell(1, 1);
            let p = place(r, c, 5, 6);
            assert!(p.asset_index < 5);
            assert!(p.color_index < 6);
            assert!(p.rotation < 360);
            assert!((SCALE_MIN..SCALE_MIN + 0.3).contains(&p.scale), "scale {}", p.scale);
            assert!((p.x - 150.0).abs() <= JITTER, "x {}", p.x);
            assert!((p.y - 150.0).abs() <= JITTER, "y {}", p.y);
        }
    }
}
