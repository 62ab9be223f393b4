//! Piece shapes.
//!
//! Each of the seven shapes is authored once as a 4x4 ASCII pattern and
//! expanded at table-build time into four views, one per 90-degree turn.
//! Every view is normalized so its occupied cells touch the top-left of the
//! 4x4 box, which keeps collision math free of per-shape offset tables.

use std::sync::OnceLock;

use pixfont_types::NUM_SHAPES;

/// One 4x4 occupancy grid, indexed `[row][col]`.
pub type View = [[bool; 4]; 4];

/// A piece shape with its four pre-rotated views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    views: [View; 4],
}

impl Shape {
    /// Build a shape from a hand-authored pattern: `'0'` occupied, space
    /// empty. View `v+1` is view `v` rotated 90 degrees clockwise.
    fn from_pattern(rows: [&str; 4]) -> Self {
        let mut grid = parse_pattern(rows);
        let mut views = [[[false; 4]; 4]; 4];
        for view in &mut views {
            *view = normalize(&grid);
            grid = rotate_cw(&grid);
        }
        Self { views }
    }

    /// The occupancy grid for rotation index `v` (0..=3).
    pub fn view(&self, v: usize) -> &View {
        &self.views[v % 4]
    }
}

fn parse_pattern(rows: [&str; 4]) -> View {
    let mut grid = [[false; 4]; 4];
    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().take(4).enumerate() {
            grid[y][x] = ch == '0';
        }
    }
    grid
}

/// Rotate a view 90 degrees clockwise: `(x, y)` maps to row `3-x`, col `y`.
fn rotate_cw(view: &View) -> View {
    let mut out = [[false; 4]; 4];
    for (y, row) in view.iter().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            out[3 - x][y] = cell;
        }
    }
    out
}

/// Shift the occupied cells so the top-most and left-most occupied row and
/// column land at index 0. An empty view is returned unchanged.
fn normalize(view: &View) -> View {
    let mut min_y = None;
    let mut min_x = None;
    for (y, row) in view.iter().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            if cell {
                min_y = Some(min_y.map_or(y, |m: usize| m.min(y)));
                min_x = Some(min_x.map_or(x, |m: usize| m.min(x)));
            }
        }
    }
    let (Some(min_y), Some(min_x)) = (min_y, min_x) else {
        return *view;
    };

    let mut out = [[false; 4]; 4];
    for y in min_y..4 {
        for x in min_x..4 {
            out[y - min_y][x - min_x] = view[y][x];
        }
    }
    out
}

#[rustfmt::skip]
const PATTERNS: [[&str; 4]; NUM_SHAPES] = [
    ["00  ",
     "00  ",
     "    ",
     "    "],
    ["0   ",
     "0   ",
     "0   ",
     "0   "],
    ["000 ",
     " 0  ",
     "    ",
     "    "],
    [" 00 ",
     "00  ",
     "    ",
     "    "],
    ["00  ",
     " 00 ",
     "    ",
     "    "],
    ["0   ",
     "000 ",
     "    ",
     "    "],
    ["  0 ",
     "000 ",
     "    ",
     "    "],
];

/// The process-wide shape table, built on first use and never mutated.
pub fn shapes() -> &'static [Shape; NUM_SHAPES] {
    static SHAPES: OnceLock<[Shape; NUM_SHAPES]> = OnceLock::new();
    SHAPES.get_or_init(|| PATTERNS.map(Shape::from_pattern))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(view: &View) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for (y, row) in view.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_every_view_has_four_cells() {
        for shape in shapes() {
            for v in 0..4 {
                assert_eq!(cells(shape.view(v)).len(), 4);
            }
        }
    }

    #[test]
    fn test_every_view_is_normalized() {
        for shape in shapes() {
            for v in 0..4 {
                let cells = cells(shape.view(v));
                assert!(cells.iter().any(|&(x, _)| x == 0), "view {} not left-anchored", v);
                assert!(cells.iter().any(|&(_, y)| y == 0), "view {} not top-anchored", v);
            }
        }
    }

    #[test]
    fn test_rotating_four_times_is_identity() {
        for pattern in PATTERNS {
            let grid = parse_pattern(pattern);
            let mut rotated = grid;
            for _ in 0..4 {
                rotated = rotate_cw(&rotated);
            }
            assert_eq!(rotated, grid);
        }
    }

    #[test]
    fn test_distinct_view_counts_match_symmetry() {
        // Square: 1 distinct view. Bar and the two skews: 2. The rest: 4.
        let expected = [1usize, 2, 4, 2, 2, 4, 4];
        for (shape, &want) in shapes().iter().zip(&expected) {
            let mut distinct: Vec<&View> = Vec::new();
            for v in 0..4 {
                if !distinct.contains(&shape.view(v)) {
                    distinct.push(shape.view(v));
                }
            }
            assert_eq!(distinct.len(), want);
        }
    }

    #[test]
    fn test_bar_alternates_vertical_horizontal() {
        let bar = &shapes()[1];
        assert_eq!(cells(bar.view(0)), vec![(0, 0), (0, 1), (0, 2), (0, 3)]);
        assert_eq!(cells(bar.view(1)), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
        assert_eq!(bar.view(2), bar.view(0));
        assert_eq!(bar.view(3), bar.view(1));
    }

    #[test]
    fn test_t_rotation_sequence() {
        // 000      0       0      0
        //  0   ->  00  -> 000 ->  00
        //          0              0  (normalized, reading cells row-major)
        let t = &shapes()[2];
        assert_eq!(cells(t.view(0)), vec![(0, 0), (1, 0), (2, 0), (1, 1)]);
        assert_eq!(cells(t.view(1)), vec![(0, 0), (0, 1), (1, 1), (0, 2)]);
        assert_eq!(cells(t.view(2)), vec![(1, 0), (0, 1), (1, 1), (2, 1)]);
        assert_eq!(cells(t.view(3)), vec![(1, 0), (0, 1), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_view_index_wraps() {
        let shape = &shapes()[0];
        assert_eq!(shape.view(4), shape.view(0));
        assert_eq!(shape.view(7), shape.view(3));
    }
}
