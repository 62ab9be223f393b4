//! The active falling piece.

use pixfont_types::{BOARD_WIDTH, NUM_COLORS, NUM_SHAPES};

use crate::rng::SimpleRng;
use crate::shape::{shapes, Shape};

/// Spawn column of the 4x4 shape box.
pub const SPAWN_X: i32 = BOARD_WIDTH / 2 - 2;

/// A falling piece: shape, color index, rotation view and the board-space
/// position of its 4x4 box's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Falling {
    pub shape: &'static Shape,
    pub color: u8,
    pub view: usize,
    pub x: i32,
    pub y: i32,
}

impl Falling {
    /// Roll a fresh piece at the spawn position.
    ///
    /// A single random draw decides shape, color and initial rotation.
    pub fn random(rng: &mut SimpleRng) -> Self {
        let mut r = rng.next_u32();

        let shape = &shapes()[(r % NUM_SHAPES as u32) as usize];
        r /= NUM_SHAPES as u32;

        let color = (1 + r % NUM_COLORS) as u8;
        r /= NUM_COLORS;

        Self {
            shape,
            color,
            view: (r % 4) as usize,
            x: SPAWN_X,
            y: 0,
        }
    }

    /// Board coordinates of the occupied cells in the current view.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let view = self.shape.view(self.view);
        (0..4).flat_map(move |row| {
            (0..4).filter_map(move |col| {
                view[row][col].then_some((self.x + col as i32, self.y + row as i32))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_fields_in_range() {
        let mut rng = SimpleRng::new(42);
        for _ in 0..200 {
            let piece = Falling::random(&mut rng);
            assert!((1..=NUM_COLORS as u8).contains(&piece.color));
            assert!(piece.view < 4);
            assert_eq!(piece.x, SPAWN_X);
            assert_eq!(piece.y, 0);
        }
    }

    #[test]
    fn test_random_reaches_every_shape() {
        let mut rng = SimpleRng::new(7);
        let mut seen = [false; NUM_SHAPES];
        for _ in 0..500 {
            let piece = Falling::random(&mut rng);
            let index = shapes()
                .iter()
                .position(|s| std::ptr::eq(s, piece.shape))
                .unwrap();
            seen[index] = true;
        }
        assert!(seen.iter().all(|&s| s), "some shape never spawned: {:?}", seen);
    }

    #[test]
    fn test_cells_follow_position() {
        let piece = Falling {
            shape: &shapes()[0], // square
            color: 1,
            view: 0,
            x: 3,
            y: 5,
        };
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(3, 5), (4, 5), (3, 6), (4, 6)]);
    }

    #[test]
    fn test_cells_track_rotation_view() {
        let bar = Falling {
            shape: &shapes()[1],
            color: 2,
            view: 1,
            x: 0,
            y: 0,
        };
        let cells: Vec<_> = bar.cells().collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
    }
}
