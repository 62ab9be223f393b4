//! Maps a game round onto a surface.
//!
//! Pure pixel-buffer work, no terminal I/O, so it is unit-testable. The
//! layout mirrors the classic arrangement: the well on the left, a gray
//! separator column, then a panel with the next piece and the score.

use pixfont_font::Font;
use pixfont_game::{Falling, Game};
use pixfont_types::{color_for, BLACK, BOARD_HEIGHT, BOARD_WIDTH, WHITE};

use crate::surface::Surface;
use crate::text::{draw_text, TextStyle};

/// Side of a block square relative to its cell.
const BLOCK_FILL: f32 = 0.875;

/// Panel width in board cells; wide enough for the scoreboard screen's
/// longest text line at font scale 1.
const PANEL_CELLS: i32 = 12;

/// Board column where the next-piece preview sits.
const PREVIEW_X: i32 = BOARD_WIDTH + 2;

pub struct GameView {
    /// Board cell size in surface pixels.
    cell: i32,
}

impl GameView {
    pub fn new(cell: i32) -> Self {
        Self { cell: cell.max(1) }
    }

    /// Surface dimensions this view needs, in logical pixels.
    pub fn surface_size(&self) -> (i32, i32) {
        (
            (BOARD_WIDTH + 1 + PANEL_CELLS) * self.cell,
            BOARD_HEIGHT * self.cell,
        )
    }

    /// Font scale used for the score readout.
    pub fn font_scale(&self) -> i32 {
        (self.cell / 4).max(1)
    }

    /// Draw the whole frame: background, settled cells, separator, falling
    /// piece, preview and score.
    pub fn render(&self, game: &Game, surface: &mut Surface, font: &Font) {
        surface.with_color(BLACK).clear();

        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                if let Some(color) = game.board().cell(x, y).filter(|&c| c != 0) {
                    self.block(surface, x, y, color);
                }
            }
        }

        for y in 0..BOARD_HEIGHT {
            self.block(surface, BOARD_WIDTH, y, 0);
        }

        if let Some(piece) = game.falling() {
            self.piece(surface, piece, piece.x, piece.y);
        }
        self.piece(surface, game.next_piece(), PREVIEW_X, 0);

        let score = format!("{:>4}", game.score());
        let mut panel = surface.with_origin((
            (BOARD_WIDTH + 1) * self.cell,
            (BOARD_HEIGHT - 4) * self.cell,
        ));
        let mut pen = panel.with_color(WHITE);
        draw_text(
            &mut pen,
            font,
            &score,
            &TextStyle {
                scale: self.font_scale(),
                ..TextStyle::default()
            },
        );
    }

    /// One board cell as an inset square in the cell's display color.
    fn block(&self, surface: &mut Surface, x: i32, y: i32, color: u8) {
        surface
            .with_color(color_for(color as u32))
            .pix_put_inset(x, y, self.cell, BLOCK_FILL);
    }

    /// A piece's occupied cells drawn with its box anchored at `(x, y)`.
    fn piece(&self, surface: &mut Surface, piece: &Falling, x: i32, y: i32) {
        let moved = Falling {
            x,
            y,
            ..*piece
        };
        for (cx, cy) in moved.cells() {
            self.block(surface, cx, cy, piece.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixfont_types::GRAY;

    fn fresh() -> (GameView, Surface, Font, Game) {
        let view = GameView::new(2);
        let (w, h) = view.surface_size();
        (view, Surface::new(w, h), Font::builtin(), Game::new(1, 5))
    }

    #[test]
    fn test_surface_size_scales_with_cell() {
        assert_eq!(GameView::new(2).surface_size(), (46, 40));
        assert_eq!(GameView::new(4).surface_size(), (92, 80));
    }

    #[test]
    fn test_render_draws_separator_column() {
        let (view, mut surface, font, game) = fresh();
        view.render(&game, &mut surface, &font);

        // Separator cells are gray insets at board column BOARD_WIDTH.
        // At cell size 2 and fill 0.875 the inset square is the cell's
        // top-left pixel.
        for y in 0..BOARD_HEIGHT {
            assert_eq!(surface.pixel(BOARD_WIDTH * 2, y * 2), Some(GRAY));
        }
    }

    #[test]
    fn test_render_draws_settled_cells() {
        let (view, mut surface, font, mut game) = fresh();

        // Drop the active piece onto the floor; the armed clock locks it on
        // the next tick and the board keeps its cells.
        game.hard_drop();
        game.tick();
        view.render(&game, &mut surface, &font);

        let lit = (0..BOARD_HEIGHT * 2)
            .flat_map(|y| (0..BOARD_WIDTH * 2).map(move |x| (x, y)))
            .filter(|&(x, y)| {
                surface.pixel(x, y).map_or(false, |p| p != BLACK && p != GRAY)
            })
            .count();
        assert!(lit > 0, "locked cells must be visible");
    }

    #[test]
    fn test_render_shows_preview_in_panel() {
        let (view, mut surface, font, game) = fresh();
        view.render(&game, &mut surface, &font);

        let panel_lit = (0..8)
            .flat_map(|y| (PREVIEW_X * 2..(PREVIEW_X + 4) * 2).map(move |x| (x, y)))
            .filter(|&(x, y)| surface.pixel(x, y).map_or(false, |p| p != BLACK))
            .count();
        assert!(panel_lit > 0, "next piece must appear in the panel");
    }

    #[test]
    fn test_render_restores_surface_state() {
        let (view, mut surface, font, game) = fresh();
        surface.set_color(WHITE);
        surface.set_origin((5, 5));
        view.render(&game, &mut surface, &font);
        assert_eq!(surface.color(), WHITE);
        assert_eq!(surface.origin(), (5, 5));
    }
}
