//! One round of the falling-block game.
//!
//! The round owns the board, the active and next pieces and the gravity
//! clock. A frontend calls the move operations in response to input and
//! [`Game::tick`] once per frame; everything else (rendering cadence, modal
//! screens, persistence) stays outside.

use arrayvec::ArrayVec;
use pixfont_types::{gravity_period, FLASH_TICKS};

use crate::board::Board;
use crate::falling::Falling;
use crate::rng::SimpleRng;

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// Nothing moved this tick.
    Idle,
    /// Gravity pulled the piece down one row.
    Fell,
    /// The piece fused into the board; `cleared` full rows were blanked.
    Locked { cleared: usize },
    /// Blanked rows finished flashing and collapsed; the next piece is live.
    Collapsed,
    /// The round has ended.
    Over,
}

/// Round state.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    falling: Option<Falling>,
    next: Falling,
    rng: SimpleRng,
    difficulty: u8,
    period: u32,
    clock: u32,
    score: u32,
    flash: u8,
    blanked: ArrayVec<usize, 4>,
    over: bool,
}

impl Game {
    /// Start a round at the given difficulty with a seeded piece stream.
    pub fn new(difficulty: u8, seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = Falling::random(&mut rng);
        let mut game = Self {
            board: Board::new(),
            falling: None,
            next,
            rng,
            difficulty,
            period: gravity_period(difficulty),
            clock: 0,
            score: 0,
            flash: 0,
            blanked: ArrayVec::new(),
            over: false,
        };
        game.spawn();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn falling(&self) -> Option<&Falling> {
        self.falling.as_ref()
    }

    pub fn next_piece(&self) -> &Falling {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Promote the prepared next piece and roll its successor. A spawn onto
    /// occupied cells ends the round (the overlapping piece stays visible).
    fn spawn(&mut self) {
        let piece = self.next;
        self.next = Falling::random(&mut self.rng);
        if self.board.collides(&piece) {
            self.over = true;
        }
        self.falling = Some(piece);
    }

    /// Move one column left; a colliding move is silently dropped.
    pub fn move_left(&mut self) {
        self.shift(-1);
    }

    /// Move one column right; a colliding move is silently dropped.
    pub fn move_right(&mut self) {
        self.shift(1);
    }

    fn shift(&mut self, dx: i32) {
        if self.over {
            return;
        }
        let Some(mut piece) = self.falling else {
            return;
        };
        piece.x += dx;
        if !self.board.collides(&piece) {
            self.falling = Some(piece);
        }
    }

    /// Turn clockwise to the next view; a colliding turn is silently
    /// dropped. There is no kick search, the only fallback is staying put.
    pub fn rotate(&mut self) {
        if self.over {
            return;
        }
        let Some(mut piece) = self.falling else {
            return;
        };
        piece.view = (piece.view + 1) % 4;
        if !self.board.collides(&piece) {
            self.falling = Some(piece);
        }
    }

    /// Drop to the lowest open row and arm an immediate lock: the clock is
    /// zeroed so the very next tick's descent attempt fuses the piece. A
    /// piece already resting just gets the lock armed.
    pub fn hard_drop(&mut self) {
        if self.over {
            return;
        }
        let Some(mut piece) = self.falling else {
            return;
        };

        piece.y += 1;
        if !self.board.collides(&piece) {
            loop {
                piece.y += 1;
                if self.board.collides(&piece) {
                    break;
                }
            }
        }
        piece.y -= 1;

        self.falling = Some(piece);
        self.clock = 0;
    }

    /// Advance the round by one frame.
    ///
    /// While blanked rows are flashing the board is frozen; the flash runs
    /// out, the rows collapse and the next piece spawns. Otherwise gravity
    /// fires whenever the clock wraps: the piece descends one row, or locks
    /// where it stands when the row below is taken.
    pub fn tick(&mut self) -> TickResult {
        if self.over {
            return TickResult::Over;
        }

        if self.flash > 0 {
            self.flash -= 1;
            if self.flash > 0 {
                return TickResult::Idle;
            }
            let rows = std::mem::take(&mut self.blanked);
            self.board.collapse(&rows);
            self.spawn();
            return if self.over {
                TickResult::Over
            } else {
                TickResult::Collapsed
            };
        }

        let mut result = TickResult::Idle;
        if self.clock == 0 {
            if let Some(piece) = self.falling {
                let mut moved = piece;
                moved.y += 1;
                if self.board.collides(&moved) {
                    result = TickResult::Locked {
                        cleared: self.lock(piece),
                    };
                } else {
                    self.falling = Some(moved);
                    result = TickResult::Fell;
                }
            }
        }
        self.clock = (self.clock + 1) % self.period;

        if self.over {
            TickResult::Over
        } else {
            result
        }
    }

    /// Fuse the piece into the board and blank any completed rows.
    ///
    /// Clearing `k` rows scores `k*k` plus the difficulty bonus. When rows
    /// cleared, the collapse is deferred for the flash; otherwise the next
    /// piece spawns immediately.
    fn lock(&mut self, piece: Falling) -> usize {
        self.falling = None;
        self.board.land(&piece);

        let rows = self.board.blank_full_rows();
        let cleared = rows.len();
        if cleared > 0 {
            self.score += (cleared * cleared) as u32 + self.difficulty as u32;
            self.blanked = rows;
            self.flash = FLASH_TICKS;
        } else {
            self.spawn();
        }
        cleared
    }
}
