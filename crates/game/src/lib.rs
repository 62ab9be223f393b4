//! Falling-block game core.
//!
//! Pure, deterministic game rules with no I/O or rendering dependencies:
//!
//! - [`shape`]: the seven piece shapes, pre-rotated into four views
//! - [`board`]: the cell grid with collision and row-clear logic
//! - [`falling`]: the active piece and its pseudo-random generation
//! - [`game`]: one round's state machine (gravity clock, moves, scoring)
//! - [`scoreboard`]: the persisted top-N name/score list
//!
//! Rendering and input live elsewhere; a frontend polls events, calls the
//! move operations, ticks the game at a fixed cadence and draws the
//! accessors' state.

pub mod board;
pub mod falling;
pub mod game;
pub mod rng;
pub mod scoreboard;
pub mod shape;

pub use board::Board;
pub use falling::{Falling, SPAWN_X};
pub use game::{Game, TickResult};
pub use rng::SimpleRng;
pub use scoreboard::{sanitize_name, Entry, Scoreboard};
pub use shape::{shapes, Shape};
