//! Workspace facade.
//!
//! The binaries and integration tests reach every member crate through this
//! package; the implementation lives in dedicated crates under `crates/`.

pub mod args;

pub use pixfont_font as font;
pub use pixfont_game as game;
pub use pixfont_term as term;
pub use pixfont_types as types;
