//! Terminal pixel surface and everything drawn on it.
//!
//! [`Surface`] turns the terminal into a small logical-pixel framebuffer
//! (one pixel = two character cells) with a current draw color, a base
//! offset and diff-based presentation. [`event`] maps terminal input to
//! backend-neutral events, [`text`] lays out bitmap-font strings and
//! [`view`] draws a game round.

pub mod event;
pub mod surface;
pub mod text;
pub mod view;

pub use event::{InputEvent, Key, KeyPress};
pub use surface::Surface;
pub use text::{draw_text, draw_text_at, measure, Anchor, TextStyle};
pub use view::GameView;
