//! Render a string with a font and wait.
//!
//! The quickest way to eyeball a font file after editing it.

use std::fs::File;

use anyhow::{Context, Result};

use pixfont::args::Args;
use pixfont::font::Font;
use pixfont::term::{draw_text, measure, InputEvent, Key, Surface, TextStyle};
use pixfont::types::{BLACK, WHITE};

const USAGE: &str = "\
fontdemo - draw a text sample with a font

USAGE:
    fontdemo -f FILE -t TEXT [-s SCALE]

TEXT may contain newlines. Any of q, Escape or Ctrl-C exits.
";

fn main() -> Result<()> {
    let args = Args::parse(
        &[("f", "file"), ("t", "text"), ("s", "scale")],
        &[("h", "help")],
    )?;
    if args.is_set("help") {
        print!("{}", USAGE);
        return Ok(());
    }
    let path = args.get("file").context("-f FILE is required")?;
    let text = args.get("text").context("-t TEXT is required")?.to_string();
    let scale = args.get_int("scale")?.unwrap_or(1).clamp(1, 16) as i32;

    let mut font = Font::new();
    let mut file = File::open(path).with_context(|| format!("opening {}", path))?;
    font.load(&mut file)?;

    let (rows, cols) = measure(&text);
    let mut surface = Surface::new(
        cols as i32 * font.width() as i32 * scale,
        rows as i32 * font.height() as i32 * scale,
    );
    surface.enter("fontdemo")?;

    let outcome = (|| -> Result<()> {
        surface.with_color(BLACK).clear();
        let mut pen = surface.with_color(WHITE);
        draw_text(
            &mut pen,
            &font,
            &text,
            &TextStyle {
                scale,
                ..TextStyle::default()
            },
        );
        drop(pen);
        surface.present()?;

        loop {
            match surface.wait_input()? {
                InputEvent::Quit => return Ok(()),
                InputEvent::Key(press) => match press.key {
                    Key::Char('q') | Key::Escape => return Ok(()),
                    _ => {}
                },
            }
        }
    })();

    surface.exit()?;
    outcome
}
