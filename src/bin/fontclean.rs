//! Erase every glyph not in a keep-set.
//!
//! Useful after editing: wipe the stray experiments, keep the characters the
//! font is actually for.

use std::fs::File;

use anyhow::{Context, Result};

use pixfont::args::Args;
use pixfont::font::{Font, NUM_GLYPHS};

const USAGE: &str = "\
fontclean - blank all glyphs outside a keep-set

USAGE:
    fontclean -f FILE -x KEEP

KEEP is the string of characters whose glyphs survive; every other glyph is
zeroed. The file is rewritten in place.
";

fn main() -> Result<()> {
    let args = Args::parse(&[("f", "file"), ("x", "except")], &[("h", "help")])?;
    if args.is_set("help") {
        print!("{}", USAGE);
        return Ok(());
    }
    let path = args.get("file").context("-f FILE is required")?;
    let keep = args.get("except").unwrap_or("");

    let mut font = Font::new();
    let mut file = File::open(path).with_context(|| format!("opening {}", path))?;
    font.load(&mut file)?;

    for glyph in 0..NUM_GLYPHS {
        if !keep.chars().any(|c| c as usize == glyph) {
            font.erase(glyph);
        }
    }

    let mut file = File::create(path).with_context(|| format!("rewriting {}", path))?;
    font.store(&mut file)?;
    Ok(())
}
