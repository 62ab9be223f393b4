//! Pad or crop glyph margins.
//!
//! Writes a new font whose glyphs are the input's shifted by the requested
//! margins; negative margins crop.

use std::fs::File;

use anyhow::{bail, Context, Result};

use pixfont::args::Args;
use pixfont::font::{Font, NUM_GLYPHS};

const USAGE: &str = "\
fontpad - grow or shrink glyph margins

USAGE:
    fontpad -i IN -o OUT [-l N] [-r N] [-u N] [-d N]

Each margin defaults to 0; negative values crop that side.
";

fn main() -> Result<()> {
    let args = Args::parse(
        &[
            ("i", "in"),
            ("o", "out"),
            ("l", "left"),
            ("r", "right"),
            ("u", "up"),
            ("d", "down"),
        ],
        &[("h", "help")],
    )?;
    if args.is_set("help") {
        print!("{}", USAGE);
        return Ok(());
    }
    let in_path = args.get("in").context("-i IN is required")?;
    let out_path = args.get("out").context("-o OUT is required")?;

    let mut input = Font::new();
    let mut file = File::open(in_path).with_context(|| format!("opening {}", in_path))?;
    input.load(&mut file)?;

    let left = args.get_int("left")?.unwrap_or(0) as i32;
    let right = args.get_int("right")?.unwrap_or(0) as i32;
    let up = args.get_int("up")?.unwrap_or(0) as i32;
    let down = args.get_int("down")?.unwrap_or(0) as i32;

    let in_w = input.width() as i32;
    let in_h = input.height() as i32;
    let out_w = in_w + left + right;
    let out_h = in_h + up + down;
    if out_w < 0 || out_h < 0 {
        bail!("margins crop the font below zero size ({}x{})", out_w, out_h);
    }

    let mut output = Font::new();
    output.init(out_w as usize, out_h as usize)?;

    // Copy the overlap of the input grid and the shifted output grid.
    let from_x = 0.max(-left);
    let from_y = 0.max(-up);
    let to_x = in_w.min(out_w - left);
    let to_y = in_h.min(out_h - up);

    for glyph in 0..NUM_GLYPHS {
        for x in from_x..to_x {
            for y in from_y..to_y {
                output.set(
                    glyph,
                    (x + left) as usize,
                    (y + up) as usize,
                    input.get(glyph, x as usize, y as usize),
                );
            }
        }
    }

    let mut file = File::create(out_path).with_context(|| format!("writing {}", out_path))?;
    output.store(&mut file)?;
    Ok(())
}
