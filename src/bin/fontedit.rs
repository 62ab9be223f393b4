//! Interactive glyph editor.
//!
//! Two modes, switched with Enter/Escape: in select mode typing a character
//! picks the glyph to edit and Delete wipes it; in edit mode the arrows move
//! the pixel cursor, Space or Enter flips the pixel under it, and holding
//! Shift while moving paints along the way. The font is written back to the
//! file on exit.

use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Result};

use pixfont::args::Args;
use pixfont::font::Font;
use pixfont::term::{InputEvent, Key, Surface};
use pixfont::types::{Rgb, BLACK, WHITE};

const USAGE: &str = "\
fontedit - bitmap glyph editor

USAGE:
    fontedit -f FILE [-w WIDTH -h HEIGHT] [-s SCALE]

A missing FILE is created with the given glyph dimensions; an existing one
is loaded and its dimensions win. The font is saved on exit.
";

struct Editor {
    font: Font,
    cell: i32,
    edit_mode: bool,
    glyph: usize,
    x: usize,
    y: usize,
}

impl Editor {
    fn render(&self, surface: &mut Surface) -> Result<()> {
        surface.with_color(BLACK).clear();

        let mut pen = surface.with_color(WHITE);
        for x in 0..self.font.width() {
            for y in 0..self.font.height() {
                if self.font.get(self.glyph, x, y) {
                    pen.pix_put(x as i32, y as i32, self.cell);
                }
            }
        }
        drop(pen);

        if self.edit_mode {
            surface
                .with_color(Rgb::gray(128))
                .pix_put_inset(self.x as i32, self.y as i32, self.cell, 0.5);
        }
        surface.present()
    }

    fn handle_select_key(&mut self, key: Key) -> bool {
        match key {
            Key::Enter => self.edit_mode = true,
            Key::Delete => self.font.erase(self.glyph),
            Key::Escape => return false,
            Key::Char(c) if c.is_ascii() => {
                self.glyph = c as usize;
                self.x = 0;
                self.y = 0;
            }
            _ => {}
        }
        true
    }

    fn handle_edit_key(&mut self, key: Key, shift: bool) {
        let (mut dx, mut dy) = (0i32, 0i32);
        match key {
            Key::Left => dx = -1,
            Key::Right => dx = 1,
            Key::Up => dy = -1,
            Key::Down => dy = 1,
            Key::Enter | Key::Char(' ') => self.font.flip(self.glyph, self.x, self.y),
            Key::Escape => self.edit_mode = false,
            _ => {}
        }

        let nx = self.x as i32 + dx;
        let ny = self.y as i32 + dy;
        let x_ok = dx != 0 && (0..self.font.width() as i32).contains(&nx);
        let y_ok = dy != 0 && (0..self.font.height() as i32).contains(&ny);
        if x_ok || y_ok {
            self.x = nx.max(0) as usize;
            self.y = ny.max(0) as usize;
            if shift {
                self.font.flip(self.glyph, self.x, self.y);
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse(
        &[
            ("f", "file"),
            ("w", "width"),
            ("h", "height"),
            ("s", "scale"),
        ],
        &[("", "help")],
    )?;
    if args.is_set("help") {
        print!("{}", USAGE);
        return Ok(());
    }
    let path = args.get("file").context("-f FILE is required")?.to_string();

    let mut font = Font::new();
    if Path::new(&path).exists() {
        let mut file = File::open(&path).with_context(|| format!("opening {}", path))?;
        font.load(&mut file)?;
    } else {
        let width = args.get_int("width")?.context("-w WIDTH is required for a new font")?;
        let height = args.get_int("height")?.context("-h HEIGHT is required for a new font")?;
        font.init(width as usize, height as usize)?;
    }
    if font.width() == 0 || font.height() == 0 {
        bail!("cannot edit a font with zero-area glyphs");
    }

    let cell = (args.get_int("scale")?.unwrap_or(1).clamp(1, 16) as i32) * 4;
    let mut editor = Editor {
        font,
        cell,
        edit_mode: false,
        glyph: 0,
        x: 0,
        y: 0,
    };

    let mut surface = Surface::new(
        editor.font.width() as i32 * cell,
        editor.font.height() as i32 * cell,
    );
    surface.enter("fontedit")?;

    let outcome = run(&mut editor, &mut surface);
    surface.exit()?;
    outcome?;

    let mut file = File::create(&path).with_context(|| format!("writing {}", path))?;
    editor.font.store(&mut file)?;
    Ok(())
}

fn run(editor: &mut Editor, surface: &mut Surface) -> Result<()> {
    loop {
        editor.render(surface)?;
        match surface.wait_input()? {
            InputEvent::Quit => return Ok(()),
            InputEvent::Key(press) => {
                if editor.edit_mode {
                    editor.handle_edit_key(press.key, press.shift);
                } else if !editor.handle_select_key(press.key) {
                    return Ok(());
                }
            }
        }
    }
}
