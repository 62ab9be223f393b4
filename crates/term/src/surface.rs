//! The drawing surface.
//!
//! A logical-pixel framebuffer presented onto the terminal. Each character
//! cell shows two vertically stacked pixels through the upper-half block
//! (foreground = top pixel, background = bottom pixel), which is close to
//! square in common terminal fonts. Drawing goes through a current color and
//! a base offset, both restorable with scope guards; presentation diffs
//! against the previous frame and only rewrites changed runs.
//!
//! Everything except `enter`/`exit`/`present` and the input reads is pure
//! buffer manipulation, so drawing code is unit-testable without a terminal.

use std::io::{self, Write};
use std::ops::{Deref, DerefMut};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event},
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};
use pixfont_types::{Rgb, BLACK, WHITE};

use crate::event::{map_key_event, InputEvent};

/// Two stacked pixels per character cell.
const HALF_BLOCK: char = '▀';

pub struct Surface {
    width: i32,
    height: i32,
    pixels: Vec<Rgb>,
    prev: Option<Vec<Rgb>>,
    color: Rgb,
    origin: (i32, i32),
    stdout: io::Stdout,
    entered: bool,
}

impl Surface {
    /// Create a surface of the given logical pixel dimensions.
    ///
    /// Nothing touches the terminal until [`Surface::enter`].
    pub fn new(width: i32, height: i32) -> Self {
        let len = (width.max(0) as usize) * (height.max(0) as usize);
        Self {
            width,
            height,
            pixels: vec![BLACK; len],
            prev: None,
            color: WHITE,
            origin: (0, 0),
            stdout: io::stdout(),
            entered: false,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Take over the terminal: raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self, title: &str) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(terminal::SetTitle(title))?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.flush()?;
        self.entered = true;
        Ok(())
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    pub fn origin(&self) -> (i32, i32) {
        self.origin
    }

    pub fn set_origin(&mut self, origin: (i32, i32)) {
        self.origin = origin;
    }

    /// Switch the draw color for a scope; the previous color comes back when
    /// the guard drops, on every exit path.
    pub fn with_color(&mut self, color: Rgb) -> ColorGuard<'_> {
        let prev = self.color;
        self.set_color(color);
        ColorGuard {
            surface: self,
            prev,
        }
    }

    /// Switch the base offset for a scope, restored when the guard drops.
    pub fn with_origin(&mut self, origin: (i32, i32)) -> OriginGuard<'_> {
        let prev = self.origin;
        self.set_origin(origin);
        OriginGuard {
            surface: self,
            prev,
        }
    }

    /// Flood the whole buffer with the current color. The base offset does
    /// not apply.
    pub fn clear(&mut self) {
        self.pixels.fill(self.color);
    }

    /// Fill a rectangle at the base offset with the current color, clipped
    /// to the buffer.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let x = x + self.origin.0;
        let y = y + self.origin.1;
        let color = self.color;
        for py in y.max(0)..(y + h).min(self.height) {
            for px in x.max(0)..(x + w).min(self.width) {
                self.pixels[(py * self.width + px) as usize] = color;
            }
        }
    }

    /// Fill logical cell `(x, y)` of a grid with `step`-pixel cells.
    pub fn pix_put(&mut self, x: i32, y: i32, step: i32) {
        self.fill_rect(x * step, y * step, step, step);
    }

    /// Like [`Surface::pix_put`], but only a centered square covering `frac`
    /// of the cell's side, leaving a margin that separates adjacent cells.
    pub fn pix_put_inset(&mut self, x: i32, y: i32, step: i32, frac: f32) {
        let size = ((frac * step as f32) as i32).clamp(1, step);
        let inset = (step - size) / 2;
        self.fill_rect(x * step + inset, y * step + inset, size, size);
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    /// Force the next present to redraw everything.
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    /// Flush the buffer to the terminal, rewriting only changed runs.
    pub fn present(&mut self) -> Result<()> {
        match self.prev.take() {
            Some(mut prev) if prev.len() == self.pixels.len() => {
                self.draw_diff(&prev)?;
                prev.copy_from_slice(&self.pixels);
                self.prev = Some(prev);
            }
            _ => {
                self.draw_full()?;
                self.prev = Some(self.pixels.clone());
            }
        }
        Ok(())
    }

    /// Terminal rows the surface occupies (two pixel rows per cell).
    fn cell_rows(&self) -> i32 {
        (self.height + 1) / 2
    }

    /// Top and bottom pixel of the terminal cell at `(x, row)`.
    fn cell_pair(pixels: &[Rgb], width: i32, height: i32, x: i32, row: i32) -> (Rgb, Rgb) {
        let top = pixels[(row * 2 * width + x) as usize];
        let bottom = if row * 2 + 1 < height {
            pixels[((row * 2 + 1) * width + x) as usize]
        } else {
            BLACK
        };
        (top, bottom)
    }

    fn draw_full(&mut self) -> Result<()> {
        self.stdout
            .queue(terminal::Clear(terminal::ClearType::All))?;
        let mut style: (Option<Rgb>, Option<Rgb>) = (None, None);
        for row in 0..self.cell_rows() {
            self.stdout.queue(cursor::MoveTo(0, row as u16))?;
            for x in 0..self.width {
                self.emit_cell(x, row, &mut style)?;
            }
        }
        self.finish_frame()
    }

    fn draw_diff(&mut self, prev: &[Rgb]) -> Result<()> {
        let mut style: (Option<Rgb>, Option<Rgb>) = (None, None);
        for row in 0..self.cell_rows() {
            let mut x = 0;
            while x < self.width {
                let now = Self::cell_pair(&self.pixels, self.width, self.height, x, row);
                let was = Self::cell_pair(prev, self.width, self.height, x, row);
                if now == was {
                    x += 1;
                    continue;
                }

                // Start of a changed run; extend it while cells differ.
                self.stdout.queue(cursor::MoveTo(x as u16, row as u16))?;
                while x < self.width {
                    let now = Self::cell_pair(&self.pixels, self.width, self.height, x, row);
                    let was = Self::cell_pair(prev, self.width, self.height, x, row);
                    if now == was {
                        break;
                    }
                    self.emit_cell(x, row, &mut style)?;
                    x += 1;
                }
            }
        }
        self.finish_frame()
    }

    fn emit_cell(&mut self, x: i32, row: i32, style: &mut (Option<Rgb>, Option<Rgb>)) -> Result<()> {
        let (top, bottom) = Self::cell_pair(&self.pixels, self.width, self.height, x, row);
        if style.0 != Some(top) {
            self.stdout
                .queue(SetForegroundColor(to_term_color(top)))?;
            style.0 = Some(top);
        }
        if style.1 != Some(bottom) {
            self.stdout
                .queue(SetBackgroundColor(to_term_color(bottom)))?;
            style.1 = Some(bottom);
        }
        self.stdout.queue(Print(HALF_BLOCK))?;
        Ok(())
    }

    fn finish_frame(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        Ok(())
    }

    /// Terminal size (columns, rows) needed to show the whole surface.
    pub fn term_size(&self) -> (u16, u16) {
        (self.width as u16, self.cell_rows() as u16)
    }

    /// Drain pending input without blocking. Resizes are swallowed and mark
    /// the frame dirty.
    pub fn poll_input(&mut self) -> Result<Option<InputEvent>> {
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(mapped) = map_key_event(key) {
                        return Ok(Some(mapped));
                    }
                }
                Event::Resize(..) => self.invalidate(),
                _ => {}
            }
        }
        Ok(None)
    }

    /// Block until the next input event; used by modal screens so they do
    /// not spin. A resize repaints the current buffer and keeps waiting.
    pub fn wait_input(&mut self) -> Result<InputEvent> {
        loop {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(mapped) = map_key_event(key) {
                        return Ok(mapped);
                    }
                }
                Event::Resize(..) => {
                    self.invalidate();
                    self.present()?;
                }
                _ => {}
            }
        }
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

fn to_term_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Restores the previous draw color when dropped.
pub struct ColorGuard<'a> {
    surface: &'a mut Surface,
    prev: Rgb,
}

impl Deref for ColorGuard<'_> {
    type Target = Surface;

    fn deref(&self) -> &Surface {
        self.surface
    }
}

impl DerefMut for ColorGuard<'_> {
    fn deref_mut(&mut self) -> &mut Surface {
        self.surface
    }
}

impl Drop for ColorGuard<'_> {
    fn drop(&mut self) {
        self.surface.set_color(self.prev);
    }
}

/// Restores the previous base offset when dropped.
pub struct OriginGuard<'a> {
    surface: &'a mut Surface,
    prev: (i32, i32),
}

impl Deref for OriginGuard<'_> {
    type Target = Surface;

    fn deref(&self) -> &Surface {
        self.surface
    }
}

impl DerefMut for OriginGuard<'_> {
    fn deref_mut(&mut self) -> &mut Surface {
        self.surface
    }
}

impl Drop for OriginGuard<'_> {
    fn drop(&mut self) {
        self.surface.set_origin(self.prev);
    }
}
