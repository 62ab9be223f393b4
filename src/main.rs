//! Terminal falling-block game (default binary).
//!
//! The game rules live in `pixfont-game`; this binary owns the session
//! around them: difficulty selection, the play loop with its pause
//! sub-loop, name entry, the persisted scoreboard and the retry prompt.
//! Modal screens block on input, the play loop polls at a fixed frame
//! cadence. Quitting anywhere aborts the session and skips straight out.

use std::fs;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use pixfont::args::Args;
use pixfont::font::Font;
use pixfont::game::{sanitize_name, Game, Scoreboard};
use pixfont::term::{draw_text, draw_text_at, Anchor, GameView, InputEvent, Key, Surface, TextStyle};
use pixfont::types::{HAlign, Rgb, VAlign, BLACK, NAME_MAX_LEN, TICK_MS, WHITE, YELLOW};

const SCORES_FILE: &str = "tetris.scores";

const USAGE: &str = "\
tetris - falling blocks in the terminal

USAGE:
    tetris [-s SCALE] [-n NAME] [-f FONT] [--seed SEED]

OPTIONS:
    -s, --scale SCALE   cell size multiplier (default 1)
    -n, --name NAME     player name, skips the name prompt
    -f, --font FILE     font file to use instead of the built-in font
        --seed SEED     fixed seed for the piece stream
    -h, --help          show this help

KEYS:
    left/right move, up turns, down drops, p pauses, q quits
";

fn main() -> Result<()> {
    let args = Args::parse(
        &[("s", "scale"), ("n", "name"), ("f", "font"), ("", "seed")],
        &[("h", "help")],
    )?;
    if args.is_set("help") {
        print!("{}", USAGE);
        return Ok(());
    }

    let scale = args.get_int("scale")?.unwrap_or(1).clamp(1, 8) as i32;
    let player = args
        .get("name")
        .map(sanitize_name)
        .filter(|name| !name.is_empty());
    let font = match args.get("font") {
        Some(path) => {
            let mut font = Font::new();
            let mut file =
                fs::File::open(path).with_context(|| format!("opening font {}", path))?;
            font.load(&mut file)?;
            font
        }
        None => Font::builtin(),
    };
    let seed = match args.get_int("seed")? {
        Some(seed) => seed as u32,
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u32)
            .unwrap_or(1),
    };

    let view = GameView::new(4 * scale);
    let (width, height) = view.surface_size();
    let mut surface = Surface::new(width, height);
    surface.enter("tetris")?;

    let mut session = Session {
        surface: &mut surface,
        view,
        font,
        player,
        seed,
        scale,
    };
    let outcome = session.run();

    surface.exit()?;
    println!("SCORE: {}", outcome?);
    Ok(())
}

struct Session<'a> {
    surface: &'a mut Surface,
    view: GameView,
    font: Font,
    player: Option<String>,
    seed: u32,
    scale: i32,
}

impl Session<'_> {
    /// The retry loop. Every modal helper returns `None` when the player
    /// asked to quit, which falls straight through to the exit.
    fn run(&mut self) -> Result<u32> {
        let mut last_score = 0;
        loop {
            let Some(difficulty) = self.choose_difficulty()? else {
                break;
            };
            let Some(score) = self.play(difficulty)? else {
                break;
            };
            last_score = score;

            let Some(name) = self.resolve_name()? else {
                break;
            };
            let board = self.record_score(&name, score)?;
            if self.show_scoreboard(&board, &name)?.is_none() {
                break;
            }
            if self.offer_retry()? != Some(true) {
                break;
            }
        }
        Ok(last_score)
    }

    fn style(&self) -> TextStyle {
        TextStyle {
            scale: self.scale,
            ..TextStyle::default()
        }
    }

    fn centered(&self, y: i32) -> Anchor {
        Anchor {
            x: self.surface.width() / 2,
            y,
            halign: HAlign::Center,
            valign: VAlign::Center,
        }
    }

    fn heading(&mut self, text: &str, y: i32, color: Rgb) {
        let style = self.style();
        let anchor = self.centered(y);
        let mut pen = self.surface.with_color(color);
        draw_text_at(&mut pen, &self.font, text, &style, &anchor);
    }

    /// Difficulty prompt: digits 1-9 pick a level, q aborts.
    fn choose_difficulty(&mut self) -> Result<Option<u8>> {
        self.surface.with_color(BLACK).clear();
        let height = self.surface.height();
        self.heading("TETRIS", height / 4, YELLOW);
        self.heading("LEVEL 1-9?", height / 2, WHITE);
        self.surface.present()?;

        loop {
            match self.surface.wait_input()? {
                InputEvent::Quit => return Ok(None),
                InputEvent::Key(press) => match press.key {
                    Key::Char('q') | Key::Char('Q') | Key::Escape => return Ok(None),
                    Key::Char(c @ '1'..='9') => return Ok(Some(c as u8 - b'0')),
                    _ => {}
                },
            }
        }
    }

    /// One round: drain input, tick, draw, sleep. `None` aborts the
    /// session; `Some(score)` continues to name entry.
    fn play(&mut self, difficulty: u8) -> Result<Option<u32>> {
        self.seed = self.seed.wrapping_add(1);
        let mut game = Game::new(difficulty, self.seed);

        while !game.is_over() {
            while let Some(event) = self.surface.poll_input()? {
                match event {
                    InputEvent::Quit => return Ok(None),
                    InputEvent::Key(press) => match press.key {
                        Key::Left => game.move_left(),
                        Key::Right => game.move_right(),
                        Key::Up => game.rotate(),
                        Key::Down => game.hard_drop(),
                        Key::Char('q') | Key::Char('Q') => return Ok(None),
                        Key::Char('p') | Key::Char('P') => {
                            if self.pause(&game)?.is_none() {
                                return Ok(None);
                            }
                        }
                        _ => {}
                    },
                }
            }

            game.tick();
            self.view.render(&game, self.surface, &self.font);
            self.surface.present()?;
            thread::sleep(Duration::from_millis(TICK_MS));
        }

        // Leave the final position up until a key acknowledges it.
        self.view.render(&game, self.surface, &self.font);
        let height = self.surface.height();
        self.heading("GAME OVER", height / 2, WHITE);
        self.surface.present()?;
        loop {
            match self.surface.wait_input()? {
                InputEvent::Quit => return Ok(None),
                InputEvent::Key(press) if matches!(press.key, Key::Char('q') | Key::Char('Q')) => {
                    return Ok(None)
                }
                InputEvent::Key(_) => return Ok(Some(game.score())),
            }
        }
    }

    /// Nested blocking loop for the pause sub-state; gravity is frozen
    /// because nothing ticks until this returns.
    fn pause(&mut self, game: &Game) -> Result<Option<()>> {
        self.view.render(game, self.surface, &self.font);
        let height = self.surface.height();
        self.heading("PAUSED", height / 2, WHITE);
        self.surface.present()?;

        loop {
            match self.surface.wait_input()? {
                InputEvent::Quit => return Ok(None),
                InputEvent::Key(press) => match press.key {
                    Key::Char('q') | Key::Char('Q') => return Ok(None),
                    Key::Char('p') | Key::Char('P') | Key::Escape => return Ok(Some(())),
                    _ => {}
                },
            }
        }
    }

    /// The session's player name: given on the command line once, or asked
    /// for after the first finished round and remembered.
    fn resolve_name(&mut self) -> Result<Option<String>> {
        if let Some(name) = &self.player {
            return Ok(Some(name.clone()));
        }
        let Some(name) = self.prompt_name()? else {
            return Ok(None);
        };
        self.player = Some(name.clone());
        Ok(Some(name))
    }

    /// Name entry: letters and digits, Backspace edits, Enter accepts.
    fn prompt_name(&mut self) -> Result<Option<String>> {
        let mut name = String::new();
        loop {
            self.surface.with_color(BLACK).clear();
            let height = self.surface.height();
            self.heading("YOUR NAME?", height / 3, WHITE);
            self.heading(&format!("{}-", name), height / 2, YELLOW);
            self.surface.present()?;

            match self.surface.wait_input()? {
                InputEvent::Quit => return Ok(None),
                InputEvent::Key(press) => match press.key {
                    Key::Escape => return Ok(None),
                    Key::Enter => {
                        if name.is_empty() {
                            name.push_str("PLAYER");
                        }
                        return Ok(Some(name));
                    }
                    Key::Backspace => {
                        name.pop();
                    }
                    Key::Char(c) if c.is_ascii_alphanumeric() && name.len() < NAME_MAX_LEN => {
                        name.push(c.to_ascii_uppercase());
                    }
                    _ => {}
                },
            }
        }
    }

    /// Fold the score into the persisted scoreboard and write it back.
    fn record_score(&self, name: &str, score: u32) -> Result<Scoreboard> {
        let mut board = Scoreboard::parse(&fs::read_to_string(SCORES_FILE).unwrap_or_default());
        board.insert(name, score);
        fs::write(SCORES_FILE, board.serialize()).context("writing scoreboard")?;
        Ok(board)
    }

    /// Scoreboard screen. As many top entries as fit are listed; when the
    /// session's entry ranks below the visible window it replaces the last
    /// line, and it is always drawn highlighted.
    fn show_scoreboard(&mut self, board: &Scoreboard, player: &str) -> Result<Option<()>> {
        self.surface.with_color(BLACK).clear();
        let line_h = self.font.height() as i32 * self.scale;
        self.heading("BEST SCORES", line_h, WHITE);

        let top = 3 * line_h;
        let fit = (((self.surface.height() - top) / line_h).max(1) as usize)
            .min(board.entries().len());
        let mut shown: Vec<usize> = (0..fit).collect();
        if let Some(pos) = board.position(player) {
            if pos >= fit {
                shown[fit - 1] = pos;
            }
        }

        let block_w = 18 * self.font.width() as i32 * self.scale;
        let left = (self.surface.width() - block_w) / 2;
        let style = self.style();
        for (row, &pos) in shown.iter().enumerate() {
            let entry = &board.entries()[pos];
            let line = format!("{:<12} {:>5}", entry.name, entry.score);
            let color = if entry.name == player { YELLOW } else { WHITE };
            let mut pen = self.surface.with_color(color);
            let mut origin = pen.with_origin((left, top + row as i32 * line_h));
            draw_text(&mut origin, &self.font, &line, &style);
        }
        self.surface.present()?;

        match self.surface.wait_input()? {
            InputEvent::Quit => Ok(None),
            InputEvent::Key(press) if matches!(press.key, Key::Char('q') | Key::Char('Q')) => {
                Ok(None)
            }
            InputEvent::Key(_) => Ok(Some(())),
        }
    }

    /// `Some(true)` restarts at difficulty selection, anything else exits.
    fn offer_retry(&mut self) -> Result<Option<bool>> {
        self.surface.with_color(BLACK).clear();
        let height = self.surface.height();
        self.heading("RETRY? Y-N", height / 2, WHITE);
        self.surface.present()?;

        loop {
            match self.surface.wait_input()? {
                InputEvent::Quit => return Ok(None),
                InputEvent::Key(press) => match press.key {
                    Key::Char('y') | Key::Char('Y') | Key::Enter => return Ok(Some(true)),
                    Key::Char('n') | Key::Char('N') | Key::Char('q') | Key::Char('Q') | Key::Escape => {
                        return Ok(Some(false))
                    }
                    _ => {}
                },
            }
        }
    }
}
