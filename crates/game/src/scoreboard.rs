//! Persisted top-N scoreboard.
//!
//! The text format is one `NAME SCORE` line per entry. Parsing is
//! best-effort: lines that do not fit the shape are dropped rather than
//! reported. Reading and writing the file itself is the caller's job; this
//! module only deals in strings.

use pixfont_types::{NAME_MAX_LEN, SCOREBOARD_CAP};

/// One scoreboard line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub score: u32,
}

/// Sorted, capped list of name/score pairs. At most one entry per name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    entries: Vec<Entry>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the persisted text form, dropping malformed lines.
    pub fn parse(text: &str) -> Self {
        let mut board = Self::new();
        for line in text.lines() {
            let mut parts = line.split_whitespace();
            let (Some(name), Some(score)) = (parts.next(), parts.next()) else {
                continue;
            };
            let Ok(score) = score.parse() else {
                continue;
            };
            board.insert(name, score);
        }
        board
    }

    /// Render the persisted text form.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.name);
            out.push(' ');
            out.push_str(&entry.score.to_string());
            out.push('\n');
        }
        out
    }

    /// Record a score. An existing name keeps the higher of its old and new
    /// scores; the list is re-sorted descending and truncated to the cap.
    pub fn insert(&mut self, name: &str, score: u32) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.score = entry.score.max(score),
            None => self.entries.push(Entry {
                name: name.to_string(),
                score,
            }),
        }
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(SCOREBOARD_CAP);
    }

    /// Entries in display order (highest score first).
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Rank of a name, if it survived the cap.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }
}

/// Reduce a raw name to its stored form: ASCII alphanumerics only,
/// uppercased, truncated to the maximum length.
pub fn sanitize_name(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .take(NAME_MAX_LEN)
        .collect()
}
