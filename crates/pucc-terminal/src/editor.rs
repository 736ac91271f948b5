//! Line editor state machine.
//!
//! [`LineEditor`] owns the edit buffer, the cursor and the history. Each key
//! mutates that state and yields an [`Effect`]; rendering is the caller's
//! job. Render deltas assume the terminal cursor sits at the editor cursor
//! and leave it there again, measuring columns with `unicode-width`.

use pucc_types::input::Key;
use unicode_width::UnicodeWidthChar;

use crate::history::History;

/// Erase from the cursor to the end of the line.
const ERASE_TO_EOL: &str = "\x1b[K";

/// What the caller should do after a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Nothing visible changed.
    None,
    /// Write this control delta to the display.
    Render(String),
    /// The user submitted this (trimmed) line.
    Submit(String),
    /// The line was discarded with Ctrl+C.
    Interrupt,
}

#[derive(Debug, Clone, Default)]
pub struct LineEditor {
    buffer: Vec<char>,
    cursor: usize,
    history: History,
}

impl LineEditor {
    /// An empty editor with empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode raw input data and apply it.
    pub fn handle(&mut self, data: &str) -> Effect {
        self.apply(&Key::decode(data))
    }

    /// Apply one key, returning what the caller must render or run.
    pub fn apply(&mut self, key: &Key) -> Effect {
        match key {
            Key::Enter => self.submit(),
            Key::Left => {
                if self.cursor == 0 {
                    return Effect::None;
                }
                self.cursor -= 1;
                render(back(char_width(self.buffer[self.cursor])))
            },
            Key::Right => {
                if self.cursor == self.buffer.len() {
                    return Effect::None;
                }
                let w = char_width(self.buffer[self.cursor]);
                self.cursor += 1;
                render(forward(w))
            },
            Key::Home => {
                let w = width(&self.buffer[..self.cursor]);
                self.cursor = 0;
                render(back(w))
            },
            Key::End => {
                let w = width(&self.buffer[self.cursor..]);
                self.cursor = self.buffer.len();
                render(forward(w))
            },
            Key::Up => {
                let current = self.text();
                match self.history.older(&current) {
                    Some(line) => {
                        let line = line.to_string();
                        self.replace_line(&line)
                    },
                    None => Effect::None,
                }
            },
            Key::Down => match self.history.newer() {
                Some(line) => self.replace_line(&line),
                None => Effect::None,
            },
            Key::Delete => {
                if self.cursor == self.buffer.len() {
                    return Effect::None;
                }
                let removed = self.buffer.remove(self.cursor);
                render(self.redraw_tail(char_width(removed)))
            },
            Key::Backspace => {
                if self.cursor == 0 {
                    return Effect::None;
                }
                self.cursor -= 1;
                let removed = self.buffer.remove(self.cursor);
                let w = char_width(removed);
                render(back(w) + &self.redraw_tail(w))
            },
            Key::Interrupt => {
                self.clear();
                Effect::Interrupt
            },
            Key::KillToStart => {
                if self.cursor == 0 {
                    return Effect::None;
                }
                let killed = width(&self.buffer[..self.cursor]);
                self.buffer.drain(..self.cursor);
                self.cursor = 0;
                let rest: String = self.buffer.iter().collect();
                render(back(killed) + ERASE_TO_EOL + &rest + &back(width(&self.buffer)))
            },
            Key::Text(text) => self.insert(text),
            Key::Unknown(_) => Effect::None,
        }
    }

    fn submit(&mut self) -> Effect {
        let line = self.text().trim().to_string();
        if !line.is_empty() {
            self.history.push(&line);
        }
        self.history.reset();
        self.buffer.clear();
        self.cursor = 0;
        Effect::Submit(line)
    }

    fn insert(&mut self, text: &str) -> Effect {
        let start = self.cursor;
        for ch in text.chars().filter(|c| !c.is_control()) {
            self.buffer.insert(self.cursor, ch);
            self.cursor += 1;
        }
        if self.cursor == start {
            return Effect::None;
        }
        let written: String = self.buffer[start..].iter().collect();
        render(written + &back(width(&self.buffer[self.cursor..])))
    }

    /// Show `line` in place of the buffer, cursor at its end.
    fn replace_line(&mut self, line: &str) -> Effect {
        let delta = back(width(&self.buffer[..self.cursor])) + ERASE_TO_EOL + line;
        self.buffer = line.chars().collect();
        self.cursor = self.buffer.len();
        Effect::Render(delta)
    }

    /// Rewrite from the cursor after `gap` columns were removed there.
    fn redraw_tail(&self, gap: usize) -> String {
        let tail = &self.buffer[self.cursor..];
        let mut out: String = tail.iter().collect();
        out.push_str(&" ".repeat(gap));
        out + &back(width(tail) + gap)
    }

    /// Reset the buffer and stop history browsing.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.history.reset();
    }

    /// Current buffer contents.
    pub fn text(&self) -> String {
        self.buffer.iter().collect()
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor position in display columns.
    pub fn cursor_column(&self) -> usize {
        width(&self.buffer[..self.cursor])
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}

fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

fn width(chars: &[char]) -> usize {
    chars.iter().copied().map(char_width).sum()
}

fn back(n: usize) -> String {
    if n == 0 {
        String::new()
    } else {
        format!("\x1b[{n}D")
    }
}

fn forward(n: usize) -> String {
    if n == 0 {
        String::new()
    } else {
        format!("\x1b[{n}C")
    }
}

fn render(delta: String) -> Effect {
    if delta.is_empty() {
        Effect::None
    } else {
        Effect::Render(delta)
    }
}
