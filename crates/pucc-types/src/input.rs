//! Decoded key events.
//!
//! A terminal display hands the shell raw input data: a run of printable
//! characters, a single control code, or an escape sequence. [`Key::decode`]
//! maps each chunk to exactly one event so the line editor never sees raw
//! bytes.

/// Carriage return / newline.
pub const SUBMIT_CR: &str = "\r";
pub const SUBMIT_LF: &str = "\n";
pub const ARROW_UP: &str = "\x1b[A";
pub const ARROW_DOWN: &str = "\x1b[B";
pub const ARROW_RIGHT: &str = "\x1b[C";
pub const ARROW_LEFT: &str = "\x1b[D";
pub const HOME: &str = "\x1b[H";
pub const END: &str = "\x1b[F";
pub const DELETE: &str = "\x1b[3~";
/// Ctrl+A.
pub const CTRL_A: &str = "\x01";
/// Ctrl+C.
pub const CTRL_C: &str = "\x03";
/// Ctrl+E.
pub const CTRL_E: &str = "\x05";
/// Ctrl+H, sent as backspace by some terminals.
pub const CTRL_H: &str = "\x08";
/// Ctrl+U.
pub const CTRL_U: &str = "\x15";
/// DEL, the usual backspace byte.
pub const DEL: &str = "\x7f";

/// A single line-editor input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Submit the current line.
    Enter,
    /// Move the cursor one character left.
    Left,
    /// Move the cursor one character right.
    Right,
    /// Recall an older history entry.
    Up,
    /// Recall a newer history entry.
    Down,
    /// Cursor to start of line.
    Home,
    /// Cursor to end of line.
    End,
    /// Delete the character under the cursor.
    Delete,
    /// Delete the character before the cursor.
    Backspace,
    /// Discard the line (Ctrl+C).
    Interrupt,
    /// Kill everything before the cursor (Ctrl+U).
    KillToStart,
    /// One or more characters to insert at the cursor.
    Text(String),
    /// Any other control sequence; ignored by the editor.
    Unknown(String),
}

impl Key {
    /// Decode one chunk of raw terminal input.
    pub fn decode(data: &str) -> Self {
        match data {
            SUBMIT_CR | SUBMIT_LF => Self::Enter,
            ARROW_LEFT => Self::Left,
            ARROW_RIGHT => Self::Right,
            ARROW_UP => Self::Up,
            ARROW_DOWN => Self::Down,
            HOME | CTRL_A => Self::Home,
            END | CTRL_E => Self::End,
            DELETE => Self::Delete,
            DEL | CTRL_H => Self::Backspace,
            CTRL_C => Self::Interrupt,
            CTRL_U => Self::KillToStart,
            _ => match data.chars().next() {
                Some(first) if first >= ' ' && first != '\x1b' => Self::Text(data.to_string()),
                _ => Self::Unknown(data.to_string()),
            },
        }
    }

    /// The canonical raw encoding of this key.
    ///
    /// `decode(encode(k)) == k` for every key except `Unknown`, whose payload
    /// is returned verbatim.
    pub fn encode(&self) -> &str {
        match self {
            Self::Enter => SUBMIT_CR,
            Self::Left => ARROW_LEFT,
            Self::Right => ARROW_RIGHT,
            Self::Up => ARROW_UP,
            Self::Down => ARROW_DOWN,
            Self::Home => HOME,
            Self::End => END,
            Self::Delete => DELETE,
            Self::Backspace => DEL,
            Self::Interrupt => CTRL_C,
            Self::KillToStart => CTRL_U,
            Self::Text(s) | Self::Unknown(s) => s,
        }
    }
}
