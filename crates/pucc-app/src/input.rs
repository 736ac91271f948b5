//! Translate crossterm events into the raw input data the session expects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use pucc_types::input;

/// Result of translating a single terminal event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostInput {
    /// Raw data for `TerminalSession::handle_input`.
    Data(String),
    Resize,
    Quit,
    Ignore,
}

pub fn translate(event: Event) -> HostInput {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Paste(text) => HostInput::Data(text),
        Event::Resize(..) => HostInput::Resize,
        _ => HostInput::Ignore,
    }
}

fn translate_key(key: KeyEvent) -> HostInput {
    if key.kind == KeyEventKind::Release {
        return HostInput::Ignore;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let data = match key.code {
        KeyCode::Char('d') | KeyCode::Char('D') if ctrl => return HostInput::Quit,
        KeyCode::Char(c) if ctrl => match control_code(c) {
            Some(code) => code.to_string(),
            None => return HostInput::Ignore,
        },
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => input::SUBMIT_CR.to_string(),
        KeyCode::Backspace => input::DEL.to_string(),
        KeyCode::Delete => input::DELETE.to_string(),
        KeyCode::Left => input::ARROW_LEFT.to_string(),
        KeyCode::Right => input::ARROW_RIGHT.to_string(),
        KeyCode::Up => input::ARROW_UP.to_string(),
        KeyCode::Down => input::ARROW_DOWN.to_string(),
        KeyCode::Home => input::HOME.to_string(),
        KeyCode::End => input::END.to_string(),
        _ => return HostInput::Ignore,
    };
    HostInput::Data(data)
}

/// Ctrl+letter as its C0 control character.
fn control_code(c: char) -> Option<char> {
    let c = c.to_ascii_lowercase();
    c.is_ascii_lowercase()
        .then(|| char::from(c as u8 - b'a' + 1))
}
