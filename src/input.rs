//! Key events to game commands.

use crate::maze::Dir;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move { dir: Dir, steps: u32 },
    Regenerate,
    Quit,
    PhraseChar(char),
    PhraseBackspace,
    Reveal,
    CloseDialog,
}

#[derive(Clone, Copy, Debug)]
pub struct KeyMap {
    pub dash_steps: u32,
}

impl KeyMap {
    pub fn new(dash_steps: u32) -> Self {
        Self {
            dash_steps: dash_steps.max(1),
        }
    }

    /// `dialog_open` switches the map to phrase entry; movement is ignored
    /// while the win dialog is up.
    pub fn command_for(&self, key: KeyEvent, dialog_open: bool) -> Option<Command> {
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {}
            _ => return None,
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::Quit),
                _ => None,
            };
        }
        if dialog_open {
            return match key.code {
                KeyCode::Enter => Some(Command::Reveal),
                KeyCode::Esc => Some(Command::CloseDialog),
                KeyCode::Backspace => Some(Command::PhraseBackspace),
                KeyCode::Char(c) => Some(Command::PhraseChar(c)),
                _ => None,
            };
        }

        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let (dir, dash) = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Some(Command::Quit),
            KeyCode::Char('r') => return Some(Command::Regenerate),
            KeyCode::Up => (Dir::Up, shift),
            KeyCode::Down => (Dir::Down, shift),
            KeyCode::Left => (Dir::Left, shift),
            KeyCode::Right => (Dir::Right, shift),
            KeyCode::Char(c) => {
                let dir = match c.to_ascii_lowercase() {
                    'w' | 'k' => Dir::Up,
                    's' | 'j' => Dir::Down,
                    'a' | 'h' => Dir::Left,
                    'd' | 'l' => Dir::Right,
                    _ => return None,
                };
                (dir, shift || c.is_ascii_uppercase())
            }
            _ => return None,
        };
        let steps = if dash { self.dash_steps } else { 1 };
        Some(Command::Move { dir, steps })
    }
}
