use crate::session::{Key, KeyInput};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the editor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Edit(KeyInput),
    PasteClipboard,
    Save,
    Cancel,
    Quit,
    Redraw,
}

pub struct KeyHandler;

impl KeyHandler {
    pub fn parse_key(key_event: &KeyEvent) -> Option<Action> {
        // Release/repeat reports only arrive on some platforms; act on presses
        if key_event.kind == KeyEventKind::Release {
            return None;
        }

        let modifiers = key_event.modifiers;
        let shift = modifiers.contains(KeyModifiers::SHIFT);

        match key_event.code {
            // Control bindings first (more specific)
            KeyCode::Char('s') if modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Save),
            KeyCode::Char('q') if modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
            KeyCode::Char('v') if modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PasteClipboard)
            }
            KeyCode::Char('l') if modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Redraw)
            }
            KeyCode::Char(_) if modifiers.contains(KeyModifiers::CONTROL) => None,

            KeyCode::Esc => Some(Action::Cancel),

            // Alt+Enter stands in for Shift+Enter on terminals that cannot report it
            KeyCode::Enter if modifiers.contains(KeyModifiers::ALT) => {
                Some(Action::Edit(KeyInput::shifted(Key::Enter)))
            }
            KeyCode::Enter => Some(Action::Edit(KeyInput { key: Key::Enter, shift })),
            KeyCode::Backspace => Some(Action::Edit(KeyInput::new(Key::Backspace))),
            KeyCode::Delete => Some(Action::Edit(KeyInput::new(Key::Delete))),
            KeyCode::Tab => Some(Action::Edit(KeyInput::new(Key::Char('\t')))),
            KeyCode::Char(c) => Some(Action::Edit(KeyInput { key: Key::Char(c), shift })),

            // Shift+movement selects
            KeyCode::Left => Some(Action::Edit(KeyInput { key: Key::Left, shift })),
            KeyCode::Right => Some(Action::Edit(KeyInput { key: Key::Right, shift })),
            KeyCode::Up => Some(Action::Edit(KeyInput { key: Key::Up, shift })),
            KeyCode::Down => Some(Action::Edit(KeyInput { key: Key::Down, shift })),
            KeyCode::Home => Some(Action::Edit(KeyInput { key: Key::Home, shift })),
            KeyCode::End => Some(Action::Edit(KeyInput { key: Key::End, shift })),
            _ => None,
        }
    }
}
