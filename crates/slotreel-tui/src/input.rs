use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Spin,
    TogglePaytable,
    ExitMode,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    if app.mode == Mode::Paytable {
        return handle_paytable_mode(key);
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,

        (KeyCode::Char(' '), _) => Action::Spin,
        (KeyCode::Enter, _) => Action::Spin,

        (KeyCode::Char('p'), KeyModifiers::NONE) => Action::TogglePaytable,

        _ => Action::None,
    }
}

/// The paytable popup swallows everything except the keys that close it
fn handle_paytable_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('p') => Action::TogglePaytable,
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => Action::ExitMode,
        _ => Action::None,
    }
}
