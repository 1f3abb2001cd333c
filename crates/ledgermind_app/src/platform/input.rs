use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ledgermind_core::Msg;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Dispatch(Msg),
    ScrollUp,
    ScrollDown,
    Quit,
    Ignore,
}

/// Translates a key press into an action, given the draft currently shown.
pub fn map_key(key: KeyEvent, draft: &str) -> InputAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputAction::Quit;
    }

    match key.code {
        KeyCode::Esc => InputAction::Quit,
        KeyCode::Enter => InputAction::Dispatch(Msg::SubmitClicked),
        KeyCode::Backspace => {
            let mut next = draft.to_string();
            if next.pop().is_some() {
                InputAction::Dispatch(Msg::DraftChanged(next))
            } else {
                InputAction::Ignore
            }
        }
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            let mut next = draft.to_string();
            next.push(ch);
            InputAction::Dispatch(Msg::DraftChanged(next))
        }
        KeyCode::PageUp => InputAction::ScrollUp,
        KeyCode::PageDown => InputAction::ScrollDown,
        _ => InputAction::Ignore,
    }
}
