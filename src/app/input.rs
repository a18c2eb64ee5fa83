use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Save,
    Quit,
    NextField,
    PrevField,
    Activate,
    Dismiss,
    AddEntry,
    RemoveEntry,
    Reset,
    Confirm,
    Cancel,
    Edit(KeyEvent),
    None,
}

/// Key routing while a confirmation prompt is open: only the prompt's
/// answers are recognised.
pub fn classify_prompt(key: &KeyEvent) -> KeyCommand {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => KeyCommand::Confirm,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => KeyCommand::Cancel,
        _ => KeyCommand::None,
    }
}

pub fn classify(key: &KeyEvent) -> KeyCommand {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('s') | KeyCode::Char('S') => KeyCommand::Save,
            KeyCode::Char('q') | KeyCode::Char('Q') => KeyCommand::Quit,
            KeyCode::Char('c') | KeyCode::Char('C') => KeyCommand::Quit,
            KeyCode::Char('n') | KeyCode::Char('N') => KeyCommand::AddEntry,
            KeyCode::Char('d') | KeyCode::Char('D') => KeyCommand::RemoveEntry,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyCommand::Reset,
            _ => KeyCommand::None,
        };
    }

    match key.code {
        KeyCode::Tab | KeyCode::Down => KeyCommand::NextField,
        KeyCode::BackTab | KeyCode::Up => KeyCommand::PrevField,
        KeyCode::Esc => KeyCommand::Dismiss,
        KeyCode::Enter => KeyCommand::Activate,
        _ => KeyCommand::Edit(*key),
    }
}

/// Applies a character-editing key to `buffer`; returns true when the
/// buffer changed.
pub fn edit_buffer(buffer: &mut String, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            buffer.push(ch);
            true
        }
        KeyCode::Backspace => buffer.pop().is_some(),
        _ => false,
    }
}
