//! Keyboard event handling.
//!
//! This module manages keyboard input with Vim-style navigation:
//! - `h`/`j`/`k`/`l` or arrows: scroll left/down/up/right
//! - `0` or `Home`: go to first column
//! - `$` or `End`: go to last column
//! - `PageUp`/`PageDown`: scroll a screen up/down
//! - `Tab`/`Shift-Tab`: next/previous view, `1`-`4` jump to a view
//! - `:`: enter command mode
//!   - `:q` or `:quit`: quit the application
//!   - `:<number>`: go to view
//! - `q` or `Ctrl-C`: quit

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::model::{AppMode, ViewerState};

/// Actions that can be triggered by keyboard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action (key not recognized)
    None,
    Quit,
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
    PageUp,
    PageDown,
    /// Go to first column (0 or Home)
    GotoFirstColumn,
    /// Go to last column ($ or End)
    GotoLastColumn,
    NextView,
    PreviousView,
    /// Select a view by 1-based number
    SelectView(usize),
    /// Enter command mode
    EnterCommandMode,
    /// Add character to command buffer
    CommandChar(char),
    /// Execute current command
    ExecuteCommand,
    /// Cancel command mode
    CancelCommand,
    /// Backspace in command mode
    CommandBackspace,
    /// Resize event (terminal resized)
    Resize(u16, u16),
}

/// Polls for keyboard events with a timeout.
///
/// Returns `None` if no event occurred within the timeout.
pub fn poll_event(timeout: Duration) -> Option<Event> {
    if event::poll(timeout).ok()? {
        event::read().ok()
    } else {
        None
    }
}

/// Converts a crossterm event to an Action based on current app mode.
pub fn handle_event(event: Event, mode: &AppMode) -> Action {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, mode),
        Event::Resize(width, height) => Action::Resize(width, height),
        _ => Action::None,
    }
}

fn handle_key_event(key: KeyEvent, mode: &AppMode) -> Action {
    match mode {
        AppMode::Normal => handle_normal_mode(key),
        AppMode::Command(_) => handle_command_mode(key),
    }
}

/// Handles key events in normal mode.
fn handle_normal_mode(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
        KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
        KeyCode::Char('l') | KeyCode::Right => Action::ScrollRight,
        KeyCode::Char('h') | KeyCode::Left => Action::ScrollLeft,

        KeyCode::Char('0') | KeyCode::Home => Action::GotoFirstColumn,
        KeyCode::Char('$') | KeyCode::End => Action::GotoLastColumn,

        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,

        KeyCode::Tab => Action::NextView,
        KeyCode::BackTab => Action::PreviousView,
        KeyCode::Char(c @ '1'..='9') => Action::SelectView(c as usize - '0' as usize),

        KeyCode::Char(':') => Action::EnterCommandMode,
        KeyCode::Char('q') => Action::Quit,

        _ => Action::None,
    }
}

/// Handles key events in command mode.
fn handle_command_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::ExecuteCommand,
        KeyCode::Esc => Action::CancelCommand,
        KeyCode::Backspace => Action::CommandBackspace,
        KeyCode::Char(c) => Action::CommandChar(c),
        _ => Action::None,
    }
}

/// Applies an action to the viewer state.
///
/// Returns `true` if the application should continue, `false` if it should quit.
pub fn apply_action(state: &mut ViewerState, action: Action) -> bool {
    match action {
        Action::None => {}
        Action::Quit => {
            state.should_quit = true;
        }
        Action::ScrollUp => state.scroll_up(1),
        Action::ScrollDown => state.scroll_down(1),
        Action::ScrollLeft => state.scroll_left(1),
        Action::ScrollRight => state.scroll_right(1),
        Action::PageUp => state.page_up(),
        Action::PageDown => state.page_down(),
        Action::GotoFirstColumn => state.goto_first_column(),
        Action::GotoLastColumn => state.goto_last_column(),
        Action::NextView => state.next_view(),
        Action::PreviousView => state.previous_view(),
        Action::SelectView(n) => {
            state.enter_command_mode();
            for c in n.to_string().chars() {
                state.command_input(c);
            }
            state.execute_command();
        }
        Action::EnterCommandMode => state.enter_command_mode(),
        Action::CommandChar(c) => state.command_input(c),
        Action::ExecuteCommand => state.execute_command(),
        Action::CancelCommand => state.cancel_command(),
        Action::CommandBackspace => state.command_backspace(),
        Action::Resize(_, _) => {
            // Resize is handled in the main loop with actual terminal dimensions
        }
    }

    !state.should_quit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normal_mode_navigation() {
        let mode = AppMode::Normal;
        assert_eq!(handle_key_event(key(KeyCode::Char('h')), &mode), Action::ScrollLeft);
        assert_eq!(handle_key_event(key(KeyCode::Char('j')), &mode), Action::ScrollDown);
        assert_eq!(handle_key_event(key(KeyCode::Char('k')), &mode), Action::ScrollUp);
        assert_eq!(handle_key_event(key(KeyCode::Char('l')), &mode), Action::ScrollRight);
        assert_eq!(handle_key_event(key(KeyCode::Left), &mode), Action::ScrollLeft);
        assert_eq!(handle_key_event(key(KeyCode::PageDown), &mode), Action::PageDown);
    }

    #[test]
    fn test_jump_navigation() {
        let mode = AppMode::Normal;
        assert_eq!(handle_key_event(key(KeyCode::Char('0')), &mode), Action::GotoFirstColumn);
        assert_eq!(handle_key_event(key(KeyCode::Char('$')), &mode), Action::GotoLastColumn);
        assert_eq!(handle_key_event(key(KeyCode::Home), &mode), Action::GotoFirstColumn);
        assert_eq!(handle_key_event(key(KeyCode::End), &mode), Action::GotoLastColumn);
    }

    #[test]
    fn test_view_switching() {
        let mode = AppMode::Normal;
        assert_eq!(handle_key_event(key(KeyCode::Tab), &mode), Action::NextView);
        assert_eq!(handle_key_event(key(KeyCode::BackTab), &mode), Action::PreviousView);
        assert_eq!(handle_key_event(key(KeyCode::Char('3')), &mode), Action::SelectView(3));
    }

    #[test]
    fn test_quit_keys() {
        let mode = AppMode::Normal;
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &mode),
            Action::Quit
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &mode), Action::Quit);
    }

    #[test]
    fn test_command_mode_input() {
        let mode = AppMode::Command(String::new());
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &mode), Action::CommandChar('q'));
        assert_eq!(handle_key_event(key(KeyCode::Char('3')), &mode), Action::CommandChar('3'));
        assert_eq!(handle_key_event(key(KeyCode::Enter), &mode), Action::ExecuteCommand);
        assert_eq!(handle_key_event(key(KeyCode::Esc), &mode), Action::CancelCommand);
        assert_eq!(handle_key_event(key(KeyCode::Backspace), &mode), Action::CommandBackspace);
    }

    #[test]
    fn test_apply_action() {
        use crate::config::RenderConfig;
        use crate::model::{Dataset, FrequencyTable, Group, SequenceRecord};
        use crate::views::{render, ViewKind};

        let group = Group::new(
            "A",
            vec![SequenceRecord::new("s1", "ACD").unwrap()],
            FrequencyTable::new(),
        );
        let config = RenderConfig::default();
        let rendered = render(Dataset::new(vec![], vec![group]), &config).unwrap();
        let mut state = ViewerState::new(rendered, config.glyphs(), None);

        assert!(apply_action(&mut state, Action::NextView));
        assert_eq!(state.current_kind(), Some(ViewKind::FrequencyPerGroup));
        assert!(apply_action(&mut state, Action::SelectView(4)));
        assert_eq!(state.current_kind(), Some(ViewKind::FullSequences));
        assert!(apply_action(&mut state, Action::PreviousView));
        assert_eq!(state.current_kind(), Some(ViewKind::PositionsWithDiversity));

        apply_action(&mut state, Action::EnterCommandMode);
        apply_action(&mut state, Action::CommandChar('q'));
        assert!(!apply_action(&mut state, Action::ExecuteCommand));
    }

    #[test]
    fn test_resize_event() {
        assert_eq!(handle_event(Event::Resize(80, 24), &AppMode::Normal), Action::Resize(80, 24));
    }
}
