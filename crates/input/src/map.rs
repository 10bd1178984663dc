//! Key mapping from terminal events to game input.
//!
//! What a key means depends on the screen: while a round is being played
//! every letter is a typing attempt, so menu shortcuts that are letters only
//! apply elsewhere.

use crate::types::{Screen, SessionAction};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Input the game loop should act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// A typed letter, upper-cased.
    Letter(char),
    Action(SessionAction),
    Quit,
}

/// Map a key event to game input for the given screen.
pub fn handle_key_event(key: KeyEvent, screen: Screen) -> Option<Input> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if should_quit(key, screen) {
        return Some(Input::Quit);
    }
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }

    match key.code {
        KeyCode::Enter => confirm(screen).map(Input::Action),
        KeyCode::Char(' ') if screen != Screen::Playing => confirm(screen).map(Input::Action),

        KeyCode::Esc => match screen {
            Screen::Playing => Some(Input::Action(SessionAction::Pause)),
            Screen::Paused => Some(Input::Action(SessionAction::Resume)),
            _ => None,
        },

        KeyCode::Tab => Some(Input::Action(SessionAction::ToggleMute)),
        KeyCode::Home => Some(Input::Action(SessionAction::Home)),

        KeyCode::Char(c) if c.is_ascii_alphabetic() => {
            if screen == Screen::Playing {
                return Some(Input::Letter(c.to_ascii_uppercase()));
            }
            match c.to_ascii_lowercase() {
                'h' if screen != Screen::Start => Some(Input::Action(SessionAction::Home)),
                'm' => Some(Input::Action(SessionAction::ToggleMute)),
                _ => None,
            }
        }

        _ => None,
    }
}

/// The "primary button" of each screen.
fn confirm(screen: Screen) -> Option<SessionAction> {
    match screen {
        Screen::Start => Some(SessionAction::Start),
        Screen::Instructions => Some(SessionAction::Play),
        Screen::Paused => Some(SessionAction::Resume),
        Screen::GameOver => Some(SessionAction::PlayAgain),
        Screen::Playing => None,
    }
}

/// Check if key should quit the game.
///
/// Ctrl-C always quits; `q` only when it cannot be a typed letter.
pub fn should_quit(key: KeyEvent, screen: Screen) -> bool {
    (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        || (screen != Screen::Playing && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_letters_only_type_while_playing() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('a')), Screen::Playing),
            Some(Input::Letter('A'))
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('Q')), Screen::Playing),
            Some(Input::Letter('Q'))
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('a')), Screen::Paused), None);
        assert_eq!(handle_key_event(key(KeyCode::Char('7')), Screen::Playing), None);
    }

    #[test]
    fn test_enter_follows_screen() {
        let enter = key(KeyCode::Enter);
        assert_eq!(
            handle_key_event(enter, Screen::Start),
            Some(Input::Action(SessionAction::Start))
        );
        assert_eq!(
            handle_key_event(enter, Screen::Instructions),
            Some(Input::Action(SessionAction::Play))
        );
        assert_eq!(
            handle_key_event(enter, Screen::GameOver),
            Some(Input::Action(SessionAction::PlayAgain))
        );
        assert_eq!(handle_key_event(enter, Screen::Playing), None);
    }

    #[test]
    fn test_escape_toggles_pause() {
        let esc = key(KeyCode::Esc);
        assert_eq!(
            handle_key_event(esc, Screen::Playing),
            Some(Input::Action(SessionAction::Pause))
        );
        assert_eq!(
            handle_key_event(esc, Screen::Paused),
            Some(Input::Action(SessionAction::Resume))
        );
        assert_eq!(handle_key_event(esc, Screen::Start), None);
    }

    #[test]
    fn test_menu_shortcuts() {
        assert_eq!(
            handle_key_event(key(KeyCode::Tab), Screen::Playing),
            Some(Input::Action(SessionAction::ToggleMute))
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('h')), Screen::GameOver),
            Some(Input::Action(SessionAction::Home))
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('h')), Screen::Playing),
            Some(Input::Letter('H'))
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Home), Screen::Playing),
            Some(Input::Action(SessionAction::Home))
        );
    }

    #[test]
    fn test_quit_keys() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(should_quit(ctrl_c, Screen::Playing));
        assert!(should_quit(key(KeyCode::Char('q')), Screen::Start));
        assert!(!should_quit(key(KeyCode::Char('q')), Screen::Playing));
        assert_eq!(handle_key_event(ctrl_c, Screen::Playing), Some(Input::Quit));
    }

    #[test]
    fn test_release_events_ignored() {
        let mut release = key(KeyCode::Char('a'));
        release.kind = KeyEventKind::Release;
        assert_eq!(handle_key_event(release, Screen::Playing), None);
    }
}
