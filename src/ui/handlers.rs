use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::AppState;

pub fn handle_key_event(app_state: &mut AppState, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app_state.should_quit = true;
        return;
    }

    if key.code != KeyCode::Char('g') {
        app_state.g_pressed = false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app_state.should_quit = true,
        KeyCode::Char('j') | KeyCode::Down => app_state.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app_state.move_cursor(-1),
        KeyCode::PageDown => app_state.move_cursor(app_state.visible_rows as isize),
        KeyCode::PageUp => app_state.move_cursor(-(app_state.visible_rows as isize)),
        KeyCode::Char('g') => {
            if app_state.g_pressed {
                app_state.jump_to_first_row();
                app_state.g_pressed = false;
            } else {
                app_state.g_pressed = true;
            }
        }
        KeyCode::Char('G') => app_state.jump_to_last_row(),
        KeyCode::Char(']') | KeyCode::Tab => app_state.next_view(),
        KeyCode::Char('[') | KeyCode::BackTab => app_state.prev_view(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn press(state: &mut AppState, code: KeyCode) {
        handle_key_event(state, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn q_and_ctrl_c_quit() {
        let mut state = AppState::new(Vec::new(), PathBuf::from("x.xlsx"));
        press(&mut state, KeyCode::Char('q'));
        assert!(state.should_quit);

        let mut state = AppState::new(Vec::new(), PathBuf::from("x.xlsx"));
        handle_key_event(&mut state, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(state.should_quit);
    }

    #[test]
    fn gg_needs_two_presses() {
        let mut state = AppState::new(Vec::new(), PathBuf::from("x.xlsx"));
        press(&mut state, KeyCode::Char('g'));
        assert!(state.g_pressed);
        press(&mut state, KeyCode::Char('j'));
        assert!(!state.g_pressed);
        press(&mut state, KeyCode::Char('g'));
        press(&mut state, KeyCode::Char('g'));
        assert!(!state.g_pressed);
        assert_eq!(state.status_message, "Jumped to first row");
    }

    #[test]
    fn view_keys_are_harmless_without_views() {
        let mut state = AppState::new(Vec::new(), PathBuf::from("x.xlsx"));
        press(&mut state, KeyCode::Tab);
        press(&mut state, KeyCode::Char('['));
        press(&mut state, KeyCode::Char('G'));
        assert_eq!(state.current_view, 0);
        assert_eq!(state.selected_row, 0);
    }
}
