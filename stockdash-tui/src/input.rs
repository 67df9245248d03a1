//! Keyboard input dispatch — quit keys → overlays → dashboard keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // 1. Quit works everywhere.
    if ctrl && matches!(key.code, KeyCode::Char('c' | 'q')) {
        app.running = false;
        return;
    }

    // 2. Overlays consume input next.
    match app.overlay {
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 3. Dashboard keys.
    if ctrl {
        match key.code {
            KeyCode::Char('t') => app.toggle_theme(),
            KeyCode::Char('x') => app.export_peers(),
            KeyCode::Char('e') => {
                app.overlay = Overlay::ErrorHistory;
                app.error_scroll = 0;
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Enter => app.submit(),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Esc => app.input.clear(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) && !c.is_control() => {
            app.type_char(c);
        }
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.overlay = Overlay::None,
        KeyCode::Char('e') if ctrl => app.overlay = Overlay::None,
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ErrorCategory;
    use crate::theme::ThemeMode;
    use crate::worker::{WorkerCommand, WorkerResponse};
    use crossterm::event::KeyEventState;
    use std::path::PathBuf;
    use std::sync::mpsc::{self, Receiver, Sender};

    fn make_app() -> (AppState, Receiver<WorkerCommand>, Sender<WorkerResponse>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        (AppState::new(cmd_tx, resp_rx, PathBuf::from(".")), cmd_rx, resp_tx)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(app: &mut AppState, s: &str) {
        for c in s.chars() {
            handle_key(app, press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn typing_upper_cases_and_backspace_deletes() {
        let (mut app, _rx, _tx) = make_app();
        type_str(&mut app, "infyx");
        handle_key(&mut app, press(KeyCode::Backspace));
        assert_eq!(app.input, "INFY");
    }

    #[test]
    fn enter_submits_current_input() {
        let (mut app, rx, _tx) = make_app();
        type_str(&mut app, "tcs");
        handle_key(&mut app, press(KeyCode::Enter));
        assert!(app.fetch.is_loading());
        assert!(matches!(rx.try_recv(), Ok(WorkerCommand::Fetch { seq: 1, .. })));
    }

    #[test]
    fn release_events_are_ignored() {
        let (mut app, _rx, _tx) = make_app();
        let mut key = press(KeyCode::Char('a'));
        key.kind = KeyEventKind::Release;
        key.state = KeyEventState::NONE;
        handle_key(&mut app, key);
        assert!(app.input.is_empty());
    }

    #[test]
    fn ctrl_chars_do_not_reach_the_input() {
        let (mut app, _rx, _tx) = make_app();
        handle_key(&mut app, ctrl('t'));
        assert_eq!(app.theme_mode, ThemeMode::Light);
        assert!(app.input.is_empty());
    }

    #[test]
    fn esc_clears_input_when_no_overlay() {
        let (mut app, _rx, _tx) = make_app();
        type_str(&mut app, "abc");
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(app.input.is_empty());
        assert!(app.running);
    }

    #[test]
    fn error_overlay_opens_scrolls_and_closes() {
        let (mut app, _rx, _tx) = make_app();
        for i in 0..3 {
            app.push_error(ErrorCategory::Network, format!("e{i}"), String::new());
        }
        handle_key(&mut app, ctrl('e'));
        assert_eq!(app.overlay, Overlay::ErrorHistory);

        handle_key(&mut app, press(KeyCode::Char('j')));
        handle_key(&mut app, press(KeyCode::Char('j')));
        handle_key(&mut app, press(KeyCode::Char('j')));
        assert_eq!(app.error_scroll, 2);

        // Typing goes nowhere while the overlay is up.
        handle_key(&mut app, press(KeyCode::Char('z')));
        assert!(app.input.is_empty());

        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn quit_keys() {
        for c in ['c', 'q'] {
            let (mut app, _rx, _tx) = make_app();
            app.overlay = Overlay::ErrorHistory;
            handle_key(&mut app, ctrl(c));
            assert!(!app.running);
        }
    }

    #[test]
    fn plain_q_is_a_ticker_character() {
        let (mut app, _rx, _tx) = make_app();
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(app.running);
        assert_eq!(app.input, "Q");
    }
}
