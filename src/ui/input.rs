use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::GenerationRequest;
use crate::ui::app::App;
use crate::ui::result::{ResultState, ViewMode};

/// Action the runtime must carry out after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// No further action needed (handled internally).
    None,
    /// Submit the request built from the form.
    Submit(GenerationRequest),
    /// Discard the tracked task and return to the form.
    Reset,
    Quit,
}

pub fn handle_key(app: &mut App, state: &ResultState, key: KeyEvent) -> InputAction {
    if key.kind != KeyEventKind::Press {
        return InputAction::None;
    }

    if is_ctrl_char(key, 'c') || is_ctrl_char(key, 'q') {
        return InputAction::Quit;
    }

    match ViewMode::of(state) {
        ViewMode::Form => handle_form_key(app, key),
        ViewMode::Progress => match key.code {
            KeyCode::Esc => InputAction::Reset,
            KeyCode::Char('q') => InputAction::Quit,
            _ => InputAction::None,
        },
        ViewMode::Success | ViewMode::Error => match key.code {
            KeyCode::Char('r') | KeyCode::Esc | KeyCode::Enter => InputAction::Reset,
            KeyCode::Char('q') => InputAction::Quit,
            KeyCode::Up => {
                app.scroll_up();
                InputAction::None
            }
            KeyCode::Down => {
                app.scroll_down();
                InputAction::None
            }
            _ => InputAction::None,
        },
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) -> InputAction {
    if app.form().submitting {
        return InputAction::None;
    }

    let form = app.form_mut();
    match key.code {
        KeyCode::Enter => match form.to_request() {
            Ok(request) => return InputAction::Submit(request),
            Err(err) => tracing::debug!(error = %err, "Form rejected"),
        },
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Left => form.cycle(false),
        KeyCode::Right => form.cycle(true),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.insert_char(ch)
        }
        _ => {}
    }
    InputAction::None
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RequestDefaults;
    use crate::model::TaskHandle;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn processing() -> ResultState {
        ResultState::Processing {
            task: TaskHandle::new("t"),
            checks: 0,
            animation_tick: 0,
        }
    }

    fn failed() -> ResultState {
        ResultState::Failed {
            task: None,
            reason: "x".into(),
            detail: None,
        }
    }

    #[test]
    fn typing_q_in_form_edits_topic() {
        let mut app = App::new(&RequestDefaults::default());
        let action = handle_key(&mut app, &ResultState::Idle, key(KeyCode::Char('q')));
        assert_eq!(action, InputAction::None);
        assert_eq!(app.form().topic, "q");
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        let mut app = App::new(&RequestDefaults::default());
        for state in [ResultState::Idle, processing(), failed()] {
            assert_eq!(handle_key(&mut app, &state, ctrl('c')), InputAction::Quit);
        }
    }

    #[test]
    fn enter_submits_valid_form() {
        let mut app = App::new(&RequestDefaults::default());
        for ch in "Rust".chars() {
            handle_key(&mut app, &ResultState::Idle, key(KeyCode::Char(ch)));
        }
        match handle_key(&mut app, &ResultState::Idle, key(KeyCode::Enter)) {
            InputAction::Submit(request) => assert_eq!(request.topic(), "Rust"),
            other => panic!("Expected Submit, got {:?}", other),
        }
    }

    #[test]
    fn enter_on_empty_form_does_not_submit() {
        let mut app = App::new(&RequestDefaults::default());
        let action = handle_key(&mut app, &ResultState::Idle, key(KeyCode::Enter));
        assert_eq!(action, InputAction::None);
        assert!(app.form().error.is_some());
    }

    #[test]
    fn keys_ignored_while_submitting() {
        let mut app = App::new(&RequestDefaults::default());
        app.form_mut().submitting = true;
        handle_key(&mut app, &ResultState::Idle, key(KeyCode::Char('a')));
        assert!(app.form().topic.is_empty());
    }

    #[test]
    fn escape_cancels_processing() {
        let mut app = App::new(&RequestDefaults::default());
        assert_eq!(
            handle_key(&mut app, &processing(), key(KeyCode::Esc)),
            InputAction::Reset
        );
        assert_eq!(
            handle_key(&mut app, &processing(), key(KeyCode::Char('r'))),
            InputAction::None
        );
    }

    #[test]
    fn r_resets_terminal_state() {
        let mut app = App::new(&RequestDefaults::default());
        assert_eq!(
            handle_key(&mut app, &failed(), key(KeyCode::Char('r'))),
            InputAction::Reset
        );
        assert_eq!(
            handle_key(&mut app, &failed(), key(KeyCode::Char('q'))),
            InputAction::Quit
        );
    }
}
