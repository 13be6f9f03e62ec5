use crate::config::RequestDefaults;
use crate::ui::form::FormState;
use crate::ui::result::{ResultState, ViewMode};

/// View-local state of the interactive front-end.
///
/// The task lifecycle itself lives in the session; `App` only holds what the
/// screen needs on top of it (form input, scroll offset, quit flag).
pub struct App {
    should_quit: bool,
    size: Option<(u16, u16)>,
    form: FormState,
    defaults: RequestDefaults,
    scroll: u16,
    last_mode: ViewMode,
}

impl App {
    pub fn new(defaults: &RequestDefaults) -> Self {
        Self {
            should_quit: false,
            size: None,
            form: FormState::new(defaults),
            defaults: defaults.clone(),
            scroll: 0,
            last_mode: ViewMode::Form,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn on_paste(&mut self, text: &str) {
        if self.form.submitting {
            return;
        }
        for ch in text.chars().filter(|c| !c.is_control()) {
            self.form.insert_char(ch);
        }
    }

    pub fn on_resize(&mut self, cols: u16, rows: u16) {
        self.size = Some((cols, rows));
    }

    pub fn size(&self) -> Option<(u16, u16)> {
        self.size
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    /// Keep view-local state in step with the session state.
    ///
    /// Returning to the form starts a fresh form with the last topic kept;
    /// any panel change resets the scroll offset.
    pub fn sync(&mut self, state: &ResultState) {
        let mode = ViewMode::of(state);
        if mode == self.last_mode {
            return;
        }
        self.scroll = 0;
        self.form.submitting = false;
        if mode == ViewMode::Form {
            let topic = std::mem::take(&mut self.form.topic);
            self.form = FormState::new(&self.defaults);
            self.form.topic = topic;
        }
        self.last_mode = mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DurationTarget, Mood, TaskHandle};

    fn processing() -> ResultState {
        ResultState::Processing {
            task: TaskHandle::new("t"),
            checks: 0,
            animation_tick: 0,
        }
    }

    #[test]
    fn paste_strips_control_characters() {
        let mut app = App::new(&RequestDefaults::default());
        app.on_paste("line one\nline two");
        assert_eq!(app.form().topic, "line oneline two");
    }

    #[test]
    fn scroll_resets_on_mode_change() {
        let mut app = App::new(&RequestDefaults::default());
        app.sync(&processing());
        app.scroll_down();
        app.scroll_down();
        assert_eq!(app.scroll(), 2);
        app.sync(&ResultState::Failed {
            task: None,
            reason: "x".into(),
            detail: None,
        });
        assert_eq!(app.scroll(), 0);
        app.scroll_up();
        assert_eq!(app.scroll(), 0);
    }

    #[test]
    fn returning_to_form_restores_defaults_and_keeps_topic() {
        let defaults = RequestDefaults {
            duration: DurationTarget::Medium,
            mood: Mood::Serious,
        };
        let mut app = App::new(&defaults);
        app.on_paste("Rust");
        app.form_mut().duration = DurationTarget::Long;
        app.form_mut().submitting = true;

        app.sync(&processing());
        assert!(!app.form().submitting);
        app.sync(&ResultState::Idle);

        assert_eq!(app.form().topic, "Rust");
        assert_eq!(app.form().duration, DurationTarget::Medium);
        assert_eq!(app.form().mood, Mood::Serious);
    }
}
