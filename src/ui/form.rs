//! Submission form shown while no task is tracked.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::config::RequestDefaults;
use crate::model::{DurationTarget, GenerationRequest, Mood, RequestError};
use crate::ui::theme::{ACCENT, ACTIVE_HIGHLIGHT, MUTED, POPUP_BORDER, STATUS_ERROR, TEXT};

/// Longest topic accepted by the input field.
pub const MAX_TOPIC_LEN: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Topic,
    Duration,
    Mood,
}

impl FormField {
    const ORDER: [FormField; 3] = [FormField::Topic, FormField::Duration, FormField::Mood];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormState {
    pub topic: String,
    pub duration: DurationTarget,
    pub mood: Mood,
    pub focus: FormField,
    /// Validation message from the last submit attempt.
    pub error: Option<String>,
    /// Set while the submit request is in flight.
    pub submitting: bool,
}

impl FormState {
    pub fn new(defaults: &RequestDefaults) -> Self {
        Self {
            duration: defaults.duration,
            mood: defaults.mood,
            ..Self::default()
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        if self.focus == FormField::Topic && self.topic.chars().count() < MAX_TOPIC_LEN {
            self.topic.push(ch);
            self.error = None;
        }
    }

    pub fn backspace(&mut self) {
        if self.focus == FormField::Topic {
            self.topic.pop();
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Cycle the focused selector forward (`forward`) or back.
    pub fn cycle(&mut self, forward: bool) {
        match self.focus {
            FormField::Topic => {}
            FormField::Duration => {
                self.duration = if forward {
                    self.duration.next()
                } else {
                    self.duration.prev()
                };
            }
            FormField::Mood => {
                self.mood = if forward {
                    self.mood.next()
                } else {
                    self.mood.prev()
                };
            }
        }
    }

    /// Build a request from the current input, recording the validation
    /// error on the form when it is rejected.
    pub fn to_request(&mut self) -> Result<GenerationRequest, RequestError> {
        match GenerationRequest::new(self.topic.trim(), self.duration, self.mood) {
            Ok(request) => {
                self.error = None;
                Ok(request)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                self.focus = FormField::Topic;
                Err(err)
            }
        }
    }
}

pub fn render_form(frame: &mut Frame, area: Rect, form: &FormState) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" New Generation ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));

    let topic = if form.topic.is_empty() && form.focus != FormField::Topic {
        Span::styled("e.g. How to stop procrastinating", Style::default().fg(MUTED))
    } else {
        Span::styled(form.topic.clone(), Style::default().fg(TEXT))
    };
    let mut topic_line = vec![label("Topic", form.focus == FormField::Topic), topic];
    if form.focus == FormField::Topic {
        topic_line.push(Span::styled("▏", Style::default().fg(ACCENT)));
    }

    let mut lines = vec![
        Line::from(""),
        Line::from(topic_line),
        Line::from(""),
        Line::from(vec![
            label("Duration", form.focus == FormField::Duration),
            selector(form.duration.label(), form.focus == FormField::Duration),
        ]),
        Line::from(""),
        Line::from(vec![
            label("Mood", form.focus == FormField::Mood),
            selector(form.mood.label(), form.focus == FormField::Mood),
        ]),
        Line::from(""),
    ];

    if form.submitting {
        lines.push(Line::from(Span::styled(
            "  Submitting...",
            Style::default().fg(MUTED),
        )));
    } else if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            Style::default().fg(STATUS_ERROR),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "  Press Enter to generate",
            Style::default().fg(MUTED),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn label(name: &str, focused: bool) -> Span<'static> {
    let style = if focused {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT)
    };
    Span::styled(format!("  {:<10}", name), style)
}

fn selector(value: &str, focused: bool) -> Span<'static> {
    if focused {
        Span::styled(
            format!("◀ {} ▶", value),
            Style::default()
                .fg(TEXT)
                .bg(ACTIVE_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(format!("  {}  ", value), Style::default().fg(TEXT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_come_from_config() {
        let form = FormState::new(&RequestDefaults {
            duration: DurationTarget::Long,
            mood: Mood::Funny,
        });
        assert_eq!(form.duration, DurationTarget::Long);
        assert_eq!(form.mood, Mood::Funny);
        assert_eq!(form.focus, FormField::Topic);
    }

    #[test]
    fn typing_only_edits_topic_field() {
        let mut form = FormState::default();
        form.insert_char('a');
        form.focus_next();
        form.insert_char('b');
        assert_eq!(form.topic, "a");
        form.focus_prev();
        form.backspace();
        assert_eq!(form.topic, "");
    }

    #[test]
    fn focus_wraps_around() {
        assert_eq!(FormField::Mood.next(), FormField::Topic);
        assert_eq!(FormField::Topic.prev(), FormField::Mood);
    }

    #[test]
    fn cycle_changes_focused_selector() {
        let mut form = FormState::default();
        form.cycle(true);
        assert_eq!(form.duration, DurationTarget::Short);

        form.focus = FormField::Duration;
        form.cycle(true);
        assert_eq!(form.duration, DurationTarget::Medium);
        form.cycle(false);
        form.cycle(false);
        assert_eq!(form.duration, DurationTarget::Long);

        form.focus = FormField::Mood;
        form.cycle(false);
        assert_eq!(form.mood, Mood::Serious);
    }

    #[test]
    fn blank_topic_is_rejected_on_form() {
        let mut form = FormState::default();
        form.focus = FormField::Mood;
        form.insert_char(' ');
        form.topic.push_str("   ");
        assert!(form.to_request().is_err());
        assert!(form.error.is_some());
        assert_eq!(form.focus, FormField::Topic);
    }

    #[test]
    fn valid_form_builds_request() {
        let mut form = FormState::default();
        for ch in "  Rust ".chars() {
            form.insert_char(ch);
        }
        let request = form.to_request().unwrap();
        assert_eq!(request.topic(), "Rust");
        assert_eq!(request.duration_target(), DurationTarget::Short);
        assert_eq!(request.mood(), Mood::Motivational);
    }

    #[test]
    fn topic_length_is_capped() {
        let mut form = FormState::default();
        for _ in 0..MAX_TOPIC_LEN + 10 {
            form.insert_char('x');
        }
        assert_eq!(form.topic.chars().count(), MAX_TOPIC_LEN);
    }
}
