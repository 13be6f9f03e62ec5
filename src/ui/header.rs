use crate::ui::result::{ResultState, ViewMode};
use crate::ui::theme::{ACCENT, GLOBAL_BORDER, MUTED, STATUS_ERROR, STATUS_OK, TEXT};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header<'a> {
    service: &'a str,
}

impl<'a> Header<'a> {
    pub fn new(service: &'a str) -> Self {
        Self { service }
    }

    pub fn widget(&self, state: &ResultState) -> Paragraph<'static> {
        let text_style = Style::default().fg(TEXT);
        let separator_style = Style::default().fg(MUTED);
        let (marker, status, status_style) = match ViewMode::of(state) {
            ViewMode::Form => ("○", "Ready".to_string(), Style::default().fg(MUTED)),
            ViewMode::Progress => (
                "●",
                format!("Processing {}", state.task().map(|t| t.as_str()).unwrap_or("")),
                Style::default().fg(ACCENT),
            ),
            ViewMode::Success => ("●", "Completed".to_string(), Style::default().fg(STATUS_OK)),
            ViewMode::Error => ("●", "Failed".to_string(), Style::default().fg(STATUS_ERROR)),
        };

        let line = Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled(
                "Antiflow",
                text_style.fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  │  ", separator_style),
            Span::styled(marker, status_style),
            Span::styled(" ", text_style),
            Span::styled(status, status_style),
            Span::styled("  │  ", separator_style),
            Span::styled(self.service.to_string(), separator_style),
        ]);

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
