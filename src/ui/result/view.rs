//! Rendering of the task panels (progress, success, error).

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::TaskResult;
use crate::ui::theme::{ACCENT, MUTED, POPUP_BORDER, STATUS_ERROR, STATUS_OK, TEXT};

use super::state::ResultState;

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub const PROGRESS_MESSAGE: &str = "Generating Assets...";
pub const SUCCESS_MESSAGE: &str = "Generation Complete!";
pub const DOWNLOAD_LABEL: &str = "Download Asset Kit (.zip)";

/// What the front-end shows; one mode per [`ResultState`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Form,
    Progress,
    Success,
    Error,
}

impl ViewMode {
    pub fn of(state: &ResultState) -> Self {
        match state {
            ResultState::Idle => Self::Form,
            ResultState::Processing { .. } => Self::Progress,
            ResultState::Completed { .. } => Self::Success,
            ResultState::Failed { .. } => Self::Error,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Form => " New Generation ",
            Self::Progress => " Generating ",
            Self::Success => " Result ",
            Self::Error => " Error ",
        }
    }

    /// Key hint for the footer.
    pub fn hint(self) -> &'static str {
        match self {
            Self::Form => " Tab: Next field │ ←/→: Change │ Enter: Generate │ Ctrl+C: Quit",
            Self::Progress => " Esc: Cancel │ q: Quit",
            Self::Success | Self::Error => " r: New generation │ ↑/↓: Scroll │ q: Quit",
        }
    }
}

/// Render the panel for a non-idle state into `area`.
///
/// `scroll` is the vertical offset for long scene lists.
pub fn render_result(frame: &mut Frame, area: Rect, state: &ResultState, scroll: u16) {
    let mode = ViewMode::of(state);
    if mode == ViewMode::Form {
        return;
    }

    frame.render_widget(Clear, area);

    let border = match mode {
        ViewMode::Error => STATUS_ERROR,
        _ => POPUP_BORDER,
    };
    let block = Block::default()
        .title(mode.title())
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let paragraph = Paragraph::new(panel_lines(state))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Styled content of the panel for `state`. Empty for `Idle`.
pub fn panel_lines(state: &ResultState) -> Vec<Line<'static>> {
    match state {
        ResultState::Idle => Vec::new(),

        ResultState::Processing {
            task,
            checks,
            animation_tick,
        } => {
            let spinner = SPINNER_FRAMES[(*animation_tick as usize) % SPINNER_FRAMES.len()];
            vec![
                Line::from(""),
                Line::from(vec![
                    Span::styled(format!("  {} ", spinner), Style::default().fg(STATUS_OK)),
                    Span::styled(PROGRESS_MESSAGE, Style::default().fg(TEXT)),
                ]),
                Line::from(""),
                Line::from(Span::styled(
                    format!("  Task: {}", task),
                    Style::default().fg(MUTED),
                )),
                Line::from(Span::styled(
                    format!("  Status checks: {}", checks),
                    Style::default().fg(MUTED),
                )),
            ]
        }

        ResultState::Completed { result, .. } => success_lines(result),

        ResultState::Failed { reason, detail, .. } => {
            let mut lines = vec![
                Line::from(""),
                Line::from(vec![
                    Span::styled("  ✗ ", Style::default().fg(STATUS_ERROR)),
                    Span::styled(
                        reason.clone(),
                        Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
                    ),
                ]),
            ];
            if let Some(detail) = detail.as_deref().filter(|d| *d != reason.as_str()) {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("  {}", detail),
                    Style::default().fg(MUTED),
                )));
            }
            lines
        }
    }
}

fn success_lines(result: &TaskResult) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  ✓ ", Style::default().fg(STATUS_OK)),
            Span::styled(
                SUCCESS_MESSAGE,
                Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    if let Some(url) = result.download_url() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(format!("  {}: ", DOWNLOAD_LABEL), Style::default().fg(TEXT)),
            Span::styled(
                url.to_string(),
                Style::default().fg(ACCENT).add_modifier(Modifier::UNDERLINED),
            ),
        ]));
    } else if let Some(path) = result.file_path() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("  Assets: ", Style::default().fg(TEXT)),
            Span::styled(path.to_string(), Style::default().fg(MUTED)),
        ]));
    }

    // A completed result without preview is still a valid result.
    let Some(preview) = result.preview() else {
        return lines;
    };

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  {}", preview.title),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )));

    for scene in &preview.scenes {
        lines.push(Line::from(""));
        let heading = match &scene.chapter {
            Some(chapter) => format!("  Scene {} · {}", scene.id, chapter),
            None => format!("  Scene {}", scene.id),
        };
        lines.push(Line::from(Span::styled(
            heading,
            Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(vec![
            Span::styled("    Narration: ", Style::default().fg(MUTED)),
            Span::styled(scene.narration.clone(), Style::default().fg(TEXT)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("    Visual: ", Style::default().fg(MUTED)),
            Span::styled(
                scene.visual_prompt.clone(),
                Style::default().fg(TEXT).add_modifier(Modifier::ITALIC),
            ),
        ]));
    }

    lines
}
