//! Line-oriented rendering for non-interactive commands.

use std::io::{self, Write};

use ratatui::text::Line;

use crate::ui::result::{panel_lines, ResultState, ViewMode, PROGRESS_MESSAGE};

/// Plain text for the panel of `state`.
///
/// Processing is a single status line so repeated checks stay readable in a
/// log; the other states reuse the interactive panel content.
pub fn render_lines(state: &ResultState) -> Vec<String> {
    match state {
        ResultState::Idle => Vec::new(),
        ResultState::Processing { task, checks, .. } => {
            vec![format!("{} task={} checks={}", PROGRESS_MESSAGE, task, checks)]
        }
        _ => panel_lines(state)
            .iter()
            .skip_while(|line| line.width() == 0)
            .map(line_text)
            .map(|text| text.trim_end().to_string())
            .collect(),
    }
}

fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

/// Prints a state whenever it differs from the last one printed.
pub struct TransitionReporter<W: Write> {
    out: W,
    last_mode: Option<ViewMode>,
    last_checks: u32,
}

impl<W: Write> TransitionReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_mode: None,
            last_checks: 0,
        }
    }

    /// Print `state` if its mode or check count changed.
    pub fn report(&mut self, state: &ResultState) -> io::Result<()> {
        let mode = ViewMode::of(state);
        let checks = state.checks();
        if self.last_mode == Some(mode) && self.last_checks == checks {
            return Ok(());
        }
        self.last_mode = Some(mode);
        self.last_checks = checks;

        for line in render_lines(state) {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
