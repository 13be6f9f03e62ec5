use crate::ui::app::App;
use crate::ui::footer::Footer;
use crate::ui::form::render_form;
use crate::ui::header::Header;
use crate::ui::layout::{layout_regions, panel_rect};
use crate::ui::result::{render_result, ResultState, ViewMode};
use ratatui::widgets::Clear;
use ratatui::Frame;

/// Draw one frame. Reads state only; all changes go through the session.
pub fn draw(frame: &mut Frame<'_>, app: &App, state: &ResultState, service: &str) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);
    let mode = ViewMode::of(state);

    frame.render_widget(Header::new(service).widget(state), header);
    frame.render_widget(Clear, body);

    let panel = panel_rect(body);
    if panel.width > 0 && panel.height > 0 {
        match mode {
            ViewMode::Form => render_form(frame, panel, app.form()),
            _ => render_result(frame, panel, state, app.scroll()),
        }
    }

    frame.render_widget(Footer::new(mode).widget(footer), footer);
}
