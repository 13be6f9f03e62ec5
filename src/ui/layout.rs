use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the centered panel inside the body.
const PANEL_MAX_WIDTH: u16 = 90;

pub fn layout_regions(area: Rect) -> (Rect, Rect, Rect) {
    let header_height = area.height.min(3);
    let footer_height = 3.min(area.height.saturating_sub(header_height));
    let header = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: header_height,
    };
    let footer = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(footer_height),
        width: area.width,
        height: footer_height,
    };
    let body = Rect {
        x: area.x,
        y: area.y + header_height,
        width: area.width,
        height: area.height.saturating_sub(header_height + footer_height),
    };
    (header, body, footer)
}

/// Panel area within the body: full height, width capped and centered.
pub fn panel_rect(body: Rect) -> Rect {
    let width = body.width.min(PANEL_MAX_WIDTH);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((body.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(body)[1]
}
