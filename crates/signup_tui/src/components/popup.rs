use ratatui::{
    layout::Rect,
    style::Style,
    symbols,
    widgets::{Block, Borders, Clear},
};

use crate::{theme::Theme, tui::Frame};

/// Centered rectangle of a fixed size, clamped to `area`.
pub fn centered_rect_fixed(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);

    let x = area.x.saturating_add((area.width.saturating_sub(w)) / 2);
    let y = area.y.saturating_add((area.height.saturating_sub(h)) / 2);

    Rect {
        x,
        y,
        width: w,
        height: h,
    }
}

/// Clear `area` and draw a rounded, titled frame. Returns the inner area.
pub fn draw_popup_frame(frame: &mut Frame<'_>, area: Rect, title: &str, theme: &Theme) -> Rect {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {title} "))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_set(symbols::border::ROUNDED)
        .border_style(theme.focused_border())
        .style(Style::default().fg(theme.roles.text).bg(theme.roles.background));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}
