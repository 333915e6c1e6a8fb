use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let view = model.view();
    let name = model.current_topic_name().unwrap_or("(none)");
    let viewport = view.viewport();
    let line_info = format!(
        "Line {}/{}",
        (viewport.offset() + 1).min(viewport.total_lines()),
        viewport.total_lines()
    );
    let history = &model.browser;
    let status = format!(
        " {}  [{}%]  {}  History {}/{}  ?:help",
        name,
        viewport.scroll_percent(),
        line_info,
        history.history_position(),
        history.history().len()
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_link_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(spot) = model.view().selected_link_spot() else {
        return;
    };
    let bar = Paragraph::new(format!("link: {}  Enter: follow  Tab: next", spot.url))
        .style(Style::default().bg(Color::Blue).fg(Color::White));
    frame.render_widget(bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
