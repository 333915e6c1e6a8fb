use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::app::{Focus, Model};

use super::{
    DOC_WIDTH_PERCENT, DOCUMENT_CHROME_ROWS, DOCUMENT_LEFT_PADDING, TOPICS_WIDTH_PERCENT,
    overlays, status,
};

pub fn split_main_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(TOPICS_WIDTH_PERCENT),
            Constraint::Percentage(DOC_WIDTH_PERCENT),
        ])
        .split(area)
}

/// Render the complete UI.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();

    let toast_active = model.active_toast().is_some();
    let link_active = model.view().selected_link_spot().is_some();
    let footer_rows = 1 + u16::from(toast_active) + u16::from(link_active);
    let main_area = Rect {
        height: area.height.saturating_sub(footer_rows),
        ..area
    };
    let footer_row = |n: u16| Rect {
        y: area.y + area.height.saturating_sub(n),
        height: 1,
        ..area
    };

    let chunks = split_main_columns(main_area);
    render_topics(model, frame, chunks[0]);
    render_document(model, frame, chunks[1]);

    status::render_status_bar(model, frame, footer_row(1));
    if toast_active {
        status::render_toast_bar(model, frame, footer_row(2));
    }
    if link_active {
        status::render_link_bar(model, frame, footer_row(footer_rows));
    }

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_topics(model: &Model, frame: &mut Frame, area: Rect) {
    let view = model.view();
    let topics = view.topics();
    let focused = model.focus == Focus::Topics;
    let cursor = if focused {
        Some(model.topic_cursor)
    } else {
        view.selected_topic()
    };

    let visible_rows = area.height.saturating_sub(2) as usize;
    let start = cursor
        .unwrap_or(0)
        .saturating_sub(visible_rows.saturating_sub(1));
    let end = (start + visible_rows).min(topics.len());

    let items: Vec<Line> = topics
        .iter()
        .enumerate()
        .skip(start)
        .take(end.saturating_sub(start))
        .map(|(i, topic)| {
            let marker = if view.selected_topic() == Some(i) {
                "*"
            } else {
                " "
            };
            let style = if view.selected_topic() == Some(i) {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let style = if focused && model.topic_cursor == i {
                style.reversed()
            } else {
                style
            };
            Line::styled(format!("{marker} {}", topic.title), style)
        })
        .collect();

    let block = Block::default()
        .title("Topics")
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        });

    frame.render_widget(Paragraph::new(items).block(block), area);
}

fn render_document(model: &mut Model, frame: &mut Frame, area: Rect) {
    // The viewport follows the pane so scrolling and link reveal match
    // what is on screen.
    let rows = area.height.saturating_sub(DOCUMENT_CHROME_ROWS);
    model.view_mut().viewport_mut().resize(rows);

    let view = model.view();
    let title = view
        .shown()
        .map_or_else(|| "(no topic)".to_string(), |t| t.title.clone());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .padding(Padding::left(DOCUMENT_LEFT_PADDING))
        .border_style(if model.focus == Focus::Document {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        });

    frame.render_widget(Paragraph::new(view.visible_lines()).block(block), area);
}
