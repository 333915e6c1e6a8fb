//! Colors and modifiers for rendered topic runs.
//!
//! Uses ANSI colors that adapt to the terminal's color palette.

use ratatui::style::{Color, Modifier, Style};

use crate::document;

/// Terminal style for a rendered run.
///
/// Headers take a color per level; bold, italic and link flags stack on top.
pub fn style_for_run(run: document::Style) -> Style {
    let mut style = match run.header {
        0 => Style::default(),
        1 => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        2 => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        3 => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        4 => Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        5 => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    };

    if run.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if run.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if run.link {
        style = style
            .fg(Color::Blue)
            .add_modifier(Modifier::UNDERLINED);
    }
    style
}

/// The link under the link cursor.
pub fn selected_link_style(base: Style) -> Style {
    base.add_modifier(Modifier::REVERSED)
}

/// Inline image labels.
pub fn image_style(missing: bool) -> Style {
    if missing {
        Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::ITALIC)
    } else {
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::ITALIC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_run_has_default_style() {
        assert_eq!(style_for_run(document::Style::plain()), Style::default());
    }

    #[test]
    fn test_modifiers_stack() {
        let run = document::Style::plain().with_bold().with_italic();
        let style = style_for_run(run);
        assert!(style.add_modifier.contains(Modifier::BOLD));
        assert!(style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn test_header_levels_have_colors() {
        for level in 1..=6 {
            let style = style_for_run(document::Style::plain().with_header(level));
            assert!(style.fg.is_some(), "level {level}");
            assert!(style.add_modifier.contains(Modifier::BOLD));
        }
    }

    #[test]
    fn test_link_in_header_uses_link_color() {
        let style = style_for_run(document::Style::plain().with_header(2).with_link());
        assert_eq!(style.fg, Some(Color::Blue));
        assert!(style.add_modifier.contains(Modifier::UNDERLINED));
    }
}
