use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::Message;
use crate::app::model::{Focus, Model};

pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(*key, model),
        Event::Resize(width, height) => Some(Message::Resize(*width, *height)),
        _ => None,
    }
}

pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
    if model.help_visible {
        return Some(Message::HideHelp);
    }

    // History keys work in either pane
    if key.modifiers.contains(KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Left => Some(Message::Back),
            KeyCode::Right => Some(Message::Forward),
            KeyCode::Home => Some(Message::Home),
            _ => None,
        };
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Message::Quit),
            KeyCode::Char('l') => Some(Message::Redraw),
            _ => None,
        };
    }

    if model.focus == Focus::Topics {
        return match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Message::TopicDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Message::TopicUp),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Message::TopicSelect),
            KeyCode::Char('t') | KeyCode::Esc => Some(Message::ToggleTopicFocus),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Char('q') => Some(Message::Quit),
            _ => None,
        };
    }

    let viewport = model.view().viewport();
    let can_scroll_up = viewport.offset() > 0;
    let can_scroll_down = viewport.visible_range().end < viewport.total_lines();

    match key.code {
        KeyCode::Char('j') | KeyCode::Down if can_scroll_down => Some(Message::ScrollDown(1)),
        KeyCode::Char('k') | KeyCode::Up if can_scroll_up => Some(Message::ScrollUp(1)),
        KeyCode::Char(' ') | KeyCode::PageDown if can_scroll_down => Some(Message::PageDown),
        KeyCode::PageUp if can_scroll_up => Some(Message::PageUp),
        KeyCode::Char('g') => Some(Message::GoToTop),
        KeyCode::Char('G') => Some(Message::GoToBottom),

        KeyCode::Char('b') | KeyCode::Backspace => Some(Message::Back),
        KeyCode::Char('f') => Some(Message::Forward),
        KeyCode::Char('h') => Some(Message::Home),

        KeyCode::Tab => Some(Message::NextLink),
        KeyCode::BackTab => Some(Message::PrevLink),
        KeyCode::Enter => Some(Message::FollowLink),

        KeyCode::Char('t') => Some(Message::ToggleTopicFocus),
        KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),
        KeyCode::Char('q') | KeyCode::Esc => Some(Message::Quit),
        _ => None,
    }
}
