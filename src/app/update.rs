use crate::app::Model;
use crate::app::model::{Focus, ToastLevel};
use crate::browser::LinkAction;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Scrolling
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,
    /// Go to beginning of topic
    GoToTop,
    /// Go to end of topic
    GoToBottom,

    // History
    /// Previous topic in history
    Back,
    /// Next topic in history
    Forward,
    /// Go to the home topic
    Home,

    // Links
    /// Select the next link in the topic
    NextLink,
    /// Select the previous link in the topic
    PrevLink,
    /// Follow the selected link
    FollowLink,

    // Topic list
    /// Move focus between the topic list and the document
    ToggleTopicFocus,
    /// Move the topic list cursor up
    TopicUp,
    /// Move the topic list cursor down
    TopicDown,
    /// Open the topic under the topic list cursor
    TopicSelect,
    /// Open a topic by index
    OpenTopic(usize),

    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here. Opening an
/// external link is queued on the model for the event loop to perform.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::ScrollUp(n) => model.view_mut().viewport_mut().scroll_up(n),
        Message::ScrollDown(n) => model.view_mut().viewport_mut().scroll_down(n),
        Message::PageUp => model.view_mut().viewport_mut().page_up(),
        Message::PageDown => model.view_mut().viewport_mut().page_down(),
        Message::GoToTop => model.view_mut().viewport_mut().go_to_top(),
        Message::GoToBottom => model.view_mut().viewport_mut().go_to_bottom(),

        Message::Back => {
            if !model.browser.back() {
                model.show_toast(ToastLevel::Info, "No previous topic");
            }
        }
        Message::Forward => {
            if !model.browser.forward() {
                model.show_toast(ToastLevel::Info, "No next topic");
            }
        }
        Message::Home => {
            if !model.browser.home() {
                let message = match model.browser.home_topic() {
                    Some(name) => format!("Home topic '{name}' not found"),
                    None => "No home topic configured".to_string(),
                };
                model.show_toast(ToastLevel::Warning, message);
            }
        }

        Message::NextLink => model.view_mut().cycle_link(1),
        Message::PrevLink => model.view_mut().cycle_link(-1),
        Message::FollowLink => follow_selected_link(&mut model),

        Message::ToggleTopicFocus => {
            model.focus = match model.focus {
                Focus::Document => {
                    model.topic_cursor = model.view().selected_topic().unwrap_or(0);
                    Focus::Topics
                }
                Focus::Topics => Focus::Document,
            };
        }
        Message::TopicUp => {
            model.topic_cursor = model.topic_cursor.saturating_sub(1);
        }
        Message::TopicDown => {
            let last = model.topic_count().saturating_sub(1);
            model.topic_cursor = (model.topic_cursor + 1).min(last);
        }
        Message::TopicSelect => {
            let index = model.topic_cursor;
            model = update(model, Message::OpenTopic(index));
        }
        Message::OpenTopic(index) => {
            if model.browser.navigate(0, Some(index)) {
                model.focus = Focus::Document;
            }
        }

        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }

        Message::Resize(width, height) => model.resize(width, height),
        Message::Redraw => {}
        Message::Quit => {
            model.should_quit = true;
        }
    }
    model
}

fn follow_selected_link(model: &mut Model) {
    let Some(url) = model.view().selected_link_spot().map(|spot| spot.url.clone()) else {
        model.show_toast(ToastLevel::Info, "No link selected (Tab selects links)");
        return;
    };
    match model.browser.follow_link(&url) {
        LinkAction::External(url) => model.request_external(url),
        LinkAction::Topic(_) => {}
        LinkAction::Unknown => {
            model.show_toast(ToastLevel::Warning, format!("No topic named '{url}'"));
        }
    }
}
