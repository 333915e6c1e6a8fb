//! The terminal display sink for the browser.

use ratatui::text::Line;

use crate::browser::Display;
use crate::document::Item;
use crate::image::FsImageSupplier;
use crate::topics::Topic;

use super::layout::{DocumentLayout, LinkSpot, layout};
use super::style::selected_link_style;
use super::viewport::Viewport;

/// A topic list entry as shown in the side pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicEntry {
    pub name: String,
    pub title: String,
}

/// Holds everything the terminal shows for the current topic.
///
/// The browser pushes rendered topics in through [`Display`]; the UI reads
/// lines, links and the topic list back out when drawing.
#[derive(Debug, Clone)]
pub struct TopicView {
    shown: Option<TopicEntry>,
    document: DocumentLayout,
    viewport: Viewport,
    topics: Vec<TopicEntry>,
    selected_topic: Option<usize>,
    selected_link: Option<usize>,
    images: FsImageSupplier,
}

impl Default for TopicView {
    fn default() -> Self {
        Self::new(FsImageSupplier::default())
    }
}

impl TopicView {
    pub fn new(images: FsImageSupplier) -> Self {
        Self {
            shown: None,
            document: DocumentLayout::default(),
            viewport: Viewport::new(0, 0),
            topics: Vec::new(),
            selected_topic: None,
            selected_link: None,
            images,
        }
    }

    /// The topic on screen, if any.
    pub const fn shown(&self) -> Option<&TopicEntry> {
        self.shown.as_ref()
    }

    pub fn lines(&self) -> &[Line<'static>] {
        &self.document.lines
    }

    pub fn links(&self) -> &[LinkSpot] {
        &self.document.links
    }

    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub const fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn topics(&self) -> &[TopicEntry] {
        &self.topics
    }

    /// Index of the topic marked as current in the topic list.
    pub const fn selected_topic(&self) -> Option<usize> {
        self.selected_topic
    }

    pub const fn selected_link(&self) -> Option<usize> {
        self.selected_link
    }

    pub fn selected_link_spot(&self) -> Option<&LinkSpot> {
        self.document.links.get(self.selected_link?)
    }

    /// Move the link cursor by `step` links, wrapping, and scroll to it.
    pub fn cycle_link(&mut self, step: isize) {
        let count = self.document.links.len();
        if count == 0 {
            self.selected_link = None;
            return;
        }
        let next = match self.selected_link {
            None if step < 0 => count - 1,
            None => 0,
            Some(current) => {
                let step_abs = step.unsigned_abs() % count;
                if step < 0 {
                    (current + count - step_abs) % count
                } else {
                    (current + step_abs) % count
                }
            }
        };
        self.selected_link = Some(next);
        if let Some(spot) = self.document.links.get(next) {
            self.viewport.reveal(spot.line);
        }
    }

    pub const fn clear_link_selection(&mut self) {
        self.selected_link = None;
    }

    /// Lines currently inside the viewport, with the selected link
    /// highlighted.
    pub fn visible_lines(&self) -> Vec<Line<'static>> {
        let range = self.viewport.visible_range();
        let mut lines = self.document.lines[range.clone()].to_vec();
        if let Some(spot) = self.selected_link_spot()
            && range.contains(&spot.line)
            && let Some(span) = lines[spot.line - range.start].spans.get_mut(spot.span)
        {
            span.style = selected_link_style(span.style);
        }
        lines
    }
}

impl Display for TopicView {
    fn show(&mut self, topic: Option<&Topic>, items: &[Item]) {
        self.shown = topic.map(|t| TopicEntry {
            name: t.name.clone(),
            title: t.title.clone(),
        });
        self.document = layout(items, &self.images);
        self.selected_link = None;
        self.viewport.set_total_lines(self.document.line_count());
        self.viewport.go_to_top();
    }

    fn scroll_to_line(&mut self, line: usize) {
        self.viewport.go_to_line(line);
    }

    fn top_line(&self) -> usize {
        self.viewport.offset()
    }

    fn topics_changed(&mut self, topics: &[Topic]) {
        self.topics = topics
            .iter()
            .map(|t| TopicEntry {
                name: t.name.clone(),
                title: t.title.clone(),
            })
            .collect();
    }

    fn topic_selected(&mut self, topic: Option<usize>) {
        self.selected_topic = topic;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::{Browser, BrowserConfig};
    use ratatui::style::Modifier;

    fn browser() -> Browser<TopicView> {
        let mut browser = Browser::new(BrowserConfig::default(), TopicView::default()).unwrap();
        let long: String = (0..50).map(|n| format!("line {n}\n")).collect();
        browser.add_topic("README", "Welcome", "# Welcome\nSee [Long](Long) and [FAQ](FAQ).");
        browser.add_topic("Long", "Long topic", long);
        browser.add_topic("FAQ", "Questions", "Nothing here.");
        browser.refresh();
        browser.display_mut().viewport_mut().resize(10);
        browser
    }

    #[test]
    fn test_show_updates_view() {
        let browser = browser();
        let view = browser.display();
        assert_eq!(view.shown().map(|t| t.name.as_str()), Some("README"));
        assert_eq!(view.lines().len(), 2);
        assert_eq!(view.links().len(), 2);
        assert_eq!(view.topics().len(), 3);
        assert_eq!(view.selected_topic(), browser.get_topic_by_name("README"));
    }

    #[test]
    fn test_scroll_position_survives_history() {
        let mut browser = browser();
        browser.navigate_to_topic_by_name(Some("Long"));
        browser.display_mut().viewport_mut().scroll_down(25);
        browser.navigate_to_topic_by_name(Some("FAQ"));
        assert_eq!(browser.display().top_line(), 0);

        browser.back();
        assert_eq!(browser.display().shown().map(|t| t.name.as_str()), Some("Long"));
        assert_eq!(browser.display().top_line(), 25);
    }

    #[test]
    fn test_cycle_link_wraps() {
        let mut browser = browser();
        let view = browser.display_mut();
        view.cycle_link(1);
        assert_eq!(view.selected_link_spot().map(|l| l.url.as_str()), Some("Long"));
        view.cycle_link(1);
        assert_eq!(view.selected_link_spot().map(|l| l.url.as_str()), Some("FAQ"));
        view.cycle_link(1);
        assert_eq!(view.selected_link(), Some(0));
        view.cycle_link(-1);
        assert_eq!(view.selected_link(), Some(1));
        view.clear_link_selection();
        view.cycle_link(-1);
        assert_eq!(view.selected_link(), Some(1));
    }

    #[test]
    fn test_selected_link_is_highlighted() {
        let mut browser = browser();
        browser.display_mut().cycle_link(1);
        let view = browser.display();
        let spot = view.selected_link_spot().unwrap().clone();
        let lines = view.visible_lines();
        assert!(
            lines[spot.line].spans[spot.span]
                .style
                .add_modifier
                .contains(Modifier::REVERSED)
        );
    }

    #[test]
    fn test_show_resets_link_selection() {
        let mut browser = browser();
        browser.display_mut().cycle_link(1);
        browser.navigate_to_topic_by_name(Some("FAQ"));
        assert_eq!(browser.display().selected_link(), None);
        assert!(browser.display().links().is_empty());
    }
}
