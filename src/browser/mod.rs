//! The topic browser.
//!
//! [`Browser`] owns the topic store, navigation history and renderer, and
//! pushes rendered topics to a [`Display`]. Every navigation either fully
//! completes (state updated, topic rendered, display notified) or is
//! rejected with no change at all.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::document::{
    DEFAULT_BULLET_CHARS, DEFAULT_IMAGES_PATH, Item, RenderOptions, Renderer, is_external_url,
};
use crate::error::{Error, Result};
use crate::history::{DEFAULT_HISTORY_MAX, Moved, Navigation, NavigationError, Visit};
use crate::topics::{Topic, TopicStore};

/// Topic shown when nothing is selected after a topic list rebuild.
pub const DEFAULT_HOME_TOPIC: &str = "README";

/// Consumer of rendered topics.
pub trait Display {
    /// Replace the displayed content. `topic` is `None` when nothing is
    /// selected, in which case `items` is empty.
    fn show(&mut self, topic: Option<&Topic>, items: &[Item]);

    /// Scroll so that `line` is the first visible line.
    fn scroll_to_line(&mut self, line: usize);

    /// First visible line, recorded in history when leaving a topic.
    fn top_line(&self) -> usize;

    /// The topic list was rebuilt.
    fn topics_changed(&mut self, _topics: &[Topic]) {}

    /// The selected topic changed.
    fn topic_selected(&mut self, _topic: Option<usize>) {}
}

/// Browser settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    pub images_path: PathBuf,
    pub bullet_chars: String,
    pub home_topic: Option<String>,
    pub history_max: usize,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            images_path: PathBuf::from(DEFAULT_IMAGES_PATH),
            bullet_chars: DEFAULT_BULLET_CHARS.to_string(),
            home_topic: Some(DEFAULT_HOME_TOPIC.to_string()),
            history_max: DEFAULT_HISTORY_MAX,
        }
    }
}

impl BrowserConfig {
    #[must_use]
    pub fn with_images_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.images_path = path.into();
        self
    }

    #[must_use]
    pub fn with_bullet_chars(mut self, chars: impl Into<String>) -> Self {
        self.bullet_chars = chars.into();
        self
    }

    #[must_use]
    pub fn with_home_topic(mut self, name: Option<String>) -> Self {
        self.home_topic = name;
        self
    }

    #[must_use]
    pub const fn with_history_max(mut self, max: usize) -> Self {
        self.history_max = max;
        self
    }
}

/// What following a link did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAction {
    /// The URL is for an external handler (web browser, mail client)
    External(String),
    /// Navigated to the topic at this index
    Topic(usize),
    /// No topic has that name
    Unknown,
}

/// A set of topics with navigation history, rendered to a display.
#[derive(Debug)]
pub struct Browser<D: Display> {
    topics: TopicStore,
    navigation: Navigation,
    renderer: Renderer,
    display: D,
    home_topic: Option<String>,
    needs_refresh: bool,
}

impl<D: Display> Browser<D> {
    /// Create an empty browser.
    ///
    /// # Errors
    /// Returns an error if the markdown pattern set fails to compile.
    pub fn new(config: BrowserConfig, display: D) -> Result<Self> {
        let options = RenderOptions {
            bullet_chars: config.bullet_chars,
            images_path: config.images_path,
        };
        let renderer = Renderer::new(options).map_err(|source| Error::Pattern {
            pattern: "markdown pattern set".to_string(),
            source,
        })?;
        Ok(Self {
            topics: TopicStore::new(),
            navigation: Navigation::new(config.history_max),
            renderer,
            display,
            home_topic: config.home_topic,
            needs_refresh: false,
        })
    }

    /// Add a single topic. Call [`Browser::refresh`] once after a batch of adds.
    pub fn add_topic(
        &mut self,
        name: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> usize {
        self.needs_refresh = true;
        self.topics.add(Topic::new(name, title, content))
    }

    /// Load matching files from a directory.
    ///
    /// On success the topics are re-sorted by name, so history is cleared
    /// and no topic is selected until the next [`Browser::refresh`].
    ///
    /// # Errors
    /// Returns an error if a pattern is invalid or the directory cannot be
    /// listed; topics and history are untouched in that case.
    pub fn add_topics_from_directory(
        &mut self,
        path: &Path,
        file_match: Option<&str>,
        title_match: Option<&str>,
    ) -> Result<usize> {
        let added = self.topics.add_from_directory(path, file_match, title_match)?;
        self.navigation.reset();
        self.needs_refresh = true;
        Ok(added)
    }

    /// Whether topics were added since the last [`Browser::refresh`].
    pub const fn needs_refresh(&self) -> bool {
        self.needs_refresh
    }

    /// Publish the rebuilt topic list and show the home topic if nothing is
    /// selected. Does nothing unless topics were added.
    pub fn refresh(&mut self) {
        if !self.needs_refresh {
            return;
        }
        self.needs_refresh = false;
        self.display.topics_changed(self.topics.topics());

        if self.navigation.current().is_none()
            && let Some(home) = self.home_topic.clone()
        {
            self.navigate_to_topic_by_name(Some(home.as_str()));
        }
    }

    /// Go to `topic` (`offset == 0`) or move `offset` entries through history.
    ///
    /// Returns false, changing nothing, if the topic or history target is
    /// out of range.
    pub fn navigate(&mut self, offset: isize, topic: Option<usize>) -> bool {
        let line = self.display.top_line();
        let result = if offset == 0 {
            self.navigation.go_to(topic, self.topics.len(), line)
        } else {
            self.navigation.navigate_history(offset, line)
        };
        match result {
            Ok(moved) => {
                self.show(moved);
                true
            }
            Err(err) => {
                log_rejection(&err);
                false
            }
        }
    }

    pub fn back(&mut self) -> bool {
        self.navigate(-1, None)
    }

    pub fn forward(&mut self) -> bool {
        self.navigate(1, None)
    }

    /// Go to the configured home topic.
    pub fn home(&mut self) -> bool {
        match self.home_topic.clone() {
            Some(home) => self.navigate_to_topic_by_name(Some(home.as_str())),
            None => false,
        }
    }

    /// Go to the topic called `name`, or to no topic for `None`.
    pub fn navigate_to_topic_by_name(&mut self, name: Option<&str>) -> bool {
        let Some(name) = name else {
            return self.navigate(0, None);
        };
        match self.topics.get_by_name(name) {
            Some(index) => self.navigate(0, Some(index)),
            None => {
                debug!(name, "no topic with that name");
                false
            }
        }
    }

    /// Act on a clicked link: external URLs are handed back to the caller,
    /// anything else names a topic.
    pub fn follow_link(&mut self, url: &str) -> LinkAction {
        if is_external_url(url) {
            return LinkAction::External(url.to_string());
        }
        let Some(index) = self.topics.get_by_name(url) else {
            debug!(url, "link to unknown topic");
            return LinkAction::Unknown;
        };
        if self.navigate(0, Some(index)) {
            LinkAction::Topic(index)
        } else {
            LinkAction::Unknown
        }
    }

    /// Render the current topic for output outside the display.
    pub fn render_current(&self) -> Vec<Item> {
        self.current_topic()
            .and_then(|index| self.topics.get(index))
            .map_or_else(Vec::new, |topic| self.renderer.render(&topic.content))
    }

    pub fn get_topic_by_name(&self, name: &str) -> Option<usize> {
        self.topics.get_by_name(name)
    }

    pub fn topics(&self) -> &[Topic] {
        self.topics.topics()
    }

    pub const fn current_topic(&self) -> Option<usize> {
        self.navigation.current()
    }

    pub fn history(&self) -> &[Visit] {
        self.navigation.visits()
    }

    pub const fn history_position(&self) -> usize {
        self.navigation.position()
    }

    pub const fn history_max(&self) -> usize {
        self.navigation.max()
    }

    /// Bound the history size (clamped to 1..=100).
    pub fn set_history_max(&mut self, max: usize) {
        self.navigation.set_max(max);
    }

    pub fn home_topic(&self) -> Option<&str> {
        self.home_topic.as_deref()
    }

    pub fn images_path(&self) -> &Path {
        &self.renderer.options().images_path
    }

    /// Takes effect on the next render.
    pub fn set_images_path(&mut self, path: impl Into<PathBuf>) {
        self.renderer.options_mut().images_path = path.into();
    }

    pub fn bullet_chars(&self) -> &str {
        &self.renderer.options().bullet_chars
    }

    /// Takes effect on the next render.
    pub fn set_bullet_chars(&mut self, chars: impl Into<String>) {
        self.renderer.options_mut().bullet_chars = chars.into();
    }

    pub const fn display(&self) -> &D {
        &self.display
    }

    pub const fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    fn show(&mut self, moved: Moved) {
        let topic = moved.topic.and_then(|index| self.topics.get(index));
        let items = topic.map_or_else(Vec::new, |t| self.renderer.render(&t.content));
        debug!(
            topic = topic.map(|t| t.name.as_str()),
            items = items.len(),
            "rendered topic"
        );

        self.display.show(topic, &items);
        if let Some(line) = moved.restore_line {
            self.display.scroll_to_line(line);
        }
        self.display.topic_selected(moved.topic);
    }
}

fn log_rejection(err: &NavigationError) {
    debug!(reason = %err, "navigation rejected");
}
