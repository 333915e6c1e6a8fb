use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::browser::Browser;
use crate::ui::view::TopicView;
use crate::ui::{DOCUMENT_CHROME_ROWS, FOOTER_ROWS};

/// How long a toast stays in the footer.
const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Which pane receives movement keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Document,
    Topics,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug)]
pub struct Model {
    /// Topics, history and the rendered view
    pub browser: Browser<TopicView>,
    pub focus: Focus,
    /// Highlighted row of the topic list while it has focus
    pub topic_cursor: usize,
    pub help_visible: bool,
    pub should_quit: bool,
    /// Terminal size (width, height)
    pub size: (u16, u16),
    pub config_global_path: Option<PathBuf>,
    pub config_local_path: Option<PathBuf>,
    toast: Option<Toast>,
    pending_external: Option<String>,
}

impl Model {
    pub fn new(browser: Browser<TopicView>, size: (u16, u16)) -> Self {
        let mut model = Self {
            browser,
            focus: Focus::Document,
            topic_cursor: 0,
            help_visible: false,
            should_quit: false,
            size,
            config_global_path: None,
            config_local_path: None,
            toast: None,
            pending_external: None,
        };
        model.resize(size.0, size.1);
        model
    }

    /// Apply a terminal size to the document viewport.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        let rows = height.saturating_sub(FOOTER_ROWS + DOCUMENT_CHROME_ROWS);
        self.view_mut().viewport_mut().resize(rows);
    }

    pub const fn view(&self) -> &TopicView {
        self.browser.display()
    }

    pub const fn view_mut(&mut self) -> &mut TopicView {
        self.browser.display_mut()
    }

    /// Name of the topic on screen.
    pub fn current_topic_name(&self) -> Option<&str> {
        self.view().shown().map(|t| t.name.as_str())
    }

    pub fn topic_count(&self) -> usize {
        self.view().topics().len()
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Queue an external URL for the event loop to open.
    pub(super) fn request_external(&mut self, url: String) {
        self.pending_external = Some(url);
    }

    pub(super) const fn take_external(&mut self) -> Option<String> {
        self.pending_external.take()
    }

    pub const fn has_pending_external(&self) -> bool {
        self.pending_external.is_some()
    }
}
