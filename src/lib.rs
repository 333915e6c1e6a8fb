// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. image::ImageCache)
    clippy::module_name_repetitions
)]

//! # mdbrowse
//!
//! A browser for sets of Markdown help topics.
//!
//! mdbrowse renders a restricted Markdown dialect with:
//! - Headers, bold and italic emphasis, nested bullet and numbered lists
//! - Links to other topics or to external URLs
//! - Inline images from an images directory or a named icon set
//! - Back/forward history that remembers scroll positions
//!
//! ## Architecture
//!
//! The library core is UI-agnostic: [`browser::Browser`] pushes rendered
//! topics to any [`browser::Display`]. The terminal front end uses The Elm
//! Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`document`]: Markdown scanning and rendering to styled runs
//! - [`topics`]: Topic store and directory loading
//! - [`history`]: Navigation state and visit history
//! - [`browser`]: Topics, history and rendering tied to a display
//! - [`image`]: Image loading with a missing-image fallback
//! - [`ui`]: Terminal display, layout and printing
//! - [`app`]: Interactive application loop and state
//! - [`config`]: Saved and command-line settings

pub mod app;
pub mod browser;
pub mod config;
pub mod document;
pub mod error;
pub mod history;
pub mod image;
pub mod topics;
pub mod ui;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::browser::{Browser, BrowserConfig, Display, LinkAction};
    pub use crate::document::{Item, Renderer};
    pub use crate::topics::Topic;
    pub use crate::ui::view::TopicView;
}
