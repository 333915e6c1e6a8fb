//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`view`]: The browser's display sink holding laid-out lines
//! - [`viewport`]: Scroll position and visible range management
//! - [`layout`]: Rendered items to styled terminal lines
//! - [`style`]: Colors for rendered runs
//! - [`print`]: Non-interactive output to a writer

pub mod layout;
pub mod print;
pub mod style;
pub mod view;
pub mod viewport;

mod overlays;
mod render;
mod status;

pub use render::{render, split_main_columns};

pub const DOCUMENT_LEFT_PADDING: u16 = 2;
pub const TOPICS_WIDTH_PERCENT: u16 = 30;
pub const DOC_WIDTH_PERCENT: u16 = 70;

/// Rows below the panes always taken by the status bar.
pub const FOOTER_ROWS: u16 = 1;

/// Border rows around the document pane.
pub const DOCUMENT_CHROME_ROWS: u16 = 2;
