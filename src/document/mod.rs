//! Markdown scanning and rendering.
//!
//! This module handles:
//! - The fixed pattern set for the supported markdown subset
//! - Incremental scanning into styled runs, images and links
//! - List nesting and numbering
//! - Backslash escapes

mod escape;
mod list;
mod parser;
mod patterns;
mod types;

pub use escape::{ESCAPABLE_CHARS, unescape};
pub use list::{ListTracker, MAX_FIRST_LEVEL_SPACES, MIN_LEVEL_SPACING};
pub use parser::{
    DEFAULT_BULLET_CHARS, DEFAULT_ICON_SIZE, DEFAULT_IMAGES_PATH, RenderOptions, Renderer,
    image_source, render,
};
pub use patterns::{PatternKind, PatternMatch, PatternSet};
pub use types::{
    ImageRef, ImageSource, Item, LINE_BREAK_CHARS, LinkAnchor, MAX_HEADER_LEVEL, MAX_LIST_LEVELS,
    Run, Style, is_external_url, plain_text, split_lines,
};
