//! Core render output types.

use std::path::PathBuf;

/// Maximum header level (h6).
pub const MAX_HEADER_LEVEL: u8 = 6;

/// Maximum number of nested list levels (1 = list without children).
pub const MAX_LIST_LEVELS: usize = 10;

/// Style flags for a run of text.
///
/// `header` and `list_level` are 0 when inactive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Style {
    pub bold: bool,
    pub italic: bool,
    pub link: bool,
    /// Header level (1-6)
    pub header: u8,
    /// List nesting level (1-10)
    pub list_level: u8,
}

impl Style {
    /// A style with nothing active.
    pub const fn plain() -> Self {
        Self {
            bold: false,
            italic: false,
            link: false,
            header: 0,
            list_level: 0,
        }
    }

    /// Returns true if no style is active.
    pub const fn is_plain(&self) -> bool {
        !self.bold && !self.italic && !self.link && self.header == 0 && self.list_level == 0
    }

    #[must_use]
    pub const fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub const fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    #[must_use]
    pub const fn with_link(mut self) -> Self {
        self.link = true;
        self
    }

    #[must_use]
    pub const fn with_header(mut self, level: u8) -> Self {
        self.header = level;
        self
    }

    #[must_use]
    pub const fn with_list_level(mut self, level: u8) -> Self {
        self.list_level = level;
        self
    }
}

/// A contiguous span of rendered text with its style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    text: String,
    style: Style,
}

impl Run {
    pub const fn new(text: String, style: Style) -> Self {
        Self { text, style }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn style(&self) -> Style {
        self.style
    }
}

/// Where an image should be loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Named icon at a pixel size (`icon:NAME` or `icon:SIZE:NAME`)
    Icon { name: String, size: u32 },
    /// Image file inside the configured images path
    File(PathBuf),
    /// Source had no usable file name component
    Missing,
}

/// An image reference in rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Alt text for tooltips (`None` when empty)
    pub alt: Option<String>,
    /// Source spec exactly as written in the markdown
    pub spec: String,
    /// Resolved load location
    pub source: ImageSource,
}

/// A link anchor in rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkAnchor {
    /// Link text run, carrying the link style
    pub run: Run,
    /// Link URL or topic name, opaque to the scanner
    pub url: String,
}

impl LinkAnchor {
    /// Link text (escapes resolved).
    pub fn text(&self) -> &str {
        self.run.text()
    }

    /// Returns true for URLs handed to an external handler rather than
    /// resolved as a topic name.
    pub fn is_external(&self) -> bool {
        is_external_url(&self.url)
    }
}

/// Returns true if `url` should open outside the browser.
pub fn is_external_url(url: &str) -> bool {
    url.starts_with("http") || url.starts_with("mailto")
}

/// One unit of scanner output, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Text(Run),
    Image(ImageRef),
    Link(LinkAnchor),
}

impl Item {
    /// Visible text of this item (empty for images).
    pub fn text(&self) -> &str {
        match self {
            Self::Text(run) => run.text(),
            Self::Link(anchor) => anchor.text(),
            Self::Image(_) => "",
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Self::Text(run) => run.style(),
            Self::Link(anchor) => anchor.run.style(),
            Self::Image(_) => Style::plain(),
        }
    }

}

/// Characters that end a line, besides the `\r\n` pair.
pub const LINE_BREAK_CHARS: [char; 7] = [
    '\n', '\x0B', '\x0C', '\r', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Split `text` into lines at the breaks that end headers and list items.
///
/// `\r\n` is a single break. Like [`str::split`], a trailing break yields a
/// final empty piece.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split("\r\n").flat_map(|chunk| chunk.split(LINE_BREAK_CHARS))
}

/// Concatenate the visible text of a rendered item sequence.
pub fn plain_text(items: &[Item]) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(item.text());
    }
    out
}
