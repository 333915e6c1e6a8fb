//! Incremental markdown scanner.
//!
//! Every pattern kind keeps at most one pending match. Each step takes the
//! earliest pending match, emits the plain text before it, applies the
//! construct and re-searches only what the step made stale.

use std::path::{Path, PathBuf};

use super::escape::unescape;
use super::list::ListTracker;
use super::patterns::{PatternKind, PatternMatch, PatternSet};
use super::types::{ImageRef, ImageSource, Item, LinkAnchor, Run, Style};

/// Default bullet characters for level 1, 2 and 3+.
pub const DEFAULT_BULLET_CHARS: &str = "●○■";

/// Default path images are resolved against.
pub const DEFAULT_IMAGES_PATH: &str = ".";

/// Pixel size for icons without a valid explicit size.
pub const DEFAULT_ICON_SIZE: u32 = 24;

const ICON_PREFIX: &str = "icon:";
const MIN_ICON_SIZE: u32 = 8;
const MAX_ICON_SIZE: u32 = 1024;

/// Settings the rendered output depends on besides the content itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Bullet characters per level; the last repeats for deeper levels
    pub bullet_chars: String,
    /// Base path for image files
    pub images_path: PathBuf,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            bullet_chars: DEFAULT_BULLET_CHARS.to_string(),
            images_path: PathBuf::from(DEFAULT_IMAGES_PATH),
        }
    }
}

/// Markdown renderer holding the compiled pattern set.
#[derive(Debug, Clone)]
pub struct Renderer {
    patterns: PatternSet,
    options: RenderOptions,
}

impl Renderer {
    /// Create a renderer with the given options.
    ///
    /// # Errors
    /// Returns an error if the pattern set fails to compile.
    pub fn new(options: RenderOptions) -> Result<Self, regex::Error> {
        Ok(Self {
            patterns: PatternSet::new()?,
            options,
        })
    }

    pub const fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub const fn options_mut(&mut self) -> &mut RenderOptions {
        &mut self.options
    }

    /// Render markdown content into styled items.
    pub fn render(&self, content: &str) -> Vec<Item> {
        render(content, &self.patterns, &self.options)
    }
}

/// Render markdown `content` into a sequence of runs, images and links.
///
/// Deterministic: the output depends only on `content` and `options`.
///
/// # Example
///
/// ```
/// use mdbrowse::document::{render, Item, PatternSet, RenderOptions};
///
/// let patterns = PatternSet::new().unwrap();
/// let items = render("**bold** text", &patterns, &RenderOptions::default());
/// assert!(matches!(&items[0], Item::Text(run) if run.style().bold));
/// ```
pub fn render(content: &str, patterns: &PatternSet, options: &RenderOptions) -> Vec<Item> {
    Scanner::new(content, patterns, options).run()
}

/// Open constructs during a single render.
#[derive(Debug, Default)]
struct ScannerState {
    italic: bool,
    bold: bool,
    /// Open header level (0 = none)
    header: u8,
    /// True while inside a list item line
    list_item: bool,
    list: ListTracker,
}

impl ScannerState {
    fn style(&self) -> Style {
        let list_level = if self.list_item {
            u8::try_from(self.list.level()).unwrap_or(u8::MAX)
        } else {
            0
        };
        Style {
            bold: self.bold,
            italic: self.italic,
            link: false,
            header: self.header,
            list_level,
        }
    }

    const fn emphasis_open(&self) -> bool {
        self.italic || self.bold
    }

    const fn block_open(&self) -> bool {
        self.header > 0 || self.list_item
    }
}

struct Scanner<'a> {
    source: &'a str,
    patterns: &'a PatternSet,
    options: &'a RenderOptions,
    state: ScannerState,
    pending: [Option<PatternMatch>; PatternKind::ALL.len()],
    cursor: usize,
    items: Vec<Item>,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str, patterns: &'a PatternSet, options: &'a RenderOptions) -> Self {
        Self {
            source,
            patterns,
            options,
            state: ScannerState::default(),
            pending: Default::default(),
            cursor: 0,
            items: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Item> {
        for kind in PatternKind::STARTS {
            self.pending[kind.index()] = self.patterns.find(kind, self.source, 0);
        }

        while let Some(next) = self.take_next() {
            // A list survives a line break only if the next event is another item
            if self.state.list.is_active()
                && !self.state.list_item
                && !matches!(next.kind, PatternKind::BulletStart | PatternKind::NumericStart)
            {
                self.state.list.close();
            }

            if next.start() > self.cursor {
                self.emit_source(self.cursor, next.start());
            }
            self.apply(&next);
            self.cursor = next.end();
            self.refresh(next.kind);
        }

        if self.cursor < self.source.len() {
            self.emit_source(self.cursor, self.source.len());
        }
        self.items
    }

    /// Remove and return the earliest pending match.
    fn take_next(&mut self) -> Option<PatternMatch> {
        let index = PatternKind::ALL
            .iter()
            .filter_map(|&kind| {
                let m = self.pending[kind.index()].as_ref()?;
                Some((m.start(), tie_rank(kind), kind.index()))
            })
            .min()
            .map(|(_, _, index)| index)?;
        self.pending[index].take()
    }

    /// Re-derive pending matches after consuming a `consumed` match.
    fn refresh(&mut self, consumed: PatternKind) {
        for kind in PatternKind::ALL {
            let slot = &mut self.pending[kind.index()];
            // Overlapped by the consumed construct: the cursor never moves back
            let stale = slot.as_ref().is_some_and(|m| m.start() < self.cursor);
            if kind == consumed || stale {
                *slot = if kind.is_end() {
                    None
                } else {
                    self.patterns.find(kind, self.source, self.cursor)
                };
            }
        }

        let wanted = [
            (PatternKind::EmphasisEnd, self.state.emphasis_open()),
            (PatternKind::BlockEnd, self.state.block_open()),
        ];
        for (kind, open) in wanted {
            let slot = &mut self.pending[kind.index()];
            if open && slot.is_none() {
                *slot = self.patterns.find(kind, self.source, self.cursor);
            }
        }
    }

    fn apply(&mut self, m: &PatternMatch) {
        match m.kind {
            PatternKind::EmphasisStart => {
                let width = m.range.len();
                self.state.italic |= width & 1 != 0;
                self.state.bold |= width & 2 != 0;
            }
            PatternKind::HeaderStart => {
                self.state.header = u8::try_from(m.group_len(1)).unwrap_or(0);
            }
            PatternKind::BulletStart | PatternKind::NumericStart => self.list_item(m),
            PatternKind::Image => {
                let alt = m.group_str(self.source, 1);
                let spec = m.group_str(self.source, 2);
                self.items.push(Item::Image(ImageRef {
                    alt: (!alt.is_empty()).then(|| alt.to_string()),
                    spec: spec.to_string(),
                    source: image_source(spec, &self.options.images_path),
                }));
            }
            PatternKind::Link => {
                let text = unescape(m.group_str(self.source, 1)).into_owned();
                self.items.push(Item::Link(LinkAnchor {
                    run: Run::new(text, self.state.style().with_link()),
                    url: m.group_str(self.source, 2).to_string(),
                }));
            }
            PatternKind::EmphasisEnd => {
                let width = m.range.len();
                if width & 1 != 0 {
                    self.state.italic = false;
                }
                if width & 2 != 0 {
                    self.state.bold = false;
                }
            }
            PatternKind::BlockEnd => {
                self.state.header = 0;
                self.state.list_item = false;
            }
        }
    }

    fn list_item(&mut self, m: &PatternMatch) {
        let Some(level) = self.state.list.enter_item(m.group_len(1)) else {
            return;
        };
        self.state.list_item = true;

        if m.kind == PatternKind::BulletStart {
            let bullets: Vec<char> = self.options.bullet_chars.chars().collect();
            if let Some(&bullet) = bullets.get(level.min(bullets.len()).wrapping_sub(1)) {
                self.emit_str(&format!("{bullet} "));
            }
        } else {
            let number = self.state.list.next_number();
            self.emit_str(&format!("{number}. "));
        }
    }

    fn emit_source(&mut self, start: usize, end: usize) {
        let source = self.source;
        if let Some(text) = source.get(start..end) {
            self.emit_str(text);
        }
    }

    fn emit_str(&mut self, text: &str) {
        let text = unescape(text).into_owned();
        self.items.push(Item::Text(Run::new(text, self.state.style())));
    }
}

/// Ordering among matches starting at the same offset: kinds in listed
/// order, except that a star run able to close open emphasis is taken as a
/// closer rather than reopening it.
const fn tie_rank(kind: PatternKind) -> usize {
    match kind {
        PatternKind::EmphasisEnd => 0,
        _ => kind.index() + 1,
    }
}

/// Resolve an image source spec.
///
/// `icon:NAME` and `icon:SIZE:NAME` request a named icon. Anything else is a
/// file name: its directory part is discarded so untrusted content cannot
/// reach outside `images_path`.
pub fn image_source(spec: &str, images_path: &Path) -> ImageSource {
    if spec.starts_with(ICON_PREFIX) {
        let fields: Vec<&str> = spec.split(':').collect();
        let name = fields.last().copied().unwrap_or_default();
        let size = if fields.len() > 2 {
            fields[1]
                .parse::<u32>()
                .ok()
                .filter(|size| (MIN_ICON_SIZE..=MAX_ICON_SIZE).contains(size))
                .unwrap_or(DEFAULT_ICON_SIZE)
        } else {
            DEFAULT_ICON_SIZE
        };
        return ImageSource::Icon {
            name: name.to_string(),
            size,
        };
    }

    Path::new(spec)
        .file_name()
        .map_or(ImageSource::Missing, |name| {
            ImageSource::File(images_path.join(name))
        })
}
