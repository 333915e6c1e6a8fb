//! Lay out rendered items as terminal lines.

use image::GenericImageView;
use ratatui::text::{Line, Span};

use crate::document::{ImageRef, Item, LinkAnchor, Run, split_lines};
use crate::image::{ImageSupplier, Picture, resolve};

use super::style::{image_style, style_for_run};

/// Columns of indentation per list level.
pub const LIST_INDENT: usize = 2;

/// Where a link ended up in the laid-out lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpot {
    pub line: usize,
    /// Index of the link's first span within the line
    pub span: usize,
    pub url: String,
    pub text: String,
}

/// A topic ready for display.
#[derive(Debug, Clone, Default)]
pub struct DocumentLayout {
    pub lines: Vec<Line<'static>>,
    pub links: Vec<LinkSpot>,
}

impl DocumentLayout {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Split rendered items into lines, resolving images through `supplier`.
pub fn layout<S: ImageSupplier + ?Sized>(items: &[Item], supplier: &S) -> DocumentLayout {
    let mut builder = LineBuilder::default();
    for item in items {
        match item {
            Item::Text(run) => {
                builder.push_run(run);
            }
            Item::Link(anchor) => builder.push_link(anchor),
            Item::Image(image) => builder.push_image(image, &resolve(supplier, image)),
        }
    }
    builder.finish()
}

/// Inline text standing in for an image: its alt text (or source) and the
/// loaded pixel size.
pub fn image_label(image: &ImageRef, picture: &Picture) -> String {
    let name = image.alt.as_deref().unwrap_or(&image.spec);
    match picture.image() {
        Some(img) => {
            let (width, height) = img.dimensions();
            format!("[image: {name} {width}x{height}]")
        }
        None => format!("[image: {name} missing]"),
    }
}

/// Visible text of a laid-out line.
pub fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

#[derive(Default)]
struct LineBuilder {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    links: Vec<LinkSpot>,
}

impl LineBuilder {
    /// Returns the line and span index of the first non-empty piece.
    fn push_run(&mut self, run: &Run) -> Option<(usize, usize)> {
        let style = style_for_run(run.style());
        let level = usize::from(run.style().list_level);
        let mut first = None;
        for (n, piece) in split_lines(run.text()).enumerate() {
            if n > 0 {
                self.break_line();
            }
            if piece.is_empty() {
                continue;
            }
            if self.current.is_empty() && level > 0 {
                self.current.push(Span::raw(" ".repeat(level * LIST_INDENT)));
            }
            first.get_or_insert((self.lines.len(), self.current.len()));
            self.current.push(Span::styled(piece.to_string(), style));
        }
        first
    }

    fn push_link(&mut self, anchor: &LinkAnchor) {
        if let Some((line, span)) = self.push_run(&anchor.run) {
            self.links.push(LinkSpot {
                line,
                span,
                url: anchor.url.clone(),
                text: anchor.text().to_string(),
            });
        }
    }

    fn push_image(&mut self, image: &ImageRef, picture: &Picture) {
        self.current.push(Span::styled(
            image_label(image, picture),
            image_style(picture.is_placeholder()),
        ));
    }

    fn break_line(&mut self) {
        let spans = std::mem::take(&mut self.current);
        self.lines.push(Line::from(spans));
    }

    fn finish(mut self) -> DocumentLayout {
        if !self.current.is_empty() {
            self.break_line();
        }
        DocumentLayout {
            lines: self.lines,
            links: self.links,
        }
    }
}
