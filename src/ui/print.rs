//! Write a rendered topic straight to a terminal or pipe.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Attribute, Color, ContentStyle, PrintStyledContent};

use crate::document::{self, Item, Run, split_lines};
use crate::image::{ImageSupplier, resolve};

use super::layout::{LIST_INDENT, image_label};

/// Print rendered items, ANSI-styled unless `plain`.
///
/// External link targets follow their text in angle brackets, since a
/// printed topic has no way to follow them.
///
/// # Errors
/// Returns any error from writing to `out`.
pub fn print_items<W: Write, S: ImageSupplier + ?Sized>(
    out: &mut W,
    items: &[Item],
    supplier: &S,
    plain: bool,
) -> io::Result<()> {
    let mut printer = Printer {
        out,
        plain,
        at_line_start: true,
    };
    for item in items {
        match item {
            Item::Text(run) => printer.run(run)?,
            Item::Link(anchor) => {
                printer.run(&anchor.run)?;
                if anchor.is_external() {
                    printer.styled(&format!(" <{}>", anchor.url), dim_style())?;
                }
            }
            Item::Image(image) => {
                let picture = resolve(supplier, image);
                let style = image_style(picture.is_placeholder());
                printer.styled(&image_label(image, &picture), style)?;
            }
        }
    }
    if !printer.at_line_start {
        writeln!(printer.out)?;
    }
    printer.out.flush()
}

struct Printer<'a, W> {
    out: &'a mut W,
    plain: bool,
    at_line_start: bool,
}

impl<W: Write> Printer<'_, W> {
    fn run(&mut self, run: &Run) -> io::Result<()> {
        let style = ansi_style(run.style());
        let level = usize::from(run.style().list_level);
        for (n, piece) in split_lines(run.text()).enumerate() {
            if n > 0 {
                writeln!(self.out)?;
                self.at_line_start = true;
            }
            if piece.is_empty() {
                continue;
            }
            if self.at_line_start && level > 0 {
                write!(self.out, "{}", " ".repeat(level * LIST_INDENT))?;
            }
            self.styled(piece, style)?;
        }
        Ok(())
    }

    fn styled(&mut self, text: &str, style: ContentStyle) -> io::Result<()> {
        self.at_line_start = false;
        if self.plain || style == ContentStyle::new() {
            write!(self.out, "{text}")
        } else {
            queue!(self.out, PrintStyledContent(style.apply(text)))
        }
    }
}

/// Terminal attributes for a rendered run, matching the interactive colors.
fn ansi_style(run: document::Style) -> ContentStyle {
    let mut style = ContentStyle::new();
    let header_color = match run.header {
        0 => None,
        1 | 6.. => Some(Color::Cyan),
        2 => Some(Color::Green),
        3 => Some(Color::Yellow),
        4 => Some(Color::Blue),
        5 => Some(Color::Magenta),
    };
    if let Some(color) = header_color {
        style.foreground_color = Some(color);
        style.attributes.set(Attribute::Bold);
        if run.header == 1 {
            style.attributes.set(Attribute::Underlined);
        }
    }
    if run.bold {
        style.attributes.set(Attribute::Bold);
    }
    if run.italic {
        style.attributes.set(Attribute::Italic);
    }
    if run.link {
        style.foreground_color = Some(Color::Blue);
        style.attributes.set(Attribute::Underlined);
    }
    style
}

fn dim_style() -> ContentStyle {
    let mut style = ContentStyle::new();
    style.attributes.set(Attribute::Dim);
    style
}

fn image_style(missing: bool) -> ContentStyle {
    let mut style = ContentStyle::new();
    style.foreground_color = Some(if missing { Color::Red } else { Color::Magenta });
    style.attributes.set(Attribute::Italic);
    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{RenderOptions, Renderer};
    use image::DynamicImage;
    use std::path::Path;

    struct NoImages;

    impl ImageSupplier for NoImages {
        fn load_image(&self, _path: &Path) -> Option<DynamicImage> {
            None
        }

        fn load_icon(&self, _name: &str, _size: u32) -> Option<DynamicImage> {
            None
        }
    }

    fn print(source: &str, plain: bool) -> String {
        let renderer = Renderer::new(RenderOptions::default()).unwrap();
        let mut out = Vec::new();
        print_items(&mut out, &renderer.render(source), &NoImages, plain).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_output() {
        let text = print(
            "# Help\nUse *this* and [docs](https://example.com).\n* item\n![pic](a.png)",
            true,
        );
        assert_eq!(
            text,
            "Help\nUse this and docs <https://example.com>.\n  ● item\n[image: pic missing]\n"
        );
    }

    #[test]
    fn test_crlf_and_unicode_breaks_print_as_newlines() {
        assert_eq!(print("# T\rbody\u{2028}more", true), "T\nbody\nmore\n");
        assert_eq!(print("* a\r\n* b", true), "  ● a\n  ● b\n");
    }

    #[test]
    fn test_topic_links_print_text_only() {
        assert_eq!(print("see [Install](Install)", true), "see Install\n");
    }

    #[test]
    fn test_ansi_output_styles_runs() {
        let text = print("plain **bold**", false);
        assert!(text.starts_with("plain "));
        assert!(text.contains("\x1b[1m"));
        assert!(text.contains("bold"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_empty_topic_prints_nothing() {
        assert_eq!(print("", false), "");
    }
}
