//! The fixed set of markdown pattern matchers.
//!
//! The `regex` crate has no look-around, so the "not preceded by" guards are
//! checked on the character before a candidate match and the search resumes
//! one character later when the guard fails. The "not followed by" guard of
//! emphasis-start is folded into the expression and trimmed back out of the
//! reported range, and the block-end lookahead is reported as a zero-width
//! match at the start of the line break.

use std::ops::Range;

use regex::{Captures, Regex};

/// Bracketed text allowing escaped closing brackets, capture is the inner text.
const BRACKET_STR: &str = r"\[([^\]\\]*(?:\\.[^\]\\]*)*)\]";
/// Parenthesized text allowing escaped closing parentheses.
const PARENTH_STR: &str = r"\(([^)\\]+(?:\\.[^)\\]*)*)\)";

/// Pattern kinds in tie-break order: start patterns first, then end patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PatternKind {
    /// 1-3 `*` opening emphasis
    EmphasisStart,
    /// `#` to `######` at line start
    HeaderStart,
    /// `* ` list item at line start
    BulletStart,
    /// `N. ` list item at line start
    NumericStart,
    /// `![alt](source)`
    Image,
    /// `[text](url)`
    Link,
    /// 1-3 `*` closing emphasis
    EmphasisEnd,
    /// Line break ending a header or list item
    BlockEnd,
}

impl PatternKind {
    pub const ALL: [Self; 8] = [
        Self::EmphasisStart,
        Self::HeaderStart,
        Self::BulletStart,
        Self::NumericStart,
        Self::Image,
        Self::Link,
        Self::EmphasisEnd,
        Self::BlockEnd,
    ];

    /// Patterns searched for unconditionally.
    pub const STARTS: [Self; 6] = [
        Self::EmphasisStart,
        Self::HeaderStart,
        Self::BulletStart,
        Self::NumericStart,
        Self::Image,
        Self::Link,
    ];

    /// End patterns are only searched while their construct is open.
    pub const fn is_end(self) -> bool {
        matches!(self, Self::EmphasisEnd | Self::BlockEnd)
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A single pattern match against the raw source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    pub kind: PatternKind,
    /// Consumed range; empty for the zero-width block end
    pub range: Range<usize>,
    groups: [Option<Range<usize>>; 2],
}

impl PatternMatch {
    pub const fn start(&self) -> usize {
        self.range.start
    }

    pub const fn end(&self) -> usize {
        self.range.end
    }

    /// Byte range of capture group `index` (1-based).
    pub fn group(&self, index: usize) -> Option<Range<usize>> {
        index
            .checked_sub(1)
            .and_then(|i| self.groups.get(i))
            .cloned()
            .flatten()
    }

    /// Text of capture group `index` within `source`.
    pub fn group_str<'s>(&self, source: &'s str, index: usize) -> &'s str {
        self.group(index)
            .and_then(|range| source.get(range))
            .unwrap_or_default()
    }

    /// Length in bytes of capture group `index`.
    pub fn group_len(&self, index: usize) -> usize {
        self.group(index).map_or(0, |range| range.len())
    }
}

/// Immutable compiled pattern set, built once and shared by reference.
#[derive(Debug, Clone)]
pub struct PatternSet {
    emphasis_start: Regex,
    header_start: Regex,
    bullet_start: Regex,
    numeric_start: Regex,
    image: Regex,
    link: Regex,
    emphasis_end: Regex,
    block_end: Regex,
}

impl PatternSet {
    /// Compile all patterns.
    ///
    /// # Errors
    /// Returns an error if a pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            emphasis_start: Regex::new(r"(\*{1,3})(?:[^* ]|\z)")?,
            header_start: Regex::new(r"(?m)^ {0,3}(#{1,6}) ")?,
            bullet_start: Regex::new(r"(?m)^( *)\* ")?,
            numeric_start: Regex::new(r"(?m)^( *)[0-9]+\. ")?,
            image: Regex::new(&format!("!{BRACKET_STR}{PARENTH_STR}"))?,
            link: Regex::new(&format!("{BRACKET_STR}{PARENTH_STR}"))?,
            emphasis_end: Regex::new(r"\*{1,3}")?,
            block_end: Regex::new(r"\r\n|[\n\x0B\x0C\r\x{85}\x{2028}\x{2029}]")?,
        })
    }

    const fn regex(&self, kind: PatternKind) -> &Regex {
        match kind {
            PatternKind::EmphasisStart => &self.emphasis_start,
            PatternKind::HeaderStart => &self.header_start,
            PatternKind::BulletStart => &self.bullet_start,
            PatternKind::NumericStart => &self.numeric_start,
            PatternKind::Image => &self.image,
            PatternKind::Link => &self.link,
            PatternKind::EmphasisEnd => &self.emphasis_end,
            PatternKind::BlockEnd => &self.block_end,
        }
    }

    /// Find the first match of `kind` in `source` at or after byte `from`.
    pub fn find(&self, kind: PatternKind, source: &str, from: usize) -> Option<PatternMatch> {
        let rejected_before: &[char] = match kind {
            PatternKind::EmphasisStart | PatternKind::Image => &['\\'],
            PatternKind::Link => &['!', '\\'],
            PatternKind::EmphasisEnd => &['\\', ' '],
            _ => &[],
        };

        let mut pos = from;
        while pos <= source.len() {
            let caps = self.regex(kind).captures_at(source, pos)?;
            let whole = caps.get(0)?;
            let preceding = source[..whole.start()].chars().next_back();
            if preceding.is_some_and(|c| rejected_before.contains(&c)) {
                pos = whole.start()
                    + source[whole.start()..]
                        .chars()
                        .next()
                        .map_or(1, char::len_utf8);
                continue;
            }
            return Some(build_match(kind, &caps));
        }
        None
    }
}

fn build_match(kind: PatternKind, caps: &Captures<'_>) -> PatternMatch {
    let group = |i: usize| caps.get(i).map(|m| m.range());
    let whole = caps.get(0).map_or(0..0, |m| m.range());
    let range = match kind {
        // Drop the character that stood in for the negative lookahead
        PatternKind::EmphasisStart => group(1).unwrap_or(whole),
        PatternKind::BlockEnd => whole.start..whole.start,
        _ => whole,
    };
    PatternMatch {
        kind,
        range,
        groups: [group(1), group(2)],
    }
}
