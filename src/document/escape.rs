//! Backslash escape resolution for emitted text.

use std::borrow::Cow;

/// Characters which can be escaped with a backslash. A backslash before any
/// other character is literal.
pub const ESCAPABLE_CHARS: &str = "\\`*_{}[]<>()#+-.!|";

/// Remove valid backslash escapes from `text`.
///
/// Only applied to text at emission time; the pattern set always scans the
/// raw source. Borrows when nothing needs unescaping.
pub fn unescape(text: &str) -> Cow<'_, str> {
    if !text.contains('\\') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut changed = false;
    while let Some(ch) = chars.next() {
        if ch == '\\'
            && let Some(&next) = chars.peek()
            && ESCAPABLE_CHARS.contains(next)
        {
            out.push(next);
            chars.next();
            changed = true;
            continue;
        }
        out.push(ch);
    }

    if changed {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(text)
    }
}
