//! Heading extraction and GitHub-style anchor generation.

use std::collections::HashSet;

use regex::Regex;
use unicode_normalization::UnicodeNormalization as _;
use unicode_normalization::char::is_combining_mark;

/// ATX heading: one to six `#`, whitespace, then the heading text.
const HEADING_PATTERN: &str = r"^#{1,6}\s+(.+)$";

/// Extract the anchor of every ATX heading in `content`.
///
/// Setext headings are not recognized. Repeated headings collapse into one
/// entry; no `-1`/`-2` suffixes are generated.
pub fn extract_anchors(content: &str, pattern: &Regex) -> HashSet<String> {
    return split_lines(content)
        .into_iter()
        .filter_map(|line| return pattern.captures(line))
        .filter_map(|cap| return cap.get(1))
        .map(|text| return heading_to_anchor(text.as_str().trim()))
        .collect();
}

/// Compile the ATX heading pattern.
///
/// # Errors
///
/// Returns `regex::Error` if the pattern fails to compile.
pub fn heading_pattern() -> Result<Regex, regex::Error> {
    return Regex::new(HEADING_PATTERN);
}

/// Convert heading text (without the `#` prefix) to its anchor id.
///
/// Each whitespace character becomes its own hyphen, so `"Foo  Bar"` yields
/// `"foo--bar"`. The result may be empty.
pub fn heading_to_anchor(heading: &str) -> String {
    let slug: String = heading
        .trim()
        .to_lowercase()
        .nfkd()
        .filter(|&c| return is_anchor_char(c))
        .map(|c| return if c.is_whitespace() { '-' } else { c })
        .collect();
    return slug.trim_matches('-').to_string();
}

/// Characters that survive slugging. Combining marks do not, including the
/// spacing vowel signs `char::is_alphanumeric` would otherwise accept.
fn is_anchor_char(c: char) -> bool {
    if is_combining_mark(c) {
        return false;
    }
    return c.is_alphanumeric() || c == '_' || c == '-' || c.is_whitespace();
}

/// Line boundaries: `\n`, `\r`, vertical tab, form feed, the C0 file, group and
/// record separators, NEL, and the Unicode line and paragraph separators.
const fn is_line_break(c: char) -> bool {
    return matches!(
        c,
        '\n' | '\r' | '\u{b}' | '\u{c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    );
}

/// Split `content` into physical lines. `\r\n` is one boundary, a lone `\r`
/// is another, and a trailing boundary does not open an empty last line.
pub fn split_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = content.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(content.get(start..idx).unwrap_or_default());
        start = idx.saturating_add(c.len_utf8());
        if c == '\r' && chars.next_if(|&(_, next)| return next == '\n').is_some() {
            start = start.saturating_add(1);
        }
    }
    if start < content.len() {
        lines.push(content.get(start..).unwrap_or_default());
    }
    return lines;
}
