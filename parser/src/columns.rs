//! Per-line field extraction for index data rows.
//!
//! Index rows look like (after tab expansion):
//!
//! ```text
//! |i_CTRL-V|                CTRL-V                1        insert next character literally
//!                 CTRL-X CTRL-E   scroll up
//!                                 continuation of the previous description
//! ```
//!
//! The layout of a section only gives approximate column positions, so the
//! splitter combines fixed offsets with whitespace heuristics.

use keyref_core::ModeLayout;

/// Fields of one data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub tag: Option<String>,
    /// `None` on continuation lines.
    pub chars: Option<String>,
    pub flags: Option<String>,
    pub description: String,
}

impl Row {
    pub fn is_continuation(&self) -> bool {
        self.chars.is_none()
    }
}

/// Expands each tab to `tab_width` spaces and trims trailing whitespace.
///
/// Tabs are replaced by a fixed run of spaces, not expanded to tab stops;
/// the section layouts are measured against this expansion.
pub fn normalize_line(line: &str, tab_width: usize) -> String {
    line.replace('\t', &" ".repeat(tab_width))
        .trim_end()
        .to_string()
}

/// Splits a normalized line into row fields.
///
/// Returns `None` when the line is not a data row of any shape (blank
/// lines, prose, headings, rulers). This is a rejection, not an error.
pub fn split_columns(layout: &ModeLayout, line: &str) -> Option<Row> {
    let bytes = line.as_bytes();
    let first = *bytes.first()?;

    let mut tag = None;
    let mut index = match first {
        b'|' => {
            let (parsed, next) = parse_tag(line)?;
            tag = Some(parsed);
            next
        }
        b' ' => {
            // One leading space followed by text is prose, not a row.
            if bytes.get(1).is_some_and(|b| *b != b' ') {
                return None;
            }
            if layout.chars_col >= bytes.len() || !line.is_char_boundary(layout.chars_col) {
                return None;
            }
            layout.chars_col
        }
        _ => return None,
    };

    let mut chars = None;
    if bytes.get(index).is_some_and(|b| *b != b' ') {
        let (parsed, next) = parse_chars(line, index, layout.chars_boundary());
        chars = Some(parsed);
        index = next;
    }
    index = skip_spaces(bytes, index);

    let mut flags = None;
    if layout.decodes_flags() {
        let (parsed, next) = parse_flags(line, index);
        flags = parsed;
        index = skip_spaces(bytes, next);
    }

    Some(Row {
        tag,
        chars,
        flags,
        description: line[index..].to_string(),
    })
}

/// Parses `|tag|` at the start of the line.
///
/// Returns the tag and the index of the first non-space after it.
fn parse_tag(line: &str) -> Option<(String, usize)> {
    let close = line[1..].find('|')? + 1;
    let tag = line[1..close].to_string();
    Some((tag, skip_spaces(line.as_bytes(), close + 1)))
}

/// Parses the key characters starting at `start`.
///
/// The field ends at the first space at or past `boundary`, unless the
/// space sits inside a parenthesized group such as `(count)`.
fn parse_chars(line: &str, start: usize, boundary: usize) -> (String, usize) {
    let bytes = line.as_bytes();
    let mut guarded = false;
    let mut index = start;

    while index < bytes.len() {
        match bytes[index] {
            b'(' => {
                if bytes.get(index + 1).is_some_and(|b| *b != b' ') {
                    guarded = true;
                }
            }
            b')' => guarded = false,
            b' ' if index >= boundary && !guarded => break,
            _ => {}
        }
        index += 1;
    }

    (line[start..index].trim_end().to_string(), index)
}

/// Parses the flags field starting at `start`.
///
/// Flag characters may be separated by single spaces; two consecutive
/// spaces end the field. Reaching the end of the line first means the row
/// has no flags, and `start` is returned unchanged.
fn parse_flags(line: &str, start: usize) -> (Option<String>, usize) {
    let mut flags = String::new();
    let mut last_was_space = false;

    for (offset, ch) in line[start..].char_indices() {
        if ch == ' ' {
            if last_was_space {
                return (Some(flags), start + offset - 1);
            }
            last_was_space = true;
        } else {
            last_was_space = false;
            flags.push(ch);
        }
    }

    (None, start)
}

fn skip_spaces(bytes: &[u8], mut index: usize) -> usize {
    while bytes.get(index) == Some(&b' ') {
        index += 1;
    }
    index
}
