//! Byte-offset helpers for moving a cursor through text
//!
//! Offsets are byte indices that always sit on a char boundary. Columns are
//! counted in chars.

/// Offset of the char boundary before `pos`
pub fn prev_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map_or(0, |(i, _)| i)
}

/// Offset of the char boundary after `pos`
pub fn next_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len(), |c| pos + c.len_utf8())
}

/// Start of the line containing `pos`
pub fn line_start(text: &str, pos: usize) -> usize {
    text[..pos].rfind('\n').map_or(0, |i| i + 1)
}

/// End of the line containing `pos` (the offset of its `\n`, or the text end)
pub fn line_end(text: &str, pos: usize) -> usize {
    text[pos..].find('\n').map_or(text.len(), |i| pos + i)
}

/// Zero-based (line, column) of `pos`
pub fn line_col(text: &str, pos: usize) -> (usize, usize) {
    let before = &text[..pos];
    let line = before.matches('\n').count();
    let col = before[line_start(text, pos)..].chars().count();
    (line, col)
}

/// Offset of `col` chars into zero-based `line`, clamped to the line's end.
///
/// Lines past the end clamp to the end of the text.
pub fn offset_at(text: &str, line: usize, col: usize) -> usize {
    let mut start = 0;
    for _ in 0..line {
        match text[start..].find('\n') {
            Some(i) => start += i + 1,
            None => return text.len(),
        }
    }
    let end = line_end(text, start);
    text[start..end]
        .char_indices()
        .nth(col)
        .map_or(end, |(i, _)| start + i)
}

/// Number of lines as the gutter counts them: a trailing `\n` opens one more
pub fn line_count(text: &str) -> usize {
    text.split('\n').count()
}
