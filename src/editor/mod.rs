//! The editor engine
//!
//! Keeps three surfaces consistent for the active file:
//!
//! - the raw text being edited, with a cursor and optional selection
//! - the highlighted overlay produced by a [`Highlighter`]
//! - the line-number gutter
//!
//! The engine never owns file content for long. [`EditorEngine::load`] copies
//! the active record in; every editing method returns `true` when the text
//! changed so the caller can commit it back to the workspace right away.

pub mod cursor;
pub mod viewport;

use crate::highlight::Highlighter;
use crate::workspace::{FileRecord, Language};
use ratatui::text::Line;
use std::ops::Range;
use viewport::Surfaces;

/// Text inserted in place of a tab character
pub const TAB_INSERT: &str = "  ";

/// Fed to the highlighter after a trailing line break so the final empty line
/// still renders
const TRAILING_BLANK: &str = " ";

pub struct EditorEngine {
    text: String,
    language: Option<Language>,
    cursor: usize,
    anchor: Option<usize>,
    /// Column to aim for on vertical moves across shorter lines
    goal_column: Option<usize>,
    surfaces: Surfaces,
    /// Visible size of the text area, updated by the renderer
    view_height: usize,
    view_width: usize,
    highlighted: Vec<Line<'static>>,
    gutter: Vec<usize>,
    highlighter: Box<dyn Highlighter>,
}

impl EditorEngine {
    pub fn new(highlighter: Box<dyn Highlighter>) -> Self {
        let mut editor = EditorEngine {
            text: String::new(),
            language: None,
            cursor: 0,
            anchor: None,
            goal_column: None,
            surfaces: Surfaces::default(),
            view_height: 1,
            view_width: 1,
            highlighted: Vec::new(),
            gutter: Vec::new(),
            highlighter,
        };
        editor.on_content_changed();
        editor
    }

    /// Show `file`, or a blank disabled editor when there is none
    pub fn load(&mut self, file: Option<&FileRecord>) {
        match file {
            Some(file) => {
                self.text.clone_from(&file.content);
                self.language = Some(file.language);
            }
            None => {
                self.text.clear();
                self.language = None;
            }
        }
        self.cursor = 0;
        self.anchor = None;
        self.goal_column = None;
        self.surfaces = Surfaces::default();
        self.on_content_changed();
    }

    /// Regenerate the gutter and highlighted overlay from the raw text
    pub fn on_content_changed(&mut self) {
        self.gutter = (1..=cursor::line_count(&self.text)).collect();

        let language = self.language.unwrap_or(Language::Script);
        self.highlighted = if self.text.ends_with('\n') {
            let mut padded = String::with_capacity(self.text.len() + TRAILING_BLANK.len());
            padded.push_str(&self.text);
            padded.push_str(TRAILING_BLANK);
            self.highlighter.highlight(&padded, language)
        } else {
            self.highlighter.highlight(&self.text, language)
        };
        self.reveal_cursor();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    /// Whether a file is loaded; a disabled editor ignores edits
    pub fn is_enabled(&self) -> bool {
        self.language.is_some()
    }

    pub fn highlighted_lines(&self) -> &[Line<'static>] {
        &self.highlighted
    }

    /// Line numbers, 1-based, one per line
    pub fn gutter(&self) -> &[usize] {
        &self.gutter
    }

    pub fn surfaces(&self) -> &Surfaces {
        &self.surfaces
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// 1-based line and column of the cursor
    pub fn cursor_position(&self) -> (usize, usize) {
        let (line, col) = cursor::line_col(&self.text, self.cursor);
        (line + 1, col + 1)
    }

    /// The selected byte range; empty when nothing is selected
    pub fn selection(&self) -> Range<usize> {
        match self.anchor {
            Some(anchor) if anchor < self.cursor => anchor..self.cursor,
            Some(anchor) => self.cursor..anchor,
            None => self.cursor..self.cursor,
        }
    }

    /// Place the cursor, clamped and snapped back to a char boundary
    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = self.clamp(pos);
        self.anchor = None;
        self.goal_column = None;
        self.reveal_cursor();
    }

    /// Select `start..end`, leaving the cursor at `end`
    pub fn select(&mut self, start: usize, end: usize) {
        let start = self.clamp(start);
        self.cursor = self.clamp(end);
        self.anchor = (start != self.cursor).then_some(start);
        self.goal_column = None;
        self.reveal_cursor();
    }

    fn clamp(&self, pos: usize) -> usize {
        let mut pos = pos.min(self.text.len());
        while !self.text.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }

    /// Replace the selection (or insert at the cursor) with `s`
    pub fn insert_str(&mut self, s: &str) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let range = self.selection();
        self.text.replace_range(range.clone(), s);
        self.cursor = range.start + s.len();
        self.anchor = None;
        self.goal_column = None;
        self.on_content_changed();
        true
    }

    pub fn insert_char(&mut self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf))
    }

    pub fn insert_newline(&mut self) -> bool {
        self.insert_str("\n")
    }

    /// Insert two spaces instead of a tab character
    pub fn insert_tab(&mut self) -> bool {
        self.insert_str(TAB_INSERT)
    }

    pub fn backspace(&mut self) -> bool {
        if !self.is_enabled() {
            return false;
        }
        if self.anchor.is_none() {
            if self.cursor == 0 {
                return false;
            }
            self.anchor = Some(cursor::prev_boundary(&self.text, self.cursor));
        }
        self.insert_str("")
    }

    pub fn delete_forward(&mut self) -> bool {
        if !self.is_enabled() {
            return false;
        }
        if self.anchor.is_none() {
            if self.cursor == self.text.len() {
                return false;
            }
            self.anchor = Some(cursor::next_boundary(&self.text, self.cursor));
        }
        self.insert_str("")
    }

    fn begin_move(&mut self, extend: bool) {
        if extend {
            self.anchor.get_or_insert(self.cursor);
        } else {
            self.anchor = None;
        }
    }

    fn finish_move(&mut self) {
        if self.anchor == Some(self.cursor) {
            self.anchor = None;
        }
        self.reveal_cursor();
    }

    pub fn move_left(&mut self, extend: bool) {
        self.begin_move(extend);
        self.cursor = cursor::prev_boundary(&self.text, self.cursor);
        self.goal_column = None;
        self.finish_move();
    }

    pub fn move_right(&mut self, extend: bool) {
        self.begin_move(extend);
        self.cursor = cursor::next_boundary(&self.text, self.cursor);
        self.goal_column = None;
        self.finish_move();
    }

    pub fn move_home(&mut self, extend: bool) {
        self.begin_move(extend);
        self.cursor = cursor::line_start(&self.text, self.cursor);
        self.goal_column = None;
        self.finish_move();
    }

    pub fn move_end(&mut self, extend: bool) {
        self.begin_move(extend);
        self.cursor = cursor::line_end(&self.text, self.cursor);
        self.goal_column = None;
        self.finish_move();
    }

    /// Move the cursor `delta` lines, keeping the column where possible
    pub fn move_vertical(&mut self, delta: isize, extend: bool) {
        self.begin_move(extend);
        let (line, col) = cursor::line_col(&self.text, self.cursor);
        let goal = *self.goal_column.get_or_insert(col);
        let last_line = self.gutter.len().saturating_sub(1);
        let target = line.saturating_add_signed(delta).min(last_line);
        self.cursor = cursor::offset_at(&self.text, target, goal);
        self.finish_move();
    }

    pub fn page_up(&mut self, extend: bool) {
        self.move_vertical(-(self.view_height as isize), extend);
    }

    pub fn page_down(&mut self, extend: bool) {
        self.move_vertical(self.view_height as isize, extend);
    }

    /// Record the visible text area size; a resize pulls the cursor back into view
    pub fn set_view_size(&mut self, height: usize, width: usize) {
        let (height, width) = (height.max(1), width.max(1));
        if (height, width) != (self.view_height, self.view_width) {
            self.view_height = height;
            self.view_width = width;
            self.reveal_cursor();
        }
    }

    /// Scroll the input surface (mouse wheel); the other surfaces follow
    pub fn scroll_by(&mut self, lines: isize, cols: isize) {
        let max_top = self.gutter.len().saturating_sub(1);
        self.surfaces.scroll_by(lines, cols, max_top);
        self.sync_scroll();
    }

    /// Mirror the input surface's scroll offsets onto the overlay and gutter
    pub fn sync_scroll(&mut self) {
        self.surfaces.sync();
    }

    fn reveal_cursor(&mut self) {
        let (line, col) = cursor::line_col(&self.text, self.cursor);
        self.surfaces
            .reveal(line, col, self.view_height, self.view_width);
        self.sync_scroll();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::PlainHighlighter;
    use crate::workspace::FileId;

    fn editor_with(content: &str) -> EditorEngine {
        let mut editor = EditorEngine::new(Box::new(PlainHighlighter));
        let mut file = FileRecord::new(FileId::from("1"), "a.js");
        file.content = content.to_string();
        editor.load(Some(&file));
        editor
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_gutter_and_trailing_blank_marker() {
        let editor = editor_with("a\nb\n");
        assert_eq!(editor.gutter(), &[1, 2, 3]);
        let lines = editor.highlighted_lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(line_text(&lines[2]), TRAILING_BLANK);
    }

    #[test]
    fn test_tab_inserts_two_spaces_at_cursor() {
        let mut editor = editor_with("abcd");
        editor.set_cursor(2);
        assert!(editor.insert_tab());
        assert_eq!(editor.text(), "ab  cd");
        assert_eq!(editor.cursor(), 4);
    }

    #[test]
    fn test_tab_replaces_selection() {
        let mut editor = editor_with("abcd");
        editor.select(1, 3);
        editor.insert_tab();
        assert_eq!(editor.text(), "a  d");
        assert_eq!(editor.cursor(), 3);
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut editor = editor_with("héllo");
        editor.set_cursor(3);
        assert!(editor.backspace());
        assert_eq!(editor.text(), "hllo");
        assert_eq!(editor.cursor(), 1);
        assert!(editor.delete_forward());
        assert_eq!(editor.text(), "hlo");
        editor.set_cursor(0);
        assert!(!editor.backspace());
    }

    #[test]
    fn test_vertical_moves_keep_goal_column() {
        let mut editor = editor_with("abcdef\nab\nabcdef");
        editor.set_cursor(5);
        editor.move_vertical(1, false);
        assert_eq!(editor.cursor_position(), (2, 3));
        editor.move_vertical(1, false);
        assert_eq!(editor.cursor_position(), (3, 6));
    }

    #[test]
    fn test_shift_selection() {
        let mut editor = editor_with("hello");
        editor.move_right(true);
        editor.move_right(true);
        assert_eq!(editor.selection(), 0..2);
        editor.move_left(false);
        assert_eq!(editor.selection(), 1..1);
    }

    #[test]
    fn test_disabled_editor_ignores_edits() {
        let mut editor = EditorEngine::new(Box::new(PlainHighlighter));
        editor.load(None);
        assert!(!editor.is_enabled());
        assert!(!editor.insert_char('x'));
        assert_eq!(editor.text(), "");
        assert_eq!(editor.gutter(), &[1]);
    }

    #[test]
    fn test_scroll_keeps_surfaces_aligned() {
        let text: String = (0..100).map(|i| format!("line {i}\n")).collect();
        let mut editor = editor_with(&text);
        editor.set_view_size(10, 40);
        editor.scroll_by(30, 3);
        let surfaces = editor.surfaces();
        assert_eq!(surfaces.input.top, 30);
        assert_eq!(surfaces.overlay, surfaces.input);
        assert_eq!(surfaces.gutter.top, 30);

        editor.set_cursor(text.len());
        let surfaces = editor.surfaces();
        assert_eq!(surfaces.input.top, 91);
        assert_eq!(surfaces.gutter.top, 91);
    }
}
