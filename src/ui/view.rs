//! View models for the explorer and tab bar, and click hit-testing
//!
//! Panes render from these plain rows instead of reading the workspace
//! directly, and mouse clicks are resolved against the same rows. A click
//! resolves to exactly one [`ClickTarget`]: a press on a close/delete glyph is
//! never also a select/switch.

use crate::workspace::{FileIcon, FileId, Workspace};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Glyph of the close/delete button on tabs and explorer rows
pub const CLOSE_GLYPH: &str = "×";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerRow {
    pub id: FileId,
    pub name: String,
    pub icon: FileIcon,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabItem {
    pub id: FileId,
    pub name: String,
    pub icon: FileIcon,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    SelectFile(FileId),
    DeleteFile(FileId),
    SwitchTab(FileId),
    CloseTab(FileId),
}

/// Every file, in store order
pub fn explorer_rows(workspace: &Workspace) -> Vec<ExplorerRow> {
    workspace
        .store()
        .iter()
        .map(|file| ExplorerRow {
            id: file.id.clone(),
            name: file.name.clone(),
            icon: file.icon(),
            is_active: workspace.session().is_active(&file.id),
        })
        .collect()
}

/// Open tabs in order; ids that no longer resolve are skipped
pub fn tab_items(workspace: &Workspace) -> Vec<TabItem> {
    workspace
        .open_files()
        .map(|file| TabItem {
            id: file.id.clone(),
            name: file.name.clone(),
            icon: file.icon(),
            is_active: workspace.session().is_active(&file.id),
        })
        .collect()
}

/// Text of a tab up to (not including) its close glyph
pub fn tab_label(tab: &TabItem) -> String {
    format!(" {} {} ", tab.icon.glyph(), tab.name)
}

/// Terminal columns `text` occupies
pub fn display_width(text: &str) -> usize {
    text.width()
}

/// Cut `text` to at most `width` columns, then pad it with spaces to exactly
/// `width`. A wide character that would straddle the edge is dropped.
pub fn fit_to_width(text: &str, width: usize) -> String {
    let mut fitted = String::with_capacity(width);
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        fitted.push(c);
        used += w;
    }
    fitted.extend(std::iter::repeat(' ').take(width - used));
    fitted
}

/// Leading icon cell of an explorer row
pub fn explorer_prefix(icon: FileIcon) -> String {
    format!(" {} ", icon.glyph())
}

/// Horizontal extent of one tab, in columns from the start of the bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSpan {
    pub id: FileId,
    pub start: u16,
    /// Column of the close glyph
    pub close: u16,
    /// One past the last column
    pub end: u16,
}

/// Lay tabs out left to right: label, close glyph, trailing space, separator
pub fn layout_tabs(tabs: &[TabItem]) -> Vec<TabSpan> {
    let mut spans = Vec::with_capacity(tabs.len());
    let mut x: u16 = 0;
    for tab in tabs {
        let label_width = display_width(&tab_label(tab)) as u16;
        let start = x;
        let close = start.saturating_add(label_width);
        let end = close.saturating_add(2);
        spans.push(TabSpan {
            id: tab.id.clone(),
            start,
            close,
            end,
        });
        x = end.saturating_add(1);
    }
    spans
}

/// Resolve a click at column `x` (relative to the bar) on the tab bar
pub fn hit_tab(spans: &[TabSpan], x: u16) -> Option<ClickTarget> {
    let span = spans.iter().find(|s| x >= s.start && x < s.end)?;
    if x == span.close {
        Some(ClickTarget::CloseTab(span.id.clone()))
    } else {
        Some(ClickTarget::SwitchTab(span.id.clone()))
    }
}

/// Resolve a click on explorer row `row` at column `x`, both relative to the
/// list's inner area of width `width`. Rows are drawn with the name fitted by
/// [`fit_to_width`], so the delete glyph always sits two columns in from the
/// right edge.
pub fn hit_explorer(rows: &[ExplorerRow], row: usize, x: u16, width: u16) -> Option<ClickTarget> {
    let entry = rows.get(row)?;
    if x + 3 >= width && x + 1 < width {
        Some(ClickTarget::DeleteFile(entry.id.clone()))
    } else {
        Some(ClickTarget::SelectFile(entry.id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> FileId {
        FileId::from(raw)
    }

    #[test]
    fn test_rows_mark_active() {
        let ws = Workspace::with_defaults();
        let rows = explorer_rows(&ws);
        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_active);
        assert!(!rows[1].is_active);
    }

    #[test]
    fn test_tabs_skip_dangling_ids() {
        let mut ws = Workspace::with_defaults();
        ws.delete_file(&id("2"));
        let names: Vec<String> = tab_items(&ws).into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["index.html", "styles.css"]);
    }

    #[test]
    fn test_tab_hits_do_not_overlap() {
        let ws = Workspace::with_defaults();
        let spans = layout_tabs(&tab_items(&ws));
        // " <> index.html " is 15 columns; close glyph at 15
        assert_eq!(spans[0].close, 15);
        assert_eq!(hit_tab(&spans, 0), Some(ClickTarget::SwitchTab(id("1"))));
        assert_eq!(hit_tab(&spans, 15), Some(ClickTarget::CloseTab(id("1"))));
        assert_eq!(hit_tab(&spans, 17), None);
        assert_eq!(
            hit_tab(&spans, spans[1].start),
            Some(ClickTarget::SwitchTab(id("2")))
        );
    }

    #[test]
    fn test_wide_tab_name_measured_in_columns() {
        let tabs = vec![TabItem {
            id: id("7"),
            name: "日本語.js".to_string(),
            icon: FileIcon::Script,
            is_active: true,
        }];
        let spans = layout_tabs(&tabs);
        // " {} " is 4 columns, the name 9, then a trailing space
        assert_eq!(spans[0].close, 14);
        assert_eq!(hit_tab(&spans, 14), Some(ClickTarget::CloseTab(id("7"))));
        assert_eq!(hit_tab(&spans, 11), Some(ClickTarget::SwitchTab(id("7"))));
    }

    #[test]
    fn test_fit_to_width_counts_columns() {
        assert_eq!(fit_to_width("ab", 4), "ab  ");
        assert_eq!(fit_to_width("日本語", 4), "日本");
        // The third wide char would straddle the edge
        assert_eq!(fit_to_width("日本語", 5), "日本 ");
        assert_eq!(display_width(&fit_to_width("日本語のファイル名前テスト.js", 11)), 11);
    }

    #[test]
    fn test_explorer_delete_glyph() {
        let ws = Workspace::with_defaults();
        let rows = explorer_rows(&ws);
        assert_eq!(
            hit_explorer(&rows, 1, 2, 20),
            Some(ClickTarget::SelectFile(id("2")))
        );
        assert_eq!(
            hit_explorer(&rows, 1, 18, 20),
            Some(ClickTarget::DeleteFile(id("2")))
        );
        assert_eq!(hit_explorer(&rows, 9, 2, 20), None);
    }
}
