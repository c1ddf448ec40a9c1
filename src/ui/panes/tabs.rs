//! Tab bar above the editor

use crate::ui::theme::DEFAULT_THEME;
use crate::ui::view::{tab_label, TabItem, CLOSE_GLYPH};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render one tab per open file, laid out as [`crate::ui::view::layout_tabs`]
/// expects: label, close glyph, a space, then a separator
pub fn render_tab_bar(frame: &mut Frame, area: Rect, tabs: &[TabItem]) {
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.tab_inactive_bg)
        .fg(DEFAULT_THEME.border_normal);

    let mut spans = Vec::with_capacity(tabs.len() * 4);
    for tab in tabs {
        let (bg, fg) = if tab.is_active {
            (DEFAULT_THEME.tab_active_bg, DEFAULT_THEME.emphasis)
        } else {
            (DEFAULT_THEME.tab_inactive_bg, DEFAULT_THEME.comment)
        };
        let mut label_style = Style::default().bg(bg).fg(fg);
        if tab.is_active {
            label_style = label_style.add_modifier(Modifier::BOLD);
        }

        spans.push(Span::styled(tab_label(tab), label_style));
        spans.push(Span::styled(
            CLOSE_GLYPH,
            Style::default().bg(bg).fg(DEFAULT_THEME.comment),
        ));
        spans.push(Span::styled(" ", Style::default().bg(bg)));
        spans.push(Span::styled("│", sep_style));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(DEFAULT_THEME.tab_inactive_bg));
    frame.render_widget(paragraph, area);
}
