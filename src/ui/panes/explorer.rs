//! File explorer pane

use crate::ui::theme::DEFAULT_THEME;
use crate::ui::view::{display_width, explorer_prefix, fit_to_width, ExplorerRow, CLOSE_GLYPH};
use crate::workspace::FileIcon;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

fn icon_color(icon: FileIcon) -> Color {
    match icon {
        FileIcon::Script => DEFAULT_THEME.secondary,
        FileIcon::Code => DEFAULT_THEME.primary,
        FileIcon::Palette => DEFAULT_THEME.emphasis,
        FileIcon::Generic => DEFAULT_THEME.comment,
    }
}

/// Render the explorer and return the inner list area (for click hit-testing).
///
/// `scroll_offset` is the first visible row; it is adjusted so `selected`
/// stays in view.
pub fn render_explorer_pane(
    frame: &mut Frame,
    area: Rect,
    rows: &[ExplorerRow],
    selected: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) -> Rect {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Explorer ")
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);

    if rows.is_empty() {
        let paragraph = Paragraph::new("(no files)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return inner;
    }

    let visible_height = inner.height.max(1) as usize;
    if selected < *scroll_offset {
        *scroll_offset = selected;
    } else if selected >= *scroll_offset + visible_height {
        *scroll_offset = selected + 1 - visible_height;
    }
    *scroll_offset = (*scroll_offset).min(rows.len().saturating_sub(visible_height));

    let width = inner.width as usize;
    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(index, row)| {
            let prefix = explorer_prefix(row.icon);
            // Name fills the row up to the trailing " × ", measured in columns
            let name_width = width.saturating_sub(display_width(&prefix) + 3);
            let name = fit_to_width(&row.name, name_width);

            let name_style = if row.is_active {
                Style::default()
                    .fg(DEFAULT_THEME.emphasis)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };

            let line = Line::from(vec![
                Span::styled(prefix, Style::default().fg(icon_color(row.icon))),
                Span::styled(name, name_style),
                Span::raw(" "),
                Span::styled(CLOSE_GLYPH, Style::default().fg(DEFAULT_THEME.comment)),
                Span::raw(" "),
            ]);

            let item = ListItem::new(line);
            if is_focused && index == selected {
                item.style(Style::default().bg(DEFAULT_THEME.current_line_bg))
            } else {
                item
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
    inner
}
