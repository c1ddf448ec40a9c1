//! Terminal output pane rendering

use crate::console::{LogPanel, Severity};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the terminal pane. Multi-line messages take one row per line; the
/// panel's scroll offset counts rows and is clamped here.
pub fn render_terminal_pane(frame: &mut Frame, area: Rect, panel: &mut LogPanel, is_focused: bool) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Terminal ")
        .borders(Borders::ALL)
        .border_style(border_style);

    if panel.is_empty() {
        let paragraph = Paragraph::new("(no output)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let all_items: Vec<ListItem> = panel
        .entries()
        .iter()
        .flat_map(|entry| {
            let time = entry.time_label();
            let blank = " ".repeat(time.len());
            let mut style = Style::default().fg(DEFAULT_THEME.severity(entry.severity));
            if entry.severity == Severity::Emphasis {
                style = style.add_modifier(Modifier::BOLD);
            }
            entry
                .message
                .split('\n')
                .enumerate()
                .map(|(i, text)| {
                    let stamp = if i == 0 { time.clone() } else { blank.clone() };
                    ListItem::new(Line::from(vec![
                        Span::styled(stamp, Style::default().fg(DEFAULT_THEME.border_normal)),
                        Span::styled(" > ", Style::default().fg(DEFAULT_THEME.border_normal)),
                        Span::styled(text.to_string(), style),
                    ]))
                })
                .collect::<Vec<_>>()
        })
        .collect();

    // Calculate visible range for scrolling
    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        panel.scroll = panel.scroll.min(max_scroll);
    } else {
        panel.scroll = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(panel.scroll)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
