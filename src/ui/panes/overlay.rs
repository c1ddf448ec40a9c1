//! Modal popups drawn over the panes: command palette, prompt and preview

use crate::ui::palette::{CommandPalette, Prompt};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph},
    Frame,
};

/// A rect of `percent_x` x `percent_y` centered in `area`
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn popup_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(DEFAULT_THEME.popup_bg))
}

/// Input line on top, filtered commands below
pub fn render_palette(frame: &mut Frame, area: Rect, palette: &CommandPalette) {
    let popup = centered_rect(50, 50, area);
    frame.render_widget(Clear, popup);

    let block = popup_block(" Commands ");
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let query = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(DEFAULT_THEME.emphasis)),
        Span::styled(palette.query.as_str(), Style::default().fg(DEFAULT_THEME.fg)),
    ]));
    frame.render_widget(query, rows[0]);
    frame.set_cursor_position((
        rows[0].x + 2 + palette.query.chars().count() as u16,
        rows[0].y,
    ));

    let matches = palette.matches();
    if matches.is_empty() {
        let empty =
            Paragraph::new("No matching commands").style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(empty, rows[1]);
        return;
    }

    let width = rows[1].width as usize;
    let items: Vec<ListItem> = matches
        .iter()
        .enumerate()
        .map(|(i, command)| {
            let label = command.label();
            let shortcut = command.shortcut();
            let gap = width.saturating_sub(label.chars().count() + shortcut.len() + 2);
            let line = Line::from(vec![
                Span::raw(" "),
                Span::styled(label, Style::default().fg(DEFAULT_THEME.fg)),
                Span::raw(" ".repeat(gap)),
                Span::styled(shortcut, Style::default().fg(DEFAULT_THEME.comment)),
            ]);
            let item = ListItem::new(line);
            if i == palette.selected {
                item.style(
                    Style::default()
                        .bg(DEFAULT_THEME.selection_bg)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                item
            }
        })
        .collect();
    frame.render_widget(List::new(items), rows[1]);
}

pub fn render_prompt(frame: &mut Frame, area: Rect, prompt: &Prompt) {
    let popup = centered_rect(40, 20, area);
    let popup = Rect::new(popup.x, popup.y, popup.width, area.height.min(3));
    frame.render_widget(Clear, popup);

    let title = format!(" {} ", prompt.title);
    let block = popup_block(&title).padding(Padding::horizontal(1));
    let inner = block.inner(popup);
    frame.render_widget(
        Paragraph::new(prompt.input.as_str())
            .style(Style::default().fg(DEFAULT_THEME.fg))
            .block(block),
        popup,
    );
    frame.set_cursor_position((inner.x + prompt.input.chars().count() as u16, inner.y));
}

/// Scrollable rendered preview; `scroll` is clamped here
pub fn render_preview(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    lines: &[String],
    scroll: &mut usize,
) {
    let popup = centered_rect(80, 80, area);
    frame.render_widget(Clear, popup);

    let block = popup_block(title).padding(Padding::horizontal(1));
    let visible_height = block.inner(popup).height.max(1) as usize;
    *scroll = (*scroll).min(lines.len().saturating_sub(visible_height));

    let text: Vec<Line> = if lines.is_empty() {
        vec![Line::from(Span::styled(
            "(nothing to preview)",
            Style::default().fg(DEFAULT_THEME.comment),
        ))]
    } else {
        lines
            .iter()
            .skip(*scroll)
            .take(visible_height)
            .map(|line| {
                let style = if line.starts_with('#') {
                    Style::default()
                        .fg(DEFAULT_THEME.primary)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(DEFAULT_THEME.fg)
                };
                Line::from(Span::styled(line.as_str(), style))
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(text).block(block), popup);
}
