//! Status bar rendering with keybindings and cursor position

use crate::ui::theme::DEFAULT_THEME;
use crate::workspace::Language;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// What the status bar shows
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    /// Language of the active file, `None` when nothing is open
    pub language: Option<Language>,
    /// 1-based line and column of the cursor
    pub position: Option<(usize, usize)>,
}

/// Render the status bar at the bottom
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: &StatusRenderData) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let language_label = match data.language {
        Some(language) => format!(" {} ", language.display_name()),
        None => " NO FILE ".to_string(),
    };
    let badge_bg = match data.language {
        Some(language) if language.is_executable() => DEFAULT_THEME.secondary,
        Some(_) => DEFAULT_THEME.primary,
        None => DEFAULT_THEME.comment,
    };

    let bar_style = Style::default().bg(DEFAULT_THEME.current_line_bg);
    let mut left_spans = vec![
        Span::styled(
            language_label,
            Style::default()
                .bg(badge_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", bar_style.fg(DEFAULT_THEME.comment)),
    ];
    if let Some((line, column)) = data.position {
        left_spans.push(Span::styled(
            format!("Ln {}, Col {}", line, column),
            bar_style.fg(DEFAULT_THEME.fg),
        ));
        left_spans.push(Span::styled(" | ", bar_style.fg(DEFAULT_THEME.comment)));
    }
    left_spans.push(Span::styled(
        format!(" {} ", data.message),
        bar_style.fg(DEFAULT_THEME.fg),
    ));

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(bar_style)
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    // Right side: Keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = bar_style.fg(DEFAULT_THEME.fg);
    let sep_style = bar_style.fg(DEFAULT_THEME.comment);

    let bindings = [
        ("^S", "save"),
        ("^R", "run"),
        ("^N", "new"),
        ("^W", "close"),
        ("F1", "commands"),
        ("F6", "focus"),
        ("^Q", "quit"),
    ];
    let mut right_spans = Vec::with_capacity(bindings.len() * 3);
    for (i, (key, desc)) in bindings.iter().enumerate() {
        if i > 0 {
            right_spans.push(Span::styled("│", sep_style));
        }
        right_spans.push(Span::styled(format!(" {} ", key), key_style));
        right_spans.push(Span::styled(format!(" {} ", desc), desc_style));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(bar_style)
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}
