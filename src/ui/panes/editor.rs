//! Editor pane: line-number gutter beside the highlighted overlay
//!
//! The overlay and gutter are drawn at the scroll offsets the engine keeps
//! for them, so they always line up with the cursor position in the raw
//! text.

use crate::editor::{cursor, EditorEngine};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the editor and return the text area (gutter excluded)
pub fn render_editor_pane(
    frame: &mut Frame,
    area: Rect,
    editor: &mut EditorEngine,
    is_focused: bool,
) -> Rect {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };
    let block = Block::default()
        .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if !editor.is_enabled() {
        let paragraph = Paragraph::new("No file open. Press Ctrl+N to create one.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        let y = inner.y + inner.height / 2;
        frame.render_widget(paragraph, Rect::new(inner.x, y, inner.width, inner.height.min(1)));
        return Rect::new(inner.x, inner.y, 0, 0);
    }

    let digits = editor.gutter().len().to_string().len().max(2);
    let gutter_width = (digits + 2) as u16;
    let gutter_area = Rect::new(inner.x, inner.y, gutter_width.min(inner.width), inner.height);
    let code_area = Rect::new(
        inner.x + gutter_area.width,
        inner.y,
        inner.width - gutter_area.width,
        inner.height,
    );

    editor.set_view_size(code_area.height as usize, code_area.width as usize);
    let surfaces = *editor.surfaces();
    let height = code_area.height as usize;
    let (cursor_line, cursor_col) = cursor::line_col(editor.text(), editor.cursor());

    let gutter_lines: Vec<Line> = editor
        .gutter()
        .iter()
        .skip(surfaces.gutter.top)
        .take(height)
        .map(|&number| {
            let style = if number == cursor_line + 1 {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };
            Line::from(Span::styled(format!(" {:>digits$} ", number), style))
        })
        .collect();
    frame.render_widget(Paragraph::new(gutter_lines), gutter_area);

    let selection = editor.selection();
    let sel_start = cursor::line_col(editor.text(), selection.start);
    let sel_end = cursor::line_col(editor.text(), selection.end);

    let code_lines: Vec<Line> = editor
        .highlighted_lines()
        .iter()
        .enumerate()
        .skip(surfaces.overlay.top)
        .take(height)
        .map(|(index, line)| {
            let selected = selected_columns(index, sel_start, sel_end);
            clip_line(line, surfaces.overlay.left, code_area.width as usize, selected)
        })
        .collect();
    frame.render_widget(
        Paragraph::new(code_lines).style(Style::default().fg(DEFAULT_THEME.fg)),
        code_area,
    );

    if is_focused
        && cursor_line >= surfaces.overlay.top
        && cursor_line < surfaces.overlay.top + height
        && cursor_col >= surfaces.overlay.left
        && cursor_col < surfaces.overlay.left + code_area.width as usize
    {
        frame.set_cursor_position((
            code_area.x + (cursor_col - surfaces.overlay.left) as u16,
            code_area.y + (cursor_line - surfaces.overlay.top) as u16,
        ));
    }

    code_area
}

/// Columns of line `index` covered by the selection `start..end`
fn selected_columns(
    index: usize,
    (start_line, start_col): (usize, usize),
    (end_line, end_col): (usize, usize),
) -> Option<(usize, usize)> {
    if (start_line, start_col) == (end_line, end_col) || index < start_line || index > end_line {
        return None;
    }
    let from = if index == start_line { start_col } else { 0 };
    let to = if index == end_line { end_col } else { usize::MAX };
    (from < to).then_some((from, to))
}

/// Cut `line` to the columns `left..left + width`, painting `selected`
/// columns with the selection background
fn clip_line(
    line: &Line<'static>,
    left: usize,
    width: usize,
    selected: Option<(usize, usize)>,
) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut column = 0usize;

    for span in &line.spans {
        for c in span.content.chars() {
            if column >= left + width {
                break;
            }
            if column >= left {
                let mut style = span.style;
                if selected.is_some_and(|(from, to)| column >= from && column < to) {
                    style = style.bg(DEFAULT_THEME.selection_bg);
                }
                match spans.last_mut() {
                    Some(last) if last.style == style => last.content.to_mut().push(c),
                    _ => spans.push(Span::styled(c.to_string(), style)),
                }
            }
            column += 1;
        }
    }

    Line::from(spans)
}
