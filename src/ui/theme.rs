use crate::console::Severity;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub error: Color,     // Red
    pub emphasis: Color,  // Purple
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub selection_bg: Color,
    pub tab_active_bg: Color,
    pub tab_inactive_bg: Color,
    pub popup_bg: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    error: Color::Rgb(243, 139, 168),
    emphasis: Color::Rgb(203, 166, 247),       // Purple for emphasis lines and active items
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for bars
    selection_bg: Color::Rgb(69, 71, 110),
    tab_active_bg: Color::Rgb(30, 30, 46),
    tab_inactive_bg: Color::Rgb(24, 24, 37),
    popup_bg: Color::Rgb(40, 40, 58),
};

impl Theme {
    /// Text color of a terminal line
    pub fn severity(&self, severity: Severity) -> Color {
        match severity {
            Severity::Neutral => self.comment,
            Severity::Emphasis => self.emphasis,
            Severity::Error => self.error,
        }
    }
}
