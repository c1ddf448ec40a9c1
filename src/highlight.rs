//! Syntax highlighting
//!
//! The editor treats highlighting as a black box: source text and a
//! [`Language`] go in, styled lines come out. [`SyntectHighlighter`] is the
//! real implementation; [`PlainHighlighter`] leaves text unstyled.

use crate::workspace::Language;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use syntect::{
    easy::HighlightLines,
    highlighting::{FontStyle, Style as SyntectStyle, Theme, ThemeSet},
    parsing::SyntaxSet,
    util::LinesWithEndings,
};

/// Theme used when the configured one is not among syntect's defaults
pub const DEFAULT_SYNTAX_THEME: &str = "base16-ocean.dark";

/// Turns source text into styled display lines
pub trait Highlighter {
    /// Highlight `source`. Produces one line per `\n`-separated line.
    fn highlight(&self, source: &str, language: Language) -> Vec<Line<'static>>;
}

/// Unstyled output, one raw line per source line
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, source: &str, _language: Language) -> Vec<Line<'static>> {
        source
            .split('\n')
            .map(|line| Line::raw(line.to_string()))
            .collect()
    }
}

pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl SyntectHighlighter {
    /// Load syntect's bundled grammars and the named theme
    pub fn new(theme_name: &str) -> Self {
        let syntaxes = SyntaxSet::load_defaults_newlines();
        let mut themes = ThemeSet::load_defaults().themes;
        let theme = match themes.remove(theme_name) {
            Some(theme) => theme,
            None => {
                tracing::warn!(theme_name, "unknown syntax theme, using default");
                themes.remove(DEFAULT_SYNTAX_THEME).unwrap_or_default()
            }
        };
        SyntectHighlighter { syntaxes, theme }
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new(DEFAULT_SYNTAX_THEME)
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, source: &str, language: Language) -> Vec<Line<'static>> {
        if source.is_empty() {
            return vec![Line::default()];
        }

        let syntax = self
            .syntaxes
            .find_syntax_by_extension(language.extension())
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text());
        let mut highlighter = HighlightLines::new(syntax, &self.theme);

        let mut lines = Vec::new();
        for line in LinesWithEndings::from(source) {
            match highlighter.highlight_line(line, &self.syntaxes) {
                Ok(ranges) => {
                    let spans: Vec<Span<'static>> = ranges
                        .into_iter()
                        .filter_map(|(style, text)| {
                            let text = text.trim_end_matches(['\n', '\r']);
                            (!text.is_empty())
                                .then(|| Span::styled(text.to_string(), convert_style(style)))
                        })
                        .collect();
                    lines.push(Line::from(spans));
                }
                Err(e) => {
                    tracing::warn!("highlighting failed, falling back to plain text: {}", e);
                    lines.push(Line::raw(line.trim_end_matches(['\n', '\r']).to_string()));
                }
            }
        }
        if source.ends_with('\n') {
            lines.push(Line::default());
        }
        lines
    }
}

fn convert_style(style: SyntectStyle) -> Style {
    let fg = style.foreground;
    let mut converted = Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b));
    if style.font_style.contains(FontStyle::BOLD) {
        converted = converted.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        converted = converted.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        converted = converted.add_modifier(Modifier::UNDERLINED);
    }
    converted
}
