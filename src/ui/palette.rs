//! Command palette and the single-line prompt

/// Every action the palette can run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NewFile,
    Save,
    Run,
    CloseTab,
    DeleteFile,
    TogglePreview,
    ClearTerminal,
    Quit,
}

impl Command {
    pub const ALL: [Command; 8] = [
        Command::NewFile,
        Command::Save,
        Command::Run,
        Command::CloseTab,
        Command::DeleteFile,
        Command::TogglePreview,
        Command::ClearTerminal,
        Command::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Command::NewFile => "New File",
            Command::Save => "Save Project",
            Command::Run => "Run Active File",
            Command::CloseTab => "Close Tab",
            Command::DeleteFile => "Delete File",
            Command::TogglePreview => "Toggle Preview",
            Command::ClearTerminal => "Clear Terminal",
            Command::Quit => "Quit",
        }
    }

    pub fn shortcut(self) -> &'static str {
        match self {
            Command::NewFile => "Ctrl+N",
            Command::Save => "Ctrl+S",
            Command::Run => "Ctrl+R",
            Command::CloseTab => "Ctrl+W",
            Command::DeleteFile => "Del",
            Command::TogglePreview => "F2",
            Command::ClearTerminal => "",
            Command::Quit => "Ctrl+Q",
        }
    }
}

/// Palette state: a filter query and the highlighted match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandPalette {
    pub query: String,
    pub selected: usize,
}

impl CommandPalette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands whose label contains the query, ignoring case
    pub fn matches(&self) -> Vec<Command> {
        let needle = self.query.to_lowercase();
        Command::ALL
            .into_iter()
            .filter(|cmd| cmd.label().to_lowercase().contains(&needle))
            .collect()
    }

    pub fn push(&mut self, c: char) {
        self.query.push(c);
        self.selected = 0;
    }

    pub fn pop(&mut self) {
        self.query.pop();
        self.selected = 0;
    }

    /// Move the highlight, wrapping at both ends
    pub fn move_selection(&mut self, delta: isize) {
        let count = self.matches().len();
        if count == 0 {
            self.selected = 0;
            return;
        }
        let current = self.selected.min(count - 1) as isize;
        self.selected = (current + delta).rem_euclid(count as isize) as usize;
    }

    pub fn current(&self) -> Option<Command> {
        self.matches().get(self.selected).copied()
    }
}

/// A one-line text input shown in a popup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: String,
    pub input: String,
}

impl Prompt {
    pub fn new(title: impl Into<String>) -> Self {
        Prompt {
            title: title.into(),
            input: String::new(),
        }
    }

    /// The trimmed input, or `None` when blank
    pub fn value(&self) -> Option<&str> {
        let trimmed = self.input.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_lists_everything() {
        let palette = CommandPalette::new();
        assert_eq!(palette.matches().len(), Command::ALL.len());
        assert_eq!(palette.current(), Some(Command::NewFile));
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let mut palette = CommandPalette::new();
        for c in "CLOSE".chars() {
            palette.push(c);
        }
        assert_eq!(palette.matches(), vec![Command::CloseTab]);

        palette.query = "zzz".into();
        assert_eq!(palette.current(), None);
    }

    #[test]
    fn test_selection_wraps() {
        let mut palette = CommandPalette::new();
        palette.move_selection(-1);
        assert_eq!(palette.current(), Some(Command::Quit));
        palette.move_selection(1);
        assert_eq!(palette.current(), Some(Command::NewFile));
    }

    #[test]
    fn test_blank_prompt_has_no_value() {
        let mut prompt = Prompt::new("New file");
        prompt.input = "   ".into();
        assert_eq!(prompt.value(), None);
        prompt.input = " app.js ".into();
        assert_eq!(prompt.value(), Some("app.js"));
    }
}
