//! Main TUI application state and logic

use crate::config::Config;
use crate::console::LogPanel;
use crate::editor::{cursor, EditorEngine};
use crate::preview;
use crate::runner::{run_active, RunOutcome, ScriptHost};
use crate::storage::Persistence;
use crate::ui::palette::{Command, CommandPalette, Prompt};
use crate::ui::panes::{self, StatusRenderData};
use crate::ui::view::{self, ClickTarget};
use crate::workspace::{FileId, Workspace};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Lines moved per mouse wheel notch
const WHEEL_STEP: usize = 3;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Explorer,
    Editor,
    Terminal,
}

impl FocusedPane {
    /// Move focus to the next pane (explorer -> editor -> terminal)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Explorer => FocusedPane::Editor,
            FocusedPane::Editor => FocusedPane::Terminal,
            FocusedPane::Terminal => FocusedPane::Explorer,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Explorer => FocusedPane::Terminal,
            FocusedPane::Editor => FocusedPane::Explorer,
            FocusedPane::Terminal => FocusedPane::Editor,
        }
    }
}

/// Rendered preview of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewState {
    pub title: String,
    pub lines: Vec<String>,
    pub scroll: usize,
}

/// Modal popup currently capturing input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Palette(CommandPalette),
    NewFilePrompt(Prompt),
    Preview(PreviewState),
}

/// Screen areas from the last frame, used to route mouse events
#[derive(Debug, Clone, Copy, Default)]
struct PaneAreas {
    explorer: Rect,
    tabs: Rect,
    editor: Rect,
    code: Rect,
    terminal: Rect,
}

/// The main application state
pub struct App {
    pub workspace: Workspace,
    pub editor: EditorEngine,
    pub terminal: LogPanel,

    persistence: Persistence,
    script_host: Box<dyn ScriptHost>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    pub overlay: Overlay,

    /// Highlighted explorer row
    pub explorer_selected: usize,
    explorer_scroll: usize,

    explorer_width: u16,
    terminal_height: u16,
    areas: PaneAreas,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    pub fn new(
        workspace: Workspace,
        editor: EditorEngine,
        persistence: Persistence,
        script_host: Box<dyn ScriptHost>,
        config: &Config,
    ) -> Self {
        let mut app = App {
            workspace,
            editor,
            terminal: LogPanel::new(),
            persistence,
            script_host,
            focused_pane: FocusedPane::Editor,
            overlay: Overlay::None,
            explorer_selected: 0,
            explorer_scroll: 0,
            explorer_width: config.explorer_width,
            terminal_height: config.terminal_height,
            areas: PaneAreas::default(),
            should_quit: false,
            status_message: String::from("Ready!"),
        };
        app.reload_editor();
        app
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(250))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key_event(key)
                    }
                    Event::Mouse(mouse) => self.handle_mouse_event(mouse),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(self.explorer_width), Constraint::Min(0)])
            .split(main_chunks[0]);

        // Right column: tab bar, editor (top) | terminal (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Percentage(100 - self.terminal_height),
                Constraint::Percentage(self.terminal_height),
            ])
            .split(columns[1]);

        let rows = view::explorer_rows(&self.workspace);
        self.areas.explorer = panes::render_explorer_pane(
            frame,
            columns[0],
            &rows,
            self.explorer_selected,
            self.focused_pane == FocusedPane::Explorer,
            &mut self.explorer_scroll,
        );

        self.areas.tabs = right_rows[0];
        panes::render_tab_bar(frame, right_rows[0], &view::tab_items(&self.workspace));

        self.areas.editor = right_rows[1];
        self.areas.code = panes::render_editor_pane(
            frame,
            right_rows[1],
            &mut self.editor,
            self.focused_pane == FocusedPane::Editor && self.overlay == Overlay::None,
        );

        self.areas.terminal = right_rows[2];
        panes::render_terminal_pane(
            frame,
            right_rows[2],
            &mut self.terminal,
            self.focused_pane == FocusedPane::Terminal,
        );

        let status = StatusRenderData {
            message: &self.status_message,
            language: self.editor.language(),
            position: self
                .editor
                .is_enabled()
                .then(|| self.editor.cursor_position()),
        };
        panes::render_status_bar(frame, main_chunks[1], &status);

        match &mut self.overlay {
            Overlay::None => {}
            Overlay::Palette(palette) => panes::render_palette(frame, size, palette),
            Overlay::NewFilePrompt(prompt) => panes::render_prompt(frame, size, prompt),
            Overlay::Preview(state) => {
                panes::render_preview(frame, size, &state.title, &state.lines, &mut state.scroll)
            }
        }
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match self.overlay {
            Overlay::Palette(_) => return self.handle_palette_key(key),
            Overlay::NewFilePrompt(_) => return self.handle_prompt_key(key),
            Overlay::Preview(_) => return self.handle_preview_key(key),
            Overlay::None => {}
        }

        if self.handle_global_key(key) {
            return;
        }

        match self.focused_pane {
            FocusedPane::Explorer => self.handle_explorer_key(key),
            FocusedPane::Editor => self.handle_editor_key(key),
            FocusedPane::Terminal => self.handle_terminal_key(key),
        }
    }

    /// Shortcuts that work in every pane. Returns whether `key` was consumed.
    fn handle_global_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::F(1) => self.open_palette(),
            KeyCode::Char(c) if ctrl && c.eq_ignore_ascii_case(&'p') && (shift || c == 'P') => {
                self.open_palette()
            }
            KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
                's' => self.save(),
                'n' => self.open_new_file_prompt(),
                'w' => self.close_active_tab(),
                'r' => self.run_active_file(),
                'q' => self.quit(),
                _ => return false,
            },
            KeyCode::F(2) => self.toggle_preview(),
            KeyCode::F(5) => self.run_active_file(),
            KeyCode::F(6) => self.focused_pane = self.focused_pane.next(),
            KeyCode::BackTab => self.focused_pane = self.focused_pane.prev(),
            KeyCode::Left if alt => self.cycle_tab(-1),
            KeyCode::Right if alt => self.cycle_tab(1),
            _ => return false,
        }
        true
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER);

        let changed = match key.code {
            KeyCode::Char(c) if plain => self.editor.insert_char(c),
            KeyCode::Enter => self.editor.insert_newline(),
            KeyCode::Tab => self.editor.insert_tab(),
            KeyCode::Backspace => self.editor.backspace(),
            KeyCode::Delete => self.editor.delete_forward(),
            KeyCode::Left => {
                self.editor.move_left(shift);
                false
            }
            KeyCode::Right => {
                self.editor.move_right(shift);
                false
            }
            KeyCode::Up => {
                self.editor.move_vertical(-1, shift);
                false
            }
            KeyCode::Down => {
                self.editor.move_vertical(1, shift);
                false
            }
            KeyCode::Home => {
                self.editor.move_home(shift);
                false
            }
            KeyCode::End => {
                self.editor.move_end(shift);
                false
            }
            KeyCode::PageUp => {
                self.editor.page_up(shift);
                false
            }
            KeyCode::PageDown => {
                self.editor.page_down(shift);
                false
            }
            KeyCode::Esc => {
                self.focused_pane = FocusedPane::Explorer;
                false
            }
            _ => false,
        };

        // Every edit is written straight back into the active record
        if changed {
            self.workspace.commit(self.editor.text());
        }
    }

    fn handle_explorer_key(&mut self, key: KeyEvent) {
        let count = self.workspace.store().len();
        match key.code {
            KeyCode::Up => {
                self.explorer_selected = self.explorer_selected.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.explorer_selected + 1 < count {
                    self.explorer_selected += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(id) = self.selected_file_id() {
                    self.switch_to(&id);
                    self.focused_pane = FocusedPane::Editor;
                }
            }
            KeyCode::Delete => {
                if let Some(id) = self.selected_file_id() {
                    self.delete_file(&id);
                }
            }
            KeyCode::Char('n') => self.open_new_file_prompt(),
            KeyCode::Esc => self.focused_pane = FocusedPane::Editor,
            _ => {}
        }
    }

    fn handle_terminal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.terminal.scroll_up(1),
            KeyCode::Down => self.terminal.scroll_down(1),
            KeyCode::PageUp => self.terminal.scroll_up(10),
            KeyCode::PageDown => self.terminal.scroll_down(10),
            KeyCode::Home => self.terminal.scroll = 0,
            KeyCode::End => self.terminal.scroll = usize::MAX,
            KeyCode::Esc => self.focused_pane = FocusedPane::Editor,
            _ => {}
        }
    }

    fn handle_palette_key(&mut self, key: KeyEvent) {
        let Overlay::Palette(palette) = &mut self.overlay else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.overlay = Overlay::None,
            KeyCode::Up => palette.move_selection(-1),
            KeyCode::Down => palette.move_selection(1),
            KeyCode::Backspace => palette.pop(),
            KeyCode::Char(c) => palette.push(c),
            KeyCode::Enter => {
                let command = palette.current();
                self.overlay = Overlay::None;
                if let Some(command) = command {
                    self.execute_command(command);
                }
            }
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let Overlay::NewFilePrompt(prompt) = &mut self.overlay else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.overlay = Overlay::None,
            KeyCode::Backspace => {
                prompt.input.pop();
            }
            KeyCode::Char(c) => prompt.input.push(c),
            KeyCode::Enter => {
                let name = prompt.value().map(str::to_string);
                self.overlay = Overlay::None;
                match name {
                    Some(name) => self.create_file(&name),
                    None => self.status_message = "New file cancelled".to_string(),
                }
            }
            _ => {}
        }
    }

    fn handle_preview_key(&mut self, key: KeyEvent) {
        let Overlay::Preview(state) = &mut self.overlay else {
            return;
        };
        match key.code {
            KeyCode::Esc | KeyCode::F(2) | KeyCode::Char('q') => self.overlay = Overlay::None,
            KeyCode::Up => state.scroll = state.scroll.saturating_sub(1),
            KeyCode::Down => state.scroll = state.scroll.saturating_add(1),
            KeyCode::PageUp => state.scroll = state.scroll.saturating_sub(10),
            KeyCode::PageDown => state.scroll = state.scroll.saturating_add(10),
            _ => {}
        }
    }

    /// Handle mouse events. Each click resolves to a single target.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let pos = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if self.overlay == Overlay::None => {
                self.handle_click(pos)
            }
            MouseEventKind::ScrollUp => self.scroll_focused(-1),
            MouseEventKind::ScrollDown => self.scroll_focused(1),
            _ => {}
        }
    }

    fn handle_click(&mut self, pos: Position) {
        let areas = self.areas;
        if areas.explorer.contains(pos) {
            self.focused_pane = FocusedPane::Explorer;
            let rows = view::explorer_rows(&self.workspace);
            let row = (pos.y - areas.explorer.y) as usize + self.explorer_scroll;
            if let Some(target) =
                view::hit_explorer(&rows, row, pos.x - areas.explorer.x, areas.explorer.width)
            {
                self.apply_click(target);
            }
        } else if areas.tabs.contains(pos) {
            let spans = view::layout_tabs(&view::tab_items(&self.workspace));
            if let Some(target) = view::hit_tab(&spans, pos.x - areas.tabs.x) {
                self.apply_click(target);
            }
        } else if areas.code.contains(pos) {
            self.focused_pane = FocusedPane::Editor;
            let scroll = self.editor.surfaces().input;
            let line = scroll.top + (pos.y - areas.code.y) as usize;
            let col = scroll.left + (pos.x - areas.code.x) as usize;
            let offset = cursor::offset_at(self.editor.text(), line, col);
            self.editor.set_cursor(offset);
        } else if areas.editor.contains(pos) {
            self.focused_pane = FocusedPane::Editor;
        } else if areas.terminal.contains(pos) {
            self.focused_pane = FocusedPane::Terminal;
        }
    }

    fn apply_click(&mut self, target: ClickTarget) {
        match target {
            ClickTarget::SelectFile(id) | ClickTarget::SwitchTab(id) => {
                self.switch_to(&id);
                self.focused_pane = FocusedPane::Editor;
            }
            ClickTarget::DeleteFile(id) => self.delete_file(&id),
            ClickTarget::CloseTab(id) => self.close_tab(&id),
        }
    }

    /// Mouse wheel: scroll whatever has focus
    fn scroll_focused(&mut self, direction: isize) {
        if let Overlay::Preview(state) = &mut self.overlay {
            state.scroll = state
                .scroll
                .saturating_add_signed(direction * WHEEL_STEP as isize);
            return;
        }
        match self.focused_pane {
            FocusedPane::Editor => self.editor.scroll_by(direction * WHEEL_STEP as isize, 0),
            FocusedPane::Terminal if direction < 0 => self.terminal.scroll_up(WHEEL_STEP),
            FocusedPane::Terminal => self.terminal.scroll_down(WHEEL_STEP),
            FocusedPane::Explorer => {}
        }
    }

    fn execute_command(&mut self, command: Command) {
        match command {
            Command::NewFile => self.open_new_file_prompt(),
            Command::Save => self.save(),
            Command::Run => self.run_active_file(),
            Command::CloseTab => self.close_active_tab(),
            Command::DeleteFile => {
                if let Some(id) = self.workspace.active_id().cloned() {
                    self.delete_file(&id);
                }
            }
            Command::TogglePreview => self.toggle_preview(),
            Command::ClearTerminal => self.terminal.clear(),
            Command::Quit => self.quit(),
        }
    }

    fn open_palette(&mut self) {
        self.overlay = Overlay::Palette(CommandPalette::new());
    }

    fn open_new_file_prompt(&mut self) {
        self.overlay = Overlay::NewFilePrompt(Prompt::new("New file name"));
    }

    /// Create a file, open it in a tab and make it active
    pub fn create_file(&mut self, name: &str) {
        let id = self.workspace.create_file(name);
        tracing::info!(%id, name, "created file");
        self.switch_to(&id);
        self.status_message = format!("Created {}", name);
    }

    /// Make `id` active, keeping the editor's live text in the previous file
    pub fn switch_to(&mut self, id: &FileId) {
        if self.workspace.active_id() == Some(id) {
            self.sync_explorer_selection();
            return;
        }
        let live_text = self.editor.is_enabled().then(|| self.editor.text());
        if !self.workspace.switch_to(id, live_text) {
            tracing::warn!(%id, "switch to unknown file");
            return;
        }
        self.reload_editor();
        self.persist();
    }

    pub fn close_tab(&mut self, id: &FileId) {
        self.commit_live_text();
        let before = self.workspace.active_id().cloned();
        self.workspace.close_tab(id);
        if self.workspace.active_id() != before.as_ref() {
            self.reload_editor();
        }
        self.persist();
    }

    fn close_active_tab(&mut self) {
        if let Some(id) = self.workspace.active_id().cloned() {
            self.close_tab(&id);
        }
    }

    pub fn delete_file(&mut self, id: &FileId) {
        self.commit_live_text();
        let before = self.workspace.active_id().cloned();
        let Some(removed) = self.workspace.delete_file(id) else {
            return;
        };
        tracing::info!(%id, name = %removed.name, "deleted file");
        self.status_message = format!("Deleted {}", removed.name);
        if self.workspace.active_id() != before.as_ref() {
            self.reload_editor();
        } else {
            self.sync_explorer_selection();
        }
        self.persist();
    }

    /// Ctrl+S: flush everything and confirm in the terminal
    pub fn save(&mut self) {
        self.commit_live_text();
        match self.persistence.save(&self.workspace) {
            Ok(()) => {
                self.terminal.emphasis("Project saved successfully.");
                self.status_message = "Saved".to_string();
            }
            Err(e) => self.report_save_error(e),
        }
    }

    /// Run the active file, or preview it when it is not a script
    pub fn run_active_file(&mut self) {
        self.commit_live_text();
        // A script that hangs or crashes the host must not lose unsaved edits
        self.persist();
        match run_active(&self.workspace, &mut *self.script_host, &mut self.terminal) {
            RunOutcome::Executed => self.status_message = "Run finished".to_string(),
            RunOutcome::Failed => self.status_message = "Run failed".to_string(),
            RunOutcome::Preview(id) => self.open_preview(&id),
            RunOutcome::NothingActive => self.status_message = "No file to run".to_string(),
        }
    }

    fn toggle_preview(&mut self) {
        if matches!(self.overlay, Overlay::Preview(_)) {
            self.overlay = Overlay::None;
        } else if let Some(id) = self.workspace.active_id().cloned() {
            self.commit_live_text();
            self.open_preview(&id);
        }
    }

    fn open_preview(&mut self, id: &FileId) {
        if let Some(file) = self.workspace.store().get(id) {
            self.overlay = Overlay::Preview(PreviewState {
                title: format!(" Preview: {} ", file.name),
                lines: preview::render(file),
                scroll: 0,
            });
            self.status_message = format!("Previewing {}", file.name);
        }
    }

    /// Save the session and stop the event loop
    pub fn quit(&mut self) {
        self.commit_live_text();
        self.persist();
        self.should_quit = true;
    }

    fn cycle_tab(&mut self, delta: isize) {
        let tabs = view::tab_items(&self.workspace);
        if tabs.is_empty() {
            return;
        }
        let current = tabs.iter().position(|t| t.is_active).unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(tabs.len() as isize) as usize;
        self.switch_to(&tabs[next].id);
    }

    fn commit_live_text(&mut self) {
        if self.editor.is_enabled() {
            self.workspace.commit(self.editor.text());
        }
    }

    /// Show the active file (or nothing) in the editor
    fn reload_editor(&mut self) {
        self.editor.load(self.workspace.active_file());
        self.sync_explorer_selection();
        if let Some(file) = self.workspace.active_file() {
            self.status_message = format!("Editing {}", file.name);
        }
    }

    fn sync_explorer_selection(&mut self) {
        let count = self.workspace.store().len();
        if let Some(id) = self.workspace.active_id() {
            if let Some(index) = self.workspace.store().iter().position(|f| &f.id == id) {
                self.explorer_selected = index;
                return;
            }
        }
        self.explorer_selected = self.explorer_selected.min(count.saturating_sub(1));
    }

    fn selected_file_id(&self) -> Option<FileId> {
        self.workspace
            .store()
            .records()
            .get(self.explorer_selected)
            .map(|f| f.id.clone())
    }

    /// Persist the session; failures are reported but never fatal
    fn persist(&mut self) {
        if let Err(e) = self.persistence.save(&self.workspace) {
            self.report_save_error(e);
        }
    }

    fn report_save_error(&mut self, error: crate::storage::StorageError) {
        tracing::error!(%error, "failed to save workspace");
        self.terminal.error(format!("Save failed: {}", error));
        self.status_message = "Save failed".to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::PlainHighlighter;
    use crate::runner::ScriptError;
    use crate::console::Severity;
    use crate::storage::{
        KeyValueStore, MemoryStore, StorageError, ACTIVE_ID_KEY, FILES_KEY, OPEN_IDS_KEY,
    };
    use ratatui::backend::TestBackend;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Memory store that stays readable after the app takes ownership
    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<MemoryStore>>);

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key)
        }

        fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
            self.0.borrow_mut().set(key, value)
        }
    }

    /// Store whose every write fails
    struct FullDisk;

    impl KeyValueStore for FullDisk {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: String) -> Result<(), StorageError> {
            Err(StorageError::Io(io::Error::new(io::ErrorKind::Other, "disk full")))
        }
    }

    struct EchoHost;

    impl ScriptHost for EchoHost {
        fn evaluate(
            &mut self,
            _name: &str,
            source: &str,
            output: &mut Vec<(crate::console::Severity, String)>,
        ) -> Result<(), ScriptError> {
            output.push((crate::console::Severity::Neutral, source.len().to_string()));
            Ok(())
        }
    }

    fn app() -> App {
        app_with_store(Box::new(MemoryStore::new()))
    }

    fn app_with_store(backend: Box<dyn KeyValueStore>) -> App {
        let persistence = Persistence::new(backend);
        let workspace = persistence.load();
        App::new(
            workspace,
            EditorEngine::new(Box::new(PlainHighlighter)),
            persistence,
            Box::new(EchoHost),
            &Config::default(),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn click(app: &mut App, column: u16, row: u16) {
        app.handle_mouse_event(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    fn draw(app: &mut App) -> ratatui::buffer::Buffer {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn symbol_at(buffer: &ratatui::buffer::Buffer, x: u16, y: u16) -> String {
        buffer.content()[buffer.index_of(x, y)].symbol().to_string()
    }

    fn saved_open_ids(store: &SharedStore) -> Vec<String> {
        let raw = store.get(OPEN_IDS_KEY).expect("open ids saved");
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_focus_cycle() {
        assert_eq!(FocusedPane::Explorer.next(), FocusedPane::Editor);
        assert_eq!(FocusedPane::Terminal.next(), FocusedPane::Explorer);
        assert_eq!(FocusedPane::Explorer.prev(), FocusedPane::Terminal);
    }

    #[test]
    fn test_typing_commits_to_active_file() {
        let mut app = app();
        app.handle_key_event(key(KeyCode::Char('X')));
        assert!(app.workspace.active_content().unwrap().starts_with('X'));
    }

    #[test]
    fn test_ctrl_s_logs_confirmation() {
        let mut app = app();
        app.handle_key_event(ctrl('s'));
        let last = app.terminal.entries().last().unwrap();
        assert_eq!(last.message, "Project saved successfully.");
        assert_eq!(last.severity, crate::console::Severity::Emphasis);
    }

    #[test]
    fn test_new_file_prompt_creates_and_activates() {
        let mut app = app();
        app.handle_key_event(ctrl('n'));
        for c in "app.js".chars() {
            app.handle_key_event(key(KeyCode::Char(c)));
        }
        app.handle_key_event(key(KeyCode::Enter));

        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.workspace.active_file().unwrap().name, "app.js");
        assert_eq!(app.workspace.session().open_ids().len(), 4);
        assert_eq!(app.editor.text(), "");
    }

    #[test]
    fn test_empty_prompt_cancels() {
        let mut app = app();
        app.handle_key_event(ctrl('n'));
        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(app.workspace.store().len(), 3);
    }

    #[test]
    fn test_palette_runs_selected_command() {
        let mut app = app();
        app.handle_key_event(key(KeyCode::F(1)));
        for c in "clear".chars() {
            app.handle_key_event(key(KeyCode::Char(c)));
        }
        app.terminal.info("something");
        app.handle_key_event(key(KeyCode::Enter));
        assert!(app.terminal.is_empty());
    }

    #[test]
    fn test_run_markup_opens_preview() {
        let mut app = app();
        app.run_active_file();
        assert!(matches!(app.overlay, Overlay::Preview(_)));
        assert!(app.terminal.is_empty());
        app.handle_key_event(key(KeyCode::Esc));
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn test_run_script_uses_host() {
        let mut app = app();
        app.switch_to(&FileId::from("2"));
        app.handle_key_event(ctrl('r'));
        let messages: Vec<&str> = app
            .terminal
            .entries()
            .iter()
            .map(|e| e.message.as_str())
            .collect();
        assert_eq!(messages[0], "Executing index.js...");
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn test_alt_arrows_cycle_tabs() {
        let mut app = app();
        app.handle_key_event(KeyEvent::new(KeyCode::Left, KeyModifiers::ALT));
        assert_eq!(app.workspace.active_id(), Some(&FileId::from("3")));
        app.handle_key_event(KeyEvent::new(KeyCode::Right, KeyModifiers::ALT));
        assert_eq!(app.workspace.active_id(), Some(&FileId::from("1")));
    }

    #[test]
    fn test_render_and_click_close_glyph() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        let screen: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(screen.contains("Explorer"));
        assert!(screen.contains("index.html"));
        assert!(screen.contains("Ln 1, Col 1"));

        // Close glyph of the first tab: " <> index.html " is 15 columns wide
        let tabs = app.areas.tabs;
        click(&mut app, tabs.x + 15, tabs.y);
        assert!(!app.workspace.session().is_open(&FileId::from("1")));
        assert_eq!(app.workspace.active_id(), Some(&FileId::from("2")));
    }

    #[test]
    fn test_wide_tab_close_glyph_drawn_where_hit() {
        let mut app = app();
        app.create_file("日本語.js");
        let id = app.workspace.active_id().cloned().unwrap();
        let buffer = draw(&mut app);

        let spans = view::layout_tabs(&view::tab_items(&app.workspace));
        let span = spans.iter().find(|s| s.id == id).unwrap();
        let tabs = app.areas.tabs;
        assert_eq!(symbol_at(&buffer, tabs.x + span.close, tabs.y), view::CLOSE_GLYPH);

        // Last column of the name closes nothing
        click(&mut app, tabs.x + span.close - 2, tabs.y);
        assert!(app.workspace.session().is_open(&id));
        click(&mut app, tabs.x + span.close, tabs.y);
        assert!(!app.workspace.session().is_open(&id));
    }

    #[test]
    fn test_wide_explorer_name_keeps_delete_glyph_in_place() {
        let mut app = app();
        app.create_file("日本語のファイル名前テスト.js");
        let id = app.workspace.active_id().cloned().unwrap();
        let buffer = draw(&mut app);

        let list = app.areas.explorer;
        let y = list.y + 3;
        let glyph_x = list.x + list.width - 2;
        assert_eq!(symbol_at(&buffer, glyph_x, y), view::CLOSE_GLYPH);
        assert_eq!(symbol_at(&buffer, list.x + list.width - 1, y), " ");

        // Clicks across the drawn name only select
        for x in list.x + 4..list.x + list.width - 3 {
            click(&mut app, x, y);
            assert!(app.workspace.store().contains(&id), "click at {} deleted", x);
        }
        assert_eq!(app.workspace.active_id(), Some(&id));

        click(&mut app, glyph_x, y);
        assert!(!app.workspace.store().contains(&id));
    }

    #[test]
    fn test_ctrl_shift_p_opens_palette() {
        let mut app = app();
        app.handle_key_event(KeyEvent::new(
            KeyCode::Char('P'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        ));
        assert!(matches!(app.overlay, Overlay::Palette(_)));

        app.handle_key_event(key(KeyCode::Esc));
        app.handle_key_event(KeyEvent::new(
            KeyCode::Char('p'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        ));
        assert!(matches!(app.overlay, Overlay::Palette(_)));
    }

    #[test]
    fn test_plain_ctrl_p_is_not_the_palette() {
        let mut app = app();
        app.handle_key_event(ctrl('p'));
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn test_ctrl_q_saves_typed_text() {
        let store = SharedStore::default();
        let mut app = app_with_store(Box::new(store.clone()));
        app.focused_pane = FocusedPane::Editor;
        app.handle_key_event(key(KeyCode::Char('Z')));
        // Typing alone stays in memory
        assert!(store.get(FILES_KEY).is_none());

        app.handle_key_event(ctrl('q'));
        assert!(app.should_quit);
        let files = store.get(FILES_KEY).expect("files saved on quit");
        let records: Vec<crate::workspace::FileRecord> = serde_json::from_str(&files).unwrap();
        assert!(records[0].content.starts_with('Z'));
    }

    #[test]
    fn test_every_mutation_is_flushed() {
        let store = SharedStore::default();
        let mut app = app_with_store(Box::new(store.clone()));

        app.switch_to(&FileId::from("2"));
        assert_eq!(store.get(ACTIVE_ID_KEY).as_deref(), Some("2"));

        app.close_tab(&FileId::from("2"));
        assert_eq!(store.get(ACTIVE_ID_KEY).as_deref(), Some("1"));
        assert_eq!(saved_open_ids(&store), ["1", "3"]);

        app.delete_file(&FileId::from("3"));
        let files = store.get(FILES_KEY).unwrap();
        assert!(!files.contains("styles.css"));
        assert_eq!(saved_open_ids(&store), ["1"]);

        app.create_file("notes.md");
        let created = app.workspace.active_id().cloned().unwrap();
        assert_eq!(store.get(ACTIVE_ID_KEY).as_deref(), Some(created.as_str()));
        assert!(store.get(FILES_KEY).unwrap().contains("notes.md"));
        assert_eq!(saved_open_ids(&store), ["1", created.as_str()]);
    }

    #[test]
    fn test_run_flushes_before_executing() {
        let store = SharedStore::default();
        let mut app = app_with_store(Box::new(store.clone()));
        app.switch_to(&FileId::from("2"));
        app.focused_pane = FocusedPane::Editor;
        app.handle_key_event(key(KeyCode::Char('Q')));

        app.run_active_file();
        let files = store.get(FILES_KEY).unwrap();
        let records: Vec<crate::workspace::FileRecord> = serde_json::from_str(&files).unwrap();
        assert!(records[1].content.starts_with('Q'));
    }

    #[test]
    fn test_failed_save_logs_error_line() {
        let mut app = app_with_store(Box::new(FullDisk));
        app.handle_key_event(ctrl('s'));

        let last = app.terminal.entries().last().unwrap();
        assert_eq!(last.severity, Severity::Error);
        assert!(last.message.starts_with("Save failed"));
        assert!(last.message.contains("disk full"));
        assert_eq!(app.status_message, "Save failed");
        assert!(!app.should_quit);

        // Mutations keep working without a backend
        app.create_file("a.js");
        assert_eq!(app.workspace.store().len(), 4);
    }
}
