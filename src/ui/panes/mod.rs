//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`explorer`]: File list with icons, active marker and delete glyphs
//! - [`tabs`]: Tab bar of open files
//! - [`editor`]: Gutter plus highlighted text, selection and cursor
//! - [`terminal`]: Timestamped log lines colored by severity
//! - [`status`]: Status bar with language, cursor position and keybindings
//! - [`overlay`]: Command palette, name prompt and preview popups
//!
//! Each module exports stateless `render_*` functions; anything a pane needs
//! to remember between frames (scroll offsets, hit areas) is passed in or
//! returned to the [`App`](crate::ui::App).

pub mod editor;
pub mod explorer;
pub mod overlay;
pub mod status;
pub mod tabs;
pub mod terminal;

// Re-export render functions for convenience
pub use editor::render_editor_pane;
pub use explorer::render_explorer_pane;
pub use overlay::{render_palette, render_preview, render_prompt};
pub use status::{render_status_bar, StatusRenderData};
pub use tabs::render_tab_bar;
pub use terminal::render_terminal_pane;
