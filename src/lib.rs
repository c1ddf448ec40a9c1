//! # Introduction
//!
//! YSCode is a multi-file code editor for the terminal: a file explorer, a
//! tab bar, a syntax-highlighted editor and a terminal panel, built with
//! [ratatui](https://docs.rs/ratatui). Script files run in an embedded
//! QuickJS runtime; other files open in a rendered preview. The whole
//! session (files, open tabs, active file) is persisted between runs.
//!
//! ## Data flow
//!
//! ```text
//! Key/mouse event → App → Workspace (files + session) → Editor / Terminal → panes
//!                               ↕
//!                          Persistence → key-value store (JSON file)
//! ```
//!
//! 1. [`workspace`]: the file store and the open-tab session, owned by one
//!    [`workspace::Workspace`] that enforces the tab invariants.
//! 2. [`editor`]: the editing engine: cursor, selection, gutter, the cached
//!    highlight overlay and the scroll state keeping them aligned.
//! 3. [`highlight`]: the highlighter seam, backed by syntect.
//! 4. [`console`]: the timestamped terminal/log panel.
//! 5. [`runner`]: the run action and the QuickJS script host.
//! 6. [`preview`]: plain-text rendering of markup and markdown files.
//! 7. [`storage`]: saving and restoring the workspace through a key-value store.
//! 8. [`config`] and [`logging`]: settings and the tracing subscriber.
//! 9. [`ui`]: ratatui-based TUI; not part of the stable library API.

pub mod config;
pub mod console;
pub mod editor;
pub mod highlight;
pub mod logging;
pub mod preview;
pub mod runner;
pub mod storage;
pub mod ui;
pub mod workspace;
