//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into these layers:
//!
//! - **[`app`]**: application state, key and mouse event loop, pane focus, overlays
//! - **[`view`]**: explorer/tab view models and click hit-testing
//! - **[`palette`]**: command palette and prompt state
//! - **[`panes`]**: stateless render functions for each visible pane
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a loaded
//! [`Workspace`] and call [`App::run`] to start the event loop.
//!
//! [`Workspace`]: crate::workspace::Workspace
//! [`App::run`]: app::App::run

pub mod app;
pub mod palette;
pub mod panes;
pub mod theme;
pub mod view;

pub use app::{App, FocusedPane};
