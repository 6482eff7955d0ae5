//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus, tracer requests
//! - **[`panes`]**: render functions for each visible pane (source, variables,
//!   call stack, output, status bar, error popup)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a [`Session`] and a
//! tracer client, then call [`App::run`] to start the event loop.
//!
//! [`Session`]: crate::playback::Session
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
