//! # Introduction
//!
//! stepscope replays a recorded program execution one step at a time.  A
//! tracing service runs the submitted program and returns a snapshot of the
//! current line, local variables, call stack and output for every step; this
//! crate owns the position within that sequence and keeps every view in sync
//! with it through a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Source file → Tracer client → Steps → Session → Projection → TUI
//! ```
//!
//! 1. [`source`]: reads and validates the program text.
//! 2. [`client`]: submits it to the tracing service (or reads a recorded
//!    response) and decodes the steps.
//! 3. [`trace`]: the immutable step sequence paired with its source.
//! 4. [`playback`]: cursor, autoplay scheduler and the [`playback::Session`]
//!    state machine; the only code that moves the cursor.
//! 5. [`view`]: pure projections of `(trace, cursor)` into the source,
//!    variables, call stack and output views.
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.

pub mod client;
pub mod config;
pub mod errors;
pub mod playback;
pub mod source;
pub mod trace;
pub mod ui;
pub mod view;
