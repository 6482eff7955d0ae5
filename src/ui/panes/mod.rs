//! TUI pane rendering modules
//!
//! Each pane draws one view of the current [`Projection`](crate::view::Projection).
//! Panes hold no playback state of their own; the only thing they keep between
//! frames is a scroll offset owned by the app.
//!
//! # Pane Modules
//!
//! - [`source`]: Source code with syntax highlighting, current line and executed-line markers
//! - [`variables`]: `name = value` bindings of the current step
//! - [`stack`]: Call chain of the current step
//! - [`terminal`]: Cumulative program output
//! - [`status`]: Status bar with step counter, keybindings and playback state
//! - [`popup`]: Error popup for failed loads

pub mod popup;
pub mod source;
pub mod stack;
pub mod status;
pub mod terminal;
pub mod variables;

// Re-export render functions for convenience
pub use popup::render_error_popup;
pub use source::{render_source_pane, SourceScrollState};
pub use stack::render_stack_pane;
pub use status::{render_status_bar, StatusRenderData};
pub use terminal::render_terminal_pane;
pub use variables::render_variables_pane;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered block with the focus highlight shared by all panes
pub(crate) fn pane_block(title: &'static str, is_focused: bool) -> Block<'static> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}
