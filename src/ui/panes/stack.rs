//! Call stack pane rendering
//!
//! Shows the frame chain of the current step on one line, followed by one
//! entry per frame from the outermost call down to the innermost. The
//! innermost frame is the one currently executing and is emphasized.

use super::pane_block;
use crate::ui::theme::DEFAULT_THEME;
use crate::view::CallStackView;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Render the call stack pane
pub fn render_stack_pane(
    frame: &mut Frame,
    area: Rect,
    call_stack: &CallStackView,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Call Stack ", is_focused);

    let frames = match call_stack {
        CallStackView::TopLevel => {
            let paragraph = Paragraph::new(call_stack.to_string())
                .block(block)
                .style(Style::default().fg(DEFAULT_THEME.comment))
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        }
        CallStackView::Chain(frames) => frames,
    };

    let mut all_items = vec![
        ListItem::new(Span::styled(
            call_stack.to_string(),
            Style::default().fg(DEFAULT_THEME.muted_function),
        )),
        ListItem::new(""),
    ];

    let innermost = frames.len() - 1;
    for (depth, name) in frames.iter().enumerate() {
        let name_style = if depth == innermost {
            Style::default()
                .fg(DEFAULT_THEME.function)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.muted_function)
        };

        all_items.push(ListItem::new(Line::from(vec![
            Span::styled("▸ ", Style::default().fg(DEFAULT_THEME.secondary)),
            Span::styled(
                format!("Frame {} ", depth),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
            Span::styled("│ ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(format!("{}()", name), name_style),
        ])));
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if all_items.len() > visible_height {
        *scroll_offset = (*scroll_offset).min(all_items.len() - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
