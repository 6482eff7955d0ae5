//! Variables pane rendering

use super::pane_block;
use crate::ui::theme::DEFAULT_THEME;
use crate::view::VariablesView;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

/// Render the variables of the current step as `name = value` rows
pub fn render_variables_pane(
    frame: &mut Frame,
    area: Rect,
    variables: &VariablesView,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Variables ", is_focused);

    let bindings = match variables {
        VariablesView::Empty => {
            let paragraph = Paragraph::new(variables.lines().join("\n"))
                .block(block)
                .style(Style::default().fg(DEFAULT_THEME.comment));
            frame.render_widget(paragraph, area);
            return;
        }
        VariablesView::Bindings(bindings) => bindings,
    };

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if bindings.len() > visible_height {
        *scroll_offset = (*scroll_offset).min(bindings.len() - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let items: Vec<ListItem> = bindings
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|binding| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    binding.name.clone(),
                    Style::default()
                        .fg(DEFAULT_THEME.fg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" = ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(
                    binding.value.clone(),
                    Style::default().fg(DEFAULT_THEME.number),
                ),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
