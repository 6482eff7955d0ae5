//! Source code pane rendering with syntax highlighting
//!
//! This module renders the source code pane, which displays the traced
//! program with basic syntax highlighting and execution indicators.
//!
//! # Features
//!
//! - Syntax highlighting for Python keywords, builtins, strings, numbers and comments
//! - Current line highlighting with arrow indicator
//! - Gutter dot on every line executed so far
//! - Scroll state that keeps the current line at a fixed row while stepping
//!
//! # Rendering
//!
//! The pane uses a simple character-by-character tokenizer to apply syntax
//! highlighting styles without requiring a full lexer.

use super::pane_block;
use crate::ui::theme::DEFAULT_THEME;
use crate::view::SourceLine;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Simple syntax highlighting for Python code
fn highlight_source_code(line: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        let (offset, c) = chars[i];

        // Comments run to end of line
        if c == '#' {
            flush_word(&mut spans, &mut current_word, false);
            spans.push(Span::styled(
                line[offset..].to_string(),
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            break;
        }

        // Strings, either quote style
        if c == '"' || c == '\'' {
            flush_word(&mut spans, &mut current_word, false);
            let mut end = i + 1;
            while end < chars.len() && chars[end].1 != c {
                end += if chars[end].1 == '\\' { 2 } else { 1 };
            }
            end = (end + 1).min(chars.len());
            let end_offset = chars.get(end).map_or(line.len(), |(o, _)| *o);
            spans.push(Span::styled(
                line[offset..end_offset].to_string(),
                Style::default().fg(DEFAULT_THEME.string),
            ));
            i = end;
            continue;
        }

        // Delimiters end the current word
        if !c.is_alphanumeric() && c != '_' {
            flush_word(&mut spans, &mut current_word, c == '(');

            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
                ':' | ',' | '.' => Style::default().fg(DEFAULT_THEME.fg),
                '+' | '-' | '*' | '/' | '%' | '=' | '&' | '|' | '!' | '<' | '>' => {
                    Style::default().fg(DEFAULT_THEME.fg)
                }
                _ => Style::default(),
            };

            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    flush_word(&mut spans, &mut current_word, false);
    Line::from(spans)
}

fn flush_word(spans: &mut Vec<Span<'static>>, word: &mut String, is_function: bool) {
    if word.is_empty() {
        return;
    }
    let style = get_keyword_style(word, is_function);
    spans.push(Span::styled(std::mem::take(word), style));
}

fn get_keyword_style(word: &str, is_function: bool) -> Style {
    match word {
        "int" | "str" | "float" | "bool" | "list" | "dict" | "tuple" | "set" | "range"
        | "print" | "len" => Style::default().fg(DEFAULT_THEME.type_name),
        "def" | "return" | "if" | "elif" | "else" | "while" | "for" | "in" | "not" | "and"
        | "or" | "is" | "class" | "import" | "from" | "as" | "pass" | "break" | "continue"
        | "try" | "except" | "finally" | "raise" | "with" | "lambda" | "yield" | "global"
        | "nonlocal" | "del" | "assert" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "True" | "False" | "None" => Style::default().fg(DEFAULT_THEME.number),
        _ if word.chars().all(|c| c.is_ascii_digit()) => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        _ => {
            if is_function {
                Style::default().fg(DEFAULT_THEME.function)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            }
        }
    }
}

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    lines: &[SourceLine],
    current_line: Option<usize>,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let block = pane_block(" Source Code ", is_focused);
    let total_lines = lines.len();

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Borders

    // Start with the current line centered
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Keep the current line at the target row
    if let Some(current) = current_line {
        scroll_state.offset = current.saturating_sub(1).saturating_sub(target_row);
    }
    if total_lines > visible_height {
        scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
    } else {
        scroll_state.offset = 0;
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|line| {
            let (marker, marker_style) = if line.current {
                (
                    "▶",
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                )
            } else if line.executed {
                ("●", Style::default().fg(DEFAULT_THEME.executed_marker))
            } else {
                (" ", Style::default())
            };

            let num_style = if line.current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut content_line = highlight_source_code(&line.text);
            if line.current {
                let current_bg = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content_line.spans {
                    span.style = span.style.patch(current_bg);
                }
            }

            let mut final_spans = vec![
                Span::styled(marker, marker_style),
                Span::styled(format!("{:4} ", line.number), num_style),
            ];
            final_spans.extend(content_line.spans);

            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_highlight_preserves_text() {
        let src = "    print(f\"é = {a}\")  # café";
        assert_eq!(text_of(&highlight_source_code(src)), src);
    }

    #[test]
    fn test_keyword_is_bold() {
        let line = highlight_source_code("def example():");
        assert_eq!(line.spans[0].content, "def");
        assert!(line.spans[0].style.add_modifier.contains(Modifier::BOLD));
    }
}
