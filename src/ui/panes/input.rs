//! Expression input line with syntax highlighting

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Color each character of an expression by its role.
///
/// Characters that cannot appear in a valid expression are shown in the
/// error color so mistakes stand out before submitting.
pub fn highlight_expression(text: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut start = 0;

    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let style = style_for(c);

        // Extend the span over characters sharing the same style
        let mut end = i + c.len_utf8();
        while let Some(&(j, next)) = chars.peek() {
            if style_for(next) != style {
                break;
            }
            end = j + next.len_utf8();
            chars.next();
        }

        spans.push(Span::styled(&text[start..end], style));
        start = end;
    }

    Line::from(spans)
}

fn style_for(c: char) -> Style {
    match c {
        '0'..='9' => Style::default().fg(DEFAULT_THEME.number),
        '+' | '-' | '*' | '/' => Style::default()
            .fg(DEFAULT_THEME.operator)
            .add_modifier(Modifier::BOLD),
        '(' | ')' => Style::default().fg(DEFAULT_THEME.paren),
        c if c.is_whitespace() => Style::default().fg(DEFAULT_THEME.fg),
        _ => Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::UNDERLINED),
    }
}

/// Render the input pane and place the terminal cursor at `cursor` (a char index).
pub fn render_input_pane(frame: &mut Frame, area: Rect, input: &str, cursor: usize) {
    let block = Block::default()
        .title(" Expression ")
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        );

    // Keep the cursor visible on narrow terminals by scrolling horizontally
    let inner_width = area.width.saturating_sub(2).max(1) as usize;
    let scroll = cursor.saturating_sub(inner_width - 1);

    let paragraph = Paragraph::new(highlight_expression(input))
        .block(block)
        .scroll((0, u16::try_from(scroll).unwrap_or(u16::MAX)));
    frame.render_widget(paragraph, area);

    let x = area.x + 1 + (cursor - scroll) as u16;
    frame.set_cursor_position((x, area.y + 1));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_groups_runs() {
        let line = highlight_expression("12 + (3)");
        let pieces: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();

        assert_eq!(pieces, vec!["12", " ", "+", " ", "(", "3", ")"]);
    }

    #[test]
    fn test_highlight_marks_invalid_characters() {
        let line = highlight_expression("1+x");

        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[2].style.fg, Some(DEFAULT_THEME.error));
    }

    #[test]
    fn test_highlight_empty() {
        assert!(highlight_expression("").spans.is_empty());
    }
}
