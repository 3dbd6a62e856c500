//! Evaluation history pane rendering

use crate::session::{Evaluation, History};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

fn entry_lines(evaluation: &Evaluation, is_selected: bool) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled("› ", Style::default().fg(DEFAULT_THEME.primary)),
        Span::styled(
            evaluation.source.clone(),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
    ])];

    if let Some(printed) = evaluation.printed() {
        lines.push(Line::styled(
            format!("  {}", printed),
            Style::default().fg(DEFAULT_THEME.fg),
        ));
    }

    match &evaluation.outcome {
        Ok(value) => lines.push(Line::styled(
            format!("  = {}", value),
            Style::default()
                .fg(DEFAULT_THEME.success)
                .add_modifier(Modifier::BOLD),
        )),
        Err(failure) => lines.push(Line::styled(
            format!("  {}", failure),
            Style::default().fg(DEFAULT_THEME.error),
        )),
    }

    if is_selected {
        lines = lines
            .into_iter()
            .map(|line| line.style(Style::default().bg(DEFAULT_THEME.current_line_bg)))
            .collect();
    }

    lines
}

/// All lines of the history, oldest entry first.
pub fn history_lines(history: &History, selected: Option<usize>) -> Vec<Line<'static>> {
    history
        .entries()
        .enumerate()
        .flat_map(|(i, evaluation)| entry_lines(evaluation, selected == Some(i)))
        .collect()
}

/// Render the history pane.
///
/// `scroll_offset` is measured in lines; `usize::MAX` pins the view to the
/// newest entry.
pub fn render_history_pane(
    frame: &mut Frame,
    area: Rect,
    history: &History,
    selected: Option<usize>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" History ")
        .borders(Borders::ALL)
        .border_style(border_style);

    if history.is_empty() {
        let paragraph = Paragraph::new("(type an expression and press Enter)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let lines = history_lines(history, selected);

    // Clamp scroll offset only if content exceeds visible area
    let total_lines = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if total_lines > visible_height {
        let max_scroll = total_lines - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((u16::try_from(*scroll_offset).unwrap_or(u16::MAX), 0));
    frame.render_widget(paragraph, area);
}
