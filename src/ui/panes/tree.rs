//! Syntax tree pane
//!
//! Shows the selected evaluation's tree as an outline:
//!
//! ```text
//! Mul
//! ├─ Grouped
//! │  └─ Add
//! │     ├─ Integer 1
//! │     └─ Integer 2
//! └─ Integer 3
//! ```
//!
//! When the selected request failed to parse, the caret diagnostic is shown
//! instead.

use crate::parser::ast::Expr;
use crate::session::{Evaluation, Failure};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

/// Most outline rows built for one tree. Guides widen with depth, so a
/// large tree would otherwise cost quadratic memory on every frame.
pub const MAX_OUTLINE_ROWS: usize = 500;

/// One line of the outline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineRow {
    /// Box-drawing guides in front of the label
    pub guide: String,
    pub label: String,
    pub is_leaf: bool,
}

/// Flatten a tree into outline rows, parents before children.
///
/// Stops after [`MAX_OUTLINE_ROWS`] rows.
pub fn outline_rows(expr: &Expr) -> Vec<OutlineRow> {
    let mut rows = Vec::with_capacity(expr.node_count().min(MAX_OUTLINE_ROWS));
    push_rows(expr, String::new(), "", "", &mut rows);
    rows
}

fn push_rows(
    expr: &Expr,
    prefix: String,
    connector: &str,
    child_indent: &str,
    rows: &mut Vec<OutlineRow>,
) {
    if rows.len() >= MAX_OUTLINE_ROWS {
        return;
    }

    let (label, children): (String, Vec<&Expr>) = match expr {
        Expr::Integer(value) => (format!("Integer {}", value), vec![]),
        Expr::BinaryOp { op, left, right } => {
            (op.name().to_string(), vec![left.as_ref(), right.as_ref()])
        }
        Expr::Grouped(inner) => ("Grouped".to_string(), vec![inner.as_ref()]),
    };

    rows.push(OutlineRow {
        guide: format!("{}{}", prefix, connector),
        label,
        is_leaf: children.is_empty(),
    });

    let child_prefix = format!("{}{}", prefix, child_indent);
    let last = children.len().saturating_sub(1);
    for (i, child) in children.into_iter().enumerate() {
        if i == last {
            push_rows(child, child_prefix.clone(), "└─ ", "   ", rows);
        } else {
            push_rows(child, child_prefix.clone(), "├─ ", "│  ", rows);
        }
    }
}

fn outline_lines(expr: &Expr) -> Vec<Line<'static>> {
    outline_rows(expr)
        .into_iter()
        .map(|row| {
            let label_style = if row.is_leaf {
                Style::default().fg(DEFAULT_THEME.number)
            } else {
                Style::default()
                    .fg(DEFAULT_THEME.node_name)
                    .add_modifier(Modifier::BOLD)
            };
            Line::from(vec![
                Span::styled(row.guide, Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(row.label, label_style),
            ])
        })
        .collect()
}

/// Build every line the pane shows for `evaluation`.
pub fn tree_pane_lines(evaluation: Option<&Evaluation>) -> Vec<Line<'static>> {
    let Some(evaluation) = evaluation else {
        return vec![Line::styled(
            "(no expression yet)",
            Style::default().fg(DEFAULT_THEME.comment),
        )];
    };

    let error_style = Style::default().fg(DEFAULT_THEME.error);
    let mut lines = Vec::new();

    match (&evaluation.tree, &evaluation.outcome) {
        (Some(tree), outcome) => {
            let node_count = tree.node_count();
            lines.extend(outline_lines(tree));
            if node_count > MAX_OUTLINE_ROWS {
                lines.push(Line::styled(
                    format!("… {} more nodes", node_count - MAX_OUTLINE_ROWS),
                    Style::default().fg(DEFAULT_THEME.comment),
                ));
            }
            lines.push(Line::default());
            lines.push(Line::styled(
                format!("{} nodes, depth {}", node_count, tree.depth()),
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            if let Err(failure) = outcome {
                lines.push(Line::styled(failure.to_string(), error_style));
            }
        }
        (None, Err(failure @ Failure::Parse(_))) => {
            if let Some(diagnostic) = evaluation.diagnostic() {
                for text in diagnostic.lines() {
                    lines.push(Line::styled(text.to_string(), error_style));
                }
            }
            lines.push(Line::default());
            lines.push(Line::styled(failure.to_string(), error_style));
        }
        (None, _) => {}
    }

    lines
}

/// Render the tree pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    evaluation: Option<&Evaluation>,
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

    let title = match evaluation {
        Some(e) if e.tree.is_some() => " Syntax Tree ",
        Some(_) => " Diagnostic ",
        None => " Syntax Tree ",
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
        .padding(Padding::new(1, 0, 0, 0));

    let lines = tree_pane_lines(evaluation);

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let max_scroll = lines.len().saturating_sub(visible_height);
    *scroll_offset = (*scroll_offset).min(max_scroll);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((u16::try_from(*scroll_offset).unwrap_or(u16::MAX), 0));
    frame.render_widget(paragraph, area);
}
