// Request handling: one line in, printed tree plus result (or error) out

use crate::interpreter::{evaluate, EvalError};
use crate::parser::ast::Expr;
use crate::parser::{parse, ParseError};
use std::collections::VecDeque;
use std::fmt;
use std::io::{self, BufRead, Write};
use tracing::{debug, info, trace};

/// Oldest evaluations are dropped once the history holds this many entries
pub const MAX_HISTORY_ENTRIES: usize = 256;

/// Why a request produced no value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    Parse(ParseError),
    Eval(EvalError),
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Parse(err) => write!(f, "{}", err),
            Failure::Eval(err) => write!(f, "Evaluation error: {}", err),
        }
    }
}

impl std::error::Error for Failure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Failure::Parse(err) => Some(err),
            Failure::Eval(err) => Some(err),
        }
    }
}

impl From<ParseError> for Failure {
    fn from(err: ParseError) -> Self {
        Failure::Parse(err)
    }
}

impl From<EvalError> for Failure {
    fn from(err: EvalError) -> Self {
        Failure::Eval(err)
    }
}

/// Outcome of a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// The input exactly as submitted
    pub source: String,

    /// Parsed tree; `None` when parsing failed
    pub tree: Option<Expr>,

    pub outcome: Result<i64, Failure>,
}

impl Evaluation {
    /// Parse, print and evaluate `source`.
    pub fn run(source: &str) -> Self {
        trace!(source, "evaluating request");

        let tree = match parse(source) {
            Ok(tree) => tree,
            Err(err) => {
                debug!(source, error = %err, "parse failed");
                return Evaluation {
                    source: source.to_string(),
                    tree: None,
                    outcome: Err(err.into()),
                };
            }
        };

        let outcome = evaluate(&tree).map_err(Failure::from);
        match &outcome {
            Ok(value) => debug!(source, value, "evaluated"),
            Err(err) => debug!(source, error = %err, "evaluation failed"),
        }

        Evaluation {
            source: source.to_string(),
            tree: Some(tree),
            outcome,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The printer's rendering of the tree, if parsing succeeded.
    pub fn printed(&self) -> Option<String> {
        self.tree.as_ref().map(Expr::to_string)
    }

    /// Lines reported for this request.
    ///
    /// Success and evaluation failures print the tree first; a parse failure
    /// is a single line.
    pub fn output_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(2);

        if let Some(printed) = self.printed() {
            lines.push(printed);
        }

        match &self.outcome {
            Ok(value) => lines.push(format!("Result: {}", value)),
            Err(failure) => lines.push(failure.to_string()),
        }

        lines
    }

    /// Caret diagnostic for parse failures.
    pub fn diagnostic(&self) -> Option<String> {
        match &self.outcome {
            Err(Failure::Parse(err)) => Some(err.annotate(&self.source)),
            _ => None,
        }
    }
}

/// Bounded list of past evaluations, oldest first
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Evaluation>,
    limit: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_limit(MAX_HISTORY_ENTRIES)
    }

    pub fn with_limit(limit: usize) -> Self {
        History {
            entries: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    /// Record an evaluation, dropping the oldest one when full.
    pub fn push(&mut self, evaluation: Evaluation) {
        if self.entries.len() == self.limit {
            if let Some(dropped) = self.entries.pop_front() {
                trace!(source = %dropped.source, "history full, dropping oldest entry");
            }
        }
        self.entries.push_back(evaluation);
    }

    pub fn entries(&self) -> impl Iterator<Item = &Evaluation> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Evaluation> {
        self.entries.get(index)
    }

    pub fn last(&self) -> Option<&Evaluation> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn failures(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_success()).count()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

/// Totals for a line-mode run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub requests: usize,
    pub failures: usize,
}

/// Evaluate every non-blank line of `reader`, writing each outcome to `writer`.
///
/// Requests are independent: a failure is reported and the next line is read.
pub fn run_lines<R: BufRead, W: Write>(reader: R, mut writer: W) -> io::Result<RunSummary> {
    let mut summary = RunSummary::default();

    for line in reader.lines() {
        let line = line?;
        let source = line.strip_suffix('\r').unwrap_or(&line);

        if source.trim().is_empty() {
            trace!("skipping blank line");
            continue;
        }

        let evaluation = Evaluation::run(source);
        for output in evaluation.output_lines() {
            writeln!(writer, "{}", output)?;
        }

        summary.requests += 1;
        if !evaluation.is_success() {
            summary.failures += 1;
        }
    }

    writer.flush()?;
    info!(
        requests = summary.requests,
        failures = summary.failures,
        "input exhausted"
    );

    Ok(summary)
}
