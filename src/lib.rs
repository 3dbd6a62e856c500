//! # Introduction
//!
//! Reckon parses integer arithmetic expressions (`+ - * /`, parentheses,
//! the usual precedence, left-associativity) into a syntax tree, prints the
//! tree back out with the source's explicit grouping, and evaluates it.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Parser → Expr → { Printer → text, Evaluator → i64 }
//! ```
//!
//! 1. [`parser`]: character-level recursive descent producing an
//!    [`parser::Expr`] or a [`parser::ParseError`] with position and
//!    expectation.
//! 2. [`parser::ast`]: the tree and its `Display` printer.
//! 3. [`interpreter`]: pure evaluation to `i64`, reporting division by zero
//!    and overflow as [`interpreter::EvalError`].
//! 4. [`session`]: one request end to end ([`session::Evaluation`]), the
//!    bounded [`session::History`], and the line-mode driver
//!    [`session::run_lines`].
//! 5. [`ui`]: ratatui-based interactive front end; not part of the stable
//!    library API.
//!
//! ```
//! use reckon::session::Evaluation;
//!
//! let evaluation = Evaluation::run("(1+2)*3");
//! assert_eq!(evaluation.output_lines(), ["(1 + 2) * 3", "Result: 9"]);
//! ```

pub mod interpreter;
pub mod parser;
pub mod session;
pub mod ui;
