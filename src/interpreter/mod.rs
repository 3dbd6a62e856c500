//! Expression evaluation
//!
//! This module provides the evaluation logic:
//! - [`engine`]: the recursive evaluator
//! - [`errors`]: evaluation error types
//!
//! # Execution Model
//!
//! Evaluation is a single post-order walk of the tree. Grouping nodes are
//! transparent, and each binary node applies a checked integer operation.

pub mod engine;
pub mod errors;
mod ops;

pub use engine::evaluate;
pub use errors::EvalError;
