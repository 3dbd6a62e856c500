//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`input`]: Expression input line with syntax highlighting and cursor
//! - [`history`]: Past evaluations with printed form and result or error
//! - [`tree`]: Outline of the selected syntax tree, or its parse diagnostic
//! - [`status`]: Status bar with counters and keybindings
//!
//! Each pane module exports a `render_*` function that takes the frame, its
//! area, and borrowed state. Scroll offsets are passed as `&mut usize` so the
//! renderer can clamp them to the content it actually drew.

pub mod history;
pub mod input;
pub mod status;
pub mod tree;

// Re-export render functions for convenience
pub use history::render_history_pane;
pub use input::render_input_pane;
pub use status::render_status_bar;
pub use tree::render_tree_pane;
