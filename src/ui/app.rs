//! Main TUI application state and logic

use crate::session::{Evaluation, History};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use tracing::debug;

/// Lines moved by one PageUp/PageDown press
const PAGE_SCROLL_LINES: usize = 5;

/// Which scrollable pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    History,
    Tree,
}

impl FocusedPane {
    /// Move focus to the other pane
    pub fn next(self) -> Self {
        match self {
            FocusedPane::History => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::History,
        }
    }
}

/// The main application state
pub struct App {
    /// Past evaluations, oldest first
    pub history: History,

    /// Text being edited
    pub input: String,

    /// Cursor position in `input`, in characters
    pub cursor: usize,

    /// History entry recalled with Up/Down; its tree is shown in the tree pane.
    /// `None` means the input is fresh and the newest entry is shown.
    pub recalled: Option<usize>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub history_scroll: usize,
    pub tree_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    pub fn new() -> Self {
        Self::with_history(History::new())
    }

    pub fn with_history(history: History) -> Self {
        App {
            history,
            input: String::new(),
            cursor: 0,
            recalled: None,
            focused_pane: FocusedPane::History,
            history_scroll: usize::MAX,
            tree_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }

        Ok(())
    }

    /// The evaluation whose tree is on display
    pub fn shown_evaluation(&self) -> Option<&Evaluation> {
        shown_evaluation(&self.history, self.recalled)
    }

    /// Render the UI
    pub(crate) fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Input line on top, panes in the middle, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[1]);

        super::panes::render_input_pane(frame, main_chunks[0], &self.input, self.cursor);

        super::panes::render_history_pane(
            frame,
            columns[0],
            &self.history,
            self.recalled,
            self.focused_pane == FocusedPane::History,
            &mut self.history_scroll,
        );

        super::panes::render_tree_pane(
            frame,
            columns[1],
            shown_evaluation(&self.history, self.recalled),
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        let last_failed = self.history.last().is_some_and(|e| !e.is_success());
        super::panes::render_status_bar(
            frame,
            main_chunks[2],
            &self.status_message,
            self.history.len(),
            self.history.failures(),
            last_failed,
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('c') | KeyCode::Char('d') = key.code {
                self.should_quit = true;
            }
            return;
        }

        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Char(c) => {
                let at = self.byte_index(self.cursor);
                self.input.insert(at, c);
                self.cursor += 1;
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index(self.cursor);
                    self.input.remove(at);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.input_len() {
                    let at = self.byte_index(self.cursor);
                    self.input.remove(at);
                }
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.input_len());
            }
            KeyCode::Home => {
                self.cursor = 0;
            }
            KeyCode::End => {
                self.cursor = self.input_len();
            }
            KeyCode::Up => self.recall_older(),
            KeyCode::Down => self.recall_newer(),
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::PageUp => match self.focused_pane {
                FocusedPane::History => {
                    self.history_scroll = self.history_scroll.saturating_sub(PAGE_SCROLL_LINES);
                }
                FocusedPane::Tree => {
                    self.tree_scroll = self.tree_scroll.saturating_sub(PAGE_SCROLL_LINES);
                }
            },
            KeyCode::PageDown => match self.focused_pane {
                FocusedPane::History => {
                    self.history_scroll = self.history_scroll.saturating_add(PAGE_SCROLL_LINES);
                }
                FocusedPane::Tree => {
                    self.tree_scroll = self.tree_scroll.saturating_add(PAGE_SCROLL_LINES);
                }
            },
            _ => {}
        }
    }

    /// Evaluate the input line and record it
    fn submit(&mut self) {
        if self.input.trim().is_empty() {
            self.status_message = "Nothing to evaluate".to_string();
            return;
        }

        let evaluation = Evaluation::run(&self.input);
        self.status_message = match &evaluation.outcome {
            Ok(value) => format!("Result: {}", value),
            Err(failure) => failure.to_string(),
        };
        debug!(source = %evaluation.source, success = evaluation.is_success(), "submitted");

        self.history.push(evaluation);
        self.input.clear();
        self.cursor = 0;
        self.recalled = None;
        // Auto-scroll history to bottom
        self.history_scroll = usize::MAX;
        self.tree_scroll = 0;
    }

    /// Step back through earlier inputs
    fn recall_older(&mut self) {
        if self.history.is_empty() {
            return;
        }

        let index = match self.recalled {
            Some(0) => 0,
            Some(index) => index - 1,
            None => self.history.len() - 1,
        };
        self.recall(Some(index));
    }

    /// Step forward; moving past the newest entry clears the input
    fn recall_newer(&mut self) {
        match self.recalled {
            Some(index) if index + 1 < self.history.len() => self.recall(Some(index + 1)),
            Some(_) => self.recall(None),
            None => {}
        }
    }

    fn recall(&mut self, index: Option<usize>) {
        self.recalled = index;
        self.input = index
            .and_then(|i| self.history.get(i))
            .map(|e| e.source.clone())
            .unwrap_or_default();
        self.cursor = self.input_len();
        self.tree_scroll = 0;
    }

    fn input_len(&self) -> usize {
        self.input.chars().count()
    }

    /// Byte offset of the `char_index`-th character of the input
    fn byte_index(&self, char_index: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }
}

/// The recalled entry, or the newest one when nothing is recalled
fn shown_evaluation(history: &History, recalled: Option<usize>) -> Option<&Evaluation> {
    match recalled {
        Some(index) => history.get(index),
        None => history.last(),
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn screen_text(app: &mut App) -> String {
        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_submit_records_evaluation() {
        let mut app = App::new();
        type_text(&mut app, "(1+2)*3");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.history.len(), 1);
        assert!(app.input.is_empty());
        assert_eq!(app.cursor, 0);
        assert_eq!(app.status_message, "Result: 9");
    }

    #[test]
    fn test_blank_input_is_not_submitted() {
        let mut app = App::new();
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);

        assert!(app.history.is_empty());
        assert_eq!(app.status_message, "Nothing to evaluate");
    }

    #[test]
    fn test_editing_in_the_middle() {
        let mut app = App::new();
        type_text(&mut app, "13");
        press(&mut app, KeyCode::Left);
        type_text(&mut app, "+");
        assert_eq!(app.input, "1+3");

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.input, "13");
        assert_eq!(app.cursor, 1);

        press(&mut app, KeyCode::Delete);
        assert_eq!(app.input, "1");

        press(&mut app, KeyCode::Home);
        type_text(&mut app, "2");
        assert_eq!(app.input, "21");
    }

    #[test]
    fn test_recall_walks_history() {
        let mut app = App::new();
        for source in ["1", "2", "3"] {
            type_text(&mut app, source);
            press(&mut app, KeyCode::Enter);
        }

        press(&mut app, KeyCode::Up);
        assert_eq!(app.input, "3");
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.input, "1");
        assert_eq!(app.recalled, Some(0));

        press(&mut app, KeyCode::Down);
        assert_eq!(app.input, "2");
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.input, "");
        assert_eq!(app.recalled, None);
    }

    #[test]
    fn test_recalled_entry_is_shown() {
        let mut app = App::new();
        for source in ["1+1", "2*2"] {
            type_text(&mut app, source);
            press(&mut app, KeyCode::Enter);
        }

        assert_eq!(app.shown_evaluation().map(|e| e.source.as_str()), Some("2*2"));
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.shown_evaluation().map(|e| e.source.as_str()), Some("1+1"));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);

        let mut app = App::new();
        app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_tab_switches_focus() {
        let mut app = App::new();
        assert_eq!(app.focused_pane, FocusedPane::History);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Tree);
    }

    #[test]
    fn test_render_shows_result_and_tree() {
        let mut app = App::new();
        type_text(&mut app, "(1+2)*3");
        press(&mut app, KeyCode::Enter);

        let screen = screen_text(&mut app);
        assert!(screen.contains("(1 + 2) * 3"));
        assert!(screen.contains("= 9"));
        assert!(screen.contains("Grouped"));
        assert!(screen.contains("1 evaluated, 0 failed"));
    }

    #[test]
    fn test_render_shows_diagnostic() {
        let mut app = App::new();
        type_text(&mut app, "1+");
        press(&mut app, KeyCode::Enter);

        let screen = screen_text(&mut app);
        assert!(screen.contains("Diagnostic"));
        assert!(screen.contains("1 evaluated, 1 failed"));
    }
}
