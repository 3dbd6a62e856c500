// Reckon: integer arithmetic parser, printer and evaluator

use std::env;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::process;
use std::sync::Mutex;

use anyhow::Context;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use reckon::session::{run_lines, Evaluation};
use reckon::ui::App;

/// Log destination while the TUI owns the terminal
const LOG_FILE_ENV: &str = "RECKON_LOG_FILE";

enum Mode {
    /// Evaluate stdin line by line
    Lines,
    /// Evaluate the command-line words as one expression
    Expression(String),
    /// Interactive terminal UI
    Tui,
}

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} [--tui] [expression...]", program_name);
    eprintln!();
    eprintln!("With no arguments, each line of standard input is evaluated.");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  echo '(1+2)*3' | {}    # prints the tree, then Result: 9", program_name);
    eprintln!("  {} 1 + 2 '*' 3        # evaluates the arguments", program_name);
    eprintln!("  {} --tui              # interactive mode", program_name);
    eprintln!();
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=debug) for diagnostics on stderr.");
    eprintln!("In --tui mode, logs go to the file named by {}.", LOG_FILE_ENV);
}

fn parse_args(args: &[String]) -> Mode {
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("reckon");

    let mut tui = false;
    let mut words = Vec::new();

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--tui" => tui = true,
            "-h" | "--help" => {
                print_usage(program_name);
                process::exit(0);
            }
            flag if flag.starts_with("--") => {
                eprintln!("Error: Unknown option '{}'", flag);
                eprintln!();
                print_usage(program_name);
                process::exit(2);
            }
            word => words.push(word),
        }
    }

    match (tui, words.is_empty()) {
        (true, true) => Mode::Tui,
        (true, false) => {
            eprintln!("Error: --tui does not take an expression");
            eprintln!();
            print_usage(program_name);
            process::exit(2);
        }
        (false, true) => Mode::Lines,
        (false, false) => Mode::Expression(words.join(" ")),
    }
}

fn init_logging(tui: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env();

    if !tui {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
        return Ok(());
    }

    // The alternate screen would be corrupted by log lines, so the TUI only
    // logs when a file is given
    if let Ok(path) = env::var(LOG_FILE_ENV) {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open log file '{}'", path))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }

    Ok(())
}

/// Leave the alternate screen and raw mode
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

fn run_tui() -> anyhow::Result<()> {
    // Set up terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let setup = execute!(io::stdout(), EnterAlternateScreen)
        .and_then(|()| Terminal::new(CrosstermBackend::new(io::stdout())));
    let mut terminal = match setup {
        Ok(terminal) => terminal,
        Err(err) => {
            // Report the setup error, not a secondary restore failure
            let _ = restore_terminal();
            return Err(err).context("failed to set up terminal");
        }
    };

    // Create and run app
    let mut app = App::new();
    let res = app.run(&mut terminal);

    // Restore terminal
    restore_terminal()?;
    terminal.show_cursor()?;

    res.context("terminal UI failed")?;
    info!(
        evaluated = app.history.len(),
        failed = app.history.failures(),
        "session finished"
    );

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let mode = parse_args(&args);

    init_logging(matches!(mode, Mode::Tui))?;

    match mode {
        Mode::Tui => run_tui(),
        Mode::Expression(source) => {
            debug!(%source, "evaluating command-line expression");
            let evaluation = Evaluation::run(&source);

            let mut stdout = io::stdout().lock();
            for line in evaluation.output_lines() {
                writeln!(stdout, "{}", line)?;
            }
            stdout.flush()?;

            if !evaluation.is_success() {
                process::exit(1);
            }
            Ok(())
        }
        Mode::Lines => {
            let stdin = io::stdin();
            let summary = run_lines(stdin.lock(), io::stdout().lock())
                .context("failed to process standard input")?;

            if summary.failures > 0 {
                process::exit(1);
            }
            Ok(())
        }
    }
}
