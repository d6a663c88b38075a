//! Output formatting for the simulator.

use console::style;

/// Output handler for simulator messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a step in a process.
    pub fn step(&self, num: usize, total: usize, msg: &str) {
        println!("{} {}", style(format!("[{}/{}]", num, total)).dim(), msg);
    }

    /// Print a key/value line.
    pub fn kv(&self, key: &str, value: &str) {
        println!("  {} {}", style(format!("{}:", key)).cyan(), value);
    }
}
