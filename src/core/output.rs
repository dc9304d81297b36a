//! Colored output and progress reporting for the bundler
//!
//! Uses owo-colors for terminal colors and indicatif for progress bars.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::Duration;

const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";
const TICK_INTERVAL_MS: u64 = 80;

/// Print an action header (blue, bold)
/// Example: "==> Downloading MCP tools..."
pub fn action(message: &str) {
    println!("{} {}", "==>".blue().bold(), message.bold());
}

/// Print a pipeline step header
/// Example: "Step 3/5: Downloading MCP tools..."
pub fn step(current: usize, total: usize, message: &str) {
    println!(
        "{} {}",
        format!("Step {}/{}:", current, total).cyan().bold(),
        message.bold()
    );
}

/// Print a detail line (dimmed)
/// Example: "  From: https://..."
pub fn detail(message: &str) {
    println!("  {}", message.dimmed());
}

/// Print a success message (green check)
pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

/// Print an info message (cyan)
pub fn info(message: &str) {
    println!("{} {}", "::".cyan(), message);
}

/// Print a warning message (yellow)
pub fn warning(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message.yellow());
}

/// Print the run's terminal failure on standard output (red)
pub fn failure(message: &str) {
    println!("{}", failure_line(message));
}

fn failure_line(message: &str) -> String {
    format!("{} {}", "Error:".red().bold(), message.red())
}

/// Print a skip message (dimmed)
/// Example: "  Skipping run-mcp-client.sh (not found?)"
pub fn skip(message: &str) {
    println!("  {}", message.dimmed());
}

/// Create a spinner for extraction and other indeterminate work
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(SPINNER_CHARS),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(TICK_INTERVAL_MS));
    pb
}

/// Upgrade a spinner to a byte progress bar once the content length is known.
pub fn upgrade_to_bytes(pb: &ProgressBar, total_bytes: u64) {
    pb.set_length(total_bytes);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  {spinner:.cyan} [{bar:30.cyan/dim}] {bytes}/{total_bytes} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("━╸━"),
    );
}
