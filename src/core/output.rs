//! Unified output formatting utilities for consistent CLI presentation.
//!
//! # Design Principles
//! - **Consistent color scheme**: Red for errors, green for success, blue for headlines
//! - **Standardized spacing**: Blank line before sections and messages
//! - **Progress on stderr**: The progress line never mixes with report output on stdout

use colored::*;
use std::io::{self, BufRead, Write};

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    eprintln!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints a warning
pub fn print_warning(message: &str) {
    println!("{} {}", "!".yellow(), message.yellow());
}

/// Formats and prints a success message with consistent styling
///
/// # Format
/// ```text
///
/// ✓ <message>
/// ```
pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

/// Formats and prints an informational message
pub fn print_info(message: &str) {
    println!("{}", message.white());
}

/// Formats and prints a section headline with a count
///
/// # Format
/// ```text
///
///  Found <count> <title>
/// ```
pub fn print_section_header(count: usize, title: &str) {
    println!(
        "\n {} {} {}",
        "Found".white(),
        count.to_string().blue().bold(),
        title.underline()
    );
}

/// Formats and prints a muted explanatory line
pub fn print_hint(hint: &str) {
    println!("  {}", hint.bright_black());
}

/// Redraw the single progress line on stderr
pub fn print_progress(completed: usize, total: usize, name: &str) {
    let mut stderr = io::stderr();
    let _ = write!(
        stderr,
        "\r\x1b[2K{} {} {}",
        format!("[{completed}/{total}]").blue(),
        "checked".bright_black(),
        name.white()
    );
    let _ = stderr.flush();
}

/// Clear the progress line
pub fn finish_progress() {
    let mut stderr = io::stderr();
    let _ = write!(stderr, "\r\x1b[2K");
    let _ = stderr.flush();
}

/// Ask a question on stdout and read one trimmed answer from stdin.
///
/// Returns `None` once stdin is closed.
pub fn prompt(question: &str) -> io::Result<Option<String>> {
    print!("{} ", question.blue());
    io::stdout().flush()?;
    read_answer(&mut io::stdin().lock())
}

fn read_answer(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Ok(None);
    }
    Ok(Some(answer.trim().to_string()))
}
