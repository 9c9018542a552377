use owo_colors::OwoColorize;

use crate::fs_ops::Outcome;

/// Small wrapper around stdout/stderr printing to provide consistent, colored
/// user-facing messages. Colors are enabled only when output is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        println!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        println!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Print the status line for an outcome with the prefix matching its class.
/// Refusals go to stdout: they are expected results, not errors.
pub fn print_outcome(outcome: &Outcome) {
    let line = outcome.to_string();
    match outcome {
        Outcome::Completed(_) => print_success(&line),
        Outcome::Skipped { .. } => print_warn(&line),
        Outcome::DryRun(_) => print_info(&line),
        Outcome::Failed { .. } => print_error(&line),
    }
}
