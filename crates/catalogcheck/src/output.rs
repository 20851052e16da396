use colored::{ColoredString, Colorize};

use catalogcheck_core::render::{render_lines, Line, Tone};
use catalogcheck_core::report::Report;

use crate::prelude::{eprintln, println, *};

/// How the finished report is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Coloured report with progress narration.
    Text,
    /// The report document only, as pretty JSON.
    Json,
}

pub fn paint(line: &Line) -> ColoredString {
    let text = line.text.as_str();
    match line.tone {
        Tone::Rule => text.yellow(),
        Tone::Heading => text.yellow().bold(),
        Tone::Info => text.cyan(),
        Tone::Count => text.blue(),
        Tone::Failure => text.red(),
        Tone::Emphasis => text.red().bold(),
        Tone::Expected => text.green(),
        Tone::Success => text.green(),
        Tone::Plain => text.normal(),
    }
}

pub fn print_report(report: &Report, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for line in render_lines(report) {
                println!("{}", paint(&line));
            }
        }
        OutputFormat::Json => {
            let json = report
                .to_json_pretty()
                .context("Failed to serialize report")?;
            println!("{}", json);
        }
    }

    Ok(())
}

pub fn banner(title: &str) {
    println!("{}", title.cyan().bold());
    println!("{}", "=".repeat(50).cyan());
}

pub fn step(message: &str) {
    println!("{}", message.cyan());
}

pub fn note(message: &str) {
    println!("{}", message.blue());
}

pub fn passed(message: &str) {
    println!("{}", message.green());
}

pub fn failed(message: &str) {
    println!("{}", message.red());
}

pub fn outcome(ok: bool) {
    if ok {
        println!("\n{}", "All tests completed successfully!".green().bold());
    } else {
        println!(
            "\n{}",
            "Tests completed with critical issues found!".red().bold()
        );
    }
}

/// Persistence problems go to stderr so `--json` output stays parseable.
pub fn persistence_failed(error: &Error) {
    eprintln!("{}", format!("Error saving report: {error}").red());
}

pub fn unexpected(error: &color_eyre::eyre::Report) {
    eprintln!("\n{}", format!("Unexpected error: {error:#}").red().bold());
}
