//! Human-readable rendering of a report.
//!
//! Rendering produces tagged lines instead of coloured text so that the
//! layout stays deterministic and testable; the shell decides how each
//! [`Tone`] looks on a terminal.

use crate::defect::{Defect, ProductDefectGroup, TransportDefect};
use crate::product::text_of;
use crate::report::Report;

/// Width of the `=` and `-` separator rules.
pub const RULE_WIDTH: usize = 80;

/// Visual role of a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Rule,
    Heading,
    Info,
    Count,
    Failure,
    Emphasis,
    Expected,
    Success,
    Plain,
}

/// One line of rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub tone: Tone,
    pub text: String,
}

impl Line {
    fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }

    fn blank() -> Self {
        Self::new(Tone::Plain, "")
    }
}

/// Renders the report into tagged lines.
pub fn render_lines(report: &Report) -> Vec<Line> {
    let info = &report.test_info;
    let mut lines = vec![
        Line::blank(),
        Line::new(Tone::Rule, "=".repeat(RULE_WIDTH)),
        Line::new(Tone::Heading, "API TESTING REPORT"),
        Line::new(Tone::Rule, "=".repeat(RULE_WIDTH)),
        Line::new(Tone::Info, format!("Test Date: {}", info.date)),
        Line::new(Tone::Info, format!("API Endpoint: {}", info.endpoint)),
        Line::new(
            Tone::Count,
            format!("Total Products: {}", info.total_products),
        ),
        Line::new(
            Tone::Failure,
            format!("Products with Defects: {}", info.products_with_defects),
        ),
        Line::new(
            Tone::Success,
            format!(
                "Products without Defects: {}",
                report.products_without_defects()
            ),
        ),
    ];

    if report.defects.is_empty() {
        lines.push(Line::blank());
        lines.push(Line::new(
            Tone::Success,
            "NO DEFECTS FOUND - All products passed validation!",
        ));
    } else {
        lines.push(Line::blank());
        lines.push(Line::new(Tone::Emphasis, "DEFECTS FOUND:"));
        lines.push(Line::new(Tone::Failure, "-".repeat(RULE_WIDTH)));

        for (index, defect) in report.defects.iter().enumerate() {
            lines.push(Line::blank());
            match defect {
                Defect::Product(group) => push_group(&mut lines, index + 1, group),
                Defect::Transport(transport) => push_transport(&mut lines, index + 1, transport),
            }
        }
    }

    lines.push(Line::blank());
    lines.push(Line::new(Tone::Rule, "=".repeat(RULE_WIDTH)));
    lines
}

fn push_group(lines: &mut Vec<Line>, number: usize, group: &ProductDefectGroup) {
    lines.push(Line::new(
        Tone::Heading,
        format!("{number}. Product ID: {}", text_of(&group.product_id)),
    ));
    lines.push(Line::new(
        Tone::Plain,
        format!("   Title: {}", group.product_title),
    ));
    lines.push(Line::new(Tone::Failure, "   Issues:"));

    for defect in &group.defects {
        lines.push(Line::new(
            Tone::Failure,
            format!("     • {}: {}", defect.field, defect.issue),
        ));
        lines.push(Line::new(
            Tone::Expected,
            format!("       Expected: {}", defect.expected),
        ));
        lines.push(Line::new(
            Tone::Failure,
            format!("       Actual: {}", text_of(&defect.actual)),
        ));
    }
}

fn push_transport(lines: &mut Vec<Line>, number: usize, defect: &TransportDefect) {
    lines.push(Line::new(
        Tone::Failure,
        format!("{number}. {}: {}", defect.kind, defect.description),
    ));
    lines.push(Line::new(
        Tone::Emphasis,
        format!("   Severity: {}", defect.severity),
    ));
}

/// Renders the report as plain text, one line per rendered line.
pub fn render(report: &Report) -> String {
    render_lines(report)
        .into_iter()
        .map(|line| line.text)
        .collect::<Vec<_>>()
        .join("\n")
}
