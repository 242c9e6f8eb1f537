use crate::executor::{ExecutionReport, Outcome};
use nu_ansi_term::{Color, Style};
use std::fmt::Write;

fn outcome_marker(outcome: Outcome) -> (&'static str, Style) {
    match outcome {
        Outcome::Committed => ("✓", Style::new().fg(Color::Green)),
        Outcome::Staged => ("~", Style::new().fg(Color::Yellow)),
        Outcome::Failed => ("✗", Style::new().fg(Color::Red).bold()),
        Outcome::NeverStarted => ("-", Style::new().fg(Color::DarkGray)),
    }
}

fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Committed => "committed",
        Outcome::Staged => "staged",
        Outcome::Failed => "failed",
        Outcome::NeverStarted => "not started",
    }
}

/// Render an execution report, one line per entry.
///
/// Failed runs end with the error and the files that still carry a temporary
/// name, so they can be put back by hand.
pub fn render_report(report: &ExecutionReport, use_color: bool) -> String {
    let mut output = String::new();
    let paint = |style: Style, text: &str| {
        if use_color {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    };

    for entry in &report.entries {
        let (marker, style) = outcome_marker(entry.outcome);
        let marker = paint(style, marker);

        match entry.outcome {
            Outcome::Committed => {
                let final_name = entry.final_name.as_deref().unwrap_or(&entry.current_name);
                if final_name == entry.destination_name {
                    writeln!(output, "{} {} -> {}", marker, entry.old_name, final_name).unwrap();
                } else {
                    writeln!(
                        output,
                        "{} {} -> {} (wanted {}, name was taken)",
                        marker, entry.old_name, final_name, entry.destination_name
                    )
                    .unwrap();
                }
            },
            Outcome::Staged | Outcome::Failed | Outcome::NeverStarted => {
                writeln!(
                    output,
                    "{} {} -> {} [{}, now {}]",
                    marker,
                    entry.old_name,
                    entry.destination_name,
                    outcome_label(entry.outcome),
                    entry.current_name
                )
                .unwrap();
            },
        }
    }

    if report.success {
        writeln!(
            output,
            "{}",
            paint(
                Style::new().fg(Color::Green),
                &format!(
                    "Renamed {} files in {}",
                    report.count(Outcome::Committed),
                    report.target_dir.display()
                )
            )
        )
        .unwrap();
        return output;
    }

    if let Some(ref error) = report.error {
        writeln!(
            output,
            "{} {}",
            paint(Style::new().fg(Color::Red).bold(), "Error:"),
            error
        )
        .unwrap();
    }

    writeln!(
        output,
        "Committed: {}, staged: {}, failed: {}, not started: {}",
        report.count(Outcome::Committed),
        report.count(Outcome::Staged),
        report.count(Outcome::Failed),
        report.count(Outcome::NeverStarted)
    )
    .unwrap();

    if report.has_residual_state() {
        writeln!(
            output,
            "{}",
            paint(
                Style::new().fg(Color::Yellow),
                "These files still have temporary names and need to be renamed by hand:"
            )
        )
        .unwrap();
        for residual in &report.residuals {
            writeln!(output, "  {}", residual.display()).unwrap();
        }
    }

    output
}
