use crate::pairing::RenamePlan;
use std::fmt::Write;

/// Render plan as a plain line-oriented summary
pub fn render_summary(plan: &RenamePlan) -> String {
    let mut output = String::new();

    writeln!(output, "[PLAN SUMMARY]").unwrap();
    writeln!(output, "Plan: {}", plan.id).unwrap();
    writeln!(output, "Target: {}", plan.target_dir.display()).unwrap();
    writeln!(output, "Template: {}", plan.template_dir.display()).unwrap();
    writeln!(output, "Counts: {}", plan.count_message()).unwrap();
    writeln!(output, "Pairs: {}", plan.len()).unwrap();
    writeln!(output, "Changes: {}", plan.changes()).unwrap();

    if !plan.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "[PAIRS]").unwrap();
        for entry in &plan.entries {
            writeln!(output, "{} -> {}", entry.old_name(), entry.destination_name).unwrap();
        }
    }

    output
}
