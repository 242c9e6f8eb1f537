use crate::pairing::RenamePlan;
use comfy_table::{Cell, Color, ColumnConstraint, ContentArrangement, Table, Width};
use std::io::{self, IsTerminal};

fn fixed_constraints() -> Vec<ColumnConstraint> {
    vec![
        ColumnConstraint::Absolute(Width::Fixed(6)),  // #
        ColumnConstraint::Absolute(Width::Fixed(50)), // Current name
        ColumnConstraint::Absolute(Width::Fixed(50)), // New name
        ColumnConstraint::Absolute(Width::Fixed(12)), // Status
    ]
}

/// Render plan as a table with optional fixed column widths
pub fn render_table(plan: &RenamePlan, use_color: bool, fixed_table_width: bool) -> String {
    let mut table = Table::new();

    if fixed_table_width || !io::stdout().is_terminal() {
        table.set_content_arrangement(ContentArrangement::Disabled);
        table.set_constraints(fixed_constraints());
    } else {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    }

    // Force styling even in non-TTY environments when colors are explicitly requested
    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new("Current name").fg(Color::Cyan),
            Cell::new("New name").fg(Color::Cyan),
            Cell::new("Status").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["#", "Current name", "New name", "Status"]);
    }

    for (index, entry) in plan.entries.iter().enumerate() {
        let number = (index + 1).to_string();
        let old_name = entry.old_name();
        let (status, status_color) = if entry.is_unchanged() {
            ("unchanged", Color::DarkGrey)
        } else {
            ("ready", Color::Green)
        };

        if use_color {
            table.add_row(vec![
                Cell::new(&number).fg(Color::DarkGrey),
                Cell::new(&old_name),
                Cell::new(format!("→ {}", entry.destination_name)).fg(Color::Magenta),
                Cell::new(status).fg(status_color),
            ]);
        } else {
            table.add_row(vec![
                number,
                old_name,
                format!("→ {}", entry.destination_name),
                status.to_string(),
            ]);
        }
    }

    let totals = format!("{} pairs, {} changes", plan.len(), plan.changes());
    let counts = plan.count_message();

    if use_color {
        table.add_row(vec![
            Cell::new("───").fg(Color::DarkGrey),
            Cell::new("─────────").fg(Color::DarkGrey),
            Cell::new("─────────").fg(Color::DarkGrey),
            Cell::new("─────────").fg(Color::DarkGrey),
        ]);
        let counts_color = if plan.mismatch().is_some() {
            Color::Red
        } else {
            Color::Yellow
        };
        table.add_row(vec![
            Cell::new("TOTALS").fg(Color::Cyan),
            Cell::new(&totals).fg(Color::White),
            Cell::new(&counts).fg(counts_color),
            Cell::new(""),
        ]);
    } else {
        table.add_row(vec!["───", "─────────", "─────────", "─────────"]);
        table.add_row(vec!["TOTALS", totals.as_str(), counts.as_str(), ""]);
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::tests::create_test_plan;

    #[test]
    fn test_render_table_no_color() {
        let plan = create_test_plan();
        let result = render_table(&plan, false, true);

        assert!(result.contains("Current name"));
        assert!(result.contains("IMG_0001.jpg"));
        assert!(result.contains("→ beach.jpg"));
        assert!(result.contains("ready"));
        assert!(result.contains("unchanged"));
        assert!(result.contains("TOTALS"));
        assert!(result.contains("2 pairs, 1 changes"));
        assert!(result.contains("mismatch: target=3, template=2"));
    }

    #[test]
    fn test_render_table_with_color_has_escapes() {
        let plan = create_test_plan();
        let result = render_table(&plan, true, true);
        assert!(result.contains('\u{1b}'));
        assert!(result.contains("beach.jpg"));
    }
}
