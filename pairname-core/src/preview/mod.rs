mod report;
mod summary;
mod table;

pub use report::render_report;
pub use summary::render_summary;
pub use table::render_table;

use crate::pairing::RenamePlan;
use anyhow::Result;
use std::io::{self, IsTerminal, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    Table,
    Summary,
    Json,
    None,
}

impl std::str::FromStr for Preview {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "summary" => Ok(Self::Summary),
            "json" => Ok(Self::Json),
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid preview format: {}", s)),
        }
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color_with_detector<F>(use_color: Option<bool>, is_terminal: F) -> bool
where
    F: Fn() -> bool,
{
    match use_color {
        Some(explicit_color) => explicit_color,
        None => is_terminal(),
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color(use_color: Option<bool>) -> bool {
    should_use_color_with_detector(use_color, || io::stdout().is_terminal())
}

/// Render the plan in the specified format
pub fn render_plan(plan: &RenamePlan, format: Preview, use_color: Option<bool>) -> String {
    render_plan_with_fixed_width(plan, format, use_color, false)
}

pub fn render_plan_with_fixed_width(
    plan: &RenamePlan,
    format: Preview,
    use_color: Option<bool>,
    fixed_width: bool,
) -> String {
    let use_color = should_use_color(use_color);

    match format {
        Preview::Table => render_table(plan, use_color, fixed_width),
        Preview::Summary => render_summary(plan),
        Preview::Json => serde_json::to_string_pretty(plan).unwrap_or_default(),
        Preview::None => String::new(),
    }
}

/// Write plan preview to stdout
pub fn write_preview(plan: &RenamePlan, format: Preview, use_color: Option<bool>) -> Result<()> {
    let output = render_plan(plan, format, use_color);
    let mut stdout = io::stdout();
    write!(stdout, "{}", output)?;
    if !output.is_empty() && !output.ends_with('\n') {
        writeln!(stdout)?;
    }
    stdout.flush()?;
    Ok(())
}
