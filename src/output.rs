//! Rendering of analysis results for the terminal.

use std::fmt;

use crate::data::analysis::AnalysisResult;

/// Output format for analysis results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Status lines followed by an event detail table.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unsupported output format: {other} (supported: table, json)"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Renders a result in the requested format.
pub fn render(result: &AnalysisResult, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(result)),
        OutputFormat::Json => render_json(result),
    }
}

/// Renders a result as pretty-printed JSON.
pub fn render_json(result: &AnalysisResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

/// Renders a result as status lines plus a detail table.
pub fn render_table(result: &AnalysisResult) -> String {
    let mut out = String::new();

    if !result.found {
        out.push_str("\u{274c} No code events found\n");
        out.push_str(&format!("\u{1f4ca} Events checked: {}\n", result.events_checked));
        if let Some(error) = &result.error {
            out.push_str(&format!("\u{2757} Error: {error}\n"));
        }
        return out;
    }

    out.push_str("\u{2705} Code event found\n");
    out.push_str(&format!("\u{1f4ca} Events checked: {}\n", result.events_checked));

    if let Some(description) = &result.event_description {
        out.push_str(&format!("\u{1f4dd} {description}\n"));
    }

    match result.submitted_before {
        Some(true) => out.push_str("\u{23f0} Status: \u{2705} Submitted before deadline\n"),
        Some(false) => out.push_str("\u{23f0} Status: \u{274c} Submitted after deadline\n"),
        None => {}
    }

    if let Some(difference) = &result.time_difference {
        out.push_str(&format!("\u{1f4c5} Time difference: {difference}\n"));
    }

    if let Some(error) = &result.error {
        out.push_str(&format!("\u{2757} Error: {error}\n"));
    }

    if let Some(event) = &result.last_code_event {
        out.push_str("\n\u{1f4cb} Last Code Event Details:\n");
        out.push_str(&format_field_table(&[
            ("Event ID", event.id.as_str()),
            ("Event Type", event.event_type.as_str()),
            ("Created At", event.created_at.as_str()),
            ("Actor", event.actor_login.as_str()),
            ("Repository", event.repo_name.as_str()),
        ]));
    }

    out
}

/// Formats `(field, value)` rows as a borderless two-column table.
fn format_field_table(rows: &[(&str, &str)]) -> String {
    const FIELD_HEADER: &str = "FIELD";
    const VALUE_HEADER: &str = "VALUE";

    let width = rows
        .iter()
        .map(|(field, _)| field.chars().count())
        .chain(std::iter::once(FIELD_HEADER.len()))
        .max()
        .unwrap_or(0);

    let mut out = format!("  {FIELD_HEADER:<width$}  {VALUE_HEADER}\n");
    out.push_str(&format!("  {:-<width$}  {:-<5}\n", "", ""));
    for (field, value) in rows {
        out.push_str(&format!("  {field:<width$}  {value}\n"));
    }
    out
}
