pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;
pub mod text;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
        OutputFormat::Text => text::print_text(value),
    }
}

/// The `value` of the tagged `result`, and the schedule rows when it is a breakdown.
pub(crate) fn solved_value(value: &Value) -> Option<&Value> {
    value.get("result").and_then(|r| r.get("value"))
}

pub(crate) fn schedule_rows(value: &Value) -> Option<&Vec<Value>> {
    solved_value(value)
        .and_then(|v| v.get("rows"))
        .and_then(Value::as_array)
}

pub(crate) fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
