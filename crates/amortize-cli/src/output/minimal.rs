use serde_json::Value;

use super::{format_scalar, solved_value};

/// Print only the solved quantity.
///
/// Scalar results (payment, date, rate) print as-is; a schedule prints its total interest.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

fn minimal_line(value: &Value) -> String {
    match solved_value(value) {
        Some(Value::Object(schedule)) => schedule
            .get("total_interest")
            .map(format_scalar)
            .unwrap_or_default(),
        Some(scalar) => format_scalar(scalar),
        None => format_scalar(value),
    }
}
