use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{format_scalar, schedule_rows, solved_value};

const ROW_HEADERS: [&str; 5] = ["Date", "Payment", "Interest", "Principal", "Balance"];
const ROW_FIELDS: [&str; 5] = ["date", "payment", "interest", "principal", "remaining_balance"];
const SUMMARY_FIELDS: [&str; 5] = [
    "number_of_payments",
    "payoff_date",
    "total_principal",
    "total_interest",
    "total_paid",
];

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    if let Some(rows) = schedule_rows(value) {
        println!("{}", schedule_table(rows));
        if let Some(schedule) = solved_value(value) {
            println!("{}", summary_table(schedule));
        }
    } else {
        println!("{}", result_table(value));
    }
    print_envelope_notes(value);
}

fn result_table(value: &Value) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    if let Some(Value::Object(result)) = value.get("result") {
        for (key, val) in result {
            builder.push_record([key.as_str(), &format_scalar(val)]);
        }
    }
    Table::from(builder)
}

fn schedule_table(rows: &[Value]) -> Table {
    let mut builder = Builder::default();
    builder.push_record(ROW_HEADERS);
    for row in rows {
        let record: Vec<String> = ROW_FIELDS
            .iter()
            .map(|f| row.get(*f).map(format_scalar).unwrap_or_default())
            .collect();
        builder.push_record(record);
    }
    Table::from(builder)
}

fn summary_table(schedule: &Value) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for field in SUMMARY_FIELDS {
        if let Some(val) = schedule.get(field) {
            builder.push_record([field, &format_scalar(val)]);
        }
    }
    Table::from(builder)
}

fn print_envelope_notes(value: &Value) {
    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {w}");
            }
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {meth}");
    }
}
