use serde_json::Value;
use std::io;

use super::{format_scalar, schedule_rows, solved_value};

const ROW_COLUMNS: [&str; 5] = ["date", "payment", "interest", "principal", "remaining_balance"];

/// Write output as CSV to stdout.
///
/// A schedule becomes one record per month; any other result is a `mode,value` pair.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    let _ = write_csv(&mut wtr, value);
    let _ = wtr.flush();
}

fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    if let Some(rows) = schedule_rows(value) {
        wtr.write_record(ROW_COLUMNS)?;
        for row in rows {
            let record: Vec<String> = ROW_COLUMNS
                .iter()
                .map(|c| row.get(*c).map(format_scalar).unwrap_or_default())
                .collect();
            wtr.write_record(&record)?;
        }
        return Ok(());
    }

    let mode = value
        .get("result")
        .and_then(|r| r.get("mode"))
        .map(format_scalar)
        .unwrap_or_default();
    wtr.write_record(["mode", "value"])?;
    wtr.write_record([mode, solved_value(value).map(format_scalar).unwrap_or_default()])
}
