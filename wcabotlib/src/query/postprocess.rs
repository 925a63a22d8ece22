//! Field-by-field formatting of raw query rows.
//!
//! Behavior is selected purely by column name: integer cells in time
//! columns become durations, text cells in name columns become ASCII.
//! Everything else passes through, so the table renders it verbatim.

use crate::data::{CellValue, Record, ResultSet};
use crate::format::{format_duration, is_name_field, is_time_field, normalize_value, DNF, DNS};

/// Format one cell according to its column.
pub fn process_cell(column: &str, value: CellValue) -> CellValue {
    if is_time_field(column) {
        return match value.as_integer() {
            Some(v) if v >= 0 || v == DNF || v == DNS => CellValue::Text(format_duration(v)),
            _ => value,
        };
    }
    if is_name_field(column) {
        return normalize_value(&value);
    }
    value
}

/// Format every cell of one record, keeping column order.
pub fn process_record(record: Record) -> Record {
    record
        .into_iter()
        .map(|(column, value)| {
            let value = process_cell(&column, value);
            (column, value)
        })
        .collect()
}

/// Format a whole result set.
///
/// Applying this twice gives the same rows as applying it once: formatted
/// times are text and are never touched again, and normalized names are
/// already ASCII.
pub fn post_process(records: ResultSet) -> ResultSet {
    records.into_iter().map(process_record).collect()
}
