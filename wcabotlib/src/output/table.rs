//! Fixed-width result tables.
//!
//! This module provides `ResultTable`, a presentation-ready layout of a
//! result set: columns with their display widths and alignment, and every
//! displayed cell already stringified.
//!
//! The data flow is:
//! 1. Raw Data (ResultSet from the query engine)
//! 2. Post-processed ResultSet (times and names formatted)
//! 3. ResultTable (widths, alignment, cell strings)
//! 4. Text block (`Results:` title, rules, header, rows)
//!
//! All widths are display widths, so CJK text and combining marks line up in
//! a monospace font.

use crate::data::{Record, MESSAGE_KEY};
use crate::format::{display_width, pad_left, pad_right};

/// Reply for an empty result set (or nothing left to display).
pub const NO_RESULTS: &str = "No results found.";

/// Default number of rows shown before the "more results" notice.
pub const DEFAULT_MAX_ROWS: usize = 50;

/// Column sizing never grows past this many display columns.
pub const MAX_COLUMN_WIDTH: usize = 50;

const TITLE: &str = "Results:";
const SEPARATOR: &str = " | ";

/// Lowercased column-name fragments that mark a column as text to be
/// left-aligned.
pub const NAME_LIKE_KEYWORDS: &[&str] = &["name", "person", "competitor", "country", "city", "venue"];

/// Horizontal alignment of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

impl Alignment {
    /// Name-like columns read left to right; everything else (times, ranks,
    /// counts) is right-aligned.
    pub fn for_column(name: &str) -> Self {
        let lower = name.to_lowercase();
        if NAME_LIKE_KEYWORDS.iter().any(|k| lower.contains(k)) {
            Alignment::Left
        } else {
            Alignment::Right
        }
    }

    /// Pad `s` to `width` display columns.
    pub fn pad(self, s: &str, width: usize) -> String {
        match self {
            Alignment::Left => pad_right(s, width),
            Alignment::Right => pad_left(s, width),
        }
    }
}

/// Options controlling table layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Maximum number of records to display
    pub max_rows: usize,
    /// Upper bound on computed column width
    pub max_column_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
            max_column_width: MAX_COLUMN_WIDTH,
        }
    }
}

impl RenderOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the number of displayed records.
    pub fn max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    /// Change the column width cap.
    pub fn max_column_width(mut self, width: usize) -> Self {
        self.max_column_width = width;
        self
    }
}

/// One column of the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumn {
    /// Column name as reported by the engine
    pub name: String,
    /// Display width used for padding
    pub width: usize,
    /// Alignment of header and cells
    pub alignment: Alignment,
}

/// Table-ready result data.
///
/// Cells are stringified but not padded; `lines()` does the padding.
/// Content wider than its column is printed in full, never truncated.
#[derive(Debug, Clone)]
pub struct ResultTable {
    /// Column layout in engine order
    pub columns: Vec<TableColumn>,
    /// Displayed rows, one string per column
    pub rows: Vec<Vec<String>>,
    /// Records left out because of `max_rows`
    pub remaining: usize,
}

impl ResultTable {
    /// Lay out the first `options.max_rows` records.
    ///
    /// Returns `None` when there is nothing to display. Columns come from the
    /// first displayed record; a record missing a column shows an empty cell.
    pub fn from_records(records: &[Record], options: &RenderOptions) -> Option<Self> {
        let shown = &records[..records.len().min(options.max_rows)];
        let first = shown.first()?;

        let names: Vec<String> = first.keys().map(str::to_string).collect();
        let rows: Vec<Vec<String>> = shown
            .iter()
            .map(|record| names.iter().map(|n| record.display_value(n)).collect())
            .collect();

        let columns = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let widest = rows
                    .iter()
                    .map(|row| display_width(&row[i]))
                    .fold(display_width(&name), usize::max);
                TableColumn {
                    width: widest.min(options.max_column_width),
                    alignment: Alignment::for_column(&name),
                    name,
                }
            })
            .collect();

        Some(ResultTable {
            columns,
            rows,
            remaining: records.len() - shown.len(),
        })
    }

    /// Width of the rules: all columns plus their separators.
    pub fn total_width(&self) -> usize {
        let cells: usize = self.columns.iter().map(|c| c.width).sum();
        cells + SEPARATOR.len() * self.columns.len().saturating_sub(1)
    }

    fn format_line<'a>(&self, cells: impl Iterator<Item = &'a str>) -> String {
        self.columns
            .iter()
            .zip(cells)
            .map(|(column, cell)| column.alignment.pad(cell, column.width))
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    }

    /// Rendered lines, including the trailing notice when rows were cut.
    pub fn lines(&self) -> Vec<String> {
        let total = self.total_width();
        let mut lines = Vec::with_capacity(self.rows.len() + 6);

        lines.push(TITLE.to_string());
        lines.push("=".repeat(total));
        lines.push(self.format_line(self.columns.iter().map(|c| c.name.as_str())));
        lines.push("-".repeat(total));
        for row in &self.rows {
            lines.push(self.format_line(row.iter().map(String::as_str)));
        }

        if self.remaining > 0 {
            lines.push(String::new());
            lines.push(format!("... and {} more results", self.remaining));
        }

        lines
    }

    /// The table as one newline-joined text block.
    pub fn render(&self) -> String {
        self.lines().join("\n")
    }
}

/// Detail of a failed execution, if `records` is the one-record error set.
pub fn execution_error(records: &[Record]) -> Option<String> {
    match records {
        [only] if only.is_error() => Some(
            only.get(MESSAGE_KEY)
                .map(|m| m.to_string())
                .unwrap_or_else(|| "Unknown error".to_string()),
        ),
        _ => None,
    }
}

/// Render a result set as a text block.
///
/// Handles the two non-table replies: an empty result set, and the
/// single-record error sentinel produced when execution failed.
pub fn render_records(records: &[Record], options: &RenderOptions) -> String {
    if let Some(message) = execution_error(records) {
        return format!("Error: {}", message);
    }

    match ResultTable::from_records(records, options) {
        Some(table) => table.render(),
        None => NO_RESULTS.to_string(),
    }
}

/// Render a result set showing at most `max_rows` records.
///
/// ```rust
/// use wcabotlib::data::Record;
/// use wcabotlib::output::render_table;
///
/// assert_eq!(render_table(&[], 50), "No results found.");
///
/// let rows = vec![Record::new().with("name", "Max Park").with("best", "3.13s")];
/// let text = render_table(&rows, 50);
/// assert!(text.starts_with("Results:\n"));
/// ```
pub fn render_table(records: &[Record], max_rows: usize) -> String {
    render_records(records, &RenderOptions::new().max_rows(max_rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CellValue;
    use crate::format::display_width;
    use pretty_assertions::assert_eq;

    fn podium() -> Vec<Record> {
        vec![
            Record::new().with("name", "Max Park").with("best", "46.90s"),
            Record::new()
                .with("name", "Tymon Kolasinski")
                .with("best", "48.99s"),
        ]
    }

    #[test]
    fn test_empty_result_set() {
        assert_eq!(render_table(&[], 50), "No results found.");
    }

    #[test]
    fn test_error_sentinel() {
        let rows = vec![Record::new().with("error", "x").with("message", "boom")];
        assert_eq!(render_table(&rows, 50), "Error: boom");

        let rows = vec![Record::new().with("error", "x")];
        assert_eq!(render_table(&rows, 50), "Error: Unknown error");
    }

    #[test]
    fn test_error_key_only_special_for_single_record() {
        let rows = vec![
            Record::new().with("error", "x").with("message", "boom"),
            Record::new().with("error", "y").with("message", "bang"),
        ];
        assert!(render_table(&rows, 50).starts_with("Results:"));
    }

    #[test]
    fn test_execution_error_detail() {
        let rows = vec![Record::error("Unknown column 'foo'")];
        assert_eq!(execution_error(&rows).as_deref(), Some("Unknown column 'foo'"));
        assert_eq!(execution_error(&podium()), None);
        assert_eq!(execution_error(&[]), None);
    }

    #[test]
    fn test_null_cell_renders_as_sql_null() {
        let rows = vec![
            Record::new().with("name", "Max Park").with("average", CellValue::Null),
            Record::new().with("name", "Tymon Kolasinski").with("average", "6.20s"),
        ];
        let text = render_table(&rows, 50);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[4], "Max Park         |    NULL");
        assert!(!text.contains("None"));
    }

    #[test]
    fn test_zero_max_rows() {
        assert_eq!(render_table(&podium(), 0), "No results found.");
    }

    #[test]
    fn test_podium_layout() {
        let expected = [
            "Results:",
            "=========================",
            "name             |   best",
            "-------------------------",
            "Max Park         | 46.90s",
            "Tymon Kolasinski | 48.99s",
        ]
        .join("\n");
        assert_eq!(render_table(&podium(), 10), expected);
    }

    #[test]
    fn test_more_results_notice() {
        let rows: Vec<Record> = (0..60)
            .map(|i| Record::new().with("world_rank", i + 1))
            .collect();
        let text = render_table(&rows, 50);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4 + 50 + 2);
        assert_eq!(lines[lines.len() - 2], "");
        assert_eq!(lines[lines.len() - 1], "... and 10 more results");
    }

    #[test]
    fn test_missing_keys_render_empty() {
        let rows = vec![
            Record::new().with("name", "A").with("country_id", "US"),
            Record::new().with("name", "B"),
        ];
        let text = render_table(&rows, 50);
        assert!(text.ends_with("B    |           "));
    }

    #[test]
    fn test_null_cells() {
        let rows = vec![Record::new().with("venue", CellValue::Null)];
        let text = render_table(&rows, 50);
        assert!(text.ends_with("NULL "));
    }

    #[test]
    fn test_every_line_has_the_same_width() {
        let rows = vec![
            Record::new()
                .with("personName", "杜宇生")
                .with("countryId", "China")
                .with("average", "4.86s")
                .with("pos", 1),
            Record::new()
                .with("personName", "Jose\u{301} Garcia")
                .with("countryId", "Spain")
                .with("average", "1:02.34")
                .with("pos", 12),
        ];
        let text = render_table(&rows, 50);
        let widths: Vec<usize> = text.lines().skip(1).map(display_width).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{:?}", widths);
    }

    #[test]
    fn test_alignment_by_column_name() {
        assert_eq!(Alignment::for_column("person_name"), Alignment::Left);
        assert_eq!(Alignment::for_column("CountryId"), Alignment::Left);
        assert_eq!(Alignment::for_column("venue_address"), Alignment::Left);
        assert_eq!(Alignment::for_column("best"), Alignment::Right);
        assert_eq!(Alignment::for_column("world_rank"), Alignment::Right);
    }

    #[test]
    fn test_width_cap_does_not_truncate() {
        let long = "x".repeat(60);
        let rows = vec![Record::new().with("information", long.as_str())];
        let table = ResultTable::from_records(&rows, &RenderOptions::new()).unwrap();
        assert_eq!(table.columns[0].width, MAX_COLUMN_WIDTH);
        assert!(table.render().ends_with(&long));
    }

    #[test]
    fn test_columns_follow_first_record() {
        let rows = vec![
            Record::new().with("b", 1).with("a", 2),
            Record::new().with("a", 3).with("c", 4),
        ];
        let table = ResultTable::from_records(&rows, &RenderOptions::new()).unwrap();
        let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(table.rows[1], vec!["".to_string(), "3".to_string()]);
    }
}
