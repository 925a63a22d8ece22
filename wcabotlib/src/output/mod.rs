//! Output formatting: present result sets as text.
//!
//! This module handles the last stage of the pipeline - turning processed
//! rows into what the chat transport sends. It provides:
//!
//! - **ResultTable**: Column widths, alignment and stringified cells
//! - **render_table**: The text block, including the empty and error replies
//! - **Chunking**: Splitting long blocks into fenced, size-capped messages
//!
//! ResultTable is a pure presentation layer - it only lays out strings.
//! Time and name formatting happen in the query stage.
//!
//! ## Example
//!
//! ```rust
//! use wcabotlib::data::Record;
//! use wcabotlib::output::{render_table, to_messages};
//!
//! let rows = vec![Record::new().with("name", "Max Park").with("best", "3.13s")];
//! let messages = to_messages(&render_table(&rows, 50));
//! assert_eq!(messages.len(), 1);
//! ```

pub mod chunk;
pub mod table;

pub use chunk::{fence, split_chunks, to_messages, CHUNK_SIZE, MESSAGE_LIMIT};
pub use table::{
    execution_error, render_records, render_table, Alignment, RenderOptions, ResultTable,
    TableColumn, DEFAULT_MAX_ROWS, MAX_COLUMN_WIDTH, NO_RESULTS,
};
