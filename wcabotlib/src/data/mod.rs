//! Data model: the rows a query returns.
//!
//! This module handles the first stage of the pipeline - representing what
//! the database hands back. It provides:
//!
//! - **CellValue**: Integer, text or NULL
//! - **Record**: An ordered column → value mapping
//! - **ResultSet**: The rows of one query execution
//!
//! ## Example
//!
//! ```rust
//! use wcabotlib::data::{CellValue, Record};
//!
//! let row = Record::new().with("name", "Max Park").with("best", 347);
//! assert_eq!(row.get("best"), Some(&CellValue::Integer(347)));
//! ```

pub mod record;

pub use record::{CellValue, Record, ResultSet, ERROR_KEY, MESSAGE_KEY};
