//! Cell formatting: times, names and display width.
//!
//! Pure, allocation-light helpers shared by post-processing and table layout:
//!
//! - **Duration**: centisecond integers to `12.34s` / `1:02.03` / `DNF`
//! - **Name**: parenthetical removal and ASCII transliteration
//! - **Width**: terminal column width and width-aware padding

pub mod duration;
pub mod name;
pub mod width;

pub use duration::{format_duration, is_time_field, DNF, DNS, TIME_FIELDS};
pub use name::{is_name_field, normalize_name, normalize_value, NAME_FIELDS};
pub use width::{display_width, pad_left, pad_right};
