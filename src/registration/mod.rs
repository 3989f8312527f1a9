//! Voter registration workbook extraction.
//!
//! Sheets of the 2012 registration report carry a "Precinct No." header cell
//! somewhere near the top; the precinct name and the active/inactive counts
//! sit at fixed column offsets from it (see `constants`).

pub mod extract;
pub mod preview;
pub mod workbook;

pub use extract::{clean_count, extract_records, locate_header, normalize_cell};
pub use workbook::{extract_workbook, NamedSheet};
