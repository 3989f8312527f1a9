//! Historical elections site: "Similar results" traversal and precinct CSV downloads.

pub mod download;
pub mod jump_list;

pub use download::{download_precinct_csv, file_name_for};
pub use jump_list::{parse_jump_list, JumpList};
