use crate::constants::{ACTIVE_COLUMN_OFFSET, INACTIVE_COLUMN_OFFSET, NAME_COLUMN_OFFSET};
use serde::Serialize;
use std::path::PathBuf;

/// One spreadsheet cell: text, or missing.
pub type Cell = Option<String>;

/// One sheet as rows of cells. Row 0 is real content, never an assumed header.
pub type Grid = Vec<Vec<Cell>>;

/// Position of the precinct number header cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMatch {
    pub row: usize,
    pub column: usize,
}

/// Columns read for each data row, derived from the header column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub precinct_no: usize,
    pub precinct_name: usize,
    pub active: usize,
    pub inactive: usize,
}

impl ColumnLayout {
    pub fn from_header_column(column: usize) -> Self {
        Self {
            precinct_no: column,
            precinct_name: column + NAME_COLUMN_OFFSET,
            active: column + ACTIVE_COLUMN_OFFSET,
            inactive: column + INACTIVE_COLUMN_OFFSET,
        }
    }
}

/// One cleaned precinct registration row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedRecord {
    /// Kept as text; leading zeros are significant.
    #[serde(rename = "Precinct No.")]
    pub precinct_no: String,
    #[serde(rename = "Precinct Name")]
    pub precinct_name: Option<String>,
    #[serde(rename = "Active")]
    pub active: Option<i64>,
    #[serde(rename = "Inactive")]
    pub inactive: Option<i64>,
}

impl ExtractedRecord {
    pub fn is_blank(&self) -> bool {
        self.precinct_no.is_empty()
            && self.precinct_name.as_deref().map_or(true, str::is_empty)
            && self.active.is_none()
            && self.inactive.is_none()
    }
}

/// What happened to one sheet of a workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetStatus {
    Extracted(usize),
    NoRows,
    Skipped(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetOutcome {
    pub sheet: String,
    pub status: SheetStatus,
}

/// Records of a whole workbook plus the per-sheet report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkbookExtraction {
    pub records: Vec<ExtractedRecord>,
    pub sheets: Vec<SheetOutcome>,
}

impl WorkbookExtraction {
    pub fn skipped(&self) -> impl Iterator<Item = &SheetOutcome> {
        self.sheets
            .iter()
            .filter(|outcome| matches!(outcome.status, SheetStatus::Skipped(_)))
    }
}

/// One entry of the "Similar results" jump list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElectionEntry {
    pub id: u64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedElection {
    pub id: u64,
    pub label: String,
    pub path: PathBuf,
}

