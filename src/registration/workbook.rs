use crate::error::Result;
use crate::registration::extract::extract_records;
use crate::types::{Grid, SheetOutcome, SheetStatus, WorkbookExtraction};
use tracing::{info, warn};

/// A named sheet as delivered by the workbook reader. A sheet that could not
/// be read carries its error instead of a grid.
pub struct NamedSheet {
    pub name: String,
    pub grid: Result<Grid>,
}

impl NamedSheet {
    pub fn new(name: impl Into<String>, grid: Result<Grid>) -> Self {
        Self {
            name: name.into(),
            grid,
        }
    }
}

/// Runs the extractor over every sheet in order and concatenates the records.
///
/// A sheet that fails to read or has no precinct header is reported as
/// skipped; the remaining sheets are still processed.
pub fn extract_workbook<I>(sheets: I, max_rows: usize) -> WorkbookExtraction
where
    I: IntoIterator<Item = NamedSheet>,
{
    let mut extraction = WorkbookExtraction::default();

    for sheet in sheets {
        let outcome = sheet
            .grid
            .and_then(|grid| extract_records(&grid, max_rows));

        let status = match outcome {
            Ok(records) if records.is_empty() => {
                info!(sheet = %sheet.name, "No rows");
                SheetStatus::NoRows
            }
            Ok(records) => {
                info!(sheet = %sheet.name, rows = records.len(), "Extracted sheet");
                let count = records.len();
                extraction.records.extend(records);
                SheetStatus::Extracted(count)
            }
            Err(e) => {
                warn!(sheet = %sheet.name, error = %e, "Skipping sheet");
                SheetStatus::Skipped(e.to_string())
            }
        };

        extraction.sheets.push(SheetOutcome {
            sheet: sheet.name,
            status,
        });
    }

    extraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrecinctError;
    use crate::types::Cell;

    fn cells(values: &[&str]) -> Vec<Cell> {
        values
            .iter()
            .map(|v| if v.is_empty() { None } else { Some(v.to_string()) })
            .collect()
    }

    fn precinct_sheet(rows: &[(&str, &str, &str, &str)]) -> Grid {
        let mut grid = vec![cells(&["Precinct No.", "Name", "", "", "", "Active", "Inactive"])];
        for (no, name, active, inactive) in rows {
            grid.push(cells(&[no, name, "", "", "", active, inactive]));
        }
        grid
    }

    #[test]
    fn test_bad_sheet_does_not_abort_workbook() {
        let sheets = vec![
            NamedSheet::new("Accomack", Ok(precinct_sheet(&[("101", "Chincoteague", "2,100", "80")]))),
            NamedSheet::new("Summary", Ok(vec![cells(&["Locality", "Total"])])),
            NamedSheet::new("Albemarle", Ok(precinct_sheet(&[("201", "Crozet", "3,005", "110")]))),
        ];

        let extraction = extract_workbook(sheets, 60);

        let numbers: Vec<_> = extraction
            .records
            .iter()
            .map(|r| r.precinct_no.as_str())
            .collect();
        assert_eq!(numbers, vec!["101", "201"]);
        assert_eq!(extraction.sheets[0].status, SheetStatus::Extracted(1));
        assert!(matches!(extraction.sheets[1].status, SheetStatus::Skipped(_)));
        assert_eq!(extraction.sheets[2].status, SheetStatus::Extracted(1));
        assert_eq!(extraction.skipped().count(), 1);
    }

    #[test]
    fn test_read_error_is_reported_as_skip() {
        let sheets = vec![NamedSheet::new(
            "Broken",
            Err(PrecinctError::Config("unreadable".into())),
        )];
        let extraction = extract_workbook(sheets, 60);
        assert!(extraction.records.is_empty());
        assert_eq!(
            extraction.sheets[0].status,
            SheetStatus::Skipped("Configuration error: unreadable".into())
        );
    }

    #[test]
    fn test_header_only_sheet_has_no_rows() {
        let sheets = vec![NamedSheet::new("Empty", Ok(precinct_sheet(&[])))];
        let extraction = extract_workbook(sheets, 60);
        assert_eq!(extraction.sheets[0].status, SheetStatus::NoRows);
    }

    #[test]
    fn test_empty_workbook() {
        let extraction = extract_workbook(Vec::new(), 60);
        assert!(extraction.records.is_empty());
        assert!(extraction.sheets.is_empty());
    }

    #[test]
    fn test_rerun_is_identical() {
        let build = || {
            vec![
                NamedSheet::new("A", Ok(precinct_sheet(&[("001", "North", "10", "1")]))),
                NamedSheet::new("B", Ok(precinct_sheet(&[("002", "South", "20", "")]))),
            ]
        };
        assert_eq!(extract_workbook(build(), 60), extract_workbook(build(), 60));
    }
}
