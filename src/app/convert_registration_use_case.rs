use crate::config::RegistrationConfig;
use crate::error::Result;
use crate::infra::csv_output_adapter::write_records;
use crate::infra::workbook_reader::Workbook;
use crate::registration::workbook::{extract_workbook, NamedSheet};
use crate::types::WorkbookExtraction;
use tracing::{info, instrument};

/// Reads the registration workbook, extracts every sheet and writes one CSV.
pub struct ConvertRegistrationUseCase {
    config: RegistrationConfig,
}

impl ConvertRegistrationUseCase {
    pub fn new(config: RegistrationConfig) -> Self {
        Self { config }
    }

    #[instrument(skip(self), fields(input = %self.config.input.display()))]
    pub fn run(&self) -> Result<WorkbookExtraction> {
        let mut workbook = Workbook::open(&self.config.input)?;
        let sheets = workbook.sheets();
        self.convert_sheets(sheets)
    }

    /// Extracts already-loaded sheets and writes the output file.
    pub fn convert_sheets(&self, sheets: Vec<NamedSheet>) -> Result<WorkbookExtraction> {
        let extraction = extract_workbook(sheets, self.config.max_header_scan_rows);
        info!(
            rows = extraction.records.len(),
            sheets = extraction.sheets.len(),
            skipped = extraction.skipped().count(),
            "Extracted workbook"
        );
        write_records(&self.config.output, &extraction.records)?;
        Ok(extraction)
    }
}
