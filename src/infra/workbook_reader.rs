use crate::error::{PrecinctError, Result};
use crate::registration::workbook::NamedSheet;
use crate::types::{Cell, Grid};
use calamine::{open_workbook, Data, Ods, Range, Reader, Xls, Xlsb, Xlsx};
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

type FileReader = BufReader<File>;

/// Workbook opened with the engine matching its file extension.
pub enum Workbook {
    /// Legacy Excel (.xls, .xla)
    Xls(Xls<FileReader>),
    /// Excel 2007+ (.xlsx, .xlsm, .xlam)
    Xlsx(Xlsx<FileReader>),
    /// Excel binary (.xlsb)
    Xlsb(Xlsb<FileReader>),
    /// OpenDocument (.ods)
    Ods(Ods<FileReader>),
}

impl Workbook {
    pub fn open(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_ascii_lowercase);
        let workbook = match extension.as_deref() {
            Some("xls") | Some("xla") => Self::Xls(open_engine(path)?),
            Some("xlsx") | Some("xlsm") | Some("xlam") => Self::Xlsx(open_engine(path)?),
            Some("xlsb") => Self::Xlsb(open_engine(path)?),
            Some("ods") => Self::Ods(open_engine(path)?),
            _ => {
                return Err(PrecinctError::UnsupportedFormat {
                    name: path.to_string_lossy().to_string(),
                })
            }
        };
        Ok(workbook)
    }

    pub fn sheet_names(&self) -> Vec<String> {
        match self {
            Self::Xls(xls) => xls.sheet_names(),
            Self::Xlsx(xlsx) => xlsx.sheet_names(),
            Self::Xlsb(xlsb) => xlsb.sheet_names(),
            Self::Ods(ods) => ods.sheet_names(),
        }
    }

    pub fn read_grid(&mut self, sheet_name: &str) -> Result<Grid> {
        let range = match self {
            Self::Xls(xls) => xls.worksheet_range(sheet_name).map_err(calamine::Error::Xls)?,
            Self::Xlsx(xlsx) => xlsx
                .worksheet_range(sheet_name)
                .map_err(calamine::Error::Xlsx)?,
            Self::Xlsb(xlsb) => xlsb
                .worksheet_range(sheet_name)
                .map_err(calamine::Error::Xlsb)?,
            Self::Ods(ods) => ods.worksheet_range(sheet_name).map_err(calamine::Error::Ods)?,
        };
        debug!(sheet = sheet_name, dimensions = ?range.get_size(), "Read sheet range");
        Ok(range_to_grid(&range))
    }

    /// Every sheet in workbook order, each read into a grid.
    pub fn sheets(&mut self) -> Vec<NamedSheet> {
        self.sheet_names()
            .into_iter()
            .map(|name| {
                let grid = self.read_grid(&name);
                NamedSheet::new(name, grid)
            })
            .collect()
    }
}

fn open_engine<R>(path: &Path) -> Result<R>
where
    R: Reader<FileReader>,
    calamine::Error: From<R::Error>,
{
    open_workbook::<R, _>(path).map_err(|e| PrecinctError::Spreadsheet(e.into()))
}

/// Copies a used range into a grid anchored at A1. Cells before the used
/// range are missing, so row and column indices match the sheet.
pub fn range_to_grid(range: &Range<Data>) -> Grid {
    let Some((last_row, last_column)) = range.end() else {
        return Vec::new();
    };
    (0..=last_row)
        .map(|row| {
            (0..=last_column)
                .map(|column| range.get_value((row, column)).and_then(cell_text))
                .collect()
        })
        .collect()
}

/// Text form of a cell value. Whole floats print without a fraction so that
/// counts stored as numbers read the same as counts stored as text.
pub fn cell_text(value: &Data) -> Cell {
    match value {
        Data::Empty | Data::Error(_) => None,
        Data::String(text) if text.is_empty() => None,
        Data::String(text) => Some(text.clone()),
        Data::Int(number) => Some(number.to_string()),
        Data::Float(number) => Some(format_float(*number)),
        Data::Bool(flag) => Some(flag.to_string()),
        Data::DateTime(datetime) => Some(format_float(datetime.as_f64())),
        Data::DateTimeIso(text) | Data::DurationIso(text) => Some(text.clone()),
    }
}

fn format_float(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
        (number as i64).to_string()
    } else {
        number.to_string()
    }
}
