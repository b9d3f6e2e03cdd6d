use calamine::{open_workbook_auto, Data, Reader};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::FilterError;
use crate::excel::{excel_date_to_iso_string, CellValue, Sheet};

/// Every sheet of an input workbook, loaded eagerly in file order.
#[derive(Debug, Clone)]
pub struct Workbook {
    sheets: Vec<Sheet>,
    file_path: PathBuf,
}

pub fn open_workbook<P: AsRef<Path>>(path: P) -> Result<Workbook, FilterError> {
    let path = path.as_ref();

    let mut workbook = open_workbook_auto(path).map_err(|source| FilterError::MalformedInput {
        path: path.to_path_buf(),
        source,
    })?;

    let sheet_names = workbook.sheet_names().to_vec();
    let mut sheets = Vec::with_capacity(sheet_names.len());

    for name in &sheet_names {
        let range = workbook
            .worksheet_range(name)
            .map_err(|source| FilterError::MalformedInput {
                path: path.to_path_buf(),
                source,
            })?;

        let sheet = create_sheet_from_range(name, &range);
        debug!(sheet = %name, rows = sheet.height, cols = sheet.width, "loaded worksheet");
        sheets.push(sheet);
    }

    if sheets.is_empty() {
        return Err(FilterError::EmptyWorkbook(path.to_path_buf()));
    }

    Ok(Workbook {
        sheets,
        file_path: path.to_path_buf(),
    })
}

fn create_sheet_from_range(name: &str, range: &calamine::Range<Data>) -> Sheet {
    // calamine trims leading empty rows and columns; the grid is anchored at A1
    // so that configured row indexes stay positional.
    let Some((start_row, start_col)) = range.start() else {
        return Sheet::empty(name);
    };
    let (start_row, start_col) = (start_row as usize, start_col as usize);
    let (height, width) = range.get_size();

    let mut data = vec![vec![CellValue::Empty; start_col + width]; start_row + height];

    for (row_idx, col_idx, cell) in range.used_cells() {
        data[start_row + row_idx][start_col + col_idx] = convert_cell(cell);
    }

    Sheet::new(name, data)
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::text(if *b { "TRUE" } else { "FALSE" }),
        Data::Error(e) => CellValue::Text(e.to_string()),
        Data::DateTime(dt) => CellValue::Text(excel_date_to_iso_string(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

impl Workbook {
    pub fn from_sheets(file_path: impl Into<PathBuf>, sheets: Vec<Sheet>) -> Self {
        Self {
            sheets,
            file_path: file_path.into(),
        }
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    pub fn get_sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|sheet| sheet.name.clone()).collect()
    }

    pub fn get_file_path(&self) -> &Path {
        &self.file_path
    }
}
