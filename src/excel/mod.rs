mod cell;
mod sheet;
mod workbook;

pub use cell::{excel_date_to_iso_string, CellValue};
pub use sheet::Sheet;
pub use workbook::{open_workbook, Workbook};
