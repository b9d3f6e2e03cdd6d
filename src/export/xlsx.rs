use rust_xlsxwriter::{Workbook, Worksheet};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use crate::config::parse_color;
use crate::error::{FilterError, Result};
use crate::excel::CellValue;
use crate::export::formats::{IDENTIFIER_COLUMN_WIDTH, PERIOD_COLUMN_WIDTH, ViewFormats};
use crate::pipeline::RenderedView;

pub const IDENTIFIER_HEADER: &str = "Concepto";

const MAX_SHEET_NAME_CHARS: usize = 31;
const TITLE_ROW: u32 = 0;
const HEADER_ROW: u32 = 1;
const FIRST_DATA_ROW: u32 = 2;

/// Writes every view into one workbook at `path`.
pub fn write_views(views: &[RenderedView], path: &Path) -> Result<()> {
    let mut workbook = build_workbook(views)?;
    workbook.save(path)?;
    debug!(path = %path.display(), views = views.len(), "workbook saved");
    Ok(())
}

/// Same workbook as [`write_views`], kept in memory.
pub fn views_to_buffer(views: &[RenderedView]) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(views)?;
    Ok(workbook.save_to_buffer()?)
}

fn build_workbook(views: &[RenderedView]) -> Result<Workbook> {
    if views.is_empty() {
        return Err(FilterError::NothingToWrite);
    }

    let formats = ViewFormats::new();
    let mut workbook = Workbook::new();
    let mut used_names = HashSet::with_capacity(views.len());

    for view in views {
        let name = worksheet_name(&view.spec.title, &mut used_names);
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&name)?;
        write_view(worksheet, view, &formats)?;
    }

    Ok(workbook)
}

fn write_view(worksheet: &mut Worksheet, view: &RenderedView, formats: &ViewFormats) -> Result<()> {
    let filtered = &view.filtered;
    let last_col = filtered.labels.len() as u16;

    let title = format!("{} - {}", view.spec.title, filtered.labels.join(", "));
    let title_format = ViewFormats::title(parse_color(&view.spec.color)?);
    if last_col == 0 {
        worksheet.write_string_with_format(TITLE_ROW, 0, &title, &title_format)?;
    } else {
        worksheet.merge_range(TITLE_ROW, 0, TITLE_ROW, last_col, &title, &title_format)?;
    }

    worksheet.write_string_with_format(HEADER_ROW, 0, IDENTIFIER_HEADER, &formats.identifier_header)?;
    for (i, label) in filtered.labels.iter().enumerate() {
        worksheet.write_string_with_format(HEADER_ROW, i as u16 + 1, label, &formats.period_header)?;
    }

    for row in 0..filtered.table.height {
        let out_row = FIRST_DATA_ROW + row as u32;
        for col in 0..filtered.table.width {
            let out_col = col as u16;
            match filtered.presented(row, col) {
                CellValue::Number(n) if col > 0 => {
                    worksheet.write_number_with_format(out_row, out_col, n, &formats.data)?;
                }
                CellValue::Number(n) => {
                    worksheet.write_number_with_format(out_row, out_col, n, &formats.plain)?;
                }
                CellValue::Text(s) => {
                    worksheet.write_string_with_format(out_row, out_col, &s, &formats.plain)?;
                }
                CellValue::Empty => {
                    worksheet.write_blank(out_row, out_col, &formats.plain)?;
                }
            }
        }
    }

    worksheet.set_column_width(0, IDENTIFIER_COLUMN_WIDTH)?;
    for col in 1..=last_col {
        worksheet.set_column_width(col, PERIOD_COLUMN_WIDTH)?;
    }

    Ok(())
}

/// Excel sheet names: at most 31 characters, none of `[]:*?/\`, unique
/// regardless of case.
fn worksheet_name(title: &str, used: &mut HashSet<String>) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| if "[]:*?/\\".contains(c) { '_' } else { c })
        .collect();
    let base: String = cleaned.chars().take(MAX_SHEET_NAME_CHARS).collect();

    let mut name = base.clone();
    let mut n = 2;
    while !used.insert(name.to_lowercase()) {
        let suffix = format!("_{n}");
        let keep = MAX_SHEET_NAME_CHARS - suffix.chars().count();
        name = base.chars().take(keep).chain(suffix.chars()).collect();
        n += 1;
    }

    name
}
