use std::collections::BTreeMap;
use tracing::debug;

use crate::excel::Sheet;
use crate::period::PeriodPattern;

/// A non-blank text label found in the period row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodLabel {
    pub column: usize,
    pub text: String,
}

/// Every column of the period row that shares the pattern of the latest label.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodMatch {
    pub pattern: PeriodPattern,
    /// Matching columns in ascending order with their trimmed labels.
    pub columns: BTreeMap<usize, String>,
}

impl PeriodMatch {
    pub fn latest(&self) -> Option<(usize, &str)> {
        self.columns
            .iter()
            .next_back()
            .map(|(col, label)| (*col, label.as_str()))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Last column (never column 0) of `period_row` holding non-blank text.
pub fn latest_label(sheet: &Sheet, period_row: usize) -> Option<PeriodLabel> {
    sheet
        .period_cells(period_row)
        .filter_map(|(column, cell)| cell.label().map(|text| (column, text)))
        .last()
        .map(|(column, text)| PeriodLabel {
            column,
            text: text.to_string(),
        })
}

/// Finds the pattern of the most recent label in `period_row` and every
/// column whose label carries both of its tokens. `None` when the row has no
/// label or the latest one does not have the `<Month>..-<Month>..` shape.
pub fn find_latest_pattern(sheet: &Sheet, period_row: usize) -> Option<PeriodMatch> {
    let latest = latest_label(sheet, period_row)?;

    let Some(pattern) = PeriodPattern::parse(&latest.text) else {
        debug!(
            sheet = %sheet.name,
            row = period_row,
            label = %latest.text,
            "latest period label has no month pattern"
        );
        return None;
    };

    let columns: BTreeMap<usize, String> = sheet
        .period_cells(period_row)
        .filter_map(|(column, cell)| cell.label().map(|text| (column, text)))
        .filter(|(_, text)| pattern.matches(text))
        .map(|(column, text)| (column, text.to_string()))
        .collect();

    debug!(
        sheet = %sheet.name,
        row = period_row,
        %pattern,
        matches = columns.len(),
        "detected period pattern"
    );

    Some(PeriodMatch { pattern, columns })
}
