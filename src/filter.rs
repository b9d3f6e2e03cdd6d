use crate::excel::{CellValue, Sheet};
use crate::period::{find_latest_pattern, PeriodPattern};

/// A sheet reduced to its identifier column plus the latest matching periods.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredTable {
    /// Column 0 is the source identifier column, then one column per period.
    pub table: Sheet,
    /// Period labels in output order, one per period column.
    pub labels: Vec<String>,
    pub pattern: PeriodPattern,
    /// Source column index of every output column, starting with 0.
    pub source_columns: Vec<usize>,
}

impl FilteredTable {
    pub fn period_count(&self) -> usize {
        self.labels.len()
    }

    /// The value handed to presentation: numbers outside the identifier
    /// column are rounded to one decimal place.
    pub fn presented(&self, row: usize, col: usize) -> CellValue {
        match self.table.cell(row, col) {
            CellValue::Number(n) if col > 0 => CellValue::Number(round_to_tenth(*n)),
            other => other.clone(),
        }
    }
}

/// Rounds the stored value to one decimal place. Only an exact tie (a
/// stored `x.x5`, which must be a multiple of 0.25) goes away from zero;
/// `2.65` is stored as `2.6499…` and becomes `2.6`.
pub fn round_to_tenth(value: f64) -> f64 {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        return (value * 10.0).round() / 10.0;
    }
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Keeps column 0 and the last `count` columns sharing the latest period
/// pattern of `period_row`. Fewer matches than `count` keeps all of them.
/// `None` when the row has no recognisable pattern.
pub fn filter_sheet(sheet: &Sheet, period_row: usize, count: usize) -> Option<FilteredTable> {
    let found = find_latest_pattern(sheet, period_row)?;

    let skip = found.columns.len().saturating_sub(count);
    let (selected, labels): (Vec<usize>, Vec<String>) = found.columns.into_iter().skip(skip).unzip();

    let mut source_columns = Vec::with_capacity(selected.len() + 1);
    source_columns.push(0);
    source_columns.extend(selected);

    Some(FilteredTable {
        table: sheet.project(&source_columns),
        labels,
        pattern: found.pattern,
        source_columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A 16-row sheet with identifier labels in column 0, `labels` in
    /// `period_row` and numeric data `row * 100 + col + 0.25` below it.
    fn annex_sheet(period_row: usize, labels: &[(usize, &str)]) -> Sheet {
        let width = labels.iter().map(|(col, _)| col + 1).max().unwrap_or(1);
        let data = (0..16)
            .map(|row| {
                (0..width)
                    .map(|col| {
                        if col == 0 {
                            CellValue::Text(format!("concepto {row}"))
                        } else if row == period_row {
                            labels
                                .iter()
                                .find(|(c, _)| *c == col)
                                .map(|(_, l)| CellValue::text(*l))
                                .unwrap_or_default()
                        } else if row > period_row {
                            CellValue::Number((row * 100 + col) as f64 + 0.25)
                        } else {
                            CellValue::Empty
                        }
                    })
                    .collect()
            })
            .collect();
        Sheet::new("annex", data)
    }

    fn compact_sheet() -> Sheet {
        annex_sheet(12, &[(2, "Dic 20-Nov21"), (3, "Dic21-Nov22"), (4, "Dic22-Nov23")])
    }

    #[test]
    fn empty_period_row_is_absent() {
        let sheet = annex_sheet(13, &[]);
        assert_eq!(filter_sheet(&sheet, 13, 4), None);
    }

    #[test]
    fn newest_convention_only() {
        let sheet = annex_sheet(
            13,
            &[
                (5, "Oct 19 - Sep 20"),
                (6, "Oct 20 - Sep 21"),
                (7, "Oct 21 - Sep 22"),
                (8, "Oct 22 - Sep 23"),
                (9, "Oct 23 - Sep 24"),
                (10, "Dic 23 - Nov 24"),
            ],
        );

        let filtered = filter_sheet(&sheet, 13, 4).unwrap();
        assert_eq!(filtered.source_columns, vec![0, 10]);
        assert_eq!(filtered.labels, vec!["Dic 23 - Nov 24"]);
        assert_eq!(filtered.table.width, 2);
        assert_eq!(filtered.pattern.to_string(), "Dic-Nov");
    }

    #[test]
    fn keeps_the_trailing_count_in_column_order() {
        let filtered = filter_sheet(&compact_sheet(), 12, 2).unwrap();
        assert_eq!(filtered.source_columns, vec![0, 3, 4]);
        assert_eq!(filtered.labels, vec!["Dic21-Nov22", "Dic22-Nov23"]);
    }

    #[test]
    fn short_supply_returns_every_match() {
        let filtered = filter_sheet(&compact_sheet(), 12, 10).unwrap();
        assert_eq!(filtered.source_columns, vec![0, 2, 3, 4]);
        assert_eq!(filtered.period_count(), 3);
    }

    #[test]
    fn identifier_column_is_an_unchanged_copy() {
        let sheet = compact_sheet();
        let filtered = filter_sheet(&sheet, 12, 2).unwrap();

        assert_eq!(filtered.table.height, sheet.height);
        for row in 0..sheet.height {
            assert_eq!(filtered.table.cell(row, 0), sheet.cell(row, 0));
        }
    }

    #[test]
    fn projected_values_follow_their_source_columns() {
        let sheet = compact_sheet();
        let filtered = filter_sheet(&sheet, 12, 2).unwrap();

        for (out_col, src_col) in filtered.source_columns.iter().enumerate() {
            for row in 0..sheet.height {
                assert_eq!(filtered.table.cell(row, out_col), sheet.cell(row, *src_col));
            }
        }
    }

    #[test]
    fn output_width_is_one_plus_selected() {
        let sheet = compact_sheet();
        for count in 1..6 {
            let filtered = filter_sheet(&sheet, 12, count).unwrap();
            assert_eq!(filtered.table.width, 1 + count.min(3));
            assert!(filtered.source_columns.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn filtering_twice_gives_the_same_table() {
        let sheet = compact_sheet();
        assert_eq!(filter_sheet(&sheet, 12, 2), filter_sheet(&sheet, 12, 2));
    }

    #[test]
    fn presentation_rounds_data_columns_only() {
        let sheet = Sheet::new(
            "r",
            vec![
                vec![CellValue::Empty, CellValue::text("Dic21-Nov22")],
                vec![CellValue::Number(7.25), CellValue::Number(12.345)],
                vec![CellValue::text("n/a"), CellValue::text("-")],
                vec![CellValue::text("TD"), CellValue::Empty],
            ],
        );

        let filtered = filter_sheet(&sheet, 0, 1).unwrap();
        assert_eq!(filtered.presented(1, 0), CellValue::Number(7.25));
        assert_eq!(filtered.presented(1, 1), CellValue::Number(12.3));
        assert_eq!(filtered.presented(2, 1), CellValue::text("-"));
        assert_eq!(filtered.presented(3, 1), CellValue::Empty);
        // The table itself keeps the raw value.
        assert_eq!(filtered.table.cell(1, 1), &CellValue::Number(12.345));
    }

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(round_to_tenth(10.06), 10.1);
        assert_eq!(round_to_tenth(-3.04), -3.0);
        assert_eq!(round_to_tenth(42.0), 42.0);
    }

    #[test]
    fn rounds_the_stored_value_not_the_literal() {
        assert_eq!(round_to_tenth(0.35), 0.3);
        assert_eq!(round_to_tenth(2.65), 2.6);
        assert_eq!(round_to_tenth(12.65), 12.7);
        assert_eq!(round_to_tenth(-2.65), -2.6);
    }

    #[test]
    fn exact_ties_go_away_from_zero() {
        assert_eq!(round_to_tenth(12.25), 12.3);
        assert_eq!(round_to_tenth(0.75), 0.8);
        assert_eq!(round_to_tenth(-0.25), -0.3);
        assert_eq!(round_to_tenth(0.5), 0.5);
    }

    #[test]
    fn presented_values_use_stored_rounding() {
        let mut grid = vec![vec![CellValue::Empty; 2]; 2];
        grid[0][1] = CellValue::text("Dic 23 - Nov 24");
        grid[1][0] = CellValue::text("TD");
        grid[1][1] = CellValue::Number(2.65);
        let sheet = Sheet::new("s", grid);

        let filtered = filter_sheet(&sheet, 0, 1).unwrap();
        assert_eq!(filtered.presented(1, 1), CellValue::Number(2.6));
        assert_eq!(filtered.presented(1, 0), CellValue::text("TD"));
    }
}
