use crate::excel::CellValue;

static EMPTY: CellValue = CellValue::Empty;

/// A header-free positional grid. Row and column 0 are cell A1; rows are
/// padded to `width` so the grid is always rectangular.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub data: Vec<Vec<CellValue>>,
    pub height: usize,
    pub width: usize,
}

impl Sheet {
    pub fn new(name: impl Into<String>, mut data: Vec<Vec<CellValue>>) -> Self {
        let width = data.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut data {
            row.resize(width, CellValue::Empty);
        }

        Self {
            name: name.into(),
            height: data.len(),
            width,
            data,
        }
    }

    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    /// Reads a cell; anything outside the grid is `Empty`.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.data
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&EMPTY)
    }

    /// Cells of `row` paired with their column index, skipping the
    /// identifier column.
    pub fn period_cells(&self, row: usize) -> impl Iterator<Item = (usize, &CellValue)> + '_ {
        (1..self.width).map(move |col| (col, self.cell(row, col)))
    }

    /// Builds a new sheet holding only `columns`, in the given order,
    /// re-indexed from 0.
    pub fn project(&self, columns: &[usize]) -> Sheet {
        let data = self
            .data
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|&col| row.get(col).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();

        Sheet {
            name: self.name.clone(),
            data,
            height: self.height,
            width: columns.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Sheet {
        Sheet::new(
            "grid",
            vec![
                vec![CellValue::text("Concepto"), CellValue::Number(1.0), CellValue::Number(2.0)],
                vec![CellValue::text("TD")],
            ],
        )
    }

    #[test]
    fn rows_are_padded_to_the_widest_row() {
        let sheet = grid();
        assert_eq!(sheet.width, 3);
        assert_eq!(sheet.height, 2);
        assert_eq!(sheet.data[1].len(), 3);
        assert!(sheet.cell(1, 2).is_empty());
    }

    #[test]
    fn out_of_range_reads_are_empty() {
        let sheet = grid();
        assert!(sheet.cell(10, 0).is_empty());
        assert!(sheet.cell(0, 10).is_empty());
    }

    #[test]
    fn project_reorders_and_reindexes_columns() {
        let sheet = grid();
        let projected = sheet.project(&[0, 2]);

        assert_eq!(projected.width, 2);
        assert_eq!(projected.height, 2);
        assert_eq!(projected.cell(0, 1), &CellValue::Number(2.0));
        assert_eq!(projected.cell(1, 0), &CellValue::text("TD"));
        // Source is untouched.
        assert_eq!(sheet.width, 3);
    }

    #[test]
    fn period_cells_skip_the_identifier_column() {
        let sheet = grid();
        let cols: Vec<usize> = sheet.period_cells(0).map(|(col, _)| col).collect();
        assert_eq!(cols, vec![1, 2]);
    }
}
