use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// A single typed cell of a positional grid.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Trimmed text of a text cell, `None` for numbers, empty cells and
    /// whitespace-only text.
    pub fn label(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() { None } else { Some(trimmed) }
            }
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e10 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
        }
    }
}

// Convert Excel date number to ISO date string
pub fn excel_date_to_iso_string(excel_date: f64) -> String {
    let days = if excel_date > 59.0 {
        excel_date - 1.0
    } else {
        excel_date
    };

    let Some(base_date) = NaiveDate::from_ymd_opt(1900, 1, 1) else {
        return excel_date.to_string();
    };
    let date = base_date + Duration::days(days.trunc() as i64 - 1);

    let fractional_day = days.fract();
    if fractional_day > 0.0 {
        let seconds = (fractional_day * 86_400.0).round() as u32;
        let time = NaiveTime::from_hms_opt(seconds / 3600 % 24, (seconds % 3600) / 60, seconds % 60);

        match time {
            Some(time) => NaiveDateTime::new(date, time)
                .format("%Y-%m-%dT%H:%M:%S")
                .to_string(),
            None => date.format("%Y-%m-%d").to_string(),
        }
    } else {
        date.format("%Y-%m-%d").to_string()
    }
}
