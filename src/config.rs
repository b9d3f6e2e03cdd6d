use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{FilterError, Result};

pub const DEFAULT_CHART_PERIODS: usize = 4;
pub const DEFAULT_TABLE_PERIODS: usize = 2;
pub const DEFAULT_TITLE_COLOR: &str = "375623";

/// A source sheet of the annex and the row holding its period labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSpec {
    pub sheet_name: String,
    pub short_name: String,
    /// 0-based row index, counted from row 1 of the worksheet.
    pub period_row: usize,
    #[serde(default)]
    pub description: String,
}

/// How many trailing periods a view keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodSetting {
    /// The user-adjustable chart count.
    Chart,
    /// The user-adjustable table count.
    Table,
    Exactly(usize),
}

/// One worksheet of the output workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSpec {
    pub title: String,
    /// `short_name` of the source sheet.
    pub source: String,
    pub periods: PeriodSetting,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    DEFAULT_TITLE_COLOR.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodCounts {
    pub chart: usize,
    pub table: usize,
}

impl Default for PeriodCounts {
    fn default() -> Self {
        Self {
            chart: DEFAULT_CHART_PERIODS,
            table: DEFAULT_TABLE_PERIODS,
        }
    }
}

impl PeriodCounts {
    pub fn resolve(&self, setting: PeriodSetting) -> usize {
        match setting {
            PeriodSetting::Chart => self.chart,
            PeriodSetting::Table => self.table,
            PeriodSetting::Exactly(n) => n,
        }
    }
}

/// Which sheets to read and which views to render, both in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub sheets: Vec<SheetSpec>,
    pub views: Vec<ViewSpec>,
}

impl Default for Layout {
    fn default() -> Self {
        let sheet = |sheet_name: &str, short_name: &str, period_row, description: &str| SheetSpec {
            sheet_name: sheet_name.to_string(),
            short_name: short_name.to_string(),
            period_row,
            description: description.to_string(),
        };
        let view = |title: &str, source: &str, periods| ViewSpec {
            title: title.to_string(),
            source: source.to_string(),
            periods,
            color: default_color(),
        };

        Self {
            sheets: vec![
                sheet(
                    "Total Nacional_Grupos étnicos",
                    "TN_Grupos",
                    13,
                    "Indicadores por grupo étnico",
                ),
                sheet(
                    "TN_Grupos étnicos_sexo",
                    "TN_Sexo",
                    13,
                    "Indicadores por grupo étnico y sexo",
                ),
                sheet("Ocu TN_Rama", "TN_Rama", 12, "Ocupados por rama de actividad"),
                sheet(
                    "Ocu TN_Posocu",
                    "TN_Posocu",
                    12,
                    "Ocupados por posición ocupacional",
                ),
            ],
            views: vec![
                view("H1_Grafico_4años", "TN_Grupos", PeriodSetting::Chart),
                view("H3_Tabla_2años", "TN_Grupos", PeriodSetting::Table),
                view("H3_Sexo", "TN_Sexo", PeriodSetting::Table),
                view("H4_Rama", "TN_Rama", PeriodSetting::Table),
                view("H5_Posocu", "TN_Posocu", PeriodSetting::Table),
            ],
        }
    }
}

impl Layout {
    /// Reads and validates a JSON layout file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let layout: Layout = serde_json::from_str(&contents)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn sheet_by_short_name(&self, short_name: &str) -> Option<&SheetSpec> {
        self.sheets.iter().find(|spec| spec.short_name == short_name)
    }

    pub fn validate(&self) -> Result<()> {
        if self.views.is_empty() {
            return Err(FilterError::InvalidLayout("no views configured".into()));
        }

        let mut short_names = HashSet::with_capacity(self.sheets.len());
        let mut sheet_names = HashSet::with_capacity(self.sheets.len());
        for spec in &self.sheets {
            if !short_names.insert(spec.short_name.as_str()) {
                return Err(FilterError::InvalidLayout(format!(
                    "duplicate sheet short name {:?}",
                    spec.short_name
                )));
            }
            // The run report has one entry per workbook sheet.
            if !sheet_names.insert(spec.sheet_name.as_str()) {
                return Err(FilterError::InvalidLayout(format!(
                    "sheet {:?} is listed more than once",
                    spec.sheet_name
                )));
            }
        }

        let mut titles = HashSet::with_capacity(self.views.len());
        for view in &self.views {
            if view.title.trim().is_empty() {
                return Err(FilterError::InvalidLayout("view with an empty title".into()));
            }
            if !titles.insert(view.title.as_str()) {
                return Err(FilterError::InvalidLayout(format!(
                    "duplicate view title {:?}",
                    view.title
                )));
            }
            if !short_names.contains(view.source.as_str()) {
                return Err(FilterError::InvalidLayout(format!(
                    "view {:?} reads unknown sheet {:?}",
                    view.title, view.source
                )));
            }
            if view.periods == PeriodSetting::Exactly(0) {
                return Err(FilterError::InvalidLayout(format!(
                    "view {:?} keeps zero periods",
                    view.title
                )));
            }
            parse_color(&view.color)?;
        }

        Ok(())
    }
}

/// Parses a `RRGGBB` hex color, with or without a leading `#`.
pub fn parse_color(color: &str) -> Result<u32> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(FilterError::InvalidColor(color.to_string()));
    }
    u32::from_str_radix(hex, 16).map_err(|_| FilterError::InvalidColor(color.to_string()))
}
