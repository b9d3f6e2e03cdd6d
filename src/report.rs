use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Outcome of looking up one configured source sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SheetStatus {
    Found {
        pattern: String,
        periods: usize,
        latest_label: String,
        latest_cell: String,
    },
    NoPeriods,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetReport {
    pub short_name: String,
    pub period_row: usize,
    #[serde(flatten)]
    pub status: SheetStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    SheetMissing,
    NoPeriods,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::SheetMissing => f.write_str("source sheet not found"),
            SkipReason::NoPeriods => f.write_str("no periods found"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ViewStatus {
    Rendered {
        pattern: String,
        labels: Vec<String>,
        source_columns: Vec<String>,
    },
    Skipped {
        reason: SkipReason,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewReport {
    pub source: String,
    pub requested: usize,
    #[serde(flatten)]
    pub status: ViewStatus,
}

/// Everything a user needs to see which sheets fed the output and why the
/// others were left out. Keys keep layout order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub input: String,
    pub sheets: IndexMap<String, SheetReport>,
    pub views: IndexMap<String, ViewReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl RunReport {
    pub fn found_sheets(&self) -> usize {
        self.sheets
            .values()
            .filter(|report| matches!(report.status, SheetStatus::Found { .. }))
            .count()
    }

    pub fn rendered_views(&self) -> usize {
        self.views
            .values()
            .filter(|report| matches!(report.status, ViewStatus::Rendered { .. }))
            .count()
    }

    /// Human-readable summary, one line per sheet and per view.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.sheets.len() + self.views.len() + 2);
        lines.push(format!("Sheets in {}:", self.input));

        for (name, report) in &self.sheets {
            let line = match &report.status {
                SheetStatus::Found {
                    pattern,
                    periods,
                    latest_label,
                    latest_cell,
                } => format!(
                    "  ✔ {name} → pattern {pattern}, {periods} periods, latest: {latest_label} ({latest_cell})"
                ),
                SheetStatus::NoPeriods => format!("  ⚠ {name} - no periods found"),
                SheetStatus::Missing => format!("  ✘ {name} - not found"),
            };
            lines.push(line);
        }

        lines.push("Views:".to_string());
        for (title, report) in &self.views {
            let line = match &report.status {
                ViewStatus::Rendered { labels, .. } => {
                    format!("  ✔ {title} ({} periods): {}", labels.len(), labels.join(", "))
                }
                ViewStatus::Skipped { reason } => {
                    format!("  ⚠ {title} - skipped, {reason} ({})", report.source)
                }
            };
            lines.push(line);
        }

        if let Some(output) = &self.output {
            lines.push(format!("Written to {output}"));
        }

        lines
    }
}

pub fn serialize_to_json<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data).context("Failed to serialize data to JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn sample() -> RunReport {
        let mut sheets = IndexMap::new();
        sheets.insert(
            "Ocu TN_Rama".to_string(),
            SheetReport {
                short_name: "TN_Rama".into(),
                period_row: 12,
                status: SheetStatus::Found {
                    pattern: "Dic-Nov".into(),
                    periods: 3,
                    latest_label: "Dic22-Nov23".into(),
                    latest_cell: "E13".into(),
                },
            },
        );
        sheets.insert(
            "Ocu TN_Posocu".to_string(),
            SheetReport {
                short_name: "TN_Posocu".into(),
                period_row: 12,
                status: SheetStatus::Missing,
            },
        );

        let mut views = IndexMap::new();
        views.insert(
            "H4_Rama".to_string(),
            ViewReport {
                source: "TN_Rama".into(),
                requested: 2,
                status: ViewStatus::Rendered {
                    pattern: "Dic-Nov".into(),
                    labels: vec!["Dic21-Nov22".into(), "Dic22-Nov23".into()],
                    source_columns: vec!["D".into(), "E".into()],
                },
            },
        );
        views.insert(
            "H5_Posocu".to_string(),
            ViewReport {
                source: "TN_Posocu".into(),
                requested: 2,
                status: ViewStatus::Skipped {
                    reason: SkipReason::SheetMissing,
                },
            },
        );

        RunReport {
            input: "anexo.xlsx".into(),
            sheets,
            views,
            output: None,
        }
    }

    #[test]
    fn counts_found_sheets_and_rendered_views() {
        let report = sample();
        assert_eq!(report.found_sheets(), 1);
        assert_eq!(report.rendered_views(), 1);
    }

    #[test]
    fn text_lines_explain_each_outcome() {
        let lines = sample().lines();
        assert_eq!(lines[0], "Sheets in anexo.xlsx:");
        assert!(lines[1].contains("pattern Dic-Nov, 3 periods, latest: Dic22-Nov23 (E13)"));
        assert!(lines[2].ends_with("Ocu TN_Posocu - not found"));
        assert!(lines[4].contains("H4_Rama (2 periods): Dic21-Nov22, Dic22-Nov23"));
        assert!(lines[5].contains("skipped, source sheet not found"));
    }

    #[test]
    fn json_keeps_layout_order_and_tags_status() {
        let json = serialize_to_json(&sample()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["sheets"]["Ocu TN_Rama"]["status"], "found");
        assert_eq!(value["sheets"]["Ocu TN_Rama"]["periods"], 3);
        assert_eq!(value["sheets"]["Ocu TN_Posocu"]["status"], "missing");
        assert_eq!(value["views"]["H5_Posocu"]["reason"], "sheet_missing");
        assert!(value.get("output").is_none());

        let rama = json.find("Ocu TN_Rama").unwrap();
        let posocu = json.find("Ocu TN_Posocu").unwrap();
        assert!(rama < posocu);
    }
}
