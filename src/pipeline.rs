use indexmap::IndexMap;
use tracing::{info, warn};

use crate::config::{Layout, PeriodCounts, SheetSpec, ViewSpec};
use crate::excel::Workbook;
use crate::filter::{filter_sheet, FilteredTable};
use crate::period::find_latest_pattern;
use crate::report::{RunReport, SheetReport, SheetStatus, SkipReason, ViewReport, ViewStatus};
use crate::utils::{cell_reference, index_to_col_name};

/// A view ready for the formatting sink.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedView {
    pub spec: ViewSpec,
    pub filtered: FilteredTable,
}

#[derive(Debug, Clone)]
pub struct Processed {
    pub views: Vec<RenderedView>,
    pub report: RunReport,
}

/// Looks up every configured sheet and records whether it has periods.
pub fn scan_workbook(workbook: &Workbook, layout: &Layout) -> IndexMap<String, SheetReport> {
    let mut reports = IndexMap::with_capacity(layout.sheets.len());

    for spec in &layout.sheets {
        let status = scan_sheet(workbook, spec);
        match &status {
            SheetStatus::Found {
                pattern,
                periods,
                latest_label,
                ..
            } => info!(sheet = %spec.sheet_name, %pattern, periods, latest = %latest_label, "periods found"),
            SheetStatus::NoPeriods => warn!(sheet = %spec.sheet_name, row = spec.period_row, "no periods found"),
            SheetStatus::Missing => warn!(sheet = %spec.sheet_name, "sheet not found"),
        }

        reports.insert(
            spec.sheet_name.clone(),
            SheetReport {
                short_name: spec.short_name.clone(),
                period_row: spec.period_row,
                status,
            },
        );
    }

    reports
}

fn scan_sheet(workbook: &Workbook, spec: &SheetSpec) -> SheetStatus {
    let Some(sheet) = workbook.sheet(&spec.sheet_name) else {
        return SheetStatus::Missing;
    };

    let Some(found) = find_latest_pattern(sheet, spec.period_row) else {
        return SheetStatus::NoPeriods;
    };

    match found.latest() {
        Some((column, label)) => SheetStatus::Found {
            pattern: found.pattern.to_string(),
            periods: found.len(),
            latest_label: label.to_string(),
            latest_cell: cell_reference(spec.period_row, column),
        },
        None => SheetStatus::NoPeriods,
    }
}

/// Runs the sheet filter once per view, in layout order. Views whose source
/// is missing or has no periods are skipped and reported.
pub fn render_views(
    workbook: &Workbook,
    layout: &Layout,
    counts: PeriodCounts,
) -> (Vec<RenderedView>, IndexMap<String, ViewReport>) {
    let mut views = Vec::with_capacity(layout.views.len());
    let mut reports = IndexMap::with_capacity(layout.views.len());

    for view in &layout.views {
        let requested = counts.resolve(view.periods);

        let outcome = layout
            .sheet_by_short_name(&view.source)
            .and_then(|spec| workbook.sheet(&spec.sheet_name).map(|sheet| (spec, sheet)))
            .ok_or(SkipReason::SheetMissing)
            .and_then(|(spec, sheet)| {
                filter_sheet(sheet, spec.period_row, requested).ok_or(SkipReason::NoPeriods)
            });

        let status = match outcome {
            Ok(filtered) => {
                info!(view = %view.title, periods = filtered.period_count(), requested, "view rendered");
                let status = ViewStatus::Rendered {
                    pattern: filtered.pattern.to_string(),
                    labels: filtered.labels.clone(),
                    source_columns: filtered
                        .source_columns
                        .iter()
                        .skip(1)
                        .map(|&col| index_to_col_name(col))
                        .collect(),
                };
                views.push(RenderedView {
                    spec: view.clone(),
                    filtered,
                });
                status
            }
            Err(reason) => {
                warn!(view = %view.title, source = %view.source, %reason, "view skipped");
                ViewStatus::Skipped { reason }
            }
        };

        reports.insert(
            view.title.clone(),
            ViewReport {
                source: view.source.clone(),
                requested,
                status,
            },
        );
    }

    (views, reports)
}

/// Scans the sheets and renders the views of one workbook.
pub fn process_workbook(workbook: &Workbook, layout: &Layout, counts: PeriodCounts) -> Processed {
    let sheets = scan_workbook(workbook, layout);
    let (views, view_reports) = render_views(workbook, layout, counts);

    Processed {
        views,
        report: RunReport {
            input: workbook.get_file_path().display().to_string(),
            sheets,
            views: view_reports,
            output: None,
        },
    }
}
