use std::path::PathBuf;
use thiserror::Error;

/// Failures that stop a run. Missing sheets and rows without periods are
/// not errors; they are reported per sheet.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("unable to parse workbook {}: {source}", .path.display())]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("no worksheets found in {}", .0.display())]
    EmptyWorkbook(PathBuf),

    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    #[error("invalid color {0:?}: expected six hex digits such as 375623")]
    InvalidColor(String),

    #[error("no view could be rendered, nothing to write")]
    NothingToWrite,

    #[error("failed to write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = FilterError> = std::result::Result<T, E>;
