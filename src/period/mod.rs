mod detector;
mod pattern;

pub use detector::{find_latest_pattern, latest_label, PeriodLabel, PeriodMatch};
pub use pattern::PeriodPattern;
