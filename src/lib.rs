pub mod app;
pub mod config;
pub mod error;
pub mod excel;
pub mod export;
pub mod filter;
pub mod period;
pub mod pipeline;
pub mod report;
pub mod ui;
pub mod utils;
