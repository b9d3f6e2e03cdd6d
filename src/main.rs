use anyhow::{Context, Result};
use clap::builder::TypedValueParser;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use anexo_filter::app;
use anexo_filter::config::{Layout, PeriodCounts, DEFAULT_CHART_PERIODS, DEFAULT_TABLE_PERIODS};
use anexo_filter::excel;
use anexo_filter::export;
use anexo_filter::pipeline;
use anexo_filter::report::serialize_to_json;
use anexo_filter::ui;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Annex workbook path (.xlsx, .xlsm, .xls or .ods)
    #[arg(required = true)]
    file_path: PathBuf,

    /// Output workbook path
    #[arg(long, short = 'o', default_value = "anexo_filtrado.xlsx")]
    output: PathBuf,

    /// Trailing periods kept by chart views
    #[arg(long, short = 'c', default_value_t = DEFAULT_CHART_PERIODS, value_parser = clap::value_parser!(u16).range(1..).map(usize::from))]
    chart_periods: usize,

    /// Trailing periods kept by table views
    #[arg(long, short = 't', default_value_t = DEFAULT_TABLE_PERIODS, value_parser = clap::value_parser!(u16).range(1..).map(usize::from))]
    table_periods: usize,

    /// JSON file describing the sheets to read and the views to render
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Print the run report as JSON to stdout
    #[arg(long, short = 'j')]
    json: bool,

    /// Browse the rendered views in the terminal after writing
    #[arg(long, short = 'p')]
    preview: bool,

    /// Scan and report without writing the output workbook
    #[arg(long)]
    dry_run: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.preview && !std::io::stdout().is_terminal() {
        anyhow::bail!("--preview needs an interactive terminal on stdout");
    }

    let layout = match &cli.layout {
        Some(path) => Layout::from_file(path)
            .with_context(|| format!("Unable to load layout: {}", path.display()))?,
        None => Layout::default(),
    };
    let counts = PeriodCounts {
        chart: cli.chart_periods,
        table: cli.table_periods,
    };

    let workbook = excel::open_workbook(&cli.file_path)?;
    info!(file = %cli.file_path.display(), sheets = workbook.get_sheet_names().len(), "workbook opened");

    let pipeline::Processed { views, mut report } =
        pipeline::process_workbook(&workbook, &layout, counts);

    if !cli.dry_run && !views.is_empty() {
        export::write_views(&views, &cli.output)
            .with_context(|| format!("Unable to write {}", cli.output.display()))?;
        report.output = Some(cli.output.display().to_string());
    }

    if cli.json {
        println!("{}", serialize_to_json(&report)?);
    } else {
        for line in report.lines() {
            println!("{}", line);
        }
    }

    if views.is_empty() {
        anyhow::bail!("No valid sheets to filter in {}", cli.file_path.display());
    }

    if cli.preview {
        let app_state = app::AppState::new(views, cli.output);
        ui::run_app(app_state)?;
    }

    Ok(())
}
