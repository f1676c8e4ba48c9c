use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use convsync::{Config, PipelineError, PurchaseKind, QueryWindow, RunReport};
use convsync_source::MySqlSource;
use convsync_upload::{DryRunUploader, GraphUploader};

#[derive(Parser)]
#[command(name = "convsync", about = "Upload one day of purchases as hashed conversion events")]
struct Cli {
    /// TOML config file. Defaults to ./config.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Which event family to report.
    #[arg(long, value_enum, default_value_t = Family::All)]
    family: Family,

    /// Override `run.days_ago`.
    #[arg(long)]
    days_ago: Option<u32>,

    /// Fetch and transform, then print the batch instead of uploading it.
    #[arg(long)]
    dry_run: bool,

    /// Raise the default log level to debug.
    #[arg(long)]
    debug: bool,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Family {
    Offline,
    Online,
    All,
}

impl Family {
    fn kinds(self) -> &'static [PurchaseKind] {
        match self {
            Family::Offline => &[PurchaseKind::Offline],
            Family::Online => &[PurchaseKind::Online],
            Family::All => &PurchaseKind::ALL,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_tracing(&cli) {
        eprintln!("convsync: {err:#}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            eprintln!("convsync: {err:#}");
            let code = err
                .downcast_ref::<PipelineError>()
                .map(PipelineError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn run(cli: Cli) -> anyhow::Result<()> {
    let kinds = cli.family.kinds();

    let mut config = Config::load(cli.config.as_deref()).map_err(PipelineError::from)?;
    if let Some(days_ago) = cli.days_ago {
        config.run.days_ago = days_ago;
    }
    config.validate_database().map_err(PipelineError::from)?;
    if !cli.dry_run {
        config.validate_upload(kinds).map_err(PipelineError::from)?;
    }

    let window = QueryWindow::local(config.run.days_ago);
    let source = MySqlSource::connect_lazy(&config.database).map_err(PipelineError::from)?;

    if cli.dry_run {
        convsync::run(&config, kinds, &window, &source, &DryRunUploader, print_report).await?;
    } else {
        let uploader = GraphUploader::new();
        convsync::run(&config, kinds, &window, &source, &uploader, print_report).await?;
    }
    Ok(())
}

fn print_report(report: &RunReport) {
    tracing::info!(kind = %report.kind, events = report.events, "family reported");
    println!("{}", report.response);
}

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let default_level = if cli.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_env_filter(filter)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
        }
    }
    Ok(())
}
