//! Bankweb main entry point

use anyhow::Context;
use bankweb_api::start_server;
use bankweb_config::{Config, ConfigError, ConfigErrorSeverity, ConfigResult};
use bankweb_core::{CoreError, ErrorSeverity, TransactionHistory};
use bankweb_parser::{JsonRecordSource, RecordSourceRef};
use bankweb_utils::{ClockRef, SystemClock};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::RwLock;

#[derive(Parser, Debug)]
#[command(name = "bankweb")]
#[command(author = "Bankweb Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Transaction history page for the bankweb front end", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Transaction data file (overrides the configured path)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Port to listen on (overrides the configured port)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print the default configuration file and exit
    #[arg(long)]
    print_default_config: bool,
}

/// Apply command-line overrides, then re-check the result
fn apply_overrides(config: &mut Config, args: &Args) -> ConfigResult<()> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(data) = &args.data {
        if let Some(dir) = data.parent() {
            config.data.path = dir.to_path_buf();
        }
        if let Some(file) = data.file_name() {
            config.data.transactions_file = file.to_string_lossy().into_owned();
        }
    }
    config.validate()
}

fn report_config_error(error: &ConfigError) {
    let details = error.to_details();
    match error.severity() {
        ConfigErrorSeverity::Warning => log::warn!("{}", details),
        ConfigErrorSeverity::Error => log::error!("{}", details),
    }
}

fn report_core_error(error: &CoreError) {
    let details = error.to_details();
    match error.severity() {
        ErrorSeverity::Warning => log::warn!("{}", details),
        ErrorSeverity::Error => log::error!("{}", details),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let loaded = Config::load(&args.config);
    let level = match &loaded {
        Ok(config) => config.logging.level.clone(),
        Err(_) => "info".to_string(),
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut config = match loaded {
        Ok(config) => config,
        Err(e) if e.severity() == ConfigErrorSeverity::Warning => {
            report_config_error(&e);
            log::warn!("Using default configuration");
            Config::default()
        }
        Err(e) => {
            report_config_error(&e);
            return Err(e).with_context(|| format!("Failed to load {}", args.config.display()));
        }
    };

    if let Err(e) = apply_overrides(&mut config, &args) {
        report_config_error(&e);
        return Err(e).context("Invalid command-line override");
    }
    let data_path = config.transactions_path();

    let rt = Runtime::new()?;
    rt.block_on(async {
        let clock: ClockRef = Arc::new(SystemClock);
        let source: RecordSourceRef = Arc::new(JsonRecordSource);
        log::info!("Looking for transaction data: {}", data_path.display());

        let history = match TransactionHistory::load(source.as_ref(), data_path, clock.clone()).await {
            Ok(history) => history,
            Err(e) if e.severity() == ErrorSeverity::Warning => {
                report_core_error(&e);
                log::warn!("Serving an empty history");
                TransactionHistory::empty(clock)
            }
            Err(e) => {
                report_core_error(&e);
                return Err(e).context("Failed to load transaction data");
            }
        };
        log::info!("Transaction history ready with {} records", history.len());

        start_server(config, Arc::new(RwLock::new(history)))
            .await
            .context("Server error")
    })
}
