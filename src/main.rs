//! Batch entry point: load the source CSVs, build the vendor sales summary
//! and persist it.
//!
//! Configured through the environment (or a `.env` file):
//! `VENDOR_SUMMARY_DB`, `VENDOR_SUMMARY_DATA_DIR`, `LOG_FILE_PATH`.

use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use vendor_summary::config::PipelineConfig;
use vendor_summary::VendorSummaryPipeline;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = PipelineConfig::from_env();

    // Logging: stderr plus an append-only log file
    let log_dir = config
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = config
        .log_file
        .file_name()
        .unwrap_or(OsStr::new("get_vendor_summary.log"));
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("info")));

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(non_blocking_file)
        .with_filter(
            EnvFilter::try_from_env("RUST_LOG_FILE").unwrap_or_else(|_| EnvFilter::new("debug")),
        );

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    let pipeline = VendorSummaryPipeline::builder()
        .config(&config)
        .build()
        .with_context(|| format!("opening database {}", config.database.display()))?;
    info!(%pipeline, "Starting vendor summary run");

    let report = match pipeline.run() {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Vendor summary run failed");
            return Err(e.into());
        }
    };
    info!(
        datasets = report.loaded.len(),
        summary_rows = report.summary_rows,
        "Vendor summary run finished"
    );

    pipeline.close().context("closing database")?;
    Ok(())
}
