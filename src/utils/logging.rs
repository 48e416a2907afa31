use std::fs;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{filter::Targets, fmt, fmt::time::UtcTime, prelude::*, EnvFilter};

/// Installs the global subscriber: a JSON service log, a JSON perf log fed by
/// `target: "perf"` events, and a compact console layer.
pub fn setup_logging(log_dir: &str, svc: &str) -> anyhow::Result<(WorkerGuard, WorkerGuard)> {
    // -----------------------
    // Normal Logs
    // -----------------------
    let normal_log_dir = format!("{}/{}", log_dir, svc);
    fs::create_dir_all(&normal_log_dir)?;
    let normal_file_name = format!("{}.log", svc);
    let (normal_writer, normal_guard) =
        tracing_appender::non_blocking(rolling::daily(normal_log_dir, normal_file_name));

    let normal_layer = fmt::layer()
        .with_writer(normal_writer)
        .json()
        .with_timer(UtcTime::rfc_3339())
        .with_target(true)
        .with_thread_ids(false)
        .with_filter(EnvFilter::new("info"));

    // -----------------------
    // Performance Logs
    // -----------------------
    let perf_log_dir = format!("{}/perf", log_dir);
    fs::create_dir_all(&perf_log_dir)?;
    let perf_file_name = format!("{}_perf.log", svc);
    let (perf_writer, perf_guard) =
        tracing_appender::non_blocking(rolling::daily(perf_log_dir, perf_file_name));

    let perf_layer = fmt::layer()
        .with_writer(perf_writer)
        .json()
        .with_timer(UtcTime::rfc_3339())
        .with_target(true)
        .with_filter(Targets::new().with_target("perf", tracing::Level::INFO));

    // -----------------------
    // Console Layer
    // -----------------------
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console_layer = fmt::layer()
        .compact()
        .with_timer(UtcTime::rfc_3339())
        .with_target(true)
        .with_thread_ids(false)
        .with_filter(console_filter);

    tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(normal_layer)
            .with(perf_layer)
            .with(console_layer),
    )?;

    Ok((normal_guard, perf_guard))
}
