//! Logging Infrastructure
//!
//! Console logging, optionally mirrored to daily rotating files:
//! - `app/` application logs, the last [`MAX_APP_LOG_FILES`] days are kept
//! - `audit/` sale and pricing changes (target `audit`), kept indefinitely

use std::fs;
use std::path::Path;
use tracing::Subscriber;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, prelude::*};

/// Daily application log files kept on disk
pub const MAX_APP_LOG_FILES: usize = 14;

/// Initialize logging with optional file output
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug"); `RUST_LOG` wins when set
/// * `json_format` - JSON records instead of the pretty console format
/// * `log_dir` - Directory for rotating log files
///
/// # Examples
/// ```no_run
/// brecho_client::logger::init_logger_with_file("info", true, Some("./logs"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    let file_layers = match log_dir {
        Some(dir) => Some(file_layers(Path::new(dir), json_format)?),
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layers)
        .try_init()?;

    Ok(())
}

/// Initialize console-only logging
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync>;

fn file_layers<S>(log_dir: &Path, json_format: bool) -> anyhow::Result<Vec<BoxedLayer<S>>>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    let app_log_dir = log_dir.join("app");
    let audit_log_dir = log_dir.join("audit");
    fs::create_dir_all(&app_log_dir)?;
    fs::create_dir_all(&audit_log_dir)?;

    let app_log = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("app")
        .filename_suffix("log")
        .max_log_files(MAX_APP_LOG_FILES)
        .build(app_log_dir)?;
    let audit_log = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("audit")
        .filename_suffix("log")
        .build(audit_log_dir)?;

    let app_filter =
        tracing_subscriber::filter::filter_fn(|meta| meta.target() != "audit");
    let audit_filter =
        tracing_subscriber::filter::filter_fn(|meta| meta.target() == "audit");

    let layers = if json_format {
        vec![
            fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_writer(std::sync::Mutex::new(app_log))
                .with_filter(app_filter)
                .boxed(),
            fmt::layer()
                .json()
                .with_target(true)
                .with_writer(std::sync::Mutex::new(audit_log))
                .with_filter(audit_filter)
                .boxed(),
        ]
    } else {
        vec![
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(app_log))
                .with_filter(app_filter)
                .boxed(),
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(audit_log))
                .with_filter(audit_filter)
                .boxed(),
        ]
    };
    Ok(layers)
}

/// Audit record for a sale or pricing change
///
/// ```no_run
/// brecho_client::audit_log!("add_piece", "sale:42", "piece:7 x2");
/// ```
#[macro_export]
macro_rules! audit_log {
    ($action:expr, $resource:expr) => {
        tracing::info!(
            target: "audit",
            action = $action,
            resource = %$resource,
            "AUDIT"
        );
    };
    ($action:expr, $resource:expr, $details:expr) => {
        tracing::info!(
            target: "audit",
            action = $action,
            resource = %$resource,
            details = %$details,
            "AUDIT"
        );
    };
}
