//! Tracing initialization: fmt layer with full format (level, target, span, all fields) written
//! to a log file, optionally echoed to stdout.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};

/// Initializes the global tracing subscriber.
///
/// Log level comes from `RUST_LOG` (info, debug, trace...); defaults to info. Load `.env`
/// (dotenvy) before calling this or `RUST_LOG` from the file is not seen.
/// The terminal is the chat surface, so output goes to `log_file_path` only unless `echo_stdout`.
pub fn init_tracing(log_file_path: &str, echo_stdout: bool) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(log_file_path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    let file = Arc::new(file);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_thread_ids(true)
        .with_level(true)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false);

    let registry = Registry::default().with(env_filter);
    let result = if echo_stdout {
        use tracing_subscriber::fmt::writer::MakeWriterExt;
        registry
            .with(fmt_layer.with_writer(io::stdout.and(file)))
            .try_init()
    } else {
        registry.with(fmt_layer.with_writer(file)).try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}
