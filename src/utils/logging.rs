use std::{path::Path, sync::LazyLock};

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::{
    fmt::{format::FmtSpan, writer::MakeWriterExt},
    EnvFilter,
};

pub const CLI_PREFIX: &str = "cli";

const DEFAULT_LEVEL: &str = "info";
const MAX_LOG_FILES: usize = 5;

/// Logs go into daily rotated files under `<application_data_path>/logs`. Console output goes to
/// stderr, so that it doesn't mix with pages printed to stdout.
pub fn enable_logging(
    prefix: &str,
    application_data_path: &Path,
    log_level: Option<LevelFilter>,
    show_std: bool,
) -> Result<()> {
    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(MAX_LOG_FILES)
        .filename_prefix(prefix)
        .build(application_data_path.join("logs"))?;

    let stderr = std::io::stderr.with_filter(move |_| show_std);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(crate_directive(
            log_level,
            std::env::var("RUST_LOG").ok(),
        )))
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(stderr.and(appender))
        .pretty()
        .init();
    Ok(())
}

/// Only events of this crate are logged. An explicit level wins over `RUST_LOG`.
fn crate_directive(log_level: Option<LevelFilter>, env_level: Option<String>) -> String {
    let level = log_level
        .map(|v| v.to_string())
        .or(env_level)
        .unwrap_or_else(|| DEFAULT_LEVEL.into());

    format!("{}={level}", env!("CARGO_PKG_NAME").replace("-", "_"))
}

pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .pretty()
        .init()
});
