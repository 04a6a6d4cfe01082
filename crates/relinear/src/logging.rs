//! Logger setup for the command-line tool.
//!
//! Log lines go to stderr; stdout carries only the rendered automaton.

use anyhow::Result;
use flexi_logger::{DeferredNow, Logger, LoggerHandle, WriteMode, style};
use log::Record;

/// Level used when neither `--log-level` nor `RUST_LOG` is given.
pub const DEFAULT_LOG_SPEC: &str = "warn";

fn stage_format(
    w: &mut dyn std::io::Write,
    _now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    let level = record.level();
    write!(
        w,
        "{} [{}] {}",
        style(level).paint(level.to_string()),
        record.module_path().unwrap_or("<unnamed>"),
        record.args()
    )
}

/// Start logging. An explicit `spec` wins over `RUST_LOG`, which wins over
/// [`DEFAULT_LOG_SPEC`]. Keep the returned handle alive while logging.
pub fn init_log(spec: Option<&str>) -> Result<LoggerHandle> {
    let logger = match spec {
        Some(spec) => Logger::try_with_str(spec)?,
        None => Logger::try_with_env_or_str(DEFAULT_LOG_SPEC)?,
    };
    let handle = logger
        .format(stage_format)
        .write_mode(WriteMode::Direct)
        .start()?;
    Ok(handle)
}
