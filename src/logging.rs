//! Tracing setup for the binary.
//!
//! Console events always go to stderr so stdout stays reserved for status lines
//! and file contents. An optional log file gets its own non-blocking layer; a
//! file path with a symlinked ancestor is refused and logging falls back to
//! stderr only.

use anyhow::Result;
use chrono::Local;
use guardfs::output as out;
use guardfs::platform::open_log_file_secure_append;
use guardfs::{path_has_symlink_ancestor, GuardFsError, LogLevel};
use std::fmt as stdfmt;
use std::io;
use std::path::Path;
use tracing::warn;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::registry::Registry;
use tracing_subscriber::util::SubscriberInitExt;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// DD/MM/YY HH:MM:SS in local time.
struct LocalHumanTime;

impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tsfmt::format::Writer<'_>) -> stdfmt::Result {
        write!(w, "{}", Local::now().format("%d/%m/%y %H:%M:%S"))
    }
}

/// Each user-facing level opens one tracing level further than its name.
fn filter_for(lvl: LogLevel) -> EnvFilter {
    let directive = match lvl {
        LogLevel::Quiet => "error",
        LogLevel::Normal => "info",
        LogLevel::Info => "debug",
        LogLevel::Debug => "trace",
    };
    EnvFilter::new(directive)
}

fn console_layer(json: bool) -> BoxedLayer {
    let base = tsfmt::layer()
        .with_timer(LocalHumanTime)
        .with_target(true)
        .with_writer(io::stderr);
    if json {
        base.json().boxed()
    } else {
        base.compact().boxed()
    }
}

fn file_layer(writer: NonBlocking, json: bool) -> BoxedLayer {
    let base = tsfmt::layer()
        .with_timer(LocalHumanTime)
        .with_target(true)
        .with_ansi(false)
        .with_writer(writer);
    if json {
        base.json().boxed()
    } else {
        base.compact().boxed()
    }
}

fn open_log_writer(path: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    if path_has_symlink_ancestor(path)? {
        return Err(GuardFsError::LogPathSymlink(path.to_path_buf()).into());
    }
    let file = open_log_file_secure_append(path)?;
    Ok(tracing_appender::non_blocking(file))
}

/// Install the global subscriber. The returned guard flushes the file layer
/// when dropped, so the caller keeps it alive until exit.
pub fn init_tracing(
    lvl: LogLevel,
    log_file: Option<&Path>,
    json: bool,
) -> Result<Option<WorkerGuard>> {
    let mut layers: Vec<BoxedLayer> = vec![console_layer(json)];
    let mut guard = None;
    let mut refused = None;

    if let Some(path) = log_file {
        match open_log_writer(path) {
            Ok((writer, g)) => {
                layers.push(file_layer(writer, json));
                guard = Some(g);
            }
            Err(e) => {
                out::print_warn(&format!(
                    "File logging to '{}' was not enabled ({e:#}). Logs will continue to stderr.",
                    path.display()
                ));
                refused = Some(e);
            }
        }
    }

    Registry::default()
        .with(layers)
        .with(filter_for(lvl))
        .init();

    if let Some(e) = refused {
        match e.downcast_ref::<GuardFsError>() {
            Some(typed) => warn!(code = typed.code(), kind = typed.kind(), error = %typed, "Log file refused"),
            None => warn!(error = %e, "Log file could not be opened"),
        }
    }
    Ok(guard)
}
