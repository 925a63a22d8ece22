//! Tracing subscriber setup.
//!
//! Logs go to stderr so that command output on stdout stays clean. When
//! `WCABOT_LOG_DIR` is set, a daily-rotated file sink is added as well.

use std::path::PathBuf;
use std::sync::{Once, OnceLock};

use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LEVEL_VAR: &str = "WCABOT_LOG_LEVEL";
const DIR_VAR: &str = "WCABOT_LOG_DIR";
const DEFAULT_LEVEL: &str = "info";

static INIT_LOGGING: Once = Once::new();
static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn build_file_appender() -> Option<(RollingFileAppender, PathBuf)> {
    let log_dir = PathBuf::from(std::env::var_os(DIR_VAR)?);
    if let Err(err) = std::fs::create_dir_all(&log_dir) {
        eprintln!(
            "[wcabot][WARN] Failed to create log directory {}: {}",
            log_dir.display(),
            err
        );
        return None;
    }

    Some((
        RollingFileAppender::new(Rotation::DAILY, &log_dir, "wcabot.log"),
        log_dir,
    ))
}

/// Install the global subscriber. Later calls are no-ops.
///
/// `RUST_LOG` wins over `WCABOT_LOG_LEVEL`; both fall back to `info`.
pub fn init_logging() {
    INIT_LOGGING.call_once(|| {
        let (file_layer, log_dir) = match build_file_appender() {
            Some((appender, dir)) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);
                let layer = fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .with_timer(UtcTime::rfc_3339())
                    .with_writer(non_blocking);
                LOG_GUARD.set(guard).ok();
                (Some(layer), Some(dir))
            }
            None => (None, None),
        };

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| {
                EnvFilter::try_new(
                    std::env::var(LEVEL_VAR).unwrap_or_else(|_| DEFAULT_LEVEL.into()),
                )
            })
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

        let stderr_layer = fmt::layer()
            .with_target(true)
            .with_ansi(console::colors_enabled_stderr())
            .with_timer(UtcTime::rfc_3339())
            .with_writer(std::io::stderr);

        let registry = tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer);
        let installed = match file_layer {
            Some(file_layer) => registry.with(file_layer).try_init(),
            None => registry.try_init(),
        };
        if installed.is_err() {
            return;
        }

        match log_dir {
            Some(dir) => info!("Logging to stderr and daily files under {}", dir.display()),
            None => tracing::debug!("Logging to stderr only"),
        }
    });
}

/// Log a failure that is about to be reported to the user.
pub fn report_failure(context: &str, err: &anyhow::Error) {
    warn!("{} failed: {:#}", context, err);
}
