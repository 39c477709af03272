//! Logging utilities wrapping `tracing` initialisation
//!
//! Log output goes to stderr; stdout is reserved for the confirmation lines.

use crate::config::{LogRotation, LoggingOptions};
use crate::error::{Error, Result};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use tracing::Subscriber;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_appender::rolling;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// Initialise the global tracing subscriber according to the provided logging options.
///
/// When a log file is configured the returned guard owns its background writer.
/// Keep it alive until the last event has been emitted; dropping it flushes the
/// file. Subsequent calls are ignored to avoid reinitialisation panics.
pub fn init(options: &LoggingOptions) -> Result<Option<WorkerGuard>> {
    if tracing::dispatcher::has_been_set() {
        return Ok(None);
    }

    let env_filter = EnvFilter::try_new(options.level.as_str())
        .map_err(|e| Error::Config(format!("Invalid log level '{}': {e}", options.level)))?;

    match file_layer::<LayeredEnvFilter>(options)? {
        Some((file_layer, guard)) => {
            Registry::default()
                .with(env_filter)
                .with(file_layer)
                .with(stderr_layer::<_>(options.color))
                .try_init()
                .map_err(|e| {
                    Error::Config(format!("Failed to install tracing subscriber: {e}"))
                })?;
            Ok(Some(guard))
        }
        None => {
            Registry::default()
                .with(env_filter)
                .with(stderr_layer::<LayeredEnvFilter>(options.color))
                .try_init()
                .map_err(|e| {
                    Error::Config(format!("Failed to install tracing subscriber: {e}"))
                })?;
            Ok(None)
        }
    }
}

type LayeredEnvFilter = Layered<EnvFilter, Registry>;
type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

fn file_layer<S>(options: &LoggingOptions) -> Result<Option<(BoxedLayer<S>, WorkerGuard)>>
where
    S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync + 'static,
{
    let path = match options.file.as_ref() {
        Some(path) => path,
        None => return Ok(None),
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| {
        Error::Config(format!(
            "Failed to create log directory {}: {e}",
            dir.display()
        ))
    })?;

    let (non_blocking, guard) = match options.rotation {
        Some(rotation) => {
            let file_name = path.file_name().ok_or_else(|| {
                Error::Config(format!(
                    "Log file path '{}' must include a filename when rotation is enabled",
                    path.display()
                ))
            })?;

            let appender = match rotation {
                LogRotation::Hourly => rolling::hourly(dir, file_name),
                LogRotation::Daily => rolling::daily(dir, file_name),
            };

            non_blocking::NonBlockingBuilder::default()
                .lossy(false)
                .finish(appender)
        }
        None => {
            let file = OpenOptions::new()
                .append(true)
                .create(true)
                .open(path)
                .map_err(|e| {
                    Error::Config(format!("Failed to open log file {}: {e}", path.display()))
                })?;

            non_blocking::NonBlockingBuilder::default()
                .lossy(false)
                .finish(file)
        }
    };
    let layer = fmt::layer()
        .with_timer(UtcTime::rfc_3339())
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_target(true)
        .with_level(true)
        .boxed();

    Ok(Some((layer, guard)))
}

fn stderr_layer<S>(color: bool) -> BoxedLayer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync + 'static,
{
    fmt::layer()
        .with_timer(UtcTime::rfc_3339())
        .with_writer(io::stderr)
        .with_ansi(color)
        .with_target(true)
        .with_level(true)
        .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_level() {
        let options = LoggingOptions {
            level: "siteqr=loud".to_string(),
            ..Default::default()
        };
        assert!(matches!(init(&options), Err(Error::Config(_))));
    }

    #[test]
    fn test_file_layer_absent_without_path() {
        let options = LoggingOptions::default();
        assert!(file_layer::<LayeredEnvFilter>(&options).unwrap().is_none());
    }

    #[test]
    fn test_file_layer_flushes_when_guard_drops() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logs/siteqr.log");
        let options = LoggingOptions {
            level: "info".to_string(),
            file: Some(path.clone()),
            ..Default::default()
        };

        let (layer, guard) = file_layer::<LayeredEnvFilter>(&options).unwrap().unwrap();
        let subscriber = Registry::default()
            .with(EnvFilter::new("info"))
            .with(layer);
        {
            let _default = subscriber.set_default();
            tracing::info!("QR generation complete");
        }
        drop(guard);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("QR generation complete"));
    }
}
