use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter for `level`, used when `RUST_LOG` is not set.
pub fn default_filter(level: &str) -> String {
    format!("paramsweep={level},paramsweep_core=warn")
}

/// Initialize logging.
///
/// Events go to stderr so they never mix with the rows written to stdout, or
/// are appended to `log_file` when one is given. The log level can be
/// controlled via the `level` parameter or the `RUST_LOG` environment variable.
pub fn init_logging(level: &str, log_file: Option<&Path>) -> color_eyre::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    let registry = tracing_subscriber::registry().with(env_filter);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            registry
                .with(
                    fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_target(true),
                )
                .init();
            tracing::info!("logging initialized (log_path={})", path.display());
        }
        None => {
            registry
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true),
                )
                .init();
        }
    }

    Ok(())
}
