use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming a log file.
pub const LOG_FILE_ENV: &str = "PLAYGROUND_LOG";

/// Initialize tracing.
///
/// - `PLAYGROUND_LOG=<path>` writes to `{path}.{timestamp}.{pid}` so that
///   parallel runs never share a file.
/// - Otherwise logs go to stderr: warnings only, or debug with `verbose`.
///
/// `RUST_LOG` overrides the level in both cases.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "playground=debug,info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if let Ok(log_path) = std::env::var(LOG_FILE_ENV) {
        let pid = std::process::id();
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let unique_path = format!("{}.{}.{}", log_path, timestamp, pid);

        match std::fs::File::create(&unique_path) {
            Ok(file) => {
                let file_layer = fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_level(true);

                let _ = tracing_subscriber::registry()
                    .with(filter)
                    .with(file_layer)
                    .try_init();
                return;
            }
            Err(e) => {
                eprintln!("Warning: Failed to create log file {}: {}", unique_path, e);
            }
        }
    }

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_level(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}
