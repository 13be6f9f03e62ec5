use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Env var naming the log file.
pub const LOG_PATH_ENV: &str = "ANTIFLOW_LOG";

/// Where log output may go for the running front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// Interactive UI owns the terminal; only file logging is allowed.
    Interactive,
    /// Plain commands may log to stderr when `RUST_LOG` is set.
    Plain,
}

/// Initialize tracing.
///
/// With `ANTIFLOW_LOG` set, logs go to `{path}.{timestamp}.{pid}` so
/// concurrent runs never share a file. Otherwise logging stays off, except
/// in plain mode with `RUST_LOG` set, which logs to stderr.
pub fn init_tracing(mode: LogMode) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Ok(log_path) = std::env::var(LOG_PATH_ENV) {
        let unique_path = unique_log_path(&log_path);
        let Ok(file) = std::fs::File::create(&unique_path) else {
            eprintln!("Warning: Failed to create log file: {}", unique_path);
            return;
        };

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

    if mode == LogMode::Plain && std::env::var_os("RUST_LOG").is_some() {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true);

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .try_init();
    }
}

fn unique_log_path(base: &str) -> String {
    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}.{}.{}", base, timestamp, pid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_gets_pid_suffix() {
        let path = unique_log_path("/tmp/antiflow.log");
        assert!(path.starts_with("/tmp/antiflow.log."));
        assert!(path.ends_with(&format!(".{}", std::process::id())));
    }
}
