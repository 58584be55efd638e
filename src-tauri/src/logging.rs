use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

fn env_filter(configured: Option<&str>) -> EnvFilter {
    if let Some(filter) = configured {
        EnvFilter::new(filter)
    } else if let Ok(from_env) = EnvFilter::try_from_default_env() {
        from_env
    } else if cfg!(debug_assertions) {
        EnvFilter::new("info,luxe_salon_lib=debug")
    } else {
        EnvFilter::new("warn,luxe_salon_lib=info")
    }
}

/// Logs to stderr only; stdout carries bridge replies when running headless.
pub fn init(configured: Option<&str>) {
    let stderr_layer = fmt::layer()
        .with_timer(LocalTimer)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(env_filter(configured))
        .with(stderr_layer)
        .try_init();
}

#[cfg(feature = "desktop")]
pub use desktop::{init_with_file, LogGuard};

#[cfg(feature = "desktop")]
mod desktop {
    use std::path::Path;

    use tracing_appender::non_blocking::WorkerGuard;
    use tracing_appender::rolling;
    use tracing_subscriber::{fmt, prelude::*};

    use super::{env_filter, LocalTimer};

    /// Keeps the file writer flushing for as long as the app runs.
    pub struct LogGuard(pub WorkerGuard);

    /// Daily-rolling file under `log_dir` plus stdout.
    pub fn init_with_file(log_dir: &Path, configured: Option<&str>) -> std::io::Result<LogGuard> {
        std::fs::create_dir_all(log_dir)?;

        let file_appender = rolling::daily(log_dir, "luxe-salon.log");
        let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = fmt::layer()
            .with_timer(LocalTimer)
            .with_ansi(false)
            .with_target(true)
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_thread_ids(true)
            .with_writer(non_blocking_file);

        let stdout_layer = fmt::layer()
            .with_timer(LocalTimer)
            .with_ansi(true)
            .with_target(true)
            .with_level(true)
            .with_writer(std::io::stdout);

        let _ = tracing_subscriber::registry()
            .with(env_filter(configured))
            .with(file_layer)
            .with(stdout_layer)
            .try_init();

        tracing::info!(path = %log_dir.display(), "Tracing initialized");
        Ok(LogGuard(guard))
    }
}
