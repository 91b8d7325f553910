// logging module - file-only tracing, since the terminal belongs to the viewer
// Filter: CODE_CANVAS_LOG, then RUST_LOG, else warn.
// Default file: <data_local_dir>/code-canvas/logs/code-canvas.log
use std::env;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

const DEFAULT_FILE_NAME: &str = "code-canvas.log";

/// Must be held for the lifetime of the program; dropping it flushes the file writer.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

pub fn init(log_file: Option<&Path>) -> Result<LogGuard, Box<dyn std::error::Error + Send + Sync>> {
    let (dir, name) = resolve_log_path(log_file);
    std::fs::create_dir_all(&dir)?;

    let appender = tracing_appender::rolling::never(&dir, &name);
    let (writer, file_guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_filter(create_filter());

    Registry::default().with(layer).try_init()?;

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file: dir.join(name),
    })
}

fn resolve_log_path(override_path: Option<&Path>) -> (PathBuf, String) {
    if let Some(path) = override_path {
        if path.extension().is_some() {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());
            return (dir.to_path_buf(), name);
        }
        return (path.to_path_buf(), DEFAULT_FILE_NAME.to_string());
    }

    let dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("code-canvas")
        .join("logs");
    (dir, DEFAULT_FILE_NAME.to_string())
}

fn create_filter() -> EnvFilter {
    let directive = env::var("CODE_CANVAS_LOG")
        .or_else(|_| env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());
    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_override_splits_dir_and_name() {
        let (dir, name) = resolve_log_path(Some(Path::new("/tmp/logs/viewer.log")));
        assert_eq!(dir, PathBuf::from("/tmp/logs"));
        assert_eq!(name, "viewer.log");
    }

    #[test]
    fn directory_override_uses_default_name() {
        let (dir, name) = resolve_log_path(Some(Path::new("/tmp/logs")));
        assert_eq!(dir, PathBuf::from("/tmp/logs"));
        assert_eq!(name, DEFAULT_FILE_NAME);
    }
}
