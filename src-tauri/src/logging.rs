use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    sync::{Mutex, OnceLock},
};

use crate::{LOG_ROTATE_MAX_BYTES, NETWORK_LOG_FILE, SHELL_LOG_FILE, STARTUP_LOG_FILE};

static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();
static LOG_WRITE_LOCK: Mutex<()> = Mutex::new(());

/// Sets the directory category logs are written to. Only the first call wins;
/// lines logged before this point go to stderr only.
pub(crate) fn init_log_dir(dir: PathBuf) -> bool {
    LOG_DIR.set(dir).is_ok()
}

pub(crate) fn resolve_shell_log_path(log_dir: Option<&Path>, file_name: &str) -> Option<PathBuf> {
    log_dir.map(|dir| dir.join(file_name))
}

fn format_log_line(message: &str) -> String {
    format!(
        "[{}] {}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        message
    )
}

fn rotate_if_oversized(path: &Path, max_bytes: u64) -> Result<(), String> {
    let size = match fs::metadata(path) {
        Ok(metadata) => metadata.len(),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(error) => {
            return Err(format!(
                "Failed to stat log file {}: {}",
                path.display(),
                error
            ))
        }
    };
    if size < max_bytes {
        return Ok(());
    }

    let mut rotated = path.as_os_str().to_owned();
    rotated.push(".1");
    fs::rename(path, PathBuf::from(rotated))
        .map_err(|error| format!("Failed to rotate log file {}: {}", path.display(), error))
}

pub(crate) fn append_log_line(path: &Path, message: &str, max_bytes: u64) -> Result<(), String> {
    if let Some(parent_dir) = path.parent() {
        fs::create_dir_all(parent_dir).map_err(|error| {
            format!(
                "Failed to create log directory {}: {}",
                parent_dir.display(),
                error
            )
        })?;
    }

    rotate_if_oversized(path, max_bytes)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| format!("Failed to open log file {}: {}", path.display(), error))?;
    file.write_all(format_log_line(message).as_bytes())
        .map_err(|error| format!("Failed to write log file {}: {}", path.display(), error))
}

fn append_category_log(file_name: &str, message: &str) {
    if cfg!(debug_assertions) {
        eprintln!("[{file_name}] {message}");
    }

    let Some(path) = resolve_shell_log_path(LOG_DIR.get().map(PathBuf::as_path), file_name) else {
        return;
    };

    let _guard = LOG_WRITE_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Err(error) = append_log_line(&path, message, LOG_ROTATE_MAX_BYTES) {
        eprintln!("{error}");
    }
}

pub(crate) fn append_shell_log(message: &str) {
    append_category_log(SHELL_LOG_FILE, message);
}

pub(crate) fn append_startup_log(message: &str) {
    append_category_log(STARTUP_LOG_FILE, message);
}

pub(crate) fn append_network_log(message: &str) {
    append_category_log(NETWORK_LOG_FILE, message);
}
