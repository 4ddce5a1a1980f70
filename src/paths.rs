use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::ResourceError;

pub const CONFIG_FILE: &str = "config.cfg";
pub const SAVES_FILE: &str = "saves.json";
pub const LOG_FILE: &str = "log.txt";
pub const ERROR_LOG_FILE: &str = "sysser.txt";

/// Resolves every file the menu reads or writes relative to one root.
///
/// Built once at startup and handed to the logger, the config store, the
/// save book and the asset cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Paths {
    root: PathBuf,
}

impl Paths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path { &self.root }
    pub fn config_dir(&self) -> PathBuf { self.root.join("config") }
    pub fn log_dir(&self) -> PathBuf { self.root.join("log") }
    pub fn assets_dir(&self) -> PathBuf { self.root.join("assets") }

    pub fn config_file(&self) -> PathBuf { self.config_dir().join(CONFIG_FILE) }
    pub fn saves_file(&self) -> PathBuf { self.config_dir().join(SAVES_FILE) }
    pub fn log_file(&self) -> PathBuf { self.log_dir().join(LOG_FILE) }
    pub fn error_log_file(&self) -> PathBuf { self.log_dir().join(ERROR_LOG_FILE) }

    /// Create the writable directories (`config/`, `log/`) if missing.
    pub fn ensure_dirs(&self) -> Result<(), ResourceError> {
        for dir in [self.config_dir(), self.log_dir()] {
            fs::create_dir_all(&dir).map_err(|e| ResourceError::io(&dir, e))?;
        }
        Ok(())
    }
}

/// Replace `path` with `contents` in one step.
///
/// The bytes go to a sibling temp file which is then renamed over the target,
/// so a reader never observes a half-written file.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), ResourceError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{file_name}.tmp"));

    let write = || -> std::io::Result<()> {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(contents)?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    };

    write().map_err(|e| {
        let _ = fs::remove_file(&tmp);
        ResourceError::io(path, e)
    })
}
