//! Leveled log sink behind the `log` facade.
//!
//! Every record at or above the configured minimum, and every untagged
//! (debug or trace) record regardless of it, is written three ways:
//! appended to `log/log.txt`, echoed to stderr through `env_logger`, and, for
//! `Error` records only, also appended to `log/sysser.txt`.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::str::FromStr;
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::paths::Paths;

/// Severity, lowest first.  `None` marks untagged records (debug/trace).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    None,
    Log,
    Warning,
    Error,
}

impl LogLevel {
    /// `<Warning>`-style tag; `None` has no tag.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            LogLevel::None => None,
            LogLevel::Log => Some("<Log>"),
            LogLevel::Warning => Some("<Warning>"),
            LogLevel::Error => Some("<Error>"),
        }
    }
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Error => LogLevel::Error,
            Level::Warn => LogLevel::Warning,
            Level::Info => LogLevel::Log,
            Level::Debug | Level::Trace => LogLevel::None,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(LogLevel::None),
            "log" | "info" => Ok(LogLevel::Log),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

/// `[2024-01-31 12:00:00] [<Warning>] -> message`, or `[ts] message` untagged.
pub fn format_line(timestamp: &str, level: LogLevel, message: &str) -> String {
    match level.tag() {
        Some(tag) => format!("[{timestamp}] [{tag}] -> {message}"),
        None => format!("[{timestamp}] {message}"),
    }
}

struct LogFiles {
    main: Option<File>,
    errors: Option<File>,
}

impl LogFiles {
    fn write(&mut self, level: LogLevel, line: &str) {
        if level == LogLevel::Error {
            if let Some(f) = self.errors.as_mut() {
                let _ = writeln!(f, "{line}");
            }
        }
        if let Some(f) = self.main.as_mut() {
            let _ = writeln!(f, "{line}");
        }
    }

    fn flush(&mut self) {
        for f in [self.main.as_mut(), self.errors.as_mut()].into_iter().flatten() {
            let _ = f.flush();
        }
    }
}

pub struct MenuLogger {
    min_level: LogLevel,
    console: env_logger::Logger,
    files: Mutex<LogFiles>,
}

impl MenuLogger {
    pub fn new(paths: &Paths, min_level: LogLevel) -> Self {
        let open = |path: std::path::PathBuf| {
            OpenOptions::new().create(true).append(true).open(&path)
                .map_err(|e| eprintln!("[log] cannot open {}: {e}", path.display()))
                .ok()
        };
        let console = env_logger::Builder::new()
            .filter_level(LevelFilter::Trace)
            .format(|buf, record| {
                let ts = timestamp();
                writeln!(buf, "{}", format_line(&ts, record.level().into(), &record.args().to_string()))
            })
            .build();

        Self {
            min_level,
            console,
            files: Mutex::new(LogFiles {
                main: open(paths.log_file()),
                errors: open(paths.error_log_file()),
            }),
        }
    }
}

fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

impl Log for MenuLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // Untagged records (debug, trace) are not subject to the minimum.
        let level = LogLevel::from(metadata.level());
        level == LogLevel::None || level >= self.min_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = LogLevel::from(record.level());
        let line = format_line(&timestamp(), level, &record.args().to_string());
        if let Ok(mut files) = self.files.lock() {
            files.write(level, &line);
        }
        self.console.log(record);
    }

    fn flush(&self) {
        if let Ok(mut files) = self.files.lock() {
            files.flush();
        }
        self.console.flush();
    }
}

/// Install the menu logger as the global `log` backend.
pub fn init(paths: &Paths, min_level: LogLevel) -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(MenuLogger::new(paths, min_level)))?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}
