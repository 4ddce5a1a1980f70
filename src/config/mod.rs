//! Persisted user preferences.
//!
//! The on-disk format is one `key = v1,v2,...` line per setting.  The store
//! keeps every key's raw token list in insertion order so that unknown keys
//! survive a load/save cycle, and exposes typed views over the four keys the
//! menu understands.  Every setter writes the whole file back immediately.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::{ResourceError, ValidationError};
use crate::paths::write_atomic;

pub const KEY_RESOLUTION: &str = "resolution";
pub const KEY_VOLUME: &str = "volume";
pub const KEY_FULLSCREEN: &str = "fullscreen";
pub const KEY_ANIMATED_BACKGROUND: &str = "animated_background";

pub const DEFAULT_RESOLUTION: Resolution = Resolution { width: 1080, height: 768 };
pub const DEFAULT_VOLUME: u8 = 100;
pub const DEFAULT_FULLSCREEN: bool = false;
pub const DEFAULT_ANIMATED_BACKGROUND: bool = true;

// ── Resolution ────────────────────────────────────────────────────────────────

/// Window size in pixels; both sides are non-zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Resolution {
    width: u32,
    height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Result<Self, ValidationError> {
        if width == 0 || height == 0 {
            return Err(ValidationError::InvalidResolution { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(self) -> u32 { self.width }
    pub fn height(self) -> u32 { self.height }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

// ── Token grammar ─────────────────────────────────────────────────────────────

/// Case-insensitive bool token: `true/false`, `1/0`, `yes/no`, `on/off`.
pub fn parse_bool(token: &str) -> Option<bool> {
    match token.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn bool_token(value: bool) -> String {
    if value { "true".into() } else { "false".into() }
}

fn parse_digits(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

// ── Settings ──────────────────────────────────────────────────────────────────

/// Ordered `key → [token, ...]` mapping mirroring the config file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    entries: Vec<(String, Vec<String>)>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse config text.  Blank lines, `#` comments and lines without `=` are
    /// skipped; a repeated key keeps its first position but takes the last value.
    pub fn parse(text: &str) -> Self {
        let mut settings = Self::new();
        for raw_line in text.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else { continue };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            let values = value.split(',').map(|v| v.trim().to_string()).collect();
            settings.set(key, values);
        }
        settings
    }

    /// Serialize as `key = v1,v2\n` lines in insertion order.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for (key, values) in &self.entries {
            out.push_str(key);
            out.push_str(" = ");
            out.push_str(&values.join(","));
            out.push('\n');
        }
        out
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_slice())
    }

    pub fn set(&mut self, key: &str, values: Vec<String>) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, slot)) => *slot = values,
            None => self.entries.push((key.to_string(), values)),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    fn single(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some([one]) => Some(one.as_str()),
            _ => None,
        }
    }

    /// `Some` only for exactly two positive decimal integers.
    pub fn resolution(&self) -> Option<Resolution> {
        match self.get(KEY_RESOLUTION)? {
            [w, h] => Resolution::new(parse_digits(w)?, parse_digits(h)?).ok(),
            _ => None,
        }
    }

    /// Raw signed volume; range is not checked here.
    fn raw_volume(&self) -> Option<i64> {
        self.single(KEY_VOLUME)?.parse().ok()
    }

    pub fn volume(&self) -> Option<u8> {
        self.raw_volume().filter(|v| (0..=100).contains(v)).map(|v| v as u8)
    }

    pub fn fullscreen(&self) -> Option<bool> {
        parse_bool(self.single(KEY_FULLSCREEN)?)
    }

    pub fn animated_background(&self) -> Option<bool> {
        parse_bool(self.single(KEY_ANIMATED_BACKGROUND)?)
    }

    /// Repair missing or malformed recognized keys in place.
    /// Returns the keys that were changed.
    pub fn apply_defaults(&mut self) -> Vec<&'static str> {
        let mut fixed = Vec::new();

        if self.resolution().is_none() {
            self.set(KEY_RESOLUTION, resolution_tokens(DEFAULT_RESOLUTION));
            warn!("[config] Setting default resolution: {DEFAULT_RESOLUTION}");
            fixed.push(KEY_RESOLUTION);
        }

        if self.volume().is_none() {
            let volume = match self.raw_volume() {
                Some(v) => v.clamp(0, 100) as u8,
                None => DEFAULT_VOLUME,
            };
            self.set(KEY_VOLUME, vec![volume.to_string()]);
            warn!("[config] Setting default volume: {volume}");
            fixed.push(KEY_VOLUME);
        }

        if self.fullscreen().is_none() {
            self.set(KEY_FULLSCREEN, vec![bool_token(DEFAULT_FULLSCREEN)]);
            warn!("[config] Setting default fullscreen: {DEFAULT_FULLSCREEN}");
            fixed.push(KEY_FULLSCREEN);
        }

        if self.animated_background().is_none() {
            self.set(KEY_ANIMATED_BACKGROUND, vec![bool_token(DEFAULT_ANIMATED_BACKGROUND)]);
            warn!("[config] Setting default animated_background: {DEFAULT_ANIMATED_BACKGROUND}");
            fixed.push(KEY_ANIMATED_BACKGROUND);
        }

        fixed
    }
}

fn resolution_tokens(res: Resolution) -> Vec<String> {
    vec![res.width.to_string(), res.height.to_string()]
}

// ── ConfigStore ───────────────────────────────────────────────────────────────

/// Settings bound to their file.  In-memory state is authoritative; a failed
/// save is logged and reported but never rolls the change back.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    settings: Settings,
}

impl ConfigStore {
    /// Load `path` (a missing or unreadable file counts as empty), repair the
    /// recognized keys and persist the result.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = match Self::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("[config] Failed to load, starting empty: {e}");
                Settings::new()
            }
        };
        let mut store = Self { path, settings };
        store.apply_defaults();
        store
    }

    /// Read and parse a config file without touching any store.
    pub fn load(path: &Path) -> Result<Settings, ResourceError> {
        let text = std::fs::read_to_string(path).map_err(|e| ResourceError::io(path, e))?;
        Ok(Settings::parse(&text))
    }

    /// Repair invalid or missing keys, then persist.  Safe to call repeatedly.
    pub fn apply_defaults(&mut self) -> Vec<&'static str> {
        let fixed = self.settings.apply_defaults();
        let _ = self.save();
        fixed
    }

    pub fn path(&self) -> &Path { &self.path }
    pub fn settings(&self) -> &Settings { &self.settings }

    pub fn resolution(&self) -> Resolution {
        self.settings.resolution().unwrap_or(DEFAULT_RESOLUTION)
    }

    pub fn volume(&self) -> u8 {
        self.settings.volume().unwrap_or(DEFAULT_VOLUME)
    }

    pub fn fullscreen(&self) -> bool {
        self.settings.fullscreen().unwrap_or(DEFAULT_FULLSCREEN)
    }

    pub fn animated_background(&self) -> bool {
        self.settings.animated_background().unwrap_or(DEFAULT_ANIMATED_BACKGROUND)
    }

    pub fn set_resolution(&mut self, resolution: Resolution) -> Result<(), ResourceError> {
        self.settings.set(KEY_RESOLUTION, resolution_tokens(resolution));
        self.save()
    }

    /// Clamps to `[0, 100]`.
    pub fn set_volume(&mut self, level: i32) -> Result<(), ResourceError> {
        let level = level.clamp(0, 100);
        self.settings.set(KEY_VOLUME, vec![level.to_string()]);
        self.save()
    }

    pub fn set_fullscreen(&mut self, enabled: bool) -> Result<(), ResourceError> {
        self.settings.set(KEY_FULLSCREEN, vec![bool_token(enabled)]);
        self.save()
    }

    pub fn set_animated_background(&mut self, enabled: bool) -> Result<(), ResourceError> {
        self.settings.set(KEY_ANIMATED_BACKGROUND, vec![bool_token(enabled)]);
        self.save()
    }

    /// Write the whole file atomically.
    pub fn save(&self) -> Result<(), ResourceError> {
        match write_atomic(&self.path, self.settings.serialize().as_bytes()) {
            Ok(()) => {
                info!("[config] Saved: {}", self.path.display());
                Ok(())
            }
            Err(e) => {
                log::error!("[config] Failed to save: {e}");
                Err(e)
            }
        }
    }
}
