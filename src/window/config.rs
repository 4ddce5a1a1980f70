use crate::config::{DEFAULT_RESOLUTION, Resolution};

// ── WindowMode ────────────────────────────────────────────────────────────────

/// Controls how the OS window is presented.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WindowMode {
    /// Standard decorated window at the configured resolution.
    Windowed,
    /// Exclusive hardware fullscreen at the configured resolution.
    Fullscreen,
}

impl WindowMode {
    pub fn from_fullscreen(fullscreen: bool) -> Self {
        if fullscreen { Self::Fullscreen } else { Self::Windowed }
    }

    pub fn is_fullscreen(self) -> bool {
        self == Self::Fullscreen
    }
}

// ── WindowConfig ──────────────────────────────────────────────────────────────

/// Surface request built from the `resolution` and `fullscreen` settings.
///
/// The resolution is both the requested window size and the logical size the
/// menu lays itself out in; pointer positions are scaled from the actual
/// window size back to it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WindowConfig {
    pub resolution: Resolution,
    pub mode: WindowMode,
}

impl WindowConfig {
    pub fn new(resolution: Resolution, fullscreen: bool) -> Self {
        Self { resolution, mode: WindowMode::from_fullscreen(fullscreen) }
    }

    pub fn width(&self) -> u32 { self.resolution.width() }
    pub fn height(&self) -> u32 { self.resolution.height() }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new(DEFAULT_RESOLUTION, false)
    }
}
