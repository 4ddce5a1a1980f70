use std::fmt;
use std::path::PathBuf;

// ── ValidationError ───────────────────────────────────────────────────────────

/// A value was rejected at an API boundary.  The caller's state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Raw integer that does not name any `Screen`.
    UnknownScreen(i64),
    /// A known screen that cannot be entered (`Screen::None`).
    UnenterableScreen,
    /// Width or height of zero.
    InvalidResolution { width: u32, height: u32 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownScreen(raw) => write!(f, "invalid value {raw} for Screen"),
            Self::UnenterableScreen => write!(f, "Screen::None cannot be entered"),
            Self::InvalidResolution { width, height } => {
                write!(f, "invalid resolution {width}x{height}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

// ── ResourceError ─────────────────────────────────────────────────────────────

/// A file or asset could not be read or written.  Always recoverable: the
/// caller logs it and degrades (blank widget, skipped save).
#[derive(Debug)]
pub enum ResourceError {
    Io { path: PathBuf, source: std::io::Error },
    Image { path: PathBuf, source: image::ImageError },
    Font { path: PathBuf, source: serde_json::Error },
    Saves { path: PathBuf, source: serde_json::Error },
}

impl ResourceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// The file this error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. }
            | Self::Image { path, .. }
            | Self::Font { path, .. }
            | Self::Saves { path, .. } => path,
        }
    }
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Image { path, source } => write!(f, "image {}: {source}", path.display()),
            Self::Font { path, source } => write!(f, "font {}: {source}", path.display()),
            Self::Saves { path, source } => write!(f, "saves {}: {source}", path.display()),
        }
    }
}

impl std::error::Error for ResourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Image { source, .. } => Some(source),
            Self::Font { source, .. } | Self::Saves { source, .. } => Some(source),
        }
    }
}
