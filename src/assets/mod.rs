//! Asset cache.
//!
//! Logical names such as `buttons/play_default` map to files under the assets
//! directory (`assets/buttons/play_default.png`).  Every lookup is memoized,
//! misses included, so a missing file is reported once and then drawn as
//! nothing for the rest of the session.

pub mod font;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use glam::Vec2;
use image::RgbaImage;
use log::{info, warn};
use walkdir::WalkDir;

pub use font::{Font, Glyph, GlyphQuad};

use crate::error::ResourceError;
use crate::paths::Paths;

pub const FONT_PX_MIN: u32 = 8;
pub const FONT_PX_MAX: u32 = 128;

/// Family every menu label is set in.
pub const MENU_FONT: &str = "upheaval";

/// Clamp a requested font size to the supported range, warning when it moves.
pub fn clamp_font_px(px: u32) -> u32 {
    let clamped = px.clamp(FONT_PX_MIN, FONT_PX_MAX);
    if clamped != px {
        warn!("[assets] Font size {px} out of range, using {clamped}");
    }
    clamped
}

pub fn load_image(path: &Path) -> Result<RgbaImage, ResourceError> {
    let img = image::open(path).map_err(|source| ResourceError::Image { path: path.to_path_buf(), source })?;
    Ok(img.to_rgba8())
}

pub fn load_font(path: &Path) -> Result<Font, ResourceError> {
    let json = std::fs::read_to_string(path).map_err(|e| ResourceError::io(path, e))?;
    Font::from_json(&json).map_err(|source| ResourceError::Font { path: path.to_path_buf(), source })
}

pub struct AssetCache {
    root: PathBuf,
    images: HashMap<String, Option<RgbaImage>>,
    fonts: HashMap<String, Option<Font>>,
}

impl AssetCache {
    pub fn new(paths: &Paths) -> Self {
        Self::with_root(paths.assets_dir())
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), images: HashMap::new(), fonts: HashMap::new() }
    }

    pub fn root(&self) -> &Path { &self.root }

    pub fn image_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.png"))
    }

    /// Decoded RGBA pixels for `name`, or `None` if the file is missing or bad.
    pub fn image(&mut self, name: &str) -> Option<&RgbaImage> {
        if !self.images.contains_key(name) {
            let path = self.image_path(name);
            let loaded = match load_image(&path) {
                Ok(img) => Some(img),
                Err(e) => {
                    warn!("[assets] Missing image '{name}': {e}");
                    None
                }
            };
            self.images.insert(name.to_string(), loaded);
        }
        self.images.get(name).and_then(Option::as_ref)
    }

    pub fn size(&mut self, name: &str) -> Option<Vec2> {
        self.image(name).map(|img| Vec2::new(img.width() as f32, img.height() as f32))
    }

    /// Image size, or `fallback` when the image is unavailable.
    pub fn size_or(&mut self, name: &str, fallback: Vec2) -> Vec2 {
        self.size(name).unwrap_or(fallback)
    }

    /// Sorted frame names (`<dir>/<stem>`) of every `.png` below `assets/<dir>`.
    pub fn sequence(&self, dir: &str) -> Vec<String> {
        let base = self.root.join(dir);
        if !base.is_dir() {
            warn!("[assets] No frame directory {}", base.display());
            return Vec::new();
        }

        let mut frames: Vec<String> = WalkDir::new(&base)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext.eq_ignore_ascii_case("png")))
            .filter_map(|e| {
                let rel = e.path().strip_prefix(&self.root).ok()?.with_extension("");
                let parts: Vec<_> = rel.components().map(|c| c.as_os_str().to_string_lossy().into_owned()).collect();
                Some(parts.join("/"))
            })
            .collect();
        frames.sort();
        info!("[assets] {} frames in '{dir}'", frames.len());
        frames
    }

    /// Image-cache key of a font family's atlas texture.
    pub fn font_atlas_key(family: &str) -> String {
        format!("fonts/{family}")
    }

    /// `family` at `px` (clamped to the supported range).  The descriptor is
    /// loaded once per family; the size only scales glyphs at layout time.
    pub fn font(&mut self, family: &str, px: u32) -> Option<SizedFont<'_>> {
        let px = clamp_font_px(px) as f32;
        if !self.fonts.contains_key(family) {
            let path = self.root.join("fonts").join(format!("{family}.json"));
            let loaded = match load_font(&path) {
                Ok(font) => Some(font),
                Err(e) => {
                    warn!("[assets] Missing font '{family}': {e}");
                    None
                }
            };
            self.fonts.insert(family.to_string(), loaded);
        }
        self.fonts.get(family).and_then(Option::as_ref).map(|font| SizedFont { font, px })
    }
}

/// A font borrowed from the cache together with the size it is drawn at.
#[derive(Clone, Copy)]
pub struct SizedFont<'a> {
    pub font: &'a Font,
    pub px: f32,
}

impl SizedFont<'_> {
    pub fn text_width(&self, text: &str) -> f32 {
        self.font.text_width(text, self.px)
    }

    pub fn layout(&self, text: &str, origin: Vec2) -> Vec<GlyphQuad> {
        self.font.layout(text, origin, self.px)
    }
}
