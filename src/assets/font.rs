use std::collections::HashMap;

use glam::Vec2;
use serde::Deserialize;

use crate::geometry::Rect;

// ── Glyph ────────────────────────────────────────────────────────────────────

/// Metrics for a single character in the bitmap font atlas.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// Top-left pixel X of the glyph region in the atlas.
    pub x: u32,
    /// Top-left pixel Y of the glyph region in the atlas.
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Horizontal offset applied when rendering (may be negative).
    pub x_offset: i32,
    /// Vertical offset applied when rendering (may be negative).
    pub y_offset: i32,
    /// How far to advance the cursor after drawing this glyph.
    pub x_advance: u32,
}

/// One positioned glyph: destination rectangle and normalised atlas UVs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphQuad {
    pub rect: Rect,
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
}

// ── Font ─────────────────────────────────────────────────────────────────────

/// A bitmap font loaded from a JSON descriptor.  The atlas pixels live in the
/// image cache next to it (`fonts/<family>.png`).
#[derive(Debug, Clone)]
pub struct Font {
    pub glyphs: HashMap<char, Glyph>,
    /// Vertical distance between successive baselines in atlas pixels.
    pub line_height: u32,
    pub texture_width: u32,
    pub texture_height: u32,
}

impl Font {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: RawFont = serde_json::from_str(json)?;

        let glyphs = raw
            .glyphs
            .into_iter()
            .filter_map(|g| {
                char::from_u32(g.id).map(|ch| {
                    (ch, Glyph {
                        x: g.x,
                        y: g.y,
                        width: g.width,
                        height: g.height,
                        x_offset: g.x_offset,
                        y_offset: g.y_offset,
                        x_advance: g.x_advance,
                    })
                })
            })
            .collect();

        Ok(Self {
            glyphs,
            line_height: raw.line_height,
            texture_width: raw.texture_width,
            texture_height: raw.texture_height,
        })
    }

    fn scale(&self, px: f32) -> f32 {
        if self.line_height == 0 { 0.0 } else { px / self.line_height as f32 }
    }

    /// Rendered width of a single line of `text` at line height `px`.
    /// Unknown characters contribute nothing.
    pub fn text_width(&self, text: &str, px: f32) -> f32 {
        let scale = self.scale(px);
        text.chars()
            .filter_map(|ch| self.glyphs.get(&ch))
            .map(|g| g.x_advance as f32 * scale)
            .sum()
    }

    /// Position every renderable character of `text` starting at `origin`
    /// (top-left of the first line).  `'\n'` starts a new line.
    pub fn layout(&self, text: &str, origin: Vec2, px: f32) -> Vec<GlyphQuad> {
        if self.line_height == 0 || self.texture_width == 0 || self.texture_height == 0 {
            return Vec::new();
        }

        let scale = self.scale(px);
        let tw = self.texture_width as f32;
        let th = self.texture_height as f32;

        let mut quads = Vec::new();
        let mut cursor = origin;

        for ch in text.chars() {
            if ch == '\n' {
                cursor.x = origin.x;
                cursor.y += px;
                continue;
            }

            let Some(glyph) = self.glyphs.get(&ch) else { continue };

            let rect = Rect::new(
                cursor.x + glyph.x_offset as f32 * scale,
                cursor.y + glyph.y_offset as f32 * scale,
                glyph.width as f32 * scale,
                glyph.height as f32 * scale,
            );
            quads.push(GlyphQuad {
                rect,
                uv_min: [glyph.x as f32 / tw, glyph.y as f32 / th],
                uv_max: [(glyph.x + glyph.width) as f32 / tw, (glyph.y + glyph.height) as f32 / th],
            });

            cursor.x += glyph.x_advance as f32 * scale;
        }

        quads
    }
}

// ── Raw (JSON-facing) types ───────────────────────────────────────────────────
//
// Character IDs are Unicode code points in the JSON file.

#[derive(Deserialize)]
struct RawGlyph {
    id: u32,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    x_offset: i32,
    y_offset: i32,
    x_advance: u32,
}

#[derive(Deserialize)]
struct RawFont {
    line_height: u32,
    texture_width: u32,
    texture_height: u32,
    glyphs: Vec<RawGlyph>,
}
