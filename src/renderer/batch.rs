//! Draw list → vertex batches.
//!
//! Pure CPU step: each command becomes one or more textured quads (six
//! vertices each), and consecutive quads sharing a texture are merged into
//! one batch.  Commands whose image or font is unavailable are skipped.

use glam::Vec2;

use super::pipeline::QuadVertex;
use crate::assets::AssetCache;
use crate::geometry::Rect;
use crate::ui::{Anchor, Color, DrawCommand, DrawList};

/// Texture a batch samples from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TextureKey {
    /// 1×1 white texel; used for solid fills.
    White,
    Image(String),
}

/// A run of vertices drawn with one texture bound.
#[derive(Clone, Debug, PartialEq)]
pub struct Batch {
    pub texture: TextureKey,
    pub start: u32,
    pub count: u32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuadBatches {
    pub vertices: Vec<QuadVertex>,
    pub batches: Vec<Batch>,
}

impl QuadBatches {
    fn push_quad(&mut self, texture: TextureKey, rect: Rect, uv_min: [f32; 2], uv_max: [f32; 2], color: Color) {
        let (x0, y0, x1, y1) = (rect.left(), rect.top(), rect.right(), rect.bottom());
        let c = color.0;
        let tl = QuadVertex { position: [x0, y0], uv: [uv_min[0], uv_min[1]], color: c };
        let tr = QuadVertex { position: [x1, y0], uv: [uv_max[0], uv_min[1]], color: c };
        let bl = QuadVertex { position: [x0, y1], uv: [uv_min[0], uv_max[1]], color: c };
        let br = QuadVertex { position: [x1, y1], uv: [uv_max[0], uv_max[1]], color: c };

        let start = self.vertices.len() as u32;
        // Two CCW triangles (Y-down): TL-BL-TR, TR-BL-BR.
        self.vertices.extend_from_slice(&[tl, bl, tr, tr, bl, br]);

        match self.batches.last_mut() {
            Some(last) if last.texture == texture => last.count += 6,
            _ => self.batches.push(Batch { texture, start, count: 6 }),
        }
    }
}

pub fn build_batches(list: &DrawList, assets: &mut AssetCache) -> QuadBatches {
    let mut out = QuadBatches::default();

    for command in list.commands() {
        match command {
            DrawCommand::Fill { rect, color } => {
                out.push_quad(TextureKey::White, *rect, [0.0, 0.0], [1.0, 1.0], *color);
            }
            DrawCommand::Image { key, rect } => {
                if assets.image(key).is_some() {
                    out.push_quad(TextureKey::Image(key.clone()), *rect, [0.0, 0.0], [1.0, 1.0], Color::WHITE);
                }
            }
            DrawCommand::Text { text, font, color, pos, anchor } => {
                let Some(sized) = assets.font(font.family, font.px) else { continue };
                let origin = match anchor {
                    Anchor::TopLeft => *pos,
                    Anchor::Center => *pos - Vec2::new(sized.text_width(text), sized.px) * 0.5,
                };
                let glyphs = sized.layout(text, origin);

                let atlas = AssetCache::font_atlas_key(font.family);
                if assets.image(&atlas).is_none() {
                    continue;
                }
                for glyph in glyphs {
                    out.push_quad(TextureKey::Image(atlas.clone()), glyph.rect, glyph.uv_min, glyph.uv_max, *color);
                }
            }
        }
    }

    out
}
