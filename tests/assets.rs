use std::fs;
use std::path::PathBuf;

use glam::Vec2;
use image::RgbaImage;

use jmenu::assets::{AssetCache, FONT_PX_MAX, FONT_PX_MIN, Font, clamp_font_px};

fn temp_assets(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("jmenu_assets_{name}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_png(root: &PathBuf, name: &str, w: u32, h: u32) {
    let path = root.join(format!("{name}.png"));
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    RgbaImage::new(w, h).save(&path).unwrap();
}

const FONT_JSON: &str = r#"{
    "line_height": 20,
    "texture_width": 100,
    "texture_height": 50,
    "glyphs": [
        { "id": 65, "x": 0,  "y": 0, "width": 10, "height": 20, "x_offset": 0, "y_offset": 0, "x_advance": 12 },
        { "id": 66, "x": 10, "y": 0, "width": 10, "height": 20, "x_offset": 1, "y_offset": 2, "x_advance": 12 }
    ]
}"#;

// ── Images ───────────────────────────────────────────────────────────────────

#[test]
fn image_size_comes_from_the_file() {
    let root = temp_assets("size");
    write_png(&root, "buttons/play_default", 240, 64);
    let mut cache = AssetCache::with_root(&root);
    assert_eq!(cache.size("buttons/play_default"), Some(Vec2::new(240.0, 64.0)));
}

#[test]
fn missing_image_uses_fallback_and_stays_missing() {
    let root = temp_assets("missing");
    let mut cache = AssetCache::with_root(&root);
    assert_eq!(cache.size_or("ui/board", Vec2::new(10.0, 20.0)), Vec2::new(10.0, 20.0));

    // The miss is memoized: a file appearing later is not picked up.
    write_png(&root, "ui/board", 4, 4);
    assert!(cache.image("ui/board").is_none());
    assert!(AssetCache::with_root(&root).image("ui/board").is_some());
}

#[test]
fn sequence_lists_png_frames_in_order() {
    let root = temp_assets("sequence");
    for name in ["frame_03", "frame_01", "frame_02"] {
        write_png(&root, &format!("backgrounds/menu/{name}"), 2, 2);
    }
    fs::write(root.join("backgrounds/menu/notes.txt"), "ignored").unwrap();

    let cache = AssetCache::with_root(&root);
    assert_eq!(
        cache.sequence("backgrounds/menu"),
        vec!["backgrounds/menu/frame_01", "backgrounds/menu/frame_02", "backgrounds/menu/frame_03"]
    );
    assert!(cache.sequence("backgrounds/none").is_empty());
}

// ── Fonts ────────────────────────────────────────────────────────────────────

#[test]
fn font_sizes_are_clamped() {
    assert_eq!(clamp_font_px(2), FONT_PX_MIN);
    assert_eq!(clamp_font_px(500), FONT_PX_MAX);
    assert_eq!(clamp_font_px(28), 28);
}

#[test]
fn font_descriptor_parses_and_scales() {
    let font = Font::from_json(FONT_JSON).unwrap();
    assert_eq!(font.glyphs.len(), 2);
    // 40 px is twice the atlas line height.
    assert_eq!(font.text_width("AB?", 40.0), 48.0);

    let quads = font.layout("AB", Vec2::new(10.0, 10.0), 40.0);
    assert_eq!(quads.len(), 2);
    assert_eq!(quads[0].rect.size(), Vec2::new(20.0, 40.0));
    assert_eq!(quads[1].rect.top_left(), Vec2::new(36.0, 14.0));
    assert_eq!(quads[1].uv_min, [0.1, 0.0]);
    assert_eq!(quads[1].uv_max, [0.2, 0.4]);
}

#[test]
fn malformed_font_descriptor_is_an_error() {
    assert!(Font::from_json("{ \"glyphs\": 3 }").is_err());
}

#[test]
fn cache_loads_font_by_family() {
    let root = temp_assets("font");
    fs::create_dir_all(root.join("fonts")).unwrap();
    fs::write(root.join("fonts/menu.json"), FONT_JSON).unwrap();

    let mut cache = AssetCache::with_root(&root);
    let sized = cache.font("menu", 20).unwrap();
    assert_eq!(sized.px, 20.0);
    assert_eq!(sized.text_width("A"), 12.0);
    assert!(cache.font("absent", 20).is_none());
    assert_eq!(AssetCache::font_atlas_key("menu"), "fonts/menu");
}
