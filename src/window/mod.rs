pub mod config;

pub use config::{WindowConfig, WindowMode};

use log::info;
use winit::dpi::PhysicalSize;
use winit::window::{Fullscreen, Window};

/// Apply `config` to `window`.
///
/// # Windowed
/// Leaves fullscreen, restores decorations and requests the configured size.
///
/// # Fullscreen
/// Picks the current monitor's video mode closest in area to the configured
/// resolution for exclusive fullscreen, falling back to borderless when no
/// monitor or video mode is available.
pub fn apply_window_settings(window: &Window, config: &WindowConfig) {
    info!("[window] Applying {} {:?}", config.resolution, config.mode);
    match config.mode {
        WindowMode::Windowed => {
            window.set_fullscreen(None);
            window.set_decorations(true);
            window.set_resizable(false);
            // `None` means the resize arrives later as `WindowEvent::Resized`.
            let _ = window.request_inner_size(PhysicalSize::new(config.width(), config.height()));
        }

        WindowMode::Fullscreen => {
            let fullscreen = match window.current_monitor() {
                Some(monitor) => {
                    let target_area = config.width() as u64 * config.height() as u64;
                    let best = monitor.video_modes().min_by_key(|vm| {
                        let s = vm.size();
                        (s.width as u64 * s.height as u64).abs_diff(target_area)
                    });
                    match best {
                        Some(vm) => Fullscreen::Exclusive(vm),
                        None => Fullscreen::Borderless(Some(monitor)),
                    }
                }
                None => Fullscreen::Borderless(None),
            };
            window.set_fullscreen(Some(fullscreen));
        }
    }
}
