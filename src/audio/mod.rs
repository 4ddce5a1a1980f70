use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use kira::{
    manager::{AudioManager, AudioManagerSettings, backend::DefaultBackend},
    sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings},
    tween::Tween,
    Volume,
};
use log::{info, warn};

pub const CLICK_SOUND: &str = "click";
pub const MENU_THEME: &str = "menu_theme";

/// Convert the 0–100 `volume` setting to a kira amplitude.
pub fn amplitude(volume: u8) -> f64 {
    f64::from(volume.min(100)) / 100.0
}

pub struct AudioContext {
    /// `None` when audio hardware is unavailable (headless / CI / no audio device).
    manager: Option<AudioManager>,
    sounds: HashMap<String, StaticSoundData>,
    music: Option<StaticSoundHandle>,
    volume: u8,
}

impl AudioContext {
    pub fn new(volume: u8) -> Self {
        let manager = match AudioManager::<DefaultBackend>::new(AudioManagerSettings::default()) {
            Ok(m) => Some(m),
            Err(e) => {
                warn!("[audio] Failed to initialize audio manager: {e}. Audio disabled.");
                None
            }
        };
        Self { manager, sounds: HashMap::new(), music: None, volume: volume.min(100) }
    }

    pub fn volume(&self) -> u8 { self.volume }

    /// Load a sound file (OGG, WAV) into memory under `name`.
    pub fn load_sound(&mut self, name: &str, path: &Path) {
        match StaticSoundData::from_file(path) {
            Ok(sound) => {
                self.sounds.insert(name.to_string(), sound);
            }
            Err(e) => warn!("[audio] Failed to load '{name}' from '{}': {e}", path.display()),
        }
    }

    /// Load the click and theme sounds from `<assets>/audio/` if present.
    pub fn load_menu_sounds(&mut self, assets_dir: &Path) {
        for name in [CLICK_SOUND, MENU_THEME] {
            let path = assets_dir.join("audio").join(format!("{name}.ogg"));
            if path.exists() {
                self.load_sound(name, &path);
            } else {
                info!("[audio] No {}", path.display());
            }
        }
    }

    /// Set the master level; the running theme follows immediately.
    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
        if let Some(handle) = self.music.as_mut() {
            let _ = handle.set_volume(Volume::Amplitude(amplitude(self.volume)), Tween::default());
        }
    }

    /// Play a loaded sound once at the current volume.
    pub fn play(&mut self, name: &str) {
        let Some(manager) = self.manager.as_mut() else { return };
        if let Some(data) = self.sounds.get(name) {
            let mut settings = StaticSoundSettings::new();
            settings.volume = Volume::Amplitude(amplitude(self.volume)).into();
            if let Err(e) = manager.play(data.clone().with_settings(settings)) {
                warn!("[audio] Failed to play '{name}': {e}");
            }
        }
    }

    pub fn play_click(&mut self) {
        self.play(CLICK_SOUND);
    }

    /// Loop `name` as background music, fading in over `fade_in`.
    pub fn play_music(&mut self, name: &str, fade_in: Duration) {
        let Some(manager) = self.manager.as_mut() else { return };
        let Some(data) = self.sounds.get(name) else { return };

        if let Some(mut handle) = self.music.take() {
            let _ = handle.stop(Tween { duration: Duration::from_millis(500), ..Default::default() });
        }

        let mut settings = StaticSoundSettings::new().loop_region(0.0..);
        settings.volume = Volume::Amplitude(0.0).into();
        match manager.play(data.clone().with_settings(settings)) {
            Ok(mut handle) => {
                let _ = handle.set_volume(
                    Volume::Amplitude(amplitude(self.volume)),
                    Tween { duration: fade_in, ..Default::default() },
                );
                self.music = Some(handle);
            }
            Err(e) => warn!("[audio] Failed to play music '{name}': {e}"),
        }
    }
}
