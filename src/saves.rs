//! Save-slot descriptors shown by the progress panel.

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::ResourceError;
use crate::paths::write_atomic;

pub const SLOT_COUNT: usize = 3;
pub const FIRST_LEVEL: u32 = 1;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSlot {
    pub name: Option<String>,
    pub level: u32,
}

impl SaveSlot {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

/// The three slots, bound to `saves.json`.
#[derive(Debug)]
pub struct SaveBook {
    path: PathBuf,
    slots: [SaveSlot; SLOT_COUNT],
}

impl SaveBook {
    /// Load `path`; a missing or malformed file yields three empty slots.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let slots = if path.exists() {
            match Self::load(&path) {
                Ok(slots) => slots,
                Err(e) => {
                    warn!("[saves] Ignoring unreadable saves: {e}");
                    Default::default()
                }
            }
        } else {
            info!("[saves] No saves at {}", path.display());
            Default::default()
        };
        Self { path, slots }
    }

    pub fn load(path: &Path) -> Result<[SaveSlot; SLOT_COUNT], ResourceError> {
        let bytes = std::fs::read(path).map_err(|e| ResourceError::io(path, e))?;
        serde_json::from_slice(&bytes).map_err(|source| ResourceError::Saves { path: path.to_path_buf(), source })
    }

    pub fn slots(&self) -> &[SaveSlot; SLOT_COUNT] { &self.slots }
    pub fn slot(&self, index: usize) -> Option<&SaveSlot> { self.slots.get(index) }
    pub fn path(&self) -> &Path { &self.path }

    /// Occupied slots, highest level first; ties keep slot order.
    pub fn ranking(&self) -> Vec<(usize, &SaveSlot)> {
        let mut ranked: Vec<_> = self.slots.iter().enumerate().filter(|(_, s)| !s.is_empty()).collect();
        ranked.sort_by(|a, b| b.1.level.cmp(&a.1.level));
        ranked
    }

    /// Name an empty or existing slot and restart it at the first level.
    pub fn fill(&mut self, index: usize, name: &str) -> Result<(), ResourceError> {
        let Some(slot) = self.slots.get_mut(index) else {
            warn!("[saves] No slot {index}");
            return Ok(());
        };
        *slot = SaveSlot { name: Some(name.to_string()), level: FIRST_LEVEL };
        info!("[saves] Slot {index} named '{name}'");
        self.save()
    }

    pub fn clear(&mut self, index: usize) -> Result<(), ResourceError> {
        let Some(slot) = self.slots.get_mut(index) else {
            warn!("[saves] No slot {index}");
            return Ok(());
        };
        *slot = SaveSlot::default();
        info!("[saves] Slot {index} cleared");
        self.save()
    }

    pub fn save(&self) -> Result<(), ResourceError> {
        let json = serde_json::to_vec_pretty(&self.slots)
            .map_err(|source| ResourceError::Saves { path: self.path.clone(), source })?;
        write_atomic(&self.path, &json).inspect_err(|e| log::error!("[saves] Failed to save: {e}"))
    }
}
