//! Best-score persistence
//!
//! Only the single running maximum is kept. Persisted to LocalStorage on the
//! web and to a small JSON file natively.

use serde::{Deserialize, Serialize};

/// Persisted best score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScore {
    pub best: u32,
}

impl BestScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "space_hop_best";

    pub fn new(best: u32) -> Self {
        Self { best }
    }

    /// Raise the stored value if `score` beats it; returns true on change
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Parse stored data; corrupt data reads as no best
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<BestScore>(json) {
            Ok(best) => best,
            Err(e) => {
                log::warn!("Discarding corrupt best score: {e}");
                Self::default()
            }
        }
    }

    /// Load best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                let best = Self::from_json(&json);
                log::info!("Loaded best score {}", best.best);
                return best;
            }
        }

        log::info!("No best score found, starting fresh");
        Self::default()
    }

    /// Save best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Best score saved ({})", self.best);
            }
        }
    }

    /// Load from a JSON file; a missing file reads as no best
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                log::warn!("Cannot read {}: {e}", path.display());
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = serde_json::to_string(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Best score saved to {} ({})", path.display(), self.best);
        Ok(())
    }
}
