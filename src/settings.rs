//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web; defaults everywhere else.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Next preset in the Low, Medium, High cycle
    pub fn next(&self) -> Self {
        match self {
            QualityPreset::Low => QualityPreset::Medium,
            QualityPreset::Medium => QualityPreset::High,
            QualityPreset::High => QualityPreset::Low,
        }
    }

    /// Triangles per full circle
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 12,
            QualityPreset::Medium => 20,
            QualityPreset::High => 32,
        }
    }

    /// Whether to draw soft glows around apples and the invincible snake
    pub fn glow_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Options handed to the hand-landmark detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerOptions {
    pub max_num_hands: u32,
    pub model_complexity: u32,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
    /// Requested camera capture size
    pub capture_width: u32,
    pub capture_height: u32,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            max_num_hands: 1,
            model_complexity: 1,
            min_detection_confidence: 0.4,
            min_tracking_confidence: 0.4,
            capture_width: 1280,
            capture_height: 720,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Accessibility ===
    /// Reduced motion (no apple pulse)
    pub reduced_motion: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Tracking ===
    pub tracker: TrackerOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            reduced_motion: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            tracker: TrackerOptions::default(),
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective effect volume after mute
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective apple pulse (respects reduced_motion)
    pub fn pulse_enabled(&self) -> bool {
        !self.reduced_motion
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn toggle_reduced_motion(&mut self) {
        self.reduced_motion = !self.reduced_motion;
    }

    pub fn cycle_quality(&mut self) {
        self.quality = self.quality.next();
    }

    /// Tracker options as the JSON object the detector expects
    pub fn tracker_json(&self) -> String {
        serde_json::to_string(&self.tracker).unwrap_or_else(|_| "{}".to_string())
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "hand_snake_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring unreadable settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match serde_json::to_string(self) {
                Ok(json) => match storage.set_item(Self::STORAGE_KEY, &json) {
                    Ok(()) => log::info!("Settings saved"),
                    Err(e) => log::warn!("Could not save settings: {e:?}"),
                },
                Err(e) => log::warn!("Could not encode settings: {e}"),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_cycle() {
        let mut settings = Settings::from_preset(QualityPreset::Low);
        settings.cycle_quality();
        assert_eq!(settings.quality, QualityPreset::Medium);
        settings.cycle_quality();
        assert_eq!(settings.quality.as_str(), "High");
        settings.cycle_quality();
        assert_eq!(settings.quality, QualityPreset::Low);
    }

    #[test]
    fn test_toggles_survive_storage_round_trip() {
        let mut settings = Settings::default();
        settings.toggle_mute();
        settings.toggle_reduced_motion();
        assert_eq!(settings.effective_volume(), 0.0);
        assert!(!settings.pulse_enabled());

        let json = serde_json::to_string(&settings).expect("encode");
        let restored: Settings = serde_json::from_str(&json).expect("decode");
        assert!(restored.muted);
        assert!(restored.reduced_motion);

        settings.toggle_mute();
        assert!((settings.effective_volume() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::default();
        assert!((settings.effective_volume() - 0.8).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"quality":"High"}"#).expect("parse");
        assert_eq!(settings.quality, QualityPreset::High);
        assert_eq!(settings.tracker, TrackerOptions::default());
    }

    #[test]
    fn test_tracker_json_uses_detector_names() {
        let json = Settings::default().tracker_json();
        assert!(json.contains("\"maxNumHands\":1"));
        assert!(json.contains("\"minDetectionConfidence\":0.4"));
    }
}
