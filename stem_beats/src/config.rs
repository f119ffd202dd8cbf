//! Application configuration

use std::path::PathBuf;

/// Environment variable overriding where sound clips are loaded from
pub const ASSET_DIR_ENV: &str = "STEMBEATS_ASSET_DIR";

/// Startup settings for the desktop application
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub asset_dir: PathBuf,
    /// Initial volume slider position (0..=100)
    pub volume: f32,
    /// Initial tempo slider position (0..=100)
    pub tempo: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "StemBeats".to_string(),
            window_width: 1200,
            window_height: 700,
            asset_dir: PathBuf::from("assets"),
            volume: 50.0,
            tempo: 50.0,
        }
    }
}

impl AppConfig {
    /// Defaults with the asset directory taken from the environment when set
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(dir) = std::env::var_os(ASSET_DIR_ENV) {
            config.asset_dir = PathBuf::from(dir);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_initial_sliders() {
        let config = AppConfig::default();
        assert_eq!(config.volume, 50.0);
        assert_eq!(config.tempo, 50.0);
        assert_eq!(config.asset_dir, PathBuf::from("assets"));
    }
}
