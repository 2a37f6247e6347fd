use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_SETTINGS_PATH: &str = "settings.json";
/// Overrides the settings file location.
pub const SETTINGS_ENV: &str = "BLOCK_DROP_SETTINGS";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub font: PathBuf,
    pub pause_sound: PathBuf,
    pub clear_sound: PathBuf,
    pub rotate_sound: PathBuf,
    pub music: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        AssetPaths {
            font: "res/fonts/monogram.ttf".into(),
            pause_sound: "res/sounds/okay.wav".into(),
            clear_sound: "res/sounds/clear.mp3".into(),
            rotate_sound: "res/sounds/rotate.mp3".into(),
            music: "res/music/music.mp3".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub target_fps: u32,
    pub sfx_volume: f32,
    pub music_volume: f32,
    pub muted: bool,
    pub assets: AssetPaths,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            target_fps: 60,
            sfx_volume: 0.5,
            music_volume: 0.5,
            muted: false,
            assets: AssetPaths::default(),
        }
    }
}

impl Settings {
    pub fn from_json(text: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(text).context("parsing settings")?;
        Ok(settings.sanitized())
    }

    /// `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("in {}", path.display()))
            .map(Some)
    }

    /// Never fails: a broken file is logged and defaults are used.
    pub fn load_or_default() -> Self {
        let path = std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));
        match Self::load(&path) {
            Ok(Some(settings)) => {
                log::info!("loaded settings from {}", path.display());
                settings
            }
            Ok(None) => {
                log::debug!("no settings at {}, using defaults", path.display());
                Settings::default()
            }
            Err(err) => {
                log::warn!("ignoring settings: {err:#}");
                Settings::default()
            }
        }
    }

    fn sanitized(mut self) -> Self {
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        if self.target_fps == 0 {
            self.target_fps = Settings::default().target_fps;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn partial_override() {
        let settings =
            Settings::from_json(r#"{ "muted": true, "assets": { "music": "a.ogg" } }"#).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.assets.music, PathBuf::from("a.ogg"));
        assert_eq!(settings.assets.font, AssetPaths::default().font);
        assert_eq!(settings.target_fps, 60);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let settings =
            Settings::from_json(r#"{ "sfx_volume": 3.0, "music_volume": -1.0, "target_fps": 0 }"#)
                .unwrap();
        assert_eq!(settings.sfx_volume, 1.0);
        assert_eq!(settings.music_volume, 0.0);
        assert_eq!(settings.target_fps, 60);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Settings::from_json("{ target_fps: ").is_err());
    }

    #[test]
    fn missing_file_is_none() {
        assert!(Settings::load(Path::new("no/such/settings.json")).unwrap().is_none());
    }
}
