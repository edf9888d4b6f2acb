use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use compressor_core::Quality;
use compressor_engine::ApiSettings;
use compressor_logging::{compressor_info, compressor_warn};
use serde::Deserialize;

use super::cli::Cli;

pub const DEFAULT_SETTINGS_FILE: &str = "compressor.ron";

/// User-editable settings, read from a RON file. Missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base: String,
    pub download_dir: PathBuf,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub health_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub initial_quality: u8,
}

impl Default for Settings {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            api_base: api.base_url,
            download_dir: PathBuf::from("downloads"),
            connect_timeout_secs: api.connect_timeout.as_secs(),
            request_timeout_secs: api.request_timeout.as_secs(),
            health_timeout_secs: api.health_timeout.as_secs(),
            max_response_bytes: api.max_response_bytes,
            initial_quality: Quality::DEFAULT.value(),
        }
    }
}

impl Settings {
    /// Defaults, then the settings file, then command-line flags.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut settings = match &cli.config {
            Some(path) => load_settings(path, true)?,
            None => load_settings(Path::new(DEFAULT_SETTINGS_FILE), false)?,
        };
        if let Some(api_base) = &cli.api_base {
            settings.api_base = api_base.clone();
        }
        if let Some(dir) = &cli.download_dir {
            settings.download_dir = dir.clone();
        }
        Ok(settings)
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api_base.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            health_timeout: Duration::from_secs(self.health_timeout_secs),
            max_response_bytes: self.max_response_bytes,
        }
    }

    pub fn initial_quality(&self) -> Quality {
        Quality::clamped(i64::from(self.initial_quality))
    }
}

/// Reads settings from `path`.
///
/// A missing file yields defaults unless `required` is set. A file that
/// does not parse is reported and ignored.
pub(crate) fn load_settings(path: &Path, required: bool) -> Result<Settings> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
            return Ok(Settings::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("reading settings from {}", path.display()));
        }
    };

    match ron::from_str::<Settings>(&content) {
        Ok(settings) => {
            compressor_info!("Loaded settings from {:?}", path);
            Ok(settings)
        }
        Err(err) => {
            compressor_warn!("Failed to parse settings from {:?}: {}", path, err);
            eprintln!(
                "Warning: ignoring malformed settings file {}: {}",
                path.display(),
                err
            );
            Ok(Settings::default())
        }
    }
}
