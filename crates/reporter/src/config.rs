use std::path::{Path, PathBuf};

use anyhow::Context;
use reporter_core::RecordFormatter;
use reporter_style::StyleMode;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "reporter.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReporterConfig {
    pub base_path: Option<PathBuf>,
    pub style: StyleMode,
}

/// Locate the config file: `./reporter.toml`, then `<config dir>/reporter/config.toml`.
pub fn find_config() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }
    let user = dirs::config_dir()?.join("reporter").join("config.toml");
    user.is_file().then_some(user)
}

pub fn read_config(path: &Path) -> anyhow::Result<ReporterConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: ReporterConfig = toml::from_str(&content)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

/// Effective settings after layering config file and command line flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config_path: Option<PathBuf>,
    pub base_path: PathBuf,
    pub style: StyleMode,
}

impl Settings {
    pub fn resolve(
        explicit: Option<&Path>,
        base_path: Option<PathBuf>,
        style: Option<StyleMode>,
    ) -> anyhow::Result<Self> {
        let config_path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => find_config(),
        };
        let config = match &config_path {
            Some(path) => read_config(path)?,
            None => ReporterConfig::default(),
        };
        tracing::debug!(?config_path, "loaded configuration");

        let base_path = match base_path.or(config.base_path) {
            Some(path) => path,
            None => std::env::current_dir().context("resolving current directory")?,
        };
        Ok(Self {
            config_path,
            base_path,
            style: style.unwrap_or(config.style),
        })
    }

    pub fn formatter(&self) -> RecordFormatter {
        RecordFormatter::new(self.base_path.clone(), self.style.styler())
    }

    pub fn to_config(&self) -> ReporterConfig {
        ReporterConfig {
            base_path: Some(self.base_path.clone()),
            style: self.style,
        }
    }
}
