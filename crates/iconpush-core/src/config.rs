use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::model::{CatalogId, IconRequest};

/// Built-in icon set for the stock display blueprint, in upload order.
const BUILTIN_DEFAULT_ICONS: [(&str, u64); 3] = [
    ("stock-up", 40160),
    ("stock-down", 40176),
    ("stock-neutral", 40161),
];

/// One entry of the default icon table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultIcon {
    pub name: String,
    pub id: CatalogId,
}

impl From<&DefaultIcon> for IconRequest {
    fn from(icon: &DefaultIcon) -> Self {
        IconRequest::new(icon.name.clone(), icon.id)
    }
}

fn builtin_default_icons() -> Vec<DefaultIcon> {
    BUILTIN_DEFAULT_ICONS
        .iter()
        .filter_map(|(name, id)| {
            CatalogId::new(*id).map(|id| DefaultIcon {
                name: (*name).to_string(),
                id,
            })
        })
        .collect()
}

/// Configuration, optionally read from `~/.config/iconpush/config.toml`.
///
/// Every field has a default, so a partial file only overrides what it names.
/// The file is never created or rewritten by iconpush.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IconPushConfig {
    /// Base URL of the icon catalog; icons live under `content/apps/icon_thumbs/`.
    pub catalog_url: String,
    /// Device path that accepts multipart file uploads.
    pub upload_path: String,
    /// Device-side directory the icons are written to.
    pub icons_dir: String,
    /// Whole-request timeout in seconds, applied to every download and upload.
    pub request_timeout_secs: u64,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Icons selected by `--default-icons`.
    pub default_icons: Vec<DefaultIcon>,
}

impl Default for IconPushConfig {
    fn default() -> Self {
        Self {
            catalog_url: "https://developer.lametric.com".to_string(),
            upload_path: "/edit".to_string(),
            icons_dir: "/ICONS".to_string(),
            request_timeout_secs: 10,
            connect_timeout_secs: 10,
            default_icons: builtin_default_icons(),
        }
    }
}

impl IconPushConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Default icon table as requests, in table order.
    pub fn default_requests(&self) -> Vec<IconRequest> {
        self.default_icons.iter().map(IconRequest::from).collect()
    }

    /// Rejects values that would make every request fail.
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }
        if self.connect_timeout_secs == 0 {
            anyhow::bail!("connect_timeout_secs must be greater than 0");
        }
        url::Url::parse(&self.catalog_url)
            .with_context(|| format!("invalid catalog_url '{}'", self.catalog_url))?;
        if !self.upload_path.starts_with('/') {
            anyhow::bail!("upload_path must start with '/', got '{}'", self.upload_path);
        }
        Ok(())
    }

    pub fn from_toml_str(data: &str) -> Result<Self> {
        let cfg: IconPushConfig = toml::from_str(data)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Standard location of the config file, if the XDG dirs can be determined.
pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("iconpush")?;
    Ok(xdg_dirs.get_config_home().join("iconpush").join("config.toml"))
}

/// Load configuration from `path`. The file must exist.
pub fn load_from_path(path: &Path) -> Result<IconPushConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    IconPushConfig::from_toml_str(&data).with_context(|| format!("parse config {}", path.display()))
}

/// Load configuration from an explicit path, else the standard location if
/// present, else built-in defaults.
pub fn load(explicit: Option<&Path>) -> Result<IconPushConfig> {
    if let Some(path) = explicit {
        return load_from_path(path);
    }
    match config_path() {
        Ok(path) if path.exists() => {
            tracing::debug!("loading config from {}", path.display());
            load_from_path(&path)
        }
        _ => Ok(IconPushConfig::default()),
    }
}
