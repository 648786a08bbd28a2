//! Icon download from the LaMetric catalog with format fallback.
//!
//! Each format in [`IconFormat::PREFERENCE`] is tried in turn against
//! `<catalog>/content/apps/icon_thumbs/<id>.<ext>`:
//!
//! | attempt outcome            | action                    |
//! |----------------------------|---------------------------|
//! | 2xx, non-empty body        | return this format        |
//! | 2xx, empty body            | try next format           |
//! | non-2xx status             | try next format           |
//! | transport error            | fail the icon (Transport) |

use url::Url;

use crate::config::IconPushConfig;
use crate::error::FetchError;
use crate::http::{self, HttpResponse, HttpTimeouts};
use crate::model::{CatalogId, IconAsset, IconFormat};

/// Catalog path holding the 8x8 icon thumbnails.
const ICON_THUMBS_PATH: &str = "content/apps/icon_thumbs/";

/// What a single format attempt told us.
#[derive(Debug)]
enum Attempt {
    Found(Vec<u8>),
    Miss { status: u32 },
}

fn classify(response: HttpResponse) -> Attempt {
    if response.is_success() && !response.body.is_empty() {
        Attempt::Found(response.body)
    } else {
        Attempt::Miss {
            status: response.status,
        }
    }
}

/// Downloads icon bytes from the catalog.
#[derive(Debug, Clone)]
pub struct CatalogFetcher {
    base: Url,
    timeouts: HttpTimeouts,
}

impl CatalogFetcher {
    pub fn new(catalog_url: &str, timeouts: HttpTimeouts) -> Result<Self, FetchError> {
        let mut base = Url::parse(catalog_url)?;
        // Url::join replaces the last segment unless the path ends with '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base, timeouts })
    }

    pub fn from_config(cfg: &IconPushConfig) -> Result<Self, FetchError> {
        Self::new(
            &cfg.catalog_url,
            HttpTimeouts {
                connect: cfg.connect_timeout(),
                request: cfg.request_timeout(),
            },
        )
    }

    /// URL of `catalog_id` in the given format.
    pub fn icon_url(&self, catalog_id: CatalogId, format: IconFormat) -> Result<Url, FetchError> {
        let relative = format!("{}{}.{}", ICON_THUMBS_PATH, catalog_id, format.extension());
        Ok(self.base.join(&relative)?)
    }

    /// Download `catalog_id`, trying each format in preference order.
    pub fn fetch(&self, catalog_id: CatalogId) -> Result<IconAsset, FetchError> {
        for format in IconFormat::PREFERENCE {
            let url = self.icon_url(catalog_id, format)?;
            let response = http::get(url.as_str(), self.timeouts)
                .map_err(|source| FetchError::Transport { catalog_id, source })?;

            match classify(response) {
                Attempt::Found(bytes) => {
                    tracing::info!(%catalog_id, %format, bytes = bytes.len(), "icon downloaded");
                    return Ok(IconAsset { bytes, format });
                }
                Attempt::Miss { status } => {
                    tracing::debug!(%catalog_id, %format, status, "format not available, trying next");
                }
            }
        }

        tracing::warn!(%catalog_id, "icon not found in any format");
        Err(FetchError::IconNotFound { catalog_id })
    }
}
