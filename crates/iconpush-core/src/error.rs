//! Error kinds for pre-flight validation, catalog downloads and device uploads.
//!
//! Pre-flight errors abort the whole invocation before any network call.
//! Fetch and upload errors are per-icon: the pipeline records them and moves on.

use thiserror::Error;

use crate::model::CatalogId;

/// Invalid user input detected before any icon is processed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("'{0}' does not appear to be a valid IP address or hostname")]
    InvalidAddress(String),
    #[error("icon ID must be a positive integer, got '{0}'")]
    InvalidIconId(String),
    #[error("no icons specified")]
    NoIconsSpecified,
}

/// Failure to download an icon from the catalog.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Every format in the preference order was missing (non-2xx or empty body).
    #[error("could not download icon {catalog_id} - icon not found or server error")]
    IconNotFound { catalog_id: CatalogId },
    /// Curl reported an error (timeout, connection refused, DNS, ...).
    #[error("download of icon {catalog_id} failed: {source}")]
    Transport {
        catalog_id: CatalogId,
        #[source]
        source: curl::Error,
    },
    /// The configured catalog base URL could not be joined with the icon path.
    #[error("invalid catalog URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Failure to push an icon to the device.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Device answered with something other than 200/201.
    #[error("upload failed with status {0}")]
    Status(u32),
    #[error("upload failed: {0}")]
    Transport(#[from] curl::Error),
}
