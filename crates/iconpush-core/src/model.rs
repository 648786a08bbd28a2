//! Icon requests, downloaded assets and per-icon upload results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use crate::error::InputError;

/// Numeric identifier of an icon in the LaMetric catalog. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct CatalogId(NonZeroU64);

impl CatalogId {
    /// Returns `None` for 0.
    pub fn new(id: u64) -> Option<Self> {
        NonZeroU64::new(id).map(CatalogId)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl TryFrom<u64> for CatalogId {
    type Error = InputError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        CatalogId::new(id).ok_or_else(|| InputError::InvalidIconId(id.to_string()))
    }
}

impl From<CatalogId> for u64 {
    fn from(id: CatalogId) -> u64 {
        id.get()
    }
}

impl FromStr for CatalogId {
    type Err = InputError;

    /// Accepts surrounding whitespace and a leading `+`; rejects zero, negatives and non-integers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InputError::InvalidIconId(s.to_string());
        let digits = s.trim();
        let digits = digits.strip_prefix('+').unwrap_or(digits);
        let id: u64 = digits.parse().map_err(|_| invalid())?;
        CatalogId::new(id).ok_or_else(invalid)
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Image encodings the device accepts for icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconFormat {
    Gif,
    Png,
}

impl IconFormat {
    /// Download order: GIF is preferred by the display (animations), PNG is the fallback.
    pub const PREFERENCE: [IconFormat; 2] = [IconFormat::Gif, IconFormat::Png];

    pub fn extension(self) -> &'static str {
        match self {
            IconFormat::Gif => "gif",
            IconFormat::Png => "png",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            IconFormat::Gif => "image/gif",
            IconFormat::Png => "image/png",
        }
    }
}

impl fmt::Display for IconFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// One icon to transfer: the label to store it under and its catalog id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRequest {
    pub name: String,
    pub catalog_id: CatalogId,
}

impl IconRequest {
    pub fn new(name: impl Into<String>, catalog_id: CatalogId) -> Self {
        Self {
            name: name.into(),
            catalog_id,
        }
    }
}

/// Downloaded icon bytes plus the format they were served in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconAsset {
    pub bytes: Vec<u8>,
    pub format: IconFormat,
}

/// Outcome of one `IconRequest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub name: String,
    pub catalog_id: CatalogId,
    pub success: bool,
    /// Diagnostic for failures; `None` on success.
    pub detail: Option<String>,
}

impl UploadResult {
    pub fn succeeded(request: &IconRequest) -> Self {
        Self {
            name: request.name.clone(),
            catalog_id: request.catalog_id,
            success: true,
            detail: None,
        }
    }

    pub fn failed(request: &IconRequest, detail: impl Into<String>) -> Self {
        Self {
            name: request.name.clone(),
            catalog_id: request.catalog_id,
            success: false,
            detail: Some(detail.into()),
        }
    }
}

/// Final success count over a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub succeeded: usize,
    pub total: usize,
}

impl Tally {
    pub fn from_results(results: &[UploadResult]) -> Self {
        Self {
            succeeded: results.iter().filter(|r| r.success).count(),
            total: results.len(),
        }
    }

    pub fn failed(&self) -> usize {
        self.total - self.succeeded
    }

    /// True only when every icon made it; an empty batch is not a success.
    pub fn all_succeeded(&self) -> bool {
        self.total > 0 && self.succeeded == self.total
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} icons uploaded successfully",
            self.succeeded, self.total
        )
    }
}
