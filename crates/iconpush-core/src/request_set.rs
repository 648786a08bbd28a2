//! Collecting the icons to upload from the default table and `--icon` pairs.
//!
//! Names are keys: adding a name that is already present keeps its original
//! position and replaces its catalog id. The overwrite is logged and reported
//! back to the caller so it can be surfaced to the user.

use crate::error::InputError;
use crate::model::{CatalogId, IconRequest};

/// A previous entry that was overwritten by a later request with the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replaced {
    pub name: String,
    pub previous: CatalogId,
    pub current: CatalogId,
}

/// Ordered, name-keyed set of icon requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconSet {
    requests: Vec<IconRequest>,
}

impl IconSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite by name. Returns the overwrite, if any.
    pub fn insert(&mut self, request: IconRequest) -> Option<Replaced> {
        if let Some(existing) = self.requests.iter_mut().find(|r| r.name == request.name) {
            let replaced = Replaced {
                name: request.name.clone(),
                previous: existing.catalog_id,
                current: request.catalog_id,
            };
            tracing::warn!(
                name = %replaced.name,
                previous = %replaced.previous,
                current = %replaced.current,
                "duplicate icon name; later id replaces earlier one"
            );
            existing.catalog_id = request.catalog_id;
            return Some(replaced);
        }
        self.requests.push(request);
        None
    }

    /// Insert every request in order; returns all overwrites.
    pub fn extend<I>(&mut self, requests: I) -> Vec<Replaced>
    where
        I: IntoIterator<Item = IconRequest>,
    {
        requests
            .into_iter()
            .filter_map(|r| self.insert(r))
            .collect()
    }

    /// Parse a user-supplied `NAME ID` pair and insert it.
    pub fn insert_pair(&mut self, name: &str, id: &str) -> Result<Option<Replaced>, InputError> {
        let catalog_id: CatalogId = id.parse()?;
        Ok(self.insert(IconRequest::new(name, catalog_id)))
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn requests(&self) -> &[IconRequest] {
        &self.requests
    }

    /// Final request list; fails with `NoIconsSpecified` when empty.
    pub fn into_requests(self) -> Result<Vec<IconRequest>, InputError> {
        if self.requests.is_empty() {
            return Err(InputError::NoIconsSpecified);
        }
        Ok(self.requests)
    }
}
