//! Fetch → upload for each requested icon, in order.
//!
//! A failing icon is recorded and skipped; it never stops the batch.

use crate::config::IconPushConfig;
use crate::error::{FetchError, UploadError};
use crate::fetch::CatalogFetcher;
use crate::model::{CatalogId, IconAsset, IconFormat, IconRequest, Tally, UploadResult};
use crate::upload::DeviceUploader;

/// Where icon bytes come from.
pub trait IconSource {
    fn fetch_icon(&self, catalog_id: CatalogId) -> Result<IconAsset, FetchError>;
}

/// Where icons go. Returns the device-side path on success.
pub trait IconSink {
    fn push_icon(
        &self,
        device_address: &str,
        name: &str,
        asset: &IconAsset,
    ) -> Result<String, UploadError>;
}

impl IconSource for CatalogFetcher {
    fn fetch_icon(&self, catalog_id: CatalogId) -> Result<IconAsset, FetchError> {
        self.fetch(catalog_id)
    }
}

impl IconSink for DeviceUploader {
    fn push_icon(
        &self,
        device_address: &str,
        name: &str,
        asset: &IconAsset,
    ) -> Result<String, UploadError> {
        self.try_upload(device_address, name, asset)
    }
}

/// Step at which an icon failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    Fetch,
    Upload,
}

/// Progress notifications emitted while a batch runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent<'a> {
    Started(&'a IconRequest),
    Downloaded {
        request: &'a IconRequest,
        format: IconFormat,
        bytes: usize,
    },
    Uploaded {
        request: &'a IconRequest,
        remote_path: String,
    },
    Failed {
        request: &'a IconRequest,
        stage: FailureStage,
        detail: String,
    },
}

/// Runs icon requests through a source and a sink.
#[derive(Debug, Clone)]
pub struct IconPipeline<S, K> {
    source: S,
    sink: K,
}

impl IconPipeline<CatalogFetcher, DeviceUploader> {
    /// Catalog fetcher and device uploader built from `cfg`.
    pub fn from_config(cfg: &IconPushConfig) -> Result<Self, FetchError> {
        Ok(Self::new(
            CatalogFetcher::from_config(cfg)?,
            DeviceUploader::from_config(cfg),
        ))
    }
}

impl<S: IconSource, K: IconSink> IconPipeline<S, K> {
    pub fn new(source: S, sink: K) -> Self {
        Self { source, sink }
    }

    /// Process every request in order; one result per request, same order.
    pub fn process_all(
        &self,
        device_address: &str,
        requests: &[IconRequest],
    ) -> Vec<UploadResult> {
        self.process_all_with(device_address, requests, |_| {})
    }

    /// Like [`process_all`](Self::process_all), reporting progress to `on_event`.
    pub fn process_all_with<F>(
        &self,
        device_address: &str,
        requests: &[IconRequest],
        mut on_event: F,
    ) -> Vec<UploadResult>
    where
        F: FnMut(PipelineEvent<'_>),
    {
        let mut results = Vec::with_capacity(requests.len());
        for request in requests {
            on_event(PipelineEvent::Started(request));
            let result = self.process_one(device_address, request, &mut on_event);
            results.push(result);
        }

        let tally = Tally::from_results(&results);
        tracing::info!(
            device = device_address,
            succeeded = tally.succeeded,
            total = tally.total,
            "batch finished"
        );
        results
    }

    fn process_one<F>(
        &self,
        device_address: &str,
        request: &IconRequest,
        on_event: &mut F,
    ) -> UploadResult
    where
        F: FnMut(PipelineEvent<'_>),
    {
        let fail = |on_event: &mut F, stage: FailureStage, detail: String| {
            tracing::warn!(name = %request.name, catalog_id = %request.catalog_id, ?stage, "{}", detail);
            on_event(PipelineEvent::Failed {
                request,
                stage,
                detail: detail.clone(),
            });
            UploadResult::failed(request, detail)
        };

        let asset = match self.source.fetch_icon(request.catalog_id) {
            Ok(asset) => asset,
            Err(e) => return fail(on_event, FailureStage::Fetch, e.to_string()),
        };
        on_event(PipelineEvent::Downloaded {
            request,
            format: asset.format,
            bytes: asset.bytes.len(),
        });

        match self.sink.push_icon(device_address, &request.name, &asset) {
            Ok(remote_path) => {
                on_event(PipelineEvent::Uploaded {
                    request,
                    remote_path,
                });
                UploadResult::succeeded(request)
            }
            Err(e) => fail(on_event, FailureStage::Upload, e.to_string()),
        }
    }
}
