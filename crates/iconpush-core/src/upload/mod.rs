//! Upload of icons to the device's file-upload endpoint.
//!
//! The device exposes `POST http://<address>/edit` taking a multipart form with
//! one file part named `data`; the part's filename is the absolute target
//! path on the device (e.g. `/ICONS/stock-up.gif`).

mod multipart;

pub use multipart::{random_boundary, MultipartBody};

use crate::config::IconPushConfig;
use crate::error::UploadError;
use crate::http::{self, HttpTimeouts};
use crate::model::IconAsset;
use crate::sanitize::sanitize_icon_name;

/// Form field the device reads the file from.
const FORM_FIELD: &str = "data";

/// Pushes icon files to a device.
#[derive(Debug, Clone)]
pub struct DeviceUploader {
    upload_path: String,
    icons_dir: String,
    timeouts: HttpTimeouts,
}

impl Default for DeviceUploader {
    fn default() -> Self {
        Self::from_config(&IconPushConfig::default())
    }
}

impl DeviceUploader {
    pub fn new(upload_path: &str, icons_dir: &str, timeouts: HttpTimeouts) -> Self {
        Self {
            upload_path: upload_path.to_string(),
            icons_dir: icons_dir.trim_end_matches('/').to_string(),
            timeouts,
        }
    }

    pub fn from_config(cfg: &IconPushConfig) -> Self {
        Self::new(
            &cfg.upload_path,
            &cfg.icons_dir,
            HttpTimeouts {
                connect: cfg.connect_timeout(),
                request: cfg.request_timeout(),
            },
        )
    }

    /// Upload endpoint for `device_address`.
    pub fn endpoint(&self, device_address: &str) -> String {
        format!("http://{}{}", device_address, self.upload_path)
    }

    /// Device-side path for an icon: `<icons_dir>/<sanitized name>.<ext>`.
    pub fn remote_path(&self, name: &str, asset: &IconAsset) -> String {
        format!(
            "{}/{}.{}",
            self.icons_dir,
            sanitize_icon_name(name),
            asset.format.extension()
        )
    }

    /// Upload and return the device-side path on success.
    pub fn try_upload(
        &self,
        device_address: &str,
        name: &str,
        asset: &IconAsset,
    ) -> Result<String, UploadError> {
        let remote_path = self.remote_path(name, asset);
        let body = MultipartBody::single_file(
            FORM_FIELD,
            &remote_path,
            asset.format.content_type(),
            &asset.bytes,
        );
        let headers = [
            format!("Content-Type: {}", body.content_type()),
            format!("Content-Length: {}", body.content_length()),
        ];

        let url = self.endpoint(device_address);
        let response = http::post(&url, &headers, body.as_bytes(), self.timeouts)?;
        match response.status {
            200 | 201 => {
                tracing::info!(path = %remote_path, device = device_address, "icon uploaded");
                Ok(remote_path)
            }
            status => Err(UploadError::Status(status)),
        }
    }

    /// Upload; never fails. Returns false and logs the reason on any error.
    pub fn upload(&self, device_address: &str, name: &str, asset: &IconAsset) -> bool {
        match self.try_upload(device_address, name, asset) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(name, device = device_address, "{}", e);
                false
            }
        }
    }
}
