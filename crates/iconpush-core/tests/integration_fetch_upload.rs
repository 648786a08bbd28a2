//! Integration tests: catalog download and device upload against a local HTTP server.

mod common;

use common::icon_server::{self, IconServerOptions};
use iconpush_core::error::{FetchError, UploadError};
use iconpush_core::fetch::CatalogFetcher;
use iconpush_core::http::HttpTimeouts;
use iconpush_core::model::{CatalogId, IconAsset, IconFormat};
use iconpush_core::upload::DeviceUploader;
use std::time::Duration;

const GIF: &[u8] = b"GIF89a\x08\x00\x08\x00fake-gif";
const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake-png";

fn timeouts() -> HttpTimeouts {
    HttpTimeouts {
        connect: Duration::from_secs(2),
        request: Duration::from_secs(5),
    }
}

fn id(n: u64) -> CatalogId {
    CatalogId::new(n).unwrap()
}

fn uploader() -> DeviceUploader {
    DeviceUploader::new("/edit", "/ICONS", timeouts())
}

#[test]
fn fetch_prefers_gif() {
    let server = icon_server::start(&[("10.gif", GIF), ("10.png", PNG)]);
    let fetcher = CatalogFetcher::new(&server.base_url, timeouts()).unwrap();

    let asset = fetcher.fetch(id(10)).expect("fetch");
    assert_eq!(asset.format, IconFormat::Gif);
    assert_eq!(asset.bytes, GIF);
    assert_eq!(
        server.catalog_paths(),
        vec!["/content/apps/icon_thumbs/10.gif"]
    );
}

#[test]
fn fetch_falls_back_to_png() {
    let server = icon_server::start(&[("2.png", PNG)]);
    let fetcher = CatalogFetcher::new(&server.base_url, timeouts()).unwrap();

    let asset = fetcher.fetch(id(2)).expect("fetch");
    assert_eq!(asset.format, IconFormat::Png);
    assert_eq!(asset.bytes, PNG);
    assert_eq!(
        server.catalog_paths(),
        vec![
            "/content/apps/icon_thumbs/2.gif",
            "/content/apps/icon_thumbs/2.png"
        ]
    );
}

#[test]
fn fetch_empty_body_counts_as_miss() {
    let server = icon_server::start(&[("3.gif", &b""[..]), ("3.png", PNG)]);
    let fetcher = CatalogFetcher::new(&server.base_url, timeouts()).unwrap();

    let asset = fetcher.fetch(id(3)).expect("fetch");
    assert_eq!(asset.format, IconFormat::Png);
}

#[test]
fn fetch_not_found_in_any_format() {
    let server = icon_server::start(&[]);
    let fetcher = CatalogFetcher::new(&server.base_url, timeouts()).unwrap();

    match fetcher.fetch(id(99999)) {
        Err(FetchError::IconNotFound { catalog_id }) => assert_eq!(catalog_id, id(99999)),
        other => panic!("expected IconNotFound, got {:?}", other),
    }
    assert_eq!(server.catalog_paths().len(), 2);
}

#[test]
fn fetch_transport_error_is_not_a_miss() {
    let base = format!("http://{}", icon_server::closed_address());
    let fetcher = CatalogFetcher::new(&base, timeouts()).unwrap();

    match fetcher.fetch(id(5)) {
        Err(FetchError::Transport { catalog_id, .. }) => assert_eq!(catalog_id, id(5)),
        other => panic!("expected Transport, got {:?}", other),
    }
}

fn gif_asset() -> IconAsset {
    IconAsset {
        bytes: GIF.to_vec(),
        format: IconFormat::Gif,
    }
}

#[test]
fn upload_ok_statuses_return_true() {
    for status in [200, 201] {
        let server =
            icon_server::start_with_options(&[], IconServerOptions { upload_status: status });
        assert!(
            uploader().upload(&server.address, "stock-up", &gif_asset()),
            "status {} should count as success",
            status
        );
        assert_eq!(server.uploads().len(), 1);
    }
}

#[test]
fn upload_error_statuses_return_false() {
    for status in [404, 500] {
        let server =
            icon_server::start_with_options(&[], IconServerOptions { upload_status: status });
        assert!(!uploader().upload(&server.address, "stock-up", &gif_asset()));
        match uploader().try_upload(&server.address, "stock-up", &gif_asset()) {
            Err(UploadError::Status(s)) => assert_eq!(s, status),
            other => panic!("expected Status error, got {:?}", other),
        }
    }
}

#[test]
fn upload_connection_failure_returns_false() {
    let address = icon_server::closed_address();
    assert!(!uploader().upload(&address, "stock-up", &gif_asset()));
    assert!(matches!(
        uploader().try_upload(&address, "stock-up", &gif_asset()),
        Err(UploadError::Transport(_))
    ));
}

#[test]
fn upload_sends_single_file_part() {
    let server = icon_server::start(&[]);
    let remote = uploader()
        .try_upload(&server.address, "my icon!@#", &gif_asset())
        .expect("upload");
    assert_eq!(remote, "/ICONS/my_icon.gif");

    let uploads = server.uploads();
    assert_eq!(uploads.len(), 1);
    let req = &uploads[0];
    assert_eq!(req.path, "/edit");

    let content_type = req.header("Content-Type").expect("content type");
    let boundary = content_type
        .strip_prefix("multipart/form-data; boundary=")
        .expect("multipart content type");
    assert!(boundary.len() >= 32);

    let declared: usize = req.header("Content-Length").unwrap().parse().unwrap();
    assert_eq!(declared, req.body.len());

    let part = icon_server::parse_single_part(&req.body, boundary);
    assert_eq!(
        part.disposition,
        "form-data; name=\"data\"; filename=\"/ICONS/my_icon.gif\""
    );
    assert_eq!(part.content_type, "image/gif");
    assert_eq!(part.data, GIF);
}

#[test]
fn upload_uses_fresh_boundary_each_time() {
    let server = icon_server::start(&[]);
    let up = uploader();
    assert!(up.upload(&server.address, "a", &gif_asset()));
    assert!(up.upload(&server.address, "b", &gif_asset()));

    let boundaries: Vec<String> = server
        .uploads()
        .iter()
        .map(|r| r.header("Content-Type").unwrap().to_string())
        .collect();
    assert_eq!(boundaries.len(), 2);
    assert_ne!(boundaries[0], boundaries[1]);
}

#[test]
fn upload_png_declares_png() {
    let server = icon_server::start(&[]);
    let asset = IconAsset {
        bytes: PNG.to_vec(),
        format: IconFormat::Png,
    };
    assert!(uploader().upload(&server.address, "chart", &asset));

    let req = &server.uploads()[0];
    let boundary = req
        .header("Content-Type")
        .unwrap()
        .strip_prefix("multipart/form-data; boundary=")
        .unwrap()
        .to_string();
    let part = icon_server::parse_single_part(&req.body, &boundary);
    assert!(part.disposition.ends_with("filename=\"/ICONS/chart.png\""));
    assert_eq!(part.content_type, "image/png");
    assert_eq!(part.data, PNG);
}
