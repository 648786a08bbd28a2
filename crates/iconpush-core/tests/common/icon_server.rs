//! Minimal HTTP/1.1 server standing in for both the icon catalog and the device.
//!
//! GET `/content/apps/icon_thumbs/<file>` serves bytes from a map (404 when absent).
//! POST `/edit` records the request and answers with a configurable status.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

const THUMBS_PREFIX: &str = "/content/apps/icon_thumbs/";

#[derive(Debug, Clone, Copy)]
pub struct IconServerOptions {
    /// Status returned for every POST to /edit.
    pub upload_status: u32,
}

impl Default for IconServerOptions {
    fn default() -> Self {
        Self { upload_status: 200 }
    }
}

/// A request received by the server.
#[derive(Debug, Clone)]
pub struct Received {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Received {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub struct IconServer {
    /// Base URL for the catalog, e.g. "http://127.0.0.1:12345".
    pub base_url: String,
    /// Device address, e.g. "127.0.0.1:12345".
    pub address: String,
    log: Arc<Mutex<Vec<Received>>>,
}

impl IconServer {
    pub fn requests(&self) -> Vec<Received> {
        self.log.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<Received> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == "POST")
            .collect()
    }

    pub fn catalog_paths(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == "GET")
            .map(|r| r.path)
            .collect()
    }
}

/// Starts a server serving `icons` (keyed by file name, e.g. "40160.gif").
pub fn start(icons: &[(&str, &[u8])]) -> IconServer {
    start_with_options(icons, IconServerOptions::default())
}

pub fn start_with_options(icons: &[(&str, &[u8])], opts: IconServerOptions) -> IconServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let icons: Arc<HashMap<String, Vec<u8>>> = Arc::new(
        icons
            .iter()
            .map(|(name, bytes)| (name.to_string(), bytes.to_vec()))
            .collect(),
    );
    let log = Arc::new(Mutex::new(Vec::new()));
    let log_srv = Arc::clone(&log);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let icons = Arc::clone(&icons);
            let log = Arc::clone(&log_srv);
            thread::spawn(move || handle(stream, &icons, &log, opts));
        }
    });
    IconServer {
        base_url: format!("http://127.0.0.1:{}", port),
        address: format!("127.0.0.1:{}", port),
        log,
    }
}

/// An address nothing listens on (bind, read the port, drop the listener).
pub fn closed_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("127.0.0.1:{}", port)
}

fn handle(
    mut stream: TcpStream,
    icons: &HashMap<String, Vec<u8>>,
    log: &Mutex<Vec<Received>>,
    opts: IconServerOptions,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let request = match read_request(&mut stream) {
        Some(r) => r,
        None => return,
    };
    let (status, body): (u32, Vec<u8>) = match request.method.as_str() {
        "GET" => match request
            .path
            .strip_prefix(THUMBS_PREFIX)
            .and_then(|file| icons.get(file))
        {
            Some(bytes) => (200, bytes.clone()),
            None => (404, b"not found".to_vec()),
        },
        "POST" if request.path == "/edit" => (opts.upload_status, Vec::new()),
        _ => (405, Vec::new()),
    };
    log.lock().unwrap().push(request);

    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason(status),
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&body);
}

fn reason(status: u32) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

fn read_request(stream: &mut TcpStream) -> Option<Received> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];
    let header_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos;
        }
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = std::str::from_utf8(&buf[..header_end]).ok()?;
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|l| l.split_once(':'))
        .map(|(n, v)| (n.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buf[header_end + 4..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    Some(Received {
        method,
        path,
        headers,
        body,
    })
}

pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// The pieces of a single-part multipart body.
#[derive(Debug)]
pub struct Part {
    pub disposition: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Split a single-file multipart body produced with `boundary`.
pub fn parse_single_part(body: &[u8], boundary: &str) -> Part {
    let opening = format!("--{}\r\n", boundary);
    assert!(body.starts_with(opening.as_bytes()), "body must open with boundary");
    let rest = &body[opening.len()..];
    let head_end = find(rest, b"\r\n\r\n").expect("part headers");
    let head = std::str::from_utf8(&rest[..head_end]).unwrap();
    let mut disposition = String::new();
    let mut content_type = String::new();
    for line in head.split("\r\n") {
        let (name, value) = line.split_once(':').unwrap();
        if name.eq_ignore_ascii_case("content-disposition") {
            disposition = value.trim().to_string();
        } else if name.eq_ignore_ascii_case("content-type") {
            content_type = value.trim().to_string();
        }
    }
    let closing = format!("\r\n--{}--\r\n", boundary);
    assert!(body.ends_with(closing.as_bytes()), "body must close with boundary");
    let data_start = opening.len() + head_end + 4;
    let data_end = body.len() - closing.len();
    Part {
        disposition,
        content_type,
        data: body[data_start..data_end].to_vec(),
    }
}
