//! multipart/form-data body with a single file part.

/// Prefix for generated boundaries; the random part follows it.
const BOUNDARY_PREFIX: &str = "----IconPushBoundary";

/// Bytes of randomness in a boundary (128 bits).
const BOUNDARY_RANDOM_BYTES: usize = 16;

/// Fresh boundary: fixed prefix plus 128 random bits, hex-encoded.
pub fn random_boundary() -> String {
    let token: [u8; BOUNDARY_RANDOM_BYTES] = rand::random();
    format!("{}{}", BOUNDARY_PREFIX, hex::encode(token))
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|w| w == needle)
}

/// A fully assembled request body and the boundary it uses.
#[derive(Debug, Clone)]
pub struct MultipartBody {
    boundary: String,
    bytes: Vec<u8>,
}

impl MultipartBody {
    /// One file part. `filename` and `content_type` go into the part headers verbatim.
    pub fn single_file(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        let mut boundary = random_boundary();
        while contains(data, boundary.as_bytes()) {
            boundary = random_boundary();
        }
        Self::with_boundary(boundary, field, filename, content_type, data)
    }

    pub(crate) fn with_boundary(
        boundary: String,
        field: &str,
        filename: &str,
        content_type: &str,
        data: &[u8],
    ) -> Self {
        let head = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n",
            b = boundary,
        );
        let tail = format!("\r\n--{}--\r\n", boundary);

        let mut bytes = Vec::with_capacity(head.len() + data.len() + tail.len());
        bytes.extend_from_slice(head.as_bytes());
        bytes.extend_from_slice(data);
        bytes.extend_from_slice(tail.as_bytes());

        Self { boundary, bytes }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Value for the request's `Content-Type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Exact byte length of the assembled body, for the `Content-Length` header.
    pub fn content_length(&self) -> usize {
        self.bytes.len()
    }
}
