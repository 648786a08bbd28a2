//! Blocking HTTP helpers over libcurl easy handles.
//!
//! Both helpers return the status code as data: deciding what a non-2xx
//! status means is left to the caller. Only transport failures (timeout,
//! connection refused, DNS) come back as `Err`.

use std::time::Duration;

const USER_AGENT: &str = concat!("iconpush/", env!("CARGO_PKG_VERSION"));

/// Timeouts applied to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub connect: Duration,
    /// Upper bound for the whole request, including body transfer.
    pub request: Duration,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            request: Duration::from_secs(10),
        }
    }
}

/// Status code and body of a completed request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn configure(
    easy: &mut curl::easy::Easy,
    url: &str,
    timeouts: HttpTimeouts,
) -> Result<(), curl::Error> {
    easy.url(url)?;
    easy.useragent(USER_AGENT)?;
    easy.connect_timeout(timeouts.connect)?;
    easy.timeout(timeouts.request)?;
    Ok(())
}

/// GET `url`, following redirects, and buffer the body in memory.
pub fn get(url: &str, timeouts: HttpTimeouts) -> Result<HttpResponse, curl::Error> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    configure(&mut easy, url, timeouts)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    tracing::debug!(url, status, bytes = body.len(), "GET complete");
    Ok(HttpResponse { status, body })
}

/// POST `body` to `url` with the given extra header lines (`"Name: value"`).
///
/// `Expect: 100-continue` is suppressed; the device's embedded server never answers it.
pub fn post(
    url: &str,
    headers: &[String],
    body: &[u8],
    timeouts: HttpTimeouts,
) -> Result<HttpResponse, curl::Error> {
    let mut response = Vec::new();

    let mut easy = curl::easy::Easy::new();
    configure(&mut easy, url, timeouts)?;
    easy.post(true)?;
    easy.post_fields_copy(body)?;

    let mut list = curl::easy::List::new();
    for h in headers {
        list.append(h)?;
    }
    list.append("Expect:")?;
    easy.http_headers(list)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            response.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    tracing::debug!(url, status, sent = body.len(), "POST complete");
    Ok(HttpResponse {
        status,
        body: response,
    })
}
