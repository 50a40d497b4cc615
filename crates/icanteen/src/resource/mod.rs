// ABOUTME: Fetching of iCanteen login pages behind the Fetcher trait.
// ABOUTME: HttpFetcher does one blocking GET with redirects and caching disabled and decodes the body charset.

use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE, PRAGMA};
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

/// Maximum accepted body size (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// Per-call request settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// User-Agent header; no header is sent when `None`.
    pub user_agent: Option<String>,
    /// Applied to both connecting and the whole request; `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

/// Why a page could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("the connection to the canteen server timed out")]
    Timeout(#[source] reqwest::Error),

    #[error("failed to connect to the canteen server")]
    Connect(#[source] reqwest::Error),

    #[error("request to the canteen server failed")]
    Request(#[source] reqwest::Error),

    #[error("the canteen server reported HTTP status {0}")]
    Status(u16),

    #[error("failed to read the response body")]
    Body(#[source] std::io::Error),

    #[error("response body exceeds {0} bytes")]
    TooLarge(usize),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err)
        } else if err.is_connect() {
            FetchError::Connect(err)
        } else {
            FetchError::Request(err)
        }
    }
}

/// Retrieves the HTML of a page.
///
/// Implementations must return the body only for a 200 response, must not follow
/// redirects and must not serve cached responses.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &Url, opts: &FetchOptions) -> Result<String, FetchError>;
}

/// The default [`Fetcher`], backed by a blocking reqwest client.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpFetcher;

impl HttpFetcher {
    fn client(opts: &FetchOptions) -> Result<Client, FetchError> {
        let mut builder = Client::builder().redirect(Policy::none());
        if let Some(ua) = &opts.user_agent {
            builder = builder.user_agent(ua.as_str());
        }
        if let Some(timeout) = opts.timeout {
            builder = builder.connect_timeout(timeout).timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &Url, opts: &FetchOptions) -> Result<String, FetchError> {
        let client = Self::client(opts)?;
        let response = client
            .get(url.clone())
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        if let Some(len) = response.content_length() {
            if len as usize > MAX_CONTENT_LENGTH {
                return Err(FetchError::TooLarge(MAX_CONTENT_LENGTH));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_lowercase());

        let body = read_capped(response, MAX_CONTENT_LENGTH)?;
        Ok(decode_body(&body, content_type.as_deref()))
    }
}

/// Reads at most `limit` bytes; a body with anything left over is rejected.
fn read_capped(reader: impl Read, limit: usize) -> Result<Vec<u8>, FetchError> {
    let mut body = Vec::new();
    reader
        .take(limit as u64 + 1)
        .read_to_end(&mut body)
        .map_err(FetchError::Body)?;
    if body.len() > limit {
        return Err(FetchError::TooLarge(limit));
    }
    Ok(body)
}

/// Decode body bytes using the Content-Type charset, falling back to detection.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(charset) = content_type.and_then(extract_charset) {
        if let Some(encoding) = encoding_rs::Encoding::for_label(charset.as_bytes()) {
            let (decoded, _, _) = encoding.decode(body);
            return decoded.into_owned();
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Extract the charset value from a Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .to_lowercase()
        .split(';')
        .find_map(|part| part.trim().strip_prefix("charset=").map(str::to_string))
        .map(|charset| charset.trim_matches(|c| c == '"' || c == '\'').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn url(server: &MockServer, path: &str) -> Url {
        Url::parse(&server.url(path)).unwrap()
    }

    #[test]
    fn fetch_ok_utf8() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/login");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body("<p>Jídelníček</p>");
        });

        let body = HttpFetcher
            .fetch(&url(&server, "/login"), &FetchOptions::default())
            .expect("fetch should succeed");
        mock.assert();
        assert_eq!(body, "<p>Jídelníček</p>");
    }

    #[test]
    fn fetch_sends_user_agent_and_no_cache() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/login")
                .header("user-agent", "icanteen-test/1.0")
                .header("cache-control", "no-cache");
            then.status(200).body("ok");
        });

        let opts = FetchOptions {
            user_agent: Some("icanteen-test/1.0".to_string()),
            timeout: Some(Duration::from_secs(5)),
        };
        let body = HttpFetcher.fetch(&url(&server, "/login"), &opts).unwrap();
        mock.assert();
        assert_eq!(body, "ok");
    }

    #[test]
    fn fetch_non_200_rejected() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404).body("not found");
        });

        let err = HttpFetcher
            .fetch(&url(&server, "/missing"), &FetchOptions::default())
            .expect_err("should fail on 404");
        mock.assert();
        assert!(matches!(err, FetchError::Status(404)));
    }

    #[test]
    fn fetch_does_not_follow_redirects() {
        let server = MockServer::start();
        let redirect = server.mock(|when, then| {
            when.method(GET).path("/login");
            then.status(302).header("location", "/faces/login.jsp");
        });
        let target = server.mock(|when, then| {
            when.method(GET).path("/faces/login.jsp");
            then.status(200).body("moved");
        });

        let err = HttpFetcher
            .fetch(&url(&server, "/login"), &FetchOptions::default())
            .expect_err("redirect must not be followed");
        redirect.assert();
        target.assert_hits(0);
        assert!(matches!(err, FetchError::Status(302)));
    }

    #[test]
    fn fetch_refused_connection_is_connect_error() {
        // Bind then drop a listener to get a port nothing listens on.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = Url::parse(&format!("http://127.0.0.1:{}/login", port)).unwrap();

        let opts = FetchOptions {
            timeout: Some(Duration::from_secs(2)),
            ..Default::default()
        };
        let err = HttpFetcher.fetch(&url, &opts).expect_err("nothing listens");
        assert!(matches!(err, FetchError::Connect(_) | FetchError::Timeout(_)));
    }

    #[test]
    fn decode_windows_1250_from_header() {
        // "Guláš" in windows-1250
        let bytes: &[u8] = &[0x47, 0x75, 0x6c, 0xe1, 0x9a];
        assert_eq!(
            decode_body(bytes, Some("text/html; charset=windows-1250")),
            "Guláš"
        );
    }

    #[test]
    fn decode_utf8_without_header() {
        assert_eq!(decode_body("Svíčková".as_bytes(), None), "Svíčková");
    }

    #[test]
    fn body_over_limit_is_rejected_while_reading() {
        let err = read_capped(std::io::repeat(b'a').take(11), 10).unwrap_err();
        assert!(matches!(err, FetchError::TooLarge(10)));

        let body = read_capped(std::io::repeat(b'a').take(10), 10).unwrap();
        assert_eq!(body.len(), 10);
    }

    #[test]
    fn test_extract_charset() {
        assert_eq!(
            extract_charset("text/html; charset=UTF-8"),
            Some("utf-8".to_string())
        );
        assert_eq!(
            extract_charset("text/html; charset=\"windows-1250\""),
            Some("windows-1250".to_string())
        );
        assert_eq!(extract_charset("text/html"), None);
    }
}
