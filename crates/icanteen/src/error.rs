// ABOUTME: Error types for the iCanteen extractor: the public ExtractError and its ErrorCode.
// ABOUTME: Internal failures (fetch, layout, verification) are classified into one ErrorCode at the Extractor boundary.

use std::fmt;

use thiserror::Error;

/// Error codes a caller can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The URL could not be parsed or its scheme is not http/https.
    InvalidUrl,
    /// Transport failure: timeout, TLS, refused or reset connection, unreadable body.
    Network,
    /// The server answered with something other than 200.
    HttpStatus(u16),
    /// None of the known layouts recognized the document.
    Parse,
    /// The document was understood but no menu was published.
    NoMenu,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::InvalidUrl => write!(f, "invalid URL"),
            ErrorCode::Network => write!(f, "network error"),
            ErrorCode::HttpStatus(status) => write!(f, "HTTP status {}", status),
            ErrorCode::Parse => write!(f, "unrecognized menu layout"),
            ErrorCode::NoMenu => write!(f, "no food menu published"),
        }
    }
}

/// The error returned by every public extraction operation.
#[derive(Debug, Error)]
pub struct ExtractError {
    pub code: ErrorCode,
    pub url: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "icanteen: {}", self.op)?;
        if !self.url.is_empty() {
            write!(f, " {}", self.url)?;
        }
        write!(f, ": {}", self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl ExtractError {
    fn new(
        code: ErrorCode,
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create an InvalidUrl error.
    pub fn invalid_url(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::InvalidUrl, url, op, source)
    }

    /// Create a Network error.
    pub fn network(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::Network, url, op, source)
    }

    /// Create an HttpStatus error carrying the observed status code.
    pub fn http_status(url: impl Into<String>, op: impl Into<String>, status: u16) -> Self {
        Self::new(ErrorCode::HttpStatus(status), url, op, None)
    }

    /// Create a Parse error.
    pub fn parse(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::Parse, url, op, source)
    }

    /// Create a NoMenu error.
    pub fn no_menu(url: impl Into<String>, op: impl Into<String>) -> Self {
        Self::new(ErrorCode::NoMenu, url, op, None)
    }

    /// Returns true if this is an InvalidUrl error.
    pub fn is_invalid_url(&self) -> bool {
        self.code == ErrorCode::InvalidUrl
    }

    /// Returns true if this is a Network error.
    pub fn is_network(&self) -> bool {
        self.code == ErrorCode::Network
    }

    /// Returns true if this is an HttpStatus error.
    pub fn is_http_status(&self) -> bool {
        matches!(self.code, ErrorCode::HttpStatus(_))
    }

    /// The HTTP status carried by an HttpStatus error.
    pub fn status(&self) -> Option<u16> {
        match self.code {
            ErrorCode::HttpStatus(status) => Some(status),
            _ => None,
        }
    }

    /// Returns true if this is a Parse error.
    pub fn is_parse(&self) -> bool {
        self.code == ErrorCode::Parse
    }

    /// Returns true if this is a NoMenu error.
    ///
    /// Callers usually treat this as "the canteen published nothing" rather than a failure.
    pub fn is_no_menu(&self) -> bool {
        self.code == ErrorCode::NoMenu
    }
}

/// Why a single layout rejected a document.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("{layout}: no element matches {selector}")]
    MissingAnchor {
        layout: &'static str,
        selector: &'static str,
    },

    #[error("{layout}: element has no {attr} attribute")]
    MissingAttr {
        layout: &'static str,
        attr: &'static str,
    },

    #[error("{layout}: cannot read a date from {value:?}")]
    InvalidDate {
        layout: &'static str,
        value: String,
        #[source]
        source: Option<chrono::ParseError>,
    },

    #[error("invalid selector {0:?}")]
    Selector(&'static str),
}

/// Raised by the verification pass when nothing survives cleanup.
#[derive(Debug, Error)]
#[error("no food menu was present in the document")]
pub struct NoMenuError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_op_url_and_code() {
        let err = ExtractError::http_status("https://example.com/login", "Extract", 503);
        assert_eq!(
            err.to_string(),
            "icanteen: Extract https://example.com/login: HTTP status 503"
        );
    }

    #[test]
    fn display_appends_source() {
        let err = ExtractError::parse(
            "",
            "ParseHtml",
            Some(anyhow::Error::new(LayoutError::MissingAnchor {
                layout: "old-extended",
                selector: "div.jidelnicekDen",
            })),
        );
        assert_eq!(
            err.to_string(),
            "icanteen: ParseHtml: unrecognized menu layout: old-extended: no element matches div.jidelnicekDen"
        );
    }

    #[test]
    fn helpers_match_codes() {
        assert!(ExtractError::invalid_url("ftp://x", "Extract", None).is_invalid_url());
        assert!(ExtractError::network("http://x", "Extract", None).is_network());
        assert!(ExtractError::no_menu("http://x", "Extract").is_no_menu());

        let status = ExtractError::http_status("http://x", "Extract", 404);
        assert!(status.is_http_status());
        assert_eq!(status.status(), Some(404));
        assert!(!status.is_parse());
        assert_eq!(ExtractError::parse("", "ParseHtml", None).status(), None);
    }
}
