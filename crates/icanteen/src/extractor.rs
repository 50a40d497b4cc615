// ABOUTME: The Extractor: fetches an iCanteen login page and turns it into a verified Menu.
// ABOUTME: Tries every Layout in priority order, then runs the verification pass and classifies failures.

use std::fmt;
use std::sync::Arc;

use scraper::Html;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ExtractError, LayoutError};
use crate::layouts::Layout;
use crate::menu::Menu;
use crate::options::{ExtractorBuilder, Options};
use crate::resource::{FetchError, Fetcher};
use crate::verify::verify;

/// Schemes the Extractor is willing to fetch.
const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

/// Fetches and parses food menus from iCanteen login pages.
///
/// The login page URL usually looks like `https://strav.nasejidelna.cz/0051/login`.
/// An Extractor only holds immutable configuration, so one instance can serve
/// many threads.
#[derive(Clone)]
pub struct Extractor {
    opts: Options,
    fetcher: Arc<dyn Fetcher>,
}

impl Extractor {
    pub(crate) fn new(opts: Options, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { opts, fetcher }
    }

    /// Create a new ExtractorBuilder for configuring an Extractor.
    pub fn builder() -> ExtractorBuilder {
        ExtractorBuilder::new()
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Fetches the page at `url` and extracts its food menu.
    pub fn extract(&self, url: &str) -> Result<Menu, ExtractError> {
        let parsed = Url::parse(url).map_err(|e| {
            ExtractError::invalid_url(url, "Extract", Some(anyhow::Error::new(e)))
        })?;
        self.extract_url(&parsed)
    }

    /// Like [`Extractor::extract`] for an already parsed URL.
    pub fn extract_url(&self, url: &Url) -> Result<Menu, ExtractError> {
        if !ALLOWED_SCHEMES.contains(&url.scheme()) {
            return Err(ExtractError::invalid_url(
                url.as_str(),
                "Extract",
                Some(anyhow::anyhow!("scheme must be http or https")),
            ));
        }

        let html = self
            .fetcher
            .fetch(url, &self.opts.fetch_options())
            .map_err(|e| {
                warn!(url = %url, error = %e, "fetch failed");
                classify_fetch_error(url.as_str(), e)
            })?;

        parse_and_verify(&html, url.as_str(), "Extract")
    }

    /// Extracts the food menu from HTML the caller already holds.
    pub fn parse_html(&self, html: &str) -> Result<Menu, ExtractError> {
        parse_and_verify(html, "", "ParseHtml")
    }
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extractor").field("opts", &self.opts).finish()
    }
}

impl Default for Extractor {
    fn default() -> Self {
        ExtractorBuilder::new().build()
    }
}

fn classify_fetch_error(url: &str, err: FetchError) -> ExtractError {
    match err {
        FetchError::Status(status) => ExtractError::http_status(url, "Extract", status),
        other => ExtractError::network(url, "Extract", Some(anyhow::Error::new(other))),
    }
}

fn parse_and_verify(html: &str, url: &str, op: &str) -> Result<Menu, ExtractError> {
    let doc = Html::parse_document(html);

    let (layout, menu) = parse_with_fallback(&doc)
        .map_err(|e| ExtractError::parse(url, op, Some(anyhow::Error::new(e))))?;

    let menu = verify(menu).map_err(|_| ExtractError::no_menu(url, op))?;
    info!(%layout, days = menu.len(), "extracted food menu");
    Ok(menu)
}

/// Tries every layout in order; the first that succeeds wins. Only the last
/// layout's error is kept.
fn parse_with_fallback(doc: &Html) -> Result<(Layout, Menu), LayoutError> {
    let mut last_err = None;
    for layout in Layout::ALL {
        match layout.parse(doc) {
            Ok(menu) => return Ok((layout, menu)),
            Err(e) => {
                debug!(%layout, error = %e, "layout did not match");
                last_err = Some(e);
            }
        }
    }
    Err(last_err.expect("Layout::ALL is not empty"))
}
