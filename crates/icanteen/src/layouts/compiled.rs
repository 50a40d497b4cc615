// ABOUTME: Process-wide cache of compiled CSS selectors used by the layouts.
// ABOUTME: Each selector string is parsed once; invalid selectors are cached as misses too.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use scraper::Selector;

use crate::error::LayoutError;

static SELECTOR_CACHE: Lazy<RwLock<HashMap<&'static str, Option<Selector>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Gets or compiles a CSS selector, caching the result.
///
/// Returns `None` for a selector that does not parse. A poisoned lock is
/// recovered since the cache only ever holds fully inserted entries.
pub fn get_or_compile(css: &'static str) -> Option<Selector> {
    {
        let cache = SELECTOR_CACHE.read().unwrap_or_else(|e| e.into_inner());
        if let Some(cached) = cache.get(css) {
            return cached.clone();
        }
    }

    let compiled = Selector::parse(css).ok();
    let mut cache = SELECTOR_CACHE.write().unwrap_or_else(|e| e.into_inner());
    cache.entry(css).or_insert(compiled).clone()
}

/// Like [`get_or_compile`] but reports an invalid selector as a layout failure.
pub fn selector(css: &'static str) -> Result<Selector, LayoutError> {
    get_or_compile(css).ok_or(LayoutError::Selector(css))
}
