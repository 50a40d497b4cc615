// ABOUTME: The known iCanteen page layouts and the DOM helpers they share.
// ABOUTME: Layout::ALL lists the layouts newest first, the order the Extractor tries them in.

//! Menu layouts.
//!
//! iCanteen has shipped three incompatible login-page layouts over the years.
//! Each submodule knows how to read one of them:
//!
//! - `new_extended`: day containers wrapping an `article.jidelnicekMain`,
//!   dishes with name, place and description.
//! - `simple`: any `.jidelnicekDen` element, dishes with name and description.
//! - `old_extended`: legacy `data-datum` dates, dishes with name and description.
//!
//! All of them anchor on `div.jidelnicekDen` day containers. A layout either
//! returns a complete [`Menu`] or a [`LayoutError`]; nothing is shared between
//! attempts.

pub mod compiled;
mod new_extended;
mod old_extended;
mod simple;

use std::fmt;

use chrono::NaiveDate;
use scraper::{ElementRef, Html};

use crate::error::LayoutError;
use crate::menu::Menu;
use compiled::selector;

/// One of the page layouts iCanteen has used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    NewExtended,
    Simple,
    OldExtended,
}

impl Layout {
    /// Every layout, newest first. Stricter layouts come before looser ones so a
    /// loose match cannot shadow them.
    pub const ALL: [Layout; 3] = [Layout::NewExtended, Layout::Simple, Layout::OldExtended];

    pub fn name(self) -> &'static str {
        match self {
            Layout::NewExtended => new_extended::LAYOUT,
            Layout::Simple => simple::LAYOUT,
            Layout::OldExtended => old_extended::LAYOUT,
        }
    }

    /// Reads a menu out of `doc` using this layout's rules.
    pub fn parse(self, doc: &Html) -> Result<Menu, LayoutError> {
        match self {
            Layout::NewExtended => new_extended::parse(doc),
            Layout::Simple => simple::parse(doc),
            Layout::OldExtended => old_extended::parse(doc),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// All day containers in the document. Finding none means the layout does not apply.
fn day_containers<'a>(
    doc: &'a Html,
    layout: &'static str,
    css: &'static str,
) -> Result<Vec<ElementRef<'a>>, LayoutError> {
    let days = select_all(doc.root_element(), css)?;
    if days.is_empty() {
        return Err(LayoutError::MissingAnchor {
            layout,
            selector: css,
        });
    }
    Ok(days)
}

fn select_all<'a>(scope: ElementRef<'a>, css: &'static str) -> Result<Vec<ElementRef<'a>>, LayoutError> {
    let sel = selector(css)?;
    Ok(scope.select(&sel).collect())
}

fn first<'a>(scope: ElementRef<'a>, css: &'static str) -> Result<Option<ElementRef<'a>>, LayoutError> {
    let sel = selector(css)?;
    Ok(scope.select(&sel).next())
}

fn required<'a>(
    scope: ElementRef<'a>,
    layout: &'static str,
    css: &'static str,
) -> Result<ElementRef<'a>, LayoutError> {
    first(scope, css)?.ok_or(LayoutError::MissingAnchor {
        layout,
        selector: css,
    })
}

fn attr<'a>(
    el: ElementRef<'a>,
    layout: &'static str,
    name: &'static str,
) -> Result<&'a str, LayoutError> {
    el.value()
        .attr(name)
        .ok_or(LayoutError::MissingAttr { layout, attr: name })
}

/// Inner text of an element with whitespace collapsed. Text nodes are joined
/// as they are, so inline markup inside a word keeps the word whole.
fn text(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses `raw` as a date once `prefix` is stripped off.
fn parse_date(
    layout: &'static str,
    raw: &str,
    prefix: &str,
    format: &str,
) -> Result<NaiveDate, LayoutError> {
    let value = raw.trim();
    let invalid = |source| LayoutError::InvalidDate {
        layout,
        value: value.to_string(),
        source,
    };
    let stripped = value.strip_prefix(prefix).ok_or_else(|| invalid(None))?;
    NaiveDate::parse_from_str(stripped, format).map_err(|e| invalid(Some(e)))
}
