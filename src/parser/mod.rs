//! HTML extraction for jlptsensei.com pages: raw markup in, URLs or records out.
//!
//! This is the only code that knows the site's ids and class names.

pub mod listing;
pub mod rule;

use reqwest::Url;
use scraper::{ElementRef, Selector};
use thiserror::Error;

pub use listing::{listing_pages, rule_links};
pub use rule::parse_rule_page;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// Rule page without `div#examples`. Recoverable: the rule is skipped.
    #[error("no examples container (div#examples)")]
    MissingExamples,
    #[error("missing element `{0}`")]
    MissingElement(String),
    #[error("`{element}` has no `{attr}` attribute")]
    MissingAttribute {
        element: &'static str,
        attr: &'static str,
    },
    #[error("invalid link `{href}`: {reason}")]
    BadLink { href: String, reason: String },
}

pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

/// First descendant of `scope` matching `sel`.
pub(crate) fn first<'a>(
    scope: ElementRef<'a>,
    sel: &Selector,
    what: &str,
) -> Result<ElementRef<'a>, ExtractError> {
    scope
        .select(sel)
        .next()
        .ok_or_else(|| ExtractError::MissingElement(what.to_string()))
}

/// Concatenated text of all descendant text nodes, untrimmed.
pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// `href` of `el`, resolved against the page it was found on.
pub(crate) fn resolve_href(
    el: ElementRef<'_>,
    element: &'static str,
    page_url: &Url,
) -> Result<Url, ExtractError> {
    let href = el.value().attr("href").ok_or(ExtractError::MissingAttribute {
        element,
        attr: "href",
    })?;
    page_url.join(href.trim()).map_err(|e| ExtractError::BadLink {
        href: href.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
pub(crate) fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
}
