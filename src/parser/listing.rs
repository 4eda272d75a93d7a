use std::sync::LazyLock;

use reqwest::Url;
use scraper::{Html, Selector};

use super::{first, resolve_href, selector, ExtractError};

static PAGINATION: LazyLock<Selector> = LazyLock::new(|| selector("ul.pagination"));
static PAGE_LINK: LazyLock<Selector> = LazyLock::new(|| selector("a.page-numbers"));
static GRAMMAR_TABLE: LazyLock<Selector> = LazyLock::new(|| selector("table#jl-grammar"));
static TBODY: LazyLock<Selector> = LazyLock::new(|| selector("tbody"));
static RULE_ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr.jl-row"));
static RULE_LINK: LazyLock<Selector> = LazyLock::new(|| selector("a.jl-link"));

/// Listing pages of a level, from the index page's pagination control.
///
/// Links are taken in document order, as-is: a "next" arrow pointing at an
/// already listed page yields that page twice. Without a pagination control
/// the index page is the only listing page.
pub fn listing_pages(html: &str, page_url: &Url) -> Result<Vec<Url>, ExtractError> {
    let doc = Html::parse_document(html);
    let Some(pagination) = doc.select(&PAGINATION).next() else {
        return Ok(vec![page_url.clone()]);
    };

    pagination
        .select(&PAGE_LINK)
        .map(|a| resolve_href(a, "a.page-numbers", page_url))
        .collect()
}

/// Detail page URL of every rule in the listing table, in row order.
pub fn rule_links(html: &str, page_url: &Url) -> Result<Vec<Url>, ExtractError> {
    let doc = Html::parse_document(html);
    let table = first(doc.root_element(), &GRAMMAR_TABLE, "table#jl-grammar")?;
    let body = first(table, &TBODY, "table#jl-grammar tbody")?;

    body.select(&RULE_ROW)
        .map(|row| {
            let link = first(row, &RULE_LINK, "tr.jl-row a.jl-link")?;
            resolve_href(link, "a.jl-link", page_url)
        })
        .collect()
}
