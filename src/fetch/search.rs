//! DuckDuckGo HTML search for transcript links

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::storage::Quarter;

static RESULT_LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("a.result__a").expect("Failed to compile RESULT_LINK_SELECTOR")
});

/// Primary query, scoped to a known transcript host.
pub fn build_transcript_query(
    company: &str,
    quarter: Quarter,
    year: i32,
    site_filter: &str,
) -> String {
    format!(
        "\"{} ({} {}) earnings call transcript\" site:{}",
        company, quarter, year, site_filter
    )
}

/// Broader query used when the site-scoped search comes back empty.
pub fn build_fallback_query(company: &str, quarter: Quarter, year: i32) -> String {
    format!(
        "\"{} {} {} earnings report transcript\"",
        company, quarter, year
    )
}

/// Results page URL for a query. The HTML endpoint needs no API key.
pub fn results_url(query: &str) -> String {
    format!(
        "https://html.duckduckgo.com/html/?q={}",
        urlencoding::encode(query)
    )
}

/// Pull result targets out of a results page, in page order.
pub fn parse_result_links(html: &str, limit: usize) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(&RESULT_LINK_SELECTOR)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(resolve_redirect)
        .take(limit)
        .collect()
}

/// DuckDuckGo wraps result hrefs in a redirect carrying the target in
/// the `uddg` parameter.
fn resolve_redirect(href: &str) -> Option<String> {
    if let Some(start) = href.find("uddg=") {
        let encoded = &href[start + "uddg=".len()..];
        let encoded = encoded.split('&').next()?;
        return urlencoding::decode(encoded).ok().map(|s| s.into_owned());
    }

    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }

    if let Some(rest) = href.strip_prefix("//") {
        return Some(format!("https://{}", rest));
    }

    None
}
