//! Article text extraction from downloaded transcript pages

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static ARTICLE_BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.article-body").expect("Failed to compile ARTICLE_BODY_SELECTOR")
});

static PARAGRAPH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("Failed to compile PARAGRAPH_SELECTOR"));

/// Extract readable report text from a transcript page.
///
/// Tries the article container first and falls back to the page's
/// paragraphs and finally to the whole document. Returns `None` when
/// no tier yields text.
pub fn extract_article_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    if let Some(body) = document.select(&ARTICLE_BODY_SELECTOR).next() {
        let text = joined_text(body);
        if !text.is_empty() {
            return Some(text);
        }
    }

    let paragraphs: Vec<String> = document
        .select(&PARAGRAPH_SELECTOR)
        .map(|p| p.text().collect::<String>())
        .collect();

    if !paragraphs.is_empty() {
        let text = paragraphs.join("\n");
        if !text.trim().is_empty() {
            return Some(text);
        }
    }

    let text = joined_text(document.root_element());
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Trimmed text chunks of an element, one per line, without empties.
fn joined_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
