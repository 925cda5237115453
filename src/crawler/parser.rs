//! HTML link extraction
//!
//! Every `<a>` tag with an `href` attribute contributes one raw href, trimmed of
//! surrounding whitespace. Nothing is resolved or filtered here: empty hrefs, fragments
//! and foreign hosts are all handed on and left to the canonicalizer.

use scraper::{Html, Selector};

/// Raw hrefs found in one page, in document order
///
/// Each call to [`extract_links`] produces a fresh sequence; it cannot be resumed
/// once exhausted.
#[derive(Debug, Default)]
pub struct Links {
    hrefs: std::vec::IntoIter<String>,
}

impl Iterator for Links {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.hrefs.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.hrefs.size_hint()
    }
}

/// Extracts anchor hrefs from an HTML body
///
/// The parser recovers from malformed markup instead of failing. A body cut short
/// (for example, a dropped connection) yields the links found in the part that arrived.
/// Bytes that are not valid UTF-8 are replaced before parsing.
///
/// # Example
///
/// ```
/// use site_status_crawler::crawler::extract_links;
///
/// let html = br#"<p><a href=" /about ">About</a><a href="mailto:x@y.com">Mail</a></p>"#;
/// let links: Vec<String> = extract_links(html).collect();
/// assert_eq!(links, vec!["/about", "mailto:x@y.com"]);
/// ```
pub fn extract_links(body: &[u8]) -> Links {
    if body.is_empty() {
        return Links::default();
    }

    let html = String::from_utf8_lossy(body);
    let document = Html::parse_document(&html);

    let Ok(selector) = Selector::parse("a[href]") else {
        return Links::default();
    };

    let hrefs: Vec<String> = document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.trim().to_string())
        .collect();

    tracing::trace!("Extracted {} hrefs", hrefs.len());

    Links {
        hrefs: hrefs.into_iter(),
    }
}
