//! URL handling module
//!
//! This module builds the crawl's [`SiteIdentity`] from user input and turns raw hrefs
//! into canonical site URLs. Canonicalization sits behind the [`Canonicalizer`] trait so
//! the traversal loop never depends on how hrefs are matched against the site.

mod canonicalize;
mod site;

pub use canonicalize::{canonicalize_href, is_contact_link};
pub use site::SiteIdentity;

/// Maps raw hrefs onto canonical URLs of a single site
///
/// Every accepted URL begins with [`Canonicalizer::root`] and carries no fragment, so
/// the returned string can be used directly as a registry key.
pub trait Canonicalizer {
    /// The canonical URL of the site's root page, where the crawl starts
    fn root(&self) -> &str;

    /// Returns the canonical URL for `href`, or `None` if it is not a crawlable link
    /// on this site
    fn canonicalize(&self, href: &str) -> Option<String>;
}

impl Canonicalizer for SiteIdentity {
    fn root(&self) -> &str {
        self.base_url()
    }

    fn canonicalize(&self, href: &str) -> Option<String> {
        canonicalize_href(href, self)
    }
}
