use crate::url::SiteIdentity;

/// Substrings that mark contact-action links rather than pages
const CONTACT_SCHEMES: &[&str] = &["mailto:", "tel:"];

/// Canonicalizes a raw href against the crawled site
///
/// # Canonicalization Steps
///
/// 1. Drop everything from the first `#`; reject if nothing is left
/// 2. Reject contact links (`mailto:` / `tel:` anywhere in the href)
/// 3. Hrefs starting with `http` must name the site's bare or `www.` host right after
///    `://`; scheme and host are stripped, leaving a site-relative path
/// 4. Strip leading `/`
/// 5. Prepend the site's base URL
///
/// Hrefs are not resolved against the page they were found on: `about`, `/about` and
/// `//about` all map to `<base>/about`. Protocol-relative hrefs such as
/// `//example.com/x` are therefore treated as paths.
///
/// # Examples
///
/// ```
/// use site_status_crawler::url::{canonicalize_href, SiteIdentity};
///
/// let site = SiteIdentity::parse("example.com").unwrap();
/// assert_eq!(
///     canonicalize_href("http://www.example.com/about#team", &site).as_deref(),
///     Some("https://example.com/about")
/// );
/// assert_eq!(canonicalize_href("mailto:x@y.com", &site), None);
/// assert_eq!(canonicalize_href("https://other.com/", &site), None);
/// ```
pub fn canonicalize_href(href: &str, site: &SiteIdentity) -> Option<String> {
    let href = match href.find('#') {
        Some(index) => &href[..index],
        None => href,
    };

    if href.is_empty() || is_contact_link(href) {
        return None;
    }

    let path = if href.starts_with("http") {
        strip_site_origin(href, site)?
    } else {
        href
    };

    Some(format!(
        "{}{}",
        site.base_url(),
        path.trim_start_matches('/')
    ))
}

/// Returns true for `mailto:` and `tel:` links
///
/// Matched by substring, not by scheme, so `/call?tel:1` is rejected as well.
pub fn is_contact_link(href: &str) -> bool {
    CONTACT_SCHEMES.iter().any(|scheme| href.contains(scheme))
}

/// Strips `scheme://host` from an absolute href on the crawled site
fn strip_site_origin<'a>(href: &'a str, site: &SiteIdentity) -> Option<&'a str> {
    let (_, rest) = href.split_once("://")?;

    // The bare host is a substring of the www host, so try the longer one first
    [site.www_host(), site.bare_host()]
        .into_iter()
        .find_map(|host| strip_host(rest, host))
}

/// Strips `host` from the front of `rest` if it is followed by a path, query or nothing
fn strip_host<'a>(rest: &'a str, host: &str) -> Option<&'a str> {
    let head = rest.get(..host.len())?;
    if !head.eq_ignore_ascii_case(host) {
        return None;
    }

    let tail = &rest[host.len()..];
    if tail.is_empty() || tail.starts_with('/') || tail.starts_with('?') {
        Some(tail)
    } else {
        None
    }
}
