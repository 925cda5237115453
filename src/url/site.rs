use crate::{UrlError, UrlResult};
use url::Url;

/// The identity of the site being crawled
///
/// Built once at startup from the user-supplied URL. The site is identified by its
/// host (and explicit port, if any); any path in the input is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteIdentity {
    base_url: String,
    bare_host: String,
    www_host: String,
}

impl SiteIdentity {
    /// Builds a site identity from user input
    ///
    /// Accepts any of `example.com`, `www.example.com`, `https://example.com/`,
    /// `http://www.example.com`. Inputs without a scheme, or with `https://`, crawl over
    /// HTTPS; an explicit `http://` keeps plain HTTP.
    ///
    /// # Examples
    ///
    /// ```
    /// use site_status_crawler::url::SiteIdentity;
    ///
    /// let site = SiteIdentity::parse("https://www.example.com/").unwrap();
    /// assert_eq!(site.base_url(), "https://example.com/");
    /// assert_eq!(site.bare_host(), "example.com");
    /// assert_eq!(site.www_host(), "www.example.com");
    /// ```
    pub fn parse(input: &str) -> UrlResult<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(UrlError::Empty);
        }

        let absolute = if input.contains("://") {
            input.to_string()
        } else {
            format!("https://{}", input)
        };

        let url = Url::parse(&absolute).map_err(|e| UrlError::Parse(e.to_string()))?;

        let scheme = match url.scheme() {
            "http" => "http",
            "https" => "https",
            other => return Err(UrlError::InvalidScheme(other.to_string())),
        };

        let host = url.host_str().ok_or(UrlError::MissingHost)?.to_lowercase();
        let authority = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host,
        };

        let (bare_host, www_host) = match authority.strip_prefix("www.") {
            Some(bare) => (bare.to_string(), authority.clone()),
            None => (authority.clone(), format!("www.{}", authority)),
        };

        if bare_host.is_empty() {
            return Err(UrlError::MissingHost);
        }

        Ok(Self {
            base_url: format!("{}://{}/", scheme, bare_host),
            bare_host,
            www_host,
        })
    }

    /// Canonical absolute prefix of every crawled URL, with a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Host without the `www.` prefix
    pub fn bare_host(&self) -> &str {
        &self.bare_host
    }

    /// Host with the `www.` prefix
    pub fn www_host(&self) -> &str {
        &self.www_host
    }

    /// Name of the progress CSV for this site
    ///
    /// Derived from the bare host; characters that are awkward in file names (such as
    /// the `:` before a port) become `_`.
    pub fn output_file_name(&self) -> String {
        let stem: String = self
            .bare_host
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}.csv", stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_input() {
        let site = SiteIdentity::parse("example.com").unwrap();
        assert_eq!(site.base_url(), "https://example.com/");
        assert_eq!(site.bare_host(), "example.com");
        assert_eq!(site.www_host(), "www.example.com");
    }

    #[test]
    fn test_www_input_strips_prefix() {
        let site = SiteIdentity::parse("www.example.com").unwrap();
        assert_eq!(site.base_url(), "https://example.com/");
        assert_eq!(site.bare_host(), "example.com");
        assert_eq!(site.www_host(), "www.example.com");
    }

    #[test]
    fn test_scheme_and_trailing_slash() {
        let site = SiteIdentity::parse("  https://example.com/  ").unwrap();
        assert_eq!(site.base_url(), "https://example.com/");
    }

    #[test]
    fn test_explicit_http_is_kept() {
        let site = SiteIdentity::parse("http://www.example.com").unwrap();
        assert_eq!(site.base_url(), "http://example.com/");
    }

    #[test]
    fn test_host_is_lowercased() {
        let site = SiteIdentity::parse("https://WWW.Example.COM").unwrap();
        assert_eq!(site.bare_host(), "example.com");
        assert_eq!(site.www_host(), "www.example.com");
    }

    #[test]
    fn test_path_is_ignored() {
        let site = SiteIdentity::parse("https://example.com/blog/post").unwrap();
        assert_eq!(site.base_url(), "https://example.com/");
    }

    #[test]
    fn test_port_is_part_of_host() {
        let site = SiteIdentity::parse("http://127.0.0.1:8080/").unwrap();
        assert_eq!(site.base_url(), "http://127.0.0.1:8080/");
        assert_eq!(site.bare_host(), "127.0.0.1:8080");
        assert_eq!(site.www_host(), "www.127.0.0.1:8080");
    }

    #[test]
    fn test_exactly_one_www_variant() {
        for input in ["example.com", "www.example.com", "https://www.example.com/"] {
            let site = SiteIdentity::parse(input).unwrap();
            assert!(!site.bare_host().starts_with("www."));
            assert!(site.www_host().starts_with("www."));
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(SiteIdentity::parse("   "), Err(UrlError::Empty)));
    }

    #[test]
    fn test_invalid_scheme() {
        assert!(matches!(
            SiteIdentity::parse("ftp://example.com"),
            Err(UrlError::InvalidScheme(_))
        ));
    }

    #[test]
    fn test_unparseable_input() {
        assert!(matches!(
            SiteIdentity::parse("https://exa mple.com"),
            Err(UrlError::Parse(_))
        ));
    }

    #[test]
    fn test_output_file_name() {
        let site = SiteIdentity::parse("www.example.com").unwrap();
        assert_eq!(site.output_file_name(), "example.com.csv");

        let site = SiteIdentity::parse("http://127.0.0.1:8080").unwrap();
        assert_eq!(site.output_file_name(), "127.0.0.1_8080.csv");
    }
}
