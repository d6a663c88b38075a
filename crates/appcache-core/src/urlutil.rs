//! URL helpers for cache selection.

use url::Url;

/// Return `url` with any fragment removed.
pub fn strip_fragment(url: &Url) -> Url {
    if url.fragment().is_none() {
        return url.clone();
    }
    let mut stripped = url.clone();
    stripped.set_fragment(None);
    stripped
}

/// Check whether two URLs share an origin.
pub fn same_origin(a: &Url, b: &Url) -> bool {
    a.origin() == b.origin()
}

/// Check whether `url`'s scheme is in the supported list.
pub fn is_scheme_supported(url: &Url, schemes: &[String]) -> bool {
    schemes.iter().any(|scheme| scheme == url.scheme())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_strip_fragment() {
        let stripped = strip_fragment(&url("http://example.com/app.manifest#frag"));
        assert_eq!(stripped.as_str(), "http://example.com/app.manifest");
    }

    #[test]
    fn test_strip_fragment_noop_without_fragment() {
        let original = url("http://example.com/page?q=1");
        assert_eq!(strip_fragment(&original), original);
    }

    #[test]
    fn test_same_origin() {
        assert!(same_origin(
            &url("http://example.com/a"),
            &url("http://example.com/b#frag"),
        ));
        assert!(!same_origin(
            &url("http://example.com/"),
            &url("https://example.com/"),
        ));
        assert!(!same_origin(
            &url("http://example.com/"),
            &url("http://other.com/"),
        ));
    }

    #[test]
    fn test_scheme_supported() {
        let schemes = vec!["http".to_string(), "https".to_string()];
        assert!(is_scheme_supported(&url("https://example.com/"), &schemes));
        assert!(!is_scheme_supported(&url("ftp://example.com/"), &schemes));
    }
}
