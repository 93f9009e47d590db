// ABOUTME: Relative-reference resolution against the page's post-redirect base URL.
// ABOUTME: Pure RFC 3986 joining; no network access, malformed references fail with ResolveError.

use url::Url;

use crate::error::ResolveError;

/// True when an attribute value triggers an in-place rewrite: root-relative
/// (`/...`) and fragment-only (`#...`) references.
pub fn needs_rewrite(value: &str) -> bool {
    value.starts_with('/') || value.starts_with('#')
}

/// Resolve `reference` against `base`.
///
/// An empty reference yields the base itself. Everything else follows
/// standard relative-reference resolution: root-relative, fragment-only,
/// protocol-relative, relative-path, and already-absolute references all
/// compose the way a browser would. Re-resolving an absolute URL returns it
/// unchanged.
pub fn resolve(base: &Url, reference: &str) -> Result<Url, ResolveError> {
    if reference.is_empty() {
        return Ok(base.clone());
    }
    base.join(reference)
        .map_err(|source| ResolveError::MalformedReference {
            reference: reference.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn base() -> Url {
        Url::parse("https://ex.com/x/page").unwrap()
    }

    #[test]
    fn root_relative_keeps_scheme_and_authority() {
        let resolved = resolve(&base(), "/about?q=1").unwrap();
        assert_eq!(resolved.as_str(), "https://ex.com/about?q=1");
    }

    #[test]
    fn fragment_only_keeps_path() {
        let resolved = resolve(&base(), "#section-2").unwrap();
        assert_eq!(resolved.as_str(), "https://ex.com/x/page#section-2");
    }

    #[test]
    fn absolute_reference_is_idempotent() {
        let resolved = resolve(&base(), "http://other.com/thing").unwrap();
        assert_eq!(resolved.as_str(), "http://other.com/thing");
    }

    #[test]
    fn protocol_relative_adopts_base_scheme() {
        let resolved = resolve(&base(), "//cdn.example.org/lib.js").unwrap();
        assert_eq!(resolved.as_str(), "https://cdn.example.org/lib.js");
    }

    #[test]
    fn relative_path_replaces_last_segment() {
        let resolved = resolve(&base(), "img/logo.png").unwrap();
        assert_eq!(resolved.as_str(), "https://ex.com/x/img/logo.png");
    }

    #[test]
    fn empty_reference_yields_base_itself() {
        let with_fragment = Url::parse("https://ex.com/x/page#top").unwrap();
        let resolved = resolve(&with_fragment, "").unwrap();
        assert_eq!(resolved, with_fragment);
    }

    #[test]
    fn malformed_reference_is_reported() {
        let err = resolve(&base(), "http://[").unwrap_err();
        let ResolveError::MalformedReference { reference, .. } = err;
        assert_eq!(reference, "http://[");
    }

    #[test]
    fn needs_rewrite_only_for_root_and_fragment_prefixes() {
        assert!(needs_rewrite("/about"));
        assert!(needs_rewrite("#top"));
        assert!(!needs_rewrite("https://ex.com/about"));
        assert!(!needs_rewrite("img/logo.png"));
        assert!(!needs_rewrite(""));
    }
}
