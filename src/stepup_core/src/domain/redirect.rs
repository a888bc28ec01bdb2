use url::Url;

/// An untrusted post-elevation destination supplied by the client.
///
/// Nothing is trusted until [`RedirectTarget::is_safe`] has vouched for the
/// value against the current request host; unsafe values are swapped for the
/// configured default instead of being surfaced as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget(String);

impl RedirectTarget {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether redirecting to this target keeps the user on `host`.
    ///
    /// Rules:
    /// - empty targets are unsafe
    /// - control characters and non-ASCII are unsafe (a browser-built URL
    ///   arrives percent-encoded, and `Location` is an ASCII header)
    /// - scheme-relative (`//...`) and backslash-smuggled (`/\...`, `\...`)
    ///   targets are unsafe
    /// - absolute URLs are safe only with an http(s) scheme and an authority
    ///   equal to `host`
    /// - anything else is a relative path and stays on `host`
    pub fn is_safe(&self, host: &str) -> bool {
        let target = self.0.as_str();
        if target.is_empty() {
            return false;
        }
        if target
            .chars()
            .any(|c| c.is_ascii_control() || !c.is_ascii())
        {
            return false;
        }
        if target.starts_with("//") || target.starts_with("/\\") || target.starts_with('\\') {
            return false;
        }

        match Url::parse(target) {
            Ok(url) => {
                matches!(url.scheme(), "http" | "https")
                    && authority_of(&url).eq_ignore_ascii_case(host)
            }
            // No scheme at all: a plain relative path.
            Err(url::ParseError::RelativeUrlWithoutBase) => true,
            Err(_) => false,
        }
    }

    /// The target itself when safe for `host`, otherwise `default`.
    pub fn sanitize(&self, host: &str, default: &str) -> String {
        if self.is_safe(host) {
            self.0.clone()
        } else {
            default.to_string()
        }
    }
}

fn authority_of(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    const HOST: &str = "testserver.example";

    fn is_safe(target: &str) -> bool {
        RedirectTarget::new(target).is_safe(HOST)
    }

    #[test]
    fn relative_paths_are_safe() {
        assert!(is_safe("/account/billing/"));
        assert!(is_safe("account/billing/"));
        assert!(is_safe("/search?q=rust#results"));
    }

    #[test]
    fn same_host_absolute_urls_are_safe() {
        assert!(is_safe("http://testserver.example/path"));
        assert!(is_safe("https://testserver.example/path"));
        assert!(is_safe("HTTP://TESTSERVER.EXAMPLE/path"));
    }

    #[test]
    fn other_hosts_are_unsafe() {
        assert!(!is_safe("http://evil.example/path"));
        assert!(!is_safe("https://evil.example"));
        assert!(!is_safe("http://testserver.example.evil.example/"));
    }

    #[test]
    fn ports_are_part_of_the_authority() {
        let target = RedirectTarget::new("http://testserver.example:8080/path");
        assert!(target.is_safe("testserver.example:8080"));
        assert!(!target.is_safe("testserver.example"));
        // Default ports are elided on both sides of the comparison.
        assert!(is_safe("http://testserver.example:80/path"));
    }

    #[test]
    fn smuggled_and_malformed_targets_are_unsafe() {
        assert!(!is_safe(""));
        assert!(!is_safe("//evil.example/path"));
        assert!(!is_safe("/\\evil.example"));
        assert!(!is_safe("\\evil.example"));
        assert!(!is_safe("http:///path"));
        assert!(!is_safe("javascript:alert(1)"));
        assert!(!is_safe("ftp://testserver.example/file"));
        assert!(!is_safe("/redirect\nSet-Cookie: x=y"));
        assert!(!is_safe("/p\u{e4}th"));
    }

    #[test]
    fn sanitize_substitutes_the_default() {
        let safe = RedirectTarget::new("/account/billing/");
        let unsafe_ = RedirectTarget::new("https://evil.example/");
        assert_eq!(safe.sanitize(HOST, "/"), "/account/billing/");
        assert_eq!(unsafe_.sanitize(HOST, "/"), "/");
    }

    #[quickcheck]
    fn sanitize_returns_the_target_or_the_default(raw: String) -> bool {
        let target = RedirectTarget::new(raw.clone());
        let out = target.sanitize(HOST, "/fallback");
        (out == raw && target.is_safe(HOST)) || out == "/fallback"
    }

    #[quickcheck]
    fn safe_targets_never_leave_the_host(path: String) -> bool {
        // Prefixing with '/' can only make an already-unsafe value safe if it
        // was a bare relative path; in every case the result must not be a
        // cross-origin absolute URL.
        let target = RedirectTarget::new(format!("/{path}"));
        if !target.is_safe(HOST) {
            return true;
        }
        match Url::parse(target.as_str()) {
            Ok(url) => authority_of(&url).eq_ignore_ascii_case(HOST),
            Err(_) => true,
        }
    }
}
