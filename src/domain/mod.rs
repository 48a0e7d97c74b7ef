//! Domain extraction and normalization utilities.
//!
//! Two deliberately separate rules live here:
//! - `normalize_source_url()` - full URL parse for cited source URLs and for the
//!   `Website` cell of an input row
//! - `normalize_given_domain()` - lowercase only, for a target domain that was
//!   already extracted upstream
//!
//! Matching behavior depends on keeping them apart, so do not route one through
//! the other.

const WWW_PREFIX: &str = "www.";

/// Ports dropped from the network location. A bare input is re-read as
/// `https://`, so keeping either would break idempotence.
const WEB_DEFAULT_PORTS: [u16; 2] = [80, 443];

/// Extracts a normalized hostname from a URL or a bare domain.
///
/// Adds an `https://` prefix when no `http://`/`https://` scheme is present, parses
/// the result and keeps the network location (`user:password@host:port`):
/// lowercased, with leading `www.` labels stripped. Scheme, path, query and
/// fragment are discarded, as are the default ports 80 and 443.
///
/// Never fails. Empty, missing (`None`) or unparsable input yields `""`, the
/// "no domain" sentinel.
///
/// # Examples
///
/// ```
/// use ai_visibility::domain::normalize_source_url;
///
/// assert_eq!(normalize_source_url("https://www.Example.com/path?q=1"), "example.com");
/// assert_eq!(normalize_source_url("amazon.com/x"), "amazon.com");
/// assert_eq!(normalize_source_url(None), "");
/// ```
pub fn normalize_source_url<'a>(url: impl Into<Option<&'a str>>) -> String {
    let Some(url) = url.into() else {
        return String::new();
    };
    if url.is_empty() {
        return String::new();
    }

    let with_scheme = if has_http_scheme(url) {
        url.to_string()
    } else {
        format!("https://{url}")
    };

    let parsed = match url::Url::parse(&with_scheme) {
        Ok(parsed) => parsed,
        Err(_) => return String::new(),
    };

    let Some(host) = parsed.host_str().filter(|host| !host.is_empty()) else {
        return String::new();
    };

    // Network location: [user[:password]@]host[:port]
    let mut netloc = String::new();
    if !parsed.username().is_empty() || parsed.password().is_some() {
        netloc.push_str(parsed.username());
        if let Some(password) = parsed.password() {
            netloc.push(':');
            netloc.push_str(password);
        }
        netloc.push('@');
    }
    netloc.push_str(host);
    if let Some(port) = parsed.port().filter(|port| !WEB_DEFAULT_PORTS.contains(port)) {
        netloc.push_str(&format!(":{port}"));
    }

    strip_www(&netloc.to_lowercase()).to_string()
}

/// Normalizes a target domain that was extracted upstream: lowercase only.
///
/// No URL parsing happens here. `"https://Example.com"` stays a URL-shaped string
/// and will not match any source domain.
pub fn normalize_given_domain(domain: &str) -> String {
    domain.to_lowercase()
}

/// Returns true when a normalized source domain is a mention of the target.
///
/// An empty target never matches, not even a source whose URL also failed to
/// normalize.
pub(crate) fn is_target_domain(domain: &str, target: &str) -> bool {
    !target.is_empty() && domain == target
}

fn has_http_scheme(url: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

// Repeated so that `www.www.example.com` normalizes in one pass, keeping the
// function idempotent. See "Repeated `www.`" in DESIGN.md before changing this.
fn strip_www(host: &str) -> &str {
    let mut host = host;
    while let Some(rest) = host.strip_prefix(WWW_PREFIX) {
        host = rest;
    }
    host
}
