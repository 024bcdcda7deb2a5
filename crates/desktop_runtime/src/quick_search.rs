//! Quick-search box resolution: URL-looking input opens directly, anything else becomes a web
//! search.

const SEARCH_URL: &str = "https://www.google.com/search?q=";

/// Resolves the quick-search query to the URL the browser window should load.
pub fn resolve_quick_search(query: &str) -> Option<String> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    if looks_like_url(query) {
        return Some(if query.starts_with("http") {
            query.to_string()
        } else {
            format!("https://{query}")
        });
    }
    Some(format!("{SEARCH_URL}{}", encode_uri_component(query)))
}

/// Prefixes `https://` when the address carries no scheme. Empty input yields `None`.
pub fn normalize_site_url(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        None
    } else if has_http_scheme(input) {
        Some(input.to_string())
    } else {
        Some(format!("https://{input}"))
    }
}

fn looks_like_url(query: &str) -> bool {
    if has_http_scheme(query) {
        return true;
    }
    // `^[a-zA-Z0-9-]+\.`
    match query.find('.') {
        Some(0) | None => false,
        Some(dot) => query[..dot]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-'),
    }
}

fn has_http_scheme(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Percent-encodes everything outside `encodeURIComponent`'s unreserved set.
fn encode_uri_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
