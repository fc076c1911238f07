//! Sensitive header redaction for request logs.

use axum::http::HeaderMap;
use std::collections::HashSet;

/// Headers that should be redacted in logs.
pub const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "cookie",
    "set-cookie",
    "x-api-key",
    "x-auth-token",
    "x-access-token",
];

/// Redact sensitive headers from a header map.
pub fn redact_headers(headers: &HeaderMap, additional: &[String]) -> Vec<(String, String)> {
    let sensitive: HashSet<String> = SENSITIVE_HEADERS
        .iter()
        .map(|s| s.to_string())
        .chain(additional.iter().map(|s| s.to_lowercase()))
        .collect();

    headers
        .iter()
        .map(|(name, value)| {
            let value_str = if sensitive.contains(name.as_str()) {
                "[REDACTED]".to_string()
            } else {
                value.to_str().unwrap_or("[non-utf8]").to_string()
            };
            (name.as_str().to_string(), value_str)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value<'a>(redacted: &'a [(String, String)], name: &str) -> &'a str {
        redacted
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .unwrap()
    }

    #[test]
    fn test_redact_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer token123".parse().unwrap());
        headers.insert("cookie", "access_token=abc".parse().unwrap());
        headers.insert("content-type", "application/json".parse().unwrap());

        let redacted = redact_headers(&headers, &[]);

        assert_eq!(value(&redacted, "authorization"), "[REDACTED]");
        assert_eq!(value(&redacted, "cookie"), "[REDACTED]");
        assert_eq!(value(&redacted, "content-type"), "application/json");
    }

    #[test]
    fn test_redact_headers_with_additional() {
        let mut headers = HeaderMap::new();
        headers.insert("x-custom-secret", "secret123".parse().unwrap());
        headers.insert("x-public-header", "public".parse().unwrap());

        let redacted = redact_headers(&headers, &["X-Custom-Secret".to_string()]);

        assert_eq!(value(&redacted, "x-custom-secret"), "[REDACTED]");
        assert_eq!(value(&redacted, "x-public-header"), "public");
    }
}
