//! URL classification and joining.
//!
//! Asset references are either local (relative to some base directory and
//! base URL) or external. Only local references get published paths and
//! timestamp query strings.

/// Check if a URL is relative (no scheme and not protocol-relative).
///
/// A leading `/` still counts as relative here; callers that need a
/// domain-relative check test for it separately.
///
/// # Examples
/// ```
/// use assetman::utils::path::is_relative_url;
/// assert!(is_relative_url("js/app.js"));
/// assert!(is_relative_url("/js/app.js"));
/// assert!(!is_relative_url("https://cdn.example.com/app.js"));
/// assert!(!is_relative_url("//cdn.example.com/app.js"));
/// ```
#[inline]
pub fn is_relative_url(url: &str) -> bool {
    !url.starts_with("//") && !url.contains("://")
}

/// Join a base URL and a relative segment with exactly one `/`.
///
/// An empty base yields `/segment`, matching a site mounted at the root.
///
/// # Examples
/// ```
/// use assetman::utils::path::join_url;
/// assert_eq!(join_url("/assets", "1a2b3c/app.css"), "/assets/1a2b3c/app.css");
/// assert_eq!(join_url("/assets/", "/app.css"), "/assets/app.css");
/// assert_eq!(join_url("", "app.css"), "/app.css");
/// ```
#[inline]
pub fn join_url(base: &str, segment: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        segment.trim_start_matches('/')
    )
}
