//! Counted nouns for log lines (`1 file`, `3 files`).

/// Format count with noun, adding `s` unless the count is one.
///
/// # Examples
/// ```
/// use assetman::utils::plural_count;
/// assert_eq!(plural_count(1, "file"), "1 file");
/// assert_eq!(plural_count(0, "bundle"), "0 bundles");
/// ```
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}
