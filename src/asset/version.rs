//! Cache busting for resolved asset URLs.
//!
//! Appends the file's modification time as `?v=<mtime>`, so a changed asset
//! gets a new URL while unchanged ones stay cacheable.

use std::path::Path;

use crate::freshness::mtime_secs;

/// Append `?v=<mtime>` to `url` when `file` has a positive mtime.
///
/// Missing or unreadable files leave the URL untouched.
pub fn timestamped_url(url: &str, file: &Path) -> String {
    match mtime_secs(file) {
        Some(secs) if secs > 0 => format!("{url}?v={secs}"),
        _ => url.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::TempDir;

    #[test]
    fn test_timestamped_url() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("style.css");
        fs::write(&file, "body {}").unwrap();
        fs::File::options()
            .write(true)
            .open(&file)
            .unwrap()
            .set_modified(UNIX_EPOCH + Duration::from_secs(1_700_000_000))
            .unwrap();

        assert_eq!(
            timestamped_url("/assets/style.css", &file),
            "/assets/style.css?v=1700000000"
        );
    }

    #[test]
    fn test_missing_file_untouched() {
        let dir = TempDir::new().unwrap();
        let url = timestamped_url("/a.js", &dir.path().join("a.js"));
        assert_eq!(url, "/a.js");
    }
}
