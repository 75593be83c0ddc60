//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for messages shown only with `--verbose`
//!
//! # Example
//!
//! ```ignore
//! log!("publish"; "{} -> {}", record.path.display(), record.url);
//! debug!("link"; "symlink already present: {}", dst.display());
//! ```

use owo_colors::{OwoColorize, Stream};
use std::{
    io::{Write, stderr},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix.
///
/// Everything goes to stderr so that stdout stays parseable
/// (`publish` prints one `path -> url` line per asset).
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut out = stderr().lock();
    writeln!(out, "{prefix} {message}").ok();
    out.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    let prefix = prefix.as_str();
    match module_lower {
        "publish" => paint(prefix, |p| p.bright_blue().bold().to_string()),
        "link" => paint(prefix, |p| p.bright_cyan().bold().to_string()),
        "copy" => paint(prefix, |p| p.bright_green().bold().to_string()),
        "bundle" => paint(prefix, |p| p.bright_magenta().bold().to_string()),
        "error" => paint(prefix, |p| p.bright_red().bold().to_string()),
        _ => paint(prefix, |p| p.bright_yellow().bold().to_string()),
    }
}

/// Style `text` only when stderr supports color (honors `set_override`).
#[inline]
fn paint(text: &str, style: impl Fn(&&str) -> String) -> String {
    text.if_supports_color(Stream::Stderr, style).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorize_prefix_contains_module() {
        owo_colors::set_override(false);
        assert_eq!(colorize_prefix("publish", "publish"), "[publish]");
        assert_eq!(colorize_prefix("Error", "error"), "[Error]");

        owo_colors::set_override(true);
        let colored = colorize_prefix("publish", "publish");
        assert!(colored.contains("[publish]"));
        assert!(colored.starts_with('\x1b'));
        owo_colors::unset_override();
    }
}
