//! Include/exclude filtering for directory copies.
//!
//! Patterns are shell globs (`globset` syntax, `{a,b}` alternation included):
//!
//! | Pattern        | Matches                                        |
//! |----------------|------------------------------------------------|
//! | `*.js`         | base name of any file or directory             |
//! | `*.{js,css}`   | base names ending in `.js` or `.css`           |
//! | `dist/*.js`    | relative path ending in `dist/<name>.js`       |
//! | `/dist/*.js`   | relative path `dist/<name>.js` at the top only |
//! | `tests/`       | directories named `tests`                      |
//! | `docs/**`      | anything below a `docs` directory              |
//!
//! `*` and `?` never cross `/`; `**` does.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use super::error::{PublishError, Result};

/// One pattern list split by what each glob is matched against.
#[derive(Debug, Clone)]
struct PatternSet {
    /// Base name of any entry.
    names: GlobSet,
    /// Relative path of any entry.
    paths: GlobSet,
    /// Base name, directories only (pattern had a trailing `/`).
    dir_names: GlobSet,
    dir_paths: GlobSet,
}

impl PatternSet {
    fn compile(patterns: &[String], case_sensitive: bool) -> Result<Self> {
        let mut names = GlobSetBuilder::new();
        let mut paths = GlobSetBuilder::new();
        let mut dir_names = GlobSetBuilder::new();
        let mut dir_paths = GlobSetBuilder::new();

        for raw in patterns {
            let dir_only = raw.ends_with('/') && raw.len() > 1;
            let trimmed = raw.trim_end_matches('/');
            let anchored = trimmed.starts_with('/');
            let body = trimmed.trim_start_matches('/');
            let on_path = anchored || body.contains('/');

            // Unanchored path patterns may start at any depth
            let source = if on_path && !anchored && !body.starts_with("**/") {
                format!("**/{body}")
            } else {
                body.to_owned()
            };

            let glob = GlobBuilder::new(&source)
                .literal_separator(true)
                .case_insensitive(!case_sensitive)
                .build()
                .map_err(|source| PublishError::Pattern {
                    pattern: raw.clone(),
                    source,
                })?;

            let target = match (on_path, dir_only) {
                (false, false) => &mut names,
                (true, false) => &mut paths,
                (false, true) => &mut dir_names,
                (true, true) => &mut dir_paths,
            };
            target.add(glob);
        }

        let build = |builder: GlobSetBuilder| {
            builder.build().map_err(|source| PublishError::Pattern {
                pattern: patterns.join(", "),
                source,
            })
        };
        Ok(Self {
            names: build(names)?,
            paths: build(paths)?,
            dir_names: build(dir_names)?,
            dir_paths: build(dir_paths)?,
        })
    }

    fn matches(&self, rel_path: &str, name: &str, is_dir: bool) -> bool {
        if self.names.is_match(name) || self.paths.is_match(rel_path) {
            return true;
        }
        is_dir && (self.dir_names.is_match(name) || self.dir_paths.is_match(rel_path))
    }

    fn is_empty(&self) -> bool {
        self.names.is_empty()
            && self.paths.is_empty()
            && self.dir_names.is_empty()
            && self.dir_paths.is_empty()
    }
}

/// Compiled `only`/`except` pattern sets.
#[derive(Debug, Clone)]
pub struct PathFilter {
    only: PatternSet,
    except: PatternSet,
}

impl PathFilter {
    pub fn new(only: &[String], except: &[String], case_sensitive: bool) -> Result<Self> {
        Ok(Self {
            only: PatternSet::compile(only, case_sensitive)?,
            except: PatternSet::compile(except, case_sensitive)?,
        })
    }

    /// Check whether an entry survives filtering.
    ///
    /// `rel_path` is relative to the copy root and `/`-separated.
    /// `only` never rejects directories, so matching files further down are
    /// still reachable.
    pub fn accepts(&self, rel_path: &str, is_dir: bool) -> bool {
        let name = rel_path.rsplit('/').next().unwrap_or(rel_path);

        if self.except.matches(rel_path, name, is_dir) {
            return false;
        }

        if !is_dir && !self.only.is_empty() {
            return self.only.matches(rel_path, name, is_dir);
        }

        true
    }

    pub fn is_empty(&self) -> bool {
        self.only.is_empty() && self.except.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(only: &[&str], except: &[&str], case_sensitive: bool) -> PathFilter {
        let only: Vec<String> = only.iter().map(|s| s.to_string()).collect();
        let except: Vec<String> = except.iter().map(|s| s.to_string()).collect();
        PathFilter::new(&only, &except, case_sensitive).unwrap()
    }

    #[test]
    fn test_empty_filter_accepts_everything() {
        let f = filter(&[], &[], true);
        assert!(f.is_empty());
        assert!(f.accepts("a.txt", false));
        assert!(f.accepts("sub/.hidden", false));
    }

    #[test]
    fn test_only_basename() {
        let f = filter(&["*.txt"], &[], true);
        assert!(f.accepts("a.txt", false));
        assert!(f.accepts("deep/dir/b.txt", false));
        assert!(!f.accepts("b.log", false));
        // Directories are always descended
        assert!(f.accepts("deep", true));
    }

    #[test]
    fn test_except_directories() {
        let f = filter(&[], &["tests/"], true);
        assert!(!f.accepts("tests", true));
        assert!(!f.accepts("src/tests", true));
        // A file named `tests` is not a directory
        assert!(f.accepts("tests", false));
    }

    #[test]
    fn test_path_patterns() {
        let f = filter(&[], &["dist/*.map"], true);
        assert!(!f.accepts("dist/app.js.map", false));
        assert!(!f.accepts("pkg/dist/app.js.map", false));
        assert!(f.accepts("dist/nested/app.js.map", false));

        let anchored = filter(&[], &["/dist/*.map"], true);
        assert!(!anchored.accepts("dist/app.js.map", false));
        assert!(anchored.accepts("pkg/dist/app.js.map", false));
    }

    #[test]
    fn test_double_star() {
        let f = filter(&[], &["docs/**"], true);
        assert!(!f.accepts("docs/a/b/c.md", false));
        assert!(f.accepts("src/a.md", false));

        let any_depth = filter(&["**/*.css"], &[], true);
        assert!(any_depth.accepts("app.css", false));
        assert!(any_depth.accepts("themes/dark/app.css", false));
    }

    #[test]
    fn test_case_sensitivity() {
        let sensitive = filter(&["*.TXT"], &[], true);
        assert!(!sensitive.accepts("a.txt", false));

        let insensitive = filter(&["*.TXT"], &[], false);
        assert!(insensitive.accepts("a.txt", false));
    }

    #[test]
    fn test_character_class() {
        let f = filter(&["[ab].js", "[!x]y.css"], &[], true);
        assert!(f.accepts("a.js", false));
        assert!(!f.accepts("c.js", false));
        assert!(f.accepts("zy.css", false));
        assert!(!f.accepts("xy.css", false));
    }

    #[test]
    fn test_brace_alternation() {
        let f = filter(&["*.{js,css}"], &[], true);
        assert!(f.accepts("app.js", false));
        assert!(f.accepts("theme/app.css", false));
        assert!(!f.accepts("app.map", false));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let only = vec!["[z-a]".to_string()];
        let err = PathFilter::new(&only, &[], true).unwrap_err();
        assert!(matches!(err, PublishError::Pattern { pattern, .. } if pattern == "[z-a]"));
    }

    #[test]
    fn test_literal_dots_not_wildcards() {
        let f = filter(&["app.min.js"], &[], true);
        assert!(f.accepts("app.min.js", false));
        assert!(!f.accepts("appXminXjs", false));
    }
}
