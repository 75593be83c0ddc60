//! Per-call publish options and the hook types they carry.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Called before each file or subdirectory is copied. Returning `false`
/// skips the entry (and a directory's whole subtree).
pub type BeforeFile = Arc<dyn Fn(&Path, &Path) -> bool + Send + Sync>;

/// Called after each file has been copied successfully.
pub type AfterFile = Arc<dyn Fn(&Path, &Path) + Send + Sync>;

/// Options applied when publishing a directory.
///
/// Every `Option` field falls back to the publisher's instance default when
/// left unset. `only`/`except` are glob patterns, see [`super::filter`].
#[derive(Clone)]
pub struct CopyOptions {
    /// Files must match one of these to be copied (empty = everything).
    pub only: Vec<String>,
    /// Files and directories matching any of these are skipped.
    pub except: Vec<String>,
    /// Whether `only`/`except` match case-sensitively.
    pub case_sensitive: bool,
    pub before_file: Option<BeforeFile>,
    pub after_file: Option<AfterFile>,
    /// Copy even if the destination directory already exists.
    pub force_overwrite: Option<bool>,
    /// Permission bits for newly created directories.
    pub dir_mode: Option<u32>,
    /// Permission bits applied to copied files.
    pub file_mode: Option<u32>,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            only: Vec::new(),
            except: Vec::new(),
            case_sensitive: true,
            before_file: None,
            after_file: None,
            force_overwrite: None,
            dir_mode: None,
            file_mode: None,
        }
    }
}

impl CopyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn only<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn except<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.except = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }

    pub fn before_file(mut self, hook: impl Fn(&Path, &Path) -> bool + Send + Sync + 'static) -> Self {
        self.before_file = Some(Arc::new(hook));
        self
    }

    pub fn after_file(mut self, hook: impl Fn(&Path, &Path) + Send + Sync + 'static) -> Self {
        self.after_file = Some(Arc::new(hook));
        self
    }

    pub fn force_overwrite(mut self, yes: bool) -> Self {
        self.force_overwrite = Some(yes);
        self
    }

    /// Fill every unset field from `defaults`.
    ///
    /// Patterns and case sensitivity are per call and never inherited.
    pub fn merged_over(&self, defaults: &PublishDefaults) -> Self {
        Self {
            only: self.only.clone(),
            except: self.except.clone(),
            case_sensitive: self.case_sensitive,
            before_file: self
                .before_file
                .clone()
                .or_else(|| defaults.before_copy.clone()),
            after_file: self
                .after_file
                .clone()
                .or_else(|| defaults.after_copy.clone()),
            force_overwrite: Some(self.force_overwrite.unwrap_or(defaults.force_copy)),
            dir_mode: self.dir_mode.or(Some(defaults.dir_mode)),
            file_mode: self.file_mode.or(defaults.file_mode),
        }
    }
}

impl fmt::Debug for CopyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyOptions")
            .field("only", &self.only)
            .field("except", &self.except)
            .field("case_sensitive", &self.case_sensitive)
            .field("before_file", &self.before_file.is_some())
            .field("after_file", &self.after_file.is_some())
            .field("force_overwrite", &self.force_overwrite)
            .field("dir_mode", &self.dir_mode.map(|m| format!("{m:o}")))
            .field("file_mode", &self.file_mode.map(|m| format!("{m:o}")))
            .finish()
    }
}

/// Publisher-wide defaults that per-call [`CopyOptions`] override.
#[derive(Clone)]
pub struct PublishDefaults {
    pub force_copy: bool,
    pub before_copy: Option<BeforeFile>,
    pub after_copy: Option<AfterFile>,
    pub dir_mode: u32,
    pub file_mode: Option<u32>,
}

impl Default for PublishDefaults {
    fn default() -> Self {
        Self {
            force_copy: false,
            before_copy: None,
            after_copy: None,
            dir_mode: 0o775,
            file_mode: None,
        }
    }
}

impl fmt::Debug for PublishDefaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublishDefaults")
            .field("force_copy", &self.force_copy)
            .field("before_copy", &self.before_copy.is_some())
            .field("after_copy", &self.after_copy.is_some())
            .field("dir_mode", &format!("{:o}", self.dir_mode))
            .field("file_mode", &self.file_mode.map(|m| format!("{m:o}")))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_falls_back_to_defaults() {
        let defaults = PublishDefaults {
            force_copy: true,
            file_mode: Some(0o644),
            ..PublishDefaults::default()
        };
        let merged = CopyOptions::new().merged_over(&defaults);

        assert_eq!(merged.force_overwrite, Some(true));
        assert_eq!(merged.dir_mode, Some(0o775));
        assert_eq!(merged.file_mode, Some(0o644));
        assert!(merged.before_file.is_none());
    }

    #[test]
    fn test_merge_call_options_win() {
        let defaults = PublishDefaults {
            force_copy: true,
            before_copy: Some(Arc::new(|_: &Path, _: &Path| false)),
            ..PublishDefaults::default()
        };
        let merged = CopyOptions::new()
            .force_overwrite(false)
            .before_file(|_, _| true)
            .merged_over(&defaults);

        assert_eq!(merged.force_overwrite, Some(false));
        let hook = merged.before_file.unwrap();
        assert!(hook(Path::new("a"), Path::new("b")));
    }
}
