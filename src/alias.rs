//! Path aliases (`@vendor/jquery`, `~/assets`).
//!
//! An alias is a leading `@name` segment mapped to a directory or URL. Only
//! the first segment is looked up, so `@vendor/jquery/dist` resolves through
//! `@vendor`. Unknown aliases are returned untouched; publishing them then
//! fails as a missing path.

use rustc_hash::FxHashMap;

/// Turns an aliased path into the string the publisher works with.
pub trait AliasResolver: Send + Sync {
    fn resolve_alias(&self, path: &str) -> String;
}

impl<F> AliasResolver for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn resolve_alias(&self, path: &str) -> String {
        self(path)
    }
}

/// Alias table built from configuration.
#[derive(Debug, Clone, Default)]
pub struct Aliases {
    table: FxHashMap<String, String>,
}

impl Aliases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `@name` (the `@` is added when missing).
    ///
    /// Trailing slashes are dropped from the target.
    pub fn set(&mut self, name: &str, target: impl Into<String>) {
        let name = if name.starts_with('@') {
            name.to_owned()
        } else {
            format!("@{name}")
        };
        let target = target.into();
        let target = match target.trim_end_matches('/') {
            "" if target.starts_with('/') => "/".to_owned(),
            trimmed => trimmed.to_owned(),
        };
        self.table.insert(name, target);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.table.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl AliasResolver for Aliases {
    fn resolve_alias(&self, path: &str) -> String {
        if !path.starts_with('@') {
            return shellexpand::tilde(path).into_owned();
        }

        let (root, rest) = match path.find('/') {
            Some(pos) => (&path[..pos], &path[pos..]),
            None => (path, ""),
        };
        match self.table.get(root) {
            // Avoid `//` when the alias itself is `/`
            Some(target) if target.ends_with('/') => format!("{target}{}", rest.trim_start_matches('/')),
            Some(target) => format!("{target}{rest}"),
            None => path.to_owned(),
        }
    }
}
