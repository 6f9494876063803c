//! An absolute, normalized path type with base-path-aware deserialization.
//!
//! Config and tool-call payloads often carry relative paths that should be
//! resolved against a session's working directory rather than the process's
//! actual CWD. [`AbsolutePathBuf`] normalizes on construction; pair it with
//! [`AbsolutePathBufGuard`] to scope the base path used when deserializing
//! one from a relative string.

use std::cell::RefCell;
use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use path_absolutize::Absolutize;
use schemars::JsonSchema;
use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use ts_rs::TS;

thread_local! {
    static BASE_PATH_STACK: RefCell<Vec<PathBuf>> = const { RefCell::new(Vec::new()) };
}

/// An absolute, `.`/`..`-normalized path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AbsolutePathBuf(PathBuf);

impl AbsolutePathBuf {
    /// Resolve `path` against `base`: if `path` is already absolute, `base`
    /// is ignored and the path is only normalized; otherwise `path` is
    /// joined onto `base` before normalizing.
    pub fn resolve_path_against_base(
        path: impl AsRef<Path>,
        base: impl AsRef<Path>,
    ) -> std::io::Result<Self> {
        let resolved = path.as_ref().absolutize_from(base.as_ref())?;
        Ok(Self(resolved.into_owned()))
    }

    /// Borrow the underlying absolute path.
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Consume this value, returning the underlying [`PathBuf`].
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl fmt::Display for AbsolutePathBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl AsRef<Path> for AbsolutePathBuf {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// An RAII guard that sets the base path [`AbsolutePathBuf`]'s `Deserialize`
/// impl resolves relative paths against, for the lifetime of the guard.
///
/// Guards nest: the most recently created (and not yet dropped) guard on the
/// current thread wins.
pub struct AbsolutePathBufGuard;

impl AbsolutePathBufGuard {
    pub fn new(base: impl AsRef<Path>) -> Self {
        BASE_PATH_STACK.with(|stack| stack.borrow_mut().push(base.as_ref().to_path_buf()));
        Self
    }
}

impl Drop for AbsolutePathBufGuard {
    fn drop(&mut self) {
        BASE_PATH_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

fn current_base_path() -> std::io::Result<PathBuf> {
    BASE_PATH_STACK.with(|stack| stack.borrow().last().cloned()).map_or_else(
        std::env::current_dir,
        Ok,
    )
}

impl<'de> Deserialize<'de> for AbsolutePathBuf {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = PathBuf::deserialize(deserializer)?;
        let base = current_base_path().map_err(serde::de::Error::custom)?;
        Self::resolve_path_against_base(raw, base).map_err(serde::de::Error::custom)
    }
}

impl JsonSchema for AbsolutePathBuf {
    fn schema_name() -> String {
        "AbsolutePathBuf".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        String::json_schema(gen)
    }
}

impl TS for AbsolutePathBuf {
    type WithoutGenerics = Self;

    fn name() -> String {
        "string".to_string()
    }

    fn inline() -> String {
        "string".to_string()
    }

    fn inline_flattened() -> String {
        Self::inline()
    }

    fn decl() -> String {
        String::new()
    }

    fn decl_concrete() -> String {
        String::new()
    }
}

#[cfg(test)]
#[path = "lib.test.rs"]
mod tests;
