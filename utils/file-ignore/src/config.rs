//! Configuration for ignore-pattern behavior.

/// Configuration controlling how [`crate::IgnoreService`] filters files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreConfig {
    /// Respect `.gitignore` files (including global and repo-local excludes).
    pub respect_gitignore: bool,
    /// Respect `.ignore` files (ripgrep-native, independent of git).
    pub respect_ignore: bool,
    /// Include hidden files and directories (dotfiles).
    pub include_hidden: bool,
    /// Follow symbolic links while walking.
    pub follow_links: bool,
    /// Additional gitignore-style patterns to exclude.
    pub custom_excludes: Vec<String>,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            respect_gitignore: true,
            respect_ignore: true,
            include_hidden: false,
            follow_links: false,
            custom_excludes: Vec::new(),
        }
    }
}

impl IgnoreConfig {
    /// Respect both `.gitignore` and `.ignore`, hidden files excluded.
    pub fn respecting_all() -> Self {
        Self::default()
    }

    /// Ignore nothing: no gitignore/ignore handling, hidden files included.
    pub fn ignoring_none() -> Self {
        Self {
            respect_gitignore: false,
            respect_ignore: false,
            include_hidden: true,
            follow_links: false,
            custom_excludes: Vec::new(),
        }
    }

    /// Builder: set whether `.gitignore` is respected.
    pub fn with_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    /// Builder: set whether `.ignore` is respected.
    pub fn with_ignore(mut self, respect: bool) -> Self {
        self.respect_ignore = respect;
        self
    }

    /// Builder: set whether hidden files are included.
    pub fn with_hidden(mut self, include_hidden: bool) -> Self {
        self.include_hidden = include_hidden;
        self
    }

    /// Builder: set whether symlinks are followed.
    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// Builder: set custom exclude patterns.
    pub fn with_excludes(mut self, excludes: Vec<String>) -> Self {
        self.custom_excludes = excludes;
        self
    }
}

#[cfg(test)]
#[path = "config.test.rs"]
mod tests;
