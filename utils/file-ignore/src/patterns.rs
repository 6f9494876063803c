//! Default gitignore-style pattern sets shared by tool-facing ignore logic.

/// Common VCS/tooling directories and files excluded by default.
pub const COMMON_IGNORE_PATTERNS: &[&str] = &[
    "**/.git/**",
    "**/.hg/**",
    "**/.svn/**",
    "**/node_modules/**",
    "**/.venv/**",
    "**/venv/**",
    "**/__pycache__/**",
    "**/.pytest_cache/**",
    "**/.mypy_cache/**",
    "**/.ruff_cache/**",
];

/// Binary/compiled file patterns excluded by default.
pub const BINARY_FILE_PATTERNS: &[&str] = &[
    "*.exe", "*.dll", "*.so", "*.dylib", "*.a", "*.o", "*.obj", "*.bin", "*.class", "*.pyc",
    "*.jar", "*.zip", "*.tar", "*.gz", "*.png", "*.jpg", "*.jpeg", "*.gif", "*.ico", "*.pdf",
];

/// Build output directories excluded by default.
pub const COMMON_DIRECTORY_EXCLUDES: &[&str] = &[
    "**/dist/**",
    "**/build/**",
    "**/target/**",
    "**/out/**",
    "**/.next/**",
    "**/.cache/**",
];

/// OS/editor-generated files excluded by default.
pub const SYSTEM_FILE_EXCLUDES: &[&str] =
    &["**/.DS_Store", "**/Thumbs.db", "**/*.swp", "**/*~"];

/// All default exclude patterns combined, in a fresh `Vec`.
pub fn get_all_default_excludes() -> Vec<&'static str> {
    let mut patterns = Vec::with_capacity(
        COMMON_IGNORE_PATTERNS.len()
            + BINARY_FILE_PATTERNS.len()
            + COMMON_DIRECTORY_EXCLUDES.len()
            + SYSTEM_FILE_EXCLUDES.len(),
    );
    patterns.extend(COMMON_IGNORE_PATTERNS);
    patterns.extend(BINARY_FILE_PATTERNS);
    patterns.extend(COMMON_DIRECTORY_EXCLUDES);
    patterns.extend(SYSTEM_FILE_EXCLUDES);
    patterns
}

#[cfg(test)]
#[path = "patterns.test.rs"]
mod tests;
