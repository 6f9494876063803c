//! Error types for shell parsing.

use thiserror::Error;

/// Errors that can occur while tokenizing or parsing a shell command.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The tree-sitter parser failed to produce a syntax tree at all.
    #[error("failed to parse shell command")]
    TreeSitterFailure,

    /// A quoted string or heredoc was never closed.
    #[error("unterminated {0}")]
    Unterminated(&'static str),

    /// The argv passed to [`crate::ShellParser::parse_shell_invocation`] did
    /// not look like a recognized shell invocation (e.g. `bash -c <script>`).
    #[error("argv does not look like a shell invocation: {0:?}")]
    NotAShellInvocation(Vec<String>),
}

/// Result type for shell parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;
