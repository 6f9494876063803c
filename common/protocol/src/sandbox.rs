//! Filesystem sandbox levels for tool execution.

use serde::Deserialize;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// How much of the filesystem a tool execution may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SandboxMode {
    /// No writes anywhere.
    #[default]
    ReadOnly,
    /// Writes confined to the workspace.
    WorkspaceWrite,
    /// No restrictions.
    FullAccess,
}

impl SandboxMode {
    /// Whether this mode permits any writes at all.
    pub fn allows_write(&self) -> bool {
        !matches!(self, SandboxMode::ReadOnly)
    }

    /// Whether this mode is unrestricted.
    pub fn is_full_access(&self) -> bool {
        matches!(self, SandboxMode::FullAccess)
    }

    /// Canonical kebab-case string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            SandboxMode::ReadOnly => "read-only",
            SandboxMode::WorkspaceWrite => "workspace-write",
            SandboxMode::FullAccess => "full-access",
        }
    }
}

impl fmt::Display for SandboxMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SandboxMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read-only" | "readonly" | "read_only" => Ok(SandboxMode::ReadOnly),
            "workspace-write" | "workspace_write" => Ok(SandboxMode::WorkspaceWrite),
            "full-access" | "full_access" => Ok(SandboxMode::FullAccess),
            other => Err(format!("unknown sandbox mode: {other}")),
        }
    }
}

#[cfg(test)]
#[path = "sandbox.test.rs"]
mod tests;
