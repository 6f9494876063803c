//! Permission modes, approval flows, and risk assessment for tool calls.

use serde::Deserialize;
use serde::Serialize;

/// Session-wide permission posture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionMode {
    /// Ask before writes; this is the normal interactive mode.
    #[default]
    Default,
    /// Plan mode: read-only exploration, writes always require approval.
    Plan,
    /// Writes are auto-approved; other risky operations still ask.
    AcceptEdits,
    /// Everything is auto-approved.
    Bypass,
}

impl PermissionMode {
    /// Whether writes in this mode require explicit approval.
    pub fn requires_write_approval(&self) -> bool {
        matches!(self, PermissionMode::Default | PermissionMode::Plan)
    }

    /// Whether edits are auto-accepted in this mode.
    pub fn auto_accept_edits(&self) -> bool {
        matches!(self, PermissionMode::AcceptEdits | PermissionMode::Bypass)
    }

    /// Whether this mode bypasses all permission checks.
    pub fn is_bypass(&self) -> bool {
        matches!(self, PermissionMode::Bypass)
    }
}

/// Configured behavior for a single permission rule match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionBehavior {
    /// Allow without asking.
    Allow,
    /// Ask the user.
    #[default]
    Ask,
    /// Deny outright.
    Deny,
}

impl PermissionBehavior {
    /// Whether this behavior allows the operation without asking.
    pub fn is_allowed(&self) -> bool {
        matches!(self, PermissionBehavior::Allow)
    }

    /// Whether this behavior requires asking the user.
    pub fn requires_approval(&self) -> bool {
        matches!(self, PermissionBehavior::Ask)
    }

    /// Whether this behavior denies the operation outright.
    pub fn is_denied(&self) -> bool {
        matches!(self, PermissionBehavior::Deny)
    }
}

/// Where a permission rule came from, used to break ties between
/// conflicting rules (lower value = higher priority).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleSource {
    /// Rule set for just this session (highest priority).
    Session,
    /// Rule granted in response to a specific command.
    Command,
    /// Rule passed on the CLI for this invocation.
    Cli,
    /// Rule set by a CLI flag.
    Flag,
    /// Rule from the local (gitignored) project config.
    Local,
    /// Rule from the project's checked-in config.
    Project,
    /// Rule from an org-wide policy file.
    Policy,
    /// Rule from the user's global config (lowest priority).
    User,
}

/// Severity of a security risk flagged for a proposed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskSeverity {
    /// Whether this severity is at least as severe as `other`.
    pub fn at_least(&self, other: RiskSeverity) -> bool {
        *self >= other
    }
}

/// Category of security risk detected for a proposed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskType {
    /// Operation may destroy data (rm, overwrite, force-push).
    Destructive,
    /// Operation may exfiltrate data over the network.
    Network,
    /// Operation escalates privileges (sudo, chmod).
    Elevated,
    /// Operation touches a file known to hold credentials or secrets.
    SensitiveFile,
    /// Operation modifies system or project configuration.
    SystemConfig,
    /// Risk detected but not classifiable into a more specific category.
    Unknown,
}

/// A single detected risk for a proposed operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityRisk {
    /// Category of risk.
    pub risk_type: RiskType,
    /// How severe this risk is judged to be.
    pub severity: RiskSeverity,
    /// Human-readable explanation shown to the user.
    pub message: String,
}

/// A pending approval request surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalRequest {
    /// Unique ID correlating this request with its eventual decision.
    pub request_id: String,
    /// Name of the tool requesting approval.
    pub tool_name: String,
    /// Human-readable description of what's being requested.
    pub description: String,
    /// Risks flagged for this operation.
    pub risks: Vec<SecurityRisk>,
    /// Whether the user can choose to remember this decision.
    pub allow_remember: bool,
    /// A prefix pattern the user could approve instead of the exact command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposed_prefix_pattern: Option<String>,
}

/// The user's response to an [`ApprovalRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "kebab-case")]
pub enum ApprovalDecision {
    /// Approved exactly as requested.
    Approved,
    /// Approved, and remember a broader prefix pattern for next time.
    ApprovedWithPrefix {
        /// Pattern to remember (e.g. `"git *"`).
        prefix_pattern: String,
    },
    /// Denied.
    Denied,
}

/// Outcome of a permission check for a proposed tool call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum PermissionResult {
    /// Operation is allowed to proceed.
    Allowed,
    /// Operation is denied.
    Denied {
        /// Reason for the denial.
        reason: String,
    },
    /// Operation requires user approval before proceeding.
    NeedsApproval {
        /// The request to surface to the user.
        request: ApprovalRequest,
    },
    /// No permission check applies; defer to the caller.
    Passthrough,
}

impl PermissionResult {
    /// Whether the operation is allowed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, PermissionResult::Allowed)
    }

    /// Whether the operation is denied.
    pub fn is_denied(&self) -> bool {
        matches!(self, PermissionResult::Denied { .. })
    }

    /// Whether the operation needs user approval.
    pub fn needs_approval(&self) -> bool {
        matches!(self, PermissionResult::NeedsApproval { .. })
    }

    /// Whether this result defers to the caller (no check applied).
    pub fn is_passthrough(&self) -> bool {
        matches!(self, PermissionResult::Passthrough)
    }
}

/// Record of how a permission decision was reached, kept for audit/logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionDecision {
    /// Whether the operation was allowed.
    pub allowed: bool,
    /// Human-readable reason for the decision.
    pub reason: String,
    /// Which rule source produced this decision, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<RuleSource>,
    /// The pattern that matched, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_pattern: Option<String>,
}

impl PermissionDecision {
    /// Build an "allowed" decision with the given reason.
    pub fn allowed(reason: impl Into<String>) -> Self {
        Self {
            allowed: true,
            reason: reason.into(),
            source: None,
            matched_pattern: None,
        }
    }

    /// Build a "denied" decision with the given reason.
    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: reason.into(),
            source: None,
            matched_pattern: None,
        }
    }

    /// Whether this decision allows the operation.
    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    /// Builder: attach the rule source.
    pub fn with_source(mut self, source: RuleSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Builder: attach the matched pattern.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.matched_pattern = Some(pattern.into());
        self
    }
}

#[cfg(test)]
#[path = "permission.test.rs"]
mod tests;
