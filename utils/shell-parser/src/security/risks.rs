//! Risk types produced by security analyzers.

use std::fmt;

/// How severe a detected risk is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Which approval phase a risk belongs to: `Allow` risks are blocked
/// outright (they're injection vectors, not judgment calls), `Ask` risks
/// are surfaced to the user for approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskPhase {
    Allow,
    Ask,
}

/// The specific pattern a risk was detected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskKind {
    /// Obfuscated or hard-to-audit quoting/flags (e.g. ANSI-C quoting).
    ObfuscatedFlags,
    /// A `jq` filter invoking its `system`/`input`/`$ENV` escape hatches.
    JqDanger,
    /// Command or process substitution whose output feeds back into the
    /// command being executed.
    DangerousSubstitution,
    /// An unquoted heredoc delimiter nested inside a command substitution,
    /// letting its body be re-interpreted by the outer command.
    UnsafeHeredocSubstitution,
    /// A command that sends data to or fetches code from the network.
    NetworkExfiltration,
    /// `sudo`/`su`/`doas` or similar privilege escalation.
    PrivilegeEscalation,
    /// Recursive or forced removal of files.
    FileSystemTampering,
    /// A redirect targeting a sensitive file (credentials, shell rc files).
    SensitiveRedirect,
    /// `eval`/`exec` or piping fetched content into a shell.
    CodeExecution,
}

impl RiskKind {
    /// A lowercase, human-readable name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            RiskKind::ObfuscatedFlags => "obfuscated flags",
            RiskKind::JqDanger => "jq danger",
            RiskKind::DangerousSubstitution => "dangerous substitution",
            RiskKind::UnsafeHeredocSubstitution => "unsafe heredoc substitution",
            RiskKind::NetworkExfiltration => "network exfiltration",
            RiskKind::PrivilegeEscalation => "privilege escalation",
            RiskKind::FileSystemTampering => "file system tampering",
            RiskKind::SensitiveRedirect => "sensitive redirect",
            RiskKind::CodeExecution => "code execution",
        }
    }

    fn default_level_and_phase(&self) -> (RiskLevel, RiskPhase) {
        match self {
            RiskKind::ObfuscatedFlags => (RiskLevel::Medium, RiskPhase::Allow),
            RiskKind::JqDanger => (RiskLevel::Medium, RiskPhase::Ask),
            RiskKind::DangerousSubstitution => (RiskLevel::High, RiskPhase::Ask),
            RiskKind::UnsafeHeredocSubstitution => (RiskLevel::Medium, RiskPhase::Ask),
            RiskKind::NetworkExfiltration => (RiskLevel::High, RiskPhase::Ask),
            RiskKind::PrivilegeEscalation => (RiskLevel::Critical, RiskPhase::Ask),
            RiskKind::FileSystemTampering => (RiskLevel::Critical, RiskPhase::Ask),
            RiskKind::SensitiveRedirect => (RiskLevel::High, RiskPhase::Ask),
            RiskKind::CodeExecution => (RiskLevel::Critical, RiskPhase::Ask),
        }
    }
}

impl fmt::Display for RiskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single detected risk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityRisk {
    pub kind: RiskKind,
    pub level: RiskLevel,
    pub phase: RiskPhase,
    pub message: String,
}

impl SecurityRisk {
    /// Construct a risk, deriving its level and phase from `kind`.
    pub fn new(kind: RiskKind, message: impl Into<String>) -> Self {
        let (level, phase) = kind.default_level_and_phase();
        Self {
            kind,
            level,
            phase,
            message: message.into(),
        }
    }
}

impl fmt::Display for SecurityRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// The complete set of risks found in a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityAnalysis {
    pub risks: Vec<SecurityRisk>,
    pub max_level: Option<RiskLevel>,
}

impl SecurityAnalysis {
    /// An analysis with no risks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a risk, updating [`Self::max_level`].
    pub fn add_risk(&mut self, risk: SecurityRisk) {
        self.max_level = Some(match self.max_level {
            Some(current) if current >= risk.level => current,
            _ => risk.level,
        });
        self.risks.push(risk);
    }

    /// Whether any risk was found at all.
    pub fn has_risks(&self) -> bool {
        !self.risks.is_empty()
    }

    /// Whether any risk requires the user's explicit approval before the
    /// command can run.
    pub fn requires_approval(&self) -> bool {
        self.risks.iter().any(|r| r.phase == RiskPhase::Ask)
    }

    /// All risks belonging to a given approval phase.
    pub fn risks_by_phase(&self, phase: RiskPhase) -> Vec<&SecurityRisk> {
        self.risks.iter().filter(|r| r.phase == phase).collect()
    }
}

#[cfg(test)]
#[path = "risks.test.rs"]
mod tests;
