//! Shell command safety analysis.
//!
//! Layers a fast read-only whitelist and a small set of categorically unsafe
//! patterns on top of [`tessera_shell_parser::security`]'s pattern-based risk
//! analyzer, producing a verdict the tool pipeline can act on directly.

use tessera_shell_parser::ShellParser;
use tessera_shell_parser::security;

pub use tessera_shell_parser::security::RiskKind;
pub use tessera_shell_parser::security::RiskLevel;
pub use tessera_shell_parser::security::RiskPhase;
pub use tessera_shell_parser::security::SecurityRisk;

/// Commands considered read-only regardless of arguments.
const READ_ONLY_COMMANDS: &[&str] = &[
    "ls", "cat", "head", "tail", "wc", "grep", "rg", "find", "which", "whoami", "pwd", "echo",
    "date", "env", "printenv", "uname", "hostname", "df", "du", "file", "stat", "type",
];

/// Shell operators that chain or redirect commands; any of these rules out
/// the whitelist fast path, since they can smuggle in a non-read-only
/// command.
const UNSAFE_OPERATORS: &[&str] = &["&&", "||", ";", "|", ">", "<"];

/// `git` subcommands that cannot mutate repository state.
const GIT_READ_ONLY_SUBCOMMANDS: &[&str] = &["status", "log", "diff", "show", "branch", "tag", "remote"];

/// Returns `true` if `cmd` is a single read-only command with no chaining or
/// redirection operators.
///
/// This is a conservative fast path: a `false` result doesn't mean the
/// command is unsafe, only that it needs the deeper analysis in
/// [`analyze_command_safety`].
pub fn is_read_only_command(cmd: &str) -> bool {
    let trimmed = cmd.trim();
    if trimmed.is_empty() {
        return false;
    }
    if UNSAFE_OPERATORS.iter().any(|op| trimmed.contains(op)) {
        return false;
    }

    let Some(first) = trimmed.split_whitespace().next() else {
        return false;
    };

    if first == "git" {
        return is_git_read_only(trimmed);
    }

    READ_ONLY_COMMANDS.contains(&first)
}

/// Returns `true` if `cmd` is a `git` invocation using a read-only
/// subcommand (`status`, `log`, `diff`, `show`, `branch`, `tag`, `remote`).
pub fn is_git_read_only(cmd: &str) -> bool {
    let mut tokens = cmd.trim().split_whitespace();
    if tokens.next() != Some("git") {
        return false;
    }
    let Some(subcommand) = tokens.next() else {
        return false;
    };
    GIT_READ_ONLY_SUBCOMMANDS.contains(&subcommand)
}

/// Dev-server launchers that block indefinitely; running one without a
/// background flag or timeout just hangs the caller.
const LONG_RUNNING_MARKERS: &[&str] = &[
    "vite",
    "next dev",
    "npm run dev",
    "npm run start",
    "npm run serve",
    "npm start",
    "yarn dev",
    "yarn start",
    "pnpm dev",
    "uvicorn",
    "http.server",
    "flask run",
    "rails server",
    "rails s",
];

/// Strips leading `VAR=value` assignments (e.g. `FOO=bar npm run dev`) and
/// lowercases, matching the form the long-running heuristic expects.
fn strip_leading_assignments(cmd: &str) -> String {
    let mut tokens = cmd.split_whitespace().peekable();
    while let Some(token) = tokens.peek() {
        if token.contains('=') && !token.starts_with('=') {
            let name = token.split('=').next().unwrap_or("");
            if !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                tokens.next();
                continue;
            }
        }
        break;
    }
    tokens.collect::<Vec<_>>().join(" ").to_lowercase()
}

fn looks_long_running(cmd: &str) -> bool {
    let normalized = strip_leading_assignments(cmd);
    LONG_RUNNING_MARKERS.iter().any(|m| normalized.contains(m))
}

const FORK_BOMB_MARKERS: &[&str] = &[":(){ :|:& };:", ":(){:|:&};:"];

fn normalize_whitespace(cmd: &str) -> String {
    cmd.chars().filter(|c| !c.is_whitespace()).collect()
}

fn is_fork_bomb(cmd: &str) -> bool {
    let normalized = normalize_whitespace(cmd);
    FORK_BOMB_MARKERS
        .iter()
        .any(|marker| normalized.contains(&normalize_whitespace(marker)))
}

/// Detects `rm`/`rmdir`/`shred` invocations that recursively force-delete
/// the filesystem root — irreversible regardless of approval.
fn is_recursive_root_deletion(cmd: &str) -> bool {
    let tokens: Vec<&str> = cmd.split_whitespace().collect();
    let Some(pos) = tokens.iter().position(|t| matches!(*t, "rm" | "rmdir" | "shred")) else {
        return false;
    };
    let args = &tokens[pos + 1..];
    let has_recursive = args.iter().any(|a| {
        *a == "-r" || *a == "-R" || (a.starts_with('-') && !a.starts_with("--") && a.contains('r'))
    });
    let has_force = args
        .iter()
        .any(|a| *a == "-f" || (a.starts_with('-') && !a.starts_with("--") && a.contains('f')));
    let targets_root = args.iter().any(|a| *a == "/" || *a == "/*");
    has_recursive && has_force && targets_root
}

/// Commands that are irreversible and categorically unsafe, denied outright
/// regardless of approval.
fn is_categorically_unsafe(cmd: &str) -> bool {
    is_fork_bomb(cmd) || is_recursive_root_deletion(cmd)
}

/// Shells that accept `-c <script>` to run an inline script.
const SHELL_EXEC_COMMANDS: &[&str] = &["bash", "sh", "zsh", "dash", "ksh"];

/// Detects `bash -c '...'`-style inline shell invocations. These run
/// arbitrary code the same way `eval` does, but aren't caught by
/// [`tessera_shell_parser::security`]'s code-execution analyzer, which only
/// flags `eval`/`exec` or a fetch piped into a shell.
fn is_inline_shell_invocation(cmd: &str) -> bool {
    let mut tokens = cmd.split_whitespace();
    let Some(first) = tokens.next() else {
        return false;
    };
    if !SHELL_EXEC_COMMANDS.contains(&first) {
        return false;
    }
    tokens.any(|t| t == "-c")
}

/// The outcome of analyzing a shell command for safety.
#[derive(Debug, Clone)]
pub enum SafetyResult {
    /// Safe to run without approval.
    Safe { via_whitelist: bool },
    /// Carries risk that requires user approval before running.
    RequiresApproval {
        risks: Vec<SecurityRisk>,
        max_level: RiskLevel,
    },
    /// Irreversible or categorically unsafe; never run even with approval.
    Denied { reason: String, risks: Vec<SecurityRisk> },
}

impl SafetyResult {
    pub fn is_safe(&self) -> bool {
        matches!(self, SafetyResult::Safe { .. })
    }

    pub fn requires_approval(&self) -> bool {
        matches!(self, SafetyResult::RequiresApproval { .. })
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, SafetyResult::Denied { .. })
    }

    pub fn risks(&self) -> &[SecurityRisk] {
        match self {
            SafetyResult::Safe { .. } => &[],
            SafetyResult::RequiresApproval { risks, .. } => risks,
            SafetyResult::Denied { risks, .. } => risks,
        }
    }
}

/// Analyzes a shell command string and returns a safety verdict.
///
/// Read-only commands pass via whitelist without deeper parsing. Everything
/// else is parsed and run through [`tessera_shell_parser::security::analyze`];
/// commands carrying a risk that requires approval (privilege escalation,
/// destructive filesystem or git operations, network exfiltration, code
/// execution) come back as [`SafetyResult::RequiresApproval`]. A small set
/// of irreversible patterns (fork bombs, recursive root deletion) are denied
/// outright. A conservative long-running heuristic flags dev server
/// launchers that otherwise look safe but would hang the caller.
pub fn analyze_command_safety(cmd: &str) -> SafetyResult {
    let trimmed = cmd.trim();
    if trimmed.is_empty() {
        return SafetyResult::Safe { via_whitelist: false };
    }

    if is_categorically_unsafe(trimmed) {
        return SafetyResult::Denied {
            reason: "command is irreversible and cannot be made safe by approval".to_string(),
            risks: Vec::new(),
        };
    }

    if is_read_only_command(trimmed) {
        return SafetyResult::Safe { via_whitelist: true };
    }

    let mut risks = get_command_risks(trimmed);
    if is_inline_shell_invocation(trimmed) {
        risks.push(SecurityRisk::new(
            RiskKind::CodeExecution,
            "invokes a shell to run an inline script",
        ));
    }
    let ask_risks: Vec<SecurityRisk> = risks
        .iter()
        .filter(|r| r.phase == RiskPhase::Ask)
        .cloned()
        .collect();

    if !ask_risks.is_empty() {
        let max_level = ask_risks
            .iter()
            .map(|r| r.level)
            .max()
            .unwrap_or(RiskLevel::Medium);
        return SafetyResult::RequiresApproval {
            risks: ask_risks,
            max_level,
        };
    }

    if looks_long_running(trimmed) {
        return SafetyResult::RequiresApproval {
            risks: Vec::new(),
            max_level: RiskLevel::Medium,
        };
    }

    SafetyResult::Safe { via_whitelist: false }
}

/// Returns every risk [`tessera_shell_parser::security`] finds in `cmd`,
/// regardless of phase.
pub fn get_command_risks(cmd: &str) -> Vec<SecurityRisk> {
    let mut parser = ShellParser::new();
    let parsed = parser.parse(cmd);
    security::analyze(&parsed).risks
}

/// Filters `risks` down to those in a given phase.
pub fn filter_risks_by_phase(risks: &[SecurityRisk], phase: RiskPhase) -> Vec<SecurityRisk> {
    risks.iter().filter(|r| r.phase == phase).cloned().collect()
}

/// Filters `risks` down to those at or above `min_level`.
pub fn filter_risks_by_level(risks: &[SecurityRisk], min_level: RiskLevel) -> Vec<SecurityRisk> {
    risks
        .iter()
        .filter(|r| r.level >= min_level)
        .cloned()
        .collect()
}

/// A short human-readable summary of a command's safety verdict.
pub fn safety_summary(cmd: &str) -> String {
    match analyze_command_safety(cmd) {
        SafetyResult::Safe { via_whitelist: true } => "Safe (read-only whitelist)".to_string(),
        SafetyResult::Safe { via_whitelist: false } => "Safe".to_string(),
        SafetyResult::RequiresApproval { risks, max_level } => {
            let details: Vec<String> = risks.iter().map(|r| r.message.clone()).collect();
            format!(
                "Requires approval ({max_level:?} risk): {}",
                details.join("; ")
            )
        }
        SafetyResult::Denied { reason, .. } => format!("Denied: {reason}"),
    }
}

#[cfg(test)]
#[path = "readonly.test.rs"]
mod tests;
