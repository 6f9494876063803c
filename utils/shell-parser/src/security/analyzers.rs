//! Individual pattern-based security checks run over a parsed command.

use crate::parser::ParsedCommand;
use crate::redirects::RedirectKind;
use crate::redirects::extract_redirects_from_tree;
use crate::security::risks::RiskKind;
use crate::security::risks::SecurityAnalysis;
use crate::security::risks::SecurityRisk;

/// A single security check over a parsed command.
pub trait SecurityAnalyzer: Send + Sync {
    /// Inspect `cmd`, recording any risks found into `analysis`.
    fn analyze(&self, cmd: &ParsedCommand, analysis: &mut SecurityAnalysis);
}

/// The standard set of analyzers run by [`crate::security::analyze`].
pub fn default_analyzers() -> Vec<Box<dyn SecurityAnalyzer>> {
    vec![
        Box::new(ObfuscationAnalyzer),
        Box::new(JqAnalyzer),
        Box::new(SubstitutionAnalyzer),
        Box::new(HeredocSubstitutionAnalyzer),
        Box::new(PrivilegeEscalationAnalyzer),
        Box::new(FileSystemTamperingAnalyzer),
        Box::new(CodeExecutionAnalyzer),
        Box::new(NetworkAnalyzer),
        Box::new(SensitiveRedirectAnalyzer),
    ]
}

const SENSITIVE_PATH_FRAGMENTS: &[&str] = &[
    "/etc/passwd",
    "/etc/shadow",
    ".ssh/",
    ".bashrc",
    ".bash_profile",
    ".zshrc",
    ".env",
    ".aws/credentials",
    ".npmrc",
];

/// Flags ANSI-C (`$'...'`) and localized (`$"..."`) quoting, which can hide
/// control characters or escape sequences from a casual read of the command.
struct ObfuscationAnalyzer;

impl SecurityAnalyzer for ObfuscationAnalyzer {
    fn analyze(&self, cmd: &ParsedCommand, analysis: &mut SecurityAnalysis) {
        if cmd.source().contains("$'") || cmd.source().contains("$\"") {
            analysis.add_risk(SecurityRisk::new(
                RiskKind::ObfuscatedFlags,
                "command uses ANSI-C or localized quoting, which can hide control characters",
            ));
        }
    }
}

/// Flags `jq` filters that reach for its process/environment escape
/// hatches (`system`, `env`, `input`, `$__prog_name`, etc.).
struct JqAnalyzer;

impl SecurityAnalyzer for JqAnalyzer {
    fn analyze(&self, cmd: &ParsedCommand, analysis: &mut SecurityAnalysis) {
        for command in cmd.extract_commands() {
            let Some(first) = command.first() else {
                continue;
            };
            if first != "jq" {
                continue;
            }
            if command.iter().any(|arg| arg.contains("system(") || arg.contains("env(") || arg.contains("input(")) {
                analysis.add_risk(SecurityRisk::new(
                    RiskKind::JqDanger,
                    "jq filter invokes system/env/input, which can execute code or read arbitrary files",
                ));
            }
        }
    }
}

/// Flags command substitution (`$(...)` or backticks), whose output is fed
/// back into the command line being executed.
struct SubstitutionAnalyzer;

impl SecurityAnalyzer for SubstitutionAnalyzer {
    fn analyze(&self, cmd: &ParsedCommand, analysis: &mut SecurityAnalysis) {
        if cmd.source().contains("$(") || cmd.source().contains('`') {
            analysis.add_risk(SecurityRisk::new(
                RiskKind::DangerousSubstitution,
                "command substitution's output is interpreted as part of the command",
            ));
        }
    }
}

/// Flags a heredoc with an unquoted delimiter nested inside a command
/// substitution: the outer substitution re-interprets the heredoc body,
/// so expansions inside it run in a context the author may not expect.
struct HeredocSubstitutionAnalyzer;

impl SecurityAnalyzer for HeredocSubstitutionAnalyzer {
    fn analyze(&self, cmd: &ParsedCommand, analysis: &mut SecurityAnalysis) {
        let source = cmd.source();
        let bytes = source.as_bytes();

        for (start, _) in source.match_indices("$(") {
            let Some(end) = matching_paren(bytes, start + 2) else {
                continue;
            };
            let span = &source[start..end];
            if has_unquoted_heredoc(span) {
                analysis.add_risk(SecurityRisk::new(
                    RiskKind::UnsafeHeredocSubstitution,
                    "unquoted heredoc delimiter inside a command substitution lets the outer command reinterpret its body",
                ));
                break;
            }
        }
    }
}

fn matching_paren(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 1i32;
    let mut pos = start;
    while pos < bytes.len() {
        match bytes[pos] {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(pos + 1);
                }
            }
            _ => {}
        }
        pos += 1;
    }
    None
}

fn has_unquoted_heredoc(span: &str) -> bool {
    let Some(idx) = span.find("<<") else {
        return false;
    };
    let rest = span[idx + 2..].trim_start_matches('-');
    let delimiter_start = rest.trim_start();
    !delimiter_start.starts_with('\'') && !delimiter_start.starts_with('"')
}

/// Flags `sudo`/`su`/`doas` invocations.
struct PrivilegeEscalationAnalyzer;

impl SecurityAnalyzer for PrivilegeEscalationAnalyzer {
    fn analyze(&self, cmd: &ParsedCommand, analysis: &mut SecurityAnalysis) {
        for command in cmd.extract_commands() {
            if matches!(command.first().map(String::as_str), Some("sudo" | "su" | "doas")) {
                analysis.add_risk(SecurityRisk::new(
                    RiskKind::PrivilegeEscalation,
                    "command escalates privileges",
                ));
            }
        }
    }
}

/// Flags recursive/forced `rm` (and `rm`-equivalents).
struct FileSystemTamperingAnalyzer;

impl SecurityAnalyzer for FileSystemTamperingAnalyzer {
    fn analyze(&self, cmd: &ParsedCommand, analysis: &mut SecurityAnalysis) {
        for command in cmd.extract_commands() {
            let Some(first) = command.first() else {
                continue;
            };
            if !matches!(first.as_str(), "rm" | "rmdir" | "shred") {
                continue;
            }
            let has_recursive = command.iter().any(|a| a == "-r" || a == "-R" || a.starts_with('-') && a.contains('r'));
            let has_force = command.iter().any(|a| a == "-f" || a.starts_with('-') && a.contains('f'));
            if has_recursive || has_force {
                analysis.add_risk(SecurityRisk::new(
                    RiskKind::FileSystemTampering,
                    format!("{first} forcibly or recursively removes files"),
                ));
            }
        }
    }
}

/// Flags `eval`/`exec`/`source` and piping remote content into a shell.
struct CodeExecutionAnalyzer;

impl SecurityAnalyzer for CodeExecutionAnalyzer {
    fn analyze(&self, cmd: &ParsedCommand, analysis: &mut SecurityAnalysis) {
        let commands = cmd.extract_commands();
        for command in &commands {
            if matches!(command.first().map(String::as_str), Some("eval" | "exec")) {
                analysis.add_risk(SecurityRisk::new(
                    RiskKind::CodeExecution,
                    "command evaluates a string as code",
                ));
            }
        }

        let shells = ["bash", "sh", "zsh"];
        let piped_into_shell = commands
            .iter()
            .skip(1)
            .any(|c| c.first().map(|s| shells.contains(&s.as_str())).unwrap_or(false));
        let fetches_remote = commands
            .first()
            .and_then(|c| c.first())
            .map(|s| matches!(s.as_str(), "curl" | "wget"))
            .unwrap_or(false);
        if piped_into_shell && fetches_remote {
            analysis.add_risk(SecurityRisk::new(
                RiskKind::CodeExecution,
                "fetched content is piped directly into a shell",
            ));
        }
    }
}

/// Flags `curl`/`wget` against a URL, which can exfiltrate data or pull
/// down arbitrary content.
struct NetworkAnalyzer;

impl SecurityAnalyzer for NetworkAnalyzer {
    fn analyze(&self, cmd: &ParsedCommand, analysis: &mut SecurityAnalysis) {
        for command in cmd.extract_commands() {
            let Some(first) = command.first() else {
                continue;
            };
            if !matches!(first.as_str(), "curl" | "wget" | "nc" | "ncat") {
                continue;
            }
            if command.iter().any(|a| a.starts_with("http://") || a.starts_with("https://") || a.starts_with("ftp://")) {
                analysis.add_risk(SecurityRisk::new(
                    RiskKind::NetworkExfiltration,
                    format!("{first} sends or fetches data over the network"),
                ));
            }
        }
    }
}

/// Flags redirects that write into well-known sensitive files.
struct SensitiveRedirectAnalyzer;

impl SecurityAnalyzer for SensitiveRedirectAnalyzer {
    fn analyze(&self, cmd: &ParsedCommand, analysis: &mut SecurityAnalysis) {
        let Some(tree) = cmd.tree() else {
            return;
        };
        for redirect in extract_redirects_from_tree(tree, cmd.source()) {
            if !matches!(redirect.kind, RedirectKind::Output | RedirectKind::Append) {
                continue;
            }
            if SENSITIVE_PATH_FRAGMENTS.iter().any(|frag| redirect.target.contains(frag)) {
                analysis.add_risk(SecurityRisk::new(
                    RiskKind::SensitiveRedirect,
                    format!("redirect writes to sensitive path {}", redirect.target),
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "analyzers.test.rs"]
mod tests;
