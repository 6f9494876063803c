//! Security analysis of parsed shell commands: pattern-based detection of
//! dangerous constructs, producing risks grouped by approval phase.

mod analyzers;
mod risks;

pub use analyzers::SecurityAnalyzer;
pub use analyzers::default_analyzers;
pub use risks::RiskKind;
pub use risks::RiskLevel;
pub use risks::RiskPhase;
pub use risks::SecurityAnalysis;
pub use risks::SecurityRisk;

use crate::parser::ParsedCommand;

/// Run the standard analyzer set over a parsed command.
pub fn analyze(cmd: &ParsedCommand) -> SecurityAnalysis {
    let mut analysis = SecurityAnalysis::new();
    for analyzer in default_analyzers() {
        analyzer.analyze(cmd, &mut analysis);
    }
    analysis
}

/// Whether a command has any detected risk at all.
pub fn has_risks(cmd: &ParsedCommand) -> bool {
    analyze(cmd).has_risks()
}

/// Whether a command has a risk that requires explicit user approval.
pub fn requires_approval(cmd: &ParsedCommand) -> bool {
    analyze(cmd).requires_approval()
}

#[cfg(test)]
#[path = "mod.test.rs"]
mod tests;
