use super::*;

#[test]
fn disabled_manager_reports_no_active_exporter() {
    let manager = OtelManager::disabled();
    assert!(!manager.settings().any_exporter_active());
}

#[test]
fn tool_decision_source_display() {
    assert_eq!(ToolDecisionSource::Config.to_string(), "config");
    assert_eq!(ToolDecisionSource::User.to_string(), "user");
}

#[test]
fn install_with_no_exporter_returns_noop_guard() {
    let settings = OtelSettings::default();
    let guard = install(&settings).expect("install should not fail with no exporter");
    assert!(guard.provider.is_none());
}
