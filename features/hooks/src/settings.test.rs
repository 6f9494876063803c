use super::*;

#[test]
fn defaults_allow_everything() {
    let settings = HookSettings::default();
    assert!(!settings.disable_all_hooks);
    assert!(!settings.allow_managed_hooks_only);
}

#[test]
fn serde_roundtrip() {
    let settings = HookSettings {
        disable_all_hooks: true,
        allow_managed_hooks_only: true,
    };
    let json = serde_json::to_string(&settings).expect("serialize");
    let parsed: HookSettings = serde_json::from_str(&json).expect("deserialize");
    assert!(parsed.disable_all_hooks);
    assert!(parsed.allow_managed_hooks_only);
}

#[test]
fn missing_fields_default_to_false() {
    let parsed: HookSettings = serde_json::from_str("{}").expect("deserialize");
    assert!(!parsed.disable_all_hooks);
    assert!(!parsed.allow_managed_hooks_only);
}
