use super::*;

#[test]
fn empty_inputs_render_dash() {
    assert_eq!(format_env_display(None, &[]), "-");
}

#[test]
fn map_entries_are_sorted_and_masked() {
    let mut env = HashMap::new();
    env.insert("ZETA".to_string(), "z".to_string());
    env.insert("ALPHA".to_string(), "a".to_string());
    assert_eq!(format_env_display(Some(&env), &[]), "ALPHA=*****, ZETA=*****");
}

#[test]
fn env_vars_are_appended_and_masked() {
    let vars = vec!["HOME".to_string(), "PATH".to_string()];
    assert_eq!(format_env_display(None, &vars), "HOME=*****, PATH=*****");
}

#[test]
fn map_and_vars_combine() {
    let mut env = HashMap::new();
    env.insert("KEY".to_string(), "value".to_string());
    let vars = vec!["HOME".to_string()];
    assert_eq!(format_env_display(Some(&env), &vars), "KEY=*****, HOME=*****");
}
