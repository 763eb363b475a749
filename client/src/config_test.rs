use super::*;

#[test]
fn unknown_keys_are_unset() {
    assert_eq!(compiled_var("POCKETBOOK_NOT_A_SETTING"), None);
}

#[test]
fn load_matches_compiled_project_id() {
    match option_env!("POCKETBOOK_FIREBASE_PROJECT_ID").map(str::trim).filter(|v| !v.is_empty()) {
        Some(project) => assert_eq!(load().unwrap().project_id, project),
        None => assert_eq!(load().unwrap_err(), ConfigError::Missing(PROJECT_ID_VAR)),
    }
}
