use super::*;

// =============================================================
// resolve
// =============================================================

#[test]
fn system_resolves_to_dark_when_platform_prefers_dark() {
    assert_eq!(ThemePreference::System.resolve(true), Theme::Dark);
}

#[test]
fn system_resolves_to_lofi_when_platform_prefers_light() {
    assert_eq!(ThemePreference::System.resolve(false), Theme::Lofi);
}

#[test]
fn concrete_preferences_ignore_platform_signal() {
    for prefers_dark in [true, false] {
        assert_eq!(ThemePreference::Dracula.resolve(prefers_dark), Theme::Dracula);
        assert_eq!(ThemePreference::Lofi.resolve(prefers_dark), Theme::Lofi);
        assert_eq!(ThemePreference::Dark.resolve(prefers_dark), Theme::Dark);
    }
}

// =============================================================
// parsing
// =============================================================

#[test]
fn parse_accepts_every_palette_name() {
    for pref in ThemePreference::ALL {
        assert_eq!(pref.as_str().parse::<ThemePreference>(), Ok(pref));
    }
}

#[test]
fn parse_trims_whitespace() {
    assert_eq!(" dracula\n".parse::<ThemePreference>(), Ok(ThemePreference::Dracula));
}

#[test]
fn parse_rejects_unknown_names() {
    let err = "cupcake".parse::<ThemePreference>().unwrap_err();
    assert_eq!(err, ThemeError::Invalid("cupcake".to_owned()));
    assert_eq!(err.to_string(), "invalid theme: cupcake");
}

#[test]
fn default_preference_is_lofi() {
    assert_eq!(ThemePreference::default(), ThemePreference::Lofi);
    assert_eq!(Theme::default(), Theme::Lofi);
}

#[test]
fn serde_uses_lowercase_names() {
    let json = serde_json::to_string(&ThemePreference::System).unwrap();
    assert_eq!(json, "\"system\"");
    let back: Theme = serde_json::from_str("\"dracula\"").unwrap();
    assert_eq!(back, Theme::Dracula);
}
