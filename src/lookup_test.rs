use super::*;

// =============================================================
// category icons
// =============================================================

#[test]
fn known_category_names_map_to_their_icons() {
    assert_eq!(icon_for_category("Housing"), Icon::Housing);
    assert_eq!(icon_for_category("Food"), Icon::Food);
    assert_eq!(icon_for_category("Other"), Icon::Other);
}

#[test]
fn unknown_category_falls_back_to_other() {
    assert_eq!(icon_for_category("Rent"), FALLBACK_CATEGORY_ICON);
    assert_eq!(icon_for_category(""), Icon::Other);
    assert_eq!(category_icon("Rent"), None);
}

#[test]
fn lookup_is_case_sensitive_on_display_name() {
    assert_eq!(icon_for_category("housing"), Icon::Other);
    assert_eq!(category_by_id("housing").map(|e| e.icon), Some(Icon::Housing));
}

#[test]
fn table_ids_and_symbols_are_unique() {
    for (i, a) in CATEGORY_ICONS.iter().enumerate() {
        for b in &CATEGORY_ICONS[i + 1..] {
            assert_ne!(a.id, b.id);
            assert_ne!(a.icon.symbol(), b.icon.symbol());
        }
    }
}

#[test]
fn sprite_href_points_into_sheet() {
    assert_eq!(Icon::Travel.sprite_href(), "/icons.svg#icon-travel");
}

// =============================================================
// budget status
// =============================================================

#[test]
fn status_classes_match_labels() {
    assert_eq!(status_class("Over Budget"), "bg-error/20 text-error");
    assert_eq!(status_class("At Limit"), "bg-warning/20 text-warning");
    assert_eq!(status_class("On Track"), "bg-success/20 text-success");
}

#[test]
fn unknown_status_gets_neutral_class_and_on_track_icon() {
    assert_eq!(status_class("Paused"), NEUTRAL_STATUS_CLASS);
    assert_eq!(status_icon("Paused"), Icon::OnTrack);
}

#[test]
fn status_icons_match_labels() {
    assert_eq!(status_icon("Over Budget"), Icon::OverBudget);
    assert_eq!(status_icon("At Limit"), Icon::AtLimit);
    assert_eq!(status_icon("On Track"), Icon::OnTrack);
}

#[test]
fn classify_compares_spent_to_allocation() {
    assert_eq!(BudgetStatus::classify(12_001, 12_000), BudgetStatus::OverBudget);
    assert_eq!(BudgetStatus::classify(12_000, 12_000), BudgetStatus::AtLimit);
    assert_eq!(BudgetStatus::classify(0, 12_000), BudgetStatus::OnTrack);
}

#[test]
fn labels_round_trip() {
    for status in [BudgetStatus::OverBudget, BudgetStatus::AtLimit, BudgetStatus::OnTrack] {
        assert_eq!(BudgetStatus::from_label(status.label()), Some(status));
    }
}
