#![cfg(not(feature = "csr"))]

use super::*;

#[test]
fn missing_dialog_is_a_noop() {
    assert!(!show_modal("add-category"));
    assert!(!close_modal("add-category"));
}
