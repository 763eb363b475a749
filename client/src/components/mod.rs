//! UI components.

pub mod account_status;
pub mod status_badge;
pub mod sync_notice;
pub mod theme_picker;
