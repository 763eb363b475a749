//! Browser adapters for the core's platform seams.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each module isolates one piece of web-sys glue so components and the sync
//! engine never touch the DOM directly.

pub mod modal;
pub mod storage;
pub mod theme_surface;
