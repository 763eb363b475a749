//! Shared client-side state.
//!
//! DESIGN
//! ======
//! Signals are owned here and handed to the sync engine through
//! [`signal_cell::SignalCell`]; components read them from context.

pub mod session;
pub mod signal_cell;
pub mod theme;
