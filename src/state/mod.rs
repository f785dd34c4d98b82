//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` is the single source of truth for authentication; `toast` holds
//! presentation-only notices.

pub mod session;
pub mod toast;
