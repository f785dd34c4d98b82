//! Reusable UI components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read shared state from Leptos context (session signal, toast
//! signal, client and store handles) and never talk to the transport directly.

pub mod data_table;
pub mod layout;
pub mod toast_host;
