//! Route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Every page installs the route guard for its own path and renders nothing
//! until the guard allows it. Data loading goes through the endpoint
//! wrappers; error notices are already raised by the client, so pages only
//! react to success or failure.

pub mod dashboard;
pub mod executors;
pub mod groups;
pub mod instances;
pub mod login;
pub mod tasks;
