//! Networking: the authenticated request pipeline and the endpoints on top.
//!
//! SYSTEM CONTEXT
//! ==============
//! `client` owns the outbound/inbound stages, `inbound` the pure response
//! classification, `transport` the raw exchange, and `api`/`scheduler_api`
//! the fixed-path wrappers views call.

pub mod api;
pub mod client;
pub mod envelope;
pub mod error;
pub mod inbound;
pub mod scheduler_api;
pub mod transport;
pub mod types;
