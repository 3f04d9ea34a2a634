//! Networking modules for the remote API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` moves bytes with `gloo-net`; request construction, header
//! decoration, and status classification happen in the `session` gateway.

pub mod transport;
