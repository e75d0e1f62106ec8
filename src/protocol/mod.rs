//! # Protocol Layer
//!
//! Session-level behaviour on top of the packet codec.
//!
//! ## Components
//! - **Handshake**: the `Connect` state machine binding sessions to client identities
//! - **Dispatcher**: per-packet-type handlers run after a client's store is updated

pub mod dispatcher;
pub mod handshake;
