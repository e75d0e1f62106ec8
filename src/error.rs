//! # Error Types
//!
//! Error handling for the relay core.
//!
//! This module defines every error variant that can surface while decoding packets,
//! running the connection handshake, loading settings or building status snapshots.
//!
//! ## Error Categories
//! - **Codec Errors**: short buffers, unknown packet tags, undersized destinations
//! - **Session Errors**: invalid handshakes, packets before a handshake, full server
//! - **Configuration Errors**: unreadable or invalid settings files
//! - **I/O and JSON Errors**: wrapped from `std::io` and `serde_json`
//!
//! Misconfigured permission paths and unknown stages are deliberately *not* errors;
//! they degrade to warnings and `null` values inside the status projection.
//!
//! ## Example Usage
//! ```rust
//! use odyssey_sync::core::packets::CapturePacket;
//! use odyssey_sync::core::packet::Packet;
//! use odyssey_sync::error::ProtocolError;
//!
//! match CapturePacket::deserialize(&[0u8; 4]) {
//!     Err(ProtocolError::MalformedPacket { expected, actual, .. }) => {
//!         assert_eq!(expected, 0x20);
//!         assert_eq!(actual, 4);
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use crate::core::packet::PacketType;
use std::io;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Dispatcher-related error messages
    pub const ERR_DISPATCHER_WRITE_LOCK: &str = "Failed to acquire write lock on dispatcher";
    pub const ERR_DISPATCHER_READ_LOCK: &str = "Failed to acquire read lock on dispatcher";

    /// Handshake errors
    pub const ERR_NO_PRIOR_IDENTITY: &str =
        "Reconnecting handshake without a recoverable client identity";
    pub const ERR_SERVER_FULL: &str = "Server is full";
    pub const ERR_CONNECT_EXPECTED: &str = "Expected a connect packet";

    /// Settings errors
    pub const ERR_SETTINGS_NOT_OBJECT: &str = "Settings tree root must be an object";
}

/// ProtocolError is the primary error type for all relay core operations
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed {packet:?} packet: expected {expected} bytes, got {actual}")]
    MalformedPacket {
        packet: PacketType,
        expected: usize,
        actual: usize,
    },

    #[error("Destination buffer too small for {packet:?} packet: need {expected} bytes, have {actual}")]
    BufferTooSmall {
        packet: PacketType,
        expected: usize,
        actual: usize,
    },

    #[error("Truncated packet header: expected {expected} bytes, got {actual}")]
    TruncatedHeader { expected: usize, actual: usize },

    #[error("Invalid body size in packet header: {0}")]
    InvalidBodySize(i64),

    #[error("Unknown packet type tag: {0}")]
    UnknownPacketType(i16),

    #[error("Invalid connection type: {0}")]
    InvalidConnectionType(i32),

    #[error("Handshake failed: {0}")]
    HandshakeError(String),

    #[error("Unexpected packet type: {0:?}")]
    UnexpectedPacket(PacketType),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Custom error: {0}")]
    Custom(String),
}

impl ProtocolError {
    /// Whether this error ends the handshake of the session that produced it.
    ///
    /// The transport layer uses this to decide between dropping a single packet
    /// and closing the connection.
    pub fn is_fatal_to_session(&self) -> bool {
        matches!(
            self,
            ProtocolError::InvalidConnectionType(_) | ProtocolError::HandshakeError(_)
        )
    }
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handshake_errors_are_fatal() {
        assert!(ProtocolError::InvalidConnectionType(7).is_fatal_to_session());
        assert!(
            ProtocolError::HandshakeError(constants::ERR_SERVER_FULL.into()).is_fatal_to_session()
        );
    }

    #[test]
    fn test_malformed_packet_is_not_fatal() {
        let err = ProtocolError::MalformedPacket {
            packet: PacketType::Game,
            expected: 0x42,
            actual: 3,
        };
        assert!(!err.is_fatal_to_session());
        assert_eq!(
            err.to_string(),
            "Malformed Game packet: expected 66 bytes, got 3"
        );
    }
}
