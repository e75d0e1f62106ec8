//! # Core Protocol Components
//!
//! Fixed-layout packet encoding, decoding and tag-based routing.
//!
//! Every packet body has a size known at compile time. Bodies are written and read
//! with explicit little-endian cursors, so the byte offset of each field is visible
//! in the code rather than implied by a struct's memory layout.
//!
//! ## Components
//! - **Cursor**: `PacketWriter` / `PacketReader`, bounded fixed-slot string helpers
//! - **Packet**: the `Packet` trait, `PacketType` tags and the `AnyPacket` router
//! - **Header**: the 20-byte header carrying client id, tag and body size
//! - **Packets**: the concrete packet shapes
//!
//! ## Wire Format
//! ```text
//! [ClientId(16)] [Type(2)] [Size(2)] [Body(Size)]
//! ```
//!
//! ## Safety
//! - Decoding checks the buffer against the declared size before reading
//! - String slots are truncated on a UTF-8 boundary, never overflowed

pub mod cursor;
pub mod header;
pub mod math;
pub mod packet;
pub mod packets;
