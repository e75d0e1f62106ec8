//! # Binary Cursors
//!
//! Bounded little-endian writer and reader over flat byte slices.
//!
//! Both cursors assume the caller already checked the slice against the packet's
//! declared size; [`Packet::serialize`](crate::core::packet::Packet::serialize) and
//! [`Packet::deserialize`](crate::core::packet::Packet::deserialize) do exactly that
//! before handing a cursor to the field code.
//!
//! ## String slots
//! Fixed-width strings are UTF-8, right-padded with zero bytes. Values longer than
//! the slot are cut at the last character boundary that fits, so a multi-byte
//! character is never split and neighbouring fields are never touched. On decode the
//! slot is trimmed at the first zero byte.

use crate::core::math::{Quat, Vec3};
use bytes::{Buf, BufMut};

/// Longest prefix of `value` that fits in `width` bytes without splitting a character.
pub fn truncate_utf8(value: &str, width: usize) -> &str {
    if value.len() <= width {
        return value;
    }
    let mut end = width;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

/// Sequential writer over a pre-sized destination slice
pub struct PacketWriter<'a> {
    buf: &'a mut [u8],
    written: usize,
}

impl<'a> PacketWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, written: 0 }
    }

    /// Number of bytes written so far
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn put_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
        self.written += 1;
    }

    pub fn put_i8(&mut self, value: i8) {
        self.buf.put_i8(value);
        self.written += 1;
    }

    pub fn put_bool(&mut self, value: bool) {
        self.put_u8(u8::from(value));
    }

    pub fn put_u16(&mut self, value: u16) {
        self.buf.put_u16_le(value);
        self.written += 2;
    }

    pub fn put_i16(&mut self, value: i16) {
        self.buf.put_i16_le(value);
        self.written += 2;
    }

    pub fn put_i32(&mut self, value: i32) {
        self.buf.put_i32_le(value);
        self.written += 4;
    }

    pub fn put_f32(&mut self, value: f32) {
        self.buf.put_f32_le(value);
        self.written += 4;
    }

    pub fn put_vec3(&mut self, value: &Vec3) {
        self.put_f32(value.x);
        self.put_f32(value.y);
        self.put_f32(value.z);
    }

    pub fn put_quat(&mut self, value: &Quat) {
        self.put_f32(value.x);
        self.put_f32(value.y);
        self.put_f32(value.z);
        self.put_f32(value.w);
    }

    /// Zero bytes used for alignment gaps
    pub fn pad(&mut self, count: usize) {
        self.buf.put_bytes(0, count);
        self.written += count;
    }

    /// Write `value` into a zero-padded slot of exactly `width` bytes
    pub fn put_fixed_str(&mut self, value: &str, width: usize) {
        let bytes = truncate_utf8(value, width).as_bytes();
        self.buf.put_slice(bytes);
        self.written += bytes.len();
        self.pad(width - bytes.len());
    }

    pub fn put_slice(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
        self.written += bytes.len();
    }
}

/// Sequential reader over a source slice
pub struct PacketReader<'a> {
    buf: &'a [u8],
    read: usize,
}

impl<'a> PacketReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, read: 0 }
    }

    /// Number of bytes consumed so far
    pub fn consumed(&self) -> usize {
        self.read
    }

    pub fn get_u8(&mut self) -> u8 {
        self.read += 1;
        self.buf.get_u8()
    }

    pub fn get_i8(&mut self) -> i8 {
        self.read += 1;
        self.buf.get_i8()
    }

    /// Any non-zero byte reads as `true`
    pub fn get_bool(&mut self) -> bool {
        self.get_u8() != 0
    }

    pub fn get_u16(&mut self) -> u16 {
        self.read += 2;
        self.buf.get_u16_le()
    }

    pub fn get_i16(&mut self) -> i16 {
        self.read += 2;
        self.buf.get_i16_le()
    }

    pub fn get_i32(&mut self) -> i32 {
        self.read += 4;
        self.buf.get_i32_le()
    }

    pub fn get_f32(&mut self) -> f32 {
        self.read += 4;
        self.buf.get_f32_le()
    }

    pub fn get_vec3(&mut self) -> Vec3 {
        Vec3 {
            x: self.get_f32(),
            y: self.get_f32(),
            z: self.get_f32(),
        }
    }

    pub fn get_quat(&mut self) -> Quat {
        Quat {
            x: self.get_f32(),
            y: self.get_f32(),
            z: self.get_f32(),
            w: self.get_f32(),
        }
    }

    pub fn skip(&mut self, count: usize) {
        self.read += count;
        self.buf.advance(count);
    }

    /// Read a `width`-byte slot, trimming at the first zero byte
    pub fn get_fixed_str(&mut self, width: usize) -> String {
        let slot = &self.buf[..width];
        let end = slot.iter().position(|&b| b == 0).unwrap_or(width);
        let value = String::from_utf8_lossy(&slot[..end]).into_owned();
        self.skip(width);
        value
    }

    pub fn get_slice(&mut self, len: usize) -> &'a [u8] {
        let (head, tail) = self.buf.split_at(len);
        self.buf = tail;
        self.read += len;
        head
    }
}
