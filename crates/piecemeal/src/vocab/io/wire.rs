//! # Protobuf Wire Codec
//!
//! A minimal, fully bounds-checked reader (and matching writer) for the
//! protobuf wire encoding used by serialized models.
//!
//! Every length prefix is checked against the remaining buffer before it
//! is used to slice; nothing is allocated based on an unvalidated length.

use crate::{
    alloc::{format, vec::Vec},
    errors::{PMError, PMResult},
};

/// Protobuf wire types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
    /// `int32`, `int64`, `uint32`, `bool`, `enum`.
    Varint,

    /// `fixed64`, `double`.
    Fixed64,

    /// `string`, `bytes`, embedded messages.
    LengthDelimited,

    /// `fixed32`, `float`.
    Fixed32,
}

impl WireType {
    fn from_tag_bits(bits: u64) -> PMResult<Self> {
        match bits {
            0 => Ok(Self::Varint),
            1 => Ok(Self::Fixed64),
            2 => Ok(Self::LengthDelimited),
            5 => Ok(Self::Fixed32),
            3 | 4 => Err(PMError::malformed("group wire types are not supported")),
            other => Err(PMError::malformed(format!("invalid wire type {other}"))),
        }
    }

    fn tag_bits(self) -> u64 {
        match self {
            Self::Varint => 0,
            Self::Fixed64 => 1,
            Self::LengthDelimited => 2,
            Self::Fixed32 => 5,
        }
    }
}

/// A decoded field key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldKey {
    /// The field number.
    pub field: u32,

    /// The wire type of the value which follows.
    pub wire_type: WireType,
}

impl FieldKey {
    /// Require a wire type for this field.
    pub fn expect(
        &self,
        wire_type: WireType,
        context: &str,
    ) -> PMResult<()> {
        if self.wire_type == wire_type {
            Ok(())
        } else {
            Err(PMError::malformed(format!(
                "{context}: field {} has wire type {:?}, expected {:?}",
                self.field, self.wire_type, wire_type
            )))
        }
    }
}

/// Cursor over a protobuf-encoded message.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    /// Create a reader over `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// The number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Has the whole buffer been consumed?
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn take(
        &mut self,
        len: usize,
    ) -> PMResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(PMError::malformed(format!(
                "truncated record at byte {}: need {len} bytes, {} remain",
                self.pos,
                self.remaining()
            )));
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Read a base-128 varint.
    pub fn read_varint(&mut self) -> PMResult<u64> {
        let mut value: u64 = 0;
        for shift in (0..70).step_by(7) {
            let byte = *self
                .take(1)?
                .first()
                .ok_or_else(|| PMError::malformed("truncated varint"))?;
            if shift == 63 && byte > 1 {
                return Err(PMError::malformed("varint overflows 64 bits"));
            }
            value |= u64::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(PMError::malformed("varint longer than 10 bytes"))
    }

    /// Read the next field key.
    pub fn read_key(&mut self) -> PMResult<FieldKey> {
        let raw = self.read_varint()?;
        let field = raw >> 3;
        if field == 0 || field > u64::from(u32::MAX >> 3) {
            return Err(PMError::malformed(format!("invalid field number {field}")));
        }
        Ok(FieldKey {
            field: field as u32,
            wire_type: WireType::from_tag_bits(raw & 0x7)?,
        })
    }

    /// Read a varint-encoded `int32`.
    ///
    /// Negative values are sign-extended to 10 bytes on the wire.
    pub fn read_int32(&mut self) -> PMResult<i32> {
        let raw = self.read_varint()? as i64;
        i32::try_from(raw).map_err(|_| PMError::malformed(format!("int32 out of range: {raw}")))
    }

    /// Read a varint-encoded `bool`.
    pub fn read_bool(&mut self) -> PMResult<bool> {
        Ok(self.read_varint()? != 0)
    }

    /// Read a little-endian `fixed32` as an `f32`.
    pub fn read_float(&mut self) -> PMResult<f32> {
        let bytes: [u8; 4] = self
            .take(4)?
            .try_into()
            .map_err(|_| PMError::malformed("truncated float"))?;
        Ok(f32::from_le_bytes(bytes))
    }

    /// Read a length-delimited payload.
    pub fn read_bytes(&mut self) -> PMResult<&'a [u8]> {
        let len = self.read_varint()?;
        let len = usize::try_from(len)
            .map_err(|_| PMError::malformed(format!("length field {len} overflows usize")))?;
        self.take(len)
    }

    /// Read a length-delimited UTF-8 string.
    pub fn read_str(&mut self) -> PMResult<&'a str> {
        let bytes = self.read_bytes()?;
        core::str::from_utf8(bytes)
            .map_err(|e| PMError::malformed(format!("string field is not UTF-8: {e}")))
    }

    /// Skip over a value of the given wire type.
    pub fn skip(
        &mut self,
        wire_type: WireType,
    ) -> PMResult<()> {
        match wire_type {
            WireType::Varint => self.read_varint().map(|_| ()),
            WireType::Fixed64 => self.take(8).map(|_| ()),
            WireType::LengthDelimited => self.read_bytes().map(|_| ()),
            WireType::Fixed32 => self.take(4).map(|_| ()),
        }
    }
}

/// Protobuf message writer.
#[derive(Debug, Default, Clone)]
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish, returning the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Write a raw varint.
    pub fn write_varint(
        &mut self,
        mut value: u64,
    ) {
        while value >= 0x80 {
            self.buf.push((value as u8) | 0x80);
            value >>= 7;
        }
        self.buf.push(value as u8);
    }

    fn write_key(
        &mut self,
        field: u32,
        wire_type: WireType,
    ) {
        self.write_varint((u64::from(field) << 3) | wire_type.tag_bits());
    }

    /// Write an `int32` field.
    pub fn write_int32(
        &mut self,
        field: u32,
        value: i32,
    ) {
        self.write_key(field, WireType::Varint);
        self.write_varint(i64::from(value) as u64);
    }

    /// Write a `bool` field.
    pub fn write_bool(
        &mut self,
        field: u32,
        value: bool,
    ) {
        self.write_key(field, WireType::Varint);
        self.write_varint(u64::from(value));
    }

    /// Write a `float` field.
    pub fn write_float(
        &mut self,
        field: u32,
        value: f32,
    ) {
        self.write_key(field, WireType::Fixed32);
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Write a `bytes` (or `string`) field.
    pub fn write_bytes(
        &mut self,
        field: u32,
        value: &[u8],
    ) {
        self.write_key(field, WireType::LengthDelimited);
        self.write_varint(value.len() as u64);
        self.buf.extend_from_slice(value);
    }

    /// Write an embedded message field.
    pub fn write_message<F>(
        &mut self,
        field: u32,
        build: F,
    ) where
        F: FnOnce(&mut WireWriter),
    {
        let mut inner = WireWriter::new();
        build(&mut inner);
        self.write_bytes(field, &inner.buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{alloc::vec, errors::ErrorKind};

    #[test]
    fn test_varint_roundtrip() {
        for value in [0_u64, 1, 127, 128, 300, u32::MAX as u64, u64::MAX] {
            let mut writer = WireWriter::new();
            writer.write_varint(value);
            let bytes = writer.into_bytes();

            let mut reader = WireReader::new(&bytes);
            assert_eq!(reader.read_varint().unwrap(), value);
            assert!(reader.is_empty());
        }
    }

    #[test]
    fn test_negative_int32() {
        let mut writer = WireWriter::new();
        writer.write_int32(43, -1);
        let bytes = writer.into_bytes();
        // 2-byte key + 10-byte sign-extended varint.
        assert_eq!(bytes.len(), 12);

        let mut reader = WireReader::new(&bytes);
        let key = reader.read_key().unwrap();
        assert_eq!(key.field, 43);
        assert_eq!(key.wire_type, WireType::Varint);
        assert_eq!(reader.read_int32().unwrap(), -1);
    }

    #[test]
    fn test_truncated_varint() {
        let mut reader = WireReader::new(&[0x80, 0x80]);
        assert_eq!(
            reader.read_varint().unwrap_err().kind(),
            ErrorKind::MalformedModel
        );
    }

    #[test]
    fn test_overlong_varint() {
        let bytes = vec![0xff; 11];
        let mut reader = WireReader::new(&bytes);
        assert!(reader.read_varint().is_err());

        let mut bytes = vec![0xff; 9];
        bytes.push(0x02);
        let mut reader = WireReader::new(&bytes);
        assert!(reader.read_varint().is_err());
    }

    #[test]
    fn test_length_exceeds_buffer() {
        // Field 1, length-delimited, claims 0xFFFFFFFF bytes.
        let mut writer = WireWriter::new();
        writer.write_varint((1 << 3) | 2);
        writer.write_varint(u32::MAX as u64);
        writer.buf.extend_from_slice(b"abc");
        let bytes = writer.into_bytes();

        let mut reader = WireReader::new(&bytes);
        let key = reader.read_key().unwrap();
        key.expect(WireType::LengthDelimited, "test").unwrap();
        let err = reader.read_bytes().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedModel);
    }

    #[test]
    fn test_group_and_zero_field_rejected() {
        // Field 1, start group.
        let mut reader = WireReader::new(&[(1 << 3) | 3]);
        assert!(reader.read_key().is_err());

        // Field 0.
        let mut reader = WireReader::new(&[0x02]);
        assert!(reader.read_key().is_err());
    }

    #[test]
    fn test_skip_and_fields() {
        let mut writer = WireWriter::new();
        writer.write_float(2, -1.5);
        writer.write_bytes(1, b"hello");
        writer.write_bool(3, true);
        writer.write_message(4, |w| w.write_int32(1, 7));
        let bytes = writer.into_bytes();

        let mut reader = WireReader::new(&bytes);
        let key = reader.read_key().unwrap();
        assert_eq!(key.wire_type, WireType::Fixed32);
        assert_eq!(reader.read_float().unwrap(), -1.5);

        let key = reader.read_key().unwrap();
        assert!(key.expect(WireType::Varint, "test").is_err());
        reader.skip(key.wire_type).unwrap();

        let key = reader.read_key().unwrap();
        assert_eq!(key.field, 3);
        assert!(reader.read_bool().unwrap());

        let key = reader.read_key().unwrap();
        assert_eq!(key.field, 4);
        let mut inner = WireReader::new(reader.read_bytes().unwrap());
        inner.read_key().unwrap();
        assert_eq!(inner.read_int32().unwrap(), 7);
        assert!(reader.is_empty());
    }
}
