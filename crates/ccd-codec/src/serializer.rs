//! Byte-buffer writer and the `Serial` trait for fixed-width values

use bytes::{BufMut, Bytes, BytesMut};
use ccd_primitives::{
    AccountAddress, Amount, ContractAddress, CredentialRegistrationId, Energy, Hash256, Nonce,
    Timestamp, TransactionExpiry,
};

use crate::CodecError;

/// Values with a fixed, infallible wire encoding
pub trait Serial {
    /// Append the encoding of `self` to `out`
    fn serial(&self, out: &mut Serializer);
}

/// Append-only big-endian writer
#[derive(Debug, Default)]
pub struct Serializer {
    buf: BytesMut,
}

impl Serializer {
    /// Create an empty serializer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a capacity hint
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Write one byte
    pub fn put_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    /// Write a big-endian u16
    pub fn put_u16(&mut self, value: u16) {
        self.buf.put_u16(value);
    }

    /// Write a big-endian u32
    pub fn put_u32(&mut self, value: u32) {
        self.buf.put_u32(value);
    }

    /// Write a big-endian u64
    pub fn put_u64(&mut self, value: u64) {
        self.buf.put_u64(value);
    }

    /// Write a boolean as one byte
    pub fn put_bool(&mut self, value: bool) {
        self.buf.put_u8(u8::from(value));
    }

    /// Write raw bytes with no prefix
    pub fn put_slice(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    /// Write any [`Serial`] value
    pub fn put<T: Serial + ?Sized>(&mut self, value: &T) {
        value.serial(self);
    }

    /// Write a count that must fit in one byte
    pub fn put_count_u8(&mut self, what: &'static str, count: usize) -> Result<(), CodecError> {
        let count = u8::try_from(count).map_err(|_| CodecError::Range {
            what,
            value: count as i128,
            width: 1,
        })?;
        self.put_u8(count);
        Ok(())
    }

    /// Write a count that must fit in two bytes
    pub fn put_count_u16(&mut self, what: &'static str, count: usize) -> Result<(), CodecError> {
        let count = u16::try_from(count).map_err(|_| CodecError::Range {
            what,
            value: count as i128,
            width: 2,
        })?;
        self.put_u16(count);
        Ok(())
    }

    /// Write bytes with a one-byte length prefix
    pub fn put_bytes_u8(&mut self, what: &'static str, bytes: &[u8]) -> Result<(), CodecError> {
        check_len(what, bytes.len(), u8::MAX as usize)?;
        self.put_u8(bytes.len() as u8);
        self.put_slice(bytes);
        Ok(())
    }

    /// Write bytes with a two-byte length prefix
    pub fn put_bytes_u16(&mut self, what: &'static str, bytes: &[u8]) -> Result<(), CodecError> {
        check_len(what, bytes.len(), u16::MAX as usize)?;
        self.put_u16(bytes.len() as u16);
        self.put_slice(bytes);
        Ok(())
    }

    /// Write bytes with a four-byte length prefix
    pub fn put_bytes_u32(&mut self, what: &'static str, bytes: &[u8]) -> Result<(), CodecError> {
        check_len(what, bytes.len(), u32::MAX as usize)?;
        self.put_u32(bytes.len() as u32);
        self.put_slice(bytes);
        Ok(())
    }

    /// Finish and return the written bytes
    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}

/// Check `len` against a field limit
pub(crate) fn check_len(what: &'static str, len: usize, max: usize) -> Result<(), CodecError> {
    if len > max {
        return Err(CodecError::TooLong { what, len, max });
    }
    Ok(())
}

impl Serial for AccountAddress {
    fn serial(&self, out: &mut Serializer) {
        out.put_slice(self.as_bytes());
    }
}

impl Serial for CredentialRegistrationId {
    fn serial(&self, out: &mut Serializer) {
        out.put_slice(self.as_bytes());
    }
}

impl Serial for Hash256 {
    fn serial(&self, out: &mut Serializer) {
        out.put_slice(self.as_bytes());
    }
}

impl Serial for Amount {
    fn serial(&self, out: &mut Serializer) {
        out.put_u64(self.micro_ccd());
    }
}

impl Serial for Energy {
    fn serial(&self, out: &mut Serializer) {
        out.put_u64(self.get());
    }
}

impl Serial for Nonce {
    fn serial(&self, out: &mut Serializer) {
        out.put_u64(self.get());
    }
}

impl Serial for TransactionExpiry {
    fn serial(&self, out: &mut Serializer) {
        out.put_u64(self.seconds());
    }
}

impl Serial for Timestamp {
    fn serial(&self, out: &mut Serializer) {
        out.put_u64(self.millis());
    }
}

impl Serial for ContractAddress {
    fn serial(&self, out: &mut Serializer) {
        out.put_u64(self.index);
        out.put_u64(self.subindex);
    }
}
