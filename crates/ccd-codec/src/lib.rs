//! # ccd-codec
//!
//! Binary encoding primitives for CCD transactions.
//!
//! Every multi-byte integer the node reads is big-endian and fixed width.
//! Variable-length data carries an explicit length prefix whose width is
//! part of the field's contract.
//!
//! ## Encoding Rules
//!
//! - `u8`/`u16`/`u32`/`u64`: big-endian, exactly 1/2/4/8 bytes
//! - `bool`: one byte, `0` or `1`
//! - Addresses, hashes, keys: raw bytes, no prefix (width implied by type)
//! - Byte strings: length prefix of the field's declared width, then the bytes

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod serializer;

pub use error::CodecError;
pub use serializer::{Serial, Serializer};

use ccd_primitives::{AccountAddress, AddressError};

/// Encode an unsigned integer big-endian in exactly `width` bytes.
///
/// `width` must be 1, 2, 4 or 8. Negative values and values that do not fit
/// the width are rejected.
pub fn encode_uint(value: i128, width: usize) -> Result<Vec<u8>, CodecError> {
    let bits = match width {
        1 | 2 | 4 | 8 => width * 8,
        _ => return Err(CodecError::UnsupportedWidth(width)),
    };
    let max = (1i128 << bits) - 1;
    if value < 0 || value > max {
        return Err(CodecError::Range {
            what: "integer",
            value,
            width,
        });
    }
    let bytes = (value as u64).to_be_bytes();
    Ok(bytes[8 - width..].to_vec())
}

/// The 32 raw bytes of an account address
pub fn encode_address(address: &AccountAddress) -> [u8; 32] {
    *address.as_bytes()
}

/// Base58-check text form of an account address
pub fn encode_base58_check(address: &AccountAddress) -> String {
    address.to_base58()
}

/// Parse the base58-check text form of an account address
pub fn decode_base58_check(s: &str) -> Result<AccountAddress, AddressError> {
    AccountAddress::from_base58(s)
}
