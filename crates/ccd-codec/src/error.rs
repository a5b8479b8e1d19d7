//! Codec errors

use thiserror::Error;

/// Encoding error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Numeric value does not fit its declared width
    #[error("{what} out of range: {value} does not fit in {width} bytes")]
    Range {
        /// Field being encoded
        what: &'static str,
        /// Offending value
        value: i128,
        /// Declared width in bytes
        width: usize,
    },

    /// Width is not one the codec supports
    #[error("unsupported integer width: {0} bytes")]
    UnsupportedWidth(usize),

    /// Byte string longer than its length prefix or field limit allows
    #[error("{what} too long: {len} bytes, maximum is {max}")]
    TooLong {
        /// Field being encoded
        what: &'static str,
        /// Actual length
        len: usize,
        /// Maximum permitted length
        max: usize,
    },
}
