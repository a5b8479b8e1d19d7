//! Block item envelope
//!
//! The node accepts block items as `version || kind || body`. The
//! transaction hash it reports is the SHA-256 of `kind || body`.

use bytes::Bytes;
use ccd_codec::Serializer;
use ccd_crypto::sha256_concat;
use ccd_primitives::TransactionHash;

/// Block item format version
pub const BLOCK_ITEM_VERSION: u8 = 0;

/// Kind of block item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BlockItemKind {
    /// Account transaction
    AccountTransaction = 0,
    /// Credential deployment creating a new account
    CredentialDeployment = 1,
}

/// Wrap a block item body with the version and kind bytes
pub fn versioned_block_item(kind: BlockItemKind, body: &[u8]) -> Bytes {
    let mut out = Serializer::with_capacity(2 + body.len());
    out.put_u8(BLOCK_ITEM_VERSION);
    out.put_u8(kind as u8);
    out.put_slice(body);
    out.finish()
}

/// Hash of a block item body
pub fn block_item_hash(kind: BlockItemKind, body: &[u8]) -> TransactionHash {
    sha256_concat(&[&[kind as u8], body])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccd_crypto::sha256;

    #[test]
    fn test_versioned_envelope() {
        let item = versioned_block_item(BlockItemKind::AccountTransaction, &[0xaa, 0xbb]);
        assert_eq!(item.as_ref(), &[0, 0, 0xaa, 0xbb]);
        let item = versioned_block_item(BlockItemKind::CredentialDeployment, &[]);
        assert_eq!(item.as_ref(), &[0, 1]);
    }

    #[test]
    fn test_hash_excludes_version() {
        let hash = block_item_hash(BlockItemKind::AccountTransaction, b"body");
        assert_eq!(hash, sha256(b"\x00body"));
        assert_ne!(hash, block_item_hash(BlockItemKind::CredentialDeployment, b"body"));
    }
}
