//! RFC 6962 hash primitives.
//!
//! Leaves and internal nodes are hashed with distinct one-byte prefixes so that an internal node digest can
//! never be presented as the digest of a leaf.

use sha2::{Digest as _, Sha256};

/// Size of a digest in bytes (SHA-256).
pub const HASH_SIZE: usize = 32;

/// Prefix of a leaf hash input.
pub const LEAF_PREFIX: u8 = 0x00;

/// Prefix of an internal node hash input.
pub const NODE_PREFIX: u8 = 0x01;

/// A fixed-length digest. Equality is byte-wise.
pub type Digest = [u8; HASH_SIZE];

/// `SHA256(0x00 || data)`
pub fn leaf_hash(data: &[u8]) -> Digest {
  let mut hasher = Sha256::new();
  hasher.update([LEAF_PREFIX]);
  hasher.update(data);
  hasher.finalize().into()
}

/// `SHA256(0x01 || left || right)`
pub fn node_hash(left: &Digest, right: &Digest) -> Digest {
  let mut hasher = Sha256::new();
  hasher.update([NODE_PREFIX]);
  hasher.update(left);
  hasher.update(right);
  hasher.finalize().into()
}

/// Root of a tree with no leaves: `SHA256("")`.
pub fn empty_hash() -> Digest {
  Sha256::digest(b"").into()
}

pub fn to_hex(digest: &Digest) -> String {
  hex::encode(digest)
}
