//! Append-only Merkle tree over SHA-256 with the RFC 6962 leaf and node domain separation.
//!
//! [`MerkleTree`] is implemented for every [`NodeStore`]: the store persists only the digests of *frozen* nodes,
//! those whose leaf range is complete, and everything else is recomputed on demand. [`oracle`] holds the
//! recursive definitions the tree is checked against.
//!
//! ```
//! use merkle_log::{MemStore, MerkleTree};
//!
//! let mut tree = MemStore::new();
//! for value in ["a", "b", "c"] {
//!   tree.append(value.as_bytes()).unwrap();
//! }
//! let root = tree.root().unwrap();
//! let path = tree.inclusion_proof(2, 1).unwrap().unwrap();
//! assert!(path.verify_inclusion(2, 1, &root, &merkle_log::leaf_hash(b"b")));
//! ```

pub mod error;
pub mod hash;
pub mod hashtree;
pub mod oracle;
pub mod path;

#[cfg(test)]
mod testdata;

pub use error::{Error, Result};
pub use hash::{Digest, HASH_SIZE, empty_hash, leaf_hash, node_hash};
#[cfg(feature = "rocksdb")]
pub use hashtree::rocksdb::{RocksStore, RocksStoreConfig};
pub use hashtree::{MerkleTree, Node, NodeStore, Position, memory::MemStore};
pub use oracle::{mpath, mproof, mth};
pub use path::Path;
