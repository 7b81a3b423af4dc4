//! Incremental, store-backed Merkle tree.
//!
//! Nodes are addressed by `(layer, index)`: layer 0 holds the leaf digests and a node on layer `k` covers the
//! leaves `index * 2^k ..= (index + 1) * 2^k - 1`. A node is *frozen* once every leaf it covers has been
//! appended; its digest can then never change and is persisted by the [`NodeStore`]. All other nodes are
//! *ephemeral*: their digest is recomputed from frozen descendants whenever a root or a proof needs it.
//!
//! The root of a tree of `n` leaves is always equal to [`crate::oracle::mth`] over those leaves, and the proofs
//! returned by [`MerkleTree::inclusion_proof`] and [`MerkleTree::consistency_proof`] are always equal to
//! [`crate::oracle::mpath`] and [`crate::oracle::mproof`].

use tracing::trace;

use crate::error::{Error, Result};
use crate::hash::{Digest, empty_hash, leaf_hash, node_hash, to_hex};
use crate::path::Path;

pub mod memory;
mod proof;
#[cfg(feature = "rocksdb")]
pub mod rocksdb;

/// Address of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
  pub layer: u8,
  pub index: u64,
}

impl Position {
  pub fn new(layer: u8, index: u64) -> Self {
    Position { layer, index }
  }

  pub fn leaf(index: u64) -> Self {
    Position { layer: 0, index }
  }

  /// Index of the leftmost leaf this node covers, saturated at `u64::MAX` for positions beyond any tree.
  pub fn first_leaf(&self) -> u64 {
    saturate(scale(self.index as u128, self.layer))
  }

  /// Index of the rightmost leaf this node covers once complete, saturated like [`Position::first_leaf`].
  pub fn last_leaf(&self) -> u64 {
    saturate(scale(self.index as u128 + 1, self.layer).map(|end| end - 1))
  }

  pub fn is_frozen(&self, at: u64) -> bool {
    is_frozen(self.layer, self.index, at)
  }

  pub fn parent(&self) -> Position {
    Position { layer: self.layer + 1, index: self.index >> 1 }
  }

  pub fn sibling(&self) -> Position {
    Position { layer: self.layer, index: self.index ^ 1 }
  }

  pub fn children(&self) -> (Position, Position) {
    debug_assert!(self.layer > 0);
    let layer = self.layer - 1;
    (Position { layer, index: self.index << 1 }, Position { layer, index: (self.index << 1) | 1 })
  }
}

/// A node digest tagged with whether it is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
  /// Read from the store; will never change.
  Frozen(Digest),
  /// Recomputed on demand; changes as further leaves are appended under it.
  Ephemeral(Digest),
}

impl Node {
  pub fn digest(&self) -> Digest {
    match self {
      Node::Frozen(digest) | Node::Ephemeral(digest) => *digest,
    }
  }

  pub fn is_frozen(&self) -> bool {
    matches!(self, Node::Frozen(_))
  }
}

/// Largest layer a node of a `u64`-indexed tree can sit on.
pub const MAX_LAYER: u8 = u64::BITS as u8;

/// `value * 2^layer`, or `None` if that doesn't fit in a `u128`.
#[inline]
fn scale(value: u128, layer: u8) -> Option<u128> {
  1u128.checked_shl(layer as u32).and_then(|unit| value.checked_mul(unit))
}

#[inline]
fn saturate(value: Option<u128>) -> u64 {
  value.and_then(|v| u64::try_from(v).ok()).unwrap_or(u64::MAX)
}

/// Whether the node `(layer, index)` is frozen in the tree whose most recently appended leaf has index `at`,
/// i.e. `(index + 1) * 2^layer <= at + 1`.
#[inline]
pub fn is_frozen(layer: u8, index: u64, at: u64) -> bool {
  // widened so that the rightmost nodes near u64::MAX don't overflow
  scale(index as u128 + 1, layer).is_some_and(|end| end <= at as u128 + 1)
}

/// Height of the tree over `width` leaves: `ceil(log2(width))`, or -1 for an empty tree.
#[inline]
pub fn depth(width: u64) -> i32 {
  if width == 0 { -1 } else { (u64::BITS - (width - 1).leading_zeros()) as i32 }
}

/// Layer of the root node of the tree whose last leaf index is `at`.
#[inline]
fn root_layer(at: u64) -> u8 {
  (u64::BITS - at.leading_zeros()) as u8
}

/// Persistent storage of frozen node digests.
///
/// A store only ever holds frozen nodes; it is written exclusively through [`MerkleTree::append`] and
/// [`MerkleTree::append_hash`] and is otherwise read-only. Implementations are single-writer: readers may run
/// concurrently with each other but not with a commit.
pub trait NodeStore {
  /// Number of leaves appended so far.
  fn width(&self) -> u64;

  /// Digest of the frozen node at `(layer, index)`, or `None` if no such node has been stored.
  fn get(&self, layer: u8, index: u64) -> Result<Option<Digest>>;

  /// Persists the nodes frozen by a single append and returns the new width.
  ///
  /// `nodes[0]` is the new leaf at `(0, width)`; the remaining entries are its newly completed ancestors in
  /// ascending layer order. The leaf and the width increment must become visible together.
  fn commit(&mut self, nodes: &[(Position, Digest)]) -> Result<u64>;
}

/// Tree operations available on every [`NodeStore`].
pub trait MerkleTree: NodeStore {
  /// Appends a leaf with the given content and returns the new width.
  fn append(&mut self, data: &[u8]) -> Result<u64> {
    self.append_hash(leaf_hash(data))
  }

  /// Appends an already hashed leaf and returns the new width.
  fn append_hash(&mut self, digest: Digest) -> Result<u64> {
    let mut position = Position::leaf(self.width());
    let mut nodes = vec![(position, digest)];

    // a right child completes its parent
    let mut hash = digest;
    while position.index & 1 == 1 {
      let left = frozen(self, position.sibling())?;
      hash = node_hash(&left, &hash);
      position = position.parent();
      nodes.push((position, hash));
    }

    let width = self.commit(&nodes)?;
    trace!("append: width={width}, leaf={}, frozen={}", to_hex(&digest), nodes.len());
    Ok(width)
  }

  /// Height of the current tree, -1 when empty.
  fn depth(&self) -> i32 {
    depth(self.width())
  }

  /// Current root; [`empty_hash`] when no leaf has been appended.
  fn root(&self) -> Result<Digest> {
    match self.width() {
      0 => Ok(empty_hash()),
      width => Ok(value(self, Position::new(root_layer(width - 1), 0), width - 1)?.digest()),
    }
  }

  /// Root of the historical tree whose last leaf index is `at`, or `None` if that tree doesn't exist yet.
  fn root_at(&self, at: u64) -> Result<Option<Digest>> {
    if at >= self.width() {
      return Ok(None);
    }
    Ok(Some(value(self, Position::new(root_layer(at), 0), at)?.digest()))
  }

  /// Value of the node at `position` in the tree whose last leaf index is `at`.
  ///
  /// A node that is not frozen yet covers only part of its leaf range. Its value is that of the tree over the
  /// leaves it does cover, which is why an ephemeral node whose right child is entirely in the future takes the
  /// value of its left child unchanged.
  ///
  /// `None` when `at` is not a leaf yet or the node covers no leaf up to `at`.
  fn node(&self, position: Position, at: u64) -> Result<Option<Node>> {
    if at >= self.width() || position.layer > MAX_LAYER || position.first_leaf() > at {
      return Ok(None);
    }
    value(self, position, at).map(Some)
  }

  /// Audit path of leaf `i` in the tree whose last leaf index is `at`.
  ///
  /// Equal to `mpath(i, leaves[..=at])`; `None` when `i > at` or `at` is not a leaf yet.
  fn inclusion_proof(&self, at: u64, i: u64) -> Result<Option<Path>> {
    proof::inclusion(self, at, i)
  }

  /// Consistency proof from the tree whose last leaf index is `m` to the one whose last leaf index is `at`.
  ///
  /// Equal to `mproof(m + 1, leaves[..=at])`; `None` when `m > at` or `at` is not a leaf yet.
  fn consistency_proof(&self, at: u64, m: u64) -> Result<Option<Path>> {
    proof::consistency(self, at, m)
  }
}

impl<S: NodeStore + ?Sized> MerkleTree for S {}

/// Value of a node known to cover at least leaf `position.first_leaf() <= at` of an existing tree.
pub(crate) fn value<S: NodeStore + ?Sized>(store: &S, position: Position, at: u64) -> Result<Node> {
  if position.is_frozen(at) {
    return Ok(Node::Frozen(frozen(store, position)?));
  }
  if position.layer == 0 {
    return Err(Error::Corrupted(format!("leaf {} is not frozen at {at}", position.index)));
  }
  let (left, right) = position.children();
  let left = value(store, left, at)?.digest();
  if right.first_leaf() > at {
    return Ok(Node::Ephemeral(left));
  }
  let right = value(store, right, at)?.digest();
  Ok(Node::Ephemeral(node_hash(&left, &right)))
}

/// Reads a node the frozen rule says must be stored.
pub(crate) fn frozen<S: NodeStore + ?Sized>(store: &S, position: Position) -> Result<Digest> {
  store.get(position.layer, position.index)?.ok_or(Error::NodeNotFound { layer: position.layer, index: position.index })
}
