//! Audit paths and consistency proofs, and their verification.
//!
//! A [`Path`] is an ordered list of digests. The order is the order in which the verifier folds them into the
//! running hash, from the leaf (or the old root) upwards, so two paths holding the same digests in a different
//! order are different proofs.

use std::ops::Deref;

use crate::error::{Error, Result};
use crate::hash::{Digest, HASH_SIZE, node_hash};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path(Vec<Digest>);

impl Path {
  pub fn new() -> Self {
    Path(Vec::new())
  }

  pub(crate) fn with_capacity(capacity: usize) -> Self {
    Path(Vec::with_capacity(capacity))
  }

  pub(crate) fn push(&mut self, digest: Digest) {
    self.0.push(digest);
  }

  pub(crate) fn reverse(&mut self) {
    self.0.reverse();
  }

  pub fn into_inner(self) -> Vec<Digest> {
    self.0
  }

  /// Raw 32-byte buffers in path order, suitable for a wire message.
  pub fn to_slice(&self) -> Vec<Vec<u8>> {
    self.0.iter().map(|d| d.to_vec()).collect()
  }

  /// Inverse of [`Path::to_slice`]. Every buffer must be exactly [`HASH_SIZE`] bytes.
  pub fn from_slice<B: AsRef<[u8]>>(slice: &[B]) -> Result<Self> {
    let mut path = Path::with_capacity(slice.len());
    for buffer in slice {
      let buffer = buffer.as_ref();
      let digest: Digest = buffer
        .try_into()
        .map_err(|_| Error::InvalidDigestLength { expected: HASH_SIZE, actual: buffer.len() })?;
      path.push(digest);
    }
    Ok(path)
  }

  /// Verifies that `leaf` is the `i`-th leaf of the tree whose last leaf index is `at` and whose root is
  /// `root`, using this path as the audit path.
  ///
  /// Never fails loudly: any index out of range, wrong path length or digest mismatch yields `false`.
  pub fn verify_inclusion(&self, at: u64, i: u64, root: &Digest, leaf: &Digest) -> bool {
    if i > at {
      return false;
    }
    let (mut fi, mut si) = (i, at);
    let mut r = *leaf;
    for p in self.0.iter() {
      if si == 0 {
        return false;
      }
      if fi & 1 == 1 || fi == si {
        r = node_hash(p, &r);
        // skip the levels where this subtree is the promoted right edge
        while fi & 1 == 0 && fi != 0 {
          fi >>= 1;
          si >>= 1;
        }
      } else {
        r = node_hash(&r, p);
      }
      fi >>= 1;
      si >>= 1;
    }
    si == 0 && &r == root
  }

  /// Verifies that the tree with last leaf index `i` and root `root_i` is a prefix of the tree with last leaf
  /// index `at` and root `root_at`, using this path as the consistency proof.
  ///
  /// When `i == at` the path is ignored and the roots must simply be equal.
  pub fn verify_consistency(&self, at: u64, i: u64, root_at: &Digest, root_i: &Digest) -> bool {
    if i > at {
      return false;
    }
    if i == at {
      return root_at == root_i;
    }

    // the old root itself is the first node when the old tree is a complete subtree
    let mut proof = self.0.iter();
    let seed = if (i + 1).is_power_of_two() {
      *root_i
    } else {
      match proof.next() {
        Some(first) => *first,
        None => return false,
      }
    };

    let (mut fi, mut si) = (i, at);
    while fi & 1 == 1 {
      fi >>= 1;
      si >>= 1;
    }

    let (mut fr, mut sr) = (seed, seed);
    for c in proof {
      if si == 0 {
        return false;
      }
      if fi & 1 == 1 || fi == si {
        fr = node_hash(c, &fr);
        sr = node_hash(c, &sr);
        while fi & 1 == 0 && fi != 0 {
          fi >>= 1;
          si >>= 1;
        }
      } else {
        sr = node_hash(&sr, c);
      }
      fi >>= 1;
      si >>= 1;
    }
    si == 0 && &fr == root_i && &sr == root_at
  }
}

impl Deref for Path {
  type Target = [Digest];

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl From<Vec<Digest>> for Path {
  fn from(digests: Vec<Digest>) -> Self {
    Path(digests)
  }
}

impl From<Path> for Vec<Digest> {
  fn from(path: Path) -> Self {
    path.0
  }
}

impl<'a> IntoIterator for &'a Path {
  type Item = &'a Digest;
  type IntoIter = std::slice::Iter<'a, Digest>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.iter()
  }
}
