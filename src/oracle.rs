//! Reference definitions of the tree hash, audit path and consistency proof, computed directly over a leaf
//! sequence.
//!
//! These follow RFC 6962 section 2.1 literally and are the ground truth the store-backed algorithms in
//! [`crate::hashtree`] must reproduce bit-for-bit. Every call rehashes the leaves it touches, so they are only
//! suitable for small trees and for testing.

use crate::hash::{Digest, empty_hash, leaf_hash, node_hash};
use crate::path::Path;

/// Largest power of two strictly less than `n` (`n > 1`).
#[inline]
pub(crate) fn split(n: u64) -> u64 {
  debug_assert!(n > 1);
  1 << (u64::BITS - 1 - (n - 1).leading_zeros())
}

/// Merkle Tree Hash `MTH(D)`.
pub fn mth<D: AsRef<[u8]>>(leaves: &[D]) -> Digest {
  match leaves.len() {
    0 => empty_hash(),
    1 => leaf_hash(leaves[0].as_ref()),
    n => {
      let k = split(n as u64) as usize;
      node_hash(&mth(&leaves[..k]), &mth(&leaves[k..]))
    }
  }
}

/// Merkle audit path `PATH(i, D)` for the `i`-th leaf. `None` if `i` is not a leaf of `D`.
pub fn mpath<D: AsRef<[u8]>>(i: u64, leaves: &[D]) -> Option<Path> {
  if i >= leaves.len() as u64 {
    return None;
  }
  let mut path = Path::new();
  audit_path(i, leaves, &mut path);
  Some(path)
}

fn audit_path<D: AsRef<[u8]>>(i: u64, leaves: &[D], path: &mut Path) {
  let n = leaves.len() as u64;
  if n == 1 {
    return;
  }
  let k = split(n);
  let (left, right) = leaves.split_at(k as usize);
  if i < k {
    audit_path(i, left, path);
    path.push(mth(right));
  } else {
    audit_path(i - k, right, path);
    path.push(mth(left));
  }
}

/// Merkle consistency proof `PROOF(m, D)` between the first `m` leaves and all of `D`.
///
/// `None` when `m == 0` or `m > |D|`; an empty proof when `m == |D|`.
pub fn mproof<D: AsRef<[u8]>>(m: u64, leaves: &[D]) -> Option<Path> {
  if m == 0 || m > leaves.len() as u64 {
    return None;
  }
  let mut path = Path::new();
  subproof(m, leaves, true, &mut path);
  Some(path)
}

/// `SUBPROOF(m, D, complete)`. `complete` is true while the old tree is still known to be a complete
/// subtree on the left edge of `D`; such a subtree's hash is the old root itself and is not emitted.
fn subproof<D: AsRef<[u8]>>(m: u64, leaves: &[D], complete: bool, path: &mut Path) {
  let n = leaves.len() as u64;
  if m == n {
    if !complete {
      path.push(mth(leaves));
    }
    return;
  }
  let k = split(n);
  let (left, right) = leaves.split_at(k as usize);
  if m <= k {
    subproof(m, left, complete, path);
    path.push(mth(right));
  } else {
    subproof(m - k, right, false, path);
    path.push(mth(left));
  }
}
