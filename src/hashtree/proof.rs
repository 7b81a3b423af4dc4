use tracing::debug;

use crate::error::Result;
use crate::hashtree::{NodeStore, Position, root_layer, value};
use crate::path::Path;

/// Walks from the root down to leaf `i`, taking the sibling of every child the walk enters. A node whose right
/// child lies entirely beyond `at` has no sibling to contribute; the walk passes through it unchanged.
pub(crate) fn inclusion<S: NodeStore + ?Sized>(store: &S, at: u64, i: u64) -> Result<Option<Path>> {
  if i > at || at >= store.width() {
    debug!("inclusion proof out of range: at={at}, i={i}, width={}", store.width());
    return Ok(None);
  }

  let top = root_layer(at);
  let mut path = Path::with_capacity(top as usize);
  for layer in (1..=top).rev() {
    let (left, right) = Position::new(layer, i.checked_shr(layer as u32).unwrap_or(0)).children();
    if right.first_leaf() > at {
      continue;
    }
    let sibling = if i < right.first_leaf() { right } else { left };
    path.push(value(store, sibling, at)?.digest());
  }

  // collected root-first; verifiers fold leaf-first
  path.reverse();
  Ok(Some(path))
}

pub(crate) fn consistency<S: NodeStore + ?Sized>(store: &S, at: u64, m: u64) -> Result<Option<Path>> {
  if m > at || at >= store.width() {
    debug!("consistency proof out of range: at={at}, m={m}, width={}", store.width());
    return Ok(None);
  }

  let mut path = Path::new();
  subproof(store, Position::new(root_layer(at), 0), at, m, true, &mut path)?;
  Ok(Some(path))
}

/// Consistency subproof for the part of the tree under `position`. The old tree ends at leaf `m`, the new one
/// at leaf `at`. `complete` stays true as long as the old tree is a complete subtree on the left edge, in which
/// case its hash is the old root and is left out of the proof.
fn subproof<S: NodeStore + ?Sized>(
  store: &S,
  position: Position,
  at: u64,
  m: u64,
  complete: bool,
  path: &mut Path,
) -> Result<()> {
  let last = position.last_leaf().min(at);
  if m == last {
    if !complete {
      path.push(value(store, position, at)?.digest());
    }
    return Ok(());
  }

  let (left, right) = position.children();
  if right.first_leaf() > at {
    // nothing appended under the right child yet: this node is its left child
    return subproof(store, left, at, m, complete, path);
  }
  if m < right.first_leaf() {
    subproof(store, left, at, m, complete, path)?;
    path.push(value(store, right, at)?.digest());
  } else {
    subproof(store, right, at, m, false, path)?;
    path.push(value(store, left, at)?.digest());
  }
  Ok(())
}
