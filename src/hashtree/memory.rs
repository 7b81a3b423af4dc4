use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::hash::Digest;
use crate::hashtree::{NodeStore, Position};

/// In-memory [`NodeStore`].
///
/// Nodes are kept in a sparse map rather than per-layer arrays since upper layers hold exponentially fewer
/// nodes than layer 0.
#[derive(Debug, Clone, Default)]
pub struct MemStore {
  nodes: HashMap<Position, Digest>,
  width: u64,
}

impl MemStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_capacity(leaves: usize) -> Self {
    MemStore { nodes: HashMap::with_capacity(2 * leaves), width: 0 }
  }

  /// Number of frozen nodes held, leaves included.
  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// All frozen nodes in `(layer, index)` order.
  pub fn nodes(&self) -> Vec<(Position, Digest)> {
    let mut nodes = self.nodes.iter().map(|(p, d)| (*p, *d)).collect::<Vec<_>>();
    nodes.sort_unstable_by_key(|(p, _)| *p);
    nodes
  }
}

impl NodeStore for MemStore {
  fn width(&self) -> u64 {
    self.width
  }

  fn get(&self, layer: u8, index: u64) -> Result<Option<Digest>> {
    Ok(self.nodes.get(&Position::new(layer, index)).copied())
  }

  fn commit(&mut self, nodes: &[(Position, Digest)]) -> Result<u64> {
    match nodes.first() {
      Some((position, _)) if *position == Position::leaf(self.width) => (),
      _ => return Err(Error::Corrupted(format!("commit must start with leaf {}", self.width))),
    }
    self.nodes.extend(nodes.iter().copied());
    self.width += 1;
    Ok(self.width)
  }
}
