//! Durable [`NodeStore`] on RocksDB.
//!
//! Every frozen node is one key-value pair: the key is the layer byte followed by the big-endian index, so that a
//! scan walks the tree layer by layer in leaf order, and the value is the raw 32-byte digest. The width lives under
//! a reserved key whose first byte can't be a layer.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use ::rocksdb::{DB, DBCompressionType, Options, WriteBatch};
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::hash::{Digest, HASH_SIZE};
use crate::hashtree::{NodeStore, Position};

const WIDTH_KEY: &[u8] = b"\xffwidth";
const KEY_SIZE: usize = 1 + 8;

#[derive(Debug, Clone)]
pub struct RocksStoreConfig {
  /// Create the database if the directory doesn't hold one yet.
  pub create_if_missing: bool,
  /// Let RocksDB compress its blocks. Digests are incompressible, so this is off by default.
  pub compression: bool,
  /// Frozen nodes on this layer and above are kept in memory once read or written.
  pub cache_layer: u8,
  /// Most nodes kept in memory. A full cache makes room for a node by dropping one from a lower layer.
  pub cache_limit: usize,
}

impl Default for RocksStoreConfig {
  fn default() -> Self {
    RocksStoreConfig { create_if_missing: true, compression: false, cache_layer: 4, cache_limit: 64 * 1024 }
  }
}

pub struct RocksStore {
  db: DB,
  path: PathBuf,
  width: u64,
  cache_layer: u8,
  cache_limit: usize,
  // ordered by layer, so the first entry is always the cheapest one to lose
  cache: RwLock<BTreeMap<Position, Digest>>,
}

impl RocksStore {
  pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
    Self::open_with(path, &RocksStoreConfig::default())
  }

  pub fn open_with<P: AsRef<Path>>(path: P, config: &RocksStoreConfig) -> Result<Self> {
    let path = path.as_ref();
    let mut opts = Options::default();
    opts.create_if_missing(config.create_if_missing);
    if !config.compression {
      opts.set_compression_type(DBCompressionType::None);
      opts.set_compression_per_level(&[DBCompressionType::None; 7]);
    }
    let db = DB::open(&opts, path)?;

    let width = match db.get(WIDTH_KEY)? {
      None => 0,
      Some(bytes) if bytes.len() == 8 => LittleEndian::read_u64(&bytes),
      Some(bytes) => return Err(Error::Corrupted(format!("width record has {} bytes", bytes.len()))),
    };
    info!("node store opened: {}, width={width}", path.display());

    let cache = RwLock::new(BTreeMap::new());
    let (cache_layer, cache_limit) = (config.cache_layer, config.cache_limit);
    Ok(RocksStore { db, path: path.to_path_buf(), width, cache_layer, cache_limit, cache })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Forces the memtables to disk.
  pub fn flush(&self) -> Result<()> {
    self.db.flush()?;
    debug!("node store flushed: {}, width={}", self.path.display(), self.width);
    Ok(())
  }

  /// Number of frozen nodes currently held in memory.
  pub fn cached(&self) -> usize {
    self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
  }

  fn remember(&self, position: Position, digest: Digest) {
    if position.layer < self.cache_layer || self.cache_limit == 0 {
      return;
    }
    let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
    if cache.len() >= self.cache_limit && !cache.contains_key(&position) {
      match cache.first_key_value() {
        Some((lowest, _)) if lowest.layer < position.layer => {
          cache.pop_first();
        }
        _ => return,
      }
    }
    cache.insert(position, digest);
  }
}

impl NodeStore for RocksStore {
  fn width(&self) -> u64 {
    self.width
  }

  fn get(&self, layer: u8, index: u64) -> Result<Option<Digest>> {
    let position = Position::new(layer, index);
    if layer >= self.cache_layer
      && let Some(digest) = self.cache.read().unwrap_or_else(PoisonError::into_inner).get(&position)
    {
      return Ok(Some(*digest));
    }

    match self.db.get(node_key(position))? {
      None => Ok(None),
      Some(bytes) => {
        let digest: Digest = bytes
          .as_slice()
          .try_into()
          .map_err(|_| Error::InvalidDigestLength { expected: HASH_SIZE, actual: bytes.len() })?;
        self.remember(position, digest);
        Ok(Some(digest))
      }
    }
  }

  fn commit(&mut self, nodes: &[(Position, Digest)]) -> Result<u64> {
    match nodes.first() {
      Some((position, _)) if *position == Position::leaf(self.width) => (),
      _ => return Err(Error::Corrupted(format!("commit must start with leaf {}", self.width))),
    }

    let width = self.width + 1;
    let mut value = [0u8; 8];
    LittleEndian::write_u64(&mut value, width);

    // the leaf, its frozen ancestors and the new width land atomically
    let mut batch = WriteBatch::default();
    for (position, digest) in nodes {
      batch.put(node_key(*position), digest);
    }
    batch.put(WIDTH_KEY, value);
    self.db.write(batch)?;

    for (position, digest) in nodes {
      self.remember(*position, *digest);
    }
    self.width = width;
    Ok(width)
  }
}

fn node_key(position: Position) -> [u8; KEY_SIZE] {
  let mut key = [0u8; KEY_SIZE];
  key[0] = position.layer;
  BigEndian::write_u64(&mut key[1..], position.index);
  key
}
