use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[cfg(feature = "rocksdb")]
  #[error("RocksDB error: {0}")]
  RocksDB(#[from] rocksdb::Error),

  /// A digest buffer did not have the fixed hash size.
  #[error("invalid digest length: expected {expected} bytes, got {actual}")]
  InvalidDigestLength { expected: usize, actual: usize },

  /// The store lost a node that the frozen rule says must exist.
  #[error("frozen node not found: layer={layer}, index={index}")]
  NodeNotFound { layer: u8, index: u64 },

  #[error("corrupted store: {0}")]
  Corrupted(String),
}
