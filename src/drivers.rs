use std::fmt::Display;
use std::time::{Duration, Instant};

use merkle_log::{Digest, Error, MemStore, MerkleTree, NodeStore, Result, RocksStore, leaf_hash};
use tempfile::{Builder, TempDir};

use crate::{Case, Driver, data_size};

/// Deterministic, well-spread content of the leaf at `i`.
pub fn leaf(i: u64) -> [u8; 8] {
  // SplitMix64
  let mut z = i.wrapping_add(0x9e3779b97f4a7c15);
  z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
  z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
  (z ^ (z >> 31)).to_le_bytes()
}

#[derive(Debug, Clone, Copy)]
pub enum Backend {
  Memory,
  RocksDB,
}

impl Display for Backend {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(match self {
      Backend::Memory => "memory",
      Backend::RocksDB => "rocksdb",
    })
  }
}

/// A store under measurement. The store is declared first so that it is closed before its directory is removed.
pub struct Target {
  store: Box<dyn NodeStore>,
  _dir: Option<TempDir>,
}

impl Backend {
  fn open(&self, case: &Case) -> Result<Target> {
    match self {
      Backend::Memory => Ok(Target { store: Box::new(MemStore::new()), _dir: None }),
      Backend::RocksDB => {
        let dir = Builder::new().prefix(".tmp-rocksdb-").tempdir_in(&case.dir_work)?;
        let store = RocksStore::open(dir.path())?;
        Ok(Target { store: Box::new(store), _dir: Some(dir) })
      }
    }
  }
}

fn fill(store: &mut dyn NodeStore, n: u64) -> Result<()> {
  while store.width() < n {
    let i = store.width();
    store.append(&leaf(i))?;
  }
  Ok(())
}

pub struct AppendDriver {
  backend: Backend,
}

impl AppendDriver {
  pub fn new(backend: Backend) -> Self {
    AppendDriver { backend }
  }
}

impl Driver<Target, Duration> for AppendDriver {
  fn setup(&mut self, case: &Case) -> Result<Target> {
    self.backend.open(case)
  }

  #[inline(never)]
  fn run(&mut self, _case: &Case, target: &mut Target, n: u64) -> Result<Duration> {
    let start = Instant::now();
    fill(target.store.as_mut(), n)?;
    Ok(start.elapsed())
  }
}

/// A filled store and its root.
pub struct Tree {
  target: Target,
  root: Digest,
}

impl Tree {
  fn new(backend: Backend, case: &Case, n: u64) -> Result<Tree> {
    let mut target = backend.open(case)?;
    fill(target.store.as_mut(), n)?;
    let root = target.store.root()?;
    Ok(Tree { target, root })
  }

  fn at(&self) -> u64 {
    self.target.store.width() - 1
  }
}

/// Times `InclusionProof(n - 1, i)`; the proof is verified outside of the measurement.
pub struct InclusionDriver {
  backend: Backend,
  n: u64,
}

impl InclusionDriver {
  pub fn new(backend: Backend, n: u64) -> Self {
    InclusionDriver { backend, n }
  }
}

impl Driver<Tree, Duration> for InclusionDriver {
  fn setup(&mut self, case: &Case) -> Result<Tree> {
    Tree::new(self.backend, case, self.n)
  }

  #[inline(never)]
  fn run(&mut self, _case: &Case, tree: &mut Tree, i: u64) -> Result<Duration> {
    let at = tree.at();
    let start = Instant::now();
    let path = tree.target.store.inclusion_proof(at, i)?;
    let elapse = start.elapsed();

    match path {
      Some(path) if path.verify_inclusion(at, i, &tree.root, &leaf_hash(&leaf(i))) => Ok(elapse),
      _ => Err(Error::Corrupted(format!("inclusion proof of {i} in {} doesn't verify", at + 1))),
    }
  }
}

/// Times `ConsistencyProof(n - 1, m)`; the proof is verified outside of the measurement.
pub struct ConsistencyDriver {
  backend: Backend,
  n: u64,
}

impl ConsistencyDriver {
  pub fn new(backend: Backend, n: u64) -> Self {
    ConsistencyDriver { backend, n }
  }
}

impl Driver<Tree, Duration> for ConsistencyDriver {
  fn setup(&mut self, case: &Case) -> Result<Tree> {
    Tree::new(self.backend, case, self.n)
  }

  #[inline(never)]
  fn run(&mut self, _case: &Case, tree: &mut Tree, m: u64) -> Result<Duration> {
    let at = tree.at();
    let start = Instant::now();
    let path = tree.target.store.consistency_proof(at, m)?;
    let elapse = start.elapsed();

    let old = tree.target.store.root_at(m)?;
    match (path, old) {
      (Some(path), Some(old)) if path.verify_consistency(at, m, &tree.root, &old) => Ok(elapse),
      _ => Err(Error::Corrupted(format!("consistency proof from {} to {} doesn't verify", m + 1, at + 1))),
    }
  }
}

/// Grows a single RocksDB store and reports its size on disk.
#[derive(Default)]
pub struct VolumeDriver;

impl Driver<(RocksStore, TempDir), u64> for VolumeDriver {
  fn setup(&mut self, case: &Case) -> Result<(RocksStore, TempDir)> {
    let dir = Builder::new().prefix(".tmp-rocksdb-volume-").tempdir_in(&case.dir_work)?;
    let store = RocksStore::open(dir.path())?;
    Ok((store, dir))
  }

  fn run(&mut self, _case: &Case, (store, dir): &mut (RocksStore, TempDir), n: u64) -> Result<u64> {
    fill(store, n)?;
    store.flush()?;
    data_size(dir.path())
  }
}
