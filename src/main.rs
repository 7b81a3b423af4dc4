use std::cmp;
use std::fs::{self, create_dir_all};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::Local;
use clap::Parser;
use merkle_log::Result;
use rand::seq::SliceRandom;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::drivers::{AppendDriver, Backend, ConsistencyDriver, InclusionDriver, VolumeDriver};
use crate::stat::{Stat, Unit};

mod drivers;
mod stat;

const WORK_DIR_PREFIX: &str = "merkle_log_bench-";

#[derive(Parser)]
#[command(name = "merkle-log-bench")]
#[command(author, version, about = "Measure append and proof generation time of the Merkle tree stores")]
struct Args {
  /// Largest number of leaves to measure
  #[arg(default_value_t = 4096u64, value_parser = clap::value_parser!(u64).range(2..))]
  max_n: u64,

  /// Directory for working temporary files
  #[arg(short, long, default_value_os_t = std::env::temp_dir())]
  dir: PathBuf,

  /// Directory the CSV reports are written to
  #[arg(short, long, default_value = ".")]
  output: PathBuf,

  #[arg(short, long, default_value_t = Local::now().format("%Y%m%d%H%M%S").to_string())]
  session: String,

  /// Upper bound of repetitions for each measurement
  #[arg(short, long, default_value_t = 100usize)]
  trials: usize,

  /// Remove working directories left over by interrupted runs and exit
  #[arg(short, long, default_value_t = false)]
  clean: bool,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let args = Args::parse();
  let experiment = Experiment::new(&args)?;
  info!("working directory: {}", experiment.dir.display());

  if args.clean {
    experiment.clean()?;
    return Ok(());
  }

  for backend in [Backend::Memory, Backend::RocksDB] {
    experiment
      .case(&format!("append-{backend}"), &args)?
      .scale(Scale::Log)
      .division(10)
      .min_trials(2)
      .max_trials(cmp::min(10, args.trials))
      .measure_the_append_time_relative_to_the_amount_of_data(AppendDriver::new(backend))?;
  }

  for backend in [Backend::Memory, Backend::RocksDB] {
    experiment
      .case(&format!("inclusion-{backend}"), &args)?
      .min_n(0)
      .max_n(args.max_n - 1)
      .division(64)
      .stability_threshold(0.5)
      .max_duration(Duration::from_secs(5 * 60))
      .measure_the_proof_time_relative_to_the_leaf_position(InclusionDriver::new(backend, args.max_n))?;

    experiment
      .case(&format!("consistency-{backend}"), &args)?
      .min_n(0)
      .max_n(args.max_n - 1)
      .division(64)
      .stability_threshold(0.5)
      .max_duration(Duration::from_secs(5 * 60))
      .measure_the_proof_time_relative_to_the_leaf_position(ConsistencyDriver::new(backend, args.max_n))?;
  }

  experiment
    .case("volume-rocksdb", &args)?
    .min_n(0)
    .division(25)
    .measure_the_storage_size_relative_to_the_amount_of_data(VolumeDriver::default())?;

  Ok(())
}

pub enum Scale {
  Linear,
  Log,
}

struct Experiment {
  session: String,
  dir: PathBuf,
  dir_report: PathBuf,

  stability_threshold: f64, // e.g. 0.10 (=10%)
  min_trials: usize,
  max_trials: usize,
  max_duration: Duration,
}

pub struct Case {
  pub id: String,
  pub name: String,
  pub dir_work: PathBuf,
  pub dir_report: PathBuf,
  pub min_n: u64,
  pub max_n: u64,
  scale: Scale,
  division: usize,
  stability_threshold: f64,
  min_trials: usize,
  max_trials: usize,
  max_duration: Duration,
}

impl Experiment {
  fn new(args: &Args) -> Result<Self> {
    let session = args.session.clone();
    let dir = args.dir.clone();
    let dir_report = args.output.clone();
    create_dir_all(&dir)?;
    create_dir_all(&dir_report)?;

    let stability_threshold = 0.10;
    let min_trials = 5;
    let max_trials = cmp::max(min_trials, args.trials);
    let max_duration = Duration::from_secs(10 * 60);
    Ok(Self { session, dir, dir_report, stability_threshold, min_trials, max_trials, max_duration })
  }

  pub fn case(&self, id: &str, args: &Args) -> Result<Case> {
    let id = id.to_string();
    let name = format!("{}-{id}", self.session);
    let dir_work = self.dir.join(format!("{WORK_DIR_PREFIX}{name}"));
    let dir_report = self.dir_report.clone();
    Ok(Case {
      id,
      name,
      dir_work,
      dir_report,
      min_n: 1,
      max_n: args.max_n,
      scale: Scale::Linear,
      division: 100,
      stability_threshold: self.stability_threshold,
      min_trials: self.min_trials,
      max_trials: self.max_trials,
      max_duration: self.max_duration,
    })
  }

  fn clean(&self) -> Result<()> {
    let mut total = 0u64;
    let mut count = 0;
    for entry in fs::read_dir(&self.dir)? {
      let e = entry?;
      if e.file_type()?.is_dir() && e.file_name().to_string_lossy().starts_with(WORK_DIR_PREFIX) {
        let dir_path = e.path();
        let size = data_size(&dir_path)?;
        info!("removing: {} ({size} bytes)", dir_path.display());
        fs::remove_dir_all(&dir_path)?;
        total += size;
        count += 1;
      }
    }
    info!("{count} directories are removed, total {total} bytes");
    Ok(())
  }
}

macro_rules! property_decl {
  ($name:ident, $type:ident) => {
    pub fn $name(mut self, $name: $type) -> Self {
      self.$name = $name;
      self
    }
  };
}

impl Case {
  property_decl!(min_n, u64);
  property_decl!(max_n, u64);
  property_decl!(division, usize);
  property_decl!(scale, Scale);
  property_decl!(stability_threshold, f64);
  property_decl!(min_trials, usize);
  property_decl!(max_trials, usize);
  property_decl!(max_duration, Duration);

  fn gauge(&self) -> Vec<u64> {
    let mut gauge = match self.scale {
      Scale::Linear => linspace(self.min_n, self.max_n, self.division),
      Scale::Log => logspace(cmp::max(1, self.min_n), self.max_n, self.division),
    };
    gauge.dedup();
    gauge
  }

  /// Time to build a tree of `n` leaves from scratch.
  pub fn measure_the_append_time_relative_to_the_amount_of_data<T, D>(&self, mut driver: D) -> Result<()>
  where
    D: Driver<T, Duration>,
  {
    println!("[{}]", self.id);
    let mut report = stat::Report::new(Unit::Milliseconds);
    let gauge = self.gauge();
    for (i, n) in gauge.iter().enumerate() {
      self.prepare()?;
      eprint!("  [{}/{}] n={n}: ", i + 1, gauge.len());
      let mut size = 0;
      let results = self.measure_until_stable(&mut || {
        let mut target = driver.setup(self)?;
        let elapse = driver.run(self, &mut target, *n)?;
        size = cmp::max(size, data_size(&self.dir_work)?);
        driver.cleanup(self, target)?;
        Ok(millis(elapse))
      })?;
      let stat = report.append(*n, results);
      eprintln!("{stat}; {size} bytes");
      self.cleanup()?;
    }

    self.save(&report, "N")
  }

  /// Time to generate a proof for each leaf position of a tree of `max_n + 1` leaves. Positions are visited in
  /// random order on every round so that cache warmth doesn't follow the position.
  pub fn measure_the_proof_time_relative_to_the_leaf_position<T, D>(&self, mut driver: D) -> Result<()>
  where
    D: Driver<T, Duration>,
  {
    println!("[{}]", self.id);
    self.prepare()?;
    let mut target = driver.setup(self)?;

    let mut rng = rand::rng();
    let mut report = stat::Report::new(Unit::Milliseconds);
    let mut gauge = self.gauge();
    let start = Instant::now();
    for count in 0..self.max_trials {
      if count >= cmp::max(2, self.min_trials) {
        let cv = report.max_cv();
        if (!cv.is_nan() && cv <= self.stability_threshold) || start.elapsed() >= self.max_duration {
          break;
        }
      }

      gauge.shuffle(&mut rng);
      for i in gauge.iter().copied() {
        let elapse = driver.run(self, &mut target, i)?;
        report.add(i, millis(elapse));
      }
      if count % 10 == 9 {
        eprintln!("  [{}/{}] cv={:.3}", count + 1, self.max_trials, report.max_cv());
      }
    }
    driver.cleanup(self, target)?;
    self.cleanup()?;

    self.save(&report, "I")
  }

  /// Bytes on disk after `n` appends.
  pub fn measure_the_storage_size_relative_to_the_amount_of_data<T, D>(&self, mut driver: D) -> Result<()>
  where
    D: Driver<T, u64>,
  {
    println!("[{}]", self.id);
    self.prepare()?;
    let mut report = stat::Report::new(Unit::Bytes);
    let mut target = driver.setup(self)?;
    let gauge = self.gauge();
    for (i, n) in gauge.iter().enumerate() {
      eprint!("  [{}/{}] n={n}: ", i + 1, gauge.len());
      let size = driver.run(self, &mut target, *n)?;
      let stat = report.add(*n, size as f64);
      eprintln!("{stat}");
    }
    driver.cleanup(self, target)?;
    self.cleanup()?;

    self.save(&report, "N")
  }

  /// Repeats `f` until the measured values satisfy the stability criteria.
  ///
  /// ## Parameters
  ///
  /// - `stability_threshold` - the coefficient of variation the measurements must fall below.
  /// - `min_trials` - minimum number of trials
  /// - `max_trials` - maximum number of trials
  /// - `max_duration` - time limit of the measurement
  ///
  fn measure_until_stable<F>(&self, f: &mut F) -> Result<Vec<f64>>
  where
    F: FnMut() -> Result<f64>,
  {
    let mut results = Vec::new();
    let start = Instant::now();
    while results.len() < self.min_trials
      || (results.len() < self.max_trials
        && start.elapsed() < self.max_duration
        && Stat::from_vec(Unit::Milliseconds, &results).cv() > self.stability_threshold)
    {
      results.push(f()?);
    }
    Ok(results)
  }

  fn save(&self, report: &stat::Report<u64>, x_label: &str) -> Result<()> {
    let path = self.dir_report.join(format!("{}.csv", self.name));
    report.save_to_csv(&path, x_label)?;
    println!("==> The results have been saved in: {}", path.to_string_lossy());
    Ok(())
  }

  fn prepare(&self) -> Result<()> {
    if self.dir_work.exists() {
      fs::remove_dir_all(&self.dir_work)?;
    }
    fs::create_dir_all(&self.dir_work)?;
    Ok(())
  }

  fn cleanup(&self) -> Result<()> {
    if self.dir_work.exists() {
      fs::remove_dir_all(&self.dir_work)?;
    }
    Ok(())
  }
}

pub trait Driver<T, V> {
  fn setup(&mut self, case: &Case) -> Result<T>;
  fn run(&mut self, case: &Case, target: &mut T, param: u64) -> Result<V>;
  fn cleanup(&mut self, _case: &Case, _target: T) -> Result<()> {
    Ok(())
  }
}

fn millis(elapse: Duration) -> f64 {
  elapse.as_nanos() as f64 / 1000.0 / 1000.0
}

fn linspace(min: u64, max: u64, n: usize) -> Vec<u64> {
  assert!(n > 1);
  let step = (max - min) as f64 / (n - 1) as f64;
  (0..n)
    .map(|i| {
      let val = min as f64 + step * i as f64;
      val.round() as u64
    })
    .collect()
}

fn logspace(min: u64, max: u64, n: usize) -> Vec<u64> {
  assert!(min > 0, "min must be positive for logspace");
  assert!(n > 1);
  let log_min = (min as f64).ln();
  let log_max = (max as f64).ln();
  let step = (log_max - log_min) / (n - 1) as f64;
  (0..n)
    .map(|i| {
      let val = (log_min + step * i as f64).exp();
      val.round() as u64
    })
    .collect()
}

fn data_size(path: &Path) -> Result<u64> {
  if path.is_dir() {
    let mut size = 0;
    for entry in fs::read_dir(path)? {
      size += data_size(&entry?.path())?;
    }
    Ok(size)
  } else if path.is_file() {
    Ok(path.metadata()?.len())
  } else {
    Ok(0)
  }
}
