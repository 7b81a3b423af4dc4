use std::collections::HashMap;
use std::fmt::Display;
use std::fs::File;
use std::hash::Hash;
use std::io::{BufWriter, Write};
use std::path::Path;

use merkle_log::Result;

#[derive(Debug, Clone)]
pub struct Stat {
  unit: Unit,
  pub count: usize,
  pub mean: f64,
  pub median: f64,
  pub std_dev: f64,
  pub min: f64,
  pub max: f64,
}

impl Stat {
  /// StdDev / Mean
  pub fn cv(&self) -> f64 {
    self.std_dev / self.mean
  }

  pub fn from_vec(unit: Unit, data: &[f64]) -> Stat {
    if data.is_empty() {
      return Stat {
        unit,
        count: 0,
        mean: f64::NAN,
        median: f64::NAN,
        std_dev: f64::NAN,
        min: f64::NAN,
        max: f64::NAN,
      };
    }
    let mut data = data.to_vec();
    data.sort_by(f64::total_cmp);
    let count = data.len();
    let min = data[0];
    let max = data[count - 1];
    let mean = data.iter().sum::<f64>() / count as f64;
    let median = if count % 2 == 0 {
      let mid = count / 2;
      (data[mid - 1] + data[mid]) / 2.0
    } else {
      data[count / 2]
    };
    let variance = data
      .iter()
      .map(|&x| {
        let diff = x - mean;
        diff * diff
      })
      .sum::<f64>()
      / count as f64;
    let std_dev = variance.sqrt();
    Stat { unit, count, mean, median, std_dev, min, max }
  }
}

impl Display for Stat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    // 2σ (equivalent to 95.4% confidence interval) calculated as a percentage
    let two_sigma_percent = if self.mean > 0.0 { (2.0 * self.std_dev / self.mean) * 100.0 } else { 0.0 };
    f.write_fmt(format_args!(
      "{}: {} ±{:.1}% [{}|{}|{}]",
      self.count,
      self.unit.format(self.mean),
      two_sigma_percent,
      self.unit.short(self.min),
      self.unit.short(self.median),
      self.unit.short(self.max)
    ))
  }
}

#[derive(Debug, Clone, Copy)]
pub enum Unit {
  Bytes,
  Milliseconds,
}

impl Unit {
  fn scaled_format(mut value: f64, scale: usize, unit: &str, auxs: &[&str], precision: usize) -> String {
    let mut unit_index = 0;
    while value >= scale as f64 && unit_index + 1 < auxs.len() {
      value /= scale as f64;
      unit_index += 1;
    }
    format!("{:.precision$}{}{}", value, auxs[unit_index], unit, precision = precision)
  }

  fn format(&self, value: f64) -> String {
    match self {
      Self::Bytes => Self::scaled_format(value, 1024, "B", &["", "k", "M", "G", "T", "P"], 2),
      Self::Milliseconds => Self::scaled_format(value * 1000.0 * 1000.0, 1000, "s", &["n", "μ", "m", ""], 2),
    }
  }

  fn short(&self, value: f64) -> String {
    match self {
      Self::Bytes => Self::scaled_format(value, 1024, "", &["", "k", "M", "G", "T", "P"], 0),
      Self::Milliseconds => Self::scaled_format(value * 1000.0 * 1000.0, 1000, "", &["n", "μ", "m", ""], 0),
    }
  }
}

/// Measured values grouped by the parameter they were measured at.
pub struct Report<X: Display + Copy + Hash + Eq + Ord> {
  unit: Unit,
  data_set: HashMap<X, Vec<f64>>,
}

impl<X: Display + Copy + Hash + Eq + Ord> Report<X> {
  pub fn new(unit: Unit) -> Self {
    Report { unit, data_set: HashMap::new() }
  }

  pub fn add(&mut self, x: X, y: f64) -> Stat {
    self.append(x, vec![y])
  }

  pub fn append(&mut self, x: X, mut ys: Vec<f64>) -> Stat {
    let data = self.data_set.entry(x).or_default();
    data.append(&mut ys);
    Stat::from_vec(self.unit, data)
  }

  pub fn calculate(&self, x: X) -> Option<Stat> {
    self.data_set.get(&x).map(|ys| Stat::from_vec(self.unit, ys))
  }

  /// The worst coefficient of variation over all parameters, NaN if nothing was measured.
  pub fn max_cv(&self) -> f64 {
    self.data_set.values().map(|ys| Stat::from_vec(self.unit, ys).cv()).fold(f64::NAN, f64::max)
  }

  /// One row per parameter with its summary statistics.
  pub fn save_to_csv(&self, path: &Path, x_label: &str) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{x_label},COUNT,MEAN,MEDIAN,STDDEV,MIN,MAX")?;

    let mut xs = self.data_set.keys().copied().collect::<Vec<_>>();
    xs.sort_unstable();
    for x in xs {
      let Some(y) = self.calculate(x) else { continue };
      writeln!(
        writer,
        "\"{}\",{},{:.6},{:.6},{:.6},{:.6},{:.6}",
        x, y.count, y.mean, y.median, y.std_dev, y.min, y.max
      )?;
    }

    writer.flush()?;
    Ok(())
  }
}
