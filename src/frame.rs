use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Value;

/// Value columns of the synthetic frame.
pub const COLUMN_NAMES: [&str; 4] = ["A", "B", "C", "D"];

#[derive(Debug, Clone, PartialEq)]
pub struct FrameColumn {
    pub name: String,
    pub values: Vec<f64>,
}

/// Synthetic time-series table: a timestamp index plus four float columns
/// of standard-normal noise.
///
/// Only the value columns are written to the database; the index exists for
/// display.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeFrame {
    index: Vec<NaiveDateTime>,
    columns: Vec<FrameColumn>,
}

impl TimeFrame {
    /// `nper` rows starting at 2000-01-01, one row every `freq`.
    pub fn generate(nper: usize, freq: TimeDelta, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut index = Vec::with_capacity(nper);
        let mut ts = frame_start();
        for _ in 0..nper {
            index.push(ts);
            ts += freq;
        }

        let columns = COLUMN_NAMES
            .iter()
            .map(|name| FrameColumn {
                name: (*name).to_string(),
                values: (0..nper).map(|_| standard_normal(&mut rng)).collect(),
            })
            .collect();

        Self { index, columns }
    }

    /// One row per second, the benchmark's default shape.
    pub fn per_second(nper: usize, seed: Option<u64>) -> Self {
        Self::generate(nper, TimeDelta::seconds(1), seed)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    pub fn columns(&self) -> &[FrameColumn] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn row(&self, idx: usize) -> Option<Vec<f64>> {
        if idx >= self.len() {
            return None;
        }
        Some(self.columns.iter().map(|c| c.values[idx]).collect())
    }

    /// Row-major parameter rows, value columns only.
    pub fn records(&self) -> Vec<Vec<Value>> {
        (0..self.len())
            .map(|idx| {
                self.columns
                    .iter()
                    .map(|c| Value::from(c.values[idx]))
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", crate::display::frame_table(self))?;
        write!(f, "[{} rows x {} columns]", self.len(), self.columns.len())
    }
}

fn frame_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

// Box-Muller transform.
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_starts_at_millennium_and_steps_by_freq() {
        let frame = TimeFrame::per_second(3, Some(7));
        assert_eq!(frame.len(), 3);
        let index: Vec<String> = frame
            .index()
            .iter()
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
            .collect();
        assert_eq!(
            index,
            vec!["2000-01-01 00:00:00", "2000-01-01 00:00:01", "2000-01-01 00:00:02"]
        );
        assert_eq!(frame.column_names(), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn seeded_frames_are_reproducible() {
        let a = TimeFrame::per_second(50, Some(42));
        let b = TimeFrame::per_second(50, Some(42));
        let c = TimeFrame::per_second(50, Some(43));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn records_exclude_the_index() {
        let frame = TimeFrame::per_second(5, Some(1));
        let records = frame.records();
        assert_eq!(records.len(), 5);
        assert!(records.iter().all(|r| r.len() == COLUMN_NAMES.len()));
        let first = frame.row(0).unwrap();
        assert_eq!(records[0][0].as_f64(), Some(first[0]));
        assert!(frame.row(5).is_none());
    }

    #[test]
    fn values_look_like_standard_normal_noise() {
        let frame = TimeFrame::per_second(4_000, Some(9));
        for column in frame.columns() {
            assert!(column.values.iter().all(|v| v.is_finite()));
            let mean = column.values.iter().sum::<f64>() / column.values.len() as f64;
            assert!(mean.abs() < 0.1, "mean {mean} too far from 0");
        }
    }

    #[test]
    fn empty_frame_is_allowed() {
        let frame = TimeFrame::per_second(0, None);
        assert!(frame.is_empty());
        assert!(frame.records().is_empty());
    }
}
