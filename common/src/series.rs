use itertools::{Itertools, MinMaxResult};

use crate::{record::Record, stats::GroupReport};

/// Aligned columns for an error-bar chart: `keys[i]`, `means[i]` and
/// `stdevs[i]` always describe the same group.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ErrorBarSeries {
    pub keys: Vec<i64>,
    pub means: Vec<f64>,
    pub stdevs: Vec<f64>,
}

impl ErrorBarSeries {
    pub fn from_reports(reports: &[GroupReport]) -> Self {
        let (keys, means, stdevs): (Vec<_>, Vec<_>, Vec<_>) = reports
            .iter()
            .map(|report| (report.key, report.filtered.mean, report.filtered.pstdev))
            .multiunzip();
        Self {
            keys,
            means,
            stdevs,
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.keys
            .iter()
            .zip(&self.means)
            .zip(&self.stdevs)
            .map(|((&key, &mean), &stdev)| (key as f64, mean, stdev))
    }

    pub fn x_range(&self) -> Option<(f64, f64)> {
        bounds(self.keys.iter().map(|&k| k as f64))
    }

    /// Vertical extent including the error bars.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        bounds(
            self.points()
                .flat_map(|(_, mean, stdev)| [mean - stdev, mean + stdev]),
        )
    }
}

/// Raw `(field 0, field 2)` pairs in file order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RawSeries {
    pub xs: Vec<i64>,
    pub ys: Vec<i64>,
}

impl RawSeries {
    pub fn from_records(records: &[Record]) -> Self {
        let (xs, ys): (Vec<_>, Vec<_>) = records
            .iter()
            .map(|record| (record.vertex_count, record.time))
            .unzip();
        Self { xs, ys }
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs
            .iter()
            .zip(&self.ys)
            .map(|(&x, &y)| (x as f64, y as f64))
    }

    pub fn x_range(&self) -> Option<(f64, f64)> {
        bounds(self.xs.iter().map(|&x| x as f64))
    }

    pub fn y_range(&self) -> Option<(f64, f64)> {
        bounds(self.ys.iter().map(|&y| y as f64))
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    match values.minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(v) => Some((v, v)),
        MinMaxResult::MinMax(min, max) => Some((min, max)),
    }
}
