use tracing::{debug, warn};

use crate::{
    error::{PlotError, PlotResult},
    group::GroupTable,
};

pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Population standard deviation (divisor `n`).
pub fn pstdev(data: &[f64]) -> Option<f64> {
    let mean = mean(data)?;
    let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / data.len() as f64;
    Some(variance.sqrt())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub pstdev: f64,
}

impl Summary {
    pub fn of(values: &[i64]) -> Option<Self> {
        let data = values.iter().map(|&v| v as f64).collect::<Vec<_>>();
        Some(Self {
            mean: mean(&data)?,
            pstdev: pstdev(&data)?,
        })
    }
}

/// Keeps the values closer than `allowed_deviations` standard deviations to
/// the mean, in their original order. Nothing is dropped when the spread is
/// zero.
pub fn filter_outliers(values: &[i64], summary: &Summary, allowed_deviations: f64) -> Vec<i64> {
    if summary.pstdev == 0.0 {
        return values.to_vec();
    }
    let threshold = allowed_deviations * summary.pstdev;
    values
        .iter()
        .copied()
        .filter(|&v| (v as f64 - summary.mean).abs() < threshold)
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupReport {
    pub key: i64,
    /// Statistics over every measurement of the group
    pub raw: Summary,
    /// Statistics after outliers were dropped
    pub filtered: Summary,
    pub kept: usize,
    pub removed: usize,
}

impl GroupReport {
    pub fn raw_line(&self) -> String {
        raw_line(self.key, &self.raw)
    }

    pub fn filtered_line(&self) -> String {
        format!(
            "{} new_avg={} pstdev={}",
            self.key, self.filtered.mean, self.filtered.pstdev
        )
    }
}

/// `<key> avg=<mean> pstdev=<pstdev>`. Whole numbers print without a
/// fractional part (`100`), like the reports this replaces.
pub fn raw_line(key: i64, raw: &Summary) -> String {
    format!("{key} avg={} pstdev={}", raw.mean, raw.pstdev)
}

pub fn check_deviations(allowed_deviations: f64) -> PlotResult<()> {
    if allowed_deviations.is_finite() && allowed_deviations > 0.0 {
        Ok(())
    } else {
        Err(PlotError::Config(format!(
            "deviation count must be a positive number, got {allowed_deviations}"
        )))
    }
}

/// First pass: statistics over every measurement of a group.
pub fn raw_summary(key: i64, values: &[i64]) -> PlotResult<Summary> {
    Summary::of(values).ok_or_else(|| PlotError::Data {
        key,
        reason: "group has no measurements".to_owned(),
    })
}

/// Second pass: drops outliers relative to `raw` and summarizes what is
/// left.
pub fn refine_group(
    key: i64,
    values: &[i64],
    raw: Summary,
    allowed_deviations: f64,
) -> PlotResult<GroupReport> {
    check_deviations(allowed_deviations)?;
    let kept = filter_outliers(values, &raw, allowed_deviations);
    let filtered = Summary::of(&kept).ok_or_else(|| PlotError::Data {
        key,
        reason: format!(
            "all {} measurements are {allowed_deviations} or more standard deviations from the mean {}",
            values.len(),
            raw.mean
        ),
    })?;

    let removed = values.len() - kept.len();
    if removed > 0 {
        warn!("Group {key}: dropped {removed} of {} measurements", values.len());
    }
    Ok(GroupReport {
        key,
        raw,
        filtered,
        kept: kept.len(),
        removed,
    })
}

pub fn summarize_group(
    key: i64,
    values: &[i64],
    allowed_deviations: f64,
) -> PlotResult<GroupReport> {
    check_deviations(allowed_deviations)?;
    let raw = raw_summary(key, values)?;
    refine_group(key, values, raw, allowed_deviations)
}

/// Summarizes every group in key order. The first failing group aborts.
pub fn summarize(table: &GroupTable, allowed_deviations: f64) -> PlotResult<Vec<GroupReport>> {
    check_deviations(allowed_deviations)?;
    let reports = table
        .iter()
        .map(|(key, values)| summarize_group(key, values, allowed_deviations))
        .collect::<PlotResult<Vec<_>>>()?;
    debug!("Summarized {} groups", reports.len());
    Ok(reports)
}
