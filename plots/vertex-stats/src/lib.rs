//! Running time grouped by vertex count, with outliers dropped and
//! `mean ± pstdev` error bars.

use std::{io::Write, path::Path};

use common::{
    chart::{ChartLabels, ChartSink},
    config::PlotSettings,
    group::GroupTable,
    plot::Plot,
    record::read_records,
    series::ErrorBarSeries,
    stats::{GroupReport, check_deviations, raw_line, raw_summary, refine_group},
};
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const X_LABEL: &str = "v, count of vertices";
pub const Y_LABEL: &str = "t, ms";

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct VertexStats;

#[typetag::serde]
impl Plot for VertexStats {
    fn name(&self) -> &'static str {
        "vertex"
    }

    fn plot(&self, input: &Path, settings: &PlotSettings, chart: &mut dyn ChartSink) -> Result<()> {
        let (_, series) = analyze(input, settings, &mut std::io::stdout().lock())?;

        let labels = ChartLabels {
            title: Some(settings.title_text().to_owned()),
            x: X_LABEL.to_owned(),
            y: Y_LABEL.to_owned(),
            series: None,
        };
        chart
            .error_bars(&series, &labels)
            .wrap_err("Draw error bars")?;
        Ok(())
    }
}

/// Everything up to the chart: per-group reports in key order and the
/// series built from them.
///
/// The two diagnostic lines of each group go to `out` as the group is
/// processed, so a failing group still leaves the lines of the groups before
/// it and its own first line.
pub fn analyze(
    input: &Path,
    settings: &PlotSettings,
    out: &mut impl Write,
) -> Result<(Vec<GroupReport>, ErrorBarSeries)> {
    check_deviations(settings.deviation_count)?;
    let records = read_records(input)?;
    let table = GroupTable::from_records(&records);
    debug!("{} records in {} groups", records.len(), table.len());

    let mut reports = Vec::with_capacity(table.len());
    for (key, values) in &table {
        let raw = raw_summary(key, values)?;
        writeln!(out, "{}", raw_line(key, &raw))?;
        let report = refine_group(key, values, raw, settings.deviation_count)
            .wrap_err_with(|| format!("Summarize {input:?}"))?;
        writeln!(out, "{}", report.filtered_line())?;
        reports.push(report);
    }

    let series = ErrorBarSeries::from_reports(&reports);
    Ok((reports, series))
}
