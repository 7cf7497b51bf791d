//! Raw running time per row, no aggregation.

use std::path::Path;

use common::{
    chart::{ChartLabels, ChartSink},
    config::PlotSettings,
    plot::Plot,
    record::read_records,
    series::RawSeries,
};
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const X_LABEL: &str = "vertexes";
pub const Y_LABEL: &str = "time, ms";
pub const SERIES_LABEL: &str = "update time depend on edge count";

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct EdgeSeries;

#[typetag::serde]
impl Plot for EdgeSeries {
    fn name(&self) -> &'static str {
        "edge"
    }

    fn plot(&self, input: &Path, _settings: &PlotSettings, chart: &mut dyn ChartSink) -> Result<()> {
        let records = read_records(input)?;
        let series = RawSeries::from_records(&records);
        debug!("Plotting {} rows", series.len());

        let labels = ChartLabels {
            title: None,
            x: X_LABEL.to_owned(),
            y: Y_LABEL.to_owned(),
            series: Some(SERIES_LABEL.to_owned()),
        };
        chart.line(&series, &labels).wrap_err("Draw line")?;
        Ok(())
    }
}
