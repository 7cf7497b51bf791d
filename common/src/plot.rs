use core::fmt::Debug;
use std::path::{Path, PathBuf};

use dyn_clone::{DynClone, clone_trait_object};
use eyre::{Result, WrapErr};
use tracing::debug;

use crate::{
    chart::{ChartSink, FileChart, default_output_path},
    config::{Config, PlotSettings},
};

#[typetag::serde(tag = "type")]
pub trait Plot: Debug + DynClone + Send + Sync {
    /// Name used on the command line and in logs
    fn name(&self) -> &'static str;
    /// Reads `input` and hands the finished series to `chart`
    ///
    /// Arguments:
    /// * `input` - CSV report written by the benchmark harness
    /// * `settings` - Statistics and chart settings
    /// * `chart` - Where the series end up, usually a [`FileChart`]
    fn plot(&self, input: &Path, settings: &PlotSettings, chart: &mut dyn ChartSink)
    -> Result<()>;
}
clone_trait_object!(Plot);

/// Runs `plot` on `input` and writes the chart to `output`, or next to the
/// input when no output is given. Returns the path written.
pub fn render(
    plot: &dyn Plot,
    input: &Path,
    output: Option<&Path>,
    settings: &PlotSettings,
) -> Result<PathBuf> {
    settings.validate()?;
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input));
    let mut chart = FileChart::new(output, settings.size())?;
    debug!("Running {} on {input:?}", plot.name());
    plot.plot(input, settings, &mut chart)
        .wrap_err_with(|| format!("{} plot of {input:?}", plot.name()))?;
    Ok(chart.path().to_path_buf())
}

/// Renders every job of a batch config, stopping at the first failure.
pub fn render_all(config: &Config) -> Result<Vec<PathBuf>> {
    if config.plots.is_empty() {
        debug!("No plots");
        return Ok(Vec::new());
    }

    let mut written = Vec::with_capacity(config.plots.len());
    for job in &config.plots {
        written.push(render(
            job.plot.as_ref(),
            &job.input,
            job.output.as_deref(),
            &config.settings,
        )?);
    }
    Ok(written)
}
