//! Chart rendering through plotters.
//!
//! Plots hand their finished series to a [`ChartSink`]. [`FileChart`] is the
//! real one: it writes an SVG or PNG picked by the output extension.

use std::{
    ops::Range,
    path::{Path, PathBuf},
};

use plotters::{coord::Shift, prelude::*};
use tracing::info;

use crate::{
    error::{PlotError, PlotResult},
    series::{ErrorBarSeries, RawSeries},
};

const FONT: &str = "sans-serif";
const RANGE_MARGIN: f64 = 0.05;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChartLabels {
    pub title: Option<String>,
    pub x: String,
    pub y: String,
    /// Legend entry, only drawn when set
    pub series: Option<String>,
}

pub trait ChartSink {
    /// Points at `(key, mean)` joined by a line, with `mean ± stdev` bars
    fn error_bars(&mut self, series: &ErrorBarSeries, labels: &ChartLabels) -> PlotResult<()>;
    /// A line through `(x, y)` in the order given
    fn line(&mut self, series: &RawSeries, labels: &ChartLabels) -> PlotResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Png,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> PlotResult<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        match ext.as_deref() {
            Some("svg") => Ok(ImageFormat::Svg),
            Some("png") => Ok(ImageFormat::Png),
            _ => Err(PlotError::Config(format!(
                "unsupported chart file {path:?}, use .svg or .png"
            ))),
        }
    }
}

/// `report.csv` -> `report.svg`
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("svg")
}

#[derive(Debug, Clone)]
pub struct FileChart {
    path: PathBuf,
    format: ImageFormat,
    size: (u32, u32),
}

impl FileChart {
    pub fn new(path: PathBuf, size: (u32, u32)) -> PlotResult<Self> {
        let format = ImageFormat::from_path(&path)?;
        Ok(Self { path, format, size })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChartSink for FileChart {
    fn error_bars(&mut self, series: &ErrorBarSeries, labels: &ChartLabels) -> PlotResult<()> {
        let (x, y) = series
            .x_range()
            .zip(series.y_range())
            .ok_or_else(empty_series)?;
        let (x, y) = (padded(x), padded(y));
        match self.format {
            ImageFormat::Svg => draw_error_bars(
                SVGBackend::new(&self.path, self.size).into_drawing_area(),
                series,
                labels,
                x,
                y,
            ),
            ImageFormat::Png => draw_error_bars(
                BitMapBackend::new(&self.path, self.size).into_drawing_area(),
                series,
                labels,
                x,
                y,
            ),
        }?;
        info!("Wrote {} groups to {:?}", series.len(), self.path);
        Ok(())
    }

    fn line(&mut self, series: &RawSeries, labels: &ChartLabels) -> PlotResult<()> {
        let (x, y) = series
            .x_range()
            .zip(series.y_range())
            .ok_or_else(empty_series)?;
        let (x, y) = (padded(x), padded(y));
        match self.format {
            ImageFormat::Svg => draw_line(
                SVGBackend::new(&self.path, self.size).into_drawing_area(),
                series,
                labels,
                x,
                y,
            ),
            ImageFormat::Png => draw_line(
                BitMapBackend::new(&self.path, self.size).into_drawing_area(),
                series,
                labels,
                x,
                y,
            ),
        }?;
        info!("Wrote {} points to {:?}", series.len(), self.path);
        Ok(())
    }
}

fn empty_series() -> PlotError {
    PlotError::Empty("the input has no rows".to_owned())
}

/// Widens `(min, max)` by a margin on both sides. A zero-width range gets
/// one unit either way so the axis is still drawable.
fn padded((min, max): (f64, f64)) -> Range<f64> {
    let span = max - min;
    if span == 0.0 {
        return (min - 1.0)..(max + 1.0);
    }
    (min - span * RANGE_MARGIN)..(max + span * RANGE_MARGIN)
}

fn backend_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> PlotError {
    PlotError::Chart(err.to_string())
}

fn draw_error_bars<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    series: &ErrorBarSeries,
    labels: &ChartLabels,
    x: Range<f64>,
    y: Range<f64>,
) -> PlotResult<()> {
    root.fill(&WHITE).map_err(backend_error)?;
    let mut builder = ChartBuilder::on(&root);
    builder.margin(10).x_label_area_size(40).y_label_area_size(60);
    if let Some(title) = &labels.title {
        builder.caption(title, (FONT, 22));
    }
    let mut chart = builder.build_cartesian_2d(x, y).map_err(backend_error)?;

    chart
        .configure_mesh()
        .x_desc(&labels.x)
        .y_desc(&labels.y)
        .draw()
        .map_err(backend_error)?;

    chart
        .draw_series(LineSeries::new(
            series.points().map(|(key, mean, _)| (key, mean)),
            &BLUE,
        ))
        .map_err(backend_error)?;
    chart
        .draw_series(series.points().map(|(key, mean, stdev)| {
            ErrorBar::new_vertical(key, mean - stdev, mean, mean + stdev, BLUE.filled(), 8)
        }))
        .map_err(backend_error)?;

    root.present().map_err(backend_error)
}

fn draw_line<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    series: &RawSeries,
    labels: &ChartLabels,
    x: Range<f64>,
    y: Range<f64>,
) -> PlotResult<()> {
    root.fill(&WHITE).map_err(backend_error)?;
    let mut builder = ChartBuilder::on(&root);
    builder.margin(10).x_label_area_size(40).y_label_area_size(60);
    if let Some(title) = &labels.title {
        builder.caption(title, (FONT, 22));
    }
    let mut chart = builder.build_cartesian_2d(x, y).map_err(backend_error)?;

    chart
        .configure_mesh()
        .x_desc(&labels.x)
        .y_desc(&labels.y)
        .draw()
        .map_err(backend_error)?;

    let drawn = chart
        .draw_series(LineSeries::new(series.points(), &BLUE))
        .map_err(backend_error)?;
    if let Some(label) = &labels.series {
        drawn
            .label(label)
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(backend_error)?;
    }

    root.present().map_err(backend_error)
}
