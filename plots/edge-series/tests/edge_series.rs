use std::io::Write;

use common::{
    chart::{ChartLabels, ChartSink},
    config::PlotSettings,
    error::{PlotError, PlotResult},
    plot::Plot,
    series::{ErrorBarSeries, RawSeries},
};
use edge_series::{EdgeSeries, SERIES_LABEL, X_LABEL, Y_LABEL};
use tempfile::NamedTempFile;

#[derive(Default)]
struct Recorder {
    lines: Vec<(RawSeries, ChartLabels)>,
}

impl ChartSink for Recorder {
    fn error_bars(&mut self, _series: &ErrorBarSeries, _labels: &ChartLabels) -> PlotResult<()> {
        panic!("edge plot must not aggregate")
    }

    fn line(&mut self, series: &RawSeries, labels: &ChartLabels) -> PlotResult<()> {
        self.lines.push((series.clone(), labels.clone()));
        Ok(())
    }
}

fn csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn rows_are_plotted_as_is() {
    let file = csv("300,0.2,17,\"19:10 12:00:01\"\n100,0.2,5\n300,0.2,19\n");
    let mut recorder = Recorder::default();
    EdgeSeries
        .plot(file.path(), &PlotSettings::default(), &mut recorder)
        .unwrap();

    let (series, labels) = &recorder.lines[0];
    assert_eq!(series.xs, vec![300, 100, 300]);
    assert_eq!(series.ys, vec![17, 5, 19]);
    assert_eq!(labels.x, X_LABEL);
    assert_eq!(labels.y, Y_LABEL);
    assert_eq!(labels.series.as_deref(), Some(SERIES_LABEL));
    assert_eq!(labels.title, None);
}

#[test]
fn malformed_row_aborts_before_drawing() {
    let file = csv("1,x,2\na,b,c\n");
    let mut recorder = Recorder::default();
    let err = EdgeSeries
        .plot(file.path(), &PlotSettings::default(), &mut recorder)
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PlotError>(),
        Some(PlotError::Parse { .. })
    ));
    assert!(recorder.lines.is_empty());
}
