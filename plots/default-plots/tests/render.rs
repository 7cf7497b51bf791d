use std::{fs, path::Path};

use common::{config::PlotSettings, error::PlotError, plot::render};
use default_plots::PlotKind;

const REPORT: &str = "100,0.5,12,\"19:10 10:00:00\"\n\
                      100,0.5,14,\"19:10 10:00:01\"\n\
                      200,0.5,40,\"19:10 10:00:02\"\n\
                      200,0.5,44,\"19:10 10:00:03\"\n";

fn assert_written(path: &Path) {
    let meta = fs::metadata(path).unwrap_or_else(|err| panic!("{path:?}: {err}"));
    assert!(meta.len() > 0, "{path:?} is empty");
}

#[test]
fn both_plots_write_svg_next_to_the_input() {
    let dir = tempfile::tempdir().unwrap();
    for kind in PlotKind::ALL {
        let input = dir.path().join(format!("{}.csv", kind.name()));
        fs::write(&input, REPORT).unwrap();

        let written =
            render(kind.build().as_ref(), &input, None, &PlotSettings::default()).unwrap();
        assert_eq!(written, input.with_extension("svg"));
        assert_written(&written);
        assert!(fs::read_to_string(&written).unwrap().contains("<svg"));
    }
}

#[test]
fn both_plots_write_png_on_request() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.csv");
    fs::write(&input, REPORT).unwrap();
    let settings = PlotSettings {
        width: 320,
        height: 240,
        ..Default::default()
    };

    for kind in PlotKind::ALL {
        let output = dir.path().join(format!("{}.png", kind.name()));
        let written = render(kind.build().as_ref(), &input, Some(&output), &settings).unwrap();
        assert_eq!(written, output);
        assert_written(&written);
    }
}

#[test]
fn empty_report_writes_no_chart() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.csv");
    fs::write(&input, "").unwrap();

    for kind in PlotKind::ALL {
        let err = render(kind.build().as_ref(), &input, None, &PlotSettings::default())
            .unwrap_err();
        assert!(
            err.chain()
                .any(|cause| matches!(cause.downcast_ref::<PlotError>(), Some(PlotError::Empty(_))))
        );
        assert!(!input.with_extension("svg").exists());
    }
}
