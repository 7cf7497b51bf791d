use common::{
    config::{Config, GraphTitle},
    error::PlotError,
    plot::render_all,
};
use default_plots::init_plots;

const BATCH: &str = r#"
settings:
  deviation_count: 3.5
  title: DijkstraDense
plots:
  - input: report_dynamic.csv
    output: dynamic.png
    plot:
      type: VertexStats
  - input: report_static.csv
    plot:
      type: EdgeSeries
"#;

#[test]
fn batch_jobs_resolve_to_plugins() {
    init_plots();
    let config = Config::from_yaml(BATCH).unwrap();

    assert_eq!(config.settings.deviation_count, 3.5);
    assert_eq!(config.settings.title, GraphTitle::DijkstraDense);
    let names: Vec<_> = config.plots.iter().map(|job| job.plot.name()).collect();
    assert_eq!(names, vec!["vertex", "edge"]);
    assert_eq!(
        config.plots[0].output.as_deref(),
        Some(std::path::Path::new("dynamic.png"))
    );
    assert_eq!(config.plots[1].output, None);
}

#[test]
fn unknown_plot_type_is_config_error() {
    init_plots();
    let yaml = "plots:\n  - input: a.csv\n    plot:\n      type: Histogram\n";
    assert!(matches!(Config::from_yaml(yaml), Err(PlotError::Config(_))));
}

#[test]
fn batch_stops_at_first_missing_report() {
    init_plots();
    let dir = tempfile::tempdir().unwrap();
    let yaml = format!(
        "plots:\n  - input: {}\n    plot:\n      type: EdgeSeries\n",
        dir.path().join("missing.csv").display()
    );
    let config = Config::from_yaml(&yaml).unwrap();
    let err = render_all(&config).unwrap_err();
    assert!(
        err.chain()
            .any(|cause| matches!(cause.downcast_ref::<PlotError>(), Some(PlotError::Io { .. })))
    );
    assert!(!dir.path().join("missing.svg").exists());
}

#[test]
fn empty_batch_writes_nothing() {
    assert!(render_all(&Config::default()).unwrap().is_empty());
}
