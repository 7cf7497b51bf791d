use std::path::PathBuf;

use clap::{Parser, Subcommand};
use common::{
    config::{Config, GraphTitle, PlotSettings},
    plot::{render, render_all},
};
use default_plots::PlotKind;
use eyre::Result;
use tracing::{debug, error};
use tracing_subscriber::{
    EnvFilter,
    fmt::{layer, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser, Debug)]
#[command(version, about = "Plot shortest-path benchmark reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Extra tracing directives, e.g. `common=debug`
    #[arg(short, long)]
    log: Vec<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Mean running time per vertex count, outliers dropped, with error bars
    Vertex {
        /// CSV report
        file: PathBuf,
        #[command(flatten)]
        opts: RenderOpts,
        /// Chart title preset
        #[arg(long)]
        title: Option<GraphTitle>,
    },
    /// Raw running time per row
    Edge {
        /// CSV report
        file: PathBuf,
        #[command(flatten)]
        opts: RenderOpts,
    },
    /// Render every plot listed in a config file
    Batch {
        #[arg(short, long, default_value = "plots.yaml")]
        config_file: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct RenderOpts {
    /// Chart file (.svg or .png), defaults to the input with a .svg extension
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// YAML file with plot settings
    #[arg(short, long)]
    config_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let log_level = std::env::var("RUST_LOG").unwrap_or("warn".to_owned());
    let file_appender = tracing_appender::rolling::never(".", "log.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let mut env_filter = EnvFilter::new(format!("graph_plots={log_level}"));
    for log in &args.log {
        env_filter = env_filter.add_directive(log.parse()?);
    }

    let modules = PlotKind::ALL
        .iter()
        .map(PlotKind::module)
        .chain(["common"]);
    for module in modules {
        if !args.log.iter().any(|x| x.starts_with(module)) {
            env_filter = env_filter.add_directive(format!("{module}={log_level}").parse()?);
        }
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            layer()
                .with_writer(std::io::stderr)
                .with_timer(ChronoLocal::new("%v %k:%M:%S %z".to_owned()))
                .compact(),
        )
        .with(layer().with_writer(non_blocking))
        .init();

    default_plots::init_plots();

    if let Err(err) = run(args.command) {
        error!("{err:#?}");
        return Err(err);
    }
    Ok(())
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Vertex { file, opts, title } => {
            let mut settings = load_settings(opts.config_file.as_deref())?;
            if let Some(title) = title {
                settings.title = title;
                settings.custom_title = None;
            }
            let plot = PlotKind::VertexStats.build();
            let written = render(plot.as_ref(), &file, opts.output.as_deref(), &settings)?;
            println!("Chart written to {}", written.display());
        }
        Commands::Edge { file, opts } => {
            let settings = load_settings(opts.config_file.as_deref())?;
            let plot = PlotKind::EdgeSeries.build();
            let written = render(plot.as_ref(), &file, opts.output.as_deref(), &settings)?;
            println!("Chart written to {}", written.display());
        }
        Commands::Batch { config_file } => {
            let config = Config::load(&config_file)?;
            debug!("Loaded {} plot jobs from {config_file:?}", config.plots.len());
            for written in render_all(&config)? {
                println!("Chart written to {}", written.display());
            }
        }
    }
    Ok(())
}

fn load_settings(config_file: Option<&std::path::Path>) -> Result<PlotSettings> {
    Ok(match config_file {
        Some(path) => Config::load(path)?.settings,
        None => PlotSettings::default(),
    })
}
