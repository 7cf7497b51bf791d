use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("usage: {0}")]
    Usage(String),
    #[error("could not read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: {reason}")]
    Parse { line: u64, reason: String },
    #[error("group {key}: {reason}")]
    Data { key: i64, reason: String },
    #[error("nothing to plot: {0}")]
    Empty(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("chart backend: {0}")]
    Chart(String),
}

pub type PlotResult<T> = Result<T, PlotError>;

/// Picks the single positional input path out of a raw argument list
/// (program name first, as in [`std::env::args`]).
pub fn input_path_from_args<I, S>(args: I) -> PlotResult<PathBuf>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::into);
    let program = args.next().unwrap_or_else(|| "graph-plots".to_owned());
    match args.next() {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => Err(PlotError::Usage(format!("{program} <FILE>"))),
    }
}
