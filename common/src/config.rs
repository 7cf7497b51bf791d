use std::{fmt, fs, path::{Path, PathBuf}, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    DEVIATION_COUNT_TO_FILTER,
    error::{PlotError, PlotResult},
    plot::Plot,
    stats::check_deviations,
};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub settings: PlotSettings,
    pub plots: Vec<PlotJob>,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> PlotResult<Self> {
        let config: Config =
            serde_yml::from_str(yaml).map_err(|err| PlotError::Config(err.to_string()))?;
        config.settings.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> PlotResult<Self> {
        let yaml = fs::read_to_string(path).map_err(|source| PlotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }
}

/// One entry of a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotJob {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub plot: Box<dyn Plot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotSettings {
    pub deviation_count: f64,
    pub width: u32,
    pub height: u32,
    pub title: GraphTitle,
    pub custom_title: Option<String>,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            deviation_count: DEVIATION_COUNT_TO_FILTER,
            width: 1024,
            height: 768,
            title: GraphTitle::default(),
            custom_title: None,
        }
    }
}

impl PlotSettings {
    pub fn validate(&self) -> PlotResult<()> {
        check_deviations(self.deviation_count)?;
        if self.width == 0 || self.height == 0 {
            return Err(PlotError::Config(format!(
                "chart size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn title_text(&self) -> &str {
        self.custom_title
            .as_deref()
            .unwrap_or_else(|| self.title.text())
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Titles for the four experiments the benchmark harness runs
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphTitle {
    DijkstraSparse,
    DijkstraDense,
    DynamicSparse,
    #[default]
    DynamicDense,
}

impl GraphTitle {
    pub const ALL: [GraphTitle; 4] = [
        GraphTitle::DijkstraSparse,
        GraphTitle::DijkstraDense,
        GraphTitle::DynamicSparse,
        GraphTitle::DynamicDense,
    ];

    pub fn text(&self) -> &'static str {
        match self {
            GraphTitle::DijkstraSparse => "Dijkstra running time on a sparse graph",
            GraphTitle::DijkstraDense => "Dijkstra running time on a dense graph",
            GraphTitle::DynamicSparse => "Dynamic algorithm running time on a sparse graph",
            GraphTitle::DynamicDense => "Dynamic algorithm running time on a dense graph",
        }
    }

    fn slug(&self) -> &'static str {
        match self {
            GraphTitle::DijkstraSparse => "dijkstra-sparse",
            GraphTitle::DijkstraDense => "dijkstra-dense",
            GraphTitle::DynamicSparse => "dynamic-sparse",
            GraphTitle::DynamicDense => "dynamic-dense",
        }
    }
}

impl fmt::Display for GraphTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for GraphTitle {
    type Err = PlotError;

    /// Accepts `dynamic-dense`, `dynamic_dense` and `DynamicDense`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.replace(['-', '_'], "").to_lowercase();
        GraphTitle::ALL
            .into_iter()
            .find(|title| title.slug().replace('-', "") == wanted)
            .ok_or_else(|| {
                PlotError::Config(format!(
                    "unknown title {s:?}, expected one of {}",
                    GraphTitle::ALL.map(|t| t.slug()).join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.settings, PlotSettings::default());
        assert!(config.plots.is_empty());
        assert_eq!(config.settings.deviation_count, 4.0);
    }

    #[test]
    fn partial_settings_keep_other_defaults() {
        let config = Config::from_yaml(
            "settings:\n  deviation_count: 3.0\n  title: DijkstraSparse\n",
        )
        .unwrap();
        assert_eq!(config.settings.deviation_count, 3.0);
        assert_eq!(config.settings.width, 1024);
        assert_eq!(
            config.settings.title_text(),
            "Dijkstra running time on a sparse graph"
        );
    }

    #[test]
    fn custom_title_wins() {
        let settings = PlotSettings {
            custom_title: Some("mine".to_owned()),
            ..Default::default()
        };
        assert_eq!(settings.title_text(), "mine");
    }

    #[test]
    fn invalid_settings_are_rejected() {
        assert!(matches!(
            Config::from_yaml("settings:\n  deviation_count: -2.0\n"),
            Err(PlotError::Config(_))
        ));
        assert!(matches!(
            Config::from_yaml("settings:\n  width: 0\n"),
            Err(PlotError::Config(_))
        ));
        assert!(matches!(
            Config::from_yaml("settings: [1, 2]"),
            Err(PlotError::Config(_))
        ));
    }

    #[test]
    fn title_parsing() {
        assert_eq!("dynamic-dense".parse::<GraphTitle>().unwrap(), GraphTitle::DynamicDense);
        assert_eq!("DijkstraDense".parse::<GraphTitle>().unwrap(), GraphTitle::DijkstraDense);
        assert_eq!("dynamic_sparse".parse::<GraphTitle>().unwrap(), GraphTitle::DynamicSparse);
        assert!("sparse".parse::<GraphTitle>().is_err());
        for title in GraphTitle::ALL {
            assert_eq!(title.to_string().parse::<GraphTitle>().unwrap(), title);
        }
    }
}
