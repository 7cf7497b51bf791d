use common::plot::Plot;
use edge_series::EdgeSeries;
use serde::{Deserialize, Serialize};
use vertex_stats::VertexStats;

/// Every plot built into the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlotKind {
    VertexStats,
    EdgeSeries,
}

impl PlotKind {
    pub const ALL: [PlotKind; 2] = [PlotKind::VertexStats, PlotKind::EdgeSeries];

    pub fn build(&self) -> Box<dyn Plot> {
        match *self {
            PlotKind::VertexStats => Box::new(VertexStats),
            PlotKind::EdgeSeries => Box::new(EdgeSeries),
        }
    }

    pub fn name(&self) -> &'static str {
        self.build().name()
    }

    /// Crate names, for per-plugin log directives
    pub fn module(&self) -> &'static str {
        match *self {
            PlotKind::VertexStats => "vertex_stats",
            PlotKind::EdgeSeries => "edge_series",
        }
    }
}

/// Makes sure the plugins are linked in so typetag can find them when a
/// config file names them.
pub fn init_plots() {
    for kind in PlotKind::ALL {
        serde_json::to_string(&kind.build()).unwrap();
    }
}
