pub mod analysis;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod group;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod report;

pub use analysis::{ProcessAnalysis, analyze_process, analyze_process_with_config};
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{AnalysisConfig, Config, CycleBreaking, LayoutConfig, load_config};
pub use ir::{Edge, EdgeWeight, Graph, Node, NodeKind, Position, Rect};
pub use layout::{GraphLayout, apply_layout, compute_layout, compute_layout_with_config};
pub use parser::{GraphError, parse_graph};
