use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_NODE_WIDTH: f32 = 280.0;
pub const DEFAULT_NODE_HEIGHT: f32 = 120.0;
pub const HORIZONTAL_SPACING: f32 = 150.0;
pub const VERTICAL_SPACING: f32 = 80.0;
pub const LEVEL_PADDING: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CycleBreaking {
    /// Detect and break cycles until the leveling graph is acyclic.
    #[default]
    FixedPoint,
    /// A single detection pass; anything left over is handled by the
    /// iteration caps and the trailing-column fallback.
    SinglePass,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub default_node_width: f32,
    pub default_node_height: f32,
    pub horizontal_spacing: f32,
    pub vertical_spacing: f32,
    pub level_padding: f32,
    pub cycle_breaking: CycleBreaking,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_node_width: DEFAULT_NODE_WIDTH,
            default_node_height: DEFAULT_NODE_HEIGHT,
            horizontal_spacing: HORIZONTAL_SPACING,
            vertical_spacing: VERTICAL_SPACING,
            level_padding: LEVEL_PADDING,
            cycle_breaking: CycleBreaking::FixedPoint,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisConfig {
    pub high_penalty: i32,
    pub medium_penalty: i32,
    pub low_penalty: i32,
    /// Resource planning is expected once there are more actions than this.
    pub resource_action_threshold: usize,
    pub stakeholder_action_threshold: usize,
    /// Compared against action + goal count.
    pub data_prep_threshold: usize,
    pub iteration_threshold: usize,
    pub unlabeled_edge_threshold: usize,
    pub grouping_node_threshold: usize,
    /// How far left of its source a target must sit to read as a feedback edge.
    pub backward_edge_distance: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            high_penalty: 20,
            medium_penalty: 10,
            low_penalty: 5,
            resource_action_threshold: 2,
            stakeholder_action_threshold: 3,
            data_prep_threshold: 5,
            iteration_threshold: 4,
            unlabeled_edge_threshold: 2,
            grouping_node_threshold: 8,
            backward_edge_distance: 100.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub layout: LayoutConfig,
    pub analysis: AnalysisConfig,
}

/// Loads a JSON5 config file. Missing keys keep their defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)?;
    let config = parse_config(&contents)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = json5::from_str(contents)?;
    Ok(config)
}
