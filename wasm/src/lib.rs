use plangraph::ir::Position;
use plangraph::{AnalysisConfig, LayoutConfig, analyze_process_with_config, compute_layout_with_config};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutOptions {
    origin_x: Option<f32>,
    origin_y: Option<f32>,
    vertical_spacing: Option<f32>,
    horizontal_spacing: Option<f32>,
}

fn build_layout_options(options: &LayoutOptions) -> (Position, LayoutConfig) {
    let origin = Position::new(options.origin_x.unwrap_or(0.0), options.origin_y.unwrap_or(0.0));
    let mut config = LayoutConfig::default();
    if let Some(spacing) = options.vertical_spacing {
        config.vertical_spacing = spacing;
    }
    if let Some(spacing) = options.horizontal_spacing {
        config.horizontal_spacing = spacing;
    }
    (origin, config)
}

fn parse_options<T: Default + for<'de> Deserialize<'de>>(raw: Option<String>) -> Result<T, String> {
    match raw {
        Some(raw) => serde_json::from_str::<T>(&raw).map_err(|error| error.to_string()),
        None => Ok(T::default()),
    }
}

fn layout_json(graph_json: &str, options: LayoutOptions) -> Result<String, String> {
    let graph = plangraph::parse_graph(graph_json)
        .map_err(|error| error.to_string())?
        .graph;
    let (origin, config) = build_layout_options(&options);
    let layout = compute_layout_with_config(&graph.nodes, &graph.edges, origin, &config);
    serde_json::to_string(&layout.positions()).map_err(|error| error.to_string())
}

fn analyze_json(graph_json: &str) -> Result<String, String> {
    let graph = plangraph::parse_graph(graph_json)
        .map_err(|error| error.to_string())?
        .graph;
    let analysis = analyze_process_with_config(&graph.nodes, &graph.edges, &AnalysisConfig::default());
    serde_json::to_string(&analysis).map_err(|error| error.to_string())
}

/// Returns `{ [nodeId]: { x, y } }` for the editor to apply.
#[wasm_bindgen]
pub fn layout_graph_json(graph_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = parse_options::<LayoutOptions>(options_json).map_err(|e| JsValue::from_str(&e))?;
    layout_json(graph_json, options).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen]
pub fn analyze_graph_json(graph_json: &str) -> Result<String, JsValue> {
    analyze_json(graph_json).map_err(|e| JsValue::from_str(&e))
}
