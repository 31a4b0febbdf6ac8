use crate::ir::{Graph, Position};
use crate::layout::GraphLayout;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub origin: [f32; 2],
    pub level_count: usize,
    pub capped: bool,
    pub bounds: Option<[f32; 4]>,
    pub nodes: Vec<NodeDump>,
    pub removed_edges: Vec<[String; 2]>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDump {
    pub id: String,
    pub kind: String,
    pub level: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutDump {
    /// Nodes are listed in the graph's input order.
    pub fn from_layout(layout: &GraphLayout, graph: &Graph) -> Self {
        let mut nodes = Vec::with_capacity(layout.nodes.len());
        for node in &graph.nodes {
            let Some(placed) = layout.nodes.get(&node.id) else {
                continue;
            };
            if nodes.iter().any(|dumped: &NodeDump| dumped.id == node.id) {
                continue;
            }
            nodes.push(NodeDump {
                id: placed.id.clone(),
                kind: node.kind.as_str().to_string(),
                level: placed.level,
                x: placed.x,
                y: placed.y,
                width: placed.width,
                height: placed.height,
            });
        }

        LayoutDump {
            origin: [layout.origin.x, layout.origin.y],
            level_count: layout.level_count,
            capped: layout.capped,
            bounds: layout
                .bounds()
                .map(|rect| [rect.x, rect.y, rect.width, rect.height]),
            nodes,
            removed_edges: layout
                .removed_edges
                .iter()
                .map(|(from, to)| [from.clone(), to.clone()])
                .collect(),
        }
    }
}

pub fn positions_json(positions: &BTreeMap<String, Position>) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(positions)?)
}

pub fn write_layout_dump(path: &Path, layout: &GraphLayout, graph: &Graph) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout, graph);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
