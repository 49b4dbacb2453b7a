//! Architecture diagram generation (draw.io / mxGraph XML)
//!
//! Layout is fixed: the application sits at a fixed anchor, every dependency
//! sits on one row below it, spaced evenly left to right in edge order.
//! Identifiers 0 and 1 are the mxGraph root and default layer, the
//! application is 2, and the i-th dependency node and its edge take
//! `3 + 2i` and `4 + 2i`.

use crate::detection::DependencyEdge;
use serde::Serialize;
use tracing::info;

pub const PAGE_WIDTH: u32 = 850;
pub const PAGE_HEIGHT: u32 = 1100;

pub const PRIMARY_X: i64 = 350;
pub const PRIMARY_Y: i64 = 100;
pub const PRIMARY_WIDTH: u32 = 120;
pub const PRIMARY_HEIGHT: u32 = 60;

pub const DEPENDENCY_Y: i64 = 300;
pub const DEPENDENCY_START_X: i64 = 150;
pub const DEPENDENCY_SPACING: i64 = 200;
pub const DEPENDENCY_SIZE: u32 = 80;

const ROOT_CELL_ID: u32 = 0;
const LAYER_CELL_ID: u32 = 1;
pub const PRIMARY_NODE_ID: u32 = 2;

const PRIMARY_STYLE: &str = "rounded=1;whiteSpace=wrap;html=1;fillColor=#dae8fc;strokeColor=#6c8ebf;";
const DEPENDENCY_STYLE: &str =
    "ellipse;whiteSpace=wrap;html=1;aspect=fixed;fillColor=#d5e8d4;strokeColor=#82b366;";
const EDGE_STYLE: &str = "edgeStyle=orthogonalEdgeStyle;rounded=0;orthogonalLoop=1;jettySize=auto;html=1;endArrow=classic;endFill=1;";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Geometry {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Application,
    Dependency,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagramNode {
    pub id: u32,
    pub label: String,
    pub kind: NodeKind,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagramEdge {
    pub id: u32,
    pub source: u32,
    pub target: u32,
}

/// Positioned nodes and edges; `nodes[0]` is always the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagramModel {
    pub page_width: u32,
    pub page_height: u32,
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
}

impl DiagramModel {
    pub fn dependency_nodes(&self) -> impl Iterator<Item = &DiagramNode> {
        self.nodes.iter().filter(|n| n.kind == NodeKind::Dependency)
    }
}

pub fn dependency_node_id(index: usize) -> u32 {
    3 + 2 * index as u32
}

pub fn dependency_edge_id(index: usize) -> u32 {
    4 + 2 * index as u32
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DiagramGenerator;

impl DiagramGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Lays out one node per edge, in the order given.
    pub fn build(&self, application: &str, edges: &[DependencyEdge]) -> DiagramModel {
        let mut nodes = Vec::with_capacity(edges.len() + 1);
        let mut links = Vec::with_capacity(edges.len());

        nodes.push(DiagramNode {
            id: PRIMARY_NODE_ID,
            label: application.to_string(),
            kind: NodeKind::Application,
            geometry: Geometry {
                x: PRIMARY_X,
                y: PRIMARY_Y,
                width: PRIMARY_WIDTH,
                height: PRIMARY_HEIGHT,
            },
        });

        for (index, edge) in edges.iter().enumerate() {
            let node_id = dependency_node_id(index);
            nodes.push(DiagramNode {
                id: node_id,
                label: edge.to_service.clone(),
                kind: NodeKind::Dependency,
                geometry: Geometry {
                    x: DEPENDENCY_START_X + index as i64 * DEPENDENCY_SPACING,
                    y: DEPENDENCY_Y,
                    width: DEPENDENCY_SIZE,
                    height: DEPENDENCY_SIZE,
                },
            });
            links.push(DiagramEdge {
                id: dependency_edge_id(index),
                source: PRIMARY_NODE_ID,
                target: node_id,
            });
        }

        DiagramModel {
            page_width: PAGE_WIDTH,
            page_height: PAGE_HEIGHT,
            nodes,
            edges: links,
        }
    }

    pub fn render(&self, model: &DiagramModel) -> String {
        render_document(model)
    }

    pub fn generate(&self, application: &str, edges: &[DependencyEdge]) -> String {
        let model = self.build(application, edges);
        info!(
            application,
            nodes = model.nodes.len(),
            edges = model.edges.len(),
            "Built architecture diagram"
        );
        self.render(&model)
    }
}

fn render_document(model: &DiagramModel) -> String {
    let mut lines = vec![
        r#"<mxfile host="svcmap" agent="svcmap" version="22.0.8" type="device">"#.to_string(),
        r#"  <diagram name="Architecture" id="diagram-id-1">"#.to_string(),
        format!(
            r#"    <mxGraphModel dx="1434" dy="782" grid="1" gridSize="10" guides="1" tooltips="1" connect="1" arrows="1" fold="1" page="1" pageScale="1" pageWidth="{}" pageHeight="{}" math="0" shadow="0">"#,
            model.page_width, model.page_height
        ),
        "      <root>".to_string(),
        format!(r#"        <mxCell id="{}" />"#, ROOT_CELL_ID),
        format!(
            r#"        <mxCell id="{}" parent="{}" />"#,
            LAYER_CELL_ID, ROOT_CELL_ID
        ),
    ];

    let mut edges = model.edges.iter();
    for node in &model.nodes {
        lines.extend(node_lines(node));
        if node.kind == NodeKind::Dependency {
            if let Some(edge) = edges.next() {
                lines.extend(edge_lines(edge));
            }
        }
    }
    for edge in edges {
        lines.extend(edge_lines(edge));
    }

    lines.extend(
        ["      </root>", "    </mxGraphModel>", "  </diagram>", "</mxfile>"]
            .into_iter()
            .map(String::from),
    );

    let mut document = lines.join("\n");
    document.push('\n');
    document
}

fn node_lines(node: &DiagramNode) -> [String; 3] {
    let style = match node.kind {
        NodeKind::Application => PRIMARY_STYLE,
        NodeKind::Dependency => DEPENDENCY_STYLE,
    };
    [
        format!(
            r#"        <mxCell id="{}" value="{}" style="{}" vertex="1" parent="{}">"#,
            node.id,
            escape_xml(&node.label),
            style,
            LAYER_CELL_ID
        ),
        format!(
            r#"          <mxGeometry x="{}" y="{}" width="{}" height="{}" as="geometry" />"#,
            node.geometry.x, node.geometry.y, node.geometry.width, node.geometry.height
        ),
        "        </mxCell>".to_string(),
    ]
}

fn edge_lines(edge: &DiagramEdge) -> [String; 3] {
    [
        format!(
            r#"        <mxCell id="{}" style="{}" edge="1" parent="{}" source="{}" target="{}">"#,
            edge.id, EDGE_STYLE, LAYER_CELL_ID, edge.source, edge.target
        ),
        r#"          <mxGeometry relative="1" as="geometry" />"#.to_string(),
        "        </mxCell>".to_string(),
    ]
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
