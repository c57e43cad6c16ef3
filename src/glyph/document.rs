use serde::Deserialize;

/// Categorical link tag. Styling only; the simulation never reads it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Contains,
    Imports,
    Calls,
    #[default]
    #[serde(other)]
    Other,
}

impl Relation {
    pub fn label(self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::Imports => "imports",
            Self::Calls => "calls",
            Self::Other => "other",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetrics {
    #[serde(default)]
    pub total_files: u64,
    #[serde(default, rename = "totalLOC")]
    pub total_loc: u64,
    #[serde(default)]
    pub average_complexity: f64,
    #[serde(default)]
    pub dependencies: u64,
    #[serde(default)]
    pub functions: u64,
    #[serde(default)]
    pub classes: u64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ProjectInfo {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub metrics: ProjectMetrics,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct NodeMetrics {
    #[serde(default)]
    pub loc: u64,
    #[serde(default)]
    pub complexity: f64,
    #[serde(default)]
    pub imports: u64,
    #[serde(default)]
    pub functions: u64,
    #[serde(default)]
    pub classes: u64,
    #[serde(default)]
    pub calls: u64,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NodeStyle {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub size: Option<f32>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub metrics: NodeMetrics,
    #[serde(default)]
    pub style: NodeStyle,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LinkRecord {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub relation: Relation,
}

/// Full graph export as produced by the analysis engine: one project
/// summary, an ordered node collection, an ordered link collection.
#[derive(Clone, Debug, Deserialize)]
pub struct GlyphDocument {
    pub project: ProjectInfo,
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub links: Vec<LinkRecord>,
}

impl GlyphDocument {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}
