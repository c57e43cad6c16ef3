mod document;
mod load;

pub use document::{
    GlyphDocument, LinkRecord, NodeMetrics, NodeRecord, NodeStyle, ProjectInfo, ProjectMetrics,
    Relation,
};
pub use load::load_document;
