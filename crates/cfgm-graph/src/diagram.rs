use std::fmt::Display;

use cfgm_core::{Edge, NodeKey};

use crate::codec::edge_list_to_weighted;

/// Layout options for [`render_diagram`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagramOptions {
    /// Lay the diagram out left to right.
    pub horizontal: bool,
}

/// Renders an edge multiset as a D2 diagram.
///
/// One line per distinct unordered pair, in first-occurrence order and
/// first-seen orientation. Pairs seen more than once carry their count.
pub fn render_diagram<K>(edges: &[Edge<K>], options: DiagramOptions) -> String
where
    K: NodeKey + Display,
{
    let mut out = String::new();
    if options.horizontal {
        out.push_str("direction: right\n\n");
    }
    for edge in edge_list_to_weighted(edges).edges() {
        if edge.weight == 1 {
            out.push_str(&format!("{} -- {}\n", edge.source, edge.target));
        } else {
            out.push_str(&format!(
                "{} -- {} : {} {{style: {{font-size: 24; bold: true}}}}\n",
                edge.source, edge.target, edge.weight
            ));
        }
    }
    out
}
