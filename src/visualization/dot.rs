use crate::errors::DashboardError;
use crate::graph::category::NodeCategory;
use crate::query::Projection;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankDir {
    LR,
    TB,
}

#[derive(Debug, Clone, Copy)]
pub struct DotOptions {
    pub legend: bool,
    pub rankdir: RankDir,
}

impl Default for DotOptions {
    fn default() -> Self {
        Self { legend: true, rankdir: RankDir::LR }
    }
}

#[derive(Debug, Default)]
pub struct DotGenerator;

impl DotGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }

    /// Generate DOT with default options.
    ///
    /// # Errors
    /// Returns a `DashboardError` if DOT generation fails for any reason.
    pub fn generate_dot(&self, projection: &Projection) -> Result<String, DashboardError> {
        self.generate_dot_with_options(projection, DotOptions::default())
    }

    /// Generate DOT with the given `opts`.
    ///
    /// # Errors
    /// Returns a `DashboardError` if DOT generation fails for any reason.
    pub fn generate_dot_with_options(
        &self,
        projection: &Projection,
        opts: DotOptions,
    ) -> Result<String, DashboardError> {
        let mut s = String::new();
        s.push_str("digraph KnowledgeGraph\n{\n");
        let rank = match opts.rankdir {
            RankDir::LR => "LR",
            RankDir::TB => "TB",
        };
        let _ = write!(
            s,
            "  rankdir={rank};\n  graph [fontname=Helvetica] ;\n  node [shape=ellipse, fontsize=10, style=filled] ;\n  edge [fontname=Helvetica, fontsize=9, color=\"#888888\"];\n"
        );

        for node in &projection.nodes {
            let _ = writeln!(
                s,
                "  \"{}\" [label=\"{}\", fillcolor=\"{}\", shape=\"{}\", tooltip=\"{}\"];",
                escape_label(&node.id),
                escape_label(&node.label),
                node.category.color(),
                shape_for(node.category),
                node.category.title()
            );
        }

        for edge in &projection.edges {
            let _ = writeln!(
                s,
                "  \"{}\" -> \"{}\" [label=\"{}\"];",
                escape_label(&edge.from),
                escape_label(&edge.to),
                escape_label(&edge.label)
            );
        }

        if opts.legend {
            s.push_str("  subgraph cluster_legend {\n    label=\"Legend\";\n    color=grey;\n");
            for category in NodeCategory::ALL {
                let _ = writeln!(
                    s,
                    "    \"legend_{category}\" [label=\"{}\", fillcolor=\"{}\", shape=\"{}\"];",
                    category.title(),
                    category.color(),
                    shape_for(category)
                );
            }
            s.push_str("  }\n");
        }

        s.push_str("}\n");
        Ok(s)
    }
}

fn escape_label(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn shape_for(category: NodeCategory) -> &'static str {
    match category {
        NodeCategory::User => "box",
        NodeCategory::Movie => "ellipse",
        NodeCategory::Genre => "hexagon",
    }
}
