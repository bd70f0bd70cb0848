use crate::errors::DashboardError;
use crate::query::Projection;
use crate::utils::config::NetworkConfig;
use crate::utils::json::to_script_json;
use serde_json::{json, Value};
use std::fmt::Write as _;

use super::escape_html;

pub const DEFAULT_SCRIPT_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/vis-network/9.1.2/dist/vis-network.min.js";

/// Appearance and physics parameters for the vis-network widget.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkOptions {
    pub height: String,
    pub width: String,
    pub background: String,
    pub font_color: String,
    pub font_size: u32,
    pub edge_color: String,
    pub physics: bool,
    pub stabilization_iterations: u32,
    pub update_interval: u32,
    pub min_velocity: f64,
    pub simulation_duration: u32,
    pub script_url: String,
}

impl Default for NetworkOptions {
    fn default() -> Self {
        Self {
            height: "600px".into(),
            width: "100%".into(),
            background: "#ffffff".into(),
            font_color: "#000000".into(),
            font_size: 12,
            edge_color: "#888888".into(),
            physics: true,
            stabilization_iterations: 100,
            update_interval: 25,
            min_velocity: 0.75,
            simulation_duration: 1500,
            script_url: DEFAULT_SCRIPT_URL.into(),
        }
    }
}

impl NetworkOptions {
    /// Overlay the fields set in a `[network]` config section.
    pub fn apply_config(&mut self, cfg: &NetworkConfig) {
        if let Some(v) = &cfg.height {
            self.height.clone_from(v);
        }
        if let Some(v) = &cfg.width {
            self.width.clone_from(v);
        }
        if let Some(v) = &cfg.background {
            self.background.clone_from(v);
        }
        if let Some(v) = &cfg.font_color {
            self.font_color.clone_from(v);
        }
        if let Some(v) = cfg.font_size {
            self.font_size = v;
        }
        if let Some(v) = &cfg.edge_color {
            self.edge_color.clone_from(v);
        }
        if let Some(v) = cfg.physics {
            self.physics = v;
        }
        if let Some(v) = cfg.stabilization_iterations {
            self.stabilization_iterations = v;
        }
        if let Some(v) = cfg.update_interval {
            self.update_interval = v;
        }
        if let Some(v) = cfg.min_velocity {
            self.min_velocity = v;
        }
        if let Some(v) = cfg.simulation_duration {
            self.simulation_duration = v;
        }
        if let Some(v) = &cfg.script_url {
            self.script_url.clone_from(v);
        }
    }

    fn widget_options(&self) -> Value {
        json!({
            "physics": {
                "enabled": self.physics,
                "stabilization": {
                    "iterations": self.stabilization_iterations,
                    "updateInterval": self.update_interval,
                },
                "minVelocity": self.min_velocity,
                "simulationDuration": self.simulation_duration,
            },
            "edges": {
                "arrows": { "to": { "enabled": true } },
                "color": self.edge_color,
            },
            "nodes": {
                "font": { "size": self.font_size, "color": self.font_color },
            },
        })
    }
}

#[derive(Debug, Default)]
pub struct NetworkGenerator;

impl NetworkGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }

    /// vis-network `{nodes, edges}` data for a projection.
    #[must_use]
    pub fn widget_data(&self, projection: &Projection) -> Value {
        let nodes: Vec<Value> = projection
            .nodes
            .iter()
            .map(|n| {
                json!({
                    "id": n.id,
                    "label": n.label,
                    "color": n.category.color(),
                    "title": n.category.title(),
                    "group": n.category,
                })
            })
            .collect();
        let edges: Vec<Value> = projection
            .edges
            .iter()
            .map(|e| json!({ "from": e.from, "to": e.to, "label": e.label, "title": e.label }))
            .collect();
        json!({ "nodes": nodes, "edges": edges })
    }

    /// Container element plus the script that mounts the network into it.
    /// The vis-network library itself must already be loaded on the page.
    ///
    /// # Errors
    /// Returns `DashboardError::Visualization` if the widget data cannot be encoded.
    pub fn generate_fragment(
        &self,
        projection: &Projection,
        opts: &NetworkOptions,
        container_id: &str,
    ) -> Result<String, DashboardError> {
        let data = to_script_json(&self.widget_data(projection))?;
        let options = to_script_json(&opts.widget_options())?;
        let id = escape_html(container_id);
        let mut s = String::new();
        let _ = writeln!(
            s,
            "<div id=\"{id}\" class=\"kg-network\" style=\"height: {}; width: {}; background-color: {}; border: 1px solid #e6e6e6;\"></div>",
            escape_html(&opts.height),
            escape_html(&opts.width),
            escape_html(&opts.background),
        );
        let _ = writeln!(
            s,
            "<script>\n(function() {{\n  var data = {data};\n  var options = {options};\n  var container = document.getElementById({});\n  var network = new vis.Network(container, {{ nodes: new vis.DataSet(data.nodes), edges: new vis.DataSet(data.edges) }}, options);\n  window.kgNetworks = window.kgNetworks || {{}};\n  window.kgNetworks[container.id] = network;\n}})();\n</script>",
            to_script_json(&container_id)?,
        );
        Ok(s)
    }

    /// Standalone HTML document containing only the network.
    ///
    /// # Errors
    /// Returns `DashboardError::Visualization` if the widget data cannot be encoded.
    pub fn generate_document(
        &self,
        projection: &Projection,
        opts: &NetworkOptions,
    ) -> Result<String, DashboardError> {
        let fragment = self.generate_fragment(projection, opts, "kg-network")?;
        let mut s = String::new();
        s.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(s, "<title>Knowledge Graph: {}</title>", escape_html(&projection.center));
        let _ = writeln!(s, "<script src=\"{}\"></script>", escape_html(&opts.script_url));
        s.push_str("</head>\n<body>\n");
        s.push_str(&fragment);
        s.push_str("</body>\n</html>\n");
        Ok(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::category::NodeCategory;
    use crate::query::{ProjectedEdge, ProjectedNode};

    fn projection() -> Projection {
        Projection {
            center: "User_1".into(),
            center_substituted: false,
            nodes: vec![
                ProjectedNode {
                    id: "User_1".into(),
                    label: "User_1".into(),
                    category: NodeCategory::User,
                },
                ProjectedNode {
                    id: "</script>".into(),
                    label: "</script>".into(),
                    category: NodeCategory::Movie,
                },
            ],
            edges: vec![ProjectedEdge {
                from: "User_1".into(),
                to: "</script>".into(),
                label: "rated".into(),
            }],
        }
    }

    #[test]
    fn widget_data_carries_category_colors_and_edge_labels() {
        let data = NetworkGenerator::new().widget_data(&projection());
        assert_eq!(data["nodes"][0]["color"], "#FFA500");
        assert_eq!(data["nodes"][0]["title"], "User");
        assert_eq!(data["nodes"][1]["color"], "#4682B4");
        assert_eq!(data["nodes"][1]["group"], "movie");
        assert_eq!(data["edges"][0]["label"], "rated");
        assert_eq!(data["edges"][0]["title"], "rated");
    }

    #[test]
    fn widget_options_match_defaults() {
        let o = NetworkOptions::default().widget_options();
        assert_eq!(o["physics"]["stabilization"]["iterations"], 100);
        assert_eq!(o["physics"]["stabilization"]["updateInterval"], 25);
        assert_eq!(o["physics"]["minVelocity"], 0.75);
        assert_eq!(o["physics"]["simulationDuration"], 1500);
        assert_eq!(o["edges"]["arrows"]["to"]["enabled"], true);
        assert_eq!(o["edges"]["color"], "#888888");
        assert_eq!(o["nodes"]["font"]["size"], 12);
    }

    #[test]
    fn document_is_self_contained_and_script_safe() {
        let html = NetworkGenerator::new()
            .generate_document(&projection(), &NetworkOptions::default())
            .unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(DEFAULT_SCRIPT_URL));
        assert!(html.contains("new vis.Network"));
        assert!(html.contains("height: 600px"));
        // Only the closing tags we emit ourselves
        assert_eq!(html.matches("</script>").count(), 2);
    }

    #[test]
    fn config_overrides_selected_fields() {
        let mut opts = NetworkOptions::default();
        let cfg = NetworkConfig {
            height: Some("800px".into()),
            width: Some("80%".into()),
            stabilization_iterations: Some(250),
            physics: Some(false),
            ..Default::default()
        };
        opts.apply_config(&cfg);
        assert_eq!(opts.height, "800px");
        assert_eq!(opts.width, "80%");
        assert_eq!(opts.stabilization_iterations, 250);
        assert!(!opts.physics);
        assert_eq!(opts.update_interval, 25);
    }
}
