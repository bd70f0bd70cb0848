use crate::catalog::DashboardContext;
use crate::errors::DashboardError;
use crate::query::Projection;
use crate::utils::config::PageConfig;
use std::fmt::Write as _;

use super::{escape_html, NetworkGenerator, NetworkOptions};

pub const DEFAULT_TITLE: &str = "Hybrid GNN + LLM Movie Recommender";
pub const DEFAULT_ARCHITECTURE_IMAGE: &str =
    "https://miro.medium.com/v2/resize:fit:1400/1*_vRJg3OkKmI36xXrKJq_tA.png";
pub const KG_HINT: &str = "Make sure the knowledge graph and movie node files exist.";

const SUBTITLE: &str = "A knowledge-aware, explainable recommendation system using Graph Neural Networks and Semantic Embeddings.";
const RECS_INTRO: &str = "These recommendations are generated using a hybrid model that combines <strong>Graph Neural Networks (GNN)</strong> and <strong>Semantic Embeddings from a Language Model (LLM)</strong>.";
const WHY_FIRST: &str = "This movie is recommended because it is semantically and structurally similar to movies you've rated highly in the past.";
const HOW_IT_WORKS: &[(&str, &str)] = &[
    ("Knowledge Graph", "Built from MovieLens ratings + genres (User &rarr; Movie &rarr; Genre)."),
    ("GNN", "Learns structural preferences from user behavior."),
    ("LLM", "Encodes semantic meaning from movie descriptions (synthetic or DBpedia)."),
    ("Hybrid Fusion", "Combines both signals for better recommendations."),
    ("Explanation", "Uses semantic similarity to justify suggestions."),
];
const HOW_IT_WORKS_RESULT: &str = "26% higher accuracy than GNN or LLM alone.";

const STYLE: &str = r"
body { font-family: -apple-system, 'Segoe UI', Helvetica, Arial, sans-serif; margin: 0; color: #262730; }
.layout { display: flex; min-height: 100vh; }
.sidebar { width: 260px; background: #f0f2f6; padding: 1.5rem; box-sizing: border-box; }
.main { flex: 1; padding: 1.5rem 2.5rem; min-width: 0; }
.tabs > input { display: none; }
.tabs > label { display: inline-block; padding: 0.5rem 1rem; cursor: pointer; border-bottom: 2px solid transparent; }
.tabs > input:checked + label { border-bottom-color: #ff4b4b; color: #ff4b4b; }
.panel { display: none; padding-top: 1rem; border-top: 1px solid #e6e6e6; }
#tab-recs:checked ~ .panels #panel-recs,
#tab-kg:checked ~ .panels #panel-kg,
#tab-how:checked ~ .panels #panel-how { display: block; }
details { border: 1px solid #e6e6e6; border-radius: 4px; margin: 0.4rem 0; padding: 0.5rem 0.8rem; }
.info { background: #e8f0fe; border-radius: 4px; padding: 0.6rem 0.8rem; margin: 0.4rem 0; }
.warning { background: #fffce7; border-radius: 4px; padding: 0.6rem 0.8rem; }
.error { background: #ffeded; color: #7d1a1a; border-radius: 4px; padding: 0.6rem 0.8rem; margin: 0.4rem 0; }
figure img { max-width: 100%; }
";

// Networks mounted while their tab was hidden have a zero-sized canvas
const TAB_SCRIPT: &str = r"
<script>
document.getElementById('tab-kg').addEventListener('change', function() {
  var nets = window.kgNetworks || {};
  Object.keys(nets).forEach(function(k) { nets[k].redraw(); nets[k].fit(); });
});
</script>
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    pub title: String,
    pub architecture_image: String,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self { title: DEFAULT_TITLE.into(), architecture_image: DEFAULT_ARCHITECTURE_IMAGE.into() }
    }
}

impl PageOptions {
    pub fn apply_config(&mut self, cfg: &PageConfig) {
        if let Some(v) = &cfg.title {
            self.title.clone_from(v);
        }
        if let Some(v) = &cfg.architecture_image {
            self.architecture_image.clone_from(v);
        }
    }
}

/// Full dashboard document: a sidebar followed by the Recommendations, Knowledge Graph
/// and How It Works tabs.
#[derive(Debug, Default)]
pub struct DashboardPage {
    pub page: PageOptions,
    pub network: NetworkOptions,
}

impl DashboardPage {
    #[must_use]
    pub fn new(page: PageOptions, network: NetworkOptions) -> Self {
        Self { page, network }
    }

    /// Render the dashboard. A failed `graph` only affects the knowledge graph tab.
    #[must_use]
    pub fn render(
        &self,
        ctx: &DashboardContext,
        graph: &Result<Projection, DashboardError>,
    ) -> String {
        let mut s = String::new();
        s.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        s.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        let _ = writeln!(s, "<title>{}</title>", escape_html(&self.page.title));
        let _ = writeln!(s, "<style>{STYLE}</style>");
        let _ = writeln!(s, "<script src=\"{}\"></script>", escape_html(&self.network.script_url));
        s.push_str("</head>\n<body>\n<div class=\"layout\">\n");

        self.write_sidebar(&mut s, ctx);

        s.push_str("<main class=\"main\">\n");
        let _ = writeln!(s, "<h1>&#127916; {}</h1>", escape_html(&self.page.title));
        let _ = writeln!(s, "<p>{SUBTITLE}</p>");
        s.push_str("<div class=\"tabs\">\n");
        s.push_str("<input type=\"radio\" name=\"tabs\" id=\"tab-recs\" checked><label for=\"tab-recs\">Recommendations</label>\n");
        s.push_str("<input type=\"radio\" name=\"tabs\" id=\"tab-kg\"><label for=\"tab-kg\">Knowledge Graph</label>\n");
        s.push_str("<input type=\"radio\" name=\"tabs\" id=\"tab-how\"><label for=\"tab-how\">How It Works</label>\n");
        s.push_str("<div class=\"panels\">\n");
        self.write_recommendations(&mut s, ctx);
        self.write_knowledge_graph(&mut s, graph);
        self.write_how_it_works(&mut s);
        s.push_str("</div>\n</div>\n</main>\n</div>\n");
        s.push_str(TAB_SCRIPT);
        s.push_str("</body>\n</html>\n");
        s
    }

    #[allow(clippy::unused_self)]
    fn write_sidebar(&self, out: &mut String, ctx: &DashboardContext) {
        out.push_str("<aside class=\"sidebar\">\n<h2>System Overview</h2>\n<ul>\n");
        let _ = writeln!(
            out,
            "<li><strong>User</strong>: {}</li>",
            escape_html(&ctx.recommendations.user_id)
        );
        let _ = writeln!(
            out,
            "<li><strong>Hybrid Precision@10</strong>: {:.3}</li>",
            ctx.evaluation.mean_hybrid
        );
        let _ = writeln!(
            out,
            "<li><strong>GNN Precision@10</strong>: {:.3}</li>",
            ctx.evaluation.mean_gcn
        );
        out.push_str("</ul>\n</aside>\n");
    }

    #[allow(clippy::unused_self)]
    fn write_recommendations(&self, out: &mut String, ctx: &DashboardContext) {
        let recs = &ctx.recommendations;
        out.push_str("<section class=\"panel\" id=\"panel-recs\">\n");
        let _ = writeln!(
            out,
            "<h2>&#127916; Recommendations for {}</h2>",
            escape_html(&recs.user_id)
        );
        let _ = writeln!(out, "<p>{RECS_INTRO}</p>");
        if recs.recommendations.is_empty() {
            out.push_str("<div class=\"warning\">No recommendations available.</div>\n");
        }
        for (rank, movie, description) in recs.ranked() {
            let _ = writeln!(
                out,
                "<details>\n<summary><strong>{rank}. {}</strong></summary>\n<p><strong>Plot / Description</strong>: {}</p>",
                escape_html(movie),
                escape_html(description)
            );
            if rank == 1 {
                let _ = writeln!(
                    out,
                    "<div class=\"info\">&#128161; <strong>Why this recommendation?</strong> {WHY_FIRST}</div>"
                );
            }
            out.push_str("</details>\n");
        }
        out.push_str("</section>\n");
    }

    fn write_knowledge_graph(&self, out: &mut String, graph: &Result<Projection, DashboardError>) {
        out.push_str("<section class=\"panel\" id=\"panel-kg\">\n");
        out.push_str("<h2>Knowledge Graph (User-Movie-Genre)</h2>\n");
        let rendered = graph.as_ref().map_err(ToString::to_string).and_then(|p| {
            NetworkGenerator::new()
                .generate_fragment(p, &self.network, "kg-network")
                .map(|fragment| (p, fragment))
                .map_err(|e| e.to_string())
        });
        match rendered {
            Ok((projection, fragment)) => {
                let _ = writeln!(
                    out,
                    "<p>Interactive subgraph centered on {} and their interactions.</p>",
                    escape_html(&projection.center)
                );
                if projection.center_substituted {
                    out.push_str("<div class=\"info\">The requested center node is not in the graph; showing the first node by key instead.</div>\n");
                }
                out.push_str(&fragment);
            }
            Err(message) => {
                tracing::warn!(error = %message, "knowledge graph panel unavailable");
                let _ = writeln!(
                    out,
                    "<div class=\"error\">Could not load KG: {}</div>\n<div class=\"info\">{KG_HINT}</div>",
                    escape_html(&message)
                );
            }
        }
        out.push_str("</section>\n");
    }

    fn write_how_it_works(&self, out: &mut String) {
        out.push_str("<section class=\"panel\" id=\"panel-how\">\n<h2>How It Works</h2>\n<ol>\n");
        for (name, text) in HOW_IT_WORKS {
            let _ = writeln!(out, "<li><strong>{name}</strong>: {text}</li>");
        }
        let _ = writeln!(out, "</ol>\n<p><strong>Result</strong>: {HOW_IT_WORKS_RESULT}</p>");
        let _ = writeln!(
            out,
            "<figure><img src=\"{}\" alt=\"Hybrid GNN + LLM Architecture\"><figcaption>Hybrid GNN + LLM Architecture</figcaption></figure>",
            escape_html(&self.page.architecture_image)
        );
        out.push_str("</section>\n");
    }
}
