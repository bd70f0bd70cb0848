use crate::catalog::{
    DashboardContext, InputPaths, MovieNodeSet, RecommendationRecord, DEFAULT_EVALUATION_FILE,
    DEFAULT_GRAPH_FILE, DEFAULT_MOVIES_FILE, DEFAULT_RECOMMENDATIONS_FILE,
};
use crate::cli::{Cli, Commands, FallbackArg, InputArgs, OutputFormat, ProjectionArgs, RankDirArg};
use crate::errors::DashboardError;
use crate::graph::KnowledgeGraph;
use crate::query::{CenterFallback, NeighborhoodQuery, Projection, Query};
use crate::utils::config::{self, Config};
use crate::visualization::{
    DashboardPage, DotGenerator, DotOptions, NetworkGenerator, NetworkOptions, PageOptions,
    RankDir,
};
use clap::CommandFactory;
use clap_complete::generate;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT: &str = "dashboard.html";

/// Input locations and configuration resolved from flags, config file, and defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: Config,
    pub paths: InputPaths,
}

impl Settings {
    /// Resolve settings. Flags win over the config file, which wins over defaults.
    ///
    /// The config file is `--config` when given, else `movie-kg-dashboard.toml`
    /// inside the data directory. Relative input paths from the config are
    /// taken relative to the data directory.
    #[must_use]
    pub fn resolve(args: &InputArgs) -> Self {
        let probe_dir = args.data_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        let config = match &args.config {
            Some(p) => config::load_config_at(p),
            None => config::load_config_near(&probe_dir),
        }
        .unwrap_or_default();

        let inputs = config.inputs.clone().unwrap_or_default();
        let data_dir = args
            .data_dir
            .clone()
            .or_else(|| inputs.data_dir.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));
        let pick = |flag: &Option<PathBuf>, cfg: &Option<String>, default: &str| -> PathBuf {
            match (flag, cfg) {
                (Some(p), _) => p.clone(),
                (None, Some(c)) => data_dir.join(c),
                (None, None) => data_dir.join(default),
            }
        };
        let paths = InputPaths {
            recommendations: pick(
                &args.recommendations,
                &inputs.recommendations,
                DEFAULT_RECOMMENDATIONS_FILE,
            ),
            evaluation: pick(&args.evaluation, &inputs.evaluation, DEFAULT_EVALUATION_FILE),
            graph: pick(&args.graph, &inputs.graph, DEFAULT_GRAPH_FILE),
            movies: pick(&args.movies, &inputs.movies, DEFAULT_MOVIES_FILE),
        };
        tracing::debug!(?paths, "resolved input paths");
        Self { config, paths }
    }

    fn output_format(&self, flag: Option<OutputFormat>) -> OutputFormat {
        if let Some(f) = flag {
            return f;
        }
        match self.config.output.as_ref().and_then(|o| o.default_format.as_deref()) {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }

    fn network_options(&self) -> NetworkOptions {
        let mut opts = NetworkOptions::default();
        if let Some(cfg) = &self.config.network {
            opts.apply_config(cfg);
        }
        opts
    }

    fn page_options(&self) -> PageOptions {
        let mut opts = PageOptions::default();
        if let Some(cfg) = &self.config.page {
            opts.apply_config(cfg);
        }
        opts
    }

    /// Build the neighborhood query from flags over config over defaults.
    #[must_use]
    pub fn neighborhood_query<'a>(
        &self,
        args: &ProjectionArgs,
        movies: &'a MovieNodeSet,
    ) -> NeighborhoodQuery<'a> {
        let cfg = self.config.projection.clone().unwrap_or_default();
        let mut q = NeighborhoodQuery::new(movies);
        if let Some(v) = args.center.clone().or(cfg.center) {
            q.center = v;
        }
        if let Some(v) = args.first_hop.clone().or(cfg.first_hop) {
            q.first_hop = v;
        }
        if let Some(v) = args.second_hop.clone().or(cfg.second_hop) {
            q.second_hop = v;
        }
        if let Some(v) = cfg.user_prefix {
            q.user_prefix = v;
        }
        if let Some(v) = args.label_max.or(cfg.label_max) {
            q.label_max = v;
        }
        q.fallback = match (args.fallback, cfg.fallback.as_deref()) {
            (Some(FallbackArg::Fail), _) => CenterFallback::Fail,
            (Some(FallbackArg::Smallest), _) => CenterFallback::Smallest,
            (None, Some("fail")) => CenterFallback::Fail,
            (None, Some("smallest") | None) => CenterFallback::Smallest,
            (None, Some(other)) => {
                tracing::warn!(
                    value = other,
                    "unknown projection.fallback in config; using smallest"
                );
                CenterFallback::Smallest
            }
        };
        q
    }

    /// Load the graph inputs and project the neighborhood.
    ///
    /// # Errors
    /// Any load or projection failure; the dashboard shows these inline.
    pub fn project(&self, args: &ProjectionArgs) -> Result<Projection, DashboardError> {
        let graph = KnowledgeGraph::load_json(&self.paths.graph)?;
        let movies = MovieNodeSet::load_json(&self.paths.movies)?;
        self.neighborhood_query(args, &movies).run(&graph)
    }
}

/// Run the CLI logic in-process.
///
/// Returns an exit code (0 = success).
#[must_use]
pub fn run_cli(cli: Cli) -> i32 {
    let quiet = cli.quiet;
    let result = match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = crate::cli::Cli::command();
            let bin_name = env!("CARGO_PKG_NAME");
            let mut out = io::stdout();
            generate(shell, &mut cmd, bin_name, &mut out);
            Ok(())
        }
        Commands::Render { inputs, projection, out, dot, json } => {
            let settings = Settings::resolve(&inputs);
            render_dashboard(&settings, &projection, out, dot.as_deref(), json.as_deref(), quiet)
        }
        Commands::Neighborhood { inputs, projection, format, html, dot, no_legend, rankdir } => {
            let settings = Settings::resolve(&inputs);
            let dot_opts = DotOptions {
                legend: !no_legend,
                rankdir: match rankdir {
                    RankDirArg::LR => RankDir::LR,
                    RankDirArg::TB => RankDir::TB,
                },
            };
            print_neighborhood(
                &settings,
                &projection,
                format,
                html.as_deref(),
                dot.as_deref(),
                dot_opts,
            )
        }
        Commands::Recommendations { inputs, format } => {
            let settings = Settings::resolve(&inputs);
            print_recommendations(&settings, format)
        }
    };
    match result {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("Error: {e}");
            1
        }
    }
}

fn render_dashboard(
    settings: &Settings,
    projection_args: &ProjectionArgs,
    out: Option<PathBuf>,
    dot: Option<&Path>,
    json: Option<&Path>,
    quiet: bool,
) -> Result<(), DashboardError> {
    // Without the primary records there is nothing to show
    let ctx = DashboardContext::load(&settings.paths)?;
    let graph = settings.project(projection_args);

    let page = DashboardPage::new(settings.page_options(), settings.network_options());
    let html = page.render(&ctx, &graph);
    let out = out
        .or_else(|| {
            settings.config.output.as_ref().and_then(|o| o.html.as_ref()).map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    fs::write(&out, html)?;
    tracing::info!(path = %out.display(), "wrote dashboard");

    if dot.is_some() || json.is_some() {
        match &graph {
            Ok(p) => {
                if let Some(path) = dot {
                    write_dot(p, path, DotOptions::default())?;
                }
                if let Some(path) = json {
                    write_projection_json(p, path)?;
                }
            }
            Err(e) => tracing::warn!(error = %e, "skipping neighborhood export"),
        }
    }

    if !quiet {
        println!("Dashboard written to {}", out.display());
    }
    Ok(())
}

fn print_neighborhood(
    settings: &Settings,
    projection_args: &ProjectionArgs,
    format: Option<OutputFormat>,
    html: Option<&Path>,
    dot: Option<&Path>,
    dot_opts: DotOptions,
) -> Result<(), DashboardError> {
    let projection = settings.project(projection_args)?;

    if let Some(path) = html {
        let doc =
            NetworkGenerator::new().generate_document(&projection, &settings.network_options())?;
        fs::write(path, doc)?;
        tracing::info!(path = %path.display(), "wrote network document");
    }
    if let Some(path) = dot {
        write_dot(&projection, path, dot_opts)?;
    }

    if matches!(settings.output_format(format), OutputFormat::Json) {
        println!("{}", projection_json(&projection)?);
        return Ok(());
    }

    if projection.center_substituted {
        println!("Center: {} (requested node not found)", projection.center);
    } else {
        println!("Center: {}", projection.center);
    }
    let rows: Vec<Vec<String>> = projection
        .nodes
        .iter()
        .enumerate()
        .map(|(i, n)| {
            vec![(i + 1).to_string(), n.id.clone(), n.category.to_string(), n.label.clone()]
        })
        .collect();
    println!("{}", crate::utils::table::render(&["#", "Node", "Category", "Label"], &rows));
    if projection.edges.is_empty() {
        println!("<no edges>");
    } else {
        let rows: Vec<Vec<String>> = projection
            .edges
            .iter()
            .map(|e| vec![e.from.clone(), e.label.clone(), e.to.clone()])
            .collect();
        println!("{}", crate::utils::table::render(&["From", "Relation", "To"], &rows));
    }
    Ok(())
}

fn print_recommendations(
    settings: &Settings,
    format: Option<OutputFormat>,
) -> Result<(), DashboardError> {
    let record: RecommendationRecord =
        crate::utils::json::read_json(&settings.paths.recommendations)?;

    if matches!(settings.output_format(format), OutputFormat::Json) {
        #[derive(serde::Serialize)]
        struct Row<'a> {
            rank: usize,
            movie: &'a str,
            description: &'a str,
        }
        let out: Vec<Row> = record
            .ranked()
            .map(|(rank, movie, description)| Row { rank, movie, description })
            .collect();
        let s = serde_json::to_string_pretty(&out)
            .map_err(|e| DashboardError::Visualization(format!("JSON encode error: {e}")))?;
        println!("{s}");
        return Ok(());
    }

    println!("Recommendations for {}", record.user_id);
    if record.recommendations.is_empty() {
        println!("<no recommendations available>");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = record
        .ranked()
        .map(|(rank, movie, description)| {
            vec![rank.to_string(), movie.to_string(), description.to_string()]
        })
        .collect();
    println!("{}", crate::utils::table::render(&["#", "Movie", "Description"], &rows));
    Ok(())
}

fn projection_json(projection: &Projection) -> Result<String, DashboardError> {
    serde_json::to_string_pretty(projection)
        .map_err(|e| DashboardError::Visualization(format!("JSON encode error: {e}")))
}

fn write_projection_json(projection: &Projection, path: &Path) -> Result<(), DashboardError> {
    fs::write(path, projection_json(projection)?)?;
    tracing::info!(path = %path.display(), "wrote neighborhood JSON");
    Ok(())
}

fn write_dot(projection: &Projection, path: &Path, opts: DotOptions) -> Result<(), DashboardError> {
    let content = DotGenerator::new().generate_dot_with_options(projection, opts)?;
    fs::write(path, content)?;
    tracing::info!(path = %path.display(), "wrote DOT");
    Ok(())
}
