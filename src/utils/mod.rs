pub mod table {
    // Helper to render a separator line
    fn sep(widths: &[usize]) -> String {
        let mut s = String::from("+");
        for w in widths {
            s.push_str(&"-".repeat(w + 2));
            s.push('+');
        }
        s
    }

    // Helper to render a row line; widths are in chars so titles with accents line up
    fn line(cells: &[String], widths: &[usize]) -> String {
        let mut s = String::from("|");
        for (i, cell) in cells.iter().enumerate() {
            let w = widths[i];
            let len = cell.chars().count();
            s.push(' ');
            s.push_str(cell);
            if len < w {
                s.push_str(&" ".repeat(w - len));
            }
            s.push(' ');
            s.push('|');
        }
        s
    }

    /// Render a simple ASCII table given headers and rows.
    #[must_use]
    pub fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
        let cols = headers.len();
        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in rows {
            for (c, w) in widths.iter_mut().enumerate().take(cols) {
                *w = (*w).max(row.get(c).map_or(0, |s| s.chars().count()));
            }
        }

        let mut out = String::new();
        out.push_str(&sep(&widths));
        out.push('\n');
        let header_cells: Vec<String> = headers.iter().map(|s| (*s).to_string()).collect();
        out.push_str(&line(&header_cells, &widths));
        out.push('\n');
        out.push_str(&sep(&widths));
        out.push('\n');
        for row in rows {
            let mut cells = Vec::with_capacity(cols);
            for i in 0..cols {
                cells.push(row.get(i).cloned().unwrap_or_default());
            }
            out.push_str(&line(&cells, &widths));
            out.push('\n');
        }
        out.push_str(&sep(&widths));
        out
    }
}

pub mod json {
    use crate::errors::DashboardError;
    use serde::de::DeserializeOwned;
    use std::path::Path;

    /// Read and decode a JSON input file.
    ///
    /// # Errors
    /// `MissingInputFile` when the file cannot be read, `InvalidInput` when it does not
    /// decode as `T`.
    pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DashboardError> {
        let data = std::fs::read_to_string(path).map_err(|source| {
            DashboardError::MissingInputFile { path: path.to_path_buf(), source }
        })?;
        serde_json::from_str(&data).map_err(|e| DashboardError::InvalidInput {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Serialize `value` for embedding inside an HTML `<script>` element.
    ///
    /// # Errors
    /// Returns `DashboardError::Visualization` if serialization fails.
    pub fn to_script_json<T: serde::Serialize>(value: &T) -> Result<String, DashboardError> {
        let s = serde_json::to_string(value)
            .map_err(|e| DashboardError::Visualization(format!("JSON encode error: {e}")))?;
        // `</script>` or `<!--` inside a string literal would end the element early
        Ok(s.replace('<', "\\u003c").replace('>', "\\u003e").replace('&', "\\u0026"))
    }
}

pub mod config {
    use serde::Deserialize;
    use std::fs;
    use std::path::{Path, PathBuf};

    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct InputsConfig {
        pub data_dir: Option<String>,
        pub recommendations: Option<String>,
        pub evaluation: Option<String>,
        pub graph: Option<String>,
        pub movies: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct ProjectionConfig {
        pub center: Option<String>,
        pub first_hop: Option<String>,
        pub second_hop: Option<String>,
        pub user_prefix: Option<String>,
        pub label_max: Option<usize>,
        pub fallback: Option<String>, // "smallest" | "fail"
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct NetworkConfig {
        pub height: Option<String>,
        pub width: Option<String>,
        pub background: Option<String>,
        pub font_color: Option<String>,
        pub font_size: Option<u32>,
        pub edge_color: Option<String>,
        pub physics: Option<bool>,
        pub stabilization_iterations: Option<u32>,
        pub update_interval: Option<u32>,
        pub min_velocity: Option<f64>,
        pub simulation_duration: Option<u32>,
        pub script_url: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct PageConfig {
        pub title: Option<String>,
        pub architecture_image: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct OutputConfig {
        pub html: Option<String>,
        pub default_format: Option<String>, // "text" | "json"
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct Config {
        pub inputs: Option<InputsConfig>,
        pub projection: Option<ProjectionConfig>,
        pub network: Option<NetworkConfig>,
        pub page: Option<PageConfig>,
        pub output: Option<OutputConfig>,
    }

    fn default_config_path(root: &Path) -> PathBuf {
        root.join("movie-kg-dashboard.toml")
    }

    /// Parse a TOML config file. Unreadable or malformed files yield `None` with a warning.
    #[must_use]
    pub fn load_config_at(path: &Path) -> Option<Config> {
        let data = match fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "config not readable");
                return None;
            }
        };
        match toml::from_str::<Config>(&data) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "config not valid TOML");
                None
            }
        }
    }

    /// Look for `movie-kg-dashboard.toml` inside `root`.
    #[must_use]
    pub fn load_config_near(root: &Path) -> Option<Config> {
        let p = default_config_path(root);
        if p.exists() {
            load_config_at(&p)
        } else {
            None
        }
    }
}

pub mod logging {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    /// Map CLI verbosity onto a default filter directive.
    #[must_use]
    pub fn default_filter(verbose: u8, quiet: bool) -> &'static str {
        match verbose {
            0 if quiet => "error",
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Install the global subscriber on stderr. `RUST_LOG` takes precedence over verbosity flags.
    /// Calling this more than once is a no-op.
    pub fn init(verbose: u8, quiet: bool) {
        let filter = default_filter(verbose, quiet);
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
            .try_init();
    }
}
