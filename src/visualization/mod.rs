//! Renderers for the projected neighborhood and the dashboard page.
//!
//! - `NetworkGenerator`: interactive node-link diagram (vis-network) as an HTML
//!   fragment or a standalone document.
//! - `DotGenerator`: Graphviz DOT for the same projection.
//! - `DashboardPage`: the full dashboard with sidebar and tabs.
mod dot;
mod network;
mod page;

pub use dot::{DotGenerator, DotOptions, RankDir};
pub use network::{NetworkGenerator, NetworkOptions};
pub use page::{DashboardPage, PageOptions, KG_HINT};

/// Escape text for HTML element content and double-quoted attributes.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
