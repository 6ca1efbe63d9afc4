use std::path::Path;

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};
use eyre::Result;
use tracing::{instrument, warn};

use crate::config::{Sidebar, SidebarGroup};
use crate::pages::{derive_label, PageLookup};
use crate::shared;

/// A sidebar link as displayed: label and target route
#[derive(Debug, PartialEq)]
struct ResolvedEntry {
    label: String,
    route: String,
}

fn resolve_group(group: &SidebarGroup, scope: &str, pages: &dyn PageLookup) -> Vec<ResolvedEntry> {
    group
        .children
        .iter()
        .map(|entry| {
            let route = entry.route(scope);
            let label = match entry.label() {
                Some(label) => label.to_string(),
                None => derive_label(&route, pages),
            };
            ResolvedEntry { label, route }
        })
        .collect()
}

fn group_heading(group: &SidebarGroup) -> String {
    let mut heading = group.title.bold().to_string();
    if !group.collapsable {
        heading.push_str(" (always open)");
    }
    if let Some(depth) = group.sidebar_depth {
        heading.push_str(&format!(" [depth {}]", depth));
    }
    heading
}

fn render(sidebar: &Sidebar, path: &str, pages: &dyn PageLookup) -> Option<String> {
    let (scope, groups) = sidebar.for_path(path)?;

    let mut output = format!("Sidebar scope: {}\n", scope);
    for group in groups {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(vec!["Label", "Path"]);
        for entry in resolve_group(group, scope, pages) {
            table.add_row(vec![entry.label, entry.route]);
        }
        output.push_str(&format!("\n{}\n{}\n", group_heading(group), table));
    }
    Some(output)
}

/// Prints the sidebar shown on the page at `path`
#[instrument]
pub async fn sidebar(path: &str, content: Option<&Path>) -> Result<()> {
    let site = shared::load_site().await?;
    let pages = shared::scan_content(&site, content)
        .await?
        .unwrap_or_default();

    match render(&site.config.theme_config.sidebar, path, &pages) {
        Some(output) => print!("{}", output),
        None => warn!("No sidebar applies to {}", path),
    }
    Ok(())
}
