use std::path::Path;

use eyre::Result;
use tracing::{debug, instrument};

use crate::config::SiteConfig;
use crate::derive::{Derivations, PageContext};
use crate::head::{render_tags, seo_tags};
use crate::pages::{normalize_route, PageLookup};
use crate::shared;

const SEO_PLUGIN: &str = "seo";

/// Everything the generator needs to know about one page's head and footer.
#[derive(Debug)]
struct PageHead {
    html: String,
    plugins: Vec<(String, toml::Table)>,
    edit_link: Option<String>,
    last_updated: Option<String>,
}

fn page_head(
    config: &SiteConfig,
    derivations: &Derivations,
    path: &str,
    pages: &dyn PageLookup,
) -> Result<PageHead> {
    let route = normalize_route(path);
    let mut page = PageContext::new(route.clone());
    if let Some(title) = pages.title(&route) {
        page = page.with_title(title);
    }
    debug!(?page, "Resolved page context");

    let mut tags = config.head.clone();
    let mut plugins = Vec::new();
    for name in config.plugins.keys() {
        let Some(options) = derivations.resolve_plugin(name, &page, config)? else {
            continue;
        };
        if name == SEO_PLUGIN {
            tags.extend(seo_tags(&options));
        }
        plugins.push((name.clone(), options));
    }

    let theme = &config.theme_config;
    let edit_link = theme.edit_link(&route, pages.source(&route).as_deref())?;
    let last_updated = theme.last_updated.as_ref().and_then(|label| {
        pages
            .last_updated(&route)
            .map(|time| format!("{}: {}", label, time.format("%Y-%m-%d %H:%M")))
    });

    Ok(PageHead {
        html: render_tags(&tags),
        plugins,
        edit_link,
        last_updated,
    })
}

/// Prints the head fragment, plugin options and page footer for `path`
#[instrument]
pub async fn head(path: &str, content: Option<&Path>) -> Result<()> {
    let site = shared::load_site().await?;
    let pages = shared::scan_content(&site, content)
        .await?
        .unwrap_or_default();

    let head = page_head(&site.config, &Derivations::builtin(), path, &pages)?;
    println!("{}", head.html);
    for (name, options) in &head.plugins {
        println!("\n# plugin: {}\n{}", name, toml::to_string_pretty(options)?.trim_end());
    }
    if let Some(link) = &head.edit_link {
        println!("\n{}: {}", site.config.theme_config.edit_link_text(), link);
    }
    if let Some(updated) = &head.last_updated {
        println!("{}", updated);
    }
    Ok(())
}
