use std::path::Path;
use std::time::Instant;

use colored::Colorize;
use eyre::{bail, Result};
use tracing::{info, instrument, warn};

use crate::config::SiteConfig;
use crate::derive::Derivations;
use crate::pages::{dangling_links, PageLookup};
use crate::schema::{format_errors, validate_config, ValidationError};
use crate::shared;

/// Runs every check available for a configuration.
///
/// Link targets are only verified when a page index is given.
pub fn collect_errors(
    config: &SiteConfig,
    derivations: &Derivations,
    pages: Option<&dyn PageLookup>,
) -> Vec<ValidationError> {
    let mut errors = validate_config(config, derivations);
    if let Some(pages) = pages {
        errors.extend(dangling_links(config, pages));
    }
    errors
}

/// Validates the site configuration
///
/// # Arguments
/// * `content` - Content directory to resolve links against
/// * `as_warnings` - Report problems without failing
#[instrument]
pub async fn check(content: Option<&Path>, as_warnings: bool) -> Result<()> {
    let start = Instant::now();
    let site = shared::load_site().await?;
    let pages = shared::scan_content(&site, content).await?;

    let errors = collect_errors(
        &site.config,
        &Derivations::builtin(),
        pages.as_ref().map(|p| p as &dyn PageLookup),
    );

    if errors.is_empty() {
        info!(
            "{} is valid ({})",
            site.config_path.display(),
            shared::get_elapsed_time(start)
        );
        return Ok(());
    }

    let report = format_errors(&site.config_path, &errors, as_warnings);
    if as_warnings {
        warn!("{}", report.trim_end());
        Ok(())
    } else {
        bail!(
            "{}\n{}",
            "Invalid site configuration".bold(),
            report.trim_end()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NavItem, NavLink, Sidebar, SidebarEntry, SidebarGroup};
    use crate::pages::MockPageLookup;

    fn config() -> SiteConfig {
        let mut config = SiteConfig::new("Docs");
        config.theme_config.nav = vec![
            NavItem::Link(NavLink::new("Guide", "/")),
            NavItem::Link(NavLink::new("Guide", "/guide")),
        ];
        config.theme_config.sidebar =
            Sidebar::Flat(vec![SidebarGroup::new("Start").child(SidebarEntry::Path("/".into()))]);
        config
    }

    #[test]
    fn skips_link_checks_without_pages() {
        let errors = collect_errors(&config(), &Derivations::builtin(), None);
        assert_eq!(errors, vec![ValidationError::DuplicateNavText("Guide".into())]);
    }

    #[test]
    fn appends_dangling_links() {
        let mut pages = MockPageLookup::new();
        pages.expect_exists().returning(|route| route == "/");

        let errors = collect_errors(&config(), &Derivations::builtin(), Some(&pages));
        assert_eq!(
            errors,
            vec![
                ValidationError::DuplicateNavText("Guide".into()),
                ValidationError::DanglingLink {
                    source: "Navigation entry 'Guide'".into(),
                    route: "/guide".into()
                },
            ]
        );
    }
}
