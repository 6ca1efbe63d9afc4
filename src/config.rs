use std::collections::BTreeMap;
use std::path::Path;

use colored::Colorize;
use eyre::{eyre, Result, WrapErr};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

mod head;
mod nav;
mod plugins;
mod sidebar;
mod theme;

pub use head::HeadTag;
pub use nav::{NavDropdown, NavItem, NavLink};
pub use plugins::{DerivedOption, OptionValue, PluginOptions};
pub use sidebar::{Sidebar, SidebarEntry, SidebarGroup};
pub use theme::ThemeConfig;

/// Name of the configuration file looked up from the working directory upwards.
pub const CONFIG_FILE: &str = "docsite.toml";

/// Root configuration record of a documentation site.
///
/// Read once when the site is built and never mutated afterwards. Derived
/// plugin options only carry the *name* of their derivation, the callbacks
/// themselves live in [`crate::derive::Derivations`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Canonical base URL, e.g. `https://laravelactions.com/`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub head: Vec<HeadTag>,
    #[serde(default)]
    pub theme_config: ThemeConfig,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub plugins: BTreeMap<String, PluginOptions>,
}

impl SiteConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            domain: None,
            head: Vec::new(),
            theme_config: ThemeConfig::default(),
            plugins: BTreeMap::new(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| eyre!("{}: {}", "Failed to parse site configuration".bold(), e))
    }

    /// Serializes the configuration into its canonical TOML form.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).wrap_err("Failed to serialize site configuration")
    }

    pub fn plugin(&self, name: &str) -> Option<&PluginOptions> {
        self.plugins.get(name)
    }
}

/// Reads and parses a configuration file.
#[instrument]
pub async fn load(path: &Path) -> Result<SiteConfig> {
    let content = tokio::fs::read_to_string(path).await.wrap_err_with(|| {
        format!(
            "{}: {}",
            "Failed to read config file".bold(),
            path.display()
        )
    })?;
    let config = SiteConfig::from_toml_str(&content)?;
    debug!(?config, "Loaded site configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    const LARAVEL_ACTIONS: &str = indoc! {r#"
        title = "Laravel Actions"
        description = "Documentation for Laravel Actions"
        head = [
            ["link", { rel = "icon", href = "/icon.png" }],
        ]

        [themeConfig]
        lastUpdated = "Last Updated"
        repo = "lorisleiva/laravel-actions"
        repoLabel = "GitHub"
        docsRepo = "lorisleiva/laravel-actions-docs"
        editLinks = true
        editLinkText = "Edit this page"
        displayAllHeaders = true

        [[themeConfig.nav]]
        text = "Documentation"
        link = "/"

        [[themeConfig.sidebar]]
        title = "Getting Started"
        collapsable = false
        sidebarDepth = 2
        children = [["/", "Introduction"], "/installation", "/basic-usage"]

        [[themeConfig.sidebar]]
        title = "Advanced"
        collapsable = false
        sidebarDepth = 1
        children = []
    "#};

    const VERSIONED: &str = indoc! {r#"
        title = "Laravel Actions"
        description = "Run your plain PHP classes as anything you want."
        domain = "https://laravelactions.com/"

        [themeConfig]
        logo = "/logo.svg"

        [[themeConfig.nav]]
        text = "Guide"
        link = "/2.x/"

        [[themeConfig.nav]]
        text = "Version"

        [[themeConfig.nav.items]]
        text = "2.x"
        link = "/2.x/"

        [[themeConfig.nav.items]]
        text = "1.x"
        link = "/1.x/"

        [[themeConfig.sidebar."/1.x/"]]
        title = "Guide"
        children = ["", "installation"]

        [[themeConfig.sidebar."/2.x/"]]
        title = "Getting Started"
        collapsable = false
        children = [["/2.x/", "Introduction"], "installation"]

        [plugins.seo]
        description = { derive = "site.description" }
        image = { derive = "site.domain", append = "hero.png" }
        twitterCard = "summary_large_image"
    "#};

    #[test]
    fn parses_flat_config() {
        let config = SiteConfig::from_toml_str(LARAVEL_ACTIONS).unwrap();
        assert_eq!(config.title, "Laravel Actions");
        assert_eq!(config.head.len(), 1);
        assert_eq!(config.head[0].tag, "link");
        assert!(config.theme_config.edit_links);
        assert!(config.theme_config.display_all_headers);
        assert_eq!(config.theme_config.nav.len(), 1);

        let Sidebar::Flat(groups) = &config.theme_config.sidebar else {
            panic!("expected a flat sidebar");
        };
        assert_eq!(groups.len(), 2);
        assert!(!groups[0].collapsable);
        assert_eq!(groups[0].sidebar_depth, Some(2));
        assert_eq!(
            groups[0].children[0],
            SidebarEntry::Titled("/".into(), "Introduction".into())
        );
        assert_eq!(groups[0].children[1], SidebarEntry::Path("/installation".into()));
        assert!(config.plugins.is_empty());
        assert!(config.domain.is_none());
    }

    #[test]
    fn parses_versioned_config() {
        let config = SiteConfig::from_toml_str(VERSIONED).unwrap();
        let Sidebar::Versioned(scopes) = &config.theme_config.sidebar else {
            panic!("expected a versioned sidebar");
        };
        assert_eq!(scopes.len(), 2);
        assert!(scopes["/1.x/"][0].collapsable);

        match &config.theme_config.nav[1] {
            NavItem::Dropdown(dropdown) => assert_eq!(dropdown.items.len(), 2),
            other => panic!("expected a dropdown, got {other:?}"),
        }

        let seo = config.plugin("seo").unwrap();
        assert_eq!(
            seo["description"],
            OptionValue::Derived(DerivedOption::new("site.description"))
        );
        assert_eq!(
            seo["twitterCard"],
            OptionValue::Literal(toml::Value::String("summary_large_image".into()))
        );
    }

    #[test]
    fn round_trips_through_toml() {
        for source in [LARAVEL_ACTIONS, VERSIONED] {
            let config = SiteConfig::from_toml_str(source).unwrap();
            let serialized = config.to_toml_string().unwrap();
            let reparsed = SiteConfig::from_toml_str(&serialized).unwrap();
            assert_eq!(config, reparsed);
        }

        let source = indoc! {r#"
            title = "No versions yet"

            [themeConfig]
            sidebar = {}
        "#};
        let config = SiteConfig::from_toml_str(source).unwrap();
        assert_eq!(config.theme_config.sidebar, Sidebar::Versioned(BTreeMap::new()));
        let reparsed = SiteConfig::from_toml_str(&config.to_toml_string().unwrap()).unwrap();
        assert_eq!(config, reparsed);
    }

    #[test]
    fn rejects_missing_title() {
        let err = SiteConfig::from_toml_str("description = \"no title\"").unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn rejects_nested_dropdowns() {
        let source = indoc! {r#"
            title = "Nested"

            [[themeConfig.nav]]
            text = "Outer"

            [[themeConfig.nav.items]]
            text = "Inner"

            [[themeConfig.nav.items.items]]
            text = "Too deep"
            link = "/deep"
        "#};
        assert!(SiteConfig::from_toml_str(source).is_err());
    }

    #[tokio::test]
    async fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        tokio::fs::write(&path, LARAVEL_ACTIONS).await.unwrap();

        let config = load(&path).await.unwrap();
        assert_eq!(config.description, "Documentation for Laravel Actions");
    }
}
