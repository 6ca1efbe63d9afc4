use std::path::Path;

use colored::Colorize;
use eyre::{bail, eyre, Result, WrapErr};
use indoc::formatdoc;
use tokio::fs;
use tracing::{debug, info, instrument};

use crate::config::CONFIG_FILE;

/// Create a basic site configuration TOML
async fn create_config(root: &Path, title: &str) -> Result<()> {
    // Quoted and escaped as TOML strings, directory names may hold `"` or `\`
    let description = toml::Value::from(format!("Documentation for {}", title));
    let title = toml::Value::from(title);
    let site_config = formatdoc! {r#"
        title = {title}
        description = {description}
        head = [
            ["link", {{ rel = "icon", href = "/favicon.png" }}],
        ]

        [themeConfig]
        lastUpdated = "Last Updated"
        editLinks = false
        editLinkText = "Edit this page"

        [[themeConfig.nav]]
        text = "Documentation"
        link = "/"

        [[themeConfig.sidebar]]
        title = "Getting Started"
        collapsable = false
        sidebarDepth = 2
        children = [["/", "Introduction"]]

        [plugins.seo]
        title = {{ derive = "page.title" }}
        description = {{ derive = "site.description" }}
    "#, title = title, description = description};
    fs::write(root.join(CONFIG_FILE), site_config).await?;

    Ok(())
}

/// Create the introduction page the default sidebar links to
async fn create_index_page(root: &Path, title: &str) -> Result<()> {
    let page = formatdoc! {r#"
        # Introduction

        Welcome to the documentation of {title}.
    "#, title = title};
    fs::write(root.join("docs").join("README.md"), page).await?;

    Ok(())
}

#[instrument]
pub async fn init(name: Option<&str>) -> Result<()> {
    let Some(name) = name else {
        bail!("{}: missing name for the site", "Could not initialize the site".bold());
    };

    if fs::try_exists(name).await? {
        // Get the canonical (absolute) path to the existing site root
        let path = fs::canonicalize(name).await?;
        return Err(
            eyre!("The target directory {} already exists.", path.display())
                .wrap_err("could not initialize the new site"),
        );
    }

    let root = Path::new(name);
    let title = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string());

    debug!(root = %root.display(), "Creating site directories");
    fs::create_dir_all(root.join("docs"))
        .await
        .wrap_err("Failed to create site directories")?;
    create_config(root, &title).await?;
    create_index_page(root, &title).await?;

    let path = fs::canonicalize(root).await?;
    info!(
        "Created a new site in {}, run {} inside it to validate the configuration",
        path.display(),
        "docsite check --content docs".bold()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{self, SiteConfig};
    use crate::derive::Derivations;
    use crate::pages::{dangling_links, ContentDir};
    use crate::schema::validate_config;

    #[tokio::test]
    async fn scaffolds_a_valid_site() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("laravel-actions");
        let name = root.to_str().unwrap();

        init(Some(name)).await.unwrap();

        let config: SiteConfig = config::load(&root.join(CONFIG_FILE)).await.unwrap();
        assert_eq!(config.title, "laravel-actions");
        assert!(validate_config(&config, &Derivations::builtin()).is_empty());

        let content = ContentDir::scan(&root.join("docs")).await.unwrap();
        assert!(dangling_links(&config, &content).is_empty());
    }

    #[tokio::test]
    async fn escapes_quotes_and_backslashes_in_site_name() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join(r#"the "best" \ docs"#);
        let name = root.to_str().unwrap();

        init(Some(name)).await.unwrap();

        let config = config::load(&root.join(CONFIG_FILE)).await.unwrap();
        assert_eq!(config.title, r#"the "best" \ docs"#);
        assert_eq!(config.description, r#"Documentation for the "best" \ docs"#);
    }

    #[tokio::test]
    async fn refuses_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let name = dir.path().to_str().unwrap();
        assert!(init(Some(name)).await.is_err());
        assert!(init(None).await.is_err());
    }
}
