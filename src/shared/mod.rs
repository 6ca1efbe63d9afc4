use std::path::{Path, PathBuf};
use std::time::Instant;

use colored::Colorize;
use eyre::{bail, Result};
use tracing::debug;

use crate::config::{self, SiteConfig};
use crate::fs;
use crate::pages::ContentDir;

/// A loaded site: where its configuration lives and what it says.
#[derive(Debug)]
pub struct Site {
    pub config_path: PathBuf,
    pub config: SiteConfig,
}

impl Site {
    pub fn root(&self) -> &Path {
        self.config_path.parent().unwrap_or(Path::new("."))
    }
}

/// Locates and loads the configuration of the site the user is working in.
pub async fn load_site() -> Result<Site> {
    let Some(config_path) = fs::find_config_file().await? else {
        bail!(
            "{}: no {} found in this directory or any parent",
            "Not in a docsite directory".bold(),
            config::CONFIG_FILE
        );
    };
    debug!(path = %config_path.display(), "Found site configuration");

    let config = config::load(&config_path).await?;
    Ok(Site {
        config_path,
        config,
    })
}

/// Scans the content directory given on the command line, relative paths
/// being taken from the site root.
pub async fn scan_content(site: &Site, content: Option<&Path>) -> Result<Option<ContentDir>> {
    let Some(content) = content else {
        return Ok(None);
    };
    let dir = if content.is_absolute() {
        content.to_path_buf()
    } else {
        site.root().join(content)
    };
    Ok(Some(ContentDir::scan(&dir).await?))
}

pub fn get_elapsed_time(instant: Instant) -> String {
    let duration = instant.elapsed();
    let secs = duration.as_secs_f64();

    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else {
        format!("{:.1}s", secs)
    }
}
