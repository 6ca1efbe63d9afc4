use colored::Colorize;
use eyre::{bail, Result, WrapErr};
use tracing::{debug, info, instrument};

use crate::config::SiteConfig;
use crate::shared;

/// Canonical text of a configuration, `None` when `current` is already canonical.
fn reformat(current: &str) -> Result<Option<String>> {
    let config = SiteConfig::from_toml_str(current)?;
    let formatted = config.to_toml_string()?;

    // Guards against a serialization that would not read back the same way
    let reparsed = SiteConfig::from_toml_str(&formatted)?;
    if reparsed != config {
        bail!("{}", "Formatting would change the configuration".bold());
    }

    Ok((formatted != current).then_some(formatted))
}

/// Rewrites the site configuration in canonical form
///
/// # Arguments
/// * `check` - Fail instead of writing when the file is not formatted
#[instrument]
pub async fn fmt(check: bool) -> Result<()> {
    let site = shared::load_site().await?;
    let current = tokio::fs::read_to_string(&site.config_path)
        .await
        .wrap_err("Failed to read config file")?;

    let Some(formatted) = reformat(&current)? else {
        info!("{} is already formatted", site.config_path.display());
        return Ok(());
    };

    if check {
        bail!(
            "{}: {}",
            "Configuration is not formatted".bold(),
            site.config_path.display()
        );
    }

    debug!(path = %site.config_path.display(), "Writing formatted configuration");
    tokio::fs::write(&site.config_path, formatted)
        .await
        .wrap_err("Failed to write config file")?;
    info!("Formatted {}", site.config_path.display());
    Ok(())
}
