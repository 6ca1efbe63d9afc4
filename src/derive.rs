use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use colored::Colorize;
use eyre::{eyre, Result};
use tracing::{debug, instrument};

use crate::config::{OptionValue, SiteConfig};

/// Pure callback computing a plugin option from the page and site context.
///
/// Returns `None` when the source value is missing, in which case the option
/// is left out of the resolved set.
pub type Derivation = Arc<dyn Fn(&PageContext, &SiteConfig) -> Option<String> + Send + Sync>;

/// Already resolved data about the page being generated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageContext {
    pub path: String,
    pub title: Option<String>,
}

impl PageContext {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Named derivations that configuration files refer to by `derive = "<name>"`.
#[derive(Clone, Default)]
pub struct Derivations {
    table: HashMap<String, Derivation>,
}

impl fmt::Debug for Derivations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.table.keys().collect();
        names.sort();
        f.debug_struct("Derivations").field("names", &names).finish()
    }
}

impl Derivations {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding the derivations every site can use.
    pub fn builtin() -> Self {
        let mut derivations = Self::empty();
        derivations
            .register("site.title", |_, site| Some(site.title.clone()))
            .register("site.description", |_, site| Some(site.description.clone()))
            .register("site.domain", |_, site| site.domain.clone())
            .register("page.title", |page, _| page.title.clone())
            .register("page.path", |page, _| Some(page.path.clone()))
            .register("page.url", |page, site| {
                site.domain.as_ref().map(|domain| {
                    format!(
                        "{}/{}",
                        domain.trim_end_matches('/'),
                        page.path.trim_start_matches('/')
                    )
                })
            });
        derivations
    }

    pub fn register<F>(&mut self, name: impl Into<String>, derivation: F) -> &mut Self
    where
        F: Fn(&PageContext, &SiteConfig) -> Option<String> + Send + Sync + 'static,
    {
        self.table.insert(name.into(), Arc::new(derivation));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Derivation> {
        self.table.get(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.table.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Computes a single option value for a page.
    pub fn evaluate(
        &self,
        value: &OptionValue,
        page: &PageContext,
        site: &SiteConfig,
    ) -> Result<Option<toml::Value>> {
        match value {
            OptionValue::Literal(literal) => Ok(Some(literal.clone())),
            OptionValue::Derived(derived) => {
                let derivation = self.get(&derived.derive).ok_or_else(|| {
                    eyre!(
                        "{}: '{}' (available: {})",
                        "Unknown derivation".bold(),
                        derived.derive,
                        self.names().join(", ")
                    )
                })?;
                Ok(derivation(page, site).map(|value| {
                    let value = match &derived.append {
                        Some(suffix) => value + suffix,
                        None => value,
                    };
                    toml::Value::String(value)
                }))
            }
        }
    }

    /// Resolves every option of `plugin` for a page, `None` if the plugin is
    /// not configured.
    #[instrument(level = "debug", skip(self, site))]
    pub fn resolve_plugin(
        &self,
        plugin: &str,
        page: &PageContext,
        site: &SiteConfig,
    ) -> Result<Option<toml::Table>> {
        let Some(options) = site.plugin(plugin) else {
            return Ok(None);
        };

        let mut resolved = toml::Table::new();
        for (name, value) in options {
            match self.evaluate(value, page, site)? {
                Some(value) => {
                    resolved.insert(name.clone(), value);
                }
                None => debug!(option = %name, "Derived option has no value, skipping"),
            }
        }
        Ok(Some(resolved))
    }
}
