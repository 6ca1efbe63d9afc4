use std::path::Path;

use eyre::{bail, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{NavItem, Sidebar};

/// Branch used for edit links when `docsBranch` is not set
const DEFAULT_DOCS_BRANCH: &str = "master";
const DEFAULT_EDIT_LINK_TEXT: &str = "Edit this page";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Label shown next to the page build timestamp, disabled when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs_repo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs_dir: Option<String>,
    #[serde(default)]
    pub edit_links: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_link_text: Option<String>,
    #[serde(default)]
    pub display_all_headers: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nav: Vec<NavItem>,
    #[serde(default, skip_serializing_if = "Sidebar::is_unset")]
    pub sidebar: Sidebar,
}

impl ThemeConfig {
    /// Full URL of the project repository, if one is configured.
    pub fn repo_url(&self) -> Result<Option<String>> {
        self.repo.as_deref().map(resolve_repo_shorthand).transpose()
    }

    /// Label of the repository link, falling back to the name of the hosting service.
    pub fn repo_label(&self) -> Result<Option<String>> {
        if let Some(label) = &self.repo_label {
            return Ok(Some(label.clone()));
        }
        let Some(url) = self.repo_url()? else {
            return Ok(None);
        };
        let label = if url.contains("github.com") {
            "GitHub"
        } else if url.contains("codeberg.org") {
            "Codeberg"
        } else if url.contains("sr.ht") {
            "SourceHut"
        } else {
            "Source"
        };
        Ok(Some(label.to_string()))
    }

    pub fn edit_link_text(&self) -> &str {
        self.edit_link_text
            .as_deref()
            .unwrap_or(DEFAULT_EDIT_LINK_TEXT)
    }

    /// Builds the "edit this page" URL for a page.
    ///
    /// `source` is the page file relative to the docs directory when known,
    /// otherwise it is guessed from the route (`/` -> `README.md`,
    /// `/foo` -> `foo.md`, `/foo/` -> `foo/README.md`).
    #[instrument(skip(self))]
    pub fn edit_link(&self, route: &str, source: Option<&Path>) -> Result<Option<String>> {
        if !self.edit_links {
            return Ok(None);
        }
        let Some(repo) = self.docs_repo.as_ref().or(self.repo.as_ref()) else {
            debug!("Edit links enabled but no repository configured");
            return Ok(None);
        };
        let base = resolve_repo_shorthand(repo)?;
        let branch = self.docs_branch.as_deref().unwrap_or(DEFAULT_DOCS_BRANCH);
        let file = match source {
            Some(path) => path.to_string_lossy().replace('\\', "/"),
            None => file_for_route(route),
        };
        let dir = self
            .docs_dir
            .as_deref()
            .map(|dir| dir.trim_matches('/'))
            .filter(|dir| !dir.is_empty());

        let link = match dir {
            Some(dir) => format!("{}/edit/{}/{}/{}", base.trim_end_matches('/'), branch, dir, file),
            None => format!("{}/edit/{}/{}", base.trim_end_matches('/'), branch, file),
        };
        Ok(Some(link))
    }
}

fn file_for_route(route: &str) -> String {
    let trimmed = route.trim_start_matches('/');
    let trimmed = trimmed.strip_suffix(".html").unwrap_or(trimmed);
    if trimmed.is_empty() {
        "README.md".to_string()
    } else if trimmed.ends_with('/') {
        format!("{}README.md", trimmed)
    } else {
        format!("{}.md", trimmed)
    }
}

/// Expands a repository reference into a full URL.
///
/// Accepts full URLs, `owner/name` (GitHub) and `service:owner/name` shorthands.
pub fn resolve_repo_shorthand(repo: &str) -> Result<String> {
    if repo.starts_with("https://") || repo.starts_with("http://") {
        return Ok(repo.to_string());
    }
    if let Some((service, rest)) = repo.split_once(':') {
        debug!("Processing repository service {}", service.to_lowercase());
        match service.to_lowercase().as_str() {
            "gh" | "github" => Ok(format!("https://github.com/{}", rest)),
            "srht" | "sourcehut" => Ok(format!("https://git.sr.ht/~{}", rest)),
            "berg" | "codeberg" => Ok(format!("https://codeberg.org/{}", rest)),
            _ => bail!("Unknown repository service: {}", service),
        }
    } else {
        // 'owner/repo' without a service prefix
        Ok(format!("https://github.com/{}", repo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme() -> ThemeConfig {
        ThemeConfig {
            repo: Some("lorisleiva/laravel-actions".into()),
            docs_repo: Some("lorisleiva/laravel-actions-docs".into()),
            edit_links: true,
            ..ThemeConfig::default()
        }
    }

    #[test]
    fn resolves_repository_shorthands() {
        assert_eq!(
            resolve_repo_shorthand("lorisleiva/laravel-actions").unwrap(),
            "https://github.com/lorisleiva/laravel-actions"
        );
        assert_eq!(
            resolve_repo_shorthand("berg:someone/docs").unwrap(),
            "https://codeberg.org/someone/docs"
        );
        assert_eq!(
            resolve_repo_shorthand("srht:someone/docs").unwrap(),
            "https://git.sr.ht/~someone/docs"
        );
        assert_eq!(
            resolve_repo_shorthand("https://gitlab.com/a/b").unwrap(),
            "https://gitlab.com/a/b"
        );
        assert!(resolve_repo_shorthand("svn:a/b").is_err());
    }

    #[test]
    fn labels_repository_by_host() {
        assert_eq!(theme().repo_label().unwrap().as_deref(), Some("GitHub"));

        let custom = ThemeConfig {
            repo_label: Some("Source code".into()),
            ..theme()
        };
        assert_eq!(custom.repo_label().unwrap().as_deref(), Some("Source code"));
        assert_eq!(ThemeConfig::default().repo_label().unwrap(), None);
    }

    #[test]
    fn builds_edit_links_from_routes() {
        let theme = theme();
        assert_eq!(
            theme.edit_link("/", None).unwrap().as_deref(),
            Some("https://github.com/lorisleiva/laravel-actions-docs/edit/master/README.md")
        );
        assert_eq!(
            theme.edit_link("/basic-usage", None).unwrap().as_deref(),
            Some("https://github.com/lorisleiva/laravel-actions-docs/edit/master/basic-usage.md")
        );
        assert_eq!(
            theme.edit_link("/2.x/", None).unwrap().as_deref(),
            Some("https://github.com/lorisleiva/laravel-actions-docs/edit/master/2.x/README.md")
        );
    }

    #[test]
    fn edit_links_honour_branch_and_dir() {
        let theme = ThemeConfig {
            docs_branch: Some("main".into()),
            docs_dir: Some("/docs/".into()),
            ..theme()
        };
        assert_eq!(
            theme
                .edit_link("/guide", Some(Path::new("guide/index.md")))
                .unwrap()
                .as_deref(),
            Some("https://github.com/lorisleiva/laravel-actions-docs/edit/main/docs/guide/index.md")
        );
    }

    #[test]
    fn edit_links_disabled() {
        let theme = ThemeConfig {
            edit_links: false,
            ..theme()
        };
        assert_eq!(theme.edit_link("/", None).unwrap(), None);
        assert_eq!(theme.edit_link_text(), "Edit this page");
    }
}
