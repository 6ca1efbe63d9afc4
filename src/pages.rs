use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::{DateTime, Local};
use colored::Colorize;
use eyre::{eyre, Result, WrapErr};
use regex::Regex;
use titlecase::titlecase;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use crate::config::SiteConfig;
use crate::schema::ValidationError;

/// Read access to the documentation pages a configuration links to.
#[cfg_attr(test, mockall::automock)]
pub trait PageLookup {
    fn exists(&self, route: &str) -> bool;
    /// Title of the page, from its front matter or first heading
    fn title(&self, route: &str) -> Option<String>;
    /// Page file relative to the content directory
    fn source(&self, route: &str) -> Option<PathBuf>;
    fn last_updated(&self, route: &str) -> Option<DateTime<Local>>;
}

#[derive(Debug, Clone)]
struct PageInfo {
    source: PathBuf,
    title: Option<String>,
    modified: Option<DateTime<Local>>,
}

/// Markdown pages of a documentation directory, indexed by route.
#[derive(Debug, Default)]
pub struct ContentDir {
    pages: BTreeMap<String, PageInfo>,
}

impl ContentDir {
    /// Indexes every markdown file under `root`.
    #[instrument]
    pub async fn scan(root: &Path) -> Result<Self> {
        if !tokio::fs::try_exists(root).await? {
            return Err(eyre!(
                "{}: {}",
                "Content directory does not exist".bold(),
                root.display()
            ));
        }

        let mut pages = BTreeMap::new();
        for entry in WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
        {
            let path = entry.path();
            let source = path.strip_prefix(root)?.to_path_buf();
            let content = tokio::fs::read_to_string(path)
                .await
                .wrap_err_with(|| format!("Failed to read page {}", path.display()))?;
            let modified = tokio::fs::metadata(path)
                .await
                .and_then(|meta| meta.modified())
                .map(DateTime::<Local>::from)
                .ok();
            let route = route_for_source(&source);
            debug!(%route, source = %source.display(), "Indexed page");

            pages.insert(
                route,
                PageInfo {
                    source,
                    title: extract_title(&content),
                    modified,
                },
            );
        }

        debug!(count = pages.len(), "Scanned content directory");
        Ok(Self { pages })
    }

    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    fn page(&self, route: &str) -> Option<&PageInfo> {
        self.pages.get(&normalize_route(route))
    }
}

impl PageLookup for ContentDir {
    fn exists(&self, route: &str) -> bool {
        self.page(route).is_some()
    }

    fn title(&self, route: &str) -> Option<String> {
        self.page(route).and_then(|page| page.title.clone())
    }

    fn source(&self, route: &str) -> Option<PathBuf> {
        self.page(route).map(|page| page.source.clone())
    }

    fn last_updated(&self, route: &str) -> Option<DateTime<Local>> {
        self.page(route).and_then(|page| page.modified)
    }
}

/// Maps a page file to its route: `README.md`/`index.md` serve their
/// directory, any other file is served without extension.
fn route_for_source(source: &Path) -> String {
    let mut segments: Vec<String> = source
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let file = segments.pop().unwrap_or_default();
    let stem = file.strip_suffix(".md").unwrap_or(&file);

    let dir = if segments.is_empty() {
        String::from("/")
    } else {
        format!("/{}/", segments.join("/"))
    };
    if stem.eq_ignore_ascii_case("readme") || stem == "index" {
        dir
    } else {
        format!("{}{}", dir, stem)
    }
}

/// Canonical form of a link target, ignoring anchors, queries and extensions.
pub fn normalize_route(link: &str) -> String {
    let link = link.split(['#', '?']).next().unwrap_or_default();
    let link = link
        .strip_suffix(".html")
        .or_else(|| link.strip_suffix(".md"))
        .unwrap_or(link);

    let mut route = if link.starts_with('/') {
        link.to_string()
    } else {
        format!("/{}", link)
    };
    for index_name in ["README", "readme", "index"] {
        if let Some(dir) = route.strip_suffix(index_name) {
            if dir.ends_with('/') {
                route = dir.to_string();
                break;
            }
        }
    }
    route
}

/// Finds the page title in YAML front matter (`title: ...`) or the first
/// level one heading.
pub fn extract_title(content: &str) -> Option<String> {
    static FRONT_MATTER: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\A---\r?\n(?s:(.*?))\r?\n---").unwrap());
    static TITLE_KEY: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#"(?m)^title:\s*["']?(.*?)["']?\s*$"#).unwrap());
    static HEADING: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+?)\s*#*\s*$").unwrap());

    if let Some(matter) = FRONT_MATTER.captures(content) {
        if let Some(title) = TITLE_KEY.captures(&matter[1]) {
            let title = title[1].trim();
            if !title.is_empty() {
                return Some(title.to_string());
            }
        }
    }

    HEADING
        .captures(content)
        .map(|caps| caps[1].trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Label shown for a bare sidebar entry: the page title when known, else the
/// last path segment in title case. Never empty.
pub fn derive_label(route: &str, pages: &dyn PageLookup) -> String {
    if let Some(title) = pages.title(route).filter(|t| !t.trim().is_empty()) {
        return title;
    }

    let slug = normalize_route(route)
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .replace(['-', '_'], " ");
    if slug.trim().is_empty() {
        String::from("Home")
    } else {
        titlecase(slug.trim())
    }
}

/// Nav links and sidebar entries whose target page does not exist.
#[instrument(skip_all)]
pub fn dangling_links(config: &SiteConfig, pages: &dyn PageLookup) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for item in &config.theme_config.nav {
        for link in item.links().filter(|link| !link.is_external()) {
            if !pages.exists(&link.link) {
                warn!(link = %link.link, "Dangling navigation link");
                errors.push(ValidationError::DanglingLink {
                    source: format!("Navigation entry '{}'", link.text),
                    route: link.link.clone(),
                });
            }
        }
    }

    for (scope, groups) in config.theme_config.sidebar.scopes() {
        for group in groups {
            for entry in &group.children {
                let route = entry.route(scope);
                if !pages.exists(&route) {
                    warn!(%route, "Dangling sidebar link");
                    errors.push(ValidationError::DanglingLink {
                        source: format!("Sidebar group '{}'", group.title),
                        route,
                    });
                }
            }
        }
    }

    errors
}
