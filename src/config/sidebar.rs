use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Side panel navigation.
///
/// A flat sidebar applies to every page. A versioned sidebar is keyed by URL
/// path prefix (`/1.x/`, `/2.x/`) and the branch with the longest matching
/// prefix wins.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Sidebar {
    Flat(Vec<SidebarGroup>),
    Versioned(BTreeMap<String, Vec<SidebarGroup>>),
}

impl Default for Sidebar {
    fn default() -> Self {
        Sidebar::Flat(Vec::new())
    }
}

impl Sidebar {
    /// True for the default empty flat sidebar. An empty versioned map is
    /// kept so that it reads back as the same variant.
    pub fn is_unset(&self) -> bool {
        matches!(self, Sidebar::Flat(groups) if groups.is_empty())
    }

    /// Every scope with its groups. The flat sidebar is reported under `/`.
    pub fn scopes(&self) -> Vec<(&str, &[SidebarGroup])> {
        match self {
            Sidebar::Flat(groups) => vec![("/", groups.as_slice())],
            Sidebar::Versioned(scopes) => scopes
                .iter()
                .map(|(prefix, groups)| (prefix.as_str(), groups.as_slice()))
                .collect(),
        }
    }

    /// Selects the groups shown on the page at `path`, together with their scope.
    pub fn for_path(&self, path: &str) -> Option<(&str, &[SidebarGroup])> {
        match self {
            Sidebar::Flat(groups) if groups.is_empty() => None,
            Sidebar::Flat(groups) => Some(("/", groups.as_slice())),
            Sidebar::Versioned(scopes) => {
                let path = ensure_ending_slash(path);
                scopes
                    .iter()
                    .filter(|(prefix, _)| path.starts_with(prefix.as_str()))
                    .max_by_key(|(prefix, _)| prefix.len())
                    .map(|(prefix, groups)| (prefix.as_str(), groups.as_slice()))
            }
        }
    }
}

fn ensure_ending_slash(path: &str) -> String {
    if path.ends_with('/') || path.ends_with(".html") {
        path.to_string()
    } else {
        format!("{}/", path)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarGroup {
    pub title: String,
    #[serde(default = "default_collapsable")]
    pub collapsable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_depth: Option<u8>,
    #[serde(default)]
    pub children: Vec<SidebarEntry>,
}

fn default_collapsable() -> bool {
    true
}

impl SidebarGroup {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            collapsable: default_collapsable(),
            sidebar_depth: None,
            children: Vec::new(),
        }
    }

    pub fn child(mut self, entry: SidebarEntry) -> Self {
        self.children.push(entry);
        self
    }
}

/// A sidebar link: either a bare path whose label comes from the target
/// page, or an explicit `[path, label]` pair.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SidebarEntry {
    Path(String),
    Titled(String, String),
}

impl SidebarEntry {
    pub fn raw_path(&self) -> &str {
        match self {
            SidebarEntry::Path(path) | SidebarEntry::Titled(path, _) => path,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            SidebarEntry::Path(_) => None,
            SidebarEntry::Titled(_, label) => Some(label),
        }
    }

    /// Route of the target page. Relative paths resolve against the scope the
    /// entry is declared in, `""` being the scope root itself.
    pub fn route(&self, scope: &str) -> String {
        let path = self.raw_path();
        if path.starts_with('/') {
            path.to_string()
        } else {
            format!("{}{}", ensure_ending_slash(scope), path)
        }
    }
}
