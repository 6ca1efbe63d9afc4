use serde::{Deserialize, Serialize};

/// Top navigation bar entry.
///
/// Dropdowns hold plain links only, a dropdown inside a dropdown does not parse.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum NavItem {
    Link(NavLink),
    Dropdown(NavDropdown),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    pub text: String,
    pub link: String,
}

/// Dropdown of links, used for version selection
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NavDropdown {
    pub text: String,
    pub items: Vec<NavLink>,
}

impl NavLink {
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: link.into(),
        }
    }

    /// Links pointing outside of the documentation (`https://`, `mailto:`, ...)
    pub fn is_external(&self) -> bool {
        is_external_link(&self.link)
    }
}

impl NavItem {
    pub fn text(&self) -> &str {
        match self {
            NavItem::Link(link) => &link.text,
            NavItem::Dropdown(dropdown) => &dropdown.text,
        }
    }

    /// All the links reachable from this entry, in display order.
    pub fn links(&self) -> impl Iterator<Item = &NavLink> {
        let links: &[NavLink] = match self {
            NavItem::Link(link) => std::slice::from_ref(link),
            NavItem::Dropdown(dropdown) => &dropdown.items,
        };
        links.iter()
    }
}

pub(crate) fn is_external_link(link: &str) -> bool {
    link.contains("://") || link.starts_with("mailto:") || link.starts_with("tel:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_links_from_dropdowns() {
        let item = NavItem::Dropdown(NavDropdown {
            text: "Version".into(),
            items: vec![NavLink::new("2.x", "/2.x/"), NavLink::new("1.x", "/1.x/")],
        });
        let links: Vec<_> = item.links().map(|l| l.link.as_str()).collect();
        assert_eq!(links, ["/2.x/", "/1.x/"]);
        assert_eq!(item.text(), "Version");
    }

    #[test]
    fn detects_external_links() {
        assert!(NavLink::new("GitHub", "https://github.com/").is_external());
        assert!(NavLink::new("Mail", "mailto:docs@example.com").is_external());
        assert!(!NavLink::new("Guide", "/guide/").is_external());
    }
}
