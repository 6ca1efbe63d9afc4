use std::collections::HashSet;

use crate::config::{NavItem, OptionValue, SidebarEntry, SiteConfig};
use crate::derive::Derivations;
use crate::schema::ValidationError;

/// Checks the static rules a configuration must follow before a build.
///
/// Every violation is reported, validation never stops at the first one.
/// Link targets are not checked here, see [`crate::pages::dangling_links`].
pub fn validate_config(config: &SiteConfig, derivations: &Derivations) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.title.trim().is_empty() {
        errors.push(ValidationError::MissingField("title".into()));
    }

    for (index, head) in config.head.iter().enumerate() {
        if head.tag.trim().is_empty() {
            errors.push(ValidationError::EmptyHeadTag(index));
        }
    }

    // Navigation, dropdown items share the namespace of top level entries
    let mut seen = HashSet::new();
    for item in &config.theme_config.nav {
        let mut texts = vec![item.text()];
        if let NavItem::Dropdown(dropdown) = item {
            texts.extend(dropdown.items.iter().map(|link| link.text.as_str()));
        }
        for text in texts {
            if !seen.insert(text) {
                errors.push(ValidationError::DuplicateNavText(text.to_string()));
            }
        }
        for link in item.links() {
            if link.link.trim().is_empty() {
                errors.push(ValidationError::EmptyNavLink {
                    text: link.text.clone(),
                });
            }
        }
    }

    // Sidebar, one title namespace per scope
    for (scope, groups) in config.theme_config.sidebar.scopes() {
        if !scope.starts_with('/') || !scope.ends_with('/') {
            errors.push(ValidationError::InvalidScope(scope.to_string()));
        }

        let mut titles = HashSet::new();
        for group in groups {
            if !titles.insert(group.title.as_str()) {
                errors.push(ValidationError::DuplicateGroupTitle {
                    scope: scope.to_string(),
                    title: group.title.clone(),
                });
            }

            for entry in &group.children {
                match entry {
                    // An empty bare path is the scope root
                    SidebarEntry::Path(_) => {}
                    SidebarEntry::Titled(path, label) => {
                        if path.is_empty() {
                            errors.push(ValidationError::EmptyPath {
                                group: group.title.clone(),
                            });
                        } else if !path.starts_with('/') {
                            errors.push(ValidationError::RelativePath {
                                group: group.title.clone(),
                                path: path.clone(),
                            });
                        }
                        if label.trim().is_empty() {
                            errors.push(ValidationError::EmptyLabel {
                                group: group.title.clone(),
                                path: path.clone(),
                            });
                        }
                    }
                }
            }
        }
    }

    // Plugins
    for (plugin, options) in &config.plugins {
        for (option, value) in options {
            if let OptionValue::Derived(derived) = value {
                if !derivations.contains(&derived.derive) {
                    errors.push(ValidationError::UnknownDerivation {
                        plugin: plugin.clone(),
                        option: option.clone(),
                        name: derived.derive.clone(),
                    });
                }
            }
        }
    }

    errors
}
