use std::path::Path;

mod validator;

pub use validator::validate_config;

#[derive(Clone, Debug, PartialEq)]
pub enum ValidationError {
    MissingField(String),
    DuplicateNavText(String),
    EmptyNavLink {
        text: String,
    },
    DuplicateGroupTitle {
        scope: String,
        title: String,
    },
    InvalidScope(String),
    EmptyPath {
        group: String,
    },
    RelativePath {
        group: String,
        path: String,
    },
    EmptyLabel {
        group: String,
        path: String,
    },
    EmptyHeadTag(usize),
    UnknownDerivation {
        plugin: String,
        option: String,
        name: String,
    },
    DanglingLink {
        source: String,
        route: String,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "Missing field '{}'", field),
            Self::DuplicateNavText(text) => {
                write!(f, "Duplicate navigation entry '{}'", text)
            }
            Self::EmptyNavLink { text } => {
                write!(f, "Navigation entry '{}' has an empty link", text)
            }
            Self::DuplicateGroupTitle { scope, title } => write!(
                f,
                "Duplicate sidebar group '{}' in scope '{}'",
                title, scope
            ),
            Self::InvalidScope(scope) => write!(
                f,
                "Sidebar scope '{}' must start and end with '/'",
                scope
            ),
            Self::EmptyPath { group } => {
                write!(f, "Sidebar group '{}' has an entry with an empty path", group)
            }
            Self::RelativePath { group, path } => write!(
                f,
                "Sidebar group '{}': path '{}' must start with '/'",
                group, path
            ),
            Self::EmptyLabel { group, path } => write!(
                f,
                "Sidebar group '{}': label for '{}' is empty",
                group, path
            ),
            Self::EmptyHeadTag(index) => write!(f, "Head entry #{} has no tag name", index + 1),
            Self::UnknownDerivation {
                plugin,
                option,
                name,
            } => write!(
                f,
                "Plugin '{}' option '{}' derives from unknown '{}'",
                plugin, option, name
            ),
            Self::DanglingLink { source, route } => {
                write!(f, "{} links to '{}' but no such page exists", source, route)
            }
        }
    }
}

pub fn format_errors(file_path: &Path, errors: &[ValidationError], as_warnings: bool) -> String {
    let mut output = format!(
        "{}: Validation {} for '{}'\n",
        if as_warnings { "Warning" } else { "Error" },
        if as_warnings { "issues" } else { "failed" },
        file_path.display()
    );
    for error in errors {
        output.push_str(&format!("  → {}\n", error));
    }
    output
}
