use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Options handed to one named build-time plugin
pub type PluginOptions = BTreeMap<String, OptionValue>;

/// A plugin option is either a literal value or computed from the site and
/// page context by a named derivation.
///
/// Derived values are written as `{ derive = "site.description" }`, so a
/// literal table holding only a `derive` key (and optionally `append`) is
/// always read as a derivation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Derived(DerivedOption),
    Literal(toml::Value),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DerivedOption {
    /// Name the callback is registered under
    pub derive: String,
    /// Literal suffix concatenated to the derived value as is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub append: Option<String>,
}

impl DerivedOption {
    pub fn new(derive: impl Into<String>) -> Self {
        Self {
            derive: derive.into(),
            append: None,
        }
    }

    pub fn append(mut self, suffix: impl Into<String>) -> Self {
        self.append = Some(suffix.into());
        self
    }
}

impl From<toml::Value> for OptionValue {
    fn from(value: toml::Value) -> Self {
        OptionValue::Literal(value)
    }
}

impl From<DerivedOption> for OptionValue {
    fn from(derived: DerivedOption) -> Self {
        OptionValue::Derived(derived)
    }
}
