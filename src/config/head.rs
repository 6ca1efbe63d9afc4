use serde::{Deserialize, Serialize};

/// A directive to inject a tag into the document head of every page.
///
/// Stored as `[tag, { attributes }]` or `[tag, { attributes }, "inner content"]`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(from = "RawHeadTag", into = "RawHeadTag")]
pub struct HeadTag {
    pub tag: String,
    /// Attribute order is kept as written
    pub attrs: toml::Table,
    pub content: Option<String>,
}

impl HeadTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: toml::Table::new(),
            content: None,
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

// The three element form has to be tried first, otherwise its trailing
// content would be silently dropped by the shorter tuple.
#[derive(Deserialize, Serialize)]
#[serde(untagged)]
enum RawHeadTag {
    WithContent(String, toml::Table, String),
    Bare(String, toml::Table),
}

impl From<RawHeadTag> for HeadTag {
    fn from(raw: RawHeadTag) -> Self {
        match raw {
            RawHeadTag::WithContent(tag, attrs, content) => Self {
                tag,
                attrs,
                content: Some(content),
            },
            RawHeadTag::Bare(tag, attrs) => Self {
                tag,
                attrs,
                content: None,
            },
        }
    }
}

impl From<HeadTag> for RawHeadTag {
    fn from(head: HeadTag) -> Self {
        match head.content {
            Some(content) => RawHeadTag::WithContent(head.tag, head.attrs, content),
            None => RawHeadTag::Bare(head.tag, head.attrs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        head: Vec<HeadTag>,
    }

    #[test]
    fn parses_both_forms() {
        let wrapper: Wrapper = toml::from_str(
            r#"head = [
                ["link", { rel = "icon", href = "/favicon.png" }],
                ["script", { async = true }, "console.log('hi')"],
            ]"#,
        )
        .unwrap();

        assert_eq!(
            wrapper.head[0],
            HeadTag::new("link")
                .attr("rel", "icon")
                .attr("href", "/favicon.png")
        );
        assert_eq!(wrapper.head[1].content.as_deref(), Some("console.log('hi')"));
        assert_eq!(wrapper.head[1].attrs["async"], toml::Value::Boolean(true));
    }

    #[test]
    fn keeps_attribute_order() {
        let wrapper: Wrapper =
            toml::from_str(r#"head = [["link", { rel = "icon", href = "/a.png" }]]"#).unwrap();
        let keys: Vec<_> = wrapper.head[0].attrs.keys().cloned().collect();
        assert_eq!(keys, ["rel", "href"]);
    }
}
