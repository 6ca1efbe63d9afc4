use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::debug;

use crate::config::HeadTag;

/// Elements that never take a closing tag
const VOID_ELEMENTS: [&str; 4] = ["base", "link", "meta", "img"];
/// Elements whose inner content is emitted verbatim
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// Renders head injection directives, one tag per line.
pub fn render_tags(tags: &[HeadTag]) -> String {
    tags.iter().map(render_tag).collect::<Vec<_>>().join("\n")
}

pub fn render_tag(head: &HeadTag) -> String {
    let mut html = format!("<{}", head.tag);
    for (name, value) in &head.attrs {
        match value {
            toml::Value::Boolean(true) => {
                html.push(' ');
                html.push_str(name);
            }
            toml::Value::Boolean(false) => {}
            toml::Value::String(s) => {
                html.push_str(&format!(" {}=\"{}\"", name, encode_double_quoted_attribute(s)));
            }
            other => {
                html.push_str(&format!(
                    " {}=\"{}\"",
                    name,
                    encode_double_quoted_attribute(&other.to_string())
                ));
            }
        }
    }
    html.push('>');

    if VOID_ELEMENTS.contains(&head.tag.as_str()) {
        return html;
    }
    if let Some(content) = &head.content {
        if RAW_TEXT_ELEMENTS.contains(&head.tag.as_str()) {
            html.push_str(content);
        } else {
            html.push_str(&encode_text(content));
        }
    }
    html.push_str(&format!("</{}>", head.tag));
    html
}

/// Meta tags for the resolved options of the `seo` plugin.
///
/// Options without a known meta mapping are ignored.
pub fn seo_tags(options: &toml::Table) -> Vec<HeadTag> {
    let mut tags = Vec::new();
    for (option, value) in options {
        let Some(value) = value.as_str() else {
            debug!(%option, "Skipping non string SEO option");
            continue;
        };
        let properties: &[(&str, &str)] = match option.as_str() {
            "title" => &[("property", "og:title"), ("name", "twitter:title")],
            "description" => &[
                ("name", "description"),
                ("property", "og:description"),
                ("name", "twitter:description"),
            ],
            "image" => &[("property", "og:image"), ("name", "twitter:image")],
            "url" => &[("property", "og:url")],
            "siteTitle" => &[("property", "og:site_name")],
            "type" => &[("property", "og:type")],
            "twitterCard" => &[("name", "twitter:card")],
            "author" => &[("name", "author")],
            _ => {
                debug!(%option, "No meta mapping for SEO option");
                continue;
            }
        };
        for (key, name) in properties {
            tags.push(
                HeadTag::new("meta")
                    .attr(*key, *name)
                    .attr("content", value),
            );
        }
    }
    tags
}
