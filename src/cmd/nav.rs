use comfy_table::{presets::UTF8_FULL, Cell, Table};
use eyre::Result;

use crate::config::{NavItem, ThemeConfig};
use crate::shared;

fn nav_table(theme: &ThemeConfig) -> Result<Table> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Text", "Link"]);

    for item in &theme.nav {
        match item {
            NavItem::Link(link) => {
                table.add_row(vec![Cell::new(&link.text), Cell::new(&link.link)]);
            }
            NavItem::Dropdown(dropdown) => {
                table.add_row(vec![Cell::new(&dropdown.text), Cell::new("")]);
                for link in &dropdown.items {
                    table.add_row(vec![
                        Cell::new(format!("  └ {}", link.text)),
                        Cell::new(&link.link),
                    ]);
                }
            }
        }
    }

    if let (Some(url), Some(label)) = (theme.repo_url()?, theme.repo_label()?) {
        table.add_row(vec![Cell::new(label), Cell::new(url)]);
    }

    Ok(table)
}

/// Prints the navigation bar entries
pub async fn nav() -> Result<()> {
    let site = shared::load_site().await?;
    println!("{}", nav_table(&site.config.theme_config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NavDropdown, NavLink};

    #[test]
    fn lists_links_dropdowns_and_repository() {
        let theme = ThemeConfig {
            repo: Some("lorisleiva/laravel-actions".into()),
            nav: vec![
                NavItem::Link(NavLink::new("Documentation", "/")),
                NavItem::Dropdown(NavDropdown {
                    text: "Version".into(),
                    items: vec![NavLink::new("2.x", "/2.x/"), NavLink::new("1.x", "/1.x/")],
                }),
            ],
            ..ThemeConfig::default()
        };

        let table = nav_table(&theme).unwrap();
        // documentation, version, two items and the repository link
        assert_eq!(table.row_iter().count(), 5);

        let rendered = table.to_string();
        assert!(rendered.contains("└ 1.x"));
        assert!(rendered.contains("https://github.com/lorisleiva/laravel-actions"));
    }
}
