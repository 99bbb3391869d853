//! Site navigation data (`navigation.json`).
//!
//! The header, footer and category sidebar are rendered from this file, so
//! it carries the fixed menu structure plus the busiest categories.

use serde::Serialize;

use crate::config::SiteConfig;
use crate::outputs::stats::{CategoryStat, CategoryStats};

/// Number of categories surfaced in navigation.
pub const NAV_CATEGORY_LIMIT: usize = 7;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    pub main_menu: Vec<MenuItem>,
    pub categories: Vec<CategoryStat>,
    pub footer_links: Vec<FooterGroup>,
    pub social: Vec<SocialLink>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuItem {
    pub name: String,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FooterGroup {
    pub title: String,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Link {
    pub name: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SocialLink {
    pub name: String,
    pub href: String,
    pub icon: String,
}

fn link(name: &str, href: &str) -> Link {
    Link {
        name: name.to_string(),
        href: href.to_string(),
    }
}

fn menu_item(name: &str, href: &str) -> MenuItem {
    MenuItem {
        name: name.to_string(),
        href: href.to_string(),
        active: true,
    }
}

/// Build navigation from the computed statistics.
pub fn generate_navigation(stats: &CategoryStats, config: &SiteConfig) -> Navigation {
    Navigation {
        main_menu: vec![
            menu_item("Home", "/"),
            menu_item("Articles", "/articles/"),
            menu_item("Categories", "/categories/"),
            menu_item("About", "/about/"),
        ],
        categories: stats
            .categories
            .iter()
            .take(NAV_CATEGORY_LIMIT)
            .cloned()
            .collect(),
        footer_links: vec![
            FooterGroup {
                title: "Content".to_string(),
                links: vec![
                    link("Latest Articles", "/articles/"),
                    link("Browse Categories", "/categories/"),
                    link("Featured Posts", "/#featured"),
                ],
            },
            FooterGroup {
                title: "About".to_string(),
                links: vec![
                    link("Our Mission", "/about/"),
                    link("AI Authors", "/about/#authors"),
                    link("Contact", "/about/#contact"),
                ],
            },
            FooterGroup {
                title: "Resources".to_string(),
                links: vec![link("RSS Feed", "/feed.xml"), link("Sitemap", "/sitemap.xml")],
            },
        ],
        social: vec![SocialLink {
            name: "GitHub".to_string(),
            href: config.github_url.clone(),
            icon: "github".to_string(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_with(n: usize) -> CategoryStats {
        CategoryStats {
            categories: (0..n)
                .map(|i| CategoryStat {
                    name: format!("Cat {i}"),
                    count: n - i,
                    slug: format!("cat-{i}"),
                    latest_article: None,
                    description: String::new(),
                })
                .collect(),
            authors: vec![],
            total_articles: 0,
            last_updated: "now".to_string(),
        }
    }

    #[test]
    fn test_navigation_keeps_top_seven_categories() {
        let nav = generate_navigation(&stats_with(10), &SiteConfig::default());
        assert_eq!(nav.categories.len(), NAV_CATEGORY_LIMIT);
        assert_eq!(nav.categories[0].name, "Cat 0");
        assert_eq!(nav.categories[6].name, "Cat 6");
    }

    #[test]
    fn test_navigation_static_sections() {
        let mut config = SiteConfig::default();
        config.github_url = "https://github.com/example/mag".to_string();
        let nav = generate_navigation(&stats_with(2), &config);

        let menu: Vec<&str> = nav.main_menu.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(menu, vec!["Home", "Articles", "Categories", "About"]);
        assert_eq!(nav.footer_links.len(), 3);
        assert_eq!(nav.footer_links[2].links[0].href, "/feed.xml");
        assert_eq!(nav.social[0].href, "https://github.com/example/mag");
        assert_eq!(nav.categories.len(), 2);

        let json = serde_json::to_string(&nav).unwrap();
        assert!(json.contains("\"mainMenu\""));
        assert!(json.contains("\"footerLinks\""));
    }
}
