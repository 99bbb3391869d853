//! Sitemap and robots.txt generation.
//!
//! The sitemap lists the static pages, one landing page per declared
//! category and one page per stored article:
//!
//! ```xml
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://site/articles/{id}/</loc>
//!     <lastmod>2025-10-01</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>0.6</priority>
//!   </url>
//! </urlset>
//! ```

use quick_xml::events::{BytesEnd, BytesStart, Event};
use std::error::Error;

use crate::config::SiteConfig;
use crate::models::ArticlesData;
use crate::outputs::xml::{finish_document, new_document, text_element};
use crate::utils::{date_part, slugify};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Static pages: (path, priority, changefreq).
const STATIC_PAGES: [(&str, &str, &str); 4] = [
    ("", "1.0", "daily"),
    ("/about/", "0.8", "weekly"),
    ("/articles/", "0.9", "daily"),
    ("/categories/", "0.8", "weekly"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct UrlEntry {
    pub loc: String,
    pub lastmod: String,
    pub changefreq: &'static str,
    pub priority: &'static str,
}

/// Collect the sitemap entries for the current store.
///
/// The result always has `4 + categories + articles` entries.
pub fn sitemap_entries(data: &ArticlesData, config: &SiteConfig, today: &str) -> Vec<UrlEntry> {
    let mut entries = Vec::with_capacity(STATIC_PAGES.len() + data.categories.len() + data.articles.len());

    for (path, priority, changefreq) in STATIC_PAGES {
        entries.push(UrlEntry {
            loc: config.url_for(path),
            lastmod: today.to_string(),
            changefreq,
            priority,
        });
    }

    for category in &data.categories {
        entries.push(UrlEntry {
            loc: config.url_for(&format!("/categories/{}/", slugify(category))),
            lastmod: today.to_string(),
            changefreq: "weekly",
            priority: "0.7",
        });
    }

    for article in &data.articles {
        let lastmod = date_part(&article.updated_at)
            .or_else(|| date_part(&article.published_at))
            .unwrap_or_else(|| today.to_string());
        entries.push(UrlEntry {
            loc: config.url_for(&format!("/articles/{}/", article.id)),
            lastmod,
            changefreq: "weekly",
            priority: "0.6",
        });
    }

    entries
}

/// Render entries as a sitemap document.
pub fn render_sitemap(entries: &[UrlEntry]) -> Result<String, Box<dyn Error>> {
    let mut writer = new_document()?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_NS));
    writer.write_event(Event::Start(urlset))?;

    for entry in entries {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        text_element(&mut writer, "loc", &entry.loc)?;
        text_element(&mut writer, "lastmod", &entry.lastmod)?;
        text_element(&mut writer, "changefreq", entry.changefreq)?;
        text_element(&mut writer, "priority", entry.priority)?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;
    finish_document(writer)
}

/// `robots.txt` allowing everything and pointing at the sitemap.
pub fn robots_txt(config: &SiteConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}\n",
        config.url_for("/sitemap.xml")
    )
}
