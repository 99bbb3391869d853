//! RSS 2.0 feed generation (`feed.xml`).
//!
//! # Feed Format
//!
//! ```xml
//! <rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
//!   <channel>
//!     <title>…</title>
//!     <atom:link href="https://site/feed.xml" rel="self" type="application/rss+xml"/>
//!     <item>
//!       <title>…</title>
//!       <link>https://site/articles/{id}/</link>
//!       <guid>https://site/articles/{id}/</guid>
//!       <pubDate>Wed, 01 Oct 2025 08:30:00 GMT</pubDate>
//!     </item>
//!   </channel>
//! </rss>
//! ```

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use std::error::Error;
use tracing::{debug, warn};

use crate::config::SiteConfig;
use crate::models::Article;
use crate::outputs::xml::{finish_document, new_document, text_element};
use crate::utils::{parse_timestamp, rfc822};

/// Number of articles carried in the feed.
pub const FEED_ITEM_LIMIT: usize = 20;

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// Render the feed for the first [`FEED_ITEM_LIMIT`] articles in store order.
///
/// # Arguments
///
/// * `articles` - Stored articles, newest first
/// * `config` - Channel title, description, links and contacts
/// * `built_at` - `lastBuildDate`, also used for items whose date does not parse
///
/// # Returns
///
/// The complete `feed.xml` document, or an error if XML writing fails.
pub fn build_rss(articles: &[Article], config: &SiteConfig, built_at: DateTime<Utc>) -> Result<String, Box<dyn Error>> {
    let mut writer = new_document()?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    rss.push_attribute(("xmlns:atom", ATOM_NS));
    writer.write_event(Event::Start(rss))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    text_element(&mut writer, "title", &config.title)?;
    text_element(&mut writer, "description", &config.description)?;
    text_element(&mut writer, "link", &config.site_url)?;
    text_element(&mut writer, "language", &config.language)?;
    text_element(&mut writer, "managingEditor", &config.managing_editor)?;
    text_element(&mut writer, "webMaster", &config.web_master)?;
    text_element(&mut writer, "lastBuildDate", &rfc822(built_at))?;
    let self_link = config.url_for("/feed.xml");
    writer
        .create_element("atom:link")
        .with_attribute(("href", self_link.as_str()))
        .with_attribute(("rel", "self"))
        .with_attribute(("type", "application/rss+xml"))
        .write_empty()?;

    for article in articles.iter().take(FEED_ITEM_LIMIT) {
        let link = config.url_for(&format!("/articles/{}/", article.id));
        let pub_date = match parse_timestamp(&article.published_at) {
            Some(at) => at,
            None => {
                warn!(id = %article.id, published_at = %article.published_at, "Unparseable publish date; using build time");
                built_at
            }
        };

        writer.write_event(Event::Start(BytesStart::new("item")))?;
        text_element(&mut writer, "title", &article.title)?;
        text_element(&mut writer, "description", &article.excerpt)?;
        text_element(&mut writer, "link", &link)?;
        text_element(&mut writer, "guid", &link)?;
        text_element(&mut writer, "pubDate", &rfc822(pub_date))?;
        text_element(&mut writer, "category", &article.category)?;
        text_element(&mut writer, "author", &article.author.name)?;
        writer.write_event(Event::End(BytesEnd::new("item")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    debug!(items = articles.len().min(FEED_ITEM_LIMIT), "Rendered RSS feed");
    finish_document(writer)
}
