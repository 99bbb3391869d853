//! The on-disk article store (`articles.json`).
//!
//! The store is a single JSON document that is read, rewritten in full and
//! closed within one run. Merging keeps the list newest first, unique by
//! article id and bounded by [`ARTICLE_CAP`].

use itertools::Itertools;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument, warn};

use crate::models::{Article, ArticlesData};
use crate::outputs::json::write_pretty_json;

/// Maximum number of articles kept in the store.
pub const ARTICLE_CAP: usize = 200;

/// What a merge did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    pub added: usize,
    pub duplicates_dropped: usize,
    pub truncated: usize,
    pub total: usize,
}

/// Load the store, starting a fresh document when the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load_articles(path: &Path, now: &str) -> Result<ArticlesData, Box<dyn Error>> {
    if !fs::try_exists(path).await? {
        info!("Article store not found; starting a new one");
        return Ok(ArticlesData::new_default(now));
    }
    let raw = fs::read_to_string(path).await?;
    let data: ArticlesData = serde_json::from_str(&raw)
        .map_err(|e| format!("malformed article store {}: {e}", path.display()))?;
    info!(articles = data.articles.len(), "Loaded article store");
    Ok(data)
}

/// Load the store for read-only consumers, degrading to an empty document.
///
/// The artifact builders still produce valid (empty) output when the store is
/// missing or corrupt.
pub async fn load_articles_or_empty(path: &Path) -> ArticlesData {
    match fs::read_to_string(path).await {
        Ok(raw) => match serde_json::from_str::<ArticlesData>(&raw) {
            Ok(data) => {
                info!(path = %path.display(), articles = data.articles.len(), categories = data.categories.len(), "Loaded article store");
                data
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Article store is malformed; using empty data");
                ArticlesData::empty()
            }
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Article store not readable; using empty data");
            ArticlesData::empty()
        }
    }
}

/// Merge freshly generated articles into the store.
///
/// New articles go first. Ids are unique afterwards, the first occurrence
/// winning, so a regenerated article replaces its older copy. When the list
/// exceeds [`ARTICLE_CAP`] the oldest entries are dropped and
/// `articlesLimitReached` is set.
///
/// # Arguments
///
/// * `data` - The loaded store, updated in place
/// * `new_articles` - This run's articles, newest first
/// * `now` - ISO timestamp written to `lastUpdated` and `lastGenerationDate`
///
/// # Returns
///
/// A [`MergeOutcome`] with the counts of added, duplicate and truncated articles.
///
/// # Examples
///
/// ```ignore
/// let mut data = ArticlesData::new_default(&now);
/// let outcome = merge_articles(&mut data, todays_articles, &now);
/// assert!(outcome.total <= ARTICLE_CAP);
/// ```
pub fn merge_articles(data: &mut ArticlesData, new_articles: Vec<Article>, now: &str) -> MergeOutcome {
    let added = new_articles.len();
    let existing = std::mem::take(&mut data.articles);
    let combined_len = added + existing.len();

    let mut merged: Vec<Article> = new_articles
        .into_iter()
        .chain(existing)
        .unique_by(|a| a.id.clone())
        .collect();
    let duplicates_dropped = combined_len - merged.len();

    let mut truncated = 0;
    if merged.len() > ARTICLE_CAP {
        truncated = merged.len() - ARTICLE_CAP;
        merged.truncate(ARTICLE_CAP);
        data.metadata.articles_limit_reached = Some(true);
    }

    data.articles = merged;
    data.metadata.total_articles = data.articles.len();
    data.metadata.last_updated = now.to_string();
    data.metadata.last_generation_date = Some(now.to_string());
    data.metadata.new_articles_added = Some(added);

    MergeOutcome {
        added,
        duplicates_dropped,
        truncated,
        total: data.articles.len(),
    }
}

/// Write the store back as pretty-printed JSON.
pub async fn save_articles(path: &Path, data: &ArticlesData) -> Result<(), Box<dyn Error>> {
    write_pretty_json(path, data).await
}
