//! Data models for the article store, author personas and research results.
//!
//! This module defines the structures read from and written to disk:
//! - [`ArticlesData`]: The whole `articles.json` document
//! - [`Article`]: One published article with its embedded author snapshot
//! - [`AuthorProfile`]: An AI author persona loaded from `authors/`
//! - [`ResearchResult`]: A candidate source article returned by the research step
//!
//! JSON field names are camelCase to match the files the site reads. Optional
//! fields default so that hand-edited or older files still load.

use serde::{Deserialize, Serialize};

/// Categories seeded into a fresh `articles.json`.
pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "AI Tools",
    "Machine Learning",
    "Automation",
    "Future Tech",
    "Testing",
    "DevOps",
    "Ethics",
];

/// The full contents of `articles.json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArticlesData {
    /// Articles, newest first.
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub metadata: StoreMetadata,
    /// Category names declared by the site, independent of article usage.
    #[serde(default)]
    pub categories: Vec<String>,
}

impl ArticlesData {
    /// A fresh document as written on the very first generation run.
    pub fn new_default(now: &str) -> Self {
        Self {
            articles: Vec::new(),
            metadata: StoreMetadata {
                last_updated: now.to_string(),
                total_articles: 0,
                version: "1.0.0".to_string(),
                last_generation_date: Some(now.to_string()),
                new_articles_added: Some(0),
                articles_limit_reached: Some(false),
            },
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// An empty document used by the artifact builders when the store is unreadable.
    pub fn empty() -> Self {
        Self {
            articles: Vec::new(),
            metadata: StoreMetadata::default(),
            categories: Vec::new(),
        }
    }
}

/// Bookkeeping stored next to the article list.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreMetadata {
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub total_articles: usize,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_generation_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_articles_added: Option<usize>,
    /// Set once the store has been truncated to its cap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub articles_limit_reached: Option<bool>,
}

impl Default for StoreMetadata {
    fn default() -> Self {
        Self {
            last_updated: String::new(),
            total_articles: 0,
            version: default_version(),
            last_generation_date: None,
            new_articles_added: None,
            articles_limit_reached: None,
        }
    }
}

fn default_version() -> String {
    "1.0.0".to_string()
}

/// A published article.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_article: Option<SourceArticle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_image: Option<BannerImage>,
    #[serde(default)]
    pub author: ArticleAuthor,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub reading_time: u32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub metadata: ArticleMetadata,
}

/// Snapshot of the author embedded in every article.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ArticleAuthor {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub avatar: String,
}

impl ArticleAuthor {
    pub fn from_profile(profile: &AuthorProfile) -> Self {
        Self {
            id: profile.id.clone(),
            name: profile.name.clone(),
            title: profile.title.clone(),
            bio: profile.bio.clone(),
            avatar: format!("/authors/images/{}.png", profile.id),
        }
    }
}

/// Banner art attached to an article.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BannerImage {
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub generated_at: String,
    /// `dall-e-2`, `placeholder` when generation failed, or `mock` in test mode.
    #[serde(default)]
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The researched article an opinion piece responds to.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SourceArticle {
    #[serde(default)]
    pub url: Option<String>,
    pub title: String,
    /// Empty when the research result carried no date.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub publish_date: String,
    #[serde(default)]
    pub summary: String,
    /// Publication that ran the source (`source` in research results).
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub relevance_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research_query: Option<String>,
}

/// Generation bookkeeping for one article.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMetadata {
    #[serde(default)]
    pub word_count: usize,
    #[serde(default)]
    pub generation_prompt: String,
    #[serde(default)]
    pub generated_by: String,
    #[serde(default)]
    pub generation_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub based_on_source: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_relevance: Option<f64>,
}

/// `authors/index.json`.
#[derive(Debug, Deserialize)]
pub struct AuthorsIndex {
    #[serde(default)]
    pub authors: Vec<AuthorRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRef {
    pub id: String,
    /// Profile path relative to the authors directory.
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// An AI author persona.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub specialization: String,
    #[serde(default)]
    pub bio: String,
    /// Persona instructions prepended to every drafting prompt.
    #[serde(default)]
    pub agent_prompt: String,
    #[serde(default)]
    pub expertise: Vec<String>,
    #[serde(default)]
    pub research_interests: ResearchInterests,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writing_style: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchInterests {
    #[serde(default)]
    pub search_terms: Vec<String>,
}

/// A candidate source article as returned by the research prompt.
///
/// The model fills `title`..`publishDate`; the research step adds the query,
/// the research timestamp and the effective relevance score.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchResult {
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub relevance: Option<f64>,
    #[serde(default)]
    pub publish_date: Option<String>,
    #[serde(default)]
    pub research_query: String,
    #[serde(default)]
    pub research_date: String,
    #[serde(default)]
    pub relevance_score: f64,
}

impl ResearchResult {
    pub fn to_source_article(&self) -> SourceArticle {
        SourceArticle {
            url: self.url.clone(),
            title: self.title.clone(),
            publish_date: self.publish_date.clone().unwrap_or_default(),
            summary: self.summary.clone(),
            author: self.source.clone(),
            relevance_score: self.relevance_score,
            research_date: Some(self.research_date.clone()),
            research_query: Some(self.research_query.clone()),
        }
    }
}
