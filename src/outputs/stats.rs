//! Category and author statistics (`category-stats.json`).

use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Article, ArticleAuthor};
use crate::utils::{parse_timestamp, slugify};

/// Aggregated counts over the whole article store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub categories: Vec<CategoryStat>,
    pub authors: Vec<AuthorStat>,
    pub total_articles: usize,
    pub last_updated: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStat {
    pub name: String,
    pub count: usize,
    pub slug: String,
    pub latest_article: Option<LatestArticle>,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorStat {
    pub id: String,
    pub name: String,
    pub count: usize,
    pub latest_article: Option<LatestArticle>,
}

/// Pointer to the most recently published article in a group.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestArticle {
    pub id: String,
    pub title: String,
    pub published_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<ArticleAuthor>,
}

/// Blurb shown on a category's landing page.
pub fn category_description(category: &str) -> String {
    match category {
        "AI Tools" => "Discover the latest AI-powered development tools and how they enhance productivity.".to_string(),
        "Machine Learning" => "Deep dive into MLOps, model deployment, and machine learning best practices.".to_string(),
        "Testing" => "Explore AI-driven testing strategies and automation techniques.".to_string(),
        "DevOps" => "Learn about intelligent automation and AI in CI/CD pipelines.".to_string(),
        "Future Tech" => "Insights into emerging AI technologies and their ethical implications.".to_string(),
        "Automation" => "Streamline your workflows with smart automation solutions.".to_string(),
        "Ethics" => "Navigate the ethical considerations of AI development and deployment.".to_string(),
        other => format!("Articles about {other} in AI development."),
    }
}

/// True when `candidate` was published strictly after `current`.
///
/// Only two parseable timestamps compare. A latest article whose date does
/// not parse stays in place.
fn is_newer(candidate: &str, current: &str) -> bool {
    match (parse_timestamp(candidate), parse_timestamp(current)) {
        (Some(c), Some(cur)) => c > cur,
        _ => false,
    }
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

/// Compute per-category and per-author statistics.
///
/// Both lists are ordered by article count, descending; equal counts keep the
/// order in which the group was first seen.
pub fn generate_category_stats(articles: &[Article], now: &str) -> CategoryStats {
    let mut categories: Vec<CategoryStat> = Vec::new();
    let mut category_index: HashMap<String, usize> = HashMap::new();
    let mut authors: Vec<AuthorStat> = Vec::new();
    let mut author_index: HashMap<String, usize> = HashMap::new();

    for article in articles {
        let category = or_default(&article.category, "Uncategorized");
        let author_id = or_default(&article.author.id, "unknown");
        let author_name = or_default(&article.author.name, "Unknown Author");

        let ci = *category_index.entry(category.to_string()).or_insert_with(|| {
            categories.push(CategoryStat {
                name: category.to_string(),
                count: 0,
                slug: slugify(category),
                latest_article: None,
                description: category_description(category),
            });
            categories.len() - 1
        });
        let stat = &mut categories[ci];
        stat.count += 1;
        let replace = match &stat.latest_article {
            None => true,
            Some(latest) => is_newer(&article.published_at, &latest.published_at),
        };
        if replace {
            stat.latest_article = Some(LatestArticle {
                id: article.id.clone(),
                title: article.title.clone(),
                published_at: article.published_at.clone(),
                author: Some(article.author.clone()),
            });
        }

        let ai = *author_index.entry(author_id.to_string()).or_insert_with(|| {
            authors.push(AuthorStat {
                id: author_id.to_string(),
                name: author_name.to_string(),
                count: 0,
                latest_article: None,
            });
            authors.len() - 1
        });
        let stat = &mut authors[ai];
        stat.count += 1;
        let replace = match &stat.latest_article {
            None => true,
            Some(latest) => is_newer(&article.published_at, &latest.published_at),
        };
        if replace {
            stat.latest_article = Some(LatestArticle {
                id: article.id.clone(),
                title: article.title.clone(),
                published_at: article.published_at.clone(),
                author: None,
            });
        }
    }

    // sort_by is stable, so ties stay in first-seen order
    categories.sort_by(|a, b| b.count.cmp(&a.count));
    authors.sort_by(|a, b| b.count.cmp(&a.count));

    CategoryStats {
        categories,
        authors,
        total_articles: articles.len(),
        last_updated: now.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticleMetadata;

    fn article(id: &str, category: &str, author: &str, published_at: &str) -> Article {
        Article {
            id: id.to_string(),
            title: format!("Title {id}"),
            slug: id.to_string(),
            excerpt: String::new(),
            content: String::new(),
            source_article: None,
            banner_image: None,
            author: ArticleAuthor {
                id: author.to_string(),
                name: author.to_uppercase(),
                ..ArticleAuthor::default()
            },
            published_at: published_at.to_string(),
            updated_at: published_at.to_string(),
            category: category.to_string(),
            tags: vec![],
            reading_time: 1,
            featured: false,
            metadata: ArticleMetadata::default(),
        }
    }

    #[test]
    fn test_counts_and_ordering() {
        let articles = vec![
            article("a", "Testing", "zara", "2025-10-01T00:00:00.000Z"),
            article("b", "DevOps", "sofia", "2025-10-02T00:00:00.000Z"),
            article("c", "DevOps", "sofia", "2025-10-03T00:00:00.000Z"),
            article("d", "AI Tools", "maya", "2025-10-04T00:00:00.000Z"),
        ];

        let stats = generate_category_stats(&articles, "now");

        let names: Vec<&str> = stats.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["DevOps", "Testing", "AI Tools"]);
        assert_eq!(stats.categories[0].count, 2);
        assert_eq!(stats.categories[0].slug, "devops");
        assert_eq!(stats.authors[0].id, "sofia");
        assert_eq!(stats.authors[0].name, "SOFIA");
        assert_eq!(stats.total_articles, 4);
        assert_eq!(stats.last_updated, "now");
    }

    #[test]
    fn test_latest_article_is_newest_by_date() {
        let articles = vec![
            article("new", "DevOps", "sofia", "2025-10-05T00:00:00.000Z"),
            article("older", "DevOps", "sofia", "2025-09-01T00:00:00.000Z"),
        ];

        let stats = generate_category_stats(&articles, "now");
        let latest = stats.categories[0].latest_article.as_ref().unwrap();
        assert_eq!(latest.id, "new");
        assert!(latest.author.is_some());
        let author_latest = stats.authors[0].latest_article.as_ref().unwrap();
        assert_eq!(author_latest.id, "new");
        assert!(author_latest.author.is_none());
    }

    #[test]
    fn test_unparseable_latest_date_is_kept() {
        let articles = vec![
            article("undated", "Testing", "zara", "someday"),
            article("dated", "Testing", "zara", "2025-10-05T00:00:00.000Z"),
        ];

        let stats = generate_category_stats(&articles, "now");
        assert_eq!(stats.categories[0].latest_article.as_ref().unwrap().id, "undated");
        assert_eq!(stats.authors[0].latest_article.as_ref().unwrap().id, "undated");
    }

    #[test]
    fn test_missing_category_and_author_defaults() {
        let articles = vec![article("x", "", "", "bad date")];
        let stats = generate_category_stats(&articles, "now");

        assert_eq!(stats.categories[0].name, "Uncategorized");
        assert_eq!(stats.categories[0].description, "Articles about Uncategorized in AI development.");
        assert_eq!(stats.authors[0].id, "unknown");
        assert_eq!(stats.authors[0].name, "Unknown Author");
    }

    #[test]
    fn test_empty_store() {
        let stats = generate_category_stats(&[], "now");
        assert!(stats.categories.is_empty());
        assert!(stats.authors.is_empty());
        assert_eq!(stats.total_articles, 0);
    }

    #[test]
    fn test_serialized_shape() {
        let stats = generate_category_stats(&[article("a", "Ethics", "kai", "2025-10-01")], "now");
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"latestArticle\""));
        assert!(json.contains("\"totalArticles\":1"));
        assert!(json.contains("\"publishedAt\":\"2025-10-01\""));
    }
}
