//! Deterministic mock articles for test mode.
//!
//! Test mode exercises the whole store and artifact pipeline without an API
//! key: each author gets one article built from a canned source story.

use chrono::{DateTime, Utc};

use crate::generator::compose::{article_id, placeholder_banner_url};
use crate::models::{Article, ArticleAuthor, ArticleMetadata, AuthorProfile, BannerImage, SourceArticle};
use crate::utils::{iso_timestamp, slugify, truncate_chars};

struct MockSource {
    title: &'static str,
    url: &'static str,
    source: &'static str,
    summary: &'static str,
    relevance_score: f64,
    publish_date: &'static str,
}

const DEFAULT_MOCK_AUTHOR: &str = "maya-chen";

static MOCK_SOURCES: [(&str, MockSource); 5] = [
    (
        "maya-chen",
        MockSource {
            title: "GitHub Copilot Enterprise Features: What's New for Development Teams",
            url: "https://github.blog/2025-09-15-github-copilot-enterprise-features/",
            source: "GitHub Blog",
            summary: "GitHub announces new enterprise features for Copilot including team analytics, custom model training, and enhanced security controls.",
            relevance_score: 9.0,
            publish_date: "2025-09-15T10:00:00Z",
        },
    ),
    (
        "alex-rodriguez",
        MockSource {
            title: "AWS SageMaker Introduces New MLOps Pipeline Automation Features",
            url: "https://aws.amazon.com/blogs/machine-learning/sagemaker-mlops-automation-2025/",
            source: "AWS Machine Learning Blog",
            summary: "AWS announces enhanced MLOps capabilities in SageMaker including automated model monitoring and CI/CD integration.",
            relevance_score: 9.0,
            publish_date: "2025-09-20T14:30:00Z",
        },
    ),
    (
        "zara-okafor",
        MockSource {
            title: "Playwright Announces AI-Powered Test Generation in Latest Release",
            url: "https://playwright.dev/blog/ai-test-generation-2025/",
            source: "Playwright Blog",
            summary: "Microsoft's Playwright introduces AI-driven test case generation for comprehensive automated testing suites.",
            relevance_score: 10.0,
            publish_date: "2025-09-18T09:15:00Z",
        },
    ),
    (
        "kai-nakamura",
        MockSource {
            title: "OpenAI's New Constitutional AI Framework: Balancing Capability and Safety",
            url: "https://openai.com/blog/constitutional-ai-framework-2025/",
            source: "OpenAI Blog",
            summary: "OpenAI releases a framework for constitutional AI with built-in ethical constraints and safety measures.",
            relevance_score: 9.0,
            publish_date: "2025-09-22T16:45:00Z",
        },
    ),
    (
        "sofia-andersson",
        MockSource {
            title: "GitHub Actions Introduces Intelligent Workflow Optimization",
            url: "https://github.blog/2025-09-25-github-actions-ai-optimization/",
            source: "GitHub Blog",
            summary: "GitHub unveils AI-powered workflow optimization that identifies bottlenecks and suggests CI/CD improvements.",
            relevance_score: 9.0,
            publish_date: "2025-09-25T11:20:00Z",
        },
    ),
];

fn mock_source(author_id: &str) -> &'static MockSource {
    let lookup = |id: &str| MOCK_SOURCES.iter().find(|(key, _)| *key == id).map(|(_, s)| s);
    lookup(author_id)
        .or_else(|| lookup(DEFAULT_MOCK_AUTHOR))
        .unwrap_or(&MOCK_SOURCES[0].1)
}

/// Keyword-only category match; anything unrecognised lands in `DevOps`.
fn mock_category(specialization: &str) -> &'static str {
    if specialization.contains("Tools") {
        "AI Tools"
    } else if specialization.contains("Machine Learning") {
        "Machine Learning"
    } else if specialization.contains("Testing") {
        "Testing"
    } else if specialization.contains("Ethics") {
        "Future Tech"
    } else {
        "DevOps"
    }
}

fn mock_content(title: &str, author: &AuthorProfile, source: &MockSource) -> String {
    format!(
        "# {title}\n\n## Introduction\n\nI recently came across an interesting article from {src} about \"{src_title}\". \
This development caught my attention because it directly impacts our field of {spec}.\n\n\
## Analysis\n\n{summary}\n\n\
This is a mock article generated for testing purposes. In production, this would contain a full AI-generated analysis of the source material.\n\n\
## My Perspective\n\nBased on my experience in {spec}, I see several key implications:\n\n\
- Point 1 about the practical applications\n- Point 2 about the technical challenges\n- Point 3 about the industry impact\n\n\
## Conclusion\n\nThis development represents an important step forward in our field. \
Teams should consider how these changes might affect their current workflows and plan accordingly.\n\n\
**Source:** [{src_title}]({url}) - {src}",
        src = source.source,
        src_title = source.title,
        spec = author.specialization,
        summary = source.summary,
        url = source.url,
    )
}

/// One mock article per author, the first two marked as featured.
pub fn generate_mock_articles(authors: &[AuthorProfile], now: DateTime<Utc>) -> Vec<Article> {
    let stamp = iso_timestamp(now);

    authors
        .iter()
        .enumerate()
        .map(|(index, author)| {
            let source = mock_source(&author.id);
            let title = format!("{}'s Analysis: {}", author.name, source.title);
            let slug = slugify(&title);
            let id = article_id(now, &author.id, &slug);
            let first_specialization_word = author.specialization.split(' ').next().unwrap_or_default();

            Article {
                id,
                excerpt: format!(
                    "A comprehensive analysis of recent developments in {}, based on {}'s latest announcement.",
                    author.specialization.to_lowercase(),
                    source.source
                ),
                content: mock_content(&title, author, source),
                source_article: Some(SourceArticle {
                    url: Some(source.url.to_string()),
                    title: source.title.to_string(),
                    publish_date: source.publish_date.to_string(),
                    summary: source.summary.to_string(),
                    author: source.source.to_string(),
                    relevance_score: source.relevance_score,
                    research_date: Some(stamp.clone()),
                    research_query: Some(
                        author
                            .research_interests
                            .search_terms
                            .first()
                            .cloned()
                            .unwrap_or_else(|| "AI development".to_string()),
                    ),
                }),
                banner_image: Some(BannerImage {
                    url: placeholder_banner_url(&truncate_chars(&title, 30)),
                    description: format!("Research-based article banner for: {title}"),
                    generated_at: stamp.clone(),
                    model: "mock".to_string(),
                    error: None,
                }),
                author: ArticleAuthor::from_profile(author),
                published_at: stamp.clone(),
                updated_at: stamp.clone(),
                category: mock_category(&author.specialization).to_string(),
                tags: vec![
                    "Research-Based".to_string(),
                    "Industry Analysis".to_string(),
                    first_specialization_word.to_string(),
                ],
                reading_time: 4,
                featured: index < 2,
                metadata: ArticleMetadata {
                    word_count: 300,
                    generation_prompt: format!("Research-based article on: {}", source.title),
                    generated_by: "Mock Generator".to_string(),
                    generation_date: stamp.clone(),
                    based_on_source: Some(true),
                    source_relevance: Some(source.relevance_score),
                },
                title,
                slug,
            }
        })
        .collect()
}
