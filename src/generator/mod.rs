//! Article generation.
//!
//! Each author goes through the same pipeline: research recent sources,
//! draft an article about the best one in the author's voice, then create a
//! banner image for it.
//!
//! # Submodules
//!
//! - [`research`]: Source discovery and ranking
//! - [`compose`]: Drafting prompt and article assembly
//! - [`banner`]: Banner description and image generation
//! - [`tags`]: Tag derivation
//! - [`mock`]: Deterministic articles for test mode

pub mod banner;
pub mod compose;
pub mod mock;
pub mod research;
pub mod tags;

#[cfg(test)]
pub(crate) mod fake;

use chrono::{DateTime, Utc};
use rand::{Rng, rng};
use std::error::Error;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};

use crate::api::LanguageModel;
use crate::models::{Article, AuthorProfile};
use banner::{describe_banner, generate_banner};
use compose::{DraftContext, article_request, assemble_article, draft_identity};
use research::research_for_author;

/// Probability that a generated article is marked as featured.
pub const FEATURED_PROBABILITY: f64 = 0.3;

/// Run the full pipeline for one author.
///
/// Returns `Ok(None)` when research finds no usable source.
#[instrument(level = "info", skip_all, fields(author = %author.id))]
pub async fn generate_article_for_author<M: LanguageModel>(
    model: &M,
    author: &AuthorProfile,
    featured: bool,
    now: DateTime<Utc>,
) -> Result<Option<Article>, Box<dyn Error>> {
    let sources = research_for_author(model, author, now).await;
    let Some(best) = sources.first() else {
        warn!("No relevant sources found; skipping author");
        return Ok(None);
    };
    let source = best.to_source_article();
    info!(source = %source.title, relevance = source.relevance_score, "Selected source article");

    let today = now.format("%Y-%m-%d").to_string();
    let content = model.complete(&article_request(author, &source, &today)).await?;
    if content.trim().is_empty() {
        return Err("model returned an empty article".into());
    }

    let ctx = DraftContext {
        author,
        source: &source,
        generated_by: model.chat_model(),
        featured,
        now,
    };
    let identity = draft_identity(&content, &ctx);

    let description = describe_banner(model, &identity.title, author).await;
    let banner = generate_banner(model, description, &identity.id, now).await;

    let article = assemble_article(content, identity, banner, &ctx);
    info!(id = %article.id, words = article.metadata.word_count, "Article drafted");
    Ok(Some(article))
}

/// Generate one article per author, in order.
///
/// # Arguments
///
/// * `model` - Chat and image backend, usually a [`RetryAsk`](crate::api::RetryAsk)
/// * `authors` - Personas to write for
/// * `delay` - Pause between consecutive authors
///
/// # Returns
///
/// The articles that were drafted. A failing author is logged and skipped,
/// so the list can be shorter than `authors` or empty.
pub async fn generate_articles<M: LanguageModel>(
    model: &M,
    authors: &[AuthorProfile],
    delay: Duration,
) -> Vec<Article> {
    let t0 = Instant::now();
    let mut articles = Vec::new();

    for (i, author) in authors.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            sleep(delay).await;
        }

        let featured = rng().random_bool(FEATURED_PROBABILITY);
        match generate_article_for_author(model, author, featured, Utc::now()).await {
            Ok(Some(article)) => articles.push(article),
            Ok(None) => {}
            Err(e) => error!(author = %author.id, error = %e, "Article generation failed; continuing"),
        }
    }

    info!(
        authors = authors.len(),
        generated = articles.len(),
        elapsed_ms = t0.elapsed().as_millis(),
        "Generation finished"
    );
    articles
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use fake::ScriptedModel;

    fn author(id: &str, terms: &[&str]) -> AuthorProfile {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": "Zara Okafor",
            "title": "QA Architect",
            "specialization": "AI-Driven Testing & Automation",
            "bio": "Breaks things for a living.",
            "agentPrompt": "Write like a pragmatic tester.",
            "expertise": ["Test Automation Frameworks"],
            "researchInterests": { "searchTerms": terms },
        }))
        .unwrap()
    }

    const RESEARCH: &str = r#"[
        {"title":"Playwright Ships AI Test Generation","url":"https://playwright.dev/blog","source":"Playwright Blog","summary":"Tests write themselves.","relevance":9,"publishDate":"2025-09-18"},
        {"title":"Minor Note","source":"Elsewhere","relevance":4}
    ]"#;

    #[tokio::test]
    async fn test_full_pipeline_for_author() {
        let draft = "# Let the Robots Write Tests\n\nPlaywright now generates tests from recordings, which changes how QA teams plan their week.\n\nMore text.";
        let model = ScriptedModel::default()
            .chat(Ok(RESEARCH))
            .chat(Ok(draft))
            .chat(Ok("Green grid lines."))
            .image(Ok("https://img.example/banner.png"));
        let now = Utc.with_ymd_and_hms(2025, 10, 2, 8, 0, 0).unwrap();

        let article = generate_article_for_author(&model, &author("zara-okafor", &["AI testing"]), false, now)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(article.title, "Let the Robots Write Tests");
        assert_eq!(article.id, "20251002-zara-okafor-let-the-robots-write-tests");
        assert_eq!(article.category, "Testing");
        // generatedBy records the chat model that drafted the article
        assert_eq!(article.metadata.generated_by, "scripted-chat");
        assert!(model.chat_requests.borrow()[1].user.contains("Published: 2025-09-18"));
        let source = article.source_article.as_ref().unwrap();
        assert_eq!(source.title, "Playwright Ships AI Test Generation");
        assert_eq!(source.author, "Playwright Blog");
        assert_eq!(source.research_query.as_deref(), Some("AI testing"));
        let banner = article.banner_image.as_ref().unwrap();
        assert_eq!(banner.url, "https://img.example/banner.png");
        assert_eq!(banner.description, "Green grid lines.");

        let requests = model.chat_requests.borrow();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1].system, "You are Zara Okafor, QA Architect. Breaks things for a living.");
        assert!(requests[1].user.contains("Today is 2025-10-02."));
    }

    #[tokio::test]
    async fn test_undated_source_is_published_recently() {
        let model = ScriptedModel::default()
            .chat(Ok(r#"[{"title":"Undated Launch","source":"Vendor Blog","relevance":8}]"#))
            .chat(Ok("# Undated\n\nA paragraph that is long enough to become the excerpt of the piece."))
            .chat(Ok("Soft gradients."))
            .image(Ok("https://img.example/u.png"));

        let article = generate_article_for_author(&model, &author("zara-okafor", &["AI testing"]), false, Utc::now())
            .await
            .unwrap()
            .unwrap();

        assert!(model.chat_requests.borrow()[1].user.contains("Published: Recently"));
        assert_eq!(article.source_article.unwrap().publish_date, "");
    }

    #[tokio::test]
    async fn test_author_without_sources_is_skipped() {
        let model = ScriptedModel::default().chat(Ok(r#"[{"title":"Weak","relevance":3}]"#));
        let outcome = generate_article_for_author(&model, &author("zara-okafor", &["AI testing"]), false, Utc::now())
            .await
            .unwrap();
        assert!(outcome.is_none());
    }

    #[tokio::test]
    async fn test_batch_continues_after_failure() {
        let draft = "# Second Author Wins\n\nThis paragraph is comfortably longer than fifty characters in total.";
        let model = ScriptedModel::default()
            // first author: research ok, draft fails
            .chat(Ok(RESEARCH))
            .chat(Err("server error"))
            // second author succeeds, banner falls back
            .chat(Ok(RESEARCH))
            .chat(Ok(draft))
            .chat(Err("no description"))
            .image(Err("quota"));
        let authors = vec![author("first", &["AI testing"]), author("second", &["AI testing"])];

        let articles = generate_articles(&model, &authors, Duration::ZERO).await;

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].author.id, "second");
        let banner = articles[0].banner_image.as_ref().unwrap();
        assert_eq!(banner.model, "placeholder");
        assert!(banner.description.starts_with("A modern, minimalist banner"));
    }
}
