//! Drafting prompts and turning a model draft into an [`Article`].

use chrono::{DateTime, Utc};

use crate::api::ChatRequest;
use crate::generator::tags::generate_tags;
use crate::models::{Article, ArticleAuthor, ArticleMetadata, AuthorProfile, BannerImage, SourceArticle};
use crate::utils::{build_excerpt, extract_title, iso_timestamp, reading_time, slugify, truncate_chars, word_count};

const SLUG_MAX_CHARS: usize = 60;
const ID_SLUG_CHARS: usize = 30;

/// Map an author's specialization onto one of the site categories.
///
/// Known specializations map exactly; anything else is matched on keywords
/// and finally defaults to `AI Tools`.
pub fn category_for_specialization(specialization: &str) -> &'static str {
    match specialization {
        "AI-Powered Development Tools" => "AI Tools",
        "Machine Learning Operations" => "Machine Learning",
        "AI-Driven Testing & Automation" => "Testing",
        "Emerging AI Technologies & Ethics" => "Future Tech",
        "CI/CD Pipeline Automation & Workflow Intelligence" => "DevOps",
        other if other.contains("Tools") => "AI Tools",
        other if other.contains("Machine Learning") => "Machine Learning",
        other if other.contains("Testing") => "Testing",
        other if other.contains("Ethics") => "Future Tech",
        other if other.contains("CI/CD") || other.contains("DevOps") => "DevOps",
        _ => "AI Tools",
    }
}

/// `{YYYYMMDD}-{author id}-{first 30 chars of slug}`.
pub fn article_id(now: DateTime<Utc>, author_id: &str, slug: &str) -> String {
    format!(
        "{}-{}-{}",
        now.format("%Y%m%d"),
        author_id,
        truncate_chars(slug, ID_SLUG_CHARS)
    )
}

/// Placeholder banner used in test mode and when image generation fails.
pub fn placeholder_banner_url(text: &str) -> String {
    format!(
        "https://via.placeholder.com/1024x512/4F46E5/FFFFFF?text={}",
        urlencoding::encode(text)
    )
}

/// The drafting request: the author speaks in persona about the source.
pub fn article_request(author: &AuthorProfile, source: &SourceArticle, today: &str) -> ChatRequest {
    let published = source
        .publish_date
        .split('T')
        .next()
        .filter(|d| !d.is_empty())
        .unwrap_or("Recently");
    let url_line = source
        .url
        .as_deref()
        .map(|u| format!("URL: {u}"))
        .unwrap_or_default();

    let user = format!(
        r#"{agent_prompt}

You have found this recent article that aligns with your expertise:

**Source Article:**
Title: "{title}"
Source: {source}
Published: {published}
Summary: {summary}
{url_line}

**Your Task:**
Write a research-based opinion article that:

1. **References the source article** - Properly cite and discuss the key points
2. **Provides your expert analysis** - Share your professional perspective on the developments
3. **Adds valuable insights** - Go beyond the source with your expertise in {spec}
4. **Makes it practical** - Include actionable advice, implementation tips, or best practices
5. **Engages the audience** - Write in your characteristic style while being informative

**Article Structure:**
- Compelling title that reflects both the source topic and your perspective
- Introduction that references the source article and your take on it
- Main content with your analysis, insights, and practical guidance
- Conclusion with your recommendations or predictions

**Requirements:**
- 1600-2400 words
- Reference the source article throughout
- Include practical examples or code snippets where relevant
- Use your characteristic writing style and tone
- End with actionable takeaways

Today is {today}. Focus on how this development affects the current landscape of {spec}."#,
        agent_prompt = author.agent_prompt,
        title = source.title,
        source = source.author,
        summary = source.summary,
        spec = author.specialization,
    );

    ChatRequest {
        system: format!("You are {}, {}. {}", author.name, author.title, author.bio),
        user,
        temperature: 0.7,
        max_tokens: 4000,
    }
}

/// Everything besides the draft itself needed to assemble an article.
#[derive(Debug, Clone)]
pub struct DraftContext<'a> {
    pub author: &'a AuthorProfile,
    pub source: &'a SourceArticle,
    pub generated_by: &'a str,
    pub featured: bool,
    pub now: DateTime<Utc>,
}

/// Title, slug and id derived from a draft, before the banner exists.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftIdentity {
    pub title: String,
    pub slug: String,
    pub id: String,
}

pub fn draft_identity(content: &str, ctx: &DraftContext<'_>) -> DraftIdentity {
    let title = extract_title(content)
        .unwrap_or_else(|| format!("{}'s Take on: {}", ctx.author.name, ctx.source.title));
    let slug = truncate_chars(&slugify(&title), SLUG_MAX_CHARS);
    let id = article_id(ctx.now, &ctx.author.id, &slug);
    DraftIdentity { title, slug, id }
}

/// Assemble the stored article from a model draft.
pub fn assemble_article(
    content: String,
    identity: DraftIdentity,
    banner: BannerImage,
    ctx: &DraftContext<'_>,
) -> Article {
    let stamp = iso_timestamp(ctx.now);
    let words = word_count(&content);
    let DraftIdentity { title, slug, id } = identity;

    Article {
        id,
        excerpt: build_excerpt(&content, &title),
        tags: generate_tags(&content, &ctx.author.expertise, Some(ctx.source)),
        reading_time: reading_time(words),
        source_article: Some(ctx.source.clone()),
        banner_image: Some(banner),
        author: ArticleAuthor::from_profile(ctx.author),
        published_at: stamp.clone(),
        updated_at: stamp.clone(),
        category: category_for_specialization(&ctx.author.specialization).to_string(),
        featured: ctx.featured,
        metadata: ArticleMetadata {
            word_count: words,
            generation_prompt: format!("Research-based article on: {}", ctx.source.title),
            generated_by: ctx.generated_by.to_string(),
            generation_date: stamp,
            based_on_source: Some(true),
            source_relevance: Some(ctx.source.relevance_score),
        },
        content,
        title,
        slug,
    }
}
