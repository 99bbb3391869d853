//! Banner images: a text-free visual description, then image generation.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::api::{ChatRequest, ImageRequest, LanguageModel};
use crate::generator::compose::placeholder_banner_url;
use crate::models::{AuthorProfile, BannerImage};
use crate::utils::iso_timestamp;

pub const BANNER_SIZE: &str = "1024x1024";
pub const PLACEHOLDER_MODEL: &str = "placeholder";

const NO_TEXT_SUFFIX: &str = "Important: Create this image with absolutely NO TEXT, NO LETTERS, NO WORDS, NO NUMBERS, NO SYMBOLS, NO CODE, and NO READABLE CHARACTERS of any kind. Pure visual elements only.";

pub fn description_request(title: &str, author: &AuthorProfile) -> ChatRequest {
    let user = format!(
        r#"Create a concise image description for a banner image for this AI/tech article:

Title: "{title}"
Author expertise: {spec}

The image should be:
- Professional and modern
- Related to AI, technology, or software development
- Suitable as a blog article banner
- Clean and minimalist design
- High contrast and readable
- Abstract or symbolic representation of the topic
- Focus on visual elements like geometric shapes, gradients, circuits, or tech patterns

IMPORTANT: The image must be completely text-free. Do NOT include any:
- Letters, words, or text of any kind
- Numbers or symbols
- Code snippets or programming text
- Brand names or logos
- Readable characters or typography

Describe the image in 1-2 sentences, focusing purely on visual elements, colors, shapes, and composition without any textual elements."#,
        spec = author.specialization,
    );

    ChatRequest {
        system: "You are an expert visual designer who creates compelling banner image descriptions for tech articles.".to_string(),
        user,
        temperature: 0.7,
        max_tokens: 200,
    }
}

pub fn fallback_description(author: &AuthorProfile) -> String {
    format!(
        "A modern, minimalist banner featuring abstract geometric shapes in blue and purple gradients, representing {} and artificial intelligence concepts. No text, letters, or words.",
        author.specialization.to_lowercase()
    )
}

/// Describe the banner, falling back to a generic description on failure.
pub async fn describe_banner<M: LanguageModel>(model: &M, title: &str, author: &AuthorProfile) -> String {
    match model.complete(&description_request(title, author)).await {
        Ok(reply) if !reply.trim().is_empty() => reply.trim().to_string(),
        Ok(_) => {
            warn!("Empty image description; using fallback");
            fallback_description(author)
        }
        Err(e) => {
            warn!(error = %e, "Image description failed; using fallback");
            fallback_description(author)
        }
    }
}

/// Generate the banner image. Never fails: errors produce a placeholder.
pub async fn generate_banner<M: LanguageModel>(
    model: &M,
    description: String,
    article_id: &str,
    now: DateTime<Utc>,
) -> BannerImage {
    let request = ImageRequest {
        prompt: format!("{description}. {NO_TEXT_SUFFIX}"),
        size: BANNER_SIZE.to_string(),
    };

    match model.generate_image(&request).await {
        Ok(url) => {
            info!(article_id, model = model.image_model(), "Generated banner image");
            BannerImage {
                url,
                description,
                generated_at: iso_timestamp(now),
                model: model.image_model().to_string(),
                error: None,
            }
        }
        Err(e) => {
            warn!(article_id, error = %e, "Banner generation failed; using placeholder");
            BannerImage {
                url: placeholder_banner_url("AI Article Banner"),
                description,
                generated_at: iso_timestamp(now),
                model: PLACEHOLDER_MODEL.to_string(),
                error: Some(e.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::fake::ScriptedModel;

    fn author() -> AuthorProfile {
        serde_json::from_value(serde_json::json!({
            "id": "kai-nakamura",
            "name": "Kai Nakamura",
            "specialization": "Emerging AI Technologies & Ethics",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_description_falls_back_on_error() {
        let model = ScriptedModel::default().chat(Err("boom"));
        let description = describe_banner(&model, "Title", &author()).await;
        assert!(description.contains("representing emerging ai technologies & ethics"));
    }

    #[tokio::test]
    async fn test_description_is_trimmed() {
        let model = ScriptedModel::default().chat(Ok("  Teal circuits over a dark grid.\n"));
        let description = describe_banner(&model, "Safer Models", &author()).await;
        assert_eq!(description, "Teal circuits over a dark grid.");
        let requests = model.chat_requests.borrow();
        assert!(requests[0].user.contains("Title: \"Safer Models\""));
        assert_eq!(requests[0].max_tokens, 200);
    }

    #[tokio::test]
    async fn test_generated_banner_records_image_model() {
        let model = ScriptedModel::default().image(Ok("https://img.example/x.png"));
        let banner = generate_banner(&model, "Blue waves".to_string(), "id-1", Utc::now()).await;

        assert_eq!(banner.url, "https://img.example/x.png");
        assert_eq!(banner.model, "scripted-image");
        assert!(banner.error.is_none());
        let requests = model.image_requests.borrow();
        assert!(requests[0].prompt.starts_with("Blue waves. Important: Create this image"));
        assert_eq!(requests[0].size, "1024x1024");
    }

    #[tokio::test]
    async fn test_failed_banner_uses_placeholder() {
        let model = ScriptedModel::default().image(Err("content policy"));
        let banner = generate_banner(&model, "Blue waves".to_string(), "id-1", Utc::now()).await;

        assert_eq!(banner.model, "placeholder");
        assert_eq!(banner.error.as_deref(), Some("content policy"));
        assert_eq!(
            banner.url,
            "https://via.placeholder.com/1024x512/4F46E5/FFFFFF?text=AI%20Article%20Banner"
        );
        assert_eq!(banner.description, "Blue waves");
    }
}
