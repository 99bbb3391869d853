//! Tag derivation for generated articles.

use itertools::Itertools;

use crate::models::SourceArticle;

/// Most tags an article carries.
pub const MAX_TAGS: usize = 8;

const TITLE_STOP_WORDS: [&str; 10] = [
    "About", "From", "With", "That", "This", "What", "When", "Where", "Why", "How",
];

/// Technology tags added when the article body mentions them.
const COMMON_TAGS: [&str; 16] = [
    "AI",
    "Machine Learning",
    "Automation",
    "DevOps",
    "Testing",
    "Python",
    "JavaScript",
    "React",
    "Node.js",
    "Docker",
    "Kubernetes",
    "GitHub",
    "VS Code",
    "OpenAI",
    "TensorFlow",
    "PyTorch",
];

fn is_title_keyword(word: &str) -> bool {
    word.chars().count() > 4
        && word.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        && !TITLE_STOP_WORDS.contains(&word)
}

/// Build an article's tag list, in priority order:
///
/// 1. The first two words of each of the author's first three expertise areas
/// 2. For research-based pieces, `Research-Based`, `Industry Analysis` and up
///    to two capitalised keywords from the source title
/// 3. Common technology names found anywhere in the content (case-insensitive)
///
/// Duplicates are dropped and the list is cut to [`MAX_TAGS`].
pub fn generate_tags(content: &str, expertise: &[String], source: Option<&SourceArticle>) -> Vec<String> {
    let mut tags: Vec<String> = expertise
        .iter()
        .take(3)
        .map(|exp| exp.split(' ').take(2).join(" "))
        .collect();

    if let Some(source) = source {
        tags.push("Research-Based".to_string());
        tags.push("Industry Analysis".to_string());
        tags.extend(
            source
                .title
                .split(' ')
                .filter(|w| is_title_keyword(w))
                .take(2)
                .map(str::to_string),
        );
    }

    let haystack = content.to_lowercase();
    tags.extend(
        COMMON_TAGS
            .iter()
            .filter(|tag| haystack.contains(&tag.to_lowercase()))
            .map(|tag| tag.to_string()),
    );

    tags.into_iter().unique().take(MAX_TAGS).collect()
}
