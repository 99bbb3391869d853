//! Site configuration.
//!
//! Settings come from three layers, later ones winning:
//! 1. Built-in defaults ([`SiteConfig::default`])
//! 2. An optional YAML file passed with `--config`
//! 3. CLI flags and their environment variables (`SITE_URL`, `OPENAI_BASE_URL`)
//!
//! The resolved [`SiteConfig`] is shared read-only by the generator and the
//! artifact writers.

use serde::Deserialize;
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use url::Url;

use crate::cli::Cli;

pub const DEFAULT_SITE_URL: &str = "https://your-username.github.io/ai-ui-test-modern";
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";

/// Public-facing site metadata and model selection.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    /// Absolute base URL the site is served from, without trailing slash.
    pub site_url: String,
    pub title: String,
    pub description: String,
    pub language: String,
    pub managing_editor: String,
    pub web_master: String,
    pub github_url: String,
    pub chat_model: String,
    pub image_model: String,
    pub api_base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_url: DEFAULT_SITE_URL.to_string(),
            title: "AI Writing About AI Magazine".to_string(),
            description: "Insights into AI development, tools, and best practices from our AI-powered authors".to_string(),
            language: "en-us".to_string(),
            managing_editor: "editor@ai-writing-about-ai.com (AI Editorial Team)".to_string(),
            web_master: "webmaster@ai-writing-about-ai.com (Web Team)".to_string(),
            github_url: "https://github.com/your-repo".to_string(),
            chat_model: "gpt-4".to_string(),
            image_model: "dall-e-2".to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl SiteConfig {
    /// Read a YAML config file; absent keys keep their defaults.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn from_yaml_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read config {}: {e}", path.display()))?;
        let config: SiteConfig = serde_yaml::from_str(&raw)?;
        info!("Loaded site configuration");
        Ok(config)
    }

    /// Resolve the effective configuration for this invocation.
    pub fn resolve(cli: &Cli) -> Result<Self, Box<dyn Error>> {
        let mut config = match &cli.config {
            Some(path) => Self::from_yaml_file(Path::new(path))?,
            None => Self::default(),
        };
        if let Some(site_url) = &cli.site_url {
            config.site_url = site_url.clone();
        }
        config.site_url = normalize_site_url(&config.site_url)?;
        debug!(site_url = %config.site_url, "Resolved site URL");
        Ok(config)
    }

    /// Absolute URL for a site-relative path such as `/articles/`.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.site_url, path)
    }
}

/// Validate the site URL and strip any trailing slash.
pub fn normalize_site_url(raw: &str) -> Result<String, Box<dyn Error>> {
    let parsed = Url::parse(raw.trim()).map_err(|e| format!("invalid site URL {raw:?}: {e}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!("site URL must be http(s): {raw}").into());
    }
    Ok(raw.trim().trim_end_matches('/').to_string())
}

/// Locations of the input and output files.
#[derive(Debug, Clone)]
pub struct Paths {
    pub data_dir: PathBuf,
    pub authors_dir: PathBuf,
    pub public_dir: PathBuf,
}

impl Paths {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            data_dir: PathBuf::from(&cli.data_dir),
            authors_dir: PathBuf::from(&cli.authors_dir),
            public_dir: PathBuf::from(&cli.public_dir),
        }
    }

    pub fn articles_file(&self) -> PathBuf {
        self.data_dir.join("articles.json")
    }

    pub fn navigation_file(&self) -> PathBuf {
        self.data_dir.join("navigation.json")
    }

    pub fn category_stats_file(&self) -> PathBuf {
        self.data_dir.join("category-stats.json")
    }

    pub fn sitemap_file(&self) -> PathBuf {
        self.public_dir.join("sitemap.xml")
    }

    pub fn robots_file(&self) -> PathBuf {
        self.public_dir.join("robots.txt")
    }

    pub fn feed_file(&self) -> PathBuf {
        self.public_dir.join("feed.xml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_normalize_site_url() {
        assert_eq!(
            normalize_site_url("https://example.com/blog/").unwrap(),
            "https://example.com/blog"
        );
        assert!(normalize_site_url("not a url").is_err());
        assert!(normalize_site_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_yaml_overrides_only_given_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("site.yaml");
        std::fs::write(&path, "title: My Mag\nchat_model: gpt-4o\n").unwrap();

        let config = SiteConfig::from_yaml_file(&path).unwrap();
        assert_eq!(config.title, "My Mag");
        assert_eq!(config.chat_model, "gpt-4o");
        assert_eq!(config.image_model, "dall-e-2");
        assert_eq!(config.site_url, DEFAULT_SITE_URL);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let result = SiteConfig::from_yaml_file(Path::new("/definitely/not/here.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_site_url_wins() {
        let cli = Cli::parse_from(["ai_magazine", "--site-url", "https://mag.example.org/", "sitemap"]);
        let config = SiteConfig::resolve(&cli).unwrap();
        assert_eq!(config.site_url, "https://mag.example.org");
        assert_eq!(config.url_for("/feed.xml"), "https://mag.example.org/feed.xml");
    }

    #[test]
    fn test_paths_layout() {
        let cli = Cli::parse_from(["ai_magazine", "--data-dir", "/srv/data", "navigation"]);
        let paths = Paths::from_cli(&cli);
        assert_eq!(paths.articles_file(), PathBuf::from("/srv/data/articles.json"));
        assert_eq!(paths.feed_file(), PathBuf::from("public/feed.xml"));
        assert_eq!(paths.authors_dir, PathBuf::from("authors"));
    }
}
