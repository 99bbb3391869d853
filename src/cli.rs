//! Command-line interface definitions.
//!
//! One subcommand per pipeline stage. Every option can also be supplied via
//! its environment variable, so CI jobs only need to export `OPENAI_API_KEY`
//! (or `TEST_MODE=true`) and `SITE_URL`.

use clap::{Args, Parser, Subcommand};

/// Command-line arguments for the magazine pipeline.
///
/// # Examples
///
/// ```sh
/// # Draft one article per author and merge them into data/articles.json
/// OPENAI_API_KEY=sk-... ai_magazine generate
///
/// # Same, with deterministic mock articles and no API calls
/// TEST_MODE=true ai_magazine generate
///
/// # Regenerate navigation, stats, RSS, sitemap and robots.txt
/// SITE_URL=https://mag.example.org ai_magazine build
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Optional path to a YAML site config file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory holding articles.json, navigation.json and category-stats.json
    #[arg(long, global = true, default_value = "data")]
    pub data_dir: String,

    /// Directory holding the authors index.json and persona profiles
    #[arg(long, global = true, default_value = "authors")]
    pub authors_dir: String,

    /// Directory receiving feed.xml, sitemap.xml and robots.txt
    #[arg(long, global = true, default_value = "public")]
    pub public_dir: String,

    /// Public base URL of the site
    #[arg(long, global = true, env = "SITE_URL")]
    pub site_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Draft new articles for every author and merge them into the article store
    Generate(GenerateArgs),
    /// Rebuild category statistics, navigation data and the RSS feed
    Navigation,
    /// Rebuild sitemap.xml and robots.txt
    Sitemap,
    /// Run `navigation` then `sitemap`
    Build,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Produce mock articles without calling any external API
    #[arg(long, env = "TEST_MODE")]
    pub test_mode: bool,

    /// API key for the chat-completion and image-generation service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "OPENAI_BASE_URL")]
    pub api_base_url: Option<String>,

    /// Pause between authors, in seconds
    #[arg(long, default_value_t = 3)]
    pub author_delay_secs: u64,

    /// Retries per API request after the first failure
    #[arg(long, default_value_t = 2)]
    pub max_retries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_generate_defaults() {
        let cli = Cli::parse_from(["ai_magazine", "generate"]);

        assert_eq!(cli.data_dir, "data");
        assert_eq!(cli.authors_dir, "authors");
        assert_eq!(cli.public_dir, "public");
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.author_delay_secs, 3);
                assert_eq!(args.max_retries, 2);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_generate_flags() {
        let cli = Cli::parse_from([
            "ai_magazine",
            "generate",
            "--test-mode",
            "--author-delay-secs",
            "0",
            "--data-dir",
            "/tmp/data",
        ]);

        assert_eq!(cli.data_dir, "/tmp/data");
        match cli.command {
            Command::Generate(args) => {
                assert!(args.test_mode);
                assert_eq!(args.author_delay_secs, 0);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["ai_magazine", "build", "--public-dir", "/srv/www", "-c", "site.yaml"]);

        assert!(matches!(cli.command, Command::Build));
        assert_eq!(cli.public_dir, "/srv/www");
        assert_eq!(cli.config.as_deref(), Some("site.yaml"));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["ai_magazine"]).is_err());
    }
}
