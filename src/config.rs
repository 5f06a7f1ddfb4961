use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Configuration file structure
/// All fields are optional to allow partial configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Base URL of the site
    pub site_url: Option<String>,

    /// Name of the site
    pub site_name: Option<String>,

    /// URL of the site logo, used in the Article schema
    pub logo: Option<String>,

    /// Candidate locales for Open Graph, first non-empty entry wins
    pub locale: Option<Vec<String>>,

    /// Generate the SEO report
    pub report: Option<bool>,

    /// Write robots.txt and inject SEO tags into the generated HTML
    pub enhancer: Option<bool>,

    /// Add Open Graph tags
    pub open_graph: Option<bool>,

    /// Add Twitter Cards tags
    pub twitter_cards: Option<bool>,

    /// Cap how many articles receive report analysis
    pub articles_limit: Option<usize>,

    /// Cap how many pages receive report analysis
    pub pages_limit: Option<usize>,

    /// Sitemap URL appended to robots.txt
    pub sitemap_url: Option<String>,

    /// Twitter handle per author name, fallback for documents without one
    pub author_twitter_profiles: Option<HashMap<String, String>>,

    /// Facebook profile URL per author name, used for article:author
    pub author_facebook_profiles: Option<HashMap<String, String>>,
}

/// Configuration file format based on file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                "toml" => Some(ConfigFormat::Toml),
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                _ => None,
            })
    }

    /// Get file extensions for this format
    pub fn extensions(&self) -> &[&str] {
        match self {
            ConfigFormat::Json => &["json"],
            ConfigFormat::Toml => &["toml"],
            ConfigFormat::Yaml => &["yaml", "yml"],
        }
    }
}

/// Validated settings the pipeline runs with, resolved once at startup
/// from defaults, config file and CLI (in increasing precedence).
#[derive(Debug, Clone)]
pub struct Settings {
    pub site_url: String,
    pub site_name: String,
    pub logo: Option<String>,
    pub locale: Vec<String>,
    pub report: bool,
    pub enhancer: bool,
    pub open_graph: bool,
    pub twitter_cards: bool,
    pub articles_limit: usize,
    pub pages_limit: usize,
    pub sitemap_url: Option<String>,
    pub author_twitter_profiles: HashMap<String, String>,
    pub author_facebook_profiles: HashMap<String, String>,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let format = ConfigFormat::from_path(path)
            .with_context(|| format!("Unsupported config file format: {}", path.display()))?;

        let config = match format {
            ConfigFormat::Json => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?,
            ConfigFormat::Toml => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?,
            ConfigFormat::Yaml => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?,
        };

        Ok(config)
    }

    /// Get the default configuration file paths to check (in order of priority)
    /// Returns paths in order: current directory, user config directory
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Check current directory first (highest priority)
        for format in &[ConfigFormat::Json, ConfigFormat::Toml, ConfigFormat::Yaml] {
            for ext in format.extensions() {
                paths.push(PathBuf::from(format!("seolift.{}", ext)));
            }
        }

        // Check user config directory (~/.config/seolift)
        // Use XDG_CONFIG_HOME if set, otherwise fall back to ~/.config
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .ok()
            .and_then(|p| {
                if p.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(p))
                }
            })
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")));

        if let Some(config_home) = config_home {
            let seolift_config_dir = config_home.join("seolift");
            for format in &[ConfigFormat::Json, ConfigFormat::Toml, ConfigFormat::Yaml] {
                for ext in format.extensions() {
                    paths.push(seolift_config_dir.join(format!("config.{}", ext)));
                }
            }
        }

        paths
    }

    /// Try to load configuration from default paths
    /// Returns the first configuration file found, or None if no config exists
    pub fn from_default_paths() -> Result<Option<Self>> {
        for path in Self::default_paths() {
            if path.exists() {
                return Ok(Some(Self::from_file(&path)?));
            }
        }
        Ok(None)
    }

    /// Merge this configuration with CLI arguments and validate.
    /// CLI arguments take precedence over config file values.
    ///
    /// Configuration errors (missing site URL, Twitter Cards without
    /// Open Graph) abort here, before any document is processed.
    pub fn resolve(&self, cli: &Cli) -> Result<Settings> {
        let site_url = cli
            .site_url
            .clone()
            .or_else(|| self.site_url.clone())
            .unwrap_or_default();

        if site_url.is_empty() {
            bail!("You must set the site URL (--site-url or the config file) to use seolift.");
        }

        let report = cli.report.or(self.report).unwrap_or(true);
        let enhancer = cli.enhancer.or(self.enhancer).unwrap_or(false);
        let open_graph = cli.open_graph.or(self.open_graph).unwrap_or(false);
        let twitter_cards = cli.twitter_cards.or(self.twitter_cards).unwrap_or(false);

        if (open_graph || twitter_cards) && !enhancer {
            bail!("You must enable the enhancer to use social media features.");
        }

        if twitter_cards && !open_graph {
            bail!("You must enable Open Graph to use Twitter Cards.");
        }

        Ok(Settings {
            site_url,
            site_name: cli
                .site_name
                .clone()
                .or_else(|| self.site_name.clone())
                .unwrap_or_default(),
            logo: self.logo.clone(),
            locale: self.locale.clone().unwrap_or_default(),
            report,
            enhancer,
            open_graph,
            twitter_cards,
            articles_limit: cli.articles_limit.or(self.articles_limit).unwrap_or(10),
            pages_limit: cli.pages_limit.or(self.pages_limit).unwrap_or(10),
            sitemap_url: self.sitemap_url.clone(),
            author_twitter_profiles: self.author_twitter_profiles.clone().unwrap_or_default(),
            author_facebook_profiles: self.author_facebook_profiles.clone().unwrap_or_default(),
        })
    }
}
