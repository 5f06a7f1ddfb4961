use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::models::Document;

/// Robots directives declared by one document
#[derive(Debug, Clone)]
pub struct RobotsRule {
    pub document_url: String,
    pub noindex: Option<bool>,
    pub disallow: Option<bool>,
}

/// Reads the robots directives out of a document's metadata
#[derive(Debug, Clone)]
pub struct RobotsFileCreator {
    noindex: Option<bool>,
    disallow: Option<bool>,
}

impl RobotsFileCreator {
    pub fn new(document: &Document) -> Self {
        Self {
            noindex: document.noindex,
            disallow: document.disallow,
        }
    }

    pub fn noindex(&self) -> Option<bool> {
        self.noindex
    }

    pub fn disallow(&self) -> Option<bool> {
        self.disallow
    }
}

/// Writes the robots.txt file under the output directory.
///
/// One `Noindex:`/`Disallow:` line per truthy rule, an optional trailing
/// `Sitemap:` line, full overwrite on every run.
pub fn write_robots_file(
    rules: &[RobotsRule],
    output_path: &Path,
    sitemap_url: Option<&str>,
) -> Result<()> {
    fs::create_dir_all(output_path).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_path.display()
        )
    })?;

    let mut contents = String::from("User-agent: *");

    for rule in rules {
        if rule.noindex.unwrap_or(false) {
            contents.push_str(&format!("\nNoindex: {}", rule.document_url));
        }
        if rule.disallow.unwrap_or(false) {
            contents.push_str(&format!("\nDisallow: {}", rule.document_url));
        }
    }

    if let Some(sitemap_url) = sitemap_url {
        contents.push_str(&format!("\nSitemap: {}", sitemap_url));
    }

    let robots_path = output_path.join("robots.txt");
    fs::write(&robots_path, contents)
        .with_context(|| format!("Failed to write robots file: {}", robots_path.display()))?;

    tracing::info!(path = %robots_path.display(), "robots.txt file created");

    Ok(())
}
