use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Canonical date format used everywhere a date is rendered
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Kind of generated document, as emitted by the site generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    #[default]
    Article,
    Page,
}

/// One article or page from the build manifest.
///
/// Every field the generator may or may not provide is an explicit
/// Option resolved once at ingestion; analyzers and builders treat
/// absence as a finding, never as an error.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// URL of the document, relative to the site root
    pub url: String,

    #[serde(default)]
    pub kind: DocumentKind,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Raw HTML body of the document
    #[serde(default)]
    pub content: Option<String>,

    /// Publication date, `YYYY-MM-DD[ HH:MM]`
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: Option<NaiveDateTime>,

    /// Last modification date, same formats as `date`
    #[serde(default, deserialize_with = "deserialize_date")]
    pub modified: Option<NaiveDateTime>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub image: Option<String>,

    /// On-disk file name when it differs from `url`
    #[serde(default)]
    pub save_as: Option<String>,

    /// Canonical URL declared verbatim, overriding both `save_as` and `url`
    #[serde(default)]
    pub external_canonical: Option<String>,

    #[serde(default)]
    pub noindex: Option<bool>,

    #[serde(default)]
    pub disallow: Option<bool>,

    #[serde(default)]
    pub og_title: Option<String>,

    #[serde(default)]
    pub og_description: Option<String>,

    #[serde(default)]
    pub og_image: Option<String>,

    /// Twitter account handle declared on the document itself
    #[serde(default)]
    pub tw_account: Option<String>,
}

impl Document {
    /// File URL used for canonical/Open Graph links: `save_as` wins over `url`
    pub fn file_url(&self) -> &str {
        self.save_as.as_deref().unwrap_or(&self.url)
    }

    pub fn is_page(&self) -> bool {
        self.kind == DocumentKind::Page
    }
}

/// Loads the build manifest: a JSON array of documents
pub fn load_documents(path: &Path) -> Result<Vec<Document>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest file: {}", path.display()))?;

    let documents: Vec<Document> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse manifest file: {}", path.display()))?;

    Ok(documents)
}

/// Parses a manifest date, accepting a few common generator formats
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(value, format) {
            return Some(date_time);
        }
    }

    // Date-only values fall back to midnight
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;

    match value {
        Some(raw) => parse_date(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized date: {}", raw))),
        None => Ok(None),
    }
}
