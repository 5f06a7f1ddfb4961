use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde_json::{Map, Value, json};
use std::path::Path;

use crate::models::DATE_FORMAT;

/// Builds the canonical URL for a document
#[derive(Debug, Clone)]
pub struct CanonicalUrlCreator {
    site_url: String,
    file_url: Option<String>,
}

impl CanonicalUrlCreator {
    pub fn new(site_url: &str, file_url: Option<&str>) -> Self {
        Self {
            site_url: site_url.to_string(),
            file_url: file_url.map(|url| url.to_string()),
        }
    }

    /// Joins site URL and file URL; without a file URL the site URL is
    /// the canonical one.
    pub fn create_url(&self) -> String {
        match self.file_url.as_deref() {
            None | Some("") => self.site_url.clone(),
            Some(file_url) => format!(
                "{}/{}",
                self.site_url.trim_end_matches('/'),
                file_url.trim_start_matches('/')
            ),
        }
    }
}

/// Builds the schema.org BreadcrumbList of a document from its on-disk
/// location relative to the output root.
#[derive(Debug, Clone)]
pub struct BreadcrumbSchemaCreator {
    output_path: std::path::PathBuf,
    path: std::path::PathBuf,
    site_name: Option<String>,
    site_url: String,
}

impl BreadcrumbSchemaCreator {
    pub fn new(output_path: &Path, path: &Path, site_name: Option<&str>, site_url: &str) -> Self {
        Self {
            output_path: output_path.to_path_buf(),
            path: path.to_path_buf(),
            site_name: site_name.map(|name| name.to_string()),
            site_url: site_url.to_string(),
        }
    }

    /// Path segments between the output root and the file
    fn extract_file_path(&self) -> Result<Vec<String>> {
        let path = std::path::absolute(&self.path)
            .with_context(|| format!("Failed to normalize path: {}", self.path.display()))?;
        let output_path = std::path::absolute(&self.output_path).with_context(|| {
            format!(
                "Failed to normalize output path: {}",
                self.output_path.display()
            )
        })?;

        let file_path = path.strip_prefix(&output_path).with_context(|| {
            format!(
                "File {} is not under the output path {}",
                path.display(),
                output_path.display()
            )
        })?;

        Ok(file_path
            .components()
            .map(|component| component.as_os_str().to_string_lossy().into_owned())
            .collect())
    }

    /// Breadcrumb display name of one path segment
    fn item_name(segment: &str) -> String {
        let name = segment.replace('-', " ");
        let mut chars = name.chars();
        let name: String = match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.flat_map(char::to_lowercase))
                .collect(),
            None => String::new(),
        };

        name.strip_suffix(".html").unwrap_or(&name).to_string()
    }

    /// Builds the BreadcrumbList. The root item (position 1) names the
    /// site and is present only when both site name and site URL are
    /// non-empty; path items always start at position 2.
    pub fn create_schema(&self) -> Result<Value> {
        let file_path = self.extract_file_path()?;

        let mut item_list: Vec<Value> = Vec::new();

        if let Some(site_name) = self.site_name.as_deref()
            && !site_name.is_empty()
            && !self.site_url.is_empty()
        {
            item_list.push(json!({
                "@type": "ListItem",
                "position": 1,
                "name": site_name,
                "item": self.site_url,
            }));
        }

        for (index, segment) in file_path.iter().enumerate() {
            let full_path = file_path[..=index].join("/");
            let url = format!("{}/{}", self.site_url.trim_end_matches('/'), full_path);

            item_list.push(json!({
                "@type": "ListItem",
                "position": index + 2,
                "name": Self::item_name(segment),
                "item": url,
            }));
        }

        Ok(json!({
            "@context": "https://schema.org",
            "@type": "BreadcrumbList",
            "itemListElement": item_list,
        }))
    }
}

/// Builds the schema.org Article object of a document.
///
/// Every key is emitted only when its source value is present; the
/// output never carries placeholder nulls.
#[derive(Debug, Clone)]
pub struct ArticleSchemaCreator {
    author: Option<String>,
    title: Option<String>,
    category: Option<String>,
    date: Option<NaiveDateTime>,
    logo: Option<String>,
    image: Option<String>,
    site_name: Option<String>,
}

impl ArticleSchemaCreator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        author: Option<&str>,
        title: Option<&str>,
        category: Option<&str>,
        date: Option<NaiveDateTime>,
        logo: Option<&str>,
        image: Option<&str>,
        site_name: Option<&str>,
    ) -> Self {
        Self {
            author: non_empty(author),
            title: non_empty(title),
            category: non_empty(category),
            date,
            logo: non_empty(logo),
            image: non_empty(image),
            site_name: non_empty(site_name),
        }
    }

    pub fn create_schema(&self) -> Value {
        let mut schema = Map::new();
        schema.insert("@context".to_string(), json!("https://schema.org"));
        schema.insert("@type".to_string(), json!("Article"));

        if let Some(author) = &self.author {
            schema.insert(
                "author".to_string(),
                json!({ "@type": "Person", "name": author }),
            );
        }

        if let Some(site_name) = &self.site_name {
            let mut publisher = Map::new();
            publisher.insert("@type".to_string(), json!("Organization"));
            publisher.insert("name".to_string(), json!(site_name));

            if let Some(logo) = &self.logo {
                publisher.insert(
                    "logo".to_string(),
                    json!({ "@type": "ImageObject", "url": logo }),
                );
            }

            schema.insert("publisher".to_string(), Value::Object(publisher));
        }

        if let Some(title) = &self.title {
            schema.insert("headline".to_string(), json!(title));
        }

        if let Some(category) = &self.category {
            schema.insert("about".to_string(), json!(category));
        }

        if let Some(date) = self.date {
            schema.insert(
                "datePublished".to_string(),
                json!(date.format(DATE_FORMAT).to_string()),
            );
        }

        if let Some(image) = &self.image {
            schema.insert("image".to_string(), json!(image));
        }

        Value::Object(schema)
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.is_empty())
        .map(|value| value.to_string())
}
