use anyhow::{Context, Result};
use serde_json::Value;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::config::Settings;
use crate::models::{Document, DocumentKind};
use crate::robots::{self, RobotsFileCreator, RobotsRule};
use crate::schema::{ArticleSchemaCreator, BreadcrumbSchemaCreator, CanonicalUrlCreator};
use crate::social::{MetaTags, OpenGraph, OpenGraphArticle, TwitterCards};

/// Everything that gets injected into one document's HTML file, in
/// injection order
#[derive(Debug, Clone)]
pub struct HtmlEnhancements {
    pub canonical_tag: String,
    pub breadcrumb_schema: Value,
    pub article_schema: Option<Value>,
    pub open_graph: Option<MetaTags>,
    pub twitter_cards: Option<MetaTags>,
}

/// Bundles the per-document structured-data builders.
///
/// Canonical, breadcrumb and article-schema builders are always
/// constructed; Open Graph and Twitter Cards only when their feature is
/// enabled (the Twitter-Cards-requires-Open-Graph rule is enforced at
/// configuration time).
pub struct HtmlEnhancer {
    pub canonical_link: CanonicalUrlCreator,
    pub breadcrumb_schema: BreadcrumbSchemaCreator,
    pub article_schema: ArticleSchemaCreator,
    pub open_graph: Option<OpenGraph>,
    pub open_graph_article: Option<OpenGraphArticle>,
    pub twitter_cards: Option<TwitterCards>,
    external_canonical: Option<String>,
}

impl HtmlEnhancer {
    pub fn new(document: &Document, output_path: &Path, path: &Path, settings: &Settings) -> Self {
        let file_type = match document.kind {
            DocumentKind::Article => "article",
            DocumentKind::Page => "page",
        };

        let canonical_link =
            CanonicalUrlCreator::new(&settings.site_url, Some(document.file_url()));

        let breadcrumb_schema = BreadcrumbSchemaCreator::new(
            output_path,
            path,
            Some(&settings.site_name),
            &settings.site_url,
        );

        let article_schema = ArticleSchemaCreator::new(
            document.author.as_deref(),
            document.title.as_deref(),
            document.category.as_deref(),
            document.date,
            settings.logo.as_deref(),
            document.image.as_deref(),
            Some(&settings.site_name),
        );

        let open_graph = settings.open_graph.then(|| {
            OpenGraph::new(
                &settings.site_url,
                document.file_url(),
                file_type,
                Some(&settings.site_name),
                document.og_title.as_deref().or(document.title.as_deref()),
                document
                    .og_description
                    .as_deref()
                    .or(document.description.as_deref()),
                document.og_image.as_deref().or(document.image.as_deref()),
                &settings.locale,
            )
        });

        let open_graph_article = (settings.open_graph && !document.is_page()).then(|| {
            // article:author takes the configured Facebook profile when
            // the author has one, else the plain author name
            let author = document.author.as_deref().map(|author| {
                settings
                    .author_facebook_profiles
                    .get(author)
                    .map(String::as_str)
                    .unwrap_or(author)
            });

            OpenGraphArticle::new(
                document.date,
                document.modified,
                document.category.as_deref(),
                &document.tags,
                author,
            )
        });

        let twitter_cards = settings.twitter_cards.then(|| {
            let account = document.tw_account.as_deref().or_else(|| {
                document
                    .author
                    .as_deref()
                    .and_then(|author| settings.author_twitter_profiles.get(author))
                    .map(String::as_str)
            });

            TwitterCards::new(account)
        });

        Self {
            canonical_link,
            breadcrumb_schema,
            article_schema,
            open_graph,
            open_graph_article,
            twitter_cards,
            external_canonical: document.external_canonical.clone(),
        }
    }

    /// Canonical URL with precedence: `external_canonical` verbatim,
    /// else site URL joined with `save_as`/default file URL
    pub fn canonical_url(&self) -> String {
        self.external_canonical
            .clone()
            .unwrap_or_else(|| self.canonical_link.create_url())
    }
}

/// Orchestrates robots.txt emission and per-document HTML enhancement
pub struct SeoEnhancer<'a> {
    settings: &'a Settings,
}

impl<'a> SeoEnhancer<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Reads the robots directives of one document
    pub fn populate_robots(&self, document: &Document) -> RobotsRule {
        let robots_file = RobotsFileCreator::new(document);

        RobotsRule {
            document_url: document.url.clone(),
            noindex: robots_file.noindex(),
            disallow: robots_file.disallow(),
        }
    }

    /// Writes robots.txt for the whole document collection
    pub fn generate_robots(&self, rules: &[RobotsRule], output_path: &Path) -> Result<()> {
        robots::write_robots_file(rules, output_path, self.settings.sitemap_url.as_deref())
    }

    /// Computes all enhancements for one document. The article schema is
    /// built for non-page documents only.
    pub fn launch_html_enhancer(
        &self,
        document: &Document,
        output_path: &Path,
        path: &Path,
    ) -> Result<HtmlEnhancements> {
        let enhancer = HtmlEnhancer::new(document, output_path, path, self.settings);

        let article_schema = (!document.is_page()).then(|| enhancer.article_schema.create_schema());

        let open_graph = enhancer.open_graph.as_ref().map(|open_graph| {
            let mut tags = open_graph.create_tags();
            if let Some(article) = &enhancer.open_graph_article {
                tags.extend(article.create_tags());
            }
            tags
        });

        let twitter_cards = enhancer
            .twitter_cards
            .as_ref()
            .map(|twitter_cards| twitter_cards.create_tags());

        Ok(HtmlEnhancements {
            canonical_tag: enhancer.canonical_url(),
            breadcrumb_schema: enhancer.breadcrumb_schema.create_schema()?,
            article_schema,
            open_graph,
            twitter_cards,
        })
    }

    /// Injects the enhancements into the document's HTML file, in fixed
    /// order: canonical link, JSON-LD scripts, Twitter Cards metas, Open
    /// Graph metas. Everything is inserted right before `</head>`; the
    /// rest of the file is left byte-identical, so inline markup keeps
    /// its original whitespace.
    pub fn add_html_to_file(&self, enhancements: &HtmlEnhancements, path: &Path) -> Result<()> {
        let html = fs::read_to_string(path)
            .with_context(|| format!("Failed to read HTML file: {}", path.display()))?;

        let mut fragment = String::new();

        let _ = writeln!(
            fragment,
            "<link rel=\"canonical\" href=\"{}\">",
            escape_attribute(&enhancements.canonical_tag)
        );

        let schemas = std::iter::once(&enhancements.breadcrumb_schema)
            .chain(enhancements.article_schema.iter());
        for schema in schemas {
            // Double-quoted JSON in insertion key order; search engines
            // reject single-quoted schemas
            let json = serde_json::to_string(schema)?;
            let _ = writeln!(
                fragment,
                "<script type=\"application/ld+json\">{}</script>",
                json
            );
        }

        if let Some(tags) = &enhancements.twitter_cards {
            for (name, content) in tags {
                let _ = writeln!(
                    fragment,
                    "<meta name=\"twitter:{}\" content=\"{}\">",
                    name,
                    escape_attribute(content)
                );
            }
        }

        if let Some(tags) = &enhancements.open_graph {
            for (name, content) in tags {
                // article:* extension tags carry their own namespace
                let property = if name.starts_with("article:") {
                    name.clone()
                } else {
                    format!("og:{}", name)
                };

                let _ = writeln!(
                    fragment,
                    "<meta property=\"{}\" content=\"{}\">",
                    property,
                    escape_attribute(content)
                );
            }
        }

        let updated = match find_head_close(&html) {
            Some(index) => format!("{}{}{}", &html[..index], fragment, &html[index..]),
            None => {
                tracing::warn!(
                    path = %path.display(),
                    "No </head> tag found, appending enhancements at end of file"
                );
                format!("{}{}", html, fragment)
            }
        };

        fs::write(path, updated)
            .with_context(|| format!("Failed to write HTML file: {}", path.display()))?;

        tracing::info!(path = %path.display(), "SEO enhancements added");

        Ok(())
    }
}

/// Byte offset of the closing head tag, matched case-insensitively
fn find_head_close(html: &str) -> Option<usize> {
    html.as_bytes()
        .windows(7)
        .position(|window| window.eq_ignore_ascii_case(b"</head>"))
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
