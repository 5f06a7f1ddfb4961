use crate::models::Document;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

// Cached selectors to avoid repeated parsing and eliminate unwrap() calls
static H1_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1").expect("h1 selector should be valid"));
static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("anchor selector should be valid"));

/// Analyzes the page title declared on a document
#[derive(Debug, Clone)]
pub struct PageTitleAnalyzer {
    title: Option<String>,
}

impl PageTitleAnalyzer {
    pub fn new(title: Option<&str>) -> Self {
        Self {
            title: title.map(|t| t.to_string()),
        }
    }

    pub fn has_page_title(&self) -> bool {
        self.title.as_deref().is_some_and(|title| !title.is_empty())
    }

    /// Title length in characters; 0 when no title is declared
    pub fn page_title_length(&self) -> usize {
        self.title
            .as_deref()
            .map(|title| title.chars().count())
            .unwrap_or(0)
    }
}

/// Analyzes the page description declared on a document
#[derive(Debug, Clone)]
pub struct PageDescriptionAnalyzer {
    description: Option<String>,
}

impl PageDescriptionAnalyzer {
    pub fn new(description: Option<&str>) -> Self {
        Self {
            description: description.map(|d| d.to_string()),
        }
    }

    pub fn has_page_description(&self) -> bool {
        self.description
            .as_deref()
            .is_some_and(|description| !description.is_empty())
    }

    pub fn page_description_length(&self) -> usize {
        self.description
            .as_deref()
            .map(|description| description.chars().count())
            .unwrap_or(0)
    }
}

/// Analyzes the top-level heading of a document's HTML content.
///
/// Parsing is tolerant: malformed or partial HTML degrades to
/// "no title found" rather than failing.
#[derive(Debug, Clone)]
pub struct ContentTitleAnalyzer {
    content_title_count: usize,
}

impl ContentTitleAnalyzer {
    pub fn new(content: Option<&str>) -> Self {
        let content_title_count = content
            .map(|html| {
                Html::parse_fragment(html)
                    .select(&H1_SELECTOR)
                    .count()
            })
            .unwrap_or(0);

        Self {
            content_title_count,
        }
    }

    pub fn has_content_title(&self) -> bool {
        self.content_title_count > 0
    }

    /// A content title is unique as long as there is at most one of it
    pub fn is_content_title_unique(&self) -> bool {
        self.content_title_count <= 1
    }
}

/// Counts links in a document's HTML content that point back to the site.
///
/// Matching is substring containment of the site URL, not a strict
/// prefix check. Anchors without an href are ignored.
#[derive(Debug, Clone)]
pub struct InternalLinkAnalyzer {
    internal_link_occurrence: usize,
}

impl InternalLinkAnalyzer {
    pub fn new(content: Option<&str>, site_url: &str) -> Self {
        let internal_link_occurrence = content
            .map(|html| {
                Html::parse_fragment(html)
                    .select(&ANCHOR_SELECTOR)
                    .filter_map(|anchor| anchor.value().attr("href"))
                    .filter(|href| href.contains(site_url))
                    .count()
            })
            .unwrap_or(0);

        Self {
            internal_link_occurrence,
        }
    }

    pub fn has_internal_link(&self) -> bool {
        self.internal_link_occurrence > 0
    }

    pub fn internal_link_occurrence(&self) -> usize {
        self.internal_link_occurrence
    }
}

/// Bundles the four micro analyzers for one document
#[derive(Debug, Clone)]
pub struct SeoAnalyzer {
    pub page_title: PageTitleAnalyzer,
    pub page_description: PageDescriptionAnalyzer,
    pub content_title: ContentTitleAnalyzer,
    pub internal_link: InternalLinkAnalyzer,
}

impl SeoAnalyzer {
    pub fn new(document: &Document, site_url: &str) -> Self {
        Self {
            page_title: PageTitleAnalyzer::new(document.title.as_deref()),
            page_description: PageDescriptionAnalyzer::new(document.description.as_deref()),
            content_title: ContentTitleAnalyzer::new(document.content.as_deref()),
            internal_link: InternalLinkAnalyzer::new(document.content.as_deref(), site_url),
        }
    }
}
