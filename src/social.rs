use chrono::NaiveDateTime;
use url::Url;

use crate::models::DATE_FORMAT;

/// Flat list of meta-tag key/value pairs, in emission order. A list
/// rather than a map because Open Graph article tags may repeat a key
/// (one `article:tag` per tag).
pub type MetaTags = Vec<(String, String)>;

/// Builds the Open Graph tags of a document.
///
/// `url` and `type` are always present; every other tag is emitted only
/// when its source value is.
#[derive(Debug, Clone)]
pub struct OpenGraph {
    site_url: String,
    file_url: String,
    file_type: String,
    site_name: Option<String>,
    title: Option<String>,
    description: Option<String>,
    image: Option<String>,
    locale: Vec<String>,
}

impl OpenGraph {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        site_url: &str,
        file_url: &str,
        file_type: &str,
        site_name: Option<&str>,
        title: Option<&str>,
        description: Option<&str>,
        image: Option<&str>,
        locale: &[String],
    ) -> Self {
        Self {
            site_url: site_url.to_string(),
            file_url: file_url.to_string(),
            file_type: file_type.to_string(),
            site_name: non_empty(site_name),
            title: non_empty(title),
            description: non_empty(description),
            image: non_empty(image),
            locale: locale.to_vec(),
        }
    }

    /// Resolves the file URL against the site URL, tolerating missing or
    /// doubled slashes on either side.
    fn create_absolute_file_url(&self) -> String {
        if let Ok(base) = Url::parse(&self.site_url)
            && let Ok(absolute) = base.join(&self.file_url)
        {
            return absolute.to_string();
        }

        format!(
            "{}/{}",
            self.site_url.trim_end_matches('/'),
            self.file_url.trim_start_matches('/')
        )
    }

    /// First non-empty configured locale, else the system locale
    /// language (encoding discarded). May resolve to nothing at all.
    fn resolve_locale(&self) -> Option<String> {
        if let Some(locale) = self.locale.iter().find(|locale| !locale.is_empty()) {
            return Some(locale.clone());
        }

        system_locale()
    }

    pub fn create_tags(&self) -> MetaTags {
        let mut tags: MetaTags = Vec::new();

        tags.push(("url".to_string(), self.create_absolute_file_url()));
        tags.push(("type".to_string(), self.file_type.clone()));

        if let Some(site_name) = &self.site_name {
            tags.push(("site_name".to_string(), site_name.clone()));
        }

        if let Some(title) = &self.title {
            tags.push(("title".to_string(), title.clone()));
        }

        if let Some(description) = &self.description {
            tags.push(("description".to_string(), description.clone()));
        }

        if let Some(image) = &self.image {
            tags.push(("image".to_string(), image.clone()));
        }

        if let Some(locale) = self.resolve_locale() {
            tags.push(("locale".to_string(), locale));
        }

        tags
    }
}

/// Article-specific Open Graph extension tags
#[derive(Debug, Clone)]
pub struct OpenGraphArticle {
    date: Option<NaiveDateTime>,
    modified: Option<NaiveDateTime>,
    section: Option<String>,
    tags: Vec<String>,
    author: Option<String>,
}

impl OpenGraphArticle {
    pub fn new(
        date: Option<NaiveDateTime>,
        modified: Option<NaiveDateTime>,
        section: Option<&str>,
        tags: &[String],
        author: Option<&str>,
    ) -> Self {
        Self {
            date,
            modified,
            section: non_empty(section),
            tags: tags.to_vec(),
            author: non_empty(author),
        }
    }

    pub fn create_tags(&self) -> MetaTags {
        let mut tags: MetaTags = Vec::new();

        if let Some(date) = self.date {
            tags.push((
                "article:published_time".to_string(),
                date.format(DATE_FORMAT).to_string(),
            ));
        }

        if let Some(modified) = self.modified {
            tags.push((
                "article:modified_time".to_string(),
                modified.format(DATE_FORMAT).to_string(),
            ));
        }

        if let Some(section) = &self.section {
            tags.push(("article:section".to_string(), section.clone()));
        }

        for tag in self.tags.iter().filter(|tag| !tag.is_empty()) {
            tags.push(("article:tag".to_string(), tag.clone()));
        }

        if let Some(author) = &self.author {
            tags.push(("article:author".to_string(), author.clone()));
        }

        tags
    }
}

/// Builds the Twitter Cards tags. Missing tags are filled by Open Graph
/// at display time, as Twitter falls back on it.
#[derive(Debug, Clone)]
pub struct TwitterCards {
    account: Option<String>,
}

impl TwitterCards {
    pub fn new(account: Option<&str>) -> Self {
        Self {
            account: non_empty(account),
        }
    }

    pub fn create_tags(&self) -> MetaTags {
        let mut tags: MetaTags = vec![("card".to_string(), "summary".to_string())];

        if let Some(account) = &self.account {
            tags.push(("site".to_string(), account.clone()));
        }

        tags
    }
}

/// Language portion of the process locale, from the usual environment
/// variables, with any encoding or modifier suffix discarded.
fn system_locale() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|value| {
            value
                .split(['.', '@'])
                .next()
                .unwrap_or_default()
                .to_string()
        })
        .find(|language| !language.is_empty() && language != "C" && language != "POSIX")
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.is_empty())
        .map(|value| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_date;

    fn tag<'a>(tags: &'a MetaTags, key: &str) -> Option<&'a str> {
        tags.iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    #[test]
    fn test_open_graph_url_and_type_always_present() {
        let open_graph = OpenGraph::new(
            "https://example.com",
            "articles/a.html",
            "article",
            None,
            None,
            None,
            None,
            &[],
        );
        let tags = open_graph.create_tags();

        assert_eq!(tag(&tags, "url"), Some("https://example.com/articles/a.html"));
        assert_eq!(tag(&tags, "type"), Some("article"));
        assert_eq!(tag(&tags, "title"), None);
        assert_eq!(tag(&tags, "description"), None);
        assert_eq!(tag(&tags, "image"), None);
    }

    #[test]
    fn test_open_graph_url_tolerates_slashes() {
        let open_graph = OpenGraph::new(
            "https://example.com/",
            "/a.html",
            "website",
            None,
            None,
            None,
            None,
            &[],
        );
        let tags = open_graph.create_tags();

        assert_eq!(tag(&tags, "url"), Some("https://example.com/a.html"));
    }

    #[test]
    fn test_open_graph_optional_tags_when_present() {
        let open_graph = OpenGraph::new(
            "https://example.com",
            "a.html",
            "article",
            Some("My site"),
            Some("A title"),
            Some("A description"),
            Some("https://example.com/img.png"),
            &["fr_FR".to_string()],
        );
        let tags = open_graph.create_tags();

        assert_eq!(tag(&tags, "site_name"), Some("My site"));
        assert_eq!(tag(&tags, "title"), Some("A title"));
        assert_eq!(tag(&tags, "description"), Some("A description"));
        assert_eq!(tag(&tags, "image"), Some("https://example.com/img.png"));
        assert_eq!(tag(&tags, "locale"), Some("fr_FR"));
    }

    #[test]
    fn test_open_graph_locale_skips_empty_entries() {
        let open_graph = OpenGraph::new(
            "https://example.com",
            "a.html",
            "website",
            None,
            None,
            None,
            None,
            &["".to_string(), "fr_FR".to_string()],
        );
        let tags = open_graph.create_tags();

        assert_eq!(tag(&tags, "locale"), Some("fr_FR"));
    }

    #[test]
    fn test_open_graph_article_tags() {
        let article = OpenGraphArticle::new(
            parse_date("2020-01-31 14:00"),
            parse_date("2020-02-01 09:30"),
            Some("Science"),
            &["rust".to_string(), "seo".to_string()],
            Some("Jane Doe"),
        );
        let tags = article.create_tags();

        assert_eq!(tag(&tags, "article:published_time"), Some("2020-01-31 14:00"));
        assert_eq!(tag(&tags, "article:modified_time"), Some("2020-02-01 09:30"));
        assert_eq!(tag(&tags, "article:section"), Some("Science"));
        assert_eq!(tag(&tags, "article:author"), Some("Jane Doe"));

        let article_tags: Vec<&str> = tags
            .iter()
            .filter(|(name, _)| name == "article:tag")
            .map(|(_, value)| value.as_str())
            .collect();
        assert_eq!(article_tags, vec!["rust", "seo"]);
    }

    #[test]
    fn test_open_graph_article_omits_empty_collections() {
        let article = OpenGraphArticle::new(None, None, None, &[], None);
        assert!(article.create_tags().is_empty());
    }

    #[test]
    fn test_twitter_cards_always_summary() {
        let cards = TwitterCards::new(None);
        assert_eq!(cards.create_tags(), vec![("card".to_string(), "summary".to_string())]);
    }

    #[test]
    fn test_twitter_cards_with_account() {
        let cards = TwitterCards::new(Some("@example"));
        let tags = cards.create_tags();

        assert_eq!(tag(&tags, "card"), Some("summary"));
        assert_eq!(tag(&tags, "site"), Some("@example"));
    }
}
