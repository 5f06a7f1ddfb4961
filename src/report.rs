use crate::analyzers::{
    ContentTitleAnalyzer, InternalLinkAnalyzer, PageDescriptionAnalyzer, PageTitleAnalyzer,
    SeoAnalyzer,
};
use crate::models::{DATE_FORMAT, Document};
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

const PAGE_TITLE_RECOMMENDED_LENGTH: RangeInclusive<usize> = 60..=70;
const PAGE_DESCRIPTION_RECOMMENDED_LENGTH: RangeInclusive<usize> = 150..=160;

/// Analysis of one document: its URL, formatted publication date and the
/// four micro analyzers, always present even when the underlying data is
/// missing.
#[derive(Debug, Clone)]
pub struct DocumentAnalysis {
    pub url: String,
    pub date: Option<String>,
    pub analyzers: SeoAnalyzer,
}

/// One categorized micro-report (page title, description, ...)
#[derive(Debug, Clone)]
pub struct MicroReport {
    pub title: &'static str,
    pub good: Vec<String>,
    pub to_improve: Vec<String>,
    pub problems: Vec<String>,
}

impl MicroReport {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            good: Vec::new(),
            to_improve: Vec::new(),
            problems: Vec::new(),
        }
    }
}

/// Micro-reports of one document, ready for rendering
#[derive(Debug, Clone)]
pub struct DocumentReport {
    pub url: String,
    pub date: Option<String>,
    pub reports: Vec<MicroReport>,
}

/// Builds the SEO report for a whole document collection
pub struct SeoReport {
    site_url: String,
}

impl SeoReport {
    pub fn new(site_url: &str) -> Self {
        Self {
            site_url: site_url.to_string(),
        }
    }

    /// Runs the four analyzers against one document
    pub fn launch_analysis(&self, document: &Document) -> DocumentAnalysis {
        DocumentAnalysis {
            url: document.url.clone(),
            date: document.date.map(|date| date.format(DATE_FORMAT).to_string()),
            analyzers: SeoAnalyzer::new(document, &self.site_url),
        }
    }

    fn page_title_report(analysis: &PageTitleAnalyzer) -> MicroReport {
        let mut report = MicroReport::new("Page title analysis");

        if analysis.has_page_title() {
            report
                .good
                .push("You have declared a title. Nice job!".to_string());

            let length = analysis.page_title_length();
            if PAGE_TITLE_RECOMMENDED_LENGTH.contains(&length) {
                report.good.push("Your title has a good length.".to_string());
            } else if length < *PAGE_TITLE_RECOMMENDED_LENGTH.start() {
                report.to_improve.push(
                    "Your title is too short. The minimum recommended length is 60 characters."
                        .to_string(),
                );
            } else {
                report.to_improve.push(
                    "Your title is too long. The maximum recommended length is 70 characters."
                        .to_string(),
                );
            }
        } else {
            report
                .problems
                .push("Title is missing. Create one to improve your SEO.".to_string());
        }

        report
    }

    fn page_description_report(analysis: &PageDescriptionAnalyzer) -> MicroReport {
        let mut report = MicroReport::new("Page description analysis");

        if analysis.has_page_description() {
            report
                .good
                .push("You have declared a description. Nice job!".to_string());

            let length = analysis.page_description_length();
            if PAGE_DESCRIPTION_RECOMMENDED_LENGTH.contains(&length) {
                report
                    .good
                    .push("Your description has a good length.".to_string());
            } else if length < *PAGE_DESCRIPTION_RECOMMENDED_LENGTH.start() {
                report.to_improve.push(
                    "Your description is too short. The minimum recommended length is 150 characters."
                        .to_string(),
                );
            } else {
                report.to_improve.push(
                    "Your description is too long. The maximum recommended length is 160 characters."
                        .to_string(),
                );
            }
        } else {
            report
                .problems
                .push("You need to declare a description to improve SEO.".to_string());
        }

        report
    }

    fn content_title_report(analysis: &ContentTitleAnalyzer) -> MicroReport {
        let mut report = MicroReport::new("Content title analysis");

        if analysis.has_content_title() {
            report
                .good
                .push("You have declared a content title. Nice job!".to_string());

            if !analysis.is_content_title_unique() {
                report
                    .to_improve
                    .push("Your content title must be unique.".to_string());
            }
        } else {
            report
                .problems
                .push("You're missing a content title.".to_string());
        }

        report
    }

    fn internal_link_report(analysis: &InternalLinkAnalyzer) -> MicroReport {
        let mut report = MicroReport::new("Internal link analysis");

        if analysis.has_internal_link() {
            report.good.push(format!(
                "You've included {} internal links. Nice job!",
                analysis.internal_link_occurrence()
            ));
        } else {
            report
                .problems
                .push("It's better to include internal links.".to_string());
        }

        report
    }

    /// Turns one document analysis into its four ordered micro-reports
    pub fn launch_report(analysis: &DocumentAnalysis) -> Vec<MicroReport> {
        vec![
            Self::page_title_report(&analysis.analyzers.page_title),
            Self::page_description_report(&analysis.analyzers.page_description),
            Self::content_title_report(&analysis.analyzers.content_title),
            Self::internal_link_report(&analysis.analyzers.internal_link),
        ]
    }

    /// Builds all document reports, sorted from the most recent
    /// publication to the oldest, with undated documents at the end in
    /// their original relative order.
    pub fn build_reports(documents_analysis: &[DocumentAnalysis]) -> Vec<DocumentReport> {
        let mut reports: Vec<DocumentReport> = documents_analysis
            .iter()
            .map(|analysis| DocumentReport {
                url: analysis.url.clone(),
                date: analysis.date.clone(),
                reports: Self::launch_report(analysis),
            })
            .collect();

        // The formatted date sorts lexicographically in date order
        reports.sort_by(|a, b| {
            let key_a = (a.date.is_some(), a.date.as_deref());
            let key_b = (b.date.is_some(), b.date.as_deref());
            key_b.cmp(&key_a)
        });

        reports
    }

    /// Renders the full report as a single static HTML page
    pub fn render(site_name: &str, reports: &[DocumentReport]) -> String {
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(html, "<title>SEO report - {}</title>", escape(site_name));
        html.push_str(REPORT_CSS);
        html.push_str("</head>\n<body>\n");
        let _ = writeln!(html, "<h1>SEO report - {}</h1>", escape(site_name));

        for report in reports {
            html.push_str("<section>\n");
            let _ = writeln!(html, "<h2>{}</h2>", escape(&report.url));
            if let Some(date) = &report.date {
                let _ = writeln!(html, "<p class=\"date\">{}</p>", escape(date));
            }

            for micro_report in &report.reports {
                html.push_str("<article>\n");
                let _ = writeln!(html, "<h3>{}</h3>", micro_report.title);
                Self::render_list(&mut html, "good", &micro_report.good);
                Self::render_list(&mut html, "to-improve", &micro_report.to_improve);
                Self::render_list(&mut html, "problems", &micro_report.problems);
                html.push_str("</article>\n");
            }

            html.push_str("</section>\n");
        }

        html.push_str("</body>\n</html>\n");
        html
    }

    fn render_list(html: &mut String, class: &str, items: &[String]) {
        if items.is_empty() {
            return;
        }

        let _ = writeln!(html, "<ul class=\"{}\">", class);
        for item in items {
            let _ = writeln!(html, "<li>{}</li>", escape(item));
        }
        html.push_str("</ul>\n");
    }

    /// Generates the report file. Full overwrite, idempotent.
    pub fn generate(
        &self,
        site_name: &str,
        documents_analysis: &[DocumentAnalysis],
        output_file: &Path,
    ) -> Result<()> {
        let reports = Self::build_reports(documents_analysis);
        let html = Self::render(site_name, &reports);

        fs::write(output_file, html)
            .with_context(|| format!("Failed to write report file: {}", output_file.display()))?;

        tracing::info!(path = %output_file.display(), "SEO report file created");

        Ok(())
    }
}

const REPORT_CSS: &str = "<style>\n\
    body { font-family: sans-serif; max-width: 60rem; margin: 0 auto; }\n\
    section { border-top: 1px solid #ccc; padding: 0.5rem 0; }\n\
    .date { color: #666; }\n\
    ul.good li { color: #19692c; }\n\
    ul.to-improve li { color: #9a6700; }\n\
    ul.problems li { color: #a40e26; }\n\
</style>\n";

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
