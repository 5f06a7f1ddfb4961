pub mod analyzers;
pub mod cli;
pub mod config;
pub mod enhancer;
pub mod models;
pub mod report;
pub mod robots;
pub mod schema;
pub mod social;

use anyhow::Result;
use cli::Cli;
use colored::*;
use config::{Config, Settings};
use enhancer::SeoEnhancer;
use indicatif::{ProgressBar, ProgressStyle};
use models::{Document, DocumentKind};
use report::SeoReport;
use std::path::Path;

pub fn run(args: Cli) -> Result<()> {
    println!(
        "{}",
        "Seolift - SEO Report & Enhancement".bright_cyan().bold()
    );
    println!("{}", "=".repeat(50).bright_blue());
    println!();

    let config = match &args.config {
        Some(path) => Config::from_file(Path::new(path))?,
        None => Config::from_default_paths()?.unwrap_or_default(),
    };
    let settings = config.resolve(&args)?;

    let documents = models::load_documents(&args.manifest)?;

    println!(
        "{} {} documents loaded",
        "Manifest:".bright_white().bold(),
        documents.len()
    );
    println!(
        "{} {}",
        "Site URL:".bright_white().bold(),
        settings.site_url
    );
    println!();

    if settings.report {
        run_report(&args, &settings, &documents)?;
    }

    if settings.enhancer {
        run_enhancer(&args, &settings, &documents)?;
    }

    if !settings.report && !settings.enhancer {
        println!(
            "{}",
            "Nothing to do: report and enhancer are both disabled.".yellow()
        );
    }

    Ok(())
}

/// Report stage: analyze documents (up to the configured limits per
/// kind) and write the report file
fn run_report(args: &Cli, settings: &Settings, documents: &[Document]) -> Result<()> {
    if args.verbose {
        println!("{}", "Analyzing documents...".bright_yellow());
    }

    let seo_report = SeoReport::new(&settings.site_url);
    let mut analyses = Vec::new();
    let mut analyzed_articles = 0;
    let mut analyzed_pages = 0;

    for document in documents {
        match document.kind {
            DocumentKind::Article if analyzed_articles < settings.articles_limit => {
                analyses.push(seo_report.launch_analysis(document));
                analyzed_articles += 1;
            }
            DocumentKind::Page if analyzed_pages < settings.pages_limit => {
                analyses.push(seo_report.launch_analysis(document));
                analyzed_pages += 1;
            }
            _ => {}
        }
    }

    seo_report.generate(&settings.site_name, &analyses, &args.report_file)?;

    println!(
        "{} {} documents analyzed, report written to {}",
        "Success:".bright_green().bold(),
        analyses.len(),
        args.report_file.display()
    );

    Ok(())
}

/// Enhancer stage: robots.txt for every document, then in-place HTML
/// injection into each generated file. Limits do not apply here.
fn run_enhancer(args: &Cli, settings: &Settings, documents: &[Document]) -> Result<()> {
    let enhancer = SeoEnhancer::new(settings);

    let rules: Vec<_> = documents
        .iter()
        .map(|document| enhancer.populate_robots(document))
        .collect();
    enhancer.generate_robots(&rules, &args.output_path)?;

    println!(
        "{} robots.txt written to {}",
        "Success:".bright_green().bold(),
        args.output_path.join("robots.txt").display()
    );

    let progress_bar = ProgressBar::new(documents.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} Enhancing")
            .expect("Progress bar template should be valid"),
    );

    let mut enhanced = 0;
    for document in documents {
        let path = args.output_path.join(document.file_url());

        // The manifest may list documents the build did not write
        if !path.exists() {
            tracing::warn!(
                url = %document.url,
                path = %path.display(),
                "Generated file not found, skipping enhancement"
            );
            progress_bar.inc(1);
            continue;
        }

        let enhancements = enhancer.launch_html_enhancer(document, &args.output_path, &path)?;
        enhancer.add_html_to_file(&enhancements, &path)?;

        enhanced += 1;
        progress_bar.inc(1);
    }

    progress_bar.finish_and_clear();

    println!(
        "{} {} HTML files enhanced",
        "Success:".bright_green().bold(),
        enhanced
    );

    Ok(())
}
