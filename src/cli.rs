use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "seolift")]
#[command(about = "An SEO report and enhancement tool for static-site output", long_about = None)]
pub struct Cli {
    /// Path to the build manifest (JSON array of documents)
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Base URL of the site (required here or in the config file)
    #[arg(short, long)]
    pub site_url: Option<String>,

    /// Name of the site, used in the report and structured data
    #[arg(long)]
    pub site_name: Option<String>,

    /// Directory where the generator wrote the site (default: output)
    #[arg(short, long, default_value = "output")]
    pub output_path: PathBuf,

    /// Where to write the SEO report
    #[arg(long, default_value = "seo_report.html")]
    pub report_file: PathBuf,

    /// Generate the SEO report (default: true)
    #[arg(long, action = clap::ArgAction::Set)]
    pub report: Option<bool>,

    /// Write robots.txt and inject SEO tags into the generated HTML
    #[arg(long, action = clap::ArgAction::Set)]
    pub enhancer: Option<bool>,

    /// Add Open Graph tags (requires the enhancer)
    #[arg(long, action = clap::ArgAction::Set)]
    pub open_graph: Option<bool>,

    /// Add Twitter Cards tags (requires Open Graph)
    #[arg(long, action = clap::ArgAction::Set)]
    pub twitter_cards: Option<bool>,

    /// Cap how many articles receive report analysis
    #[arg(long)]
    pub articles_limit: Option<usize>,

    /// Cap how many pages receive report analysis
    #[arg(long)]
    pub pages_limit: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to configuration file (JSON, TOML, or YAML)
    #[arg(long)]
    pub config: Option<String>,
}
