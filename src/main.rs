use clap::Parser;
use folio::{FileSource, Page, PortfolioConfig, ProjectSource};
use std::path::{Path, PathBuf};
use std::process;

/// Render a portfolio page's project grid without a browser
#[derive(Parser, Debug)]
#[command(name = "folio", version, about)]
struct Cli {
    /// Host page HTML; a minimal page with only the grid is used when absent
    #[arg(long)]
    page: Option<PathBuf>,

    /// Project collection: an http(s) URL, or a JSON file path (relative to the page)
    #[arg(long, default_value = "projects.json")]
    source: String,

    /// Category to filter by after loading ("all" shows everything)
    #[arg(long)]
    filter: Option<String>,

    /// Vertical scroll offset to apply before printing
    #[arg(long)]
    scroll: Option<f64>,

    /// Request timeout in milliseconds
    #[arg(long, default_value_t = 30000)]
    timeout_ms: u64,

    /// Fallback image for cards whose image fails to load
    #[arg(long)]
    fallback_image: Option<String>,

    /// Print a JSON snapshot of the page instead of grid markup
    #[arg(long)]
    json: bool,
}

const BARE_PAGE: &str = r#"<div id="portfolio-grid"></div>"#;

fn build_source(cli: &Cli, config: &PortfolioConfig) -> folio::Result<Box<dyn ProjectSource>> {
    if cli.source.starts_with("http://") || cli.source.starts_with("https://") {
        #[cfg(feature = "http")]
        {
            let src = folio::HttpSource::from_url(&cli.source, config)?;
            return Ok(Box::new(src));
        }
        #[cfg(not(feature = "http"))]
        {
            let _ = config;
            return Err(folio::Error::ConfigError(
                "HTTP sources need the `http` feature".into(),
            ));
        }
    }

    let base = cli
        .page
        .as_deref()
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new("."));
    Ok(Box::new(FileSource::new(base.join(&cli.source))))
}

fn run(cli: Cli) -> folio::Result<()> {
    let mut config = PortfolioConfig {
        source: cli.source.clone(),
        timeout_ms: cli.timeout_ms,
        ..Default::default()
    };
    if let Some(img) = &cli.fallback_image {
        config.fallback_image = img.clone();
    }

    let html = match &cli.page {
        Some(path) => std::fs::read_to_string(path)?,
        None => BARE_PAGE.to_string(),
    };

    let source = build_source(&cli, &config)?;
    let mut page = Page::from_html(&html, config, source)?;

    // A failed load is already reflected in the grid; report it and carry on.
    if let Err(e) = page.start() {
        eprintln!("folio: {}", e);
    }

    if let Some(value) = &cli.filter {
        if !page.click_filter_value(value) {
            page.renderer_mut().filter(&folio::Filter::parse(value));
        }
    }
    if let Some(y) = cli.scroll {
        page.scroll(y);
    }

    if cli.json {
        let snap = serde_json::to_string_pretty(&page.snapshot())?;
        println!("{}", snap);
    } else {
        println!("{}", page.grid_html());
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("folio: {}", e);
        process::exit(1);
    }
}
