use std::fs::File;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::{error, info};
use simplelog::{Config, LevelFilter, WriteLogger};

use pagelinks::panic_handler;
use pagelinks::settings::{self, Settings};

/// Dump the hyperlinks of a PDF document, page by page
#[derive(Parser, Debug)]
#[command(name = "pagelinks", version, about)]
struct Cli {
    /// PDF file to inspect
    pdf: PathBuf,

    /// Page to inspect (1-based, repeatable); all pages when omitted
    #[arg(short, long = "page", value_parser = clap::value_parser!(u64).range(1..))]
    pages: Vec<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Maximum links printed per page (overrides settings)
    #[arg(long)]
    max_per_page: Option<usize>,

    /// Refuse external URLs when resolving link actions
    #[arg(long)]
    block_external: bool,

    /// Settings file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file
    #[arg(long, default_value = "pagelinks.log")]
    log_file: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    panic_handler::initialize_panic_handler();

    // Must be installed before settings load so their errors reach the file.
    WriteLogger::init(
        LevelFilter::Trace,
        Config::default(),
        File::create(&cli.log_file)?,
    )?;

    let settings = settings::load_settings(cli.config.as_deref());
    log::set_max_level(settings.log_level_filter());

    info!("Starting pagelinks on {:?}", cli.pdf);

    let res = run(&cli, &settings);
    if let Err(err) = &res {
        error!("Application error: {err:?}");
    }

    info!("Shutting down pagelinks");
    res
}

#[cfg(feature = "pdf")]
fn run(cli: &Cli, settings: &Settings) -> Result<()> {
    use anyhow::Context;
    use pagelinks::links::PageLinkCache;
    use pagelinks::pdf::MupdfDocument;
    use pagelinks::report;

    let document = MupdfDocument::open(&cli.pdf)
        .with_context(|| format!("Failed to open {}", cli.pdf.display()))?;

    let mut cache = PageLinkCache::with_bound(settings.max_cached_pages);
    cache.attach(document);

    let mut policy = settings.link_policy();
    if cli.block_external {
        policy.allow_external_urls = false;
    }

    let pages: Vec<usize> = cli
        .pages
        .iter()
        .map(|&page| usize::try_from(page - 1))
        .collect::<Result<_, _>>()
        .context("Page number too large")?;

    let report = report::collect_report(&mut cache, &pages, &policy)?;
    info!(
        "Scanned {} pages, {} links, {} extractions",
        report.pages.len(),
        report.total_links,
        report.cache.extractions
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let max_per_page = cli.max_per_page.unwrap_or(settings.max_links_per_page);
        print!("{}", report::render_text(&report, max_per_page));
    }

    Ok(())
}

#[cfg(not(feature = "pdf"))]
fn run(_cli: &Cli, _settings: &Settings) -> Result<()> {
    anyhow::bail!("PDF support is disabled; rebuild with the `pdf` feature")
}
