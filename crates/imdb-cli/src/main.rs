//! Command line search for imdb.com
//!
//! Prints one rendered line per search result, optionally logging HTTP
//! traffic and caching responses on disk.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use imdb_core::{ClientConfig, ImdbScraper};

#[derive(Parser)]
#[command(name = "imdb", version, about = "Search imdb.com from the command line")]
struct Args {
    /// Search query
    #[arg(short, long)]
    query: String,

    /// Search kind: all, company, keyword, name, title, movie, series,
    /// episode or game
    #[arg(short = 't', long = "type", default_value = "all")]
    kind: String,

    /// Log HTTP requests and responses
    #[arg(short, long)]
    verbose: bool,

    /// Directory for the on-disk response cache
    #[arg(long)]
    cache_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    if args.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let scraper = ImdbScraper::with_config(ClientConfig {
        cache_dir: args.cache_dir.clone(),
        http_log: args.verbose,
        ..ClientConfig::default()
    });

    let results = match args.kind.as_str() {
        "all" => scraper.find(&args.query, &[]).await?,
        "company" => scraper.find_company(&args.query, &[]).await?,
        "keyword" => scraper.find_keyword(&args.query, &[]).await?,
        "name" => scraper.find_name(&args.query, &[]).await?,
        "title" => scraper.find_title(&args.query, &[]).await?,
        "movie" => scraper.find_movie(&args.query, &[]).await?,
        "series" => scraper.find_series(&args.query, &[]).await?,
        "episode" => scraper.find_episode(&args.query, &[]).await?,
        "game" => scraper.find_game(&args.query, &[]).await?,
        other => return Err(format!("unknown search kind: {:?}", other).into()),
    };

    for (i, result) in results.iter().enumerate() {
        println!("{}: {}", i, result);
        println!("  url: {}", result.url);
    }
    Ok(())
}
