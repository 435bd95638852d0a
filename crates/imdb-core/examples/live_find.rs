use imdb_core::ImdbScraper;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let scraper = ImdbScraper::new();

    let results = scraper.find_title("luca", &[]).await?;
    println!("found {} results:", results.len());
    for (i, result) in results.iter().enumerate() {
        println!("{}: {}", i, result);
        println!("  url: {}", result.url);
    }

    Ok(())
}
