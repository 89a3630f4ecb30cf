use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use zevent_scrape::{ScrapeConfig, Scraper};

#[tokio::main]
async fn main() -> zevent_scrape::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    let config = ScrapeConfig::default();
    println!("Scraping: {}", config.event_url);

    let mut scraper = Scraper::new(&config).await?;
    let result = scraper.run(&config).await;
    // Release the browser before reporting, on every path.
    let close_result = scraper.close().await;

    match result {
        Ok(report) => {
            println!();
            println!("✓ Done");
            println!("  Entries found: {}", report.entries_found);
            println!("  Rows written: {}", report.records_written);
            if report.entries_skipped > 0 {
                println!("  Skipped: {}", report.entries_skipped);
            }
            println!("  Duration: {}ms", report.duration_ms);
            println!("  Output: {}", config.output_path.display());
        }
        Err(e) => {
            println!();
            println!("✗ Failed");
            println!("  Error: {}", e);
            close_result?;
            std::process::exit(1);
        }
    }

    close_result?;
    Ok(())
}
