//! # zevent-scrape
//!
//! Scrapes the ZEvent streamer list with a headless browser. Expands the list
//! by clicking the streamers button, then pulls username, donation total,
//! location and avatar URLs out of each entry and rewrites `streamers.csv`
//! after every extracted record.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use zevent_scrape::{ScrapeConfig, Scraper};
//!
//! # #[tokio::main]
//! # async fn main() -> zevent_scrape::Result<()> {
//! let config = ScrapeConfig::default();
//! let mut scraper = Scraper::new(&config).await?;
//! let report = scraper.run(&config).await?;
//! println!("Rows written: {}", report.records_written);
//! scraper.close().await?;
//! # Ok(())
//! # }
//! ```

mod avatar;
mod config;
mod export;
mod scrape;

pub use avatar::download_image;
pub use config::ScrapeConfig;
pub use export::write_csv;
pub use scrape::{ScrapeReport, Scraper, StreamerRecord};

/// Result type for zevent-scrape operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while scraping or writing output.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("browser error: {0}")]
    Browser(#[from] eoka::Error),

    /// The expand button or the streamer entries never materialized within
    /// the wait budget. Fatal: the run aborts, no retry.
    #[error("navigation timeout: {0}")]
    NavigationTimeout(String),

    /// A single entry could not be turned into a record. Recoverable: the
    /// entry is dropped and the loop moves on.
    #[error("extract error: {0}")]
    Extract(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
