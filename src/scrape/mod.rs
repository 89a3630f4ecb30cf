mod extract;
mod navigate;

use crate::config::ScrapeConfig;
use crate::{export, Result};
use eoka::{Browser, Page};
use std::time::Instant;
use tracing::{debug, info, warn};

pub use extract::StreamerRecord;

/// Outcome of a scrape run.
#[derive(Debug)]
pub struct ScrapeReport {
    /// Number of entries revealed on the page.
    pub entries_found: usize,
    /// Number of records written to the output file.
    pub records_written: usize,
    /// Entries dropped because no record could be built from them.
    pub entries_skipped: usize,
    /// Total duration in milliseconds.
    pub duration_ms: u64,
}

/// Drives one browser session through the scrape.
pub struct Scraper {
    browser: Browser,
    page: Page,
}

impl Scraper {
    /// Launch a browser and open a blank page.
    pub async fn new(config: &ScrapeConfig) -> Result<Self> {
        config.validate()?;

        let stealth = eoka::StealthConfig {
            headless: config.headless,
            ..Default::default()
        };

        debug!("Launching browser (headless: {})", config.headless);
        let browser = Browser::launch_with_config(stealth).await?;
        let page = browser.new_page("about:blank").await?;

        Ok(Self { browser, page })
    }

    /// Get a reference to the page.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Navigate, expand the streamer list and extract every entry.
    ///
    /// The output file is rewritten from the full accumulated list after each
    /// extracted record, so partial progress survives a mid-run crash. An
    /// entry that yields no record is logged and skipped; a navigation
    /// timeout aborts the run.
    pub async fn run(&mut self, config: &ScrapeConfig) -> Result<ScrapeReport> {
        let start = Instant::now();

        let entries_found = navigate::reveal_streamers(&self.page, config).await?;

        let mut records = Vec::with_capacity(entries_found);
        let mut entries_skipped = 0;

        for index in 0..entries_found {
            match extract::extract_entry(&self.page, config, index).await {
                Ok(record) => {
                    debug!("entry {}: {}", index, record.username);
                    records.push(record);
                    export::write_csv(&config.output_path, &records)?;
                }
                Err(e) => {
                    warn!("Error parsing streamer entry {}: {}", index, e);
                    entries_skipped += 1;
                }
            }
        }

        info!(
            "Found {} streamer elements, wrote {} rows",
            entries_found,
            records.len()
        );

        Ok(ScrapeReport {
            entries_found,
            records_written: records.len(),
            entries_skipped,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Close the browser.
    pub async fn close(self) -> Result<()> {
        self.browser.close().await?;
        Ok(())
    }
}
