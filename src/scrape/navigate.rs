use crate::config::ScrapeConfig;
use crate::{Error, Result};
use eoka::Page;
use tracing::{debug, info};

/// Load the event page, click the expand button and wait for the streamer
/// entries to appear. Returns the number of revealed entries.
///
/// Both waits share the configured budget. A timeout anywhere here is fatal:
/// no retry, the caller aborts the run.
pub async fn reveal_streamers(page: &Page, config: &ScrapeConfig) -> Result<usize> {
    info!("Navigating to: {}", config.event_url);
    page.goto(&config.event_url).await?;

    debug!("Waiting for button: {}", config.streamer_button_selector);
    page.wait_for_visible(&config.streamer_button_selector, config.wait_timeout_ms)
        .await
        .map_err(|e| {
            Error::NavigationTimeout(format!(
                "button '{}' never became clickable: {}",
                config.streamer_button_selector, e
            ))
        })?;
    page.click(&config.streamer_button_selector).await?;

    debug!("Waiting for entries: {}", config.streamer_entry_selector);
    page.wait_for(&config.streamer_entry_selector, config.wait_timeout_ms)
        .await
        .map_err(|e| {
            Error::NavigationTimeout(format!(
                "entries '{}' never appeared: {}",
                config.streamer_entry_selector, e
            ))
        })?;

    let js = format!(
        "document.querySelectorAll({}).length",
        serde_json::to_string(&config.streamer_entry_selector).unwrap()
    );
    let count: usize = page.evaluate(&js).await?;
    info!("Found {} streamer entries", count);

    Ok(count)
}
