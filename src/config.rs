use crate::{Error, Result};
use std::path::PathBuf;

/// Immutable scrape configuration. The defaults target the ZEvent donation
/// page; tests swap in their own URL and locators.
///
/// The top-level locators are positional (translated from the page's DOM
/// shape), the nested ones are class-based. Both are brittle to upstream
/// markup changes, which is inherent to the domain.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Page to scrape.
    pub event_url: String,

    /// Button that expands the streamer list.
    pub streamer_button_selector: String,

    /// Repeated anchor elements, one per streamer.
    pub streamer_entry_selector: String,

    /// Avatar image inside an entry.
    pub avatar_img_selector: String,

    /// Username text node, used when the avatar has no alt text.
    pub username_fallback_selector: String,

    /// Donation badge inside an entry.
    pub donation_selector: String,

    /// Container holding the hidden location span.
    pub location_box_selector: String,

    /// The location span itself, hidden via a CSS class.
    pub location_hidden_selector: String,

    /// Wait budget for the button and for the entries, in milliseconds.
    pub wait_timeout_ms: u64,

    /// CSV output path, truncated and rewritten after every record.
    pub output_path: PathBuf,

    /// Directory the derived avatar paths point into.
    pub avatar_dir: PathBuf,

    /// Run the browser headless.
    pub headless: bool,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            event_url: "https://zevent.fr/".into(),
            streamer_button_selector: "body > div > div > div:nth-of-type(1) > div > button".into(),
            streamer_entry_selector: "body > div:nth-of-type(3) > div:nth-of-type(3) > a".into(),
            avatar_img_selector: "img".into(),
            username_fallback_selector: "span.truncate".into(),
            donation_selector: "span.bg-primary-900".into(),
            location_box_selector: "div.group.relative".into(),
            location_hidden_selector: "span.hidden".into(),
            wait_timeout_ms: 60_000,
            output_path: PathBuf::from("streamers.csv"),
            avatar_dir: PathBuf::from("avatars"),
            headless: true,
        }
    }
}

impl ScrapeConfig {
    /// Validate the config before launching a browser.
    pub fn validate(&self) -> Result<()> {
        if self.event_url.is_empty() {
            return Err(Error::Config("event_url is required".into()));
        }
        if self.streamer_button_selector.is_empty() {
            return Err(Error::Config("streamer_button_selector is required".into()));
        }
        if self.streamer_entry_selector.is_empty() {
            return Err(Error::Config("streamer_entry_selector is required".into()));
        }
        if self.wait_timeout_ms == 0 {
            return Err(Error::Config("wait_timeout_ms must be at least 1".into()));
        }
        Ok(())
    }
}
