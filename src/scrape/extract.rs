use crate::config::ScrapeConfig;
use crate::{Error, Result};
use eoka::Page;
use serde::Deserialize;
use std::path::Path;

/// Sentinel written for fields whose element could not be found.
pub const NOT_AVAILABLE: &str = "N/A";

/// Class the page uses to keep the location span invisible.
const HIDDEN_CLASS: &str = "hidden";

/// One row of the output table. All six fields are always populated; missing
/// data is the `"N/A"` sentinel or an empty string, never an omitted field,
/// so the CSV column set stays stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamerRecord {
    pub username: String,
    pub donation: String,
    pub location: String,
    pub twitch_url: String,
    pub avatar: String,
    pub avatar_online_url: String,
}

impl StreamerRecord {
    /// Column names, in output order.
    pub const FIELDS: [&'static str; 6] = [
        "username",
        "donation",
        "location",
        "twitch_url",
        "avatar",
        "avatar_online_url",
    ];

    /// Field values in the same order as [`Self::FIELDS`].
    pub fn values(&self) -> [&str; 6] {
        [
            &self.username,
            &self.donation,
            &self.location,
            &self.twitch_url,
            &self.avatar,
            &self.avatar_online_url,
        ]
    }
}

/// Raw per-field probe results for one entry. Every lookup is individually
/// fallible; `None` means the element (or attribute) was not there.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawEntry {
    pub href: Option<String>,
    pub avatar_url: Option<String>,
    pub avatar_alt: Option<String>,
    pub fallback_name: Option<String>,
    pub donation_text: Option<String>,
    #[serde(default)]
    pub location_text: Option<String>,
}

/// Extract one streamer record from the entry at `index`.
///
/// Driver-level failures (a probe script that cannot run) propagate and drop
/// the whole entry; a merely missing element degrades to a fallback value in
/// [`build_record`].
pub(crate) async fn extract_entry(
    page: &Page,
    config: &ScrapeConfig,
    index: usize,
) -> Result<StreamerRecord> {
    let raw = probe_entry(page, config, index).await?;
    build_record(&raw, &config.avatar_dir)
}

/// Run the per-field DOM probes for one entry.
async fn probe_entry(page: &Page, config: &ScrapeConfig, index: usize) -> Result<RawEntry> {
    let js = format!(
        r#"(() => {{
            const entry = {entry};
            if (!entry) return null;
            const img = entry.querySelector({img});
            const name = entry.querySelector({name});
            const badge = entry.querySelector({badge});
            return {{
                href: entry.href || null,
                avatar_url: img ? (img.src || null) : null,
                avatar_alt: img ? (img.getAttribute('alt') || null) : null,
                fallback_name: name ? name.innerText : null,
                donation_text: badge ? badge.innerText : null,
            }};
        }})()"#,
        entry = entry_expr(config, index),
        img = js_string(&config.avatar_img_selector),
        name = js_string(&config.username_fallback_selector),
        badge = js_string(&config.donation_selector),
    );
    let raw: Option<RawEntry> = page.evaluate(&js).await?;
    let mut raw =
        raw.ok_or_else(|| Error::Extract(format!("entry {} not found in DOM", index)))?;

    raw.location_text = probe_location(page, config, index).await?;
    Ok(raw)
}

/// Reveal the hidden location span, read it, hide it again.
///
/// The text only renders once the hiding class is removed, so this is two
/// mutations around one read. Non-atomic critical section: if the read throws
/// mid-script the class is not restored. Accepted gap.
async fn probe_location(
    page: &Page,
    config: &ScrapeConfig,
    index: usize,
) -> Result<Option<String>> {
    let js = format!(
        r#"(() => {{
            const entry = {entry};
            if (!entry) return null;
            const box = entry.querySelector({boxsel});
            if (!box) return null;
            const span = box.querySelector({span});
            if (!span) return null;
            span.classList.remove({cls});
            const text = span.innerText;
            span.classList.add({cls});
            return text;
        }})()"#,
        entry = entry_expr(config, index),
        boxsel = js_string(&config.location_box_selector),
        span = js_string(&config.location_hidden_selector),
        cls = js_string(HIDDEN_CLASS),
    );
    Ok(page.evaluate(&js).await?)
}

/// Assemble a record from raw probe results.
///
/// Failure domains:
/// - no username from either the avatar alt text or the fallback node fails
///   the whole record (the caller drops the entry)
/// - missing donation or location degrade to `"N/A"` and never touch the
///   other fields
/// - missing URLs degrade to the empty string
pub(crate) fn build_record(raw: &RawEntry, avatar_dir: &Path) -> Result<StreamerRecord> {
    let username = raw
        .avatar_alt
        .as_deref()
        .filter(|alt| !alt.is_empty())
        .or(raw.fallback_name.as_deref())
        .ok_or_else(|| Error::Extract("no username source (alt text or fallback node)".into()))?
        .to_string();

    let donation = raw
        .donation_text
        .as_deref()
        .map(clean_donation)
        .unwrap_or_else(|| NOT_AVAILABLE.into());

    let location = raw
        .location_text
        .clone()
        .unwrap_or_else(|| NOT_AVAILABLE.into());

    let avatar = avatar_dir
        .join(format!("{username}.png"))
        .to_string_lossy()
        .into_owned();

    Ok(StreamerRecord {
        username,
        donation,
        location,
        twitch_url: raw.href.clone().unwrap_or_default(),
        avatar,
        avatar_online_url: raw.avatar_url.clone().unwrap_or_default(),
    })
}

/// Strip grouping spaces and the euro glyph from a donation badge.
fn clean_donation(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, ' ' | '\u{a0}' | '\u{202f}' | '€'))
        .collect::<String>()
        .trim()
        .to_string()
}

fn entry_expr(config: &ScrapeConfig, index: usize) -> String {
    format!(
        "document.querySelectorAll({})[{}]",
        js_string(&config.streamer_entry_selector),
        index
    )
}

fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap()
}
