use crate::Result;
use std::path::Path;

/// Download an avatar image to a local file.
///
/// Not called by the scrape loop; the run only records the remote URL and the
/// derived local path. Kept as a capability for runs that want the files too.
pub async fn download_image(client: &reqwest::Client, url: &str, path: &Path) -> Result<()> {
    let response = client.get(url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path, &bytes).await?;
    Ok(())
}
