use std::path::{Path, PathBuf};
use tracing::info;
use url::Url;

use crate::client::CommonsClient;
use crate::error::FetchResult;

const FILE_STEM: &str = "inspiro_painting";
const DEFAULT_EXTENSION: &str = "jpg";
const MAX_EXTENSION_LEN: usize = 5;

/// `inspiro_painting.<ext>`, taking the extension from the image URL.
pub fn file_name_for(image_url: &str) -> String {
    let extension = Url::parse(image_url)
        .ok()
        .and_then(|url| {
            url.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .and_then(|name| {
            name.rsplit_once('.')
                .map(|(_, ext)| ext.to_ascii_lowercase())
        })
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

    format!("{}.{}", FILE_STEM, extension)
}

/// Download `image_url` into `dir`, replacing any earlier save.
pub async fn save_image(
    client: &CommonsClient,
    image_url: &str,
    dir: &Path,
) -> FetchResult<PathBuf> {
    let bytes = client.download(image_url).await?;

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(file_name_for(image_url));
    tokio::fs::write(&path, &bytes).await?;

    info!(path = %path.display(), bytes = bytes.len(), "saved image");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_follows_url() {
        assert_eq!(
            file_name_for("https://upload.wikimedia.org/a/ab/Mona_Lisa.JPG"),
            "inspiro_painting.jpg"
        );
        assert_eq!(
            file_name_for("https://upload.wikimedia.org/a/ab/Sunflowers.png?download"),
            "inspiro_painting.png"
        );
        assert_eq!(
            file_name_for("https://upload.wikimedia.org/a/ab/Nightwatch.tiff"),
            "inspiro_painting.tiff"
        );
    }

    #[test]
    fn extension_defaults_to_jpg() {
        assert_eq!(file_name_for("https://upload.wikimedia.org/a/ab/noext"), "inspiro_painting.jpg");
        assert_eq!(file_name_for("not a url"), "inspiro_painting.jpg");
        assert_eq!(file_name_for("https://x/file.weird-ext"), "inspiro_painting.jpg");
        assert_eq!(file_name_for(""), "inspiro_painting.jpg");
    }
}
