use serde::Serialize;

/// A cleaned painting ready for display. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintingRecord {
    url: String,
    artist: String,
    title: String,
    date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    artist_url: Option<String>,
}

impl PaintingRecord {
    pub fn new(
        url: String,
        artist: String,
        title: String,
        date: String,
        artist_url: Option<String>,
    ) -> Self {
        Self {
            url,
            artist,
            title,
            date,
            artist_url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn artist_url(&self) -> Option<&str> {
        self.artist_url.as_deref()
    }
}
