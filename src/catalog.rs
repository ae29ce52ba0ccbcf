//! Response model for the Commons `categorymembers` + `imageinfo` query,
//! and the filtering and selection applied to it.

use rand::Rng;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::cleaner::{self, UNKNOWN};
use crate::error::{FetchError, FetchResult};
use crate::painting::PaintingRecord;

pub const FIELD_OBJECT_NAME: &str = "ObjectName";
pub const FIELD_ARTIST: &str = "Artist";
pub const FIELD_DATE: &str = "DateTimeOriginal";

#[derive(Debug, Deserialize)]
pub struct CatalogResponse {
    #[serde(default)]
    query: Option<Query>,
}

#[derive(Debug, Deserialize)]
struct Query {
    #[serde(default)]
    pages: Option<BTreeMap<String, Page>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub imageinfo: Vec<ImageInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageInfo {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub mime: Option<String>,
    #[serde(default)]
    pub width: Option<u64>,
    #[serde(default)]
    pub height: Option<u64>,
    #[serde(default)]
    pub extmetadata: Option<HashMap<String, MetadataField>>,
}

/// One `extmetadata` entry. `value` is usually a string but Commons
/// occasionally sends numbers, so it is kept untyped.
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataField {
    #[serde(default)]
    pub value: serde_json::Value,
}

impl MetadataField {
    pub fn text(&self) -> &str {
        self.value.as_str().unwrap_or("")
    }
}

impl CatalogResponse {
    pub fn into_pages(self) -> FetchResult<Vec<Page>> {
        self.query
            .and_then(|q| q.pages)
            .map(|pages| pages.into_values().collect())
            .ok_or_else(|| FetchError::MalformedResponse("missing query.pages".to_string()))
    }
}

impl ImageInfo {
    fn field(&self, name: &str) -> Option<&MetadataField> {
        self.extmetadata.as_ref().and_then(|meta| meta.get(name))
    }

    pub fn area(&self) -> u64 {
        self.width
            .unwrap_or(0)
            .saturating_mul(self.height.unwrap_or(0))
    }

    fn is_still_image(&self) -> bool {
        self.mime
            .as_deref()
            .map_or(false, |mime| mime.starts_with("image/") && !mime.contains("pdf"))
    }
}

/// Filtering knobs applied to every page of a catalog response.
pub struct CandidateFilter<'a> {
    pub year_cutoff: u32,
    pub seen: Option<&'a HashSet<String>>,
}

impl CandidateFilter<'_> {
    pub fn accepts(&self, info: &ImageInfo) -> bool {
        let url = match info.url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => return false,
        };

        info.extmetadata.is_some()
            && info.field(FIELD_OBJECT_NAME).is_some()
            && info.is_still_image()
            && cleaner::is_before_cutoff(info.field(FIELD_DATE).map(|f| f.text()), self.year_cutoff)
            && !self.seen.map_or(false, |seen| seen.contains(url))
    }
}

#[derive(Debug, Clone)]
pub struct Candidate {
    pub info: ImageInfo,
    pub area: u64,
}

pub fn candidates(pages: Vec<Page>, filter: &CandidateFilter<'_>) -> Vec<Candidate> {
    pages
        .into_iter()
        .filter_map(|page| page.imageinfo.into_iter().next())
        .filter(|info| filter.accepts(info))
        .map(|info| Candidate {
            area: info.area(),
            info,
        })
        .collect()
}

/// Pick uniformly among the largest quarter (at least one) of `candidates`.
pub fn pick<R: Rng + ?Sized>(mut candidates: Vec<Candidate>, rng: &mut R) -> Option<Candidate> {
    if candidates.is_empty() {
        return None;
    }
    candidates.sort_by(|a, b| b.area.cmp(&a.area));
    let top = (candidates.len() / 4).max(1);
    let index = rng.gen_range(0..top);
    Some(candidates.swap_remove(index))
}

impl Candidate {
    pub fn into_record(self) -> PaintingRecord {
        let info = self.info;
        let raw_artist = info.field(FIELD_ARTIST).map(|f| f.text());

        let artist = raw_artist
            .map(cleaner::clean_artist_name)
            .unwrap_or_else(|| UNKNOWN.to_string());
        let artist_url = raw_artist.and_then(cleaner::extract_artist_url);
        let title = info
            .field(FIELD_OBJECT_NAME)
            .map(|f| cleaner::clean_title(f.text()))
            .unwrap_or_else(|| UNKNOWN.to_string());
        let date = info
            .field(FIELD_DATE)
            .map(|f| cleaner::clean_date(f.text()))
            .unwrap_or_else(|| UNKNOWN.to_string());

        PaintingRecord::new(info.url.unwrap_or_default(), artist, title, date, artist_url)
    }
}
