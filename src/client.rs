use reqwest::Client;
use std::time::Duration;

use crate::catalog::CatalogResponse;
use crate::error::{FetchError, FetchResult};

const USER_AGENT: &str = concat!(
    "inspiro/",
    env!("CARGO_PKG_VERSION"),
    " (terminal painting browser)"
);
const REQUEST_TIMEOUT_SECS: u64 = 30;
const MAX_REDIRECTS: usize = 5;
pub const BATCH_SIZE: u32 = 50;

pub struct CommonsClient {
    client: Client,
    endpoint: String,
}

impl CommonsClient {
    pub fn new(endpoint: impl Into<String>) -> FetchResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Query up to [`BATCH_SIZE`] file members of `Category:<category>`
    /// together with their image info and extended metadata.
    pub async fn category_members(&self, category: &str) -> FetchResult<CatalogResponse> {
        let title = format!("Category:{}", category);
        let limit = BATCH_SIZE.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("action", "query"),
                ("generator", "categorymembers"),
                ("gcmtitle", title.as_str()),
                ("gcmtype", "file"),
                ("prop", "imageinfo"),
                ("iiprop", "url|extmetadata|mime|size"),
                ("format", "json"),
                ("origin", "*"),
                ("gcmlimit", limit.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
                url: response.url().to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn download(&self, url: &str) -> FetchResult<Vec<u8>> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
