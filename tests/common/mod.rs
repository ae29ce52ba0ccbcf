#![allow(dead_code)]

use inspiro::Config;
use serde_json::{json, Value};
use wiremock::MockServer;

pub const API_PATH: &str = "/w/api.php";

pub fn config_for(server: &MockServer) -> Config {
    Config {
        endpoint: format!("{}{}", server.uri(), API_PATH),
        sources: vec!["Renaissance_paintings".to_string()],
        max_attempts: 3,
        seed: Some(42),
        ..Config::default()
    }
}

pub fn painting_page(url: &str, title: &str, size: (u64, u64)) -> Value {
    json!({
        "title": format!("File:{title}.jpg"),
        "imageinfo": [{
            "url": url,
            "mime": "image/jpeg",
            "width": size.0,
            "height": size.1,
            "extmetadata": {
                "ObjectName": { "value": title },
                "Artist": { "value": "<a href=\"//www.wikidata.org/wiki/Q5598\">Rembrandt</a> (1606–1669)" },
                "DateTimeOriginal": { "value": "circa 1642" },
            }
        }]
    })
}

pub fn catalog(pages: Vec<Value>) -> Value {
    let pages: serde_json::Map<String, Value> = pages
        .into_iter()
        .enumerate()
        .map(|(i, page)| ((i + 1).to_string(), page))
        .collect();
    json!({ "batchcomplete": "", "query": { "pages": pages } })
}

/// Eight distinct paintings hosted on `server`.
pub fn gallery(server: &MockServer) -> Value {
    catalog(
        (1..=8)
            .map(|n| {
                painting_page(
                    &format!("{}/images/painting_{n}.jpg", server.uri()),
                    &format!("Painting {n}"),
                    (n * 100, n * 100),
                )
            })
            .collect(),
    )
}
