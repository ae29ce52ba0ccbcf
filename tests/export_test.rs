mod common;

use common::{catalog, config_for, painting_page, API_PATH};
use inspiro::{BrowsingSession, FetchError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const IMAGE_BYTES: &[u8] = b"\xFF\xD8\xFFfake-jpeg-body";

async fn session_with_image(
    server: &MockServer,
    image_path: &str,
    save_dir: &std::path::Path,
) -> BrowsingSession {
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog(vec![painting_page(
            &format!("{}{}", server.uri(), image_path),
            "Girl with a Pearl Earring",
            (800, 1000),
        )])))
        .mount(server)
        .await;

    let mut config = config_for(server);
    config.save_dir = save_dir.to_path_buf();
    BrowsingSession::new(&config).unwrap()
}

#[tokio::test]
async fn saves_current_image_to_disk() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/images/pearl.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(IMAGE_BYTES))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let save_dir = dir.path().join("saved");
    let mut session = session_with_image(&server, "/images/pearl.png", &save_dir).await;
    session.step_forward().await.unwrap();

    let path = session.save_current().await.unwrap().unwrap();
    assert_eq!(path, save_dir.join("inspiro_painting.png"));
    assert_eq!(std::fs::read(&path).unwrap(), IMAGE_BYTES);
}

#[tokio::test]
async fn nothing_to_save_before_first_fetch() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let session = session_with_image(&server, "/images/pearl.jpg", dir.path()).await;

    assert!(session.save_current().await.unwrap().is_none());
}

#[tokio::test]
async fn missing_image_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/images/gone.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut session = session_with_image(&server, "/images/gone.jpg", dir.path()).await;
    session.step_forward().await.unwrap();

    let err = session.save_current().await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 404, .. }), "{err}");
    assert!(!dir.path().join("inspiro_painting.jpg").exists());
}
