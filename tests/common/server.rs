//! Mock crawl archive: index and data host on one wiremock server

use super::fixtures::SNAPSHOT;
use crawl_sampler::Config;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Config pointing both endpoints at `server`, platform trust store
pub fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.crawl.index_base_url = server.uri();
    config.crawl.data_base_url = server.uri();
    config.client.certificate_dir = None;
    config
}

/// Serve `lines` as the index response
pub async fn mount_index(server: &MockServer, lines: &[String]) {
    Mock::given(method("GET"))
        .and(path(format!("/{}-index", SNAPSHOT)))
        .respond_with(ResponseTemplate::new(200).set_body_string(lines.join("\n")))
        .mount(server)
        .await;
}

/// Serve `body` with 206 for the exact range `start-end` of `file_name`
pub async fn mount_capture(server: &MockServer, file_name: &str, start: u64, end: u64, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", file_name)))
        .and(header("range", format!("bytes={}-{}", start, end).as_str()))
        .respond_with(ResponseTemplate::new(206).set_body_bytes(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Answer `file_name` with a bare status code
pub async fn mount_status(server: &MockServer, file_name: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", file_name)))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}
