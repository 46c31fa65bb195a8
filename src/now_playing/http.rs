//! HTTP source for the now-playing endpoint.

use reqwest::Url;
use reqwest::header::{ACCEPT, HeaderValue};
use tracing::trace;

use crate::now_playing::payload::Payload;
use crate::now_playing::{FetchError, NowPlayingSource};

pub const DEFAULT_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3030;
pub const API_PATH: &str = "/api/now";

pub struct HttpSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpSource {
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl NowPlayingSource for HttpSource {
    async fn fetch(&self) -> Result<Payload, FetchError> {
        let response = self
            .client
            .get(self.url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let body = response.bytes().await?;
        trace!(bytes = body.len(), "now-playing body received");
        Payload::from_slice(&body)
    }
}
