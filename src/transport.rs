use anyhow::Result;
use reqwest::Client;

/// Fetches the body of a GET request. The rate clients only ever need this.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get_text(&self, url: &str) -> Result<String>;
}

#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for HttpTransport {
    async fn get_text(&self, url: &str) -> Result<String> {
        log::debug!("GET {}", url);

        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            anyhow::bail!("Can't download {}: {}", url, resp.status());
        }

        let text = resp.text().await?;

        Ok(text)
    }
}
