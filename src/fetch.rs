use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode, redirect};
use url::Url;

use crate::config::SourceConfig;
use crate::error::{ExtractError, ExtractResult};

/// Outcome of fetching one candidate page. A not-yet-published week page
/// answers 404 (or 410 once retired); both mean "try the fallback", not
/// "fail".
#[derive(Debug)]
pub enum FetchOutcome {
    Success(String),
    NotFound,
}

/// Thin wrapper over the shared HTTP client with the source-site base URL
/// baked in.
pub struct PageClient {
    client: Client,
    base_url: Url,
    user_agent: String,
}

impl PageClient {
    pub fn new(config: &SourceConfig) -> ExtractResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(redirect::Policy::limited(10))
            .build()
            .map_err(|err| ExtractError::transport(&config.base_url, &err))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            user_agent: config.user_agent.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Weekly content document for a numeric page identifier.
    pub async fn fetch_week_page(&self, id: i64) -> ExtractResult<FetchOutcome> {
        let url = self.week_url(id)?;
        self.get(url).await
    }

    /// Schedule index listing every publication for one ISO week.
    pub async fn fetch_index_page(&self, iso_year: i32, iso_week: u32) -> ExtractResult<FetchOutcome> {
        let url = self.index_url(iso_year, iso_week)?;
        self.get(url).await
    }

    pub fn week_url(&self, id: i64) -> ExtractResult<Url> {
        self.join(&format!("pt/wol/d/r5/lp-t/{id}"))
    }

    pub fn index_url(&self, iso_year: i32, iso_week: u32) -> ExtractResult<Url> {
        self.join(&format!("pt/wol/meetings/r5/lp-t/{iso_year}/{iso_week}"))
    }

    fn join(&self, path: &str) -> ExtractResult<Url> {
        self.base_url
            .join(path)
            .map_err(|err| ExtractError::Transport {
                url: format!("{}{path}", self.base_url),
                reason: err.to_string(),
            })
    }

    async fn get(&self, url: Url) -> ExtractResult<FetchOutcome> {
        tracing::debug!(%url, "fetching page");
        let response = self
            .client
            .get(url.clone())
            .header(USER_AGENT, self.user_agent.as_str())
            .header(ACCEPT, "text/html")
            .send()
            .await
            .map_err(|err| ExtractError::transport(&url, &err))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            tracing::debug!(%url, %status, "page not published");
            return Ok(FetchOutcome::NotFound);
        }
        if !status.is_success() {
            return Err(ExtractError::Transport {
                url: url.to_string(),
                reason: format!("unexpected status {status}"),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| ExtractError::transport(&url, &err))?;
        if body.trim().is_empty() {
            return Err(ExtractError::EmptyDocument {
                url: url.to_string(),
            });
        }
        Ok(FetchOutcome::Success(body))
    }
}
