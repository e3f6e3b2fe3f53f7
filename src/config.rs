use std::sync::LazyLock;
use std::time::Duration;

use anyhow::Context as _;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://wol.jw.org";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

static DEFAULT_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse(DEFAULT_BASE_URL).expect("valid default base url"));

/// Where and how to reach the online library.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE.clone(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("apostila-extractor/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl SourceConfig {
    /// Defaults overridden by `APOSTILA_BASE_URL` / `APOSTILA_TIMEOUT_SECS`.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var("APOSTILA_BASE_URL") {
            config = config.with_base_url(&raw)?;
        }
        if let Ok(raw) = std::env::var("APOSTILA_TIMEOUT_SECS") {
            let secs: u64 = raw.parse().context("parse APOSTILA_TIMEOUT_SECS")?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, raw: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(raw).with_context(|| format!("parse base url: {raw}"))?;
        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            anyhow::bail!("base url must be http/https: {base_url}");
        }
        self.base_url = base_url;
        Ok(self)
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }
}
