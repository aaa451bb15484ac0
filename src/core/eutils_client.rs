use crate::config::EutilsSettings;
use crate::core::clock::SystemClock;
use crate::core::esearch::parse_gene_ids;
use crate::core::rate_limiter::RateLimiter;
use crate::domain::model::{GeneIdList, GeneQuery};
use crate::domain::ports::{Clock, GeneLookup};
use crate::utils::error::{GeneIdError, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

pub const DEFAULT_ESEARCH_ENDPOINT: &str =
    "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";
pub const DEFAULT_DATABASE: &str = "gene";

/// Gene symbol → gene ID lookups against NCBI esearch.
///
/// Every request goes through the client's own [`RateLimiter`].
pub struct EutilsClient<C: Clock = SystemClock> {
    client: Client,
    endpoint: Url,
    database: String,
    api_key: Option<String>,
    limiter: RateLimiter<C>,
}

impl EutilsClient<SystemClock> {
    pub fn new(settings: &EutilsSettings) -> Result<Self> {
        Self::with_limiter(settings, RateLimiter::new(settings.min_interval()))
    }
}

impl<C: Clock> EutilsClient<C> {
    pub fn with_limiter(settings: &EutilsSettings, limiter: RateLimiter<C>) -> Result<Self> {
        let endpoint =
            Url::parse(&settings.endpoint).map_err(|e| GeneIdError::InvalidConfigValueError {
                field: "eutils.endpoint".to_string(),
                value: settings.endpoint.clone(),
                reason: format!("Invalid URL format: {}", e),
            })?;

        Ok(Self {
            client: Client::new(),
            endpoint,
            database: settings.database.clone(),
            api_key: settings.api_key.clone(),
            limiter,
        })
    }

    pub fn limiter(&self) -> &RateLimiter<C> {
        &self.limiter
    }

    /// `<endpoint>?db=gene&term=<symbol>[symbol] AND <organism>[organism]`
    pub fn esearch_url(&self, query: &GeneQuery) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("db", &self.database)
                .append_pair("term", &query.term());
            if let Some(api_key) = &self.api_key {
                pairs.append_pair("api_key", api_key);
            }
        }
        url
    }
}

async fn fetch_gene_ids(client: Client, url: Url, query: &GeneQuery) -> Result<GeneIdList> {
    let response = client.get(url).send().await?;
    let status = response.status();
    tracing::debug!("esearch response status for {}: {}", query, status);

    if status.is_client_error() || status.is_server_error() {
        return Err(GeneIdError::InvalidQuery {
            organism: query.organism.clone(),
            gene_symbol: query.gene_symbol.clone(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    parse_gene_ids(&body)
}

#[async_trait]
impl<C: Clock> GeneLookup for EutilsClient<C> {
    async fn gene_ids(&mut self, query: &GeneQuery) -> Result<GeneIdList> {
        let url = self.esearch_url(query);
        tracing::debug!("Making esearch request for {}", query);

        let client = self.client.clone();
        self.limiter
            .call(|| fetch_gene_ids(client, url, query))
            .await
    }
}
