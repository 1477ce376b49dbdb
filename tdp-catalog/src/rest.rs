//! Catalog source backed by the hosted PostgREST-style database API.

use async_trait::async_trait;
use log::{info, warn};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::entry::{entries_from_rows, ComponentCatalogEntry, GpuRow, PartRow};
use crate::error::{CatalogError, Result};
use crate::source::CatalogSource;

const PARTS_TABLE: &str = "parts";
const GPUS_TABLE: &str = "gpus";
const PARTS_SELECT: &str = "model_name,part_type,tdp";
const GPUS_SELECT: &str = "model_name,tdp,fp64_tf,tf32_pf,fp16_pf,fp8_pf,int8_pops,fp4_pf";

const MAX_TRIES: u32 = 3;
const INITIAL_BACKOFF_MILLIS: u64 = 1000;

/// Reads the `parts` and `gpus` collections over HTTP. Only GET requests are issued.
#[derive(Debug, Clone)]
pub struct RestCatalogSource {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestCatalogSource {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self::with_client(client, base_url, api_key))
    }

    pub fn with_client(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn table_url(&self, table: &str, select: &str) -> String {
        format!("{}/rest/v1/{}?select={}", self.base_url, table, select)
    }

    async fn try_fetch<R: DeserializeOwned>(&self, url: &str) -> Result<Vec<R>> {
        let response = self
            .client
            .get(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        if response.status() != StatusCode::OK {
            return Err(CatalogError::BadStatus(response.status().as_u16()));
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch all rows of a table, retrying transient failures with exponential backoff.
    ///
    /// Client errors and unparsable bodies are returned on the first attempt.
    async fn fetch_rows<R: DeserializeOwned>(&self, table: &str, select: &str) -> Result<Vec<R>> {
        let url = self.table_url(table, select);
        let mut sleep_millis = INITIAL_BACKOFF_MILLIS;
        let mut last_error = String::new();

        for attempt in 1..=MAX_TRIES {
            match self.try_fetch::<R>(&url).await {
                Ok(rows) => {
                    info!("Fetched {} rows from {}", rows.len(), table);
                    return Ok(rows);
                }
                Err(e) if !e.is_retryable() => {
                    warn!("Fetching {} failed: {}", table, e);
                    return Err(e);
                }
                Err(e) => {
                    warn!("Attempt {}/{}: fetching {} failed: {}", attempt, MAX_TRIES, table, e);
                    last_error = e.to_string();
                }
            }

            if attempt < MAX_TRIES {
                info!("Sleeping for {} milliseconds before retry for {}", sleep_millis, table);
                tokio::time::sleep(Duration::from_millis(sleep_millis)).await;
                sleep_millis *= 2;
            }
        }

        Err(CatalogError::Unreachable {
            attempts: MAX_TRIES,
            last_error,
        })
    }
}

#[async_trait(?Send)]
impl CatalogSource for RestCatalogSource {
    async fn fetch_common_parts(&self) -> Result<Vec<ComponentCatalogEntry>> {
        let rows: Vec<PartRow> = self.fetch_rows(PARTS_TABLE, PARTS_SELECT).await?;
        Ok(entries_from_rows(rows))
    }

    async fn fetch_gpus(&self) -> Result<Vec<ComponentCatalogEntry>> {
        let rows: Vec<GpuRow> = self.fetch_rows(GPUS_TABLE, GPUS_SELECT).await?;
        Ok(entries_from_rows(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_url_strips_trailing_slash() {
        let source = RestCatalogSource::with_client(Client::new(), "https://db.example.com/", "key");
        assert_eq!(
            source.table_url(PARTS_TABLE, PARTS_SELECT),
            "https://db.example.com/rest/v1/parts?select=model_name,part_type,tdp"
        );
    }
}
