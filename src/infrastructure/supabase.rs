//! Supabase REST client for reading analysis tables

use crate::error::{AnalysisError, Result};
use crate::infrastructure::ConfigStore;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

pub const SUPABASE_URL_VAR: &str = "NEXT_PUBLIC_SUPABASE_URL";
pub const SUPABASE_KEY_VAR: &str = "NEXT_PUBLIC_SUPABASE_ANON_KEY";

/// Table with a dedicated row model
pub const TEXT_LOGS_TABLE: &str = "text_logs";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A "newest rows first" query against one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowQuery {
    pub table: String,
    pub order_by: String,
    pub descending: bool,
    pub limit: usize,
}

impl Default for RowQuery {
    fn default() -> Self {
        RowQuery {
            table: TEXT_LOGS_TABLE.to_string(),
            order_by: "created_at".to_string(),
            descending: true,
            limit: 100,
        }
    }
}

impl RowQuery {
    pub fn table(table: impl Into<String>) -> Self {
        RowQuery {
            table: table.into(),
            ..RowQuery::default()
        }
    }

    pub fn order_by(mut self, column: impl Into<String>) -> Self {
        self.order_by = column.into();
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// PostgREST query parameters for this query
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let direction = if self.descending { "desc" } else { "asc" };
        vec![
            ("select", "*".to_string()),
            ("order", format!("{}.{}", self.order_by, direction)),
            ("limit", self.limit.to_string()),
        ]
    }
}

/// Thin client over the PostgREST endpoint of a Supabase project
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SupabaseClient {
    pub fn new(url: &str, api_key: &str) -> Result<Self> {
        let base_url = url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(AnalysisError::InvalidUrl(url.to_string()));
        }
        if api_key.is_empty() {
            return Err(AnalysisError::Config(format!("{} is empty", SUPABASE_KEY_VAR)));
        }

        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(SupabaseClient {
            http,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Build a client from `NEXT_PUBLIC_SUPABASE_URL` and
    /// `NEXT_PUBLIC_SUPABASE_ANON_KEY`
    pub fn from_config(store: &mut ConfigStore) -> Result<Self> {
        let url = store.get(SUPABASE_URL_VAR, None)?;
        let key = store.get(SUPABASE_KEY_VAR, None)?;
        let client = Self::new(&url, &key)?;
        info!(url = %client.base_url, "connected to Supabase");
        Ok(client)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run `query` and deserialize every returned row
    pub async fn fetch_rows<T: DeserializeOwned>(&self, query: &RowQuery) -> Result<Vec<T>> {
        let url = format!("{}/rest/v1/{}", self.base_url, query.table);
        debug!(%url, limit = query.limit, "querying table");

        let response = self
            .http
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .query(&query.params())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Database {
                status: status.as_u16(),
                body,
            });
        }

        let rows: Vec<T> = response.json().await?;
        debug!(rows = rows.len(), table = %query.table, "query finished");
        Ok(rows)
    }
}
