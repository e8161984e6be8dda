//! Supabase adapter: the `user_activity` table over the PostgREST HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;

use tally_core::{domain::ActivityRecord, errors::Error, ports::TableStore, Result};

const DEFAULT_PAGE_SIZE: usize = 1000;
const SELECT_COLUMNS: &str = "user_id,count";

#[derive(Clone, Debug)]
pub struct SupabaseStore {
    base_url: String,
    api_key: String,
    table: String,
    page_size: usize,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct CountPatch {
    count: u64,
}

impl SupabaseStore {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        table: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("tally/0.1")
            .build()
            .map_err(|e| Error::Config(format!("http client build failed: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            table: table.into(),
            page_size: DEFAULT_PAGE_SIZE,
            http,
        })
    }

    /// Rows requested per `fetch_all` page. PostgREST may return fewer.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.http
            .request(method, self.table_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn send(&self, op: &'static str, req: RequestBuilder) -> Result<Response> {
        let resp = req.send().await.map_err(|e| Error::store(op, e))?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::store(
                op,
                format!(
                    "HTTP {status}: {}",
                    body.chars().take(200).collect::<String>()
                ),
            ));
        }
        Ok(resp)
    }

    async fn rows(&self, op: &'static str, req: RequestBuilder) -> Result<Vec<ActivityRecord>> {
        let resp = self.send(op, req).await?;
        resp.json::<Vec<ActivityRecord>>()
            .await
            .map_err(|e| Error::store(op, format!("malformed response: {e}")))
    }
}

#[async_trait]
impl TableStore for SupabaseStore {
    async fn fetch(&self, user_id: &str) -> Result<Option<ActivityRecord>> {
        let req = self.request(Method::GET).query(&[
            ("select", SELECT_COLUMNS.to_string()),
            ("user_id", format!("eq.{user_id}")),
        ]);
        let rows = self.rows("fetch", req).await?;
        Ok(rows.into_iter().next())
    }

    async fn fetch_all(&self) -> Result<Vec<ActivityRecord>> {
        let mut out = Vec::new();
        let mut offset = 0usize;
        loop {
            let req = self.request(Method::GET).query(&[
                ("select", SELECT_COLUMNS.to_string()),
                ("order", "user_id.asc".to_string()),
                ("limit", self.page_size.to_string()),
                ("offset", offset.to_string()),
            ]);
            // The server's max-rows cap may return fewer rows than asked for,
            // so only an empty page marks the end of the table.
            let page = self.rows("fetch_all", req).await?;
            if page.is_empty() {
                break;
            }
            offset += page.len();
            out.extend(page);
        }
        tracing::debug!(rows = out.len(), table = %self.table, "fetched activity table");
        Ok(out)
    }

    async fn insert(&self, record: &ActivityRecord) -> Result<()> {
        let req = self
            .request(Method::POST)
            .header("Prefer", "return=minimal")
            .json(record);
        self.send("insert", req).await?;
        Ok(())
    }

    async fn update_count(&self, user_id: &str, count: u64) -> Result<()> {
        let req = self
            .request(Method::PATCH)
            .query(&[("user_id", format!("eq.{user_id}"))])
            .header("Prefer", "return=minimal")
            .json(&CountPatch { count });
        self.send("update", req).await?;
        Ok(())
    }
}
