//! Hosted todo table behind a PostgREST-style API (Supabase and friends).

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::json;

use super::Store;
use crate::todo::{Todo, TodoPatch};

/// REST-backed store. Every request carries the access key both as `apikey`
/// and as a bearer token, which is what PostgREST gateways expect.
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl RestStore {
    pub fn new(base_url: &str, api_key: &str, table: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            table: table.to_string(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("apikey", &self.api_key)
            .header("authorization", format!("Bearer {}", self.api_key))
    }

    fn by_id(&self, id: i64) -> String {
        format!("{}?id=eq.{}", self.table_url(), id)
    }

    async fn rows(resp: Response, what: &str) -> Result<Vec<Todo>> {
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            bail!("{what} failed ({status}): {text}");
        }
        resp.json::<Vec<Todo>>()
            .await
            .with_context(|| format!("{what}: unexpected response body"))
    }
}

#[async_trait]
impl Store for RestStore {
    async fn insert(&self, task: &str) -> Result<Todo> {
        let resp = self
            .authed(self.client.post(self.table_url()))
            .header("prefer", "return=representation")
            .json(&json!({ "task": task }))
            .send()
            .await
            .context("insert request failed")?;
        Self::rows(resp, "insert")
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("insert returned no rows"))
    }

    async fn list(&self) -> Result<Vec<Todo>> {
        let resp = self
            .authed(self.client.get(format!("{}?select=*", self.table_url())))
            .send()
            .await
            .context("list request failed")?;
        Self::rows(resp, "list").await
    }

    async fn update(&self, id: i64, patch: &TodoPatch) -> Result<Vec<Todo>> {
        // PostgREST rejects an empty PATCH body; read the row back instead.
        let req = if patch.is_empty() {
            self.client.get(format!("{}&select=*", self.by_id(id)))
        } else {
            self.client
                .patch(self.by_id(id))
                .header("prefer", "return=representation")
                .json(patch)
        };
        let resp = self
            .authed(req)
            .send()
            .await
            .with_context(|| format!("update request for todo {id} failed"))?;
        Self::rows(resp, "update").await
    }

    async fn delete(&self, id: i64) -> Result<Vec<Todo>> {
        let resp = self
            .authed(self.client.delete(self.by_id(id)))
            .header("prefer", "return=representation")
            .send()
            .await
            .with_context(|| format!("delete request for todo {id} failed"))?;
        Self::rows(resp, "delete").await
    }

    fn describe(&self) -> String {
        format!("rest ({}/{})", self.base_url, self.table)
    }
}
