//! HTTP execution of record-store specifications.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::query::{Insert, Query, Update};

/// Record-store failures.
#[derive(Debug, Error)]
pub enum DataStoreError {
    /// Non-success response; the remote body is preserved for the caller.
    #[error("record store returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("record store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode record: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for the remote record store's generic data API.
///
/// One spec, one request, one response. Callers handle absence and emptiness;
/// the client only distinguishes success from failure.
#[derive(Debug, Clone)]
pub struct DataStoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl DataStoreClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// Execute a read, returning all matched rows as raw JSON.
    pub async fn fetch(&self, query: &Query) -> Result<Vec<Value>, DataStoreError> {
        let url = format!("{}/data/{}", self.base_url, query.table_name());
        let rows = self.post(&url, query.payload()).await?;
        Ok(serde_json::from_value(rows)?)
    }

    /// Execute a read, deserializing each row into `T`.
    pub async fn fetch_as<T: DeserializeOwned>(
        &self,
        query: &Query,
    ) -> Result<Vec<T>, DataStoreError> {
        self.fetch(query)
            .await?
            .into_iter()
            .map(|row| serde_json::from_value(row).map_err(DataStoreError::from))
            .collect()
    }

    /// Execute a read and return the first row, if any.
    pub async fn first(&self, query: &Query) -> Result<Option<Value>, DataStoreError> {
        Ok(self.fetch(query).await?.into_iter().next())
    }

    /// Execute a read and return the first row deserialized into `T`, if any.
    pub async fn first_as<T: DeserializeOwned>(
        &self,
        query: &Query,
    ) -> Result<Option<T>, DataStoreError> {
        match self.first(query).await? {
            Some(row) => Ok(Some(serde_json::from_value(row)?)),
            None => Ok(None),
        }
    }

    /// Execute a scoped update.
    pub async fn update(&self, update: &Update) -> Result<(), DataStoreError> {
        let url = format!("{}/data/{}/update", self.base_url, update.table_name());
        self.post(&url, update.payload()).await?;
        Ok(())
    }

    /// Insert a single record.
    pub async fn insert(&self, insert: &Insert) -> Result<(), DataStoreError> {
        let url = format!("{}/data/{}/insert", self.base_url, insert.table_name());
        self.post(&url, insert.payload()).await?;
        Ok(())
    }

    async fn post(&self, url: &str, payload: Value) -> Result<Value, DataStoreError> {
        let response = self.http.post(url).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DataStoreError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        extract::Path,
        http::StatusCode,
        routing::post,
    };
    use serde::Deserialize;
    use serde_json::json;

    async fn spawn_store() -> String {
        let app = Router::new()
            .route(
                "/data/:table",
                post(|Path(table): Path<String>, Json(payload): Json<Value>| async move {
                    if table == "missing" {
                        return (StatusCode::BAD_REQUEST, "no such table".to_string());
                    }
                    // Echo back a canned row set so tests can assert decoding.
                    let rows = json!([
                        {"id": 1, "title": "Checkup", "query": payload},
                        {"id": 2, "title": "Follow-up", "query": payload},
                    ]);
                    (StatusCode::OK, rows.to_string())
                }),
            )
            .route(
                "/data/:table/update",
                post(|| async { (StatusCode::OK, "[]".to_string()) }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[derive(Debug, Deserialize)]
    struct Row {
        id: i64,
        title: String,
    }

    #[tokio::test]
    async fn fetch_as_decodes_rows() {
        let base = spawn_store().await;
        let client = DataStoreClient::new(reqwest::Client::new(), base);

        let rows: Vec<Row> = client
            .fetch_as(&Query::table("appointments").eq("id", 1))
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[1].title, "Follow-up");
    }

    #[tokio::test]
    async fn first_returns_leading_row() {
        let base = spawn_store().await;
        let client = DataStoreClient::new(reqwest::Client::new(), base);

        let row: Option<Row> = client
            .first_as(&Query::table("appointments"))
            .await
            .unwrap();
        assert_eq!(row.unwrap().id, 1);
    }

    #[tokio::test]
    async fn update_executes_against_update_endpoint() {
        let base = spawn_store().await;
        let client = DataStoreClient::new(reqwest::Client::new(), base);

        let update = Update::table("appointments", json!({"billingStatus": "billed"})).eq("id", 1);
        client.update(&update).await.unwrap();
    }

    #[tokio::test]
    async fn non_success_carries_remote_body() {
        let base = spawn_store().await;
        let client = DataStoreClient::new(reqwest::Client::new(), base);

        let err = client.fetch(&Query::table("missing")).await.unwrap_err();
        match err {
            DataStoreError::Api { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, "no such table");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
