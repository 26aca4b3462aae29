//! PostgREST backend for the remote store.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;

use super::{Query, RemoteStore, StoreError, StoreResponse, StoreResult};

/// Error body PostgREST returns on non-2xx responses
#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    message: Option<String>,
    code: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

impl PostgrestErrorBody {
    fn into_message(self) -> String {
        let mut message = self.message.unwrap_or_else(|| "Unknown error".to_string());
        if let Some(details) = self.details.filter(|d| !d.is_empty()) {
            message.push_str(&format!(" ({})", details));
        }
        if let Some(hint) = self.hint.filter(|h| !h.is_empty()) {
            message.push_str(&format!(" Hint: {}", hint));
        }
        message
    }
}

/// Remote store client talking to `{base_url}/rest/v1`.
#[derive(Clone)]
pub struct PostgrestStore {
    client: Client,
    rest_url: String,
    service_key: String,
}

impl PostgrestStore {
    pub fn new(base_url: &str, service_key: String) -> StoreResult<Self> {
        if service_key.is_empty() {
            return Err(StoreError::ConfigError(
                "service key must not be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| StoreError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            rest_url: format!("{}/rest/v1", base_url.trim_end_matches('/')),
            service_key,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url, table)
    }

    fn request(&self, method: Method, table: &str, query: &Query) -> RequestBuilder {
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .query(&query.to_pairs())
    }

    async fn execute(&self, request: RequestBuilder) -> StoreResult<StoreResponse> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !status.is_success() {
            let (message, code) = match serde_json::from_str::<PostgrestErrorBody>(&body) {
                Ok(error) => {
                    let code = error.code.clone();
                    (error.into_message(), code)
                }
                Err(_) if body.is_empty() => (status.to_string(), None),
                Err(_) => (body, None),
            };
            tracing::debug!(status = status.as_u16(), code = ?code, "Remote store rejected request");
            return Err(StoreError::Remote {
                status: status.as_u16(),
                message,
                code,
            });
        }

        let rows = if body.trim().is_empty() {
            Vec::new()
        } else {
            match serde_json::from_str::<Value>(&body)
                .map_err(|e| StoreError::Decode(e.to_string()))?
            {
                Value::Array(rows) => rows,
                Value::Null => Vec::new(),
                row => vec![row],
            }
        };

        Ok(StoreResponse {
            status: status.as_u16(),
            rows,
        })
    }
}

#[async_trait]
impl RemoteStore for PostgrestStore {
    async fn select(&self, table: &str, query: &Query) -> StoreResult<StoreResponse> {
        self.execute(self.request(Method::GET, table, query)).await
    }

    async fn insert(&self, table: &str, rows: Value) -> StoreResult<StoreResponse> {
        let request = self
            .request(Method::POST, table, &Query::new())
            .header("Prefer", "return=representation")
            .json(&rows);
        self.execute(request).await
    }

    async fn update(
        &self,
        table: &str,
        query: &Query,
        changes: Value,
    ) -> StoreResult<StoreResponse> {
        let request = self
            .request(Method::PATCH, table, query)
            .header("Prefer", "return=representation")
            .json(&changes);
        self.execute(request).await
    }

    async fn delete(&self, table: &str, query: &Query) -> StoreResult<StoreResponse> {
        let request = self
            .request(Method::DELETE, table, query)
            .header("Prefer", "return=representation");
        self.execute(request).await
    }

    async fn ping(&self) -> StoreResult<()> {
        let response = self
            .client
            .get(format!("{}/", self.rest_url))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(StoreError::Remote {
                status: response.status().as_u16(),
                message: format!("health probe returned {}", response.status()),
                code: None,
            })
        }
    }

    fn backend_name(&self) -> &'static str {
        "postgrest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_service_key() {
        assert!(PostgrestStore::new("https://example.supabase.co", String::new()).is_err());
    }

    #[test]
    fn test_table_url_trims_trailing_slash() {
        let store =
            PostgrestStore::new("https://example.supabase.co/", "key".to_string()).unwrap();
        assert_eq!(
            store.table_url("listings"),
            "https://example.supabase.co/rest/v1/listings"
        );
    }

    #[test]
    fn test_error_body_message_includes_details() {
        let body: PostgrestErrorBody = serde_json::from_str(
            r#"{"message":"insert or update on table \"saves\" violates foreign key constraint","code":"23503","details":"Key is not present in table \"listings\".","hint":null}"#,
        )
        .unwrap();
        assert_eq!(
            body.into_message(),
            "insert or update on table \"saves\" violates foreign key constraint (Key is not present in table \"listings\".)"
        );
    }
}
