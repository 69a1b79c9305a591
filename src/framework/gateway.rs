//! # HTTP Gateway
//!
//! Translates the five logical operations (list, get, create, update /
//! partial update, delete) into REST calls against a collection resource.
//!
//! The network sits behind the [`Transport`] trait so gateway behavior can be
//! tested without a server; [`HttpTransport`] is the `reqwest`-backed
//! implementation used in production.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::framework::core::RestEntity;
use crate::framework::error::ClientError;

// =============================================================================
// 1. QUERY PARAMETERS
// =============================================================================

/// Advisory paging/sorting parameters for list requests.
///
/// The gateway forwards them verbatim; whether the server honors them is the
/// server's business.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

// =============================================================================
// 2. THE TRANSPORT SEAM
// =============================================================================

/// Minimal HTTP abstraction the gateway is written against.
///
/// Implementations map transport and status failures into [`ClientError`];
/// the gateway itself only deals in JSON payloads. An empty response body
/// (e.g. from DELETE) comes back as [`Value::Null`].
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<Value>,
    ) -> Result<Value, ClientError>;
}

/// Production transport backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a pre-configured client (custom timeouts, proxies, ...).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(server_message(status, &text)));
        }
        if !status.is_success() {
            return Err(ClientError::HttpStatus {
                status: status.as_u16(),
                message: server_message(status, &text),
            });
        }

        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// Pulls a human-readable message out of an error response.
///
/// The server answers failures with problem-JSON (`detail`/`title` fields);
/// anything else falls back to the status line.
fn server_message(status: StatusCode, body: &str) -> String {
    if let Ok(Value::Object(problem)) = serde_json::from_str::<Value>(body) {
        for key in ["detail", "title", "message"] {
            if let Some(Value::String(text)) = problem.get(key) {
                if !text.is_empty() {
                    return text.clone();
                }
            }
        }
    }
    status.to_string()
}

// =============================================================================
// 3. REQUEST-BODY CLEANING
// =============================================================================

/// Prepares an entity for transmission.
///
/// Each declared relation field is flattened to an `{ "id": ... }` stub when
/// it is a nested object carrying an id, and removed otherwise (null,
/// id-less, or a child collection). Unset optional fields are already omitted
/// by the entity's serde derives.
pub fn clean_body<T: RestEntity>(entity: &T) -> Result<Value, ClientError> {
    let mut body = serde_json::to_value(entity).map_err(|e| ClientError::Decode(e.to_string()))?;
    if let Value::Object(fields) = &mut body {
        for name in T::relation_fields() {
            let stub = match fields.get(*name) {
                Some(Value::Object(nested)) => match nested.get("id") {
                    Some(id) if !id.is_null() => Some(serde_json::json!({ "id": id })),
                    _ => None,
                },
                _ => None,
            };
            match stub {
                Some(stub) => {
                    fields.insert((*name).to_string(), stub);
                }
                None => {
                    fields.remove(*name);
                }
            }
        }
    }
    Ok(body)
}

// =============================================================================
// 4. THE GENERIC GATEWAY
// =============================================================================

/// Thin HTTP-backed adapter mapping the five operations onto REST calls
/// against `{api_root}/{RESOURCE}`.
///
/// Failures propagate as [`ClientError`]; the gateway does not retry and
/// treats every failure as terminal for that call.
#[derive(Clone)]
pub struct EntityGateway<T: RestEntity> {
    transport: Arc<dyn Transport>,
    api_root: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T: RestEntity> EntityGateway<T> {
    pub fn new(transport: Arc<dyn Transport>, api_root: impl Into<String>) -> Self {
        Self {
            transport,
            api_root: api_root.into().trim_end_matches('/').to_string(),
            _entity: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.api_root, T::RESOURCE)
    }

    fn resource_url(&self, id: &T::Id) -> String {
        format!("{}/{}/{}", self.api_root, T::RESOURCE, id)
    }

    fn list_url(&self, query: &ListQuery) -> String {
        let mut params = Vec::new();
        if let Some(page) = query.page {
            params.push(format!("page={page}"));
        }
        if let Some(size) = query.size {
            params.push(format!("size={size}"));
        }
        if let Some(sort) = &query.sort {
            params.push(format!("sort={sort}"));
        }
        // Cache-defeating marker so intermediate caches never serve a stale
        // collection.
        params.push(format!("cacheBuster={}", Utc::now().timestamp_millis()));
        format!("{}?{}", self.collection_url(), params.join("&"))
    }

    /// Fetches the full collection, in server-provided order.
    #[instrument(skip_all, fields(resource = T::RESOURCE))]
    pub async fn list(&self, query: &ListQuery) -> Result<Vec<T>, ClientError> {
        let url = self.list_url(query);
        debug!(url, "GET collection");
        let payload = self.transport.execute(Method::GET, &url, None).await?;
        decode(payload)
    }

    /// Fetches a single entity by id.
    #[instrument(skip_all, fields(resource = T::RESOURCE, %id))]
    pub async fn get(&self, id: &T::Id) -> Result<T, ClientError> {
        let url = self.resource_url(id);
        debug!(url, "GET entity");
        let payload = self.transport.execute(Method::GET, &url, None).await?;
        decode(payload)
    }

    /// Submits a new entity; the server assigns the id.
    #[instrument(skip_all, fields(resource = T::RESOURCE))]
    pub async fn create(&self, entity: &T) -> Result<T, ClientError> {
        let body = clean_body(entity)?;
        let url = self.collection_url();
        debug!(url, "POST entity");
        let payload = self
            .transport
            .execute(Method::POST, &url, Some(body))
            .await?;
        decode(payload)
    }

    /// Full replace of an existing entity.
    #[instrument(skip_all, fields(resource = T::RESOURCE))]
    pub async fn update(&self, entity: &T) -> Result<T, ClientError> {
        let id = entity.id().ok_or(ClientError::Validation { field: "id" })?;
        let body = clean_body(entity)?;
        let url = self.resource_url(&id);
        debug!(url, "PUT entity");
        let payload = self
            .transport
            .execute(Method::PUT, &url, Some(body))
            .await?;
        decode(payload)
    }

    /// Partial replace: only the supplied fields change.
    #[instrument(skip_all, fields(resource = T::RESOURCE))]
    pub async fn partial_update(&self, entity: &T) -> Result<T, ClientError> {
        let id = entity.id().ok_or(ClientError::Validation { field: "id" })?;
        let body = clean_body(entity)?;
        let url = self.resource_url(&id);
        debug!(url, "PATCH entity");
        let payload = self
            .transport
            .execute(Method::PATCH, &url, Some(body))
            .await?;
        decode(payload)
    }

    /// Removes an entity by id.
    #[instrument(skip_all, fields(resource = T::RESOURCE, %id))]
    pub async fn delete(&self, id: &T::Id) -> Result<(), ClientError> {
        let url = self.resource_url(id);
        debug!(url, "DELETE entity");
        self.transport.execute(Method::DELETE, &url, None).await?;
        Ok(())
    }
}

fn decode<R: DeserializeOwned>(payload: Value) -> Result<R, ClientError> {
    serde_json::from_value(payload).map_err(|e| ClientError::Decode(e.to_string()))
}

// =============================================================================
// 5. TESTS
// =============================================================================
