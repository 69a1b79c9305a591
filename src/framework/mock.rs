//! # Mock Transport
//!
//! Utilities for testing gateways and clients without a server.
//!
//! Queue responses with [`MockTransport::enqueue_ok`] / [`enqueue_err`],
//! run the code under test, then inspect [`requests`](MockTransport::requests)
//! and call [`verify`](MockTransport::verify) to assert every queued response
//! was consumed.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::framework::error::ClientError;
use crate::framework::gateway::Transport;

/// One request as the mock saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
}

/// A [`Transport`] that replays a queue of canned responses.
///
/// # Testing Strategy
/// The only side-effecting seam in this crate is the transport, so mocking it
/// lets every layer above — gateway, resource dispatcher, typed clients, the
/// whole [`AdminSystem`](crate::lifecycle::AdminSystem) — run deterministically
/// in tests. Responses are served strictly in FIFO order; an unexpected
/// request (empty queue) panics, which is what a test wants.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<Value, ClientError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queues a successful JSON response.
    pub fn enqueue_ok(&self, payload: Value) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(payload));
    }

    /// Queues a failure.
    pub fn enqueue_err(&self, error: ClientError) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(error));
    }

    /// Everything the code under test has sent so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Panics if any queued response was never consumed.
    pub fn verify(&self) {
        let remaining = self.responses.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all queued responses were consumed. {remaining} remaining");
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.clone(),
            url: url.to_string(),
            body,
        });
        match self.responses.lock().unwrap().pop_front() {
            Some(response) => response,
            None => panic!("Unexpected request: {method} {url} (no response queued)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn replays_responses_in_fifo_order_and_records_requests() {
        let transport = MockTransport::new();
        transport.enqueue_ok(json!({ "id": 1 }));
        transport.enqueue_err(ClientError::NotFound("gone".into()));

        let first = transport
            .execute(Method::GET, "http://test/api/stocks/1", None)
            .await;
        assert_eq!(first, Ok(json!({ "id": 1 })));

        let second = transport
            .execute(Method::DELETE, "http://test/api/stocks/2", None)
            .await;
        assert_eq!(second, Err(ClientError::NotFound("gone".into())));

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].method, Method::DELETE);
        transport.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Not all queued responses were consumed")]
    async fn verify_panics_on_unconsumed_responses() {
        let transport = MockTransport::new();
        transport.enqueue_ok(json!([]));
        transport.verify();
    }
}
