use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::Endpoint;
use crate::error::FetchError;

/// Performs exactly one GET per call and hands back the decoded JSON body.
///
/// Implementations never retry and never cache. Network failures, non-2xx
/// statuses and undecodable bodies all come back as [`FetchError`].
#[async_trait(?Send)]
pub trait Fetcher {
    async fn fetch(&self, endpoint: Endpoint) -> Result<Value, FetchError>;
}

/// Decodes a raw response body as JSON
pub fn decode_body(body: &[u8]) -> Result<Value, FetchError> {
    serde_json::from_slice(body).map_err(FetchError::decode)
}

/// Fetches an endpoint and deserializes it into a typed payload
pub async fn fetch_as<T, F>(fetcher: &F, endpoint: Endpoint) -> Result<T, FetchError>
where
    T: DeserializeOwned,
    F: Fetcher + ?Sized,
{
    let value = fetcher.fetch(endpoint).await?;
    serde_json::from_value(value).map_err(FetchError::decode)
}

/// Fetch doubles for unit tests in this workspace
#[cfg(any(test, feature = "testing"))]
pub mod testing {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use async_trait::async_trait;
    use serde_json::Value;
    use tokio::sync::oneshot;

    use super::Fetcher;
    use crate::api::Endpoint;
    use crate::error::FetchError;

    /// Answers each endpoint from a fixed table and records every call
    #[derive(Default)]
    pub struct ScriptedFetcher {
        responses: HashMap<Endpoint, Result<Value, FetchError>>,
        pub calls: RefCell<Vec<Endpoint>>,
    }

    impl ScriptedFetcher {
        pub fn with(mut self, endpoint: Endpoint, response: Result<Value, FetchError>) -> Self {
            self.responses.insert(endpoint, response);
            self
        }
    }

    #[async_trait(?Send)]
    impl Fetcher for ScriptedFetcher {
        async fn fetch(&self, endpoint: Endpoint) -> Result<Value, FetchError> {
            self.calls.borrow_mut().push(endpoint);
            self.responses
                .get(&endpoint)
                .cloned()
                .unwrap_or(Err(FetchError::HttpStatus(404)))
        }
    }

    /// Holds each response until the test releases it through a oneshot sender
    #[derive(Default)]
    pub struct GatedFetcher {
        gates: RefCell<HashMap<Endpoint, oneshot::Receiver<Result<Value, FetchError>>>>,
    }

    impl GatedFetcher {
        pub fn gate(&self, endpoint: Endpoint) -> oneshot::Sender<Result<Value, FetchError>> {
            let (tx, rx) = oneshot::channel();
            self.gates.borrow_mut().insert(endpoint, rx);
            tx
        }
    }

    #[async_trait(?Send)]
    impl Fetcher for GatedFetcher {
        async fn fetch(&self, endpoint: Endpoint) -> Result<Value, FetchError> {
            let gate = self.gates.borrow_mut().remove(&endpoint);
            match gate {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(FetchError::network("gate dropped"))),
                None => Err(FetchError::HttpStatus(404)),
            }
        }
    }
}
