use async_trait::async_trait;
use f1_dashboard_core::fetch::decode_body;
use f1_dashboard_core::{Endpoint, FetchError, Fetcher};
use serde_json::Value;
use tracing::debug;

/// Fetcher backed by a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    base_url: String,
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait(?Send)]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, endpoint: Endpoint) -> Result<Value, FetchError> {
        let url = endpoint.url(&self.base_url);
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(FetchError::network)?;

        FetchError::check_status(response.status().as_u16())?;

        let body = response.bytes().await.map_err(FetchError::network)?;
        decode_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::HttpFetcher;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use f1_dashboard_core::{Endpoint, FetchError, Fetcher};
    use serde_json::json;
    use tokio::net::TcpListener;

    async fn serve(router: Router) -> Result<String, std::io::Error> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });
        Ok(format!("http://{addr}"))
    }

    fn backend() -> Router {
        Router::new()
            .route(
                "/api/kpi",
                get(|| async { Json(json!({"total_races": 1125, "most_wins_driver": "L. Hamilton (105)"})) }),
            )
            .route(
                "/api/driver_profile/1",
                get(|| async {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({"error": "boom"})),
                    )
                }),
            )
            .route("/api/recent-races", get(|| async { "not json" }))
            .route("/api/seasons_list", get(|| async { "[{\"id\": 2024, \"name\"" }))
    }

    #[tokio::test]
    async fn success_returns_decoded_body() -> Result<(), Box<dyn std::error::Error>> {
        let base = serve(backend()).await?;
        let fetcher = HttpFetcher::new(&format!("{base}/"));

        let body = fetcher.fetch(Endpoint::Kpi).await?;

        assert_eq!(body["total_races"], 1125);
        assert_eq!(fetcher.base_url(), base);
        Ok(())
    }

    #[tokio::test]
    async fn error_status_is_reported_with_code() -> Result<(), Box<dyn std::error::Error>> {
        let base = serve(backend()).await?;
        let fetcher = HttpFetcher::new(&base);

        let result = fetcher.fetch(Endpoint::DriverProfile(1)).await;
        assert_eq!(result, Err(FetchError::HttpStatus(500)));

        let missing = fetcher.fetch(Endpoint::DriverProfile(2)).await;
        assert_eq!(missing, Err(FetchError::HttpStatus(404)));
        Ok(())
    }

    #[tokio::test]
    async fn non_json_and_truncated_bodies_fail_to_decode() -> Result<(), Box<dyn std::error::Error>> {
        let base = serve(backend()).await?;
        let fetcher = HttpFetcher::new(&base);

        let text = fetcher.fetch(Endpoint::RecentRaces).await;
        let truncated = fetcher.fetch(Endpoint::SeasonsList).await;

        assert!(matches!(text, Err(FetchError::Decode(_))));
        assert!(matches!(truncated, Err(FetchError::Decode(_))));
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() -> Result<(), Box<dyn std::error::Error>> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        drop(listener);

        let fetcher = HttpFetcher::new(&format!("http://{addr}"));
        let result = fetcher.fetch(Endpoint::Kpi).await;

        assert!(matches!(result, Err(FetchError::Network(_))));
        Ok(())
    }
}
