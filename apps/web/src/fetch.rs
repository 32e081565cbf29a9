use async_trait::async_trait;
use f1_dashboard_core::fetch::decode_body;
use f1_dashboard_core::{Endpoint, FetchError, Fetcher};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Fetcher built on the browser's `fetch`
pub struct BrowserFetcher {
    base_url: String,
}

impl BrowserFetcher {
    /// An empty base URL requests the page's own origin
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

fn js_error(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

#[async_trait(?Send)]
impl Fetcher for BrowserFetcher {
    async fn fetch(&self, endpoint: Endpoint) -> Result<Value, FetchError> {
        let window = web_sys::window().ok_or_else(|| FetchError::network("no window"))?;

        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);

        let url = endpoint.url(&self.base_url);
        let request = Request::new_with_str_and_init(&url, &opts)
            .map_err(|err| FetchError::network(js_error(&err)))?;

        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|err| FetchError::network(js_error(&err)))?
            .dyn_into::<Response>()
            .map_err(|_| FetchError::network("fetch did not return a Response"))?;

        FetchError::check_status(response.status())?;

        let text = response
            .text()
            .map_err(|err| FetchError::network(js_error(&err)))?;
        let text = JsFuture::from(text)
            .await
            .map_err(|err| FetchError::network(js_error(&err)))?
            .as_string()
            .unwrap_or_default();

        decode_body(text.as_bytes())
    }
}
