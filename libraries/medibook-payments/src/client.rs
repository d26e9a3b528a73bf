//! Razorpay REST client.

use crate::config::RazorpayConfig;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use medibook_core::{OrderRequest, PaymentProvider, ProviderOrder};
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Error envelope returned by the Razorpay API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

/// Client for the Razorpay orders API.
///
/// Built once at startup and shared behind `Arc<dyn PaymentProvider>`.
/// All requests use HTTP basic auth with the key id and secret.
pub struct RazorpayClient {
    http: Client,
    base_url: String,
    key_id: String,
    key_secret: String,
}

impl std::fmt::Debug for RazorpayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RazorpayClient")
            .field("base_url", &self.base_url)
            .field("key_id", &self.key_id)
            .finish_non_exhaustive()
    }
}

impl RazorpayClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RazorpayConfig) -> Result<Self> {
        if config.key_id.trim().is_empty() || config.key_secret.trim().is_empty() {
            return Err(PaymentError::InvalidConfig(
                "key id and key secret are required".into(),
            ));
        }

        let parsed = url::Url::parse(&config.api_base)
            .map_err(|e| PaymentError::InvalidConfig(format!("api base: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PaymentError::InvalidConfig(
                "api base must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("MediBook/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(PaymentError::Request)?;

        Ok(Self {
            http,
            base_url: config.api_base.trim_end_matches('/').to_string(),
            key_id: config.key_id,
            key_secret: config.key_secret,
        })
    }

    /// API endpoint this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `/v1/orders`
    pub async fn create(&self, request: &OrderRequest) -> Result<ProviderOrder> {
        let url = format!("{}/v1/orders", self.base_url);
        debug!(
            url = %url,
            amount = request.amount,
            currency = %request.currency,
            receipt = %request.receipt,
            "Creating payment order"
        );

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(request)
            .send()
            .await
            .map_err(map_send_error)?;

        let order = parse_order(response).await?;
        info!(order_id = %order.id, receipt = ?order.receipt, "Payment order created");

        Ok(order)
    }

    /// GET `/v1/orders/{order_id}`
    pub async fn fetch(&self, order_id: &str) -> Result<ProviderOrder> {
        let mut url = url::Url::parse(&self.base_url)
            .map_err(|e| PaymentError::InvalidConfig(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| PaymentError::InvalidConfig("api base cannot be a base".into()))?
            .pop_if_empty()
            .extend(["v1", "orders", order_id]);

        debug!(url = %url, "Fetching payment order");

        let response = self
            .http
            .get(url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .send()
            .await
            .map_err(map_send_error)?;

        parse_order(response).await
    }
}

fn map_send_error(e: reqwest::Error) -> PaymentError {
    if e.is_connect() || e.is_timeout() {
        PaymentError::Unreachable(e.to_string())
    } else {
        PaymentError::Request(e)
    }
}

async fn parse_order(response: Response) -> Result<ProviderOrder> {
    let status = response.status();

    if status.is_success() {
        return response
            .json()
            .await
            .map_err(|e| PaymentError::Parse(format!("Failed to parse order: {}", e)));
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(parsed) if !parsed.error.description.is_empty() => {
            format!("{}: {}", parsed.error.code, parsed.error.description)
        }
        _ => body,
    };

    warn!(status = %status, error = %message, "Payment provider request failed");

    Err(PaymentError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl PaymentProvider for RazorpayClient {
    async fn create_order(&self, request: &OrderRequest) -> medibook_core::Result<ProviderOrder> {
        Ok(self.create(request).await?)
    }

    async fn fetch_order(&self, order_id: &str) -> medibook_core::Result<ProviderOrder> {
        Ok(self.fetch(order_id).await?)
    }
}
