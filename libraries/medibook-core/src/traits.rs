/// Core traits for MediBook
use crate::error::Result;
use crate::types::{OrderRequest, ProviderOrder};
use async_trait::async_trait;

/// Payment gateway
///
/// Implementers issue orders on an external provider. Constructed once at
/// startup and shared by the services that need it.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create an order for the given amount
    ///
    /// # Errors
    /// Returns `BookingError::Provider` if the provider rejects the request or
    /// cannot be reached
    async fn create_order(&self, request: &OrderRequest) -> Result<ProviderOrder>;

    /// Fetch a previously created order
    async fn fetch_order(&self, order_id: &str) -> Result<ProviderOrder>;
}
