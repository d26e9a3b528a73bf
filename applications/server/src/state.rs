/// Shared application state
use crate::config::ServerConfig;
use crate::error::Result;
use crate::services::{
    AccountService, AppointmentService, AuthService, DirectoryService, ImageStorage,
    PaymentService, ProfileService, SlotLedgerService,
};
use medibook_core::{BookingStore, PaymentProvider};
use medibook_payments::{RazorpayClient, SignatureVerifier};
use medibook_storage::SqliteBookingStore;
use std::sync::Arc;

/// Application state shared across all commands
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookingStore>,
    pub auth_service: Arc<AuthService>,
    pub image_storage: Arc<ImageStorage>,
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub signature_verifier: SignatureVerifier,
    pub currency: String,
}

impl AppState {
    pub fn new(
        store: Arc<dyn BookingStore>,
        auth_service: Arc<AuthService>,
        image_storage: Arc<ImageStorage>,
        payment_provider: Arc<dyn PaymentProvider>,
        signature_verifier: SignatureVerifier,
        currency: String,
    ) -> Self {
        Self {
            store,
            auth_service,
            image_storage,
            payment_provider,
            signature_verifier,
            currency,
        }
    }

    /// Connect storage and build every dependency from configuration
    pub async fn initialize(config: &ServerConfig) -> Result<Self> {
        let store = SqliteBookingStore::connect(&config.storage.database_url).await?;
        tracing::info!("Database connected");

        let image_storage = ImageStorage::new(config.storage.image_storage_path.clone());
        image_storage.initialize().await?;
        tracing::info!("Image storage initialized");

        let auth_service = AuthService::new(
            config.auth.jwt_secret.clone(),
            config.auth.jwt_expiration_hours,
        );

        let razorpay = config.payments.razorpay();
        let signature_verifier = SignatureVerifier::new(&razorpay.key_secret);
        let payment_provider = RazorpayClient::new(razorpay)?;
        tracing::info!(api_base = %payment_provider.base_url(), "Payment provider configured");

        Ok(Self::new(
            Arc::new(store),
            Arc::new(auth_service),
            Arc::new(image_storage),
            Arc::new(payment_provider),
            signature_verifier,
            config.payments.currency.clone(),
        ))
    }

    pub fn accounts(&self) -> AccountService {
        AccountService::new(Arc::clone(&self.store), Arc::clone(&self.auth_service))
    }

    pub fn profiles(&self) -> ProfileService {
        ProfileService::new(Arc::clone(&self.store), Arc::clone(&self.image_storage))
    }

    pub fn directory(&self) -> DirectoryService {
        DirectoryService::new(Arc::clone(&self.store))
    }

    pub fn slots(&self) -> SlotLedgerService {
        SlotLedgerService::new(Arc::clone(&self.store))
    }

    pub fn appointments(&self) -> AppointmentService {
        AppointmentService::new(Arc::clone(&self.store))
    }

    pub fn payments(&self) -> PaymentService {
        PaymentService::new(
            Arc::clone(&self.store),
            Arc::clone(&self.payment_provider),
            self.signature_verifier.clone(),
            self.currency.clone(),
        )
    }
}
