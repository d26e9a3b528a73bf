//! Common test utilities and fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use medibook_core::{
    Address, BookingError, CreateDoctor, CreateHospital, Doctor, OrderRequest, PaymentProvider,
    ProviderOrder, UserId,
};
use medibook_payments::SignatureVerifier;
use medibook_server::{services::AuthService, AppState, ImageStorage};
use medibook_storage::SqliteBookingStore;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret";
pub const TEST_KEY_SECRET: &str = "rzp_test_secret";

/// Payment provider that keeps orders in memory
#[derive(Default)]
pub struct StubProvider {
    orders: Mutex<Vec<ProviderOrder>>,
}

impl StubProvider {
    /// Register an order as if the provider had issued it
    pub fn insert(&self, order: ProviderOrder) {
        self.orders.lock().unwrap().push(order);
    }

    pub fn orders(&self) -> Vec<ProviderOrder> {
        self.orders.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentProvider for StubProvider {
    async fn create_order(&self, request: &OrderRequest) -> medibook_core::Result<ProviderOrder> {
        let mut orders = self.orders.lock().unwrap();
        let order = ProviderOrder {
            id: format!("order_{}", orders.len() + 1),
            amount: request.amount,
            currency: request.currency.clone(),
            receipt: Some(request.receipt.clone()),
            status: "created".to_string(),
        };
        orders.push(order.clone());
        Ok(order)
    }

    async fn fetch_order(&self, order_id: &str) -> medibook_core::Result<ProviderOrder> {
        self.orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == order_id)
            .cloned()
            .ok_or_else(|| BookingError::provider(format!("order {order_id} does not exist")))
    }
}

/// Fully wired state over a temporary database and image directory
pub struct TestApp {
    pub state: AppState,
    pub provider: Arc<StubProvider>,
    pub verifier: SignatureVerifier,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

        let store = SqliteBookingStore::connect(&db_url)
            .await
            .expect("Failed to open test database");

        let images = ImageStorage::new(temp_dir.path().join("images"));
        images.initialize().await.expect("Failed to create image dir");

        let provider = Arc::new(StubProvider::default());
        let verifier = SignatureVerifier::new(TEST_KEY_SECRET);

        let state = AppState::new(
            Arc::new(store),
            Arc::new(AuthService::new(TEST_JWT_SECRET.to_string(), 24).with_hash_cost(4)),
            Arc::new(images),
            provider.clone(),
            verifier.clone(),
            "INR".to_string(),
        );

        Self {
            state,
            provider,
            verifier,
            _temp_dir: temp_dir,
        }
    }

    /// Register a user and return its id and token
    pub async fn register(&self, name: &str) -> (UserId, String) {
        let token = self
            .state
            .accounts()
            .register(
                name,
                &format!("{}@example.com", name.to_lowercase()),
                fixtures::TEST_PASSWORD,
            )
            .await
            .expect("Failed to register user");
        let user_id = self
            .state
            .accounts()
            .authenticate(&token)
            .expect("Fresh token should verify");
        (user_id, token)
    }

    /// Add a hospital (if needed) and an available doctor in it
    pub async fn add_doctor(&self, name: &str, hospital: &str, fees: i64) -> Doctor {
        let directory = self.state.directory();
        let known = directory
            .list_hospitals()
            .await
            .unwrap()
            .iter()
            .any(|h| h.name == hospital);
        if !known {
            directory
                .add_hospital(CreateHospital {
                    name: hospital.to_string(),
                    address: "1 Hospital Road".to_string(),
                })
                .await
                .expect("Failed to add hospital");
        }

        directory
            .add_doctor(CreateDoctor {
                name: name.to_string(),
                email: format!("{}@clinic.example.com", name.to_lowercase().replace(' ', ".")),
                image: None,
                speciality: "General physician".to_string(),
                degree: "MBBS".to_string(),
                experience: "4 Years".to_string(),
                about: "Primary care".to_string(),
                fees,
                hospital: hospital.to_string(),
                address: Address::new("2 Clinic Lane", "Pune"),
            })
            .await
            .expect("Failed to add doctor")
    }
}

/// Test user credentials
pub mod fixtures {
    pub const TEST_PASSWORD: &str = "TestPassword123!";
}
