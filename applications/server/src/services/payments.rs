//! Order creation and checkout verification

use crate::error::Result;
use medibook_core::{
    Appointment, AppointmentId, BookingError, BookingStore, OrderRequest, PaymentConfirmation,
    PaymentProvider, ProviderOrder,
};
use medibook_payments::SignatureVerifier;
use std::sync::Arc;

#[derive(Clone)]
pub struct PaymentService {
    store: Arc<dyn BookingStore>,
    provider: Arc<dyn PaymentProvider>,
    verifier: SignatureVerifier,
    currency: String,
}

impl PaymentService {
    pub fn new(
        store: Arc<dyn BookingStore>,
        provider: Arc<dyn PaymentProvider>,
        verifier: SignatureVerifier,
        currency: String,
    ) -> Self {
        Self {
            store,
            provider,
            verifier,
            currency,
        }
    }

    /// Open a provider order for an appointment's fee
    ///
    /// The appointment id travels as the order receipt.
    pub async fn create_order(&self, appointment_id: &AppointmentId) -> Result<ProviderOrder> {
        let appointment = self.load(appointment_id).await?;

        if appointment.cancelled {
            return Err(BookingError::AlreadyCancelled.into());
        }

        let request = OrderRequest {
            amount: appointment.amount_minor_units()?,
            currency: self.currency.clone(),
            receipt: appointment.id.to_string(),
        };
        let order = self.provider.create_order(&request).await?;

        tracing::info!(
            appointment_id = %appointment_id,
            order_id = %order.id,
            amount = order.amount,
            currency = %order.currency,
            "Payment order created"
        );

        Ok(order)
    }

    /// Check a checkout signature and mark the ordered appointment paid
    ///
    /// A bad signature changes nothing. Verifying a paid appointment again
    /// succeeds; a cancelled one fails `AlreadyCancelled`.
    pub async fn verify(&self, confirmation: &PaymentConfirmation) -> Result<Appointment> {
        if let Err(err) = self.verifier.verify(
            &confirmation.order_id,
            &confirmation.payment_id,
            &confirmation.signature,
        ) {
            tracing::warn!(order_id = %confirmation.order_id, "Payment signature mismatch");
            return Err(err.into());
        }

        let order = self.provider.fetch_order(&confirmation.order_id).await?;
        let receipt = order.receipt.as_deref().filter(|r| !r.is_empty()).ok_or_else(|| {
            BookingError::provider(format!("Order {} carries no receipt", order.id))
        })?;

        let appointment = self.load(&AppointmentId::new(receipt)).await?;

        if appointment.cancelled {
            tracing::warn!(
                appointment_id = %appointment.id,
                order_id = %order.id,
                "Payment received for cancelled appointment"
            );
            return Err(BookingError::AlreadyCancelled.into());
        }
        if appointment.payment {
            return Ok(appointment);
        }

        if let Err(err) = self.store.mark_paid(&appointment.id).await {
            if matches!(err, BookingError::AlreadyCancelled) {
                tracing::warn!(
                    appointment_id = %appointment.id,
                    order_id = %order.id,
                    "Appointment cancelled while payment was being verified"
                );
            }
            return Err(err.into());
        }

        tracing::info!(
            appointment_id = %appointment.id,
            order_id = %order.id,
            payment_id = %confirmation.payment_id,
            order_status = %order.status,
            "Payment verified"
        );

        Ok(Appointment {
            payment: true,
            ..appointment
        })
    }

    async fn load(&self, appointment_id: &AppointmentId) -> Result<Appointment> {
        let appointment = self
            .store
            .get_appointment(appointment_id)
            .await?
            .ok_or_else(|| BookingError::not_found("Appointment", appointment_id.as_str()))?;

        Ok(appointment)
    }
}
