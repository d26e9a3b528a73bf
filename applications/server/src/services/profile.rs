//! User profile read and update

use crate::error::Result;
use crate::services::image_storage::{ImageStorage, ImageUpload};
use medibook_core::{BookingError, BookingStore, ProfileUpdate, User, UserId};
use std::sync::Arc;

#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn BookingStore>,
    images: Arc<ImageStorage>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn BookingStore>, images: Arc<ImageStorage>) -> Self {
        Self { store, images }
    }

    /// The user's profile; credentials are never part of it
    pub async fn get_profile(&self, user_id: &UserId) -> Result<User> {
        let user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or_else(|| BookingError::not_found("User", user_id.as_str()))?;

        Ok(user)
    }

    /// Overwrite the editable fields and optionally replace the profile image
    pub async fn update_profile(
        &self,
        user_id: &UserId,
        update: ProfileUpdate,
        image: Option<ImageUpload>,
    ) -> Result<User> {
        update.validate()?;

        self.store.update_profile(user_id, update).await?;

        if let Some(upload) = image {
            let reference = self.images.store_profile_image(user_id, &upload).await?;
            self.store.set_user_image(user_id, &reference).await?;
        }

        tracing::info!(user_id = %user_id, "Profile updated");

        self.get_profile(user_id).await
    }

    /// Where a stored image reference lives on disk
    pub fn image_path(&self, reference: &str) -> Result<std::path::PathBuf> {
        self.images.resolve(reference)
    }
}
