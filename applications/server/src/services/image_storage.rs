/// Image storage service - profile images on disk
use crate::error::Result;
use medibook_core::{BookingError, UserId};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Accepted image file extensions
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// An uploaded image waiting to be stored
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub extension: String,
    pub data: Vec<u8>,
}

impl ImageUpload {
    pub fn new(extension: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            extension: extension.into(),
            data,
        }
    }

    /// Read an image from a local file, taking the extension from its name
    pub async fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_string();
        let data = fs::read(path).await?;

        Ok(Self { extension, data })
    }
}

#[derive(Debug, Clone)]
pub struct ImageStorage {
    base_path: PathBuf,
}

impl ImageStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Initialize storage directories
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(self.base_path.join("profiles")).await?;
        Ok(())
    }

    /// Store a user's profile image and return its reference
    ///
    /// Each upload gets a fresh file name.
    pub async fn store_profile_image(&self, user_id: &UserId, upload: &ImageUpload) -> Result<String> {
        let extension = upload.extension.to_ascii_lowercase();
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(BookingError::invalid_input(format!(
                "Unsupported image type: {:?}",
                upload.extension
            ))
            .into());
        }
        if upload.data.is_empty() {
            return Err(BookingError::invalid_input("Image is empty").into());
        }

        let filename = format!(
            "{}-{}.{}",
            user_id.as_str(),
            uuid::Uuid::new_v4().simple(),
            extension
        );
        let path = self.base_path.join("profiles").join(&filename);

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&path, &upload.data).await?;
        tracing::debug!(user_id = %user_id, path = %path.display(), "Stored profile image");

        Ok(format!("profiles/{}", filename))
    }

    /// Absolute path for a stored reference
    pub fn resolve(&self, reference: &str) -> Result<PathBuf> {
        let relative = Path::new(reference);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(BookingError::invalid_input("Invalid image reference").into());
        }

        Ok(self.base_path.join(relative))
    }
}
