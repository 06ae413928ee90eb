use crate::domain::repository::{ProviderImageRepository, UserRepository};
use crate::domain::types::{NewProviderImage, ProviderImage};
use crate::error::DirectoryServiceError;
use crate::usecase::ownership::ensure_owner;

// ── ListImages ───────────────────────────────────────────────────────────────

pub struct ListImagesUseCase<I: ProviderImageRepository> {
    pub images: I,
}

impl<I: ProviderImageRepository> ListImagesUseCase<I> {
    pub async fn execute(&self, provider_id: i32) -> Result<Vec<ProviderImage>, DirectoryServiceError> {
        self.images.list(provider_id).await
    }
}

// ── AddImage ─────────────────────────────────────────────────────────────────

pub struct AddImageInput {
    pub provider_id: i32,
    pub image_url: String,
    pub storage_public_id: String,
    pub requesting_user_id: i32,
}

pub struct AddImageUseCase<I: ProviderImageRepository, U: UserRepository> {
    pub images: I,
    pub users: U,
}

impl<I: ProviderImageRepository, U: UserRepository> AddImageUseCase<I, U> {
    pub async fn execute(&self, input: AddImageInput) -> Result<ProviderImage, DirectoryServiceError> {
        ensure_owner(&self.users, input.requesting_user_id, input.provider_id).await?;
        if input.image_url.trim().is_empty() {
            return Err(DirectoryServiceError::validation("image_url is required"));
        }
        let image = self
            .images
            .append(&NewProviderImage {
                provider_id: input.provider_id,
                image_url: input.image_url,
                storage_public_id: input.storage_public_id,
            })
            .await?;
        tracing::info!(
            provider_id = image.provider_id,
            image_id = image.id,
            order = image.order,
            "image added"
        );
        Ok(image)
    }
}

// ── RemoveImage ──────────────────────────────────────────────────────────────

pub struct RemoveImageUseCase<I: ProviderImageRepository, U: UserRepository> {
    pub images: I,
    pub users: U,
}

impl<I: ProviderImageRepository, U: UserRepository> RemoveImageUseCase<I, U> {
    /// An unknown image, or one outside `provider_id`'s gallery, is reported as
    /// `Forbidden`, same as an image owned by another provider.
    pub async fn execute(
        &self,
        provider_id: i32,
        image_id: i32,
        requesting_user_id: i32,
    ) -> Result<(), DirectoryServiceError> {
        let Some(image) = self
            .images
            .find_by_id(image_id)
            .await?
            .filter(|image| image.provider_id == provider_id)
        else {
            tracing::warn!(provider_id, image_id, "image not in provider gallery");
            return Err(DirectoryServiceError::Forbidden);
        };
        ensure_owner(&self.users, requesting_user_id, image.provider_id).await?;
        self.images.delete(image_id).await?;
        tracing::info!(provider_id = image.provider_id, image_id, "image removed");
        Ok(())
    }
}
