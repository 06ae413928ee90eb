#![allow(async_fn_in_trait)]

use crate::domain::types::{
    NewOwner, NewProviderImage, Provider, ProviderChanges, ProviderFields, ProviderImage, User,
};
use crate::error::DirectoryServiceError;

/// Repository for login identities.
pub trait UserRepository: Send + Sync {
    /// Exact (username, password) match. No hashing is involved.
    async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DirectoryServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DirectoryServiceError>;

    async fn find_by_username(&self, username: &str)
    -> Result<Option<User>, DirectoryServiceError>;
}

/// Repository for directory listings.
pub trait ProviderRepository: Send + Sync {
    /// All providers newest-id first, narrowed to those matching `term` when given.
    async fn search(&self, term: Option<&str>) -> Result<Vec<Provider>, DirectoryServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Provider>, DirectoryServiceError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Provider>, DirectoryServiceError>;

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Provider>, DirectoryServiceError>;

    async fn create(&self, fields: &ProviderFields) -> Result<Provider, DirectoryServiceError>;

    /// Insert a provider and the user that owns it atomically (same transaction).
    async fn create_with_owner(
        &self,
        fields: &ProviderFields,
        owner: &NewOwner,
    ) -> Result<(Provider, User), DirectoryServiceError>;

    /// Apply `changes`. Returns `None` if no provider has this id.
    async fn update(
        &self,
        id: i32,
        changes: &ProviderChanges,
    ) -> Result<Option<Provider>, DirectoryServiceError>;

    /// Delete a provider; linked users and images go with it. Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, DirectoryServiceError>;
}

/// Repository for provider gallery images.
pub trait ProviderImageRepository: Send + Sync {
    /// Images of one provider, ascending by `order`.
    async fn list(&self, provider_id: i32) -> Result<Vec<ProviderImage>, DirectoryServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<ProviderImage>, DirectoryServiceError>;

    /// Insert at `max(order) + 1` for the provider (0 for an empty gallery).
    async fn append(
        &self,
        image: &NewProviderImage,
    ) -> Result<ProviderImage, DirectoryServiceError>;

    /// Delete an image without renumbering the rest. Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, DirectoryServiceError>;
}
