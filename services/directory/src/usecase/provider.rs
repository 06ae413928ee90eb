use crate::domain::repository::{ProviderRepository, UserRepository};
use crate::domain::types::{NewOwner, Provider, ProviderChanges, ProviderFields, User};
use crate::error::DirectoryServiceError;
use crate::usecase::ownership::ensure_owner;

// ── SearchProviders ──────────────────────────────────────────────────────────

pub struct SearchProvidersUseCase<P: ProviderRepository> {
    pub providers: P,
}

impl<P: ProviderRepository> SearchProvidersUseCase<P> {
    pub async fn execute(&self, term: Option<&str>) -> Result<Vec<Provider>, DirectoryServiceError> {
        let term = term.map(str::trim).filter(|t| !t.is_empty());
        let providers = self.providers.search(term).await?;
        tracing::debug!(term = ?term, count = providers.len(), "searched providers");
        Ok(providers)
    }
}

// ── GetProvider ──────────────────────────────────────────────────────────────

pub struct GetProviderUseCase<P: ProviderRepository> {
    pub providers: P,
}

impl<P: ProviderRepository> GetProviderUseCase<P> {
    pub async fn execute(&self, id: i32) -> Result<Provider, DirectoryServiceError> {
        self.providers
            .find_by_id(id)
            .await?
            .ok_or(DirectoryServiceError::ProviderNotFound)
    }
}

// ── RegisterProvider ─────────────────────────────────────────────────────────

pub struct RegisterProviderInput {
    pub fields: ProviderFields,
    pub username: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
}

#[derive(Debug)]
pub struct RegisterProviderOutput {
    pub provider: Provider,
    pub user: Option<User>,
}

pub struct RegisterProviderUseCase<P: ProviderRepository, U: UserRepository> {
    pub providers: P,
    pub users: U,
}

impl<P: ProviderRepository, U: UserRepository> RegisterProviderUseCase<P, U> {
    pub async fn execute(
        &self,
        input: RegisterProviderInput,
    ) -> Result<RegisterProviderOutput, DirectoryServiceError> {
        input.fields.validate()?;
        let owner = owner_from_input(&input)?;
        let fields = input.fields;

        if let Some(existing) = self.providers.find_by_email(&fields.email).await? {
            return Err(DirectoryServiceError::DuplicateEmail {
                email: fields.email,
                owner: existing.name,
            });
        }
        if let Some(existing) = self.providers.find_by_phone(&fields.phone).await? {
            return Err(DirectoryServiceError::DuplicatePhone {
                phone: fields.phone,
                owner: existing.name,
            });
        }
        if let Some(ref owner) = owner {
            if self.users.find_by_username(&owner.username).await?.is_some() {
                return Err(DirectoryServiceError::DuplicateUsername {
                    username: owner.username.clone(),
                });
            }
        }

        let output = match owner {
            Some(owner) => {
                let (provider, user) = self.providers.create_with_owner(&fields, &owner).await?;
                RegisterProviderOutput {
                    provider,
                    user: Some(user),
                }
            }
            None => RegisterProviderOutput {
                provider: self.providers.create(&fields).await?,
                user: None,
            },
        };

        tracing::info!(
            provider_id = output.provider.id,
            user_id = ?output.user.as_ref().map(|u| u.id),
            "provider registered"
        );
        Ok(output)
    }
}

/// Credentials are optional, but once either one is given both are required.
fn owner_from_input(input: &RegisterProviderInput) -> Result<Option<NewOwner>, DirectoryServiceError> {
    let username = input.username.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let password = input.password.as_deref().filter(|s| !s.trim().is_empty());
    match (username, password) {
        (None, None) => Ok(None),
        (Some(username), Some(password)) => Ok(Some(NewOwner {
            username: username.to_owned(),
            password: password.to_owned(),
            full_name: input
                .full_name
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(input.fields.name.as_str())
                .to_owned(),
        })),
        _ => Err(DirectoryServiceError::validation(
            "username and password are required",
        )),
    }
}

// ── UpdateProvider ───────────────────────────────────────────────────────────

pub struct UpdateProviderUseCase<P: ProviderRepository, U: UserRepository> {
    pub providers: P,
    pub users: U,
}

impl<P: ProviderRepository, U: UserRepository> UpdateProviderUseCase<P, U> {
    /// Uniqueness of email/phone is not re-checked here; the datastore's unique
    /// indexes reject collisions at write time.
    pub async fn execute(
        &self,
        id: i32,
        requesting_user_id: i32,
        changes: ProviderChanges,
    ) -> Result<Provider, DirectoryServiceError> {
        ensure_owner(&self.users, requesting_user_id, id).await?;
        let provider = self
            .providers
            .update(id, &changes)
            .await?
            .ok_or(DirectoryServiceError::ProviderNotFound)?;
        tracing::info!(provider_id = id, user_id = requesting_user_id, "provider updated");
        Ok(provider)
    }
}

// ── DeleteProvider ───────────────────────────────────────────────────────────

pub struct DeleteProviderUseCase<P: ProviderRepository, U: UserRepository> {
    pub providers: P,
    pub users: U,
}

impl<P: ProviderRepository, U: UserRepository> DeleteProviderUseCase<P, U> {
    pub async fn execute(&self, id: i32, requesting_user_id: i32) -> Result<(), DirectoryServiceError> {
        ensure_owner(&self.users, requesting_user_id, id).await?;
        if !self.providers.delete(id).await? {
            return Err(DirectoryServiceError::ProviderNotFound);
        }
        tracing::info!(provider_id = id, user_id = requesting_user_id, "provider deleted");
        Ok(())
    }
}
