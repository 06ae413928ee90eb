use crate::domain::repository::{ProviderRepository, UserRepository};
use crate::domain::types::UserProfile;
use crate::error::DirectoryServiceError;

// ── Authenticate ─────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub username: String,
    pub password: String,
}

pub struct AuthenticateUseCase<U: UserRepository, P: ProviderRepository> {
    pub users: U,
    pub providers: P,
}

impl<U: UserRepository, P: ProviderRepository> AuthenticateUseCase<U, P> {
    pub async fn execute(&self, input: LoginInput) -> Result<UserProfile, DirectoryServiceError> {
        let username = input.username.trim();
        if username.is_empty() || input.password.trim().is_empty() {
            return Err(DirectoryServiceError::validation(
                "username and password are required",
            ));
        }

        let Some(user) = self
            .users
            .find_by_credentials(username, &input.password)
            .await?
        else {
            tracing::debug!(%username, "rejected login");
            return Err(DirectoryServiceError::InvalidCredentials);
        };

        let provider = match user.provider_id {
            Some(provider_id) => self.providers.find_by_id(provider_id).await?,
            None => {
                tracing::warn!(user_id = user.id, "user has no linked provider");
                None
            }
        };

        tracing::info!(user_id = user.id, provider_id = ?user.provider_id, "login succeeded");
        Ok(UserProfile::from_user(user, provider))
    }
}
