use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::DirectoryServiceError;

/// Load the requesting user and require that it is linked to `provider_id`.
///
/// An unknown user and a user linked elsewhere both yield `Forbidden`.
pub async fn ensure_owner<U: UserRepository>(
    users: &U,
    requesting_user_id: i32,
    provider_id: i32,
) -> Result<User, DirectoryServiceError> {
    match users.find_by_id(requesting_user_id).await? {
        Some(user) if user.owns(provider_id) => Ok(user),
        _ => {
            tracing::warn!(
                user_id = requesting_user_id,
                provider_id,
                "ownership check failed"
            );
            Err(DirectoryServiceError::Forbidden)
        }
    }
}
