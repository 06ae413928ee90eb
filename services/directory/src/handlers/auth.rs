use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::domain::types::UserProfile;
use crate::error::DirectoryServiceError;
use crate::handlers::provider::ProviderResponse;
use crate::state::AppState;
use crate::usecase::auth::{AuthenticateUseCase, LoginInput};

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default, alias = "usuario")]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: UserProfileResponse,
}

/// Authenticated user without the password.
#[derive(Serialize)]
pub struct UserProfileResponse {
    pub id: i32,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub provider_id: Option<i32>,
    pub provider: Option<ProviderResponse>,
}

impl From<UserProfile> for UserProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            username: profile.username,
            full_name: profile.full_name,
            email: profile.email,
            provider_id: profile.provider_id,
            provider: profile.provider.map(ProviderResponse::from),
        }
    }
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, DirectoryServiceError> {
    let usecase = AuthenticateUseCase {
        users: state.user_repo(),
        providers: state.provider_repo(),
    };
    let profile = usecase
        .execute(LoginInput {
            username: body.username.unwrap_or_default(),
            password: body.password.unwrap_or_default(),
        })
        .await?;
    Ok(Json(LoginResponse {
        success: true,
        user: profile.into(),
    }))
}
