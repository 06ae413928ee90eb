use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::domain::types::{Provider, ProviderChanges, ProviderFields};
use crate::error::DirectoryServiceError;
use crate::state::AppState;
use crate::usecase::provider::{
    DeleteProviderUseCase, GetProviderUseCase, RegisterProviderInput, RegisterProviderUseCase,
    SearchProvidersUseCase, UpdateProviderUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ProviderResponse {
    pub id: i32,
    pub name: String,
    pub service: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub keywords: String,
    #[serde(serialize_with = "directory_core::serde::to_rfc3339_ms")]
    pub registered_at: chrono::DateTime<chrono::Utc>,
}

impl From<Provider> for ProviderResponse {
    fn from(p: Provider) -> Self {
        Self {
            id: p.id,
            name: p.name,
            service: p.service_category,
            email: p.email,
            phone: p.phone,
            location: p.location,
            keywords: p.keywords,
            registered_at: p.registered_at,
        }
    }
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ── GET /providers ───────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct SearchQuery {
    pub search: Option<String>,
}

pub async fn list_providers(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ProviderResponse>>, DirectoryServiceError> {
    let usecase = SearchProvidersUseCase {
        providers: state.provider_repo(),
    };
    let providers = usecase.execute(query.search.as_deref()).await?;
    Ok(Json(providers.into_iter().map(ProviderResponse::from).collect()))
}

// ── GET /providers/{id} ──────────────────────────────────────────────────────

pub async fn get_provider(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProviderResponse>, DirectoryServiceError> {
    let usecase = GetProviderUseCase {
        providers: state.provider_repo(),
    };
    let provider = usecase.execute(id).await?;
    Ok(Json(provider.into()))
}

// ── POST /providers ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterProviderRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "service_category")]
    pub service: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default, alias = "usuario")]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Serialize)]
pub struct RegisterProviderResponse {
    pub id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i32>,
    pub message: String,
}

pub async fn register_provider(
    State(state): State<AppState>,
    Json(body): Json<RegisterProviderRequest>,
) -> Result<(StatusCode, Json<RegisterProviderResponse>), DirectoryServiceError> {
    let usecase = RegisterProviderUseCase {
        providers: state.provider_repo(),
        users: state.user_repo(),
    };
    let output = usecase
        .execute(RegisterProviderInput {
            fields: ProviderFields {
                name: body.name.unwrap_or_default(),
                service_category: body.service.unwrap_or_default(),
                email: body.email.unwrap_or_default(),
                phone: body.phone.unwrap_or_default(),
                location: body.location.unwrap_or_default(),
                keywords: body.keywords.unwrap_or_default(),
            },
            username: body.username,
            password: body.password,
            full_name: body.full_name,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterProviderResponse {
            id: output.provider.id,
            user_id: output.user.map(|u| u.id),
            message: "provider registered".to_owned(),
        }),
    ))
}

// ── PUT /providers, PUT /providers/{id} ──────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateProviderRequest {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "service_category")]
    pub service: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default, alias = "usuario_id")]
    pub requesting_user_id: Option<i32>,
}

#[derive(Serialize)]
pub struct UpdateProviderResponse {
    pub message: String,
    pub data: ProviderResponse,
}

pub async fn update_provider(
    State(state): State<AppState>,
    Json(body): Json<UpdateProviderRequest>,
) -> Result<Json<UpdateProviderResponse>, DirectoryServiceError> {
    let id = body
        .id
        .ok_or_else(|| DirectoryServiceError::validation("provider id is required"))?;
    apply_update(&state, id, body).await
}

pub async fn update_provider_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateProviderRequest>,
) -> Result<Json<UpdateProviderResponse>, DirectoryServiceError> {
    if body.id.is_some_and(|body_id| body_id != id) {
        return Err(DirectoryServiceError::validation(
            "provider id in body does not match path",
        ));
    }
    apply_update(&state, id, body).await
}

async fn apply_update(
    state: &AppState,
    id: i32,
    body: UpdateProviderRequest,
) -> Result<Json<UpdateProviderResponse>, DirectoryServiceError> {
    let requesting_user_id = body
        .requesting_user_id
        .ok_or_else(|| DirectoryServiceError::validation("requesting user id is required"))?;
    let usecase = UpdateProviderUseCase {
        providers: state.provider_repo(),
        users: state.user_repo(),
    };
    let provider = usecase
        .execute(
            id,
            requesting_user_id,
            ProviderChanges {
                name: body.name,
                service_category: body.service,
                email: body.email,
                phone: body.phone,
                location: body.location,
                keywords: body.keywords,
            },
        )
        .await?;
    Ok(Json(UpdateProviderResponse {
        message: "provider updated".to_owned(),
        data: provider.into(),
    }))
}

// ── DELETE /providers/{id} ───────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct DeleteProviderQuery {
    #[serde(alias = "usuario_id")]
    pub requesting_user_id: Option<i32>,
}

pub async fn delete_provider(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<DeleteProviderQuery>,
) -> Result<Json<MessageResponse>, DirectoryServiceError> {
    let requesting_user_id = query
        .requesting_user_id
        .ok_or_else(|| DirectoryServiceError::validation("requesting user id is required"))?;
    let usecase = DeleteProviderUseCase {
        providers: state.provider_repo(),
        users: state.user_repo(),
    };
    usecase.execute(id, requesting_user_id).await?;
    Ok(Json(MessageResponse {
        message: "provider deleted".to_owned(),
    }))
}
