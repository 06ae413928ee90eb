use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::domain::types::ProviderImage;
use crate::error::DirectoryServiceError;
use crate::handlers::provider::MessageResponse;
use crate::state::AppState;
use crate::usecase::image::{AddImageInput, AddImageUseCase, ListImagesUseCase, RemoveImageUseCase};

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub id: i32,
    pub provider_id: i32,
    pub image_url: String,
    pub public_id: String,
    pub order: i32,
    #[serde(serialize_with = "directory_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ProviderImage> for ImageResponse {
    fn from(image: ProviderImage) -> Self {
        Self {
            id: image.id,
            provider_id: image.provider_id,
            image_url: image.image_url,
            public_id: image.storage_public_id,
            order: image.order,
            created_at: image.created_at,
        }
    }
}

// ── GET /providers/{id}/images ───────────────────────────────────────────────

pub async fn list_images(
    State(state): State<AppState>,
    Path(provider_id): Path<i32>,
) -> Result<Json<Vec<ImageResponse>>, DirectoryServiceError> {
    let usecase = ListImagesUseCase {
        images: state.image_repo(),
    };
    let images = usecase.execute(provider_id).await?;
    Ok(Json(images.into_iter().map(ImageResponse::from).collect()))
}

// ── POST /providers/{id}/images ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AddImageRequest {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub public_id: Option<String>,
    #[serde(default, alias = "usuario_id")]
    pub requesting_user_id: Option<i32>,
}

pub async fn add_image(
    State(state): State<AppState>,
    Path(provider_id): Path<i32>,
    Json(body): Json<AddImageRequest>,
) -> Result<(StatusCode, Json<ImageResponse>), DirectoryServiceError> {
    // An anonymous caller owns nothing.
    let requesting_user_id = body
        .requesting_user_id
        .ok_or(DirectoryServiceError::Forbidden)?;
    let usecase = AddImageUseCase {
        images: state.image_repo(),
        users: state.user_repo(),
    };
    let image = usecase
        .execute(AddImageInput {
            provider_id,
            image_url: body.image_url.unwrap_or_default(),
            storage_public_id: body.public_id.unwrap_or_default(),
            requesting_user_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(image.into())))
}

// ── DELETE /providers/{id}/images ────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct RemoveImageQuery {
    #[serde(alias = "imagen_id")]
    pub image_id: Option<i32>,
    #[serde(alias = "usuario_id")]
    pub requesting_user_id: Option<i32>,
}

pub async fn remove_image(
    State(state): State<AppState>,
    Path(provider_id): Path<i32>,
    Query(query): Query<RemoveImageQuery>,
) -> Result<Json<MessageResponse>, DirectoryServiceError> {
    let (Some(image_id), Some(requesting_user_id)) = (query.image_id, query.requesting_user_id)
    else {
        return Err(DirectoryServiceError::validation(
            "image_id and requesting_user_id are required",
        ));
    };
    let usecase = RemoveImageUseCase {
        images: state.image_repo(),
        users: state.user_repo(),
    };
    usecase
        .execute(provider_id, image_id, requesting_user_id)
        .await?;
    Ok(Json(MessageResponse {
        message: "image removed".to_owned(),
    }))
}
