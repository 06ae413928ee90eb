use sea_orm::DatabaseConnection;

use crate::infra::db::{DbProviderImageRepository, DbProviderRepository, DbUserRepository};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn provider_repo(&self) -> DbProviderRepository {
        DbProviderRepository {
            db: self.db.clone(),
        }
    }

    pub fn image_repo(&self) -> DbProviderImageRepository {
        DbProviderImageRepository {
            db: self.db.clone(),
        }
    }
}
