use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, SqlErr, TransactionError, TransactionTrait,
};

use directory_core::sea_ext::ContainsAnyInsensitive;
use directory_schema::{provider_images, providers, users};

use crate::domain::repository::{ProviderImageRepository, ProviderRepository, UserRepository};
use crate::domain::types::{
    NewOwner, NewProviderImage, Provider, ProviderChanges, ProviderFields, ProviderImage, User,
    next_image_order,
};
use crate::error::DirectoryServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DirectoryServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .filter(users::Column::Password.eq(password))
            .one(&self.db)
            .await
            .context("find user by credentials")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DirectoryServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, DirectoryServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        Ok(model.map(user_from_model))
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        password: model.password,
        full_name: model.full_name,
        email: model.email,
        provider_id: model.provider_id,
        created_at: model.created_at,
    }
}

// ── Provider repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProviderRepository {
    pub db: DatabaseConnection,
}

impl ProviderRepository for DbProviderRepository {
    async fn search(&self, term: Option<&str>) -> Result<Vec<Provider>, DirectoryServiceError> {
        let mut query = providers::Entity::find().order_by_desc(providers::Column::Id);
        if let Some(term) = term {
            query = query.contains_any_insensitive(
                &[
                    providers::Column::Name,
                    providers::Column::Service,
                    providers::Column::Location,
                    providers::Column::Keywords,
                ],
                term,
            );
        }
        let models = query.all(&self.db).await.context("search providers")?;
        Ok(models.into_iter().map(provider_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Provider>, DirectoryServiceError> {
        let model = providers::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find provider by id")?;
        Ok(model.map(provider_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Provider>, DirectoryServiceError> {
        let model = providers::Entity::find()
            .filter(providers::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find provider by email")?;
        Ok(model.map(provider_from_model))
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Provider>, DirectoryServiceError> {
        let model = providers::Entity::find()
            .filter(providers::Column::Phone.eq(phone))
            .one(&self.db)
            .await
            .context("find provider by phone")?;
        Ok(model.map(provider_from_model))
    }

    async fn create(&self, fields: &ProviderFields) -> Result<Provider, DirectoryServiceError> {
        let model = new_provider_model(fields)
            .insert(&self.db)
            .await
            .map_err(|e| {
                write_error(e, UniqueValues::of_fields(fields, None), "insert provider")
            })?;
        Ok(provider_from_model(model))
    }

    async fn create_with_owner(
        &self,
        fields: &ProviderFields,
        owner: &NewOwner,
    ) -> Result<(Provider, User), DirectoryServiceError> {
        let provider_am = new_provider_model(fields);
        let owner_am = users::ActiveModel {
            username: Set(owner.username.clone()),
            password: Set(owner.password.clone()),
            full_name: Set(owner.full_name.clone()),
            email: Set(fields.email.clone()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let result = self
            .db
            .transaction::<_, (providers::Model, users::Model), DbErr>(|txn| {
                Box::pin(async move {
                    let provider = provider_am.insert(txn).await?;
                    let mut owner_am = owner_am;
                    owner_am.provider_id = Set(Some(provider.id));
                    let user = owner_am.insert(txn).await?;
                    Ok((provider, user))
                })
            })
            .await;

        match result {
            Ok((provider, user)) => Ok((provider_from_model(provider), user_from_model(user))),
            Err(TransactionError::Transaction(e)) => Err(write_error(
                e,
                UniqueValues::of_fields(fields, Some(&owner.username)),
                "insert provider with owner",
            )),
            Err(TransactionError::Connection(e)) => {
                Err(anyhow::Error::new(e).context("provider registration transaction").into())
            }
        }
    }

    async fn update(
        &self,
        id: i32,
        changes: &ProviderChanges,
    ) -> Result<Option<Provider>, DirectoryServiceError> {
        let Some(model) = providers::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find provider for update")?
        else {
            return Ok(None);
        };

        let mut provider = provider_from_model(model);
        changes.apply_to(&mut provider);

        let updated = providers::ActiveModel {
            id: Set(provider.id),
            name: Set(provider.name),
            service: Set(provider.service_category),
            email: Set(provider.email),
            phone: Set(provider.phone),
            location: Set(provider.location),
            keywords: Set(provider.keywords),
            registered_at: Set(provider.registered_at),
        }
        .update(&self.db)
        .await
        .map_err(|e| {
            write_error(
                e,
                UniqueValues {
                    email: changes.email.as_deref(),
                    phone: changes.phone.as_deref(),
                    username: None,
                },
                "update provider",
            )
        })?;
        Ok(Some(provider_from_model(updated)))
    }

    async fn delete(&self, id: i32) -> Result<bool, DirectoryServiceError> {
        let result = providers::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete provider")?;
        Ok(result.rows_affected > 0)
    }
}

fn new_provider_model(fields: &ProviderFields) -> providers::ActiveModel {
    providers::ActiveModel {
        name: Set(fields.name.clone()),
        service: Set(fields.service_category.clone()),
        email: Set(fields.email.clone()),
        phone: Set(fields.phone.clone()),
        location: Set(fields.location.clone()),
        keywords: Set(fields.keywords.clone()),
        registered_at: Set(Utc::now()),
        ..Default::default()
    }
}

fn provider_from_model(model: providers::Model) -> Provider {
    Provider {
        id: model.id,
        name: model.name,
        service_category: model.service,
        email: model.email,
        phone: model.phone,
        location: model.location,
        keywords: model.keywords,
        registered_at: model.registered_at,
    }
}

/// Values a write may collide on, used to name the conflict.
struct UniqueValues<'a> {
    email: Option<&'a str>,
    phone: Option<&'a str>,
    username: Option<&'a str>,
}

impl<'a> UniqueValues<'a> {
    fn of_fields(fields: &'a ProviderFields, username: Option<&'a str>) -> Self {
        Self {
            email: Some(&fields.email),
            phone: Some(&fields.phone),
            username,
        }
    }
}

/// Map a unique-index violation to the matching conflict; anything else is internal.
///
/// Postgres reports the index name (`idx_users_username`), SQLite the column
/// (`users.username`); both contain the column name.
fn write_error(err: DbErr, values: UniqueValues<'_>, context: &'static str) -> DirectoryServiceError {
    const OWNER: &str = "another provider";
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        if let Some(username) = values.username.filter(|_| detail.contains("username")) {
            return DirectoryServiceError::DuplicateUsername {
                username: username.to_owned(),
            };
        }
        if let Some(phone) = values.phone.filter(|_| detail.contains("phone")) {
            return DirectoryServiceError::DuplicatePhone {
                phone: phone.to_owned(),
                owner: OWNER.to_owned(),
            };
        }
        if let Some(email) = values.email.filter(|_| detail.contains("email")) {
            return DirectoryServiceError::DuplicateEmail {
                email: email.to_owned(),
                owner: OWNER.to_owned(),
            };
        }
    }
    DirectoryServiceError::Internal(anyhow::Error::new(err).context(context))
}

// ── Provider image repository ────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProviderImageRepository {
    pub db: DatabaseConnection,
}

impl ProviderImageRepository for DbProviderImageRepository {
    async fn list(&self, provider_id: i32) -> Result<Vec<ProviderImage>, DirectoryServiceError> {
        let models = provider_images::Entity::find()
            .filter(provider_images::Column::ProviderId.eq(provider_id))
            .order_by_asc(provider_images::Column::Order)
            .order_by_asc(provider_images::Column::Id)
            .all(&self.db)
            .await
            .context("list provider images")?;
        Ok(models.into_iter().map(image_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProviderImage>, DirectoryServiceError> {
        let model = provider_images::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find provider image by id")?;
        Ok(model.map(image_from_model))
    }

    async fn append(
        &self,
        image: &NewProviderImage,
    ) -> Result<ProviderImage, DirectoryServiceError> {
        let image = image.clone();
        let model = self
            .db
            .transaction::<_, provider_images::Model, DbErr>(|txn| {
                Box::pin(async move {
                    let last = provider_images::Entity::find()
                        .filter(provider_images::Column::ProviderId.eq(image.provider_id))
                        .order_by_desc(provider_images::Column::Order)
                        .one(txn)
                        .await?;
                    provider_images::ActiveModel {
                        provider_id: Set(image.provider_id),
                        image_url: Set(image.image_url),
                        public_id: Set(image.storage_public_id),
                        order: Set(next_image_order(last.map(|m| m.order))),
                        created_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                })
            })
            .await
            .context("append provider image")?;
        Ok(image_from_model(model))
    }

    async fn delete(&self, id: i32) -> Result<bool, DirectoryServiceError> {
        let result = provider_images::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete provider image")?;
        Ok(result.rows_affected > 0)
    }
}

fn image_from_model(model: provider_images::Model) -> ProviderImage {
    ProviderImage {
        id: model.id,
        provider_id: model.provider_id,
        image_url: model.image_url,
        storage_public_id: model.public_id,
        order: model.order,
        created_at: model.created_at,
    }
}
