use directory::domain::repository::{ProviderRepository, UserRepository};
use directory::domain::types::{NewOwner, ProviderChanges};
use directory::error::DirectoryServiceError;
use directory::infra::db::{DbProviderRepository, DbUserRepository};

use crate::helpers::{provider_fields, setup_test_db};

fn owner(username: &str) -> NewOwner {
    NewOwner {
        username: username.to_owned(),
        password: "p1".to_owned(),
        full_name: "Owner".to_owned(),
    }
}

// ── DbProviderRepository::create_with_owner ──────────────────────────────────

#[tokio::test]
async fn should_create_provider_and_linked_owner_together() {
    let db = setup_test_db().await;
    let providers = DbProviderRepository { db: db.clone() };
    let users = DbUserRepository { db };

    let (provider, user) = providers
        .create_with_owner(&provider_fields("Acme", "a@x.io", "555-1"), &owner("alice"))
        .await
        .unwrap();

    assert_eq!(user.provider_id, Some(provider.id));
    assert_eq!(user.email, "a@x.io");
    let stored = users.find_by_username("alice").await.unwrap().unwrap();
    assert_eq!(stored.id, user.id);
}

#[tokio::test]
async fn should_roll_back_provider_when_owner_username_collides() {
    let db = setup_test_db().await;
    let providers = DbProviderRepository { db };

    providers
        .create_with_owner(&provider_fields("Acme", "a@x.io", "555-1"), &owner("alice"))
        .await
        .unwrap();
    let result = providers
        .create_with_owner(&provider_fields("Bolt", "b@x.io", "555-2"), &owner("alice"))
        .await;

    assert!(
        matches!(result, Err(DirectoryServiceError::DuplicateUsername { ref username }) if username == "alice"),
        "expected DuplicateUsername, got {result:?}"
    );
    let remaining = providers.search(None).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "Acme");
}

// ── Write-time unique violations ─────────────────────────────────────────────

#[tokio::test]
async fn should_map_colliding_phone_on_insert_to_duplicate_phone() {
    let db = setup_test_db().await;
    let providers = DbProviderRepository { db };

    providers
        .create(&provider_fields("Acme", "a@x.io", "555-1"))
        .await
        .unwrap();
    let result = providers
        .create(&provider_fields("Bolt", "b@x.io", "555-1"))
        .await;

    assert!(
        matches!(result, Err(DirectoryServiceError::DuplicatePhone { ref phone, .. }) if phone == "555-1"),
        "expected DuplicatePhone, got {result:?}"
    );
    assert_eq!(providers.search(None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn should_map_colliding_email_on_insert_to_duplicate_email() {
    let db = setup_test_db().await;
    let providers = DbProviderRepository { db };

    providers
        .create(&provider_fields("Acme", "a@x.io", "555-1"))
        .await
        .unwrap();
    let result = providers
        .create(&provider_fields("Bolt", "a@x.io", "555-2"))
        .await;

    assert!(
        matches!(result, Err(DirectoryServiceError::DuplicateEmail { ref email, .. }) if email == "a@x.io"),
        "expected DuplicateEmail, got {result:?}"
    );
}

#[tokio::test]
async fn should_map_colliding_phone_on_update_and_keep_row() {
    let db = setup_test_db().await;
    let providers = DbProviderRepository { db };

    let acme = providers
        .create(&provider_fields("Acme", "a@x.io", "555-1"))
        .await
        .unwrap();
    providers
        .create(&provider_fields("Bolt", "b@x.io", "555-2"))
        .await
        .unwrap();

    let result = providers
        .update(
            acme.id,
            &ProviderChanges {
                phone: Some("555-2".to_owned()),
                ..Default::default()
            },
        )
        .await;

    assert!(
        matches!(result, Err(DirectoryServiceError::DuplicatePhone { .. })),
        "expected DuplicatePhone, got {result:?}"
    );
    let stored = providers.find_by_id(acme.id).await.unwrap().unwrap();
    assert_eq!(stored.phone, "555-1");
}
