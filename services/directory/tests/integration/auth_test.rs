use directory::error::DirectoryServiceError;
use directory::usecase::auth::{AuthenticateUseCase, LoginInput};

use crate::helpers::{InMemory, provider_fields};

fn login(username: &str, password: &str) -> LoginInput {
    LoginInput {
        username: username.to_owned(),
        password: password.to_owned(),
    }
}

// ── AuthenticateUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_profile_with_linked_provider() {
    let store = InMemory::new();
    let provider = store.seed_provider(provider_fields("Acme", "a@x.io", "555-1"));
    let user = store.seed_user("alice", "p1", Some(provider.id));

    let usecase = AuthenticateUseCase {
        users: store.users(),
        providers: store.providers(),
    };
    let profile = usecase.execute(login("alice", "p1")).await.unwrap();

    assert_eq!(profile.id, user.id);
    assert_eq!(profile.username, "alice");
    assert_eq!(profile.provider_id, Some(provider.id));
    assert_eq!(profile.provider, Some(provider));
}

#[tokio::test]
async fn should_return_profile_without_provider_when_unlinked() {
    let store = InMemory::new();
    store.seed_user("carol", "secret", None);

    let usecase = AuthenticateUseCase {
        users: store.users(),
        providers: store.providers(),
    };
    let profile = usecase.execute(login("carol", "secret")).await.unwrap();

    assert_eq!(profile.provider_id, None);
    assert!(profile.provider.is_none());
}

#[tokio::test]
async fn should_reject_wrong_password_and_unknown_user_alike() {
    let store = InMemory::new();
    store.seed_user("alice", "p1", None);

    let usecase = AuthenticateUseCase {
        users: store.users(),
        providers: store.providers(),
    };
    let wrong_password = usecase.execute(login("alice", "nope")).await;
    let unknown_user = usecase.execute(login("mallory", "p1")).await;

    assert!(
        matches!(wrong_password, Err(DirectoryServiceError::InvalidCredentials)),
        "expected InvalidCredentials, got {wrong_password:?}"
    );
    assert!(
        matches!(unknown_user, Err(DirectoryServiceError::InvalidCredentials)),
        "expected InvalidCredentials, got {unknown_user:?}"
    );
}

#[tokio::test]
async fn should_reject_missing_credentials_as_validation_error() {
    let store = InMemory::new();
    let usecase = AuthenticateUseCase {
        users: store.users(),
        providers: store.providers(),
    };

    for (username, password) in [("", "p1"), ("alice", ""), ("", ""), ("   ", "p1"), ("alice", " ")] {
        let result = usecase.execute(login(username, password)).await;
        assert!(
            matches!(result, Err(DirectoryServiceError::Validation(_))),
            "expected Validation for ({username:?}, {password:?}), got {result:?}"
        );
    }
}
