use directory::error::DirectoryServiceError;
use directory::usecase::image::{
    AddImageInput, AddImageUseCase, ListImagesUseCase, RemoveImageUseCase,
};

use crate::helpers::{InMemory, MockImageRepo, MockUserRepo, provider_fields};

fn add_usecase(store: &InMemory) -> AddImageUseCase<MockImageRepo, MockUserRepo> {
    AddImageUseCase {
        images: store.images(),
        users: store.users(),
    }
}

fn add_input(provider_id: i32, requesting_user_id: i32, n: i32) -> AddImageInput {
    AddImageInput {
        provider_id,
        image_url: format!("https://img.example.com/{n}.jpg"),
        storage_public_id: format!("gallery/{n}"),
        requesting_user_id,
    }
}

// ── AddImageUseCase ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_append_images_after_current_max_order() {
    let store = InMemory::new();
    let provider = store.seed_provider(provider_fields("Acme", "a@x.io", "555-1"));
    let owner = store.seed_user("alice", "p1", Some(provider.id));
    let usecase = add_usecase(&store);

    for n in 0..3 {
        usecase.execute(add_input(provider.id, owner.id, n)).await.unwrap();
    }
    let next = usecase.execute(add_input(provider.id, owner.id, 3)).await.unwrap();

    assert_eq!(next.order, 3);
    assert_eq!(store.image_orders(provider.id), vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn should_keep_gaps_and_restart_at_zero_when_gallery_empties() {
    let store = InMemory::new();
    let provider = store.seed_provider(provider_fields("Acme", "a@x.io", "555-1"));
    let owner = store.seed_user("alice", "p1", Some(provider.id));
    let add = add_usecase(&store);
    let remove = RemoveImageUseCase {
        images: store.images(),
        users: store.users(),
    };

    let first = add.execute(add_input(provider.id, owner.id, 0)).await.unwrap();
    let second = add.execute(add_input(provider.id, owner.id, 1)).await.unwrap();

    remove.execute(provider.id, first.id, owner.id).await.unwrap();
    let third = add.execute(add_input(provider.id, owner.id, 2)).await.unwrap();
    assert_eq!(third.order, 2);

    remove.execute(provider.id, second.id, owner.id).await.unwrap();
    remove.execute(provider.id, third.id, owner.id).await.unwrap();
    let fresh = add.execute(add_input(provider.id, owner.id, 3)).await.unwrap();
    assert_eq!(fresh.order, 0);
}

#[tokio::test]
async fn should_forbid_adding_to_another_providers_gallery() {
    let store = InMemory::new();
    let acme = store.seed_provider(provider_fields("Acme", "a@x.io", "555-1"));
    let bolt = store.seed_provider(provider_fields("Bolt", "b@x.io", "555-2"));
    let bob = store.seed_user("bob", "p2", Some(bolt.id));

    let result = add_usecase(&store).execute(add_input(acme.id, bob.id, 0)).await;

    assert!(
        matches!(result, Err(DirectoryServiceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
    assert!(store.image_orders(acme.id).is_empty());
}

#[tokio::test]
async fn should_reject_blank_image_url() {
    let store = InMemory::new();
    let provider = store.seed_provider(provider_fields("Acme", "a@x.io", "555-1"));
    let owner = store.seed_user("alice", "p1", Some(provider.id));

    let mut input = add_input(provider.id, owner.id, 0);
    input.image_url = " ".to_owned();
    let result = add_usecase(&store).execute(input).await;

    assert!(
        matches!(result, Err(DirectoryServiceError::Validation(_))),
        "expected Validation, got {result:?}"
    );
}

// ── ListImagesUseCase / RemoveImageUseCase ───────────────────────────────────

#[tokio::test]
async fn should_list_images_in_order() {
    let store = InMemory::new();
    let provider = store.seed_provider(provider_fields("Acme", "a@x.io", "555-1"));
    let owner = store.seed_user("alice", "p1", Some(provider.id));
    let add = add_usecase(&store);
    for n in 0..3 {
        add.execute(add_input(provider.id, owner.id, n)).await.unwrap();
    }

    let images = ListImagesUseCase {
        images: store.images(),
    }
    .execute(provider.id)
    .await
    .unwrap();

    let orders: Vec<i32> = images.iter().map(|i| i.order).collect();
    assert_eq!(orders, vec![0, 1, 2]);
    assert_eq!(images[0].storage_public_id, "gallery/0");
}

#[tokio::test]
async fn should_forbid_removing_image_of_another_provider() {
    let store = InMemory::new();
    let acme = store.seed_provider(provider_fields("Acme", "a@x.io", "555-1"));
    let alice = store.seed_user("alice", "p1", Some(acme.id));
    let bolt = store.seed_provider(provider_fields("Bolt", "b@x.io", "555-2"));
    let bob = store.seed_user("bob", "p2", Some(bolt.id));
    let image = add_usecase(&store)
        .execute(add_input(acme.id, alice.id, 0))
        .await
        .unwrap();

    let remove = RemoveImageUseCase {
        images: store.images(),
        users: store.users(),
    };
    let result = remove.execute(acme.id, image.id, bob.id).await;

    assert!(
        matches!(result, Err(DirectoryServiceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
    assert_eq!(store.image_orders(acme.id), vec![0]);
}

#[tokio::test]
async fn should_forbid_removing_unknown_image() {
    let store = InMemory::new();
    let provider = store.seed_provider(provider_fields("Acme", "a@x.io", "555-1"));
    let owner = store.seed_user("alice", "p1", Some(provider.id));

    let result = RemoveImageUseCase {
        images: store.images(),
        users: store.users(),
    }
    .execute(provider.id, 404, owner.id)
    .await;

    assert!(
        matches!(result, Err(DirectoryServiceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

#[tokio::test]
async fn should_forbid_removing_own_image_through_another_gallery() {
    let store = InMemory::new();
    let acme = store.seed_provider(provider_fields("Acme", "a@x.io", "555-1"));
    let alice = store.seed_user("alice", "p1", Some(acme.id));
    let bolt = store.seed_provider(provider_fields("Bolt", "b@x.io", "555-2"));
    let image = add_usecase(&store)
        .execute(add_input(acme.id, alice.id, 0))
        .await
        .unwrap();

    let result = RemoveImageUseCase {
        images: store.images(),
        users: store.users(),
    }
    .execute(bolt.id, image.id, alice.id)
    .await;

    assert!(
        matches!(result, Err(DirectoryServiceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
    assert_eq!(store.image_orders(acme.id), vec![0]);
}
