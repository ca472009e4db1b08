//! Tests for the pool-scoped persistence service over the memory store.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use poolside_core::models::user::{CreateUser, UserAttribute, UserStatus, UserUpdate};
use poolside_core::store::UserPoolStore;
use poolside_core::{FixedClock, StoreError, UserPoolService};
use poolside_store_memory::MemoryUserPoolStore;

async fn service() -> UserPoolService<MemoryUserPoolStore, FixedClock> {
    let store = Arc::new(MemoryUserPoolStore::new());
    let options = store.ensure_pool("pool-1").await.unwrap();
    let clock = Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()));
    UserPoolService::new(store, clock, options)
}

fn create_input(username: &str) -> CreateUser {
    CreateUser {
        username: username.into(),
        attributes: vec![UserAttribute::new("email", format!("{username}@example.com"))],
        password: "temporary".into(),
        status: UserStatus::ForceChangePassword,
        enabled: true,
    }
}

#[tokio::test]
async fn create_user_assigns_sub_and_timestamps() {
    let service = service().await;

    let user = service.create_user(create_input("alice")).await.unwrap();

    let sub = user.attribute("sub").expect("sub attribute assigned");
    assert_eq!(sub.len(), 36); // UUID string form
    assert_eq!(user.create_date, service.get_user_by_username("alice").await.unwrap().unwrap().create_date);
    assert_eq!(user.create_date, user.last_modified_date);
}

#[tokio::test]
async fn create_user_keeps_caller_supplied_sub() {
    let service = service().await;

    let mut input = create_input("alice");
    input
        .attributes
        .push(UserAttribute::new("sub", "fixed-sub"));
    let user = service.create_user(input).await.unwrap();

    assert_eq!(user.attribute("sub"), Some("fixed-sub"));
    assert_eq!(
        user.attributes.iter().filter(|a| a.name == "sub").count(),
        1
    );
}

#[tokio::test]
async fn create_user_rejects_duplicate_username() {
    let service = service().await;
    service.create_user(create_input("alice")).await.unwrap();

    let err = service.create_user(create_input("alice")).await.unwrap_err();
    assert!(matches!(err, StoreError::UserExists { .. }));
}

#[tokio::test]
async fn save_user_stamps_last_modified_from_clock() {
    let store = Arc::new(MemoryUserPoolStore::new());
    let options = store.ensure_pool("pool-1").await.unwrap();

    let creation_instant = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let service = UserPoolService::new(
        store.clone(),
        Arc::new(FixedClock(creation_instant)),
        options.clone(),
    );
    let user = service.create_user(create_input("alice")).await.unwrap();

    // Re-save through a service whose clock has moved on.
    let later_instant = Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap();
    let later = UserPoolService::new(store, Arc::new(FixedClock(later_instant)), options);
    let saved = later
        .save_user(user.with(UserUpdate {
            status: Some(UserStatus::Confirmed),
            ..Default::default()
        }))
        .await
        .unwrap();

    assert_eq!(saved.last_modified_date, later_instant);
    assert_eq!(saved.create_date, creation_instant);

    let stored = later.get_user_by_username("alice").await.unwrap().unwrap();
    assert_eq!(stored.last_modified_date, later_instant);
    assert_eq!(stored.status, UserStatus::Confirmed);
}
