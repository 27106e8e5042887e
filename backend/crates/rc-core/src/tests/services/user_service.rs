use crate::tests::{
    FailingIdGenerator, FaultyRepository, RacingRepository, SequentialIdGenerator, SlowRepository,
};
use crate::{ErrorKind, InMemoryUserRepository, User, UserService, UserServiceError};

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use googletest::prelude::*;

const FIRST_ID: u64 = 123;

fn service_with(repo: Arc<InMemoryUserRepository>) -> (UserService, Arc<SequentialIdGenerator>) {
    let ids = Arc::new(SequentialIdGenerator::starting_at(FIRST_ID));
    (UserService::new(repo, ids.clone()), ids)
}

// =========================================================================
// create_user / get_user
// =========================================================================

#[tokio::test]
async fn given_name_when_create_user_then_id_comes_from_allocator() {
    // Given
    let (service, _) = service_with(Arc::new(InMemoryUserRepository::new()));

    // When
    let user = service.create_user("alice").await.unwrap();

    // Then
    assert_that!(user, eq(&User::new(FIRST_ID, "alice")));
}

#[tokio::test]
async fn given_created_user_when_get_user_then_returns_equal_record() {
    // Given
    let (service, _) = service_with(Arc::new(InMemoryUserRepository::new()));
    let created = service.create_user("alice").await.unwrap();

    // When
    let found = service.get_user(created.id).await.unwrap();

    // Then
    assert_that!(found, eq(&created));
}

#[tokio::test]
async fn given_many_creates_when_listing_ids_then_all_distinct() {
    // Given
    let (service, ids) = service_with(Arc::new(InMemoryUserRepository::new()));

    // When
    let mut seen = HashSet::new();
    for i in 0..50 {
        let user = service.create_user(&format!("user-{i}")).await.unwrap();
        assert!(seen.insert(user.id), "id {} issued twice", user.id);
    }

    // Then
    assert_that!(seen.len(), eq(50));
    assert_that!(ids.issued(FIRST_ID), eq(50));
}

#[tokio::test]
async fn given_unknown_id_when_get_user_then_not_found() {
    // Given
    let (service, _) = service_with(Arc::new(InMemoryUserRepository::new()));

    // When
    let error = service.get_user(999).await.unwrap_err();

    // Then
    assert_that!(error.kind(), eq(ErrorKind::NotFound));
    assert!(matches!(
        error,
        UserServiceError::GetUser { user_id: 999, .. }
    ));
    assert!(error.to_string().contains("999"));
}

#[tokio::test]
async fn given_failing_allocator_when_create_user_then_allocation_error_and_nothing_stored() {
    // Given
    let repo = Arc::new(FaultyRepository::default());
    let service = UserService::new(repo.clone(), Arc::new(FailingIdGenerator));

    // When
    let error = service.create_user("alice").await.unwrap_err();

    // Then
    assert_that!(error.kind(), eq(ErrorKind::Allocation));
    assert_that!(repo.write_calls(), eq(0));
    assert_that!(repo.inner.user_count().await, eq(0));
}

#[tokio::test]
async fn given_failing_storage_when_create_user_then_persistence_error_with_allocated_id() {
    // Given
    let repo = Arc::new(FaultyRepository {
        fail_writes: true,
        ..Default::default()
    });
    let service = UserService::new(
        repo.clone(),
        Arc::new(SequentialIdGenerator::starting_at(FIRST_ID)),
    );

    // When
    let error = service.create_user("alice").await.unwrap_err();

    // Then
    assert_that!(error.kind(), eq(ErrorKind::Persistence));
    assert!(matches!(
        error,
        UserServiceError::CreateUser {
            user_id: FIRST_ID,
            ..
        }
    ));
    assert_that!(repo.inner.user_count().await, eq(0));
}

#[tokio::test]
async fn given_failing_storage_when_get_user_then_persistence_not_not_found() {
    // Given
    let repo = Arc::new(FaultyRepository {
        fail_lookups: true,
        ..Default::default()
    });
    let service = UserService::new(repo, Arc::new(SequentialIdGenerator::starting_at(1)));

    // When
    let error = service.get_user(1).await.unwrap_err();

    // Then
    assert_that!(error.kind(), eq(ErrorKind::Persistence));
    assert_that!(error.is_not_found(), eq(false));
}

// =========================================================================
// get_or_create_google_user
// =========================================================================

#[tokio::test]
async fn given_empty_store_when_get_or_create_google_user_then_creates_user() {
    // Given
    let repo = Arc::new(InMemoryUserRepository::new());
    let (service, _) = service_with(repo.clone());

    // When
    let user = service
        .get_or_create_google_user("a@x.com", "alice")
        .await
        .unwrap();

    // Then
    assert_that!(user, eq(&User::new(FIRST_ID, "alice")));
    assert_that!(repo.google_user_count().await, eq(1));
    let by_id = service.get_user(user.id).await.unwrap();
    assert_that!(by_id, eq(&user));
}

#[tokio::test]
async fn given_existing_google_user_when_called_with_other_name_then_first_name_kept() {
    // Given
    let repo = Arc::new(InMemoryUserRepository::new());
    let (service, ids) = service_with(repo.clone());
    let first = service
        .get_or_create_google_user("a@x.com", "alice")
        .await
        .unwrap();

    // When
    let second = service
        .get_or_create_google_user("a@x.com", "bob")
        .await
        .unwrap();

    // Then
    assert_that!(second, eq(&first));
    assert_that!(second.name.as_str(), eq("alice"));
    assert_that!(ids.issued(FIRST_ID), eq(1));
    assert_that!(repo.user_count().await, eq(1));
}

#[tokio::test]
async fn given_distinct_emails_when_get_or_create_then_distinct_users() {
    // Given
    let (service, _) = service_with(Arc::new(InMemoryUserRepository::new()));

    // When
    let a = service
        .get_or_create_google_user("a@x.com", "alice")
        .await
        .unwrap();
    let b = service
        .get_or_create_google_user("b@x.com", "alice")
        .await
        .unwrap();

    // Then
    assert_that!(a.id, not(eq(b.id)));
}

#[tokio::test]
async fn given_failing_lookup_when_get_or_create_then_no_creation_and_error_surfaced() {
    // Given
    let repo = Arc::new(FaultyRepository {
        fail_lookups: true,
        ..Default::default()
    });
    let ids = Arc::new(SequentialIdGenerator::starting_at(FIRST_ID));
    let service = UserService::new(repo.clone(), ids.clone());

    // When
    let error = service
        .get_or_create_google_user("a@x.com", "alice")
        .await
        .unwrap_err();

    // Then
    assert_that!(error.kind(), eq(ErrorKind::Persistence));
    assert!(matches!(error, UserServiceError::GetGoogleUser { ref email, .. } if email == "a@x.com"));
    assert_that!(repo.write_calls(), eq(0));
    assert_that!(ids.issued(FIRST_ID), eq(0));
}

#[tokio::test]
async fn given_failing_allocator_when_get_or_create_new_email_then_allocation_error() {
    // Given
    let repo = Arc::new(FaultyRepository::default());
    let service = UserService::new(repo.clone(), Arc::new(FailingIdGenerator));

    // When
    let error = service
        .get_or_create_google_user("a@x.com", "alice")
        .await
        .unwrap_err();

    // Then
    assert_that!(error.kind(), eq(ErrorKind::Allocation));
    assert_that!(repo.write_calls(), eq(0));
    assert_that!(repo.inner.google_user_count().await, eq(0));
}

#[tokio::test]
async fn given_failing_allocator_when_get_or_create_known_email_then_existing_user_returned() {
    // Given
    let repo = Arc::new(InMemoryUserRepository::new());
    let (seeding, _) = service_with(repo.clone());
    let existing = seeding
        .get_or_create_google_user("a@x.com", "alice")
        .await
        .unwrap();
    let service = UserService::new(repo, Arc::new(FailingIdGenerator));

    // When
    let found = service
        .get_or_create_google_user("a@x.com", "bob")
        .await
        .unwrap();

    // Then
    assert_that!(found, eq(&existing));
}

#[tokio::test]
async fn given_failing_storage_when_creating_google_user_then_error_names_email() {
    // Given
    let repo = Arc::new(FaultyRepository {
        fail_writes: true,
        ..Default::default()
    });
    let service = UserService::new(repo, Arc::new(SequentialIdGenerator::starting_at(1)));

    // When
    let error = service
        .get_or_create_google_user("a@x.com", "alice")
        .await
        .unwrap_err();

    // Then
    assert_that!(error.kind(), eq(ErrorKind::Persistence));
    assert!(matches!(error, UserServiceError::CreateGoogleUser { .. }));
    assert!(error.to_string().contains("a@x.com"));
}

#[tokio::test]
async fn given_concurrent_first_logins_for_same_email_then_single_user_persisted() {
    // Given
    let repo = Arc::new(RacingRepository::new(2));
    let service = UserService::new(
        repo.clone(),
        Arc::new(SequentialIdGenerator::starting_at(FIRST_ID)),
    );
    let other = service.clone();

    // When
    let (first, second) = tokio::join!(
        service.get_or_create_google_user("a@x.com", "alice"),
        other.get_or_create_google_user("a@x.com", "bob"),
    );

    // Then
    let first = first.unwrap();
    let second = second.unwrap();
    assert_that!(second, eq(&first));
    assert_that!(repo.inner.user_count().await, eq(1));
    assert_that!(repo.inner.google_user_count().await, eq(1));
}

// =========================================================================
// cancellation
// =========================================================================

const SLOW_WRITE: Duration = Duration::from_secs(5);
const DEADLINE: Duration = Duration::from_millis(20);

#[tokio::test]
async fn given_slow_store_when_create_user_times_out_then_nothing_persisted() {
    // Given
    let repo = Arc::new(SlowRepository::new(SLOW_WRITE));
    let service = UserService::new(
        repo.clone(),
        Arc::new(SequentialIdGenerator::starting_at(FIRST_ID)),
    );

    // When
    let started = Instant::now();
    let result = tokio::time::timeout(DEADLINE, service.create_user("alice")).await;

    // Then
    assert!(result.is_err(), "expected the deadline to elapse");
    assert!(started.elapsed() < SLOW_WRITE);
    assert_that!(repo.inner.user_count().await, eq(0));
}

#[tokio::test]
async fn given_cancelled_google_login_when_retried_then_single_user_with_fresh_id() {
    // Given
    let repo = Arc::new(SlowRepository::new(DEADLINE * 2));
    let ids = Arc::new(SequentialIdGenerator::starting_at(FIRST_ID));
    let service = UserService::new(repo.clone(), ids.clone());
    let cancelled =
        tokio::time::timeout(DEADLINE, service.get_or_create_google_user("a@x.com", "alice"))
            .await;
    assert!(cancelled.is_err());
    assert_that!(repo.inner.google_user_count().await, eq(0));

    // When
    let user = service
        .get_or_create_google_user("a@x.com", "alice")
        .await
        .unwrap();

    // Then
    assert_that!(user.id, eq(FIRST_ID + 1));
    assert_that!(ids.issued(FIRST_ID), eq(2));
    assert_that!(repo.inner.user_count().await, eq(1));
    assert_that!(repo.inner.google_user_count().await, eq(1));
}
