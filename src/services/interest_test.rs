use super::*;

// =============================================================================
// normalize_name
// =============================================================================

#[test]
fn name_is_trimmed() {
    assert_eq!(normalize_name("  machine learning "), Some("machine learning".to_owned()));
}

#[test]
fn blank_name_is_rejected() {
    assert_eq!(normalize_name(""), None);
    assert_eq!(normalize_name("   "), None);
}

#[test]
fn overlong_name_is_rejected_by_character_count() {
    assert!(normalize_name(&"a".repeat(50)).is_some());
    assert!(normalize_name(&"a".repeat(51)).is_none());
    // Multibyte names are measured in characters, not bytes.
    assert!(normalize_name(&"한".repeat(50)).is_some());
    assert!(normalize_name(&"한".repeat(51)).is_none());
}

// =============================================================================
// live database
// =============================================================================

#[cfg(feature = "live-db-tests")]
mod live {
    use super::*;
    use crate::services::auth::create_user;
    use crate::state::test_helpers::live_pool;

    async fn seeded_user(pool: &PgPool) -> Uuid {
        let email = format!("interest-{}@test.local", Uuid::new_v4().simple());
        create_user(pool, &email, "Tester", "abcd1234")
            .await
            .expect("signup should succeed")
            .id
    }

    #[tokio::test]
    async fn add_then_list_round_trip() {
        let pool = live_pool().await;
        let user = seeded_user(&pool).await;

        let added = add_interest(&pool, user, "robotics").await.expect("add");
        let listed = list_interests(&pool, user).await.expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, added.id);
        assert_eq!(listed[0].name, "robotics");
    }

    #[tokio::test]
    async fn duplicate_name_for_same_user_is_rejected() {
        let pool = live_pool().await;
        let user = seeded_user(&pool).await;

        add_interest(&pool, user, "nlp").await.expect("first add");
        let result = add_interest(&pool, user, "nlp").await;
        assert!(matches!(result, Err(InterestError::Duplicate)));
    }

    #[tokio::test]
    async fn same_name_for_different_users_is_fine() {
        let pool = live_pool().await;
        let alice = seeded_user(&pool).await;
        let bob = seeded_user(&pool).await;

        add_interest(&pool, alice, "vision").await.expect("alice add");
        add_interest(&pool, bob, "vision").await.expect("bob add");
    }

    #[tokio::test]
    async fn rename_to_an_existing_name_is_a_duplicate() {
        let pool = live_pool().await;
        let user = seeded_user(&pool).await;

        add_interest(&pool, user, "graphs").await.expect("add");
        let second = add_interest(&pool, user, "trees").await.expect("add");

        let result = update_interest(&pool, second.id, user, "graphs").await;
        assert!(matches!(result, Err(InterestError::Duplicate)));
    }

    #[tokio::test]
    async fn foreign_row_reads_as_not_found() {
        let pool = live_pool().await;
        let owner = seeded_user(&pool).await;
        let intruder = seeded_user(&pool).await;
        let row = add_interest(&pool, owner, "theirs").await.expect("add");

        let update = update_interest(&pool, row.id, intruder, "mine now").await;
        let remove = remove_interest(&pool, row.id, intruder).await;
        assert!(matches!(update, Err(InterestError::NotFound(_))));
        assert!(matches!(remove, Err(InterestError::NotFound(_))));

        // Still present and unchanged for the owner.
        let listed = list_interests(&pool, owner).await.expect("list");
        assert_eq!(listed[0].name, "theirs");
    }

    #[tokio::test]
    async fn nonexistent_id_reads_the_same_as_foreign() {
        let pool = live_pool().await;
        let user = seeded_user(&pool).await;

        let result = remove_interest(&pool, Uuid::new_v4(), user).await;
        assert!(matches!(result, Err(InterestError::NotFound(_))));
    }
}
