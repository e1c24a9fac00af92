//! Reaction invariants under concurrent use of the in-memory store.

use std::sync::Arc;

use review_core::common::{MovieId, UserId};
use review_core::domains::reviews::actions::react_to_review;
use review_core::domains::reviews::{NewReview, ReactionAction, ReactionState, Review};
use review_core::kernel::{BaseReviewStore, ServerDeps, TestDependencies};

async fn fresh_review(test_deps: &TestDependencies) -> Review {
    test_deps
        .reviews
        .insert(
            NewReview::builder()
                .description("Fresh")
                .author_id(UserId::new())
                .movie_id(MovieId::new())
                .build(),
        )
        .await
        .unwrap()
}

fn assert_consistent(review: &Review) {
    assert_eq!(review.like_count as usize, review.liked_users.len());
    assert_eq!(review.dislike_count as usize, review.disliked_users.len());
    assert!(review
        .liked_users
        .iter()
        .all(|user| !review.disliked_users.contains(user)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_like_and_dislike_from_two_users() {
    let test_deps = TestDependencies::new();
    let review_id = fresh_review(&test_deps).await.id;
    let deps = Arc::new(test_deps.server_deps());
    let (alice, bob) = (UserId::new(), UserId::new());

    let like = {
        let deps = deps.clone();
        tokio::spawn(async move { react_to_review(review_id, alice, ReactionAction::Like, &deps).await })
    };
    let dislike = {
        let deps = deps.clone();
        tokio::spawn(
            async move { react_to_review(review_id, bob, ReactionAction::Dislike, &deps).await },
        )
    };
    like.await.unwrap().unwrap();
    dislike.await.unwrap().unwrap();

    let stored = test_deps.reviews.find_by_id(review_id).await.unwrap().unwrap();
    assert_eq!((stored.like_count, stored.dislike_count), (1, 1));
    assert_eq!(stored.liked_users, vec![alice]);
    assert_eq!(stored.disliked_users, vec![bob]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn many_users_reacting_at_once_keep_counts_exact() {
    let test_deps = TestDependencies::new();
    let review_id = fresh_review(&test_deps).await.id;
    let deps: Arc<ServerDeps> = Arc::new(test_deps.server_deps());

    let mut handles = Vec::new();
    for i in 0..50 {
        let deps = deps.clone();
        let action = if i % 3 == 0 {
            ReactionAction::Dislike
        } else {
            ReactionAction::Like
        };
        handles.push(tokio::spawn(async move {
            react_to_review(review_id, UserId::new(), action, &deps).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stored = test_deps.reviews.find_by_id(review_id).await.unwrap().unwrap();
    assert_eq!(stored.dislike_count, 17);
    assert_eq!(stored.like_count, 33);
    assert_consistent(&stored);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn double_click_from_one_user_lands_in_a_defined_state() {
    let test_deps = TestDependencies::new();
    let review_id = fresh_review(&test_deps).await.id;
    let deps = Arc::new(test_deps.server_deps());
    let user = UserId::new();

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let deps = deps.clone();
            tokio::spawn(
                async move { react_to_review(review_id, user, ReactionAction::Like, &deps).await },
            )
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // Two serialized likes toggle back off
    let stored = test_deps.reviews.find_by_id(review_id).await.unwrap().unwrap();
    assert_eq!(stored.reaction_of(user), ReactionState::None);
    assert_eq!((stored.like_count, stored.dislike_count), (0, 0));
}

#[tokio::test]
async fn scripted_sequences_preserve_invariants() {
    let test_deps = TestDependencies::new();
    let review_id = fresh_review(&test_deps).await.id;
    let deps = test_deps.server_deps();
    let users: Vec<UserId> = (0..4).map(|_| UserId::new()).collect();

    // Deterministic pseudo-random walk over (user, action)
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    for _ in 0..300 {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        let user = users[(seed % users.len() as u64) as usize];
        let action = if (seed >> 8) % 2 == 0 {
            ReactionAction::Like
        } else {
            ReactionAction::Dislike
        };

        let summary = react_to_review(review_id, user, action, &deps).await.unwrap();
        let stored = test_deps.reviews.find_by_id(review_id).await.unwrap().unwrap();

        assert_consistent(&stored);
        assert_eq!(summary.like_count, stored.like_count);
        assert_eq!(summary.dislike_count, stored.dislike_count);
        assert_eq!(summary.reaction, stored.reaction_of(user));
    }
}
