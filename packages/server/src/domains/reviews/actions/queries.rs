//! Review read actions

use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use crate::common::{MovieId, ReviewId, UserId};
use crate::domains::reviews::data::{MovieSummary, ReviewData};
use crate::domains::reviews::error::{ReviewError, ReviewResult};
use crate::domains::reviews::models::Review;
use crate::domains::reviews::stats::{compute_stats, ReviewStats};
use crate::domains::users::UserProfile;
use crate::kernel::ServerDeps;

/// Attach author and movie display fields, one batched lookup per collaborator
async fn enrich(reviews: Vec<Review>, deps: &ServerDeps) -> ReviewResult<Vec<ReviewData>> {
    let author_ids: Vec<UserId> = reviews
        .iter()
        .map(|r| r.author_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let movie_ids: Vec<MovieId> = reviews
        .iter()
        .map(|r| r.movie_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let authors: HashMap<UserId, UserProfile> = deps
        .users
        .find_profiles(&author_ids)
        .await
        .map_err(ReviewError::storage("Fetching reviews failed, please try again later."))?
        .into_iter()
        .map(|profile| (profile.id, profile))
        .collect();
    let movies: HashMap<MovieId, MovieSummary> = deps
        .movies
        .find_movies(&movie_ids)
        .await
        .map_err(ReviewError::storage("Fetching reviews failed, please try again later."))?
        .into_iter()
        .map(|movie| (movie.id, MovieSummary::from(movie)))
        .collect();

    Ok(reviews
        .into_iter()
        .map(|review| {
            let author = authors.get(&review.author_id).cloned();
            let movie = movies.get(&review.movie_id).cloned();
            ReviewData::new(review, author, movie)
        })
        .collect())
}

pub async fn list_reviews(deps: &ServerDeps) -> ReviewResult<Vec<ReviewData>> {
    let reviews = deps
        .reviews
        .find_all()
        .await
        .map_err(ReviewError::storage("Fetching reviews failed, please try again later."))?;
    enrich(reviews, deps).await
}

pub async fn get_review(id: ReviewId, deps: &ServerDeps) -> ReviewResult<ReviewData> {
    let review = deps
        .reviews
        .find_by_id(id)
        .await
        .map_err(ReviewError::storage("Fetching review failed, please try again later."))?
        .ok_or_else(|| ReviewError::not_found("Review not found."))?;

    let mut enriched = enrich(vec![review], deps).await?;
    enriched
        .pop()
        .ok_or_else(|| ReviewError::not_found("Review not found."))
}

async fn movie_reviews(movie_id: MovieId, deps: &ServerDeps) -> ReviewResult<Vec<Review>> {
    deps.movies
        .find_movie(movie_id)
        .await
        .map_err(ReviewError::storage("Fetching reviews failed, please try again later."))?
        .ok_or_else(|| ReviewError::not_found("Movie not found."))?;

    deps.reviews
        .find_by_movie(movie_id)
        .await
        .map_err(ReviewError::storage("Fetching reviews failed, please try again later."))
}

/// Reviews of one movie; unknown movies are `NotFound`
pub async fn reviews_for_movie(
    movie_id: MovieId,
    deps: &ServerDeps,
) -> ReviewResult<Vec<ReviewData>> {
    let reviews = movie_reviews(movie_id, deps).await?;
    debug!(%movie_id, count = reviews.len(), "Loaded movie reviews");
    enrich(reviews, deps).await
}

/// Aggregate statistics, recomputed from the current review set on every call
pub async fn movie_stats(movie_id: MovieId, deps: &ServerDeps) -> ReviewResult<ReviewStats> {
    let reviews = movie_reviews(movie_id, deps).await?;
    Ok(compute_stats(&reviews))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::reviews::actions::react_to_review;
    use crate::domains::reviews::machines::ReactionAction;
    use crate::domains::reviews::models::NewReview;
    use crate::kernel::{BaseReviewStore, TestDependencies};

    #[tokio::test]
    async fn movie_reviews_are_enriched() {
        let test_deps = TestDependencies::new();
        let author = test_deps.users.add_user("ana", Some("ana.png"));
        let movie = test_deps.movies.add_movie("Heat", Some("heat.jpg"));
        let other = test_deps.movies.add_movie("Ronin", None);
        for (movie_id, text) in [(movie.id, "one"), (movie.id, "two"), (other.id, "three")] {
            test_deps
                .reviews
                .insert(
                    NewReview::builder()
                        .description(text)
                        .author_id(author.id)
                        .movie_id(movie_id)
                        .build(),
                )
                .await
                .unwrap();
        }
        let deps = test_deps.server_deps();

        let reviews = reviews_for_movie(movie.id, &deps).await.unwrap();

        assert_eq!(reviews.len(), 2);
        for review in &reviews {
            assert_eq!(review.author.as_ref().unwrap().user_name, "ana");
            assert_eq!(review.author.as_ref().unwrap().profile_image.as_deref(), Some("ana.png"));
            assert_eq!(review.movie.as_ref().unwrap().name, "Heat");
        }
    }

    #[tokio::test]
    async fn unknown_movie_is_not_found() {
        let deps = TestDependencies::new().server_deps();
        let result = reviews_for_movie(MovieId::new(), &deps).await;
        assert!(matches!(result, Err(ReviewError::NotFound(_))));
    }

    #[tokio::test]
    async fn missing_author_leaves_author_empty() {
        let test_deps = TestDependencies::new();
        let movie = test_deps.movies.add_movie("Heat", None);
        let review = test_deps
            .reviews
            .insert(
                NewReview::builder()
                    .description("orphan")
                    .author_id(UserId::new())
                    .movie_id(movie.id)
                    .build(),
            )
            .await
            .unwrap();
        let deps = test_deps.server_deps();

        let data = get_review(review.id, &deps).await.unwrap();

        assert!(data.author.is_none());
        assert_eq!(data.movie.unwrap().name, "Heat");
    }

    #[tokio::test]
    async fn stats_follow_the_current_review_set() {
        let test_deps = TestDependencies::new();
        let author = test_deps.users.add_user("ana", None);
        let movie = test_deps.movies.add_movie("Heat", None);
        let deps = test_deps.server_deps();

        assert_eq!(movie_stats(movie.id, &deps).await.unwrap(), ReviewStats::default());

        let mut ids = Vec::new();
        for rating in [1.5, 2.5, 3.5, 4.5, 4.9] {
            let review = test_deps
                .reviews
                .insert(
                    NewReview::builder()
                        .description("text")
                        .rating(rating)
                        .author_id(author.id)
                        .movie_id(movie.id)
                        .build(),
                )
                .await
                .unwrap();
            ids.push(review.id);
        }

        let stats = movie_stats(movie.id, &deps).await.unwrap();
        assert_eq!(stats.total_reviews, 5);
        assert_eq!(stats.average_rating, 3.4);
        assert_eq!(stats.distribution.four_to_five, 2);

        // Reactions do not touch ratings; deletes do.
        react_to_review(ids[0], author.id, ReactionAction::Like, &deps).await.unwrap();
        test_deps.reviews.delete(ids[4]).await.unwrap();

        let stats = movie_stats(movie.id, &deps).await.unwrap();
        assert_eq!(stats.total_reviews, 4);
        assert_eq!(stats.average_rating, 3.0);
        assert_eq!(stats.distribution.four_to_five, 1);
    }
}
