// TestDependencies - in-memory implementations for testing
//
// Provides stores and a scripted predictor that can be injected into
// ServerDeps for unit and integration tests, and for running the API without
// a database.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{
    BaseMovieCatalog, BaseRatingPredictor, BaseReviewStore, BaseUserDirectory, PredictionError,
    ServerDeps,
};
use crate::common::{MovieId, ReviewId, Role, UserId};
use crate::domains::auth::JwtService;
use crate::domains::movies::Movie;
use crate::domains::reviews::machines::ReactionAction;
use crate::domains::reviews::models::{NewReview, ReactedReview, Review, ReviewPatch};
use crate::domains::users::UserProfile;

pub const TEST_JWT_SECRET: &str = "test_secret";
pub const TEST_JWT_ISSUER: &str = "test_issuer";

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// In-memory Review Store
// =============================================================================

/// One mutex guards every review; a reaction holds it from read to write.
#[derive(Default)]
pub struct InMemoryReviewStore {
    reviews: Mutex<HashMap<ReviewId, Review>>,
}

impl InMemoryReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        lock(&self.reviews).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store a review as-is (seeding corrupted or legacy rows in tests)
    pub fn put(&self, review: Review) {
        lock(&self.reviews).insert(review.id, review);
    }
}

fn sorted(mut reviews: Vec<Review>) -> Vec<Review> {
    reviews.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    reviews
}

#[async_trait]
impl BaseReviewStore for InMemoryReviewStore {
    async fn insert(&self, review: NewReview) -> Result<Review> {
        let review = Review::new(review);
        lock(&self.reviews).insert(review.id, review.clone());
        Ok(review)
    }

    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>> {
        Ok(lock(&self.reviews).get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Review>> {
        Ok(sorted(lock(&self.reviews).values().cloned().collect()))
    }

    async fn find_by_movie(&self, movie_id: MovieId) -> Result<Vec<Review>> {
        Ok(sorted(
            lock(&self.reviews)
                .values()
                .filter(|review| review.movie_id == movie_id)
                .cloned()
                .collect(),
        ))
    }

    async fn apply_reaction(
        &self,
        id: ReviewId,
        user_id: UserId,
        action: ReactionAction,
    ) -> Result<Option<ReactedReview>> {
        let mut reviews = lock(&self.reviews);
        let Some(review) = reviews.get_mut(&id) else {
            return Ok(None);
        };
        let transition = review.react(user_id, action);
        Ok(Some(ReactedReview {
            review: review.clone(),
            transition,
        }))
    }

    async fn update(&self, id: ReviewId, patch: &ReviewPatch) -> Result<Option<Review>> {
        let mut reviews = lock(&self.reviews);
        Ok(reviews.get_mut(&id).map(|review| {
            review.apply_patch(patch);
            review.clone()
        }))
    }

    async fn delete(&self, id: ReviewId) -> Result<bool> {
        Ok(lock(&self.reviews).remove(&id).is_some())
    }
}

// =============================================================================
// In-memory User Directory
// =============================================================================

#[derive(Default)]
pub struct InMemoryUserDirectory {
    profiles: Mutex<HashMap<UserId, UserProfile>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, user_name: &str, profile_image: Option<&str>) -> UserProfile {
        let profile = UserProfile {
            id: UserId::new(),
            user_name: user_name.to_string(),
            profile_image: profile_image.map(String::from),
        };
        lock(&self.profiles).insert(profile.id, profile.clone());
        profile
    }
}

#[async_trait]
impl BaseUserDirectory for InMemoryUserDirectory {
    async fn find_profile(&self, id: UserId) -> Result<Option<UserProfile>> {
        Ok(lock(&self.profiles).get(&id).cloned())
    }

    async fn find_profiles(&self, ids: &[UserId]) -> Result<Vec<UserProfile>> {
        let profiles = lock(&self.profiles);
        Ok(ids.iter().filter_map(|id| profiles.get(id).cloned()).collect())
    }
}

// =============================================================================
// In-memory Movie Catalog
// =============================================================================

#[derive(Default)]
pub struct InMemoryMovieCatalog {
    movies: Mutex<HashMap<MovieId, Movie>>,
}

impl InMemoryMovieCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_movie(&self, name: &str, image: Option<&str>) -> Movie {
        let movie = Movie {
            id: MovieId::new(),
            name: name.to_string(),
            image: image.map(String::from),
            created_at: Utc::now(),
        };
        lock(&self.movies).insert(movie.id, movie.clone());
        movie
    }
}

#[async_trait]
impl BaseMovieCatalog for InMemoryMovieCatalog {
    async fn find_movie(&self, id: MovieId) -> Result<Option<Movie>> {
        Ok(lock(&self.movies).get(&id).cloned())
    }

    async fn find_movies(&self, ids: &[MovieId]) -> Result<Vec<Movie>> {
        let movies = lock(&self.movies);
        Ok(ids.iter().filter_map(|id| movies.get(id).cloned()).collect())
    }
}

// =============================================================================
// Mock Rating Predictor
// =============================================================================

/// Scripted predictor: queued outcomes are returned first, then the fallback
pub struct MockRatingPredictor {
    queued: Mutex<VecDeque<std::result::Result<f64, PredictionError>>>,
    fallback: Option<f64>,
    calls: Mutex<Vec<String>>,
}

impl MockRatingPredictor {
    /// Always predicts `score`
    pub fn returning(score: f64) -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            fallback: Some(score),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always fails as if the API were unreachable
    pub fn unavailable() -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            fallback: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn then_score(self, score: f64) -> Self {
        lock(&self.queued).push_back(Ok(score));
        self
    }

    pub fn then_fail(self, error: PredictionError) -> Self {
        lock(&self.queued).push_back(Err(error));
        self
    }

    /// Texts passed to `predict`, in call order
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl BaseRatingPredictor for MockRatingPredictor {
    async fn predict(&self, text: &str) -> std::result::Result<f64, PredictionError> {
        lock(&self.calls).push(text.to_string());

        if let Some(outcome) = lock(&self.queued).pop_front() {
            return outcome;
        }
        self.fallback
            .ok_or_else(|| PredictionError::Transport("connection refused".to_string()))
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Bundle of in-memory collaborators plus handles for seeding and inspection
#[derive(Clone)]
pub struct TestDependencies {
    pub reviews: Arc<InMemoryReviewStore>,
    pub users: Arc<InMemoryUserDirectory>,
    pub movies: Arc<InMemoryMovieCatalog>,
    pub predictor: Arc<MockRatingPredictor>,
    pub jwt_service: Arc<JwtService>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            reviews: Arc::new(InMemoryReviewStore::new()),
            users: Arc::new(InMemoryUserDirectory::new()),
            movies: Arc::new(InMemoryMovieCatalog::new()),
            predictor: Arc::new(MockRatingPredictor::returning(3.0)),
            jwt_service: Arc::new(JwtService::new(
                TEST_JWT_SECRET,
                TEST_JWT_ISSUER.to_string(),
            )),
        }
    }

    pub fn with_predictor(mut self, predictor: MockRatingPredictor) -> Self {
        self.predictor = Arc::new(predictor);
        self
    }

    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.reviews.clone(),
            self.users.clone(),
            self.movies.clone(),
            self.predictor.clone(),
            self.jwt_service.clone(),
        )
    }

    /// Bearer token for `user_id`, signed with the test secret
    pub fn token_for(&self, user_id: UserId, role: Role) -> String {
        self.jwt_service
            .create_token(user_id, role)
            .unwrap_or_default()
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
