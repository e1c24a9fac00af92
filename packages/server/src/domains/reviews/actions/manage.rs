//! Administrative edit and delete. These overwrite fields directly and do
//! not go through the reaction state machine.

use tracing::info;

use crate::common::{AuthUser, ReviewId};
use crate::domains::reviews::error::{ReviewError, ReviewResult};
use crate::domains::reviews::models::{Review, ReviewPatch};
use crate::kernel::ServerDeps;

pub async fn update_review(
    id: ReviewId,
    patch: ReviewPatch,
    actor: &AuthUser,
    deps: &ServerDeps,
) -> ReviewResult<Review> {
    actor.require_admin()?;

    if let Some(description) = &patch.description {
        if description.trim().is_empty() {
            return Err(ReviewError::invalid("Review description cannot be empty."));
        }
    }
    if matches!(patch.like_count, Some(n) if n < 0)
        || matches!(patch.dislike_count, Some(n) if n < 0)
    {
        return Err(ReviewError::invalid("Counts must be non-negative."));
    }

    let review = deps
        .reviews
        .update(id, &patch)
        .await
        .map_err(ReviewError::storage("Updating review failed, please try again."))?
        .ok_or_else(|| ReviewError::not_found("Review not found."))?;

    info!(review_id = %id, admin = %actor.user_id, ?patch, "Review updated");
    Ok(review)
}

pub async fn delete_review(id: ReviewId, actor: &AuthUser, deps: &ServerDeps) -> ReviewResult<()> {
    actor.require_admin()?;

    let deleted = deps
        .reviews
        .delete(id)
        .await
        .map_err(ReviewError::storage("Deleting review failed, please try again."))?;
    if !deleted {
        return Err(ReviewError::not_found("Review not found."));
    }

    info!(review_id = %id, admin = %actor.user_id, "Review deleted");
    Ok(())
}
