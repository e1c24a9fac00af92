//! React (like/dislike) action

use tracing::info;

use crate::common::{ReviewId, UserId};
use crate::domains::reviews::data::ReactionSummary;
use crate::domains::reviews::error::{ReviewError, ReviewResult};
use crate::domains::reviews::machines::ReactionAction;
use crate::kernel::ServerDeps;

/// Apply a like or dislike from `user_id` to a review.
///
/// The whole transition (set membership plus both counters) is one atomic
/// store operation. Sending the same action twice cancels it, so a retry is
/// not a no-op; callers reconcile to the returned counters.
pub async fn react_to_review(
    review_id: ReviewId,
    user_id: UserId,
    action: ReactionAction,
    deps: &ServerDeps,
) -> ReviewResult<ReactionSummary> {
    let reacted = deps
        .reviews
        .apply_reaction(review_id, user_id, action)
        .await
        .map_err(ReviewError::storage("Updating reaction failed, please try again."))?
        .ok_or_else(|| ReviewError::not_found("Review not found"))?;

    info!(
        %review_id,
        %user_id,
        %action,
        from = ?reacted.transition.from,
        to = ?reacted.transition.to,
        like_count = reacted.review.like_count,
        dislike_count = reacted.review.dislike_count,
        "Reaction applied"
    );

    Ok(ReactionSummary {
        success: true,
        like_count: reacted.review.like_count,
        dislike_count: reacted.review.dislike_count,
        reaction: reacted.state(),
    })
}
