use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::common::UserId;

/// What a user sent: a like or a dislike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionAction {
    Like,
    Dislike,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid action '{0}': expected \"like\" or \"dislike\"")]
pub struct UnknownAction(pub String);

impl FromStr for ReactionAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

impl fmt::Display for ReactionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Like => write!(f, "like"),
            Self::Dislike => write!(f, "dislike"),
        }
    }
}

/// Where one user stands on one review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReactionState {
    #[default]
    None,
    Liked,
    Disliked,
}

impl ReactionState {
    /// Transition table. Repeating an action cancels it; the opposite
    /// action flips straight across.
    pub fn next(self, action: ReactionAction) -> Self {
        match (self, action) {
            (Self::None, ReactionAction::Like) => Self::Liked,
            (Self::None, ReactionAction::Dislike) => Self::Disliked,
            (Self::Liked, ReactionAction::Like) => Self::None,
            (Self::Liked, ReactionAction::Dislike) => Self::Disliked,
            (Self::Disliked, ReactionAction::Like) => Self::Liked,
            (Self::Disliked, ReactionAction::Dislike) => Self::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: ReactionState,
    pub to: ReactionState,
}

/// Reaction sets and counters of a single review.
///
/// Invariants after every [`ReactionLedger::apply`]: a user is in at most one
/// set, and counters never go below zero. Counters track set sizes unless an
/// administrative edit overwrote them, in which case they drift by exactly
/// the overwritten delta.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionLedger {
    pub like_count: i32,
    pub dislike_count: i32,
    pub liked_users: Vec<UserId>,
    pub disliked_users: Vec<UserId>,
}

/// A user's state given a review's two reaction sets; likes win if both hold the user.
pub fn state_in(
    liked_users: &[UserId],
    disliked_users: &[UserId],
    user_id: UserId,
) -> ReactionState {
    if liked_users.contains(&user_id) {
        ReactionState::Liked
    } else if disliked_users.contains(&user_id) {
        ReactionState::Disliked
    } else {
        ReactionState::None
    }
}

impl ReactionLedger {
    pub fn state_of(&self, user_id: UserId) -> ReactionState {
        state_in(&self.liked_users, &self.disliked_users, user_id)
    }

    /// Apply one reaction event, updating both sets and both counters.
    pub fn apply(&mut self, user_id: UserId, action: ReactionAction) -> Transition {
        let from = self.state_of(user_id);
        let to = from.next(action);

        // Take the user out of both sets first; a corrupted row holding the
        // user twice is repaired here rather than carried forward.
        let dropped_likes = remove_all(&mut self.liked_users, user_id);
        let dropped_dislikes = remove_all(&mut self.disliked_users, user_id);
        self.like_count = self.like_count.saturating_sub(dropped_likes).max(0);
        self.dislike_count = self.dislike_count.saturating_sub(dropped_dislikes).max(0);

        match to {
            ReactionState::Liked => {
                self.liked_users.push(user_id);
                self.like_count = self.like_count.saturating_add(1);
            }
            ReactionState::Disliked => {
                self.disliked_users.push(user_id);
                self.dislike_count = self.dislike_count.saturating_add(1);
            }
            ReactionState::None => {}
        }

        Transition { from, to }
    }
}

fn remove_all(users: &mut Vec<UserId>, user_id: UserId) -> i32 {
    let before = users.len();
    users.retain(|id| *id != user_id);
    i32::try_from(before - users.len()).unwrap_or(i32::MAX)
}
