//! Pure decision logic for reviews. No I/O; storage layers call into these
//! while holding their per-review lock.

pub mod reaction;

pub use reaction::{
    state_in, ReactionAction, ReactionLedger, ReactionState, Transition, UnknownAction,
};
