//! Order status lifecycle
//!
//! ```text
//! pending ──> processing ──> completed
//!    │             │
//!    │             └───────> cancelled
//!    ├───────────────────────> completed
//!    └───────────────────────> cancelled
//! ```
//!
//! `completed` and `cancelled` are terminal. The status write itself is a
//! single-field merge with no side effects; committing it is the caller's
//! job, after explicit confirmation.

use shared::models::OrderStatus;

#[cfg(test)]
mod tests;

/// Whether moving an order from `current` to `target` is legal
///
/// Same-state "transitions" are rejected like any other illegal pair.
pub fn can_transition(current: OrderStatus, target: OrderStatus) -> bool {
    use OrderStatus::*;
    matches!(
        (current, target),
        (Pending, Processing)
            | (Pending, Completed)
            | (Pending, Cancelled)
            | (Processing, Completed)
            | (Processing, Cancelled)
    )
}

/// The transitions the UI may offer for an order in `status`
pub fn available_transitions(status: OrderStatus) -> &'static [OrderStatus] {
    use OrderStatus::*;
    match status {
        Pending => &[Processing, Completed, Cancelled],
        Processing => &[Completed, Cancelled],
        Completed | Cancelled => &[],
    }
}

/// Whether no further transition is offered from `status`
pub fn is_terminal(status: OrderStatus) -> bool {
    available_transitions(status).is_empty()
}
