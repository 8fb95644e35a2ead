//! Field names of board documents used in store queries.

/// Membership array, elements shaped like [`crate::board::domain::Member`].
pub(super) const MEMBERS: &str = "members";

/// Caller-stamped update time in epoch milliseconds.
pub(super) const UPDATED_AT: &str = "updated_at";
