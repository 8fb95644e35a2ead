//! Field names of task documents used in store queries.

/// Owning board identifier.
pub(super) const BOARD_ID: &str = "board_id";

/// Caller-stamped creation time in epoch milliseconds.
pub(super) const CREATED_AT: &str = "created_at";
