//! Boards: ordered columns and member roles.
//!
//! A board owns the column set that every task on it is filed into. This
//! module follows the crate's hexagonal layout:
//!
//! - Domain types in [`domain`]
//! - The repository contract in [`ports`]
//! - The document-store backed repository in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;
