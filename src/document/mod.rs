//! Remote document store capability.
//!
//! Boards and tasks are persisted as schemaless documents in two
//! collections. This module defines the store contract consumed by the
//! board and task repositories:
//!
//! - Query and document types in [`domain`]
//! - The [`ports::DocumentStore`] contract in [`ports`]
//! - An in-process implementation in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
