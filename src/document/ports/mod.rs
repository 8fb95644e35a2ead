//! Port contracts for the remote document store.

pub mod store;

pub use store::{DocumentStore, DocumentStoreError, DocumentStoreResult};

#[cfg(test)]
pub use store::MockDocumentStore;
