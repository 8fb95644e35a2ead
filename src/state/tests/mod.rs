//! Unit tests for the state store.
