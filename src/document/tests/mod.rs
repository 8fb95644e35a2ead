//! Unit tests for the document module.
