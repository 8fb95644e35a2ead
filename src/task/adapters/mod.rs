//! Task repository adapters.

pub mod document;
