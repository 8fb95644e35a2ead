//! Board repository adapters.

pub mod document;
