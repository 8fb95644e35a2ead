//! Document store adapters.

pub mod memory;
