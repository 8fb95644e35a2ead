//! Step definitions for drag-and-drop reordering scenarios.

mod given;
mod then;
mod when;
pub mod world;
