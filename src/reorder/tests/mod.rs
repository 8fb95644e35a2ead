//! Unit tests for drag-and-drop reordering.
