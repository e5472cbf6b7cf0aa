//! UI components.

pub mod ambient;
