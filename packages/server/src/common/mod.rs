// Common types and utilities shared across the application

pub mod change;

pub use change::Change;
