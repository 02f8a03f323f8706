// Student Records - API Core
//
// This crate provides the backend API for managing student records
// (name, gender, branch, year and a photo) plus an embedded admin UI.
// Records are validated before they reach the store; the store and the
// optional face detector are injected at startup through `ServerDeps`.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
