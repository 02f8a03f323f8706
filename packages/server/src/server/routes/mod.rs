// HTTP routes
pub mod health;
pub mod students;

pub use health::*;
pub use students::*;
