// Business domains
pub mod students;
