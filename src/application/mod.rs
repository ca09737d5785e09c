//! Application services layer scaffolding.

pub mod admin;
pub mod error;
pub mod repos;
