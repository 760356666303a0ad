//! Domain layer - Core entities and statement parameters.
//!
//! This crate contains pure domain types with no infrastructure dependencies.

pub mod constants;
pub mod user;

pub use constants::*;
pub use user::{CreateUser, UpdateUser, User};
