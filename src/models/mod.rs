//! Data models for the RecipeMate application.
//!
//! Field names serialize in camelCase to match the mobile client.

mod account;
mod catalog;
mod note;

pub use account::*;
pub use catalog::*;
pub use note::*;
